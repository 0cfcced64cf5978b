//! Caller-supplied inputs: per-tick context signals and discrete stimuli.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context signals for one tick: signal name -> strength (0.0 - 1.0).
///
/// Unknown names are ignored by the engine. Non-finite strengths are dropped,
/// out-of-range strengths are clamped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    signals: BTreeMap<String, f32>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, signal: impl Into<String>, strength: f32) -> Self {
        self.set(signal, strength);
        self
    }

    pub fn set(&mut self, signal: impl Into<String>, strength: f32) {
        self.signals.insert(signal.into(), strength);
    }

    pub fn get(&self, signal: &str) -> Option<f32> {
        self.signals.get(signal).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.signals.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f32)> for Context {
    fn from_iter<T: IntoIterator<Item = (K, f32)>>(iter: T) -> Self {
        let mut ctx = Context::new();
        for (k, v) in iter {
            ctx.set(k, v);
        }
        ctx
    }
}

/// A discrete stimulus: an event name (or an emotion kind name) and an
/// optional strength multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stimulus {
    pub name: String,
    /// Defaults to 1.0 when absent.
    pub strength: Option<f32>,
}

impl Stimulus {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strength: None,
        }
    }

    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = Some(strength);
        self
    }
}

impl From<&str> for Stimulus {
    fn from(name: &str) -> Self {
        Stimulus::new(name)
    }
}

impl From<String> for Stimulus {
    fn from(name: String) -> Self {
        Stimulus::new(name)
    }
}

impl From<(&str, f32)> for Stimulus {
    fn from((name, strength): (&str, f32)) -> Self {
        Stimulus::new(name).with_strength(strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let ctx = Context::new().with("heat", 0.7).with("idle", 1.0);
        assert_eq!(ctx.get("heat"), Some(0.7));
        assert_eq!(ctx.get("chill"), None);
        assert!(!ctx.is_empty());
        assert_eq!(ctx.iter().count(), 2);
    }

    #[test]
    fn test_context_from_iter() {
        let ctx: Context = [("talking", 0.5), ("talking", 0.9)].into_iter().collect();
        assert_eq!(ctx.get("talking"), Some(0.9));
    }

    #[test]
    fn test_context_json_is_flat_map() {
        let ctx = Context::new().with("novelty", 0.25);
        let json = serde_json::to_string(&ctx).unwrap();
        assert_eq!(json, r#"{"novelty":0.25}"#);
    }

    #[test]
    fn test_stimulus_conversions() {
        let s: Stimulus = "praise".into();
        assert_eq!(s.strength, None);
        let s: Stimulus = ("insult", 0.4).into();
        assert_eq!(s.name, "insult");
        assert_eq!(s.strength, Some(0.4));
    }
}
