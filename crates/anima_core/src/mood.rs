//! Moods: twelve continuous intensities that chase a fuzzy target.
//!
//! Each mood's target blends its own baseline, the traits it is tied to, the
//! active emotions that map onto it and the raw context signals it listens
//! to. The current intensity then closes part of the gap each tick according
//! to the mood's inertia, so a mood with low inertia lags and a mood with
//! high inertia follows quickly.

use crate::catalog::Catalog;
use crate::config::{EmotionKindConfig, MoodConfig, MoodDynamicsConfig};
use crate::context::Context;
use crate::fuzzy::{blend, Influence};
use crate::snapshot::MoodReading;
use crate::state::sanitize_f32;

#[derive(Debug, Clone)]
struct Mood {
    name: String,
    valence: f32,
    baseline: f32,
    inertia: f32,
    /// (trait index, signed weight)
    traits: Vec<(usize, f32)>,
    /// (emotion kind index, signed weight)
    emotions: Vec<(usize, f32)>,
    signals: Vec<(String, f32)>,
    /// Emotion kind raised when this mood takes over.
    transition: Option<usize>,
    intensity: f32,
    target: f32,
}

#[derive(Debug, Clone)]
pub(crate) struct MoodModel {
    moods: Vec<Mood>,
    dynamics: MoodDynamicsConfig,
}

impl MoodModel {
    /// Build the model and settle every mood on its resting target for the
    /// given trait levels.
    pub(crate) fn new(
        moods: &[MoodConfig],
        emotions: &[EmotionKindConfig],
        dynamics: &MoodDynamicsConfig,
        catalog: &Catalog,
        traits: &[f32],
    ) -> Self {
        let mut mapped: Vec<Vec<(usize, f32)>> = vec![Vec::new(); moods.len()];
        for (kind, e) in emotions.iter().enumerate() {
            for (mood, w) in &e.moods {
                if let Some(m) = catalog.moods.get(mood) {
                    mapped[m].push((kind, *w));
                }
            }
        }

        let moods = moods
            .iter()
            .zip(mapped)
            .map(|(m, emotions)| Mood {
                name: m.name.clone(),
                valence: m.valence,
                baseline: m.baseline,
                inertia: m.inertia,
                traits: m
                    .traits
                    .iter()
                    .filter_map(|(t, w)| catalog.traits.get(t).map(|i| (i, *w)))
                    .collect(),
                emotions,
                signals: m.signals.iter().map(|(s, w)| (s.clone(), *w)).collect(),
                transition: m
                    .transition_emotion
                    .as_deref()
                    .and_then(|kind| catalog.emotions.get(kind)),
                intensity: m.baseline,
                target: m.baseline,
            })
            .collect();

        let mut model = Self {
            moods,
            dynamics: dynamics.clone(),
        };
        let empty = Context::new();
        for i in 0..model.moods.len() {
            let target = model.target(i, traits, &[], &empty);
            let mood = &mut model.moods[i];
            mood.target = target;
            mood.intensity = target;
        }
        model
    }

    pub(crate) fn signal_names(&self) -> impl Iterator<Item = &str> {
        self.moods
            .iter()
            .flat_map(|m| m.signals.iter().map(|(s, _)| s.as_str()))
    }

    fn target(&self, idx: usize, traits: &[f32], emotions: &[f32], signals: &Context) -> f32 {
        let m = &self.moods[idx];
        let d = &self.dynamics;
        let toward = |w: f32| if w > 0.0 { 1.0 } else { 0.0 };

        let mut influences = vec![Influence::certain(m.baseline, d.baseline_weight)];
        for &(t, w) in &m.traits {
            if let Some(&level) = traits.get(t) {
                let value = if w > 0.0 { level } else { 1.0 - level };
                influences.push(Influence::certain(value, w.abs()));
            }
        }
        for &(kind, w) in &m.emotions {
            if let Some(&intensity) = emotions.get(kind) {
                influences.push(Influence::new(
                    toward(w),
                    w.abs() * d.emotion_gain,
                    intensity,
                ));
            }
        }
        for (signal, w) in &m.signals {
            if let Some(s) = signals.get(signal) {
                influences.push(Influence::new(toward(*w), w.abs(), s));
            }
        }

        blend(influences).unwrap_or(m.baseline).clamp(0.0, 1.0)
    }

    /// Move every mood toward its target.
    ///
    /// `traits` are 0-1 effective levels, `emotions` the per-kind intensities,
    /// `signals` already sanitized.
    pub(crate) fn update(
        &mut self,
        traits: &[f32],
        emotions: &[f32],
        signals: &Context,
        dt: f32,
        volatility: f32,
    ) {
        if dt <= 0.0 {
            return;
        }
        let max_step = self.dynamics.max_step;
        for i in 0..self.moods.len() {
            let target = self.target(i, traits, emotions, signals);
            let m = &mut self.moods[i];
            let rate = 1.0 - (1.0 - (m.inertia * volatility).clamp(0.0, 1.0)).powf(dt);
            let step = ((target - m.intensity) * rate).clamp(-max_step, max_step);
            m.target = target;
            m.intensity = sanitize_f32(m.intensity + step, m.baseline).clamp(0.0, 1.0);
        }
    }

    pub(crate) fn intensities(&self) -> Vec<f32> {
        self.moods.iter().map(|m| m.intensity).collect()
    }

    /// Highest intensity; ties go to the mood declared first.
    pub(crate) fn dominant(&self) -> usize {
        let mut best = 0;
        for (i, m) in self.moods.iter().enumerate().skip(1) {
            if m.intensity > self.moods[best].intensity {
                best = i;
            }
        }
        best
    }

    pub(crate) fn name(&self, idx: usize) -> &str {
        &self.moods[idx].name
    }

    /// Emotion kind and strength to fire when mood `idx` becomes dominant.
    pub(crate) fn transition(&self, idx: usize) -> Option<(usize, f32)> {
        let strength = self.dynamics.transition_strength;
        if strength <= 0.0 {
            return None;
        }
        self.moods.get(idx)?.transition.map(|kind| (kind, strength))
    }

    pub(crate) fn readings(&self) -> Vec<MoodReading> {
        self.moods
            .iter()
            .map(|m| MoodReading {
                name: m.name.clone(),
                intensity: m.intensity,
                target: m.target,
                valence: m.valence,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    struct Fixture {
        model: MoodModel,
        catalog: Catalog,
        traits: Vec<f32>,
        calm: Vec<f32>,
    }

    fn fixture_with(cfg: &EngineConfig) -> Fixture {
        let catalog = cfg.compile().unwrap();
        let traits: Vec<f32> = cfg.traits.iter().map(|t| t.core).collect();
        let model = MoodModel::new(&cfg.moods, &cfg.emotions, &cfg.mood_dynamics, &catalog, &traits);
        let calm = vec![0.0; catalog.emotions.len()];
        Fixture {
            model,
            catalog,
            traits,
            calm,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(&EngineConfig::default())
    }

    fn mood(f: &Fixture, name: &str) -> f32 {
        f.model.intensities()[f.catalog.moods.get(name).unwrap()]
    }

    #[test]
    fn test_starts_at_rest() {
        let mut f = fixture();
        let before = f.model.intensities();
        assert_eq!(f.model.name(f.model.dominant()), "neutral");
        f.model.update(&f.traits, &f.calm, &Context::new(), 1.0, 1.0);
        for (a, b) in before.iter().zip(f.model.intensities()) {
            assert!((a - b).abs() < 1e-6, "resting mood moved: {a} -> {b}");
        }
    }

    #[test]
    fn test_emotion_pulls_mapped_mood() {
        let mut f = fixture();
        let happy0 = mood(&f, "happy");
        let mut emotions = f.calm.clone();
        emotions[f.catalog.emotions.get("delighted").unwrap()] = 0.8;
        f.model.update(&f.traits, &emotions, &Context::new(), 1.0, 1.0);
        assert!(mood(&f, "happy") > happy0);
        assert_eq!(f.model.name(f.model.dominant()), "happy");
    }

    #[test]
    fn test_signal_drives_mood() {
        let mut f = fixture();
        let hot0 = mood(&f, "hot");
        let ctx = Context::new().with("heat", 1.0);
        for _ in 0..5 {
            f.model.update(&f.traits, &f.calm, &ctx, 1.0, 1.0);
        }
        assert!(mood(&f, "hot") > hot0);
    }

    #[test]
    fn test_step_is_capped() {
        let mut f = fixture();
        let before = f.model.intensities();
        let mut emotions = f.calm.clone();
        for e in emotions.iter_mut() {
            *e = 1.0;
        }
        let ctx: Context = f
            .model
            .signal_names()
            .map(|s| (s.to_string(), 1.0))
            .collect::<Vec<_>>()
            .into_iter()
            .collect();
        f.model.update(&f.traits, &emotions, &ctx, 10.0, 1.0);
        let max = f.model.dynamics.max_step;
        for (a, b) in before.iter().zip(f.model.intensities()) {
            assert!((a - b).abs() <= max + 1e-6);
            assert!((0.0..=1.0).contains(&b));
        }
    }

    #[test]
    fn test_inertia_differs_per_mood() {
        // Same pull on two moods: the higher-inertia one closes more of the gap
        let mut cfg = EngineConfig::default();
        cfg.mood_dynamics.max_step = 1.0;
        let mut f = fixture_with(&cfg);
        let mut emotions = f.calm.clone();
        emotions[f.catalog.emotions.get("delighted").unwrap()] = 1.0;
        let happy0 = mood(&f, "happy");
        let excited0 = mood(&f, "excited");
        f.model.update(&f.traits, &emotions, &Context::new(), 1.0, 1.0);
        let readings = f.model.readings();
        let frac = |name: &str, start: f32| {
            let r = readings.iter().find(|r| r.name == name).unwrap();
            (r.intensity - start) / (r.target - start)
        };
        let happy_frac = frac("happy", happy0);
        let excited_frac = frac("excited", excited0);
        assert!((happy_frac - 0.35).abs() < 1e-4, "happy closed {happy_frac}");
        assert!((excited_frac - 0.4).abs() < 1e-4, "excited closed {excited_frac}");
    }

    #[test]
    fn test_volatility_slows_moods() {
        let mut young = fixture();
        let mut old = fixture();
        let mut emotions = young.calm.clone();
        emotions[young.catalog.emotions.get("afraid").unwrap()] = 0.9;
        let a0 = mood(&young, "anxious");
        young.model.update(&young.traits, &emotions, &Context::new(), 1.0, 1.0);
        old.model.update(&old.traits, &emotions, &Context::new(), 1.0, 0.3);
        assert!(mood(&old, "anxious") - a0 < mood(&young, "anxious") - a0);
    }

    #[test]
    fn test_dominant_tie_breaks_by_declaration_order() {
        let mut f = fixture();
        for m in f.model.moods.iter_mut() {
            m.intensity = 0.4;
        }
        assert_eq!(f.model.dominant(), 0);
        f.model.moods[5].intensity = 0.7;
        f.model.moods[9].intensity = 0.7;
        assert_eq!(f.model.dominant(), 5);
    }

    #[test]
    fn test_transition_emotion_per_mood() {
        let f = fixture();
        let happy = f.catalog.moods.get("happy").unwrap();
        let delighted = f.catalog.emotions.get("delighted").unwrap();
        assert_eq!(f.model.transition(happy), Some((delighted, 0.5)));

        let mut cfg = EngineConfig::default();
        cfg.mood_dynamics.transition_strength = 0.0;
        let f = fixture_with(&cfg);
        assert_eq!(f.model.transition(happy), None);
    }
}
