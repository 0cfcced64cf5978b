//! Read-only projection of engine state for observers.
//!
//! An [`AgentSnapshot`] is an owned copy. Nothing in it points back into the
//! engine, so observers can keep, serialize or diff snapshots freely.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// Number of completed ticks.
    pub tick: u64,
    pub age: f64,
    pub maturity_factor: f32,
    pub volatility_scale: f32,
    pub traits: Vec<TraitReading>,
    /// All moods in priority order.
    pub mood_vector: Vec<MoodReading>,
    pub dominant_mood: String,
    pub active_emotions: Vec<ActiveEmotion>,
    /// Intensity-weighted valence of the active emotions, 0.0 when none.
    pub emotion_valence: f32,
    /// Oldest first.
    pub emotion_history: Vec<EmotionRecord>,
    /// Runtime inputs dropped so far (unknown keys, malformed values, ...).
    pub ignored_signals: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitReading {
    pub name: String,
    pub core: f32,
    pub plastic: f32,
    /// Blend of core, plastic and facets.
    pub effective: f32,
    pub facets: Vec<FacetReading>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetReading {
    pub name: String,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodReading {
    pub name: String,
    pub intensity: f32,
    pub target: f32,
    pub valence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEmotion {
    pub kind: String,
    pub intensity: f32,
    pub valence: f32,
    /// Time since the most recent trigger.
    pub age: f32,
    /// Current sensitivity of this kind (1.0 = fresh).
    pub habituation: f32,
    /// Impulse delivered by the most recent trigger, after habituation.
    pub last_impulse: f32,
    pub peak_intensity: f32,
}

/// A retired emotion instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionRecord {
    pub kind: String,
    pub valence: f32,
    pub peak_intensity: f32,
    /// How long the instance was active.
    pub duration: f32,
    /// Agent age when the instance was retired.
    pub ended_at: f64,
}

/// What a trigger did to the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// Emotion kind that fired.
    pub kind: String,
    /// Impulse delivered after habituation and volatility scaling.
    pub impulse: f32,
    /// Resulting intensity of the kind's instance.
    pub intensity: f32,
}

impl AgentSnapshot {
    pub fn trait_value(&self, name: &str) -> Option<f32> {
        self.traits
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.effective)
    }

    pub fn mood(&self, name: &str) -> Option<&MoodReading> {
        self.mood_vector.iter().find(|m| m.name == name)
    }

    pub fn mood_intensity(&self, name: &str) -> Option<f32> {
        self.mood(name).map(|m| m.intensity)
    }

    pub fn dominant(&self) -> Option<&MoodReading> {
        self.mood(&self.dominant_mood)
    }

    pub fn emotion(&self, kind: &str) -> Option<&ActiveEmotion> {
        self.active_emotions.iter().find(|e| e.kind == kind)
    }

    /// Strongest active emotion, if any.
    pub fn dominant_emotion(&self) -> Option<&ActiveEmotion> {
        self.active_emotions
            .iter()
            .max_by(|a, b| a.intensity.total_cmp(&b.intensity))
    }

    /// Intensity-weighted valence of the mood vector (-1.0 - 1.0).
    pub fn mood_valence(&self) -> f32 {
        let total: f32 = self.mood_vector.iter().map(|m| m.intensity).sum();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted: f32 = self
            .mood_vector
            .iter()
            .map(|m| m.intensity * m.valence)
            .sum();
        (weighted / total).clamp(-1.0, 1.0)
    }

    /// One-line summary for logs and terminals.
    pub fn describe(&self) -> String {
        let mood = self
            .dominant()
            .map(|m| format!("{} {:.2}", m.name, m.intensity))
            .unwrap_or_else(|| self.dominant_mood.clone());
        let emotions = if self.active_emotions.is_empty() {
            "-".to_string()
        } else {
            self.active_emotions
                .iter()
                .map(|e| format!("{} {:.2}", e.kind, e.intensity))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "[t={} age={:.1} maturity={:.2}] mood: {} | emotions: {}",
            self.tick, self.age, self.maturity_factor, mood, emotions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(name: &str, intensity: f32, valence: f32) -> MoodReading {
        MoodReading {
            name: name.to_string(),
            intensity,
            target: intensity,
            valence,
        }
    }

    fn snapshot() -> AgentSnapshot {
        AgentSnapshot {
            tick: 3,
            age: 3.0,
            maturity_factor: 0.01,
            volatility_scale: 0.99,
            traits: vec![TraitReading {
                name: "curiosity".to_string(),
                core: 0.6,
                plastic: 0.7,
                effective: 0.65,
                facets: vec![],
            }],
            mood_vector: vec![reading("happy", 0.6, 0.8), reading("sad", 0.2, -0.8)],
            dominant_mood: "happy".to_string(),
            active_emotions: vec![
                ActiveEmotion {
                    kind: "delighted".to_string(),
                    intensity: 0.4,
                    valence: 0.9,
                    age: 2.0,
                    habituation: 0.7,
                    last_impulse: 0.6,
                    peak_intensity: 0.6,
                },
                ActiveEmotion {
                    kind: "surprised".to_string(),
                    intensity: 0.1,
                    valence: 0.1,
                    age: 1.0,
                    habituation: 0.7,
                    last_impulse: 0.3,
                    peak_intensity: 0.3,
                },
            ],
            emotion_valence: 0.75,
            emotion_history: vec![],
            ignored_signals: 0,
        }
    }

    #[test]
    fn test_lookups() {
        let s = snapshot();
        assert_eq!(s.trait_value("curiosity"), Some(0.65));
        assert_eq!(s.trait_value("nope"), None);
        assert_eq!(s.mood_intensity("sad"), Some(0.2));
        assert_eq!(s.dominant().map(|m| m.name.as_str()), Some("happy"));
        assert_eq!(
            s.dominant_emotion().map(|e| e.kind.as_str()),
            Some("delighted")
        );
    }

    #[test]
    fn test_mood_valence_weighted() {
        let s = snapshot();
        // (0.6*0.8 - 0.2*0.8) / 0.8 = 0.4
        assert!((s.mood_valence() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_describe_mentions_mood_and_emotions() {
        let line = snapshot().describe();
        assert!(line.contains("happy"), "got: {line}");
        assert!(line.contains("delighted"), "got: {line}");
    }

    #[test]
    fn test_json_roundtrip() {
        let s = snapshot();
        let json = serde_json::to_string(&s).unwrap();
        let back: AgentSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
