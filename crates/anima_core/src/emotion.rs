//! Emotions: short-lived, decaying, habituating instances.
//!
//! A stimulus names an event (or an emotion kind directly). The event's
//! candidate kinds are scored by their prior weight times a susceptibility
//! derived from current traits and moods, and the best one fires. Firing an
//! already active kind saturates instead of adding, and every kind carries a
//! sensitivity that drops with each trigger and recovers once the kind has
//! been quiet for its habituation window.
//!
//! Two slower feedbacks run inside `update`: a kind that stays the strongest
//! emotion past `fatigue_after` tires (decays faster, loses sensitivity), and
//! an optional resting kind fills in whenever nothing is felt strongly.

use crate::catalog::Catalog;
use crate::config::{EmotionDynamicsConfig, EmotionKindConfig, EventConfig, HabituationConfig};
use crate::context::Stimulus;
use crate::error::IgnoredSignal;
use crate::fuzzy::{blend, Influence};
use crate::snapshot::{ActiveEmotion, EmotionRecord};
use crate::state::sanitize_f32;
use std::collections::{HashMap, VecDeque};

/// Susceptibility never scales an impulse outside this range.
const MIN_SUSCEPTIBILITY: f32 = 0.1;
const MAX_SUSCEPTIBILITY: f32 = 2.0;

#[derive(Debug, Clone)]
struct Kind {
    name: String,
    valence: f32,
    decay_rate: f32,
    /// (mood index, signed weight)
    moods: Vec<(usize, f32)>,
    /// (trait index, signed weight)
    trait_bias: Vec<(usize, f32)>,
    habituation: HabituationConfig,
    /// Current sensitivity, 1.0 when fresh.
    sensitivity: f32,
    since_trigger: f32,
}

#[derive(Debug, Clone)]
struct Instance {
    kind: usize,
    intensity: f32,
    /// Time since the most recent trigger.
    age: f32,
    /// Time since the instance was created.
    lifetime: f32,
    last_impulse: f32,
    peak: f32,
}

#[derive(Debug, Clone)]
struct Event {
    intensity: f32,
    /// (emotion kind index, prior weight), in declaration order.
    candidates: Vec<(usize, f32)>,
}

/// What a successful trigger did.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fired {
    pub kind: usize,
    pub impulse: f32,
    pub intensity: f32,
}

#[derive(Debug, Clone)]
pub(crate) struct EmotionModel {
    kinds: Vec<Kind>,
    events: HashMap<String, Event>,
    active: Vec<Instance>,
    history: VecDeque<EmotionRecord>,
    dynamics: EmotionDynamicsConfig,
    /// Strongest active kind and how long it has led.
    dominance: Option<(usize, f32)>,
    resting: Option<usize>,
}

impl EmotionModel {
    pub(crate) fn new(
        kinds: &[EmotionKindConfig],
        events: &[EventConfig],
        dynamics: &EmotionDynamicsConfig,
        catalog: &Catalog,
    ) -> Self {
        let kinds = kinds
            .iter()
            .map(|k| Kind {
                name: k.name.clone(),
                valence: k.valence,
                decay_rate: k.decay_rate,
                moods: k
                    .moods
                    .iter()
                    .filter_map(|(m, w)| catalog.moods.get(m).map(|i| (i, *w)))
                    .collect(),
                trait_bias: k
                    .trait_bias
                    .iter()
                    .filter_map(|(t, w)| catalog.traits.get(t).map(|i| (i, *w)))
                    .collect(),
                habituation: k.habituation.clone(),
                sensitivity: 1.0,
                since_trigger: f32::INFINITY,
            })
            .collect();

        let events = events
            .iter()
            .map(|e| {
                let candidates = e
                    .candidates
                    .iter()
                    .filter_map(|c| catalog.emotions.get(&c.kind).map(|i| (i, c.weight)))
                    .collect();
                (
                    e.name.clone(),
                    Event {
                        intensity: e.intensity,
                        candidates,
                    },
                )
            })
            .collect();

        Self {
            kinds,
            events,
            active: Vec::new(),
            history: VecDeque::with_capacity(dynamics.history_capacity),
            dynamics: dynamics.clone(),
            dominance: None,
            resting: dynamics
                .resting_emotion
                .as_deref()
                .and_then(|kind| catalog.emotions.get(kind)),
        }
    }

    pub(crate) fn kind_name(&self, kind: usize) -> &str {
        &self.kinds[kind].name
    }

    /// How much current traits and moods favour `kind` (0.1 - 2.0, 1.0 neutral).
    fn susceptibility(&self, kind: usize, traits: &[f32], moods: &[f32]) -> f32 {
        let k = &self.kinds[kind];
        let trait_part = k.trait_bias.iter().filter_map(|&(t, w)| {
            traits
                .get(t)
                .map(|level| Influence::certain(w.signum() * (level - 0.5) * 2.0, w.abs()))
        });
        let mood_part = k.moods.iter().filter_map(|&(m, w)| {
            moods.get(m).map(|intensity| {
                Influence::certain(
                    w.signum() * intensity,
                    w.abs() * self.dynamics.mood_bias_weight,
                )
            })
        });
        let bias = blend(trait_part.chain(mood_part)).unwrap_or(0.0);
        (1.0 + self.dynamics.bias_gain * bias).clamp(MIN_SUSCEPTIBILITY, MAX_SUSCEPTIBILITY)
    }

    /// Fire a stimulus. `traits` and `moods` are 0-1 levels indexed like the catalog.
    pub(crate) fn trigger(
        &mut self,
        stimulus: &Stimulus,
        traits: &[f32],
        moods: &[f32],
        volatility: f32,
    ) -> Result<Option<Fired>, IgnoredSignal> {
        let strength = stimulus.strength.unwrap_or(1.0);
        if !strength.is_finite() {
            return Err(IgnoredSignal::MalformedValue {
                key: stimulus.name.clone(),
                value: strength,
            });
        }
        let strength = strength.clamp(0.0, 1.0);

        let (base, candidates) = match self.events.get(&stimulus.name) {
            Some(event) => (event.intensity, event.candidates.clone()),
            None => match self.kinds.iter().position(|k| k.name == stimulus.name) {
                Some(kind) => (1.0, vec![(kind, 1.0)]),
                None => return Err(IgnoredSignal::UnknownEvent(stimulus.name.clone())),
            },
        };

        // Highest biased score wins; declaration order breaks ties
        let mut best: Option<(usize, f32, f32)> = None;
        for (kind, weight) in candidates {
            let sus = self.susceptibility(kind, traits, moods);
            let score = weight * sus;
            if best.map_or(true, |(_, s, _)| score > s) {
                best = Some((kind, score, sus));
            }
        }
        let Some((kind, _, sus)) = best else {
            return Ok(None);
        };
        Ok(self.fire(kind, base * strength, sus, volatility))
    }

    /// Fire `kind` directly unless it is already active. Used for emotions the
    /// engine raises itself, such as on a change of dominant mood.
    pub(crate) fn fire_kind(
        &mut self,
        kind: usize,
        strength: f32,
        traits: &[f32],
        moods: &[f32],
        volatility: f32,
    ) -> Option<Fired> {
        if kind >= self.kinds.len() || self.active.iter().any(|i| i.kind == kind) {
            return None;
        }
        let sus = self.susceptibility(kind, traits, moods);
        self.fire(kind, strength.clamp(0.0, 1.0), sus, volatility)
    }

    fn fire(&mut self, kind: usize, drive: f32, sus: f32, volatility: f32) -> Option<Fired> {
        let k = &mut self.kinds[kind];
        let impulse = (drive * sus).clamp(0.0, 1.0) * k.sensitivity * volatility;
        let impulse = sanitize_f32(impulse, 0.0).clamp(0.0, 1.0);
        if impulse <= 0.0 {
            return None;
        }
        k.sensitivity = (k.sensitivity * (1.0 - k.habituation.step)).max(k.habituation.floor);
        k.since_trigger = 0.0;

        let intensity = match self.active.iter_mut().find(|i| i.kind == kind) {
            Some(inst) => {
                // Saturating combine: diminishing returns near 1.0
                inst.intensity = 1.0 - (1.0 - inst.intensity) * (1.0 - impulse);
                inst.age = 0.0;
                inst.last_impulse = impulse;
                inst.peak = inst.peak.max(inst.intensity);
                inst.intensity
            }
            None => {
                self.active.push(Instance {
                    kind,
                    intensity: impulse,
                    age: 0.0,
                    lifetime: 0.0,
                    last_impulse: impulse,
                    peak: impulse,
                });
                impulse
            }
        };

        Some(Fired {
            kind,
            impulse,
            intensity,
        })
    }

    /// Decay active instances, retire the faded ones, recover sensitivity.
    pub(crate) fn update(&mut self, dt: f32, volatility: f32, agent_age: f64) {
        if dt <= 0.0 {
            return;
        }

        let tired = self.track_dominance(dt);
        let fatigue = &self.dynamics;
        for inst in &mut self.active {
            let mut rate = self.kinds[inst.kind].decay_rate;
            if tired == Some(inst.kind) {
                rate += fatigue.fatigue_rate;
            }
            let rate = rate * volatility;
            inst.intensity = sanitize_f32(inst.intensity * (-rate * dt).exp(), 0.0);
            inst.age += dt;
            inst.lifetime += dt;
        }

        let threshold = self.dynamics.removal_threshold;
        let (faded, still_active): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|i| i.intensity < threshold);
        self.active = still_active;
        for inst in faded {
            let kind = &self.kinds[inst.kind];
            tracing::debug!(
                kind = %kind.name,
                peak = inst.peak,
                lifetime = inst.lifetime,
                "Emotion faded"
            );
            let record = EmotionRecord {
                kind: kind.name.clone(),
                valence: kind.valence,
                peak_intensity: inst.peak,
                duration: inst.lifetime,
                ended_at: agent_age,
            };
            self.push_history(record);
        }

        for (idx, k) in self.kinds.iter_mut().enumerate() {
            k.since_trigger += dt;
            let active = self.active.iter().any(|i| i.kind == idx);
            if !active && k.since_trigger >= k.habituation.window && k.sensitivity < 1.0 {
                let recovered = 1.0 - (-k.habituation.recovery_rate * dt).exp();
                k.sensitivity = (k.sensitivity + (1.0 - k.sensitivity) * recovered).min(1.0);
            }
        }

        if let Some(kind) = tired {
            let k = &mut self.kinds[kind];
            let worn = (-self.dynamics.fatigue_habituation * dt).exp();
            k.sensitivity = (k.sensitivity * worn).max(k.habituation.floor);
        }

        self.settle_to_rest();
    }

    /// Advance the dominance clock; returns the strongest kind once it has
    /// led for longer than `fatigue_after`.
    fn track_dominance(&mut self, dt: f32) -> Option<usize> {
        let mut strongest: Option<&Instance> = None;
        for inst in &self.active {
            if strongest.map_or(true, |s| inst.intensity > s.intensity) {
                strongest = Some(inst);
            }
        }
        self.dominance = match (strongest.map(|i| i.kind), self.dominance) {
            (Some(kind), Some((led, time))) if kind == led => Some((kind, time + dt)),
            (Some(kind), _) => Some((kind, dt)),
            (None, _) => None,
        };
        let (kind, time) = self.dominance?;
        if time > self.dynamics.fatigue_after {
            tracing::trace!(kind = %self.kinds[kind].name, time, "Dominant emotion tiring");
            Some(kind)
        } else {
            None
        }
    }

    /// Bring in the resting kind when nothing is felt strongly.
    fn settle_to_rest(&mut self) {
        let Some(kind) = self.resting else {
            return;
        };
        let threshold = self.dynamics.resting_threshold;
        let quiet = self.active.iter().all(|i| i.intensity < threshold);
        if quiet && !self.active.iter().any(|i| i.kind == kind) {
            let level = self.dynamics.resting_level;
            self.active.push(Instance {
                kind,
                intensity: level,
                age: 0.0,
                lifetime: 0.0,
                last_impulse: 0.0,
                peak: level,
            });
        }
    }

    fn push_history(&mut self, record: EmotionRecord) {
        while self.history.len() >= self.dynamics.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(record);
    }

    /// Active intensity per emotion kind (0.0 for inactive kinds).
    pub(crate) fn blended_emotion_vector(&self) -> Vec<f32> {
        let mut out = vec![0.0; self.kinds.len()];
        for inst in &self.active {
            out[inst.kind] = inst.intensity;
        }
        out
    }

    /// Intensity-weighted valence of everything active, 0.0 when calm.
    pub(crate) fn valence(&self) -> f32 {
        blend(
            self.active
                .iter()
                .map(|i| Influence::certain(self.kinds[i.kind].valence, i.intensity)),
        )
        .unwrap_or(0.0)
    }

    pub(crate) fn active(&self) -> Vec<ActiveEmotion> {
        self.active
            .iter()
            .map(|i| {
                let k = &self.kinds[i.kind];
                ActiveEmotion {
                    kind: k.name.clone(),
                    intensity: i.intensity,
                    valence: k.valence,
                    age: i.age,
                    habituation: k.sensitivity,
                    last_impulse: i.last_impulse,
                    peak_intensity: i.peak,
                }
            })
            .collect()
    }

    pub(crate) fn history(&self) -> Vec<EmotionRecord> {
        self.history.iter().cloned().collect()
    }
}
