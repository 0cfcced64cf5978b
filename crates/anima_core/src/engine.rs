//! The engine: one agent's complete affective state.
//!
//! ## Tick order
//! 1. age advances and the volatility scale is recomputed
//! 2. traits move under the context and the emotions active at tick start
//! 3. emotions decay, faded ones retire to history, sensitivity recovers
//! 4. moods chase targets built from the fresh traits and emotions
//! 5. a change of dominant mood fires that mood's transition emotion
//!
//! Triggers apply immediately, between ticks.

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::context::{Context, Stimulus};
use crate::emotion::EmotionModel;
use crate::error::{ConfigError, IgnoredSignal};
use crate::maturity::MaturityController;
use crate::mood::MoodModel;
use crate::personality::TraitModel;
use crate::snapshot::{AgentSnapshot, Reaction};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    maturity: MaturityController,
    traits: TraitModel,
    moods: MoodModel,
    emotions: EmotionModel,
    /// Every context signal some trait facet or mood listens to.
    known_signals: HashSet<String>,
    tick: u64,
    ignored: u64,
}

impl Engine {
    /// Validate `config` and build an engine from it.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let catalog = config.compile()?;

        let mut traits = TraitModel::new(&config.traits, &config.trait_dynamics, &catalog);
        if let Some(r) = &config.randomize {
            traits.randomize(r.seed, r.spread);
        }
        let emotions = EmotionModel::new(
            &config.emotions,
            &config.events,
            &config.emotion_dynamics,
            &catalog,
        );
        let moods = MoodModel::new(
            &config.moods,
            &config.emotions,
            &config.mood_dynamics,
            &catalog,
            &traits.normalized(),
        );
        let known_signals = traits
            .signal_names()
            .chain(moods.signal_names())
            .map(str::to_string)
            .collect();

        let engine = Self {
            catalog,
            maturity: MaturityController::new(&config.maturity),
            traits,
            moods,
            emotions,
            known_signals,
            tick: 0,
            ignored: 0,
        };
        tracing::info!(
            traits = engine.catalog.traits.len(),
            moods = engine.catalog.moods.len(),
            emotion_kinds = engine.catalog.emotions.len(),
            age = engine.maturity.age(),
            seeded = config.randomize.is_some(),
            dominant = engine.dominant_mood(),
            "Affective engine constructed"
        );
        Ok(engine)
    }

    /// Advance the agent by `dt` time units under `context`.
    ///
    /// Never fails: unknown signals, malformed values and invalid `dt` are
    /// dropped and counted in [`AgentSnapshot::ignored_signals`].
    pub fn tick(&mut self, context: &Context, dt: f64) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            self.ignore(IgnoredSignal::InvalidDelta(dt));
            0.0
        };
        let signals = self.sanitize(context);

        self.maturity.advance(dt);
        let volatility = self.maturity.volatility_scale();
        let step = dt as f32;

        let emotions_at_start = self.emotions.blended_emotion_vector();
        self.traits
            .update(&signals, &emotions_at_start, step, volatility);
        self.emotions.update(step, volatility, self.maturity.age());
        let previous = self.moods.dominant();
        let traits = self.traits.normalized();
        self.moods.update(
            &traits,
            &self.emotions.blended_emotion_vector(),
            &signals,
            step,
            volatility,
        );
        let dominant = self.moods.dominant();
        if dominant != previous {
            self.on_mood_change(previous, dominant, &traits, volatility);
        }

        self.tick += 1;
        tracing::trace!(
            tick = self.tick,
            age = self.maturity.age(),
            volatility,
            dominant = self.dominant_mood(),
            "Tick"
        );
    }

    /// Apply a discrete stimulus now. Returns `None` when nothing fired.
    pub fn trigger(&mut self, stimulus: impl Into<Stimulus>) -> Option<Reaction> {
        let stimulus = stimulus.into();
        let traits = self.traits.normalized();
        let moods = self.moods.intensities();
        let volatility = self.maturity.volatility_scale();

        match self
            .emotions
            .trigger(&stimulus, &traits, &moods, volatility)
        {
            Ok(Some(fired)) => {
                let reaction = Reaction {
                    kind: self.emotions.kind_name(fired.kind).to_string(),
                    impulse: fired.impulse,
                    intensity: fired.intensity,
                };
                tracing::debug!(
                    stimulus = %stimulus.name,
                    kind = %reaction.kind,
                    impulse = reaction.impulse,
                    intensity = reaction.intensity,
                    "Emotion triggered"
                );
                Some(reaction)
            }
            Ok(None) => None,
            Err(signal) => {
                self.ignore(signal);
                None
            }
        }
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            tick: self.tick,
            age: self.maturity.age(),
            maturity_factor: self.maturity.maturity_factor(),
            volatility_scale: self.maturity.volatility_scale(),
            traits: self.traits.readings(),
            mood_vector: self.moods.readings(),
            dominant_mood: self.dominant_mood().to_string(),
            active_emotions: self.emotions.active(),
            emotion_valence: self.emotions.valence(),
            emotion_history: self.emotions.history(),
            ignored_signals: self.ignored,
        }
    }

    /// Effective value of a trait, `None` for unknown names.
    pub fn effective_trait(&self, name: &str) -> Option<f32> {
        self.catalog
            .traits
            .get(name)
            .map(|i| self.traits.effective(i))
    }

    pub fn dominant_mood(&self) -> &str {
        self.moods.name(self.moods.dominant())
    }

    pub fn age(&self) -> f64 {
        self.maturity.age()
    }

    pub fn maturity_factor(&self) -> f32 {
        self.maturity.maturity_factor()
    }

    pub fn volatility_scale(&self) -> f32 {
        self.maturity.volatility_scale()
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn ignored_signals(&self) -> u64 {
        self.ignored
    }

    fn on_mood_change(&mut self, from: usize, to: usize, traits: &[f32], volatility: f32) {
        tracing::debug!(
            from = self.moods.name(from),
            to = self.moods.name(to),
            "Dominant mood changed"
        );
        let Some((kind, strength)) = self.moods.transition(to) else {
            return;
        };
        let moods = self.moods.intensities();
        if let Some(fired) = self
            .emotions
            .fire_kind(kind, strength, traits, &moods, volatility)
        {
            tracing::debug!(
                kind = self.emotions.kind_name(fired.kind),
                intensity = fired.intensity,
                "Mood transition emotion"
            );
        }
    }

    /// Drop unknown and malformed signals, clamp the rest to 0-1.
    fn sanitize(&mut self, context: &Context) -> Context {
        let mut clean = Context::new();
        let mut dropped = Vec::new();
        for (key, value) in context.iter() {
            if !self.known_signals.contains(key) {
                dropped.push(IgnoredSignal::UnknownContextKey(key.to_string()));
            } else if !value.is_finite() {
                dropped.push(IgnoredSignal::MalformedValue {
                    key: key.to_string(),
                    value,
                });
            } else {
                clean.set(key, value.clamp(0.0, 1.0));
            }
        }
        for signal in dropped {
            self.ignore(signal);
        }
        clean
    }

    fn ignore(&mut self, signal: IgnoredSignal) {
        self.ignored += 1;
        tracing::debug!(%signal, total = self.ignored, "Ignored input");
    }
}
