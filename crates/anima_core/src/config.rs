//! Engine configuration.
//!
//! Everything the engine needs to know about an agent is declared here: the 8
//! traits, the 12 moods, the emotion catalog, the event table and the tuning
//! of every model. Configs load from TOML with defaults for anything omitted;
//! [`EngineConfig::validate`] rejects a config before an engine is built.

use crate::catalog::{Catalog, NameIndex};
use crate::error::ConfigError;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Number of traits an agent has.
pub const TRAIT_COUNT: usize = 8;
/// Number of mood categories.
pub const MOOD_COUNT: usize = 12;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub traits: Vec<TraitConfig>,
    pub trait_dynamics: TraitDynamicsConfig,
    /// Declaration order doubles as the dominant-mood tie-break priority.
    pub moods: Vec<MoodConfig>,
    pub mood_dynamics: MoodDynamicsConfig,
    pub emotions: Vec<EmotionKindConfig>,
    pub events: Vec<EventConfig>,
    pub emotion_dynamics: EmotionDynamicsConfig,
    pub maturity: MaturityConfig,
    pub randomize: Option<RandomizeConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            traits: crate::defaults::traits(),
            trait_dynamics: TraitDynamicsConfig::default(),
            moods: crate::defaults::moods(),
            mood_dynamics: MoodDynamicsConfig::default(),
            emotions: crate::defaults::emotions(),
            events: crate::defaults::events(),
            emotion_dynamics: EmotionDynamicsConfig::default(),
            maturity: MaturityConfig::default(),
            randomize: None,
        }
    }
}

impl EngineConfig {
    /// Load config from a TOML file, falling back to defaults for missing sections.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if that fails, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse TOML config")
    }

    /// Default catalog with deterministically jittered starting traits.
    pub fn seeded(seed: u64) -> Self {
        Self {
            randomize: Some(RandomizeConfig {
                seed,
                ..RandomizeConfig::default()
            }),
            ..Self::default()
        }
    }

    /// Same config, starting at a different age.
    pub fn with_initial_age(mut self, age: f64) -> Self {
        self.maturity.initial_age = age;
        self
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("ANIMA_INITIAL_AGE") {
            if let Ok(age) = v.parse() {
                self.maturity.initial_age = age;
            }
        }
        if let Ok(v) = std::env::var("ANIMA_HISTORY_CAPACITY") {
            if let Ok(n) = v.parse() {
                self.emotion_dynamics.history_capacity = n;
            }
        }
        if let Ok(v) = std::env::var("ANIMA_SEED") {
            if let Ok(seed) = v.parse() {
                let spread = self
                    .randomize
                    .as_ref()
                    .map(|r| r.spread)
                    .unwrap_or_else(|| RandomizeConfig::default().spread);
                self.randomize = Some(RandomizeConfig { seed, spread });
            }
        }
    }

    /// Check every name, count, range and cross-reference.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compile().map(|_| ())
    }

    pub(crate) fn compile(&self) -> Result<Catalog, ConfigError> {
        if self.traits.len() != TRAIT_COUNT {
            return Err(ConfigError::WrongCount {
                section: "traits",
                expected: TRAIT_COUNT,
                found: self.traits.len(),
            });
        }
        if self.moods.len() != MOOD_COUNT {
            return Err(ConfigError::WrongCount {
                section: "moods",
                expected: MOOD_COUNT,
                found: self.moods.len(),
            });
        }
        if self.emotions.is_empty() {
            return Err(ConfigError::MissingName {
                section: "emotions",
            });
        }

        let catalog = Catalog {
            traits: NameIndex::build("traits", self.traits.iter().map(|t| t.name.as_str()))?,
            moods: NameIndex::build("moods", self.moods.iter().map(|m| m.name.as_str()))?,
            emotions: NameIndex::build(
                "emotions",
                self.emotions.iter().map(|e| e.name.as_str()),
            )?,
        };
        NameIndex::build("events", self.events.iter().map(|e| e.name.as_str()))?;

        self.trait_dynamics.validate()?;
        self.mood_dynamics.validate()?;
        self.emotion_dynamics.validate()?;
        self.maturity.validate()?;
        if let Some(r) = &self.randomize {
            unit("randomize.spread", r.spread)?;
        }

        let bounds = &self.trait_dynamics;
        for t in &self.traits {
            t.validate(bounds.lower, bounds.upper, &catalog)?;
        }
        for m in &self.moods {
            m.validate(&catalog)?;
        }
        for e in &self.emotions {
            e.validate(&catalog)?;
        }
        for ev in &self.events {
            ev.validate(&catalog)?;
        }
        if let Some(kind) = &self.emotion_dynamics.resting_emotion {
            catalog
                .emotions
                .resolve("emotions", kind, "emotion_dynamics.resting_emotion")?;
        }

        Ok(catalog)
    }
}

// ============================================================================
// Traits
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitConfig {
    pub name: String,
    /// Initial core (and plastic) value.
    pub core: f32,
    pub facets: Vec<FacetConfig>,
    /// Emotion kind -> signed pull that an active emotion exerts on this trait.
    #[serde(default)]
    pub emotion_affinity: BTreeMap<String, f32>,
    /// Multiplier on upward movement.
    #[serde(default = "one")]
    pub rise: f32,
    /// Multiplier on downward movement.
    #[serde(default = "one")]
    pub fall: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetConfig {
    pub name: String,
    /// Share of the trait this facet carries (0.0 - 1.0].
    pub weight: f32,
    /// Resistance to drift (0.0 - 1.0). 1.0 never moves on its own.
    #[serde(default = "half")]
    pub stability: f32,
    /// Context signal -> signed weight (-1.0 - 1.0).
    #[serde(default)]
    pub signals: BTreeMap<String, f32>,
}

impl TraitConfig {
    fn validate(&self, lower: f32, upper: f32, catalog: &Catalog) -> Result<(), ConfigError> {
        let owner = &self.name;
        if !self.core.is_finite() || self.core < lower || self.core > upper {
            return Err(ConfigError::out_of_range(
                format!("traits.{owner}.core"),
                self.core,
                lower,
                upper,
            ));
        }
        if self.facets.is_empty() {
            return Err(ConfigError::MissingName { section: "facets" });
        }
        NameIndex::build("facets", self.facets.iter().map(|f| f.name.as_str()))?;
        for f in &self.facets {
            let field = format!("traits.{owner}.facets.{}", f.name);
            if !(f.weight > 0.0 && f.weight <= 1.0) {
                return Err(ConfigError::out_of_range(format!("{field}.weight"), f.weight, 0.0, 1.0));
            }
            unit(&format!("{field}.stability"), f.stability)?;
            for (signal, w) in &f.signals {
                signed(&format!("{field}.signals.{signal}"), *w)?;
            }
        }
        for (kind, w) in &self.emotion_affinity {
            catalog.emotions.resolve("emotions", kind, owner)?;
            signed(&format!("traits.{owner}.emotion_affinity.{kind}"), *w)?;
        }
        positive(&format!("traits.{owner}.rise"), self.rise)?;
        positive(&format!("traits.{owner}.fall"), self.fall)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitDynamicsConfig {
    pub lower: f32,
    pub upper: f32,
    /// Plastic movement per unit time at full drive.
    pub plastic_rate: f32,
    /// Facet movement per unit time at full drive, before stability.
    pub facet_rate: f32,
    /// Fraction of the plastic-core gap closed per unit time.
    pub elasticity: f32,
    /// Core movement per unit time once a deviation has persisted.
    pub core_rate: f32,
    /// Plastic-core gap that counts as a deviation.
    pub deviation_threshold: f32,
    /// Time a deviation must last before the core starts following.
    pub persistence: f32,
    /// Weights of core, plastic and facet mean in the effective trait.
    pub core_weight: f32,
    pub plastic_weight: f32,
    pub facet_weight: f32,
    /// Confidence given to emotion-driven trait influences.
    pub emotion_confidence: f32,
}

impl Default for TraitDynamicsConfig {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
            plastic_rate: 0.05,
            facet_rate: 0.08,
            elasticity: 0.05,
            core_rate: 0.01,
            deviation_threshold: 0.05,
            persistence: 20.0,
            core_weight: 0.4,
            plastic_weight: 0.4,
            facet_weight: 0.2,
            emotion_confidence: 0.5,
        }
    }
}

impl TraitDynamicsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.lower.is_finite() || !self.upper.is_finite() || self.lower >= self.upper {
            return Err(ConfigError::InvalidBounds {
                lower: self.lower,
                upper: self.upper,
            });
        }
        positive("trait_dynamics.plastic_rate", self.plastic_rate)?;
        positive("trait_dynamics.facet_rate", self.facet_rate)?;
        positive("trait_dynamics.elasticity", self.elasticity)?;
        positive("trait_dynamics.core_rate", self.core_rate)?;
        positive("trait_dynamics.deviation_threshold", self.deviation_threshold)?;
        if !self.persistence.is_finite() || self.persistence < 0.0 {
            return Err(ConfigError::out_of_range(
                "trait_dynamics.persistence",
                self.persistence,
                0.0,
                f32::MAX,
            ));
        }
        if self.core_rate >= self.plastic_rate {
            return Err(ConfigError::Inconsistent(format!(
                "trait_dynamics.core_rate ({}) must be below plastic_rate ({})",
                self.core_rate, self.plastic_rate
            )));
        }
        for (field, w) in [
            ("trait_dynamics.core_weight", self.core_weight),
            ("trait_dynamics.plastic_weight", self.plastic_weight),
            ("trait_dynamics.facet_weight", self.facet_weight),
        ] {
            unit(field, w)?;
        }
        if self.core_weight + self.plastic_weight + self.facet_weight <= 0.0 {
            return Err(ConfigError::Inconsistent(
                "trait_dynamics blend weights sum to zero".to_string(),
            ));
        }
        unit("trait_dynamics.emotion_confidence", self.emotion_confidence)
    }
}

// ============================================================================
// Moods
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodConfig {
    pub name: String,
    /// Pleasantness of the category (-1.0 - 1.0).
    #[serde(default)]
    pub valence: f32,
    /// Resting intensity the mood drifts to with nothing else going on.
    #[serde(default = "default_mood_baseline")]
    pub baseline: f32,
    /// Fraction of the gap to target closed per unit time (0.0 - 1.0].
    pub inertia: f32,
    /// Emotion kind fired when this mood takes over as dominant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_emotion: Option<String>,
    /// Trait -> signed contribution to this mood's target.
    #[serde(default)]
    pub traits: BTreeMap<String, f32>,
    /// Context signal -> signed contribution.
    #[serde(default)]
    pub signals: BTreeMap<String, f32>,
}

impl MoodConfig {
    fn validate(&self, catalog: &Catalog) -> Result<(), ConfigError> {
        let owner = &self.name;
        signed(&format!("moods.{owner}.valence"), self.valence)?;
        unit(&format!("moods.{owner}.baseline"), self.baseline)?;
        positive(&format!("moods.{owner}.inertia"), self.inertia)?;
        if self.inertia > 1.0 {
            return Err(ConfigError::out_of_range(
                format!("moods.{owner}.inertia"),
                self.inertia,
                0.0,
                1.0,
            ));
        }
        for (t, w) in &self.traits {
            catalog.traits.resolve("traits", t, owner)?;
            signed(&format!("moods.{owner}.traits.{t}"), *w)?;
        }
        for (s, w) in &self.signals {
            signed(&format!("moods.{owner}.signals.{s}"), *w)?;
        }
        if let Some(kind) = &self.transition_emotion {
            catalog.emotions.resolve("emotions", kind, owner)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodDynamicsConfig {
    /// Largest change any mood may make in one tick.
    pub max_step: f32,
    /// Weight of a mood's own baseline in its target.
    pub baseline_weight: f32,
    /// Multiplier on emotion mood-mapping weights.
    pub emotion_gain: f32,
    /// Strength of the emotion fired on a change of dominant mood (0.0 disables).
    pub transition_strength: f32,
}

impl Default for MoodDynamicsConfig {
    fn default() -> Self {
        Self {
            max_step: 0.15,
            baseline_weight: 1.0,
            emotion_gain: 2.0,
            transition_strength: 0.5,
        }
    }
}

impl MoodDynamicsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("mood_dynamics.max_step", self.max_step)?;
        if self.max_step > 1.0 {
            return Err(ConfigError::out_of_range(
                "mood_dynamics.max_step",
                self.max_step,
                0.0,
                1.0,
            ));
        }
        positive("mood_dynamics.baseline_weight", self.baseline_weight)?;
        if !self.emotion_gain.is_finite() || self.emotion_gain < 0.0 {
            return Err(ConfigError::out_of_range(
                "mood_dynamics.emotion_gain",
                self.emotion_gain,
                0.0,
                f32::MAX,
            ));
        }
        unit("mood_dynamics.transition_strength", self.transition_strength)
    }
}

// ============================================================================
// Emotions and events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionKindConfig {
    pub name: String,
    /// Pleasantness (-1.0 - 1.0).
    pub valence: f32,
    /// Exponential decay rate per unit time.
    pub decay_rate: f32,
    /// Mood -> signed mapping weight.
    #[serde(default)]
    pub moods: BTreeMap<String, f32>,
    /// Trait -> signed susceptibility bias.
    #[serde(default)]
    pub trait_bias: BTreeMap<String, f32>,
    #[serde(default)]
    pub habituation: HabituationConfig,
}

impl EmotionKindConfig {
    fn validate(&self, catalog: &Catalog) -> Result<(), ConfigError> {
        let owner = &self.name;
        signed(&format!("emotions.{owner}.valence"), self.valence)?;
        positive(&format!("emotions.{owner}.decay_rate"), self.decay_rate)?;
        for (m, w) in &self.moods {
            catalog.moods.resolve("moods", m, owner)?;
            signed(&format!("emotions.{owner}.moods.{m}"), *w)?;
        }
        for (t, w) in &self.trait_bias {
            catalog.traits.resolve("traits", t, owner)?;
            signed(&format!("emotions.{owner}.trait_bias.{t}"), *w)?;
        }
        self.habituation.validate(owner)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HabituationConfig {
    /// Fraction of sensitivity lost per trigger (0.0 - 1.0].
    pub step: f32,
    /// Sensitivity never drops below this.
    pub floor: f32,
    /// Time after a trigger before sensitivity starts recovering.
    pub window: f32,
    /// Recovery rate per unit time once the window has passed.
    pub recovery_rate: f32,
}

impl Default for HabituationConfig {
    fn default() -> Self {
        Self {
            step: 0.3,
            floor: 0.1,
            window: 10.0,
            recovery_rate: 0.1,
        }
    }
}

impl HabituationConfig {
    fn validate(&self, owner: &str) -> Result<(), ConfigError> {
        positive(&format!("emotions.{owner}.habituation.step"), self.step)?;
        unit(&format!("emotions.{owner}.habituation.step"), self.step)?;
        if !(self.floor >= 0.0 && self.floor < 1.0) {
            return Err(ConfigError::out_of_range(
                format!("emotions.{owner}.habituation.floor"),
                self.floor,
                0.0,
                1.0,
            ));
        }
        if !self.window.is_finite() || self.window < 0.0 {
            return Err(ConfigError::out_of_range(
                format!("emotions.{owner}.habituation.window"),
                self.window,
                0.0,
                f32::MAX,
            ));
        }
        positive(
            &format!("emotions.{owner}.habituation.recovery_rate"),
            self.recovery_rate,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    pub name: String,
    /// Base intensity of the stimulus (0.0 - 1.0].
    pub intensity: f32,
    /// Emotion kinds this event can provoke, with prior weights.
    pub candidates: Vec<EventCandidate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCandidate {
    pub kind: String,
    pub weight: f32,
}

impl EventConfig {
    fn validate(&self, catalog: &Catalog) -> Result<(), ConfigError> {
        let owner = &self.name;
        positive(&format!("events.{owner}.intensity"), self.intensity)?;
        unit(&format!("events.{owner}.intensity"), self.intensity)?;
        if self.candidates.is_empty() {
            return Err(ConfigError::Inconsistent(format!(
                "event `{owner}` has no candidate emotion kinds"
            )));
        }
        for c in &self.candidates {
            catalog.emotions.resolve("emotions", &c.kind, owner)?;
            positive(&format!("events.{owner}.candidates.{}", c.kind), c.weight)?;
            unit(&format!("events.{owner}.candidates.{}", c.kind), c.weight)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionDynamicsConfig {
    /// Instances below this intensity are retired to history.
    pub removal_threshold: f32,
    pub history_capacity: usize,
    /// How far trait/mood susceptibility can scale an impulse (0.0 - 1.0).
    pub bias_gain: f32,
    /// Weight of mood congruence relative to trait bias.
    pub mood_bias_weight: f32,
    /// Time a kind may stay the strongest emotion before it starts to tire.
    pub fatigue_after: f32,
    /// Extra decay rate applied to a tired dominant emotion.
    pub fatigue_rate: f32,
    /// Sensitivity lost per unit time while tired.
    pub fatigue_habituation: f32,
    /// Kind the agent settles into when nothing is felt strongly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resting_emotion: Option<String>,
    /// Intensity the resting emotion starts at.
    pub resting_level: f32,
    /// Below this, every active emotion counts as quiet.
    pub resting_threshold: f32,
}

impl Default for EmotionDynamicsConfig {
    fn default() -> Self {
        Self {
            removal_threshold: 0.02,
            history_capacity: 32,
            bias_gain: 0.3,
            mood_bias_weight: 0.5,
            fatigue_after: 8.0,
            fatigue_rate: 0.15,
            fatigue_habituation: 0.05,
            resting_emotion: None,
            resting_level: 0.12,
            resting_threshold: 0.18,
        }
    }
}

impl EmotionDynamicsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.removal_threshold > 0.0 && self.removal_threshold < 1.0) {
            return Err(ConfigError::out_of_range(
                "emotion_dynamics.removal_threshold",
                self.removal_threshold,
                0.0,
                1.0,
            ));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::non_positive(
                "emotion_dynamics.history_capacity",
                0.0,
            ));
        }
        unit("emotion_dynamics.bias_gain", self.bias_gain)?;
        if !self.mood_bias_weight.is_finite() || self.mood_bias_weight < 0.0 {
            return Err(ConfigError::out_of_range(
                "emotion_dynamics.mood_bias_weight",
                self.mood_bias_weight,
                0.0,
                f32::MAX,
            ));
        }
        for (field, v) in [
            ("emotion_dynamics.fatigue_after", self.fatigue_after),
            ("emotion_dynamics.fatigue_rate", self.fatigue_rate),
            ("emotion_dynamics.fatigue_habituation", self.fatigue_habituation),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::out_of_range(field, v, 0.0, f32::MAX));
            }
        }
        if !(self.resting_level > self.removal_threshold && self.resting_level <= 1.0) {
            return Err(ConfigError::out_of_range(
                "emotion_dynamics.resting_level",
                self.resting_level,
                self.removal_threshold,
                1.0,
            ));
        }
        unit("emotion_dynamics.resting_threshold", self.resting_threshold)
    }
}

// ============================================================================
// Maturity and randomization
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaturityConfig {
    pub initial_age: f64,
    pub curve: MaturityCurve,
    /// Volatility multiplier approached at full maturity (0.0 - 1.0).
    pub min_scale: f32,
    /// Shape exponent applied to the maturity factor before scaling.
    pub exponent: f32,
}

impl Default for MaturityConfig {
    fn default() -> Self {
        Self {
            initial_age: 0.0,
            curve: MaturityCurve::default(),
            min_scale: 0.3,
            exponent: 1.5,
        }
    }
}

impl MaturityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_age.is_finite() || self.initial_age < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "maturity.initial_age".to_string(),
                value: self.initial_age,
                min: 0.0,
                max: f64::MAX,
            });
        }
        if !(self.min_scale > 0.0 && self.min_scale < 1.0) {
            return Err(ConfigError::out_of_range(
                "maturity.min_scale",
                self.min_scale,
                0.0,
                1.0,
            ));
        }
        positive("maturity.exponent", self.exponent)?;
        match self.curve {
            MaturityCurve::Sigmoid {
                midpoint,
                steepness,
            } => {
                if !midpoint.is_finite() {
                    return Err(ConfigError::OutOfRange {
                        field: "maturity.curve.midpoint".to_string(),
                        value: midpoint,
                        min: f64::MIN,
                        max: f64::MAX,
                    });
                }
                positive_f64("maturity.curve.steepness", steepness)
            }
            MaturityCurve::Exponential { time_constant } => {
                positive_f64("maturity.curve.time_constant", time_constant)
            }
        }
    }
}

/// Shape of the age -> maturity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaturityCurve {
    /// Logistic curve centred on `midpoint`.
    Sigmoid { midpoint: f64, steepness: f64 },
    /// `1 - exp(-age / time_constant)`.
    Exponential { time_constant: f64 },
}

impl Default for MaturityCurve {
    fn default() -> Self {
        MaturityCurve::Sigmoid {
            midpoint: 100.0,
            steepness: 0.08,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomizeConfig {
    pub seed: u64,
    /// Maximum jitter applied to each starting trait and facet value.
    pub spread: f32,
}

impl Default for RandomizeConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            spread: 0.15,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn one() -> f32 {
    1.0
}

fn half() -> f32 {
    0.5
}

fn default_mood_baseline() -> f32 {
    0.1
}

fn unit(field: &str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(field, v, 0.0, 1.0))
    }
}

fn signed(field: &str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && (-1.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(field, v, -1.0, 1.0))
    }
}

fn positive(field: &str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::non_positive(field, v as f64))
    }
}

fn positive_f64(field: &str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::non_positive(field, v))
    }
}

// ============================================================================
// Tests
// ============================================================================
