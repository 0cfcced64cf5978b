//! # Anima Core
//!
//! An affective-state engine. One [`Engine`] holds an agent's personality,
//! moods and emotions as numeric state that drifts, settles and feeds back on
//! itself over discrete ticks:
//!
//! - **Traits**: eight values, each a slow core, a responsive plastic layer
//!   and weighted facets
//! - **Moods**: twelve intensities chasing a fuzzy target with per-mood inertia
//! - **Emotions**: short-lived instances that decay, saturate and habituate
//! - **Maturity**: age-driven volatility scale applied to all of the above
//!
//! Observers read [`AgentSnapshot`]s and never touch engine state.

mod catalog;
pub mod config;
pub mod context;
mod defaults;
mod emotion;
mod engine;
pub mod error;
pub mod fuzzy;
mod maturity;
mod mood;
mod personality;
mod snapshot;
mod state;

pub use config::{
    EmotionDynamicsConfig, EmotionKindConfig, EngineConfig, EventCandidate, EventConfig,
    FacetConfig, HabituationConfig, MaturityConfig, MaturityCurve, MoodConfig,
    MoodDynamicsConfig, RandomizeConfig, TraitConfig, TraitDynamicsConfig, MOOD_COUNT,
    TRAIT_COUNT,
};
pub use context::{Context, Stimulus};
pub use engine::Engine;
pub use error::{ConfigError, IgnoredSignal};
pub use fuzzy::Influence;
pub use snapshot::{
    ActiveEmotion, AgentSnapshot, EmotionRecord, FacetReading, MoodReading, Reaction,
    TraitReading,
};
