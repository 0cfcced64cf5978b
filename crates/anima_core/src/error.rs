//! Error types.
//!
//! Two very different failure classes exist:
//! - [`ConfigError`] is fatal and only produced while building an engine.
//! - [`IgnoredSignal`] describes runtime input the engine dropped. It is never
//!   returned from `tick`/`trigger`; it is logged and counted so the engine
//!   keeps advancing.

use thiserror::Error;

/// Construction-time configuration failure. An engine is never built from a
/// configuration that produced one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("expected exactly {expected} {section}, found {found}")]
    WrongCount {
        section: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{section} entry is missing a name")]
    MissingName { section: &'static str },

    #[error("duplicate {section} name `{name}`")]
    DuplicateName { section: &'static str, name: String },

    #[error("`{owner}` references unknown {section} `{name}`")]
    UnknownName {
        section: &'static str,
        name: String,
        owner: String,
    },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: String, value: f64 },

    #[error("invalid trait bounds [{lower}, {upper}]")]
    InvalidBounds { lower: f32, upper: f32 },

    #[error("{0}")]
    Inconsistent(String),
}

impl ConfigError {
    pub(crate) fn out_of_range(field: impl Into<String>, value: f32, min: f32, max: f32) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value: value as f64,
            min: min as f64,
            max: max as f64,
        }
    }

    pub(crate) fn non_positive(field: impl Into<String>, value: f64) -> Self {
        Self::NonPositive {
            field: field.into(),
            value,
        }
    }
}

/// Runtime input that was dropped instead of applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IgnoredSignal {
    #[error("unknown context signal `{0}`")]
    UnknownContextKey(String),

    #[error("unknown event or emotion kind `{0}`")]
    UnknownEvent(String),

    #[error("malformed value {value} for `{key}`")]
    MalformedValue { key: String, value: f32 },

    #[error("invalid time step {0}, treated as zero")]
    InvalidDelta(f64),
}
