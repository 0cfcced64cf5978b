//! Fuzzy blending of partial, uncertain influences.
//!
//! Every model in the engine turns a handful of signals (trait levels, active
//! emotions, context strengths) into one number. They all go through
//! [`combine`] so the weighting rules live in exactly one place:
//!
//! - an influence takes part only if its value is finite and its weight and
//!   confidence are both positive
//! - confidence scales the weight, then the effective weights are
//!   renormalized to sum to 1 over the participating influences
//! - the result is the weighted mean of the values, optionally clamped to a
//!   maximum magnitude

use serde::{Deserialize, Serialize};

/// One partial opinion about where a quantity should go.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Influence {
    pub value: f32,
    pub weight: f32,
    /// How sure the source is (0.0 - 1.0).
    pub confidence: f32,
}

impl Influence {
    pub fn new(value: f32, weight: f32, confidence: f32) -> Self {
        Self {
            value,
            weight,
            confidence,
        }
    }

    /// A fully confident influence.
    pub fn certain(value: f32, weight: f32) -> Self {
        Self::new(value, weight, 1.0)
    }

    fn effective_weight(&self) -> Option<f32> {
        if !self.value.is_finite() || !self.weight.is_finite() || !self.confidence.is_finite() {
            return None;
        }
        let w = self.weight * self.confidence.clamp(0.0, 1.0);
        (w > 0.0).then_some(w)
    }
}

/// Blend influences into a single value. Returns `None` when nothing takes part.
pub fn blend<I>(influences: I) -> Option<f32>
where
    I: IntoIterator<Item = Influence>,
{
    let mut total_weight = 0.0f32;
    let mut weighted_sum = 0.0f32;

    for influence in influences {
        if let Some(w) = influence.effective_weight() {
            total_weight += w;
            weighted_sum += w * influence.value;
        }
    }

    if total_weight > 0.0 {
        Some(weighted_sum / total_weight)
    } else {
        None
    }
}

/// Blend influences into a delta, `0.0` when nothing takes part.
///
/// With `max_magnitude` set the result is clamped to `[-max, max]`.
pub fn combine<I>(influences: I, max_magnitude: Option<f32>) -> f32
where
    I: IntoIterator<Item = Influence>,
{
    let delta = blend(influences).unwrap_or(0.0);
    match max_magnitude {
        Some(max) if max.is_finite() && max >= 0.0 => delta.clamp(-max, max),
        _ => delta,
    }
}
