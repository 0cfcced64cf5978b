//! Age and maturity.
//!
//! Age only ever grows. The maturity factor derived from it is a saturating
//! curve in [0, 1), and the volatility scale derived from maturity is the
//! multiplier every other model applies to its per-tick change.

use crate::config::{MaturityConfig, MaturityCurve};

/// Keeps the factor strictly below 1 once f32 rounding would saturate it.
const MATURITY_CEILING: f32 = 1.0 - f32::EPSILON;

#[derive(Debug, Clone)]
pub(crate) struct MaturityController {
    age: f64,
    curve: MaturityCurve,
    min_scale: f32,
    exponent: f32,
}

impl MaturityController {
    pub(crate) fn new(config: &MaturityConfig) -> Self {
        Self {
            age: config.initial_age.max(0.0),
            curve: config.curve,
            min_scale: config.min_scale,
            exponent: config.exponent,
        }
    }

    /// Grow older by `dt`. Negative and non-finite steps are ignored.
    pub(crate) fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.age += dt;
        }
    }

    pub(crate) fn age(&self) -> f64 {
        self.age
    }

    pub(crate) fn maturity_factor(&self) -> f32 {
        let raw = match self.curve {
            MaturityCurve::Sigmoid {
                midpoint,
                steepness,
            } => 1.0 / (1.0 + (-steepness * (self.age - midpoint)).exp()),
            MaturityCurve::Exponential { time_constant } => {
                1.0 - (-self.age / time_constant).exp()
            }
        };
        (raw as f32).clamp(0.0, MATURITY_CEILING)
    }

    /// Multiplier in (min_scale, 1]: 1 for a newborn, approaching
    /// `min_scale` at full maturity.
    pub(crate) fn volatility_scale(&self) -> f32 {
        let shaped = self.maturity_factor().powf(self.exponent);
        (1.0 - (1.0 - self.min_scale) * shaped).clamp(self.min_scale, 1.0)
    }
}
