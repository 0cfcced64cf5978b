//! Numeric guards shared by the models.

/// Guard against NaN and Infinity in state values.
/// If the value is NaN or Inf, replace with the provided fallback.
#[inline]
pub(crate) fn sanitize_f32(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        tracing::warn!("NaN/Inf detected in state, resetting to fallback {}", fallback);
        fallback
    }
}

/// Bounded nonlinear response: a step toward a bound shrinks in proportion
/// to the room left before it, so values ease into their limits instead of
/// slamming against them. `rise`/`fall` scale the two directions.
#[inline]
pub(crate) fn bounded_step(
    step: f32,
    value: f32,
    lower: f32,
    upper: f32,
    rise: f32,
    fall: f32,
) -> f32 {
    let range = upper - lower;
    if step > 0.0 {
        step * rise * ((upper - value) / range).clamp(0.0, 1.0)
    } else {
        step * fall * ((value - lower) / range).clamp(0.0, 1.0)
    }
}

/// Fraction of a gap closed over `dt` at `rate` per unit time.
#[inline]
pub(crate) fn approach_fraction(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}
