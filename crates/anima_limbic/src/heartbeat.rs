//! Heartbeat configuration for the host adapter
//!
//! The heartbeat determines how often the engine ticks even when nothing
//! happens, and how much engine time each beat represents. The engine never
//! reads a clock: every beat feeds the same logical `dt`.

use anima_core::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the heartbeat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatConfig {
    /// How often to tick the engine (default: 100ms)
    pub interval: Duration,
    /// Engine time fed per beat (default: 0.1, i.e. one unit per second)
    pub dt: f64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            dt: 0.1,
        }
    }
}

impl HeartbeatConfig {
    /// Fast heartbeat for real-time observers (animated faces, NPCs)
    pub fn fast() -> Self {
        Self {
            interval: Duration::from_millis(50),
            dt: 0.05,
        }
    }

    /// Slow heartbeat for resource-constrained environments
    pub fn slow() -> Self {
        Self {
            interval: Duration::from_millis(500),
            dt: 0.5,
        }
    }

    /// Very fast heartbeat with accelerated time, for testing
    pub fn testing() -> Self {
        Self {
            interval: Duration::from_millis(10),
            dt: 1.0,
        }
    }

    /// A zero interval would spin the heartbeat; `dt` must be finite and
    /// non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::NonPositive {
                field: "heartbeat.interval".to_string(),
                value: 0.0,
            });
        }
        if !self.dt.is_finite() || self.dt < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "heartbeat.dt".to_string(),
                value: self.dt,
                min: 0.0,
                max: f64::MAX,
            });
        }
        Ok(())
    }

    /// Engine time units per wall-clock second at this rate.
    pub fn time_scale(&self) -> f64 {
        self.dt / self.interval.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_ordered() {
        assert!(HeartbeatConfig::fast().interval < HeartbeatConfig::default().interval);
        assert!(HeartbeatConfig::slow().interval > HeartbeatConfig::default().interval);
    }

    #[test]
    fn test_validate() {
        for cfg in [
            HeartbeatConfig::default(),
            HeartbeatConfig::fast(),
            HeartbeatConfig::slow(),
            HeartbeatConfig::testing(),
        ] {
            assert!(cfg.validate().is_ok(), "{cfg:?}");
        }
        let zero = HeartbeatConfig {
            interval: Duration::ZERO,
            ..HeartbeatConfig::default()
        };
        assert!(zero.validate().is_err());
        let nan = HeartbeatConfig {
            dt: f64::NAN,
            ..HeartbeatConfig::default()
        };
        assert!(matches!(nan.validate(), Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_presets_run_in_real_time() {
        for cfg in [
            HeartbeatConfig::default(),
            HeartbeatConfig::fast(),
            HeartbeatConfig::slow(),
        ] {
            assert!((cfg.time_scale() - 1.0).abs() < 1e-9, "{cfg:?}");
        }
        assert!(HeartbeatConfig::testing().time_scale() > 1.0);
    }
}
