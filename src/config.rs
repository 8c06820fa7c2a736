//! Physics configuration
//!
//! Tunables for impulse strength, damping and contact tolerances. Missing
//! fields fall back to their defaults when loading from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Physics tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Floor for the impulse exchanged between two actors
    pub min_impact: f32,
    /// Velocity multiplier applied to every actor at the end of a step, in (0, 1)
    pub friction: f32,
    /// How far an actor must reach into a sensor before it triggers
    pub sensor_epsilon: f32,
    /// Gap left between an actor and an obstacle after bouncing off it
    pub clearance: f32,
    /// Collision records preallocated for a single step
    pub event_capacity: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            min_impact: DEFAULT_MIN_IMPACT,
            friction: DEFAULT_FRICTION,
            sensor_epsilon: DEFAULT_SENSOR_EPSILON,
            clearance: DEFAULT_CLEARANCE,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl PhysicsConfig {
    /// Create a config with the given impulse floor and damping, other fields default
    pub fn new(min_impact: f32, friction: f32) -> Self {
        Self {
            min_impact,
            friction,
            ..Self::default()
        }
    }

    /// Check that every field is within its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.friction.is_nan() || self.friction <= 0.0 || self.friction >= 1.0 {
            return Err(ConfigError::invalid(
                "friction",
                format!("{} is not in (0, 1)", self.friction),
            ));
        }
        if self.min_impact.is_nan() || self.min_impact < 0.0 {
            return Err(ConfigError::invalid(
                "min_impact",
                format!("{} must be non-negative", self.min_impact),
            ));
        }
        if self.sensor_epsilon.is_nan() || self.sensor_epsilon < 0.0 {
            return Err(ConfigError::invalid(
                "sensor_epsilon",
                format!("{} must be non-negative", self.sensor_epsilon),
            ));
        }
        if self.clearance.is_nan() || self.clearance < 0.0 {
            return Err(ConfigError::invalid(
                "clearance",
                format!("{} must be non-negative", self.clearance),
            ));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::invalid("event_capacity", "must be at least 1"));
        }
        Ok(())
    }

    /// Parse and validate a config from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded physics config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PhysicsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.event_capacity, 1000);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PhysicsConfig::from_json(r#"{ "friction": 0.5 }"#).unwrap();
        assert_eq!(config.friction, 0.5);
        assert_eq!(config.min_impact, DEFAULT_MIN_IMPACT);
        assert_eq!(config.clearance, DEFAULT_CLEARANCE);
    }

    #[test]
    fn test_json_round_trip() {
        let config = PhysicsConfig::new(3.0, 0.9);
        let json = config.to_json().unwrap();
        assert_eq!(PhysicsConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_friction_out_of_range() {
        for friction in [0.0, 1.0, 1.5, -0.2, f32::NAN] {
            let err = PhysicsConfig::new(7.0, friction).validate().unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { field: "friction", .. }));
        }
    }

    #[test]
    fn test_rejects_negative_tolerances() {
        let config = PhysicsConfig {
            clearance: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "clearance", .. })
        ));

        let config = PhysicsConfig {
            event_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "event_capacity", .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = PhysicsConfig::from_json("{ friction: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PhysicsConfig::load("/nonexistent/physics.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
