use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: &'static str },
}

/// World-wide tuning constants for the per-tick integration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsConfig {
    /// Velocity lost per tick while airborne, scaled by body mass
    pub gravity: f32,
    pub ground_friction: f32,
    /// Grounded bodies slower than this vertically are snapped to rest
    pub ground_snap_speed: f32,
    pub min_horizontal_speed: f32,
    pub fall_damage_factor: f32,
    pub explosion_damage_factor: f32,
    pub time_scale: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            ground_friction: 0.95,
            ground_snap_speed: 40.0,
            min_horizontal_speed: 4.0,
            fall_damage_factor: 250.0,
            explosion_damage_factor: 4.0,
            time_scale: 1.0,
        }
    }
}

impl PhysicsConfig {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PhysicsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn finite_non_negative(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::InvalidValue { field, reason: "must be finite and >= 0" });
            }
            Ok(())
        }
        fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if !v.is_finite() || v <= 0.0 {
                return Err(ConfigError::InvalidValue { field, reason: "must be finite and > 0" });
            }
            Ok(())
        }

        finite_non_negative("gravity", self.gravity)?;
        if !(0.0..=1.0).contains(&self.ground_friction) {
            return Err(ConfigError::InvalidValue {
                field: "groundFriction",
                reason: "must be within [0, 1]",
            });
        }
        finite_non_negative("groundSnapSpeed", self.ground_snap_speed)?;
        finite_non_negative("minHorizontalSpeed", self.min_horizontal_speed)?;
        positive("fallDamageFactor", self.fall_damage_factor)?;
        positive("explosionDamageFactor", self.explosion_damage_factor)?;
        positive("timeScale", self.time_scale)?;
        Ok(())
    }
}
