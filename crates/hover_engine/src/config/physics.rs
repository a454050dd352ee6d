//! Physics tuning parameters.

use super::{Config, ConfigError};
use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// How a collider's transform maps its mesh into world space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColliderSpace {
    /// Translation only; rotation and scale of the collider are ignored
    #[default]
    TranslationOnly,
    /// Full translate-rotate-scale model matrix
    Full,
}

/// Configuration for the substep integrator and the floor resolver.
///
/// Defaults reproduce the shipped gameplay feel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration (units/second²)
    pub gravity: Vec3,

    /// Linear drag rate; velocity decays towards zero at this rate per second
    pub linear_drag: f32,

    /// Number of integration substeps per tick
    pub substeps: u32,

    /// Faces whose normal Y is at or below this value are never floors
    pub walkable_min_normal_y: f32,

    /// Height above a face's first vertex where its snap band starts
    pub band_top: f32,

    /// Depth of the snap band below `band_top`
    pub band_depth: f32,

    /// Collider model matrix mode
    pub collider_space: ColliderSpace,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.8, 0.0),
            linear_drag: 0.4,
            substeps: 4,
            walkable_min_normal_y: 0.1,
            band_top: 0.0,
            band_depth: 1.0,
            collider_space: ColliderSpace::TranslationOnly,
        }
    }
}

impl Config for PhysicsConfig {}

impl PhysicsConfig {
    /// Builder pattern: Set substep count
    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps;
        self
    }

    /// Builder pattern: Set collider space
    pub fn with_collider_space(mut self, space: ColliderSpace) -> Self {
        self.collider_space = space;
        self
    }

    /// Fraction of a tick covered by one substep
    #[allow(clippy::cast_precision_loss)]
    pub fn substep_fraction(&self) -> f32 {
        1.0 / self.substeps.max(1) as f32
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.substeps == 0 {
            return Err(ConfigError::Invalid {
                field: "substeps",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.gravity.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "gravity",
                reason: format!("must be finite, got {:?}", self.gravity),
            });
        }
        if !self.linear_drag.is_finite() || self.linear_drag < 0.0 {
            return Err(ConfigError::Invalid {
                field: "linear_drag",
                reason: format!("must be a non-negative number, got {}", self.linear_drag),
            });
        }
        if !self.walkable_min_normal_y.is_finite() {
            return Err(ConfigError::Invalid {
                field: "walkable_min_normal_y",
                reason: "must be finite".to_string(),
            });
        }
        if !self.band_top.is_finite() {
            return Err(ConfigError::Invalid {
                field: "band_top",
                reason: "must be finite".to_string(),
            });
        }
        if !self.band_depth.is_finite() || self.band_depth < 0.0 {
            return Err(ConfigError::Invalid {
                field: "band_depth",
                reason: format!("must be a non-negative number, got {}", self.band_depth),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = PhysicsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.substeps, 4);
        assert_eq!(config.collider_space, ColliderSpace::TranslationOnly);
    }

    #[test]
    fn test_zero_substeps_rejected() {
        let config = PhysicsConfig::default().with_substeps(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "substeps", .. })
        ));
    }

    #[test]
    fn test_negative_drag_rejected() {
        let config = PhysicsConfig {
            linear_drag: -0.1,
            ..PhysicsConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "linear_drag", .. })
        ));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PhysicsConfig::from_toml_str("substeps = 2\nband_depth = 0.5\n").unwrap();
        assert_eq!(config.substeps, 2);
        assert_eq!(config.band_depth, 0.5);
        assert_eq!(config.gravity, Vec3::new(0.0, -9.8, 0.0));
        assert_eq!(config.linear_drag, 0.4);
    }

    #[test]
    fn test_space_from_ron() {
        let config = PhysicsConfig::from_ron_str("(substeps: 6, collider_space: Full)").unwrap();
        assert_eq!(config.substeps, 6);
        assert_eq!(config.collider_space, ColliderSpace::Full);
        assert_eq!(config.gravity, Vec3::new(0.0, -9.8, 0.0));
    }
}
