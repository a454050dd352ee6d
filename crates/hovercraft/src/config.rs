//! Game configuration
//!
//! Loaded from TOML or RON through the engine's [`Config`] trait; every field
//! may be omitted and falls back to its default.

use hover_engine::config::{Config, ConfigError, PhysicsConfig};
use hover_engine::foundation::math::Vec3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Longest accepted fixed tick (seconds)
pub const MAX_TIMESTEP: f32 = 1.0;

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Physics tuning
    pub physics: PhysicsConfig,

    /// Simulation loop and world setup
    pub simulation: SimulationConfig,
}

/// Simulation loop and world setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed tick length (seconds)
    pub timestep: f32,

    /// Most ticks run for a single frame
    pub max_steps_per_frame: u32,

    /// How long the headless run lasts (seconds)
    pub duration_seconds: f32,

    /// Where the hovercraft starts
    pub spawn_position: Vec3,

    /// Half size of the generated flat terrain
    pub terrain_half_extent: f32,

    /// OBJ file to use as terrain instead of the flat floor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terrain_mesh: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            max_steps_per_frame: 8,
            duration_seconds: 3.0,
            spawn_position: Vec3::new(0.0, 2.0, 0.0),
            terrain_half_extent: 50.0,
            terrain_mesh: None,
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;

        let simulation = &self.simulation;
        if !simulation.timestep.is_finite()
            || simulation.timestep <= 0.0
            || simulation.timestep > MAX_TIMESTEP
        {
            return Err(ConfigError::Invalid {
                field: "simulation.timestep",
                reason: format!(
                    "must be in (0, {}] seconds, got {}",
                    MAX_TIMESTEP, simulation.timestep
                ),
            });
        }
        if simulation.max_steps_per_frame == 0 {
            return Err(ConfigError::Invalid {
                field: "simulation.max_steps_per_frame",
                reason: "must be at least 1".to_string(),
            });
        }
        if !simulation.duration_seconds.is_finite() || simulation.duration_seconds < 0.0 {
            return Err(ConfigError::Invalid {
                field: "simulation.duration_seconds",
                reason: format!("must be a non-negative number, got {}", simulation.duration_seconds),
            });
        }
        if !simulation.spawn_position.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "simulation.spawn_position",
                reason: "must be finite".to_string(),
            });
        }
        if !simulation.terrain_half_extent.is_finite() || simulation.terrain_half_extent <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "simulation.terrain_half_extent",
                reason: format!("must be a positive number, got {}", simulation.terrain_half_extent),
            });
        }
        Ok(())
    }
}
