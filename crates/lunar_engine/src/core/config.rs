//! # Scene Configuration
//!
//! All tunable settings for a scene, grouped per subsystem and aggregated in
//! [`SceneConfig`]. Every struct has working defaults so a config file only
//! needs to list the values it overrides.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging
//! - **Display Config**: viewport size and clip planes
//! - **Input Config**: movement speeds and sensitivity factors
//! - **Generator Config**: procedural scatter settings
//! - **Lighting Config**: satellite light lead angle
//! - **Jump Params**: lunar jump constants

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Core engine behavior: logging and debug switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level filter passed to `env_logger` when `RUST_LOG` is unset
    pub log_level: String,
    /// Whether to enable debug features
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Viewport size and projection clip planes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Near clip plane
    pub near_plane: f32,
    /// Far clip plane
    pub far_plane: f32,
}

impl DisplayConfig {
    /// Builder pattern: Set viewport size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                field: "display.width/height",
                reason: format!("viewport must be non-empty, got {}x{}", self.width, self.height),
            });
        }
        if !(self.near_plane > 0.0 && self.far_plane > self.near_plane) {
            return Err(ConfigError::Invalid {
                field: "display.near_plane/far_plane",
                reason: format!("need 0 < near < far, got {} / {}", self.near_plane, self.far_plane),
            });
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            near_plane: 0.1,
            far_plane: 10000.0,
        }
    }
}

/// Player movement and look settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Distance moved per frame while a movement key is held
    pub base_speed: f32,
    /// Multiplier applied while Shift is held
    pub run_multiplier: f32,
    /// Initial movement speed factor
    pub movement_speed_factor: f32,
    /// Initial mouse sensitivity factor
    pub mouse_sensitivity_factor: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.01,
            run_multiplier: 2.5,
            movement_speed_factor: 1.0,
            mouse_sensitivity_factor: 1.0,
        }
    }
}

/// Procedural scatter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for the placement generator
    pub seed: u64,
    /// Attempts per object before it is skipped
    pub max_attempts: u32,
    /// Minimum planar distance between two placed objects
    pub min_spacing: f32,
    /// Yaw options in degrees
    pub rotations: Vec<f32>,
    /// Uniform scale options
    pub scales: Vec<f32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_attempts: 10,
            min_spacing: 2.0,
            rotations: vec![0.0, 90.0, 180.0, 270.0],
            scales: vec![0.8, 0.9, 1.0, 1.1, 1.2],
        }
    }
}

/// Lighting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Angle in radians a satellite light runs ahead of its body
    pub satellite_lead_angle: f32,
    /// Whether light indicators are shown at startup
    pub show_light_indicators: bool,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            satellite_lead_angle: 0.5,
            show_light_indicators: false,
        }
    }
}

/// Constants of the closed-form jump model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpParams {
    /// Downward acceleration (m/s²)
    pub gravity: f32,
    /// Take-off speed (m/s)
    pub initial_velocity: f32,
    /// Jumper mass (kg); informational, forwarded to shaders
    pub mass: f32,
}

impl JumpParams {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "jump.gravity",
                reason: format!("must be positive, got {}", self.gravity),
            });
        }
        if self.initial_velocity < 0.0 {
            return Err(ConfigError::Invalid {
                field: "jump.initial_velocity",
                reason: format!("must not be negative, got {}", self.initial_velocity),
            });
        }
        Ok(())
    }
}

impl Default for JumpParams {
    fn default() -> Self {
        Self {
            gravity: 1.62,
            initial_velocity: 3.0,
            mass: 100.0,
        }
    }
}

/// # Complete Scene Configuration
///
/// Top-level configuration that encompasses all subsystems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Viewport configuration
    pub display: DisplayConfig,
    /// Input configuration
    pub input: InputConfig,
    /// Generator configuration
    pub generator: GeneratorConfig,
    /// Lighting configuration
    pub lighting: LightingConfig,
    /// Jump constants
    pub jump: JumpParams,
}

impl Config for SceneConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.display.validate()?;
        self.jump.validate()?;
        if self.generator.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "generator.max_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.input.run_multiplier < 1.0 {
            return Err(ConfigError::Invalid {
                field: "input.run_multiplier",
                reason: format!("must be >= 1, got {}", self.input.run_multiplier),
            });
        }
        Ok(())
    }
}
