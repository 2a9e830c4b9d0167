//! Core engine settings
//!
//! Home of the unified configuration structures shared by every subsystem.

pub mod config;

pub use config::{
    DisplayConfig, EngineConfig, GeneratorConfig, InputConfig, JumpParams, LightingConfig,
    SceneConfig,
};
