//! Per-session render and input settings
//!
//! Viewport, clip planes, which camera is live and the debug toggles the
//! input controller flips. Passed by reference to whoever needs it.

use super::camera::ActiveCamera;
use crate::core::config::{DisplayConfig, InputConfig, LightingConfig};

/// Lower bound of the movement speed factor
pub const MIN_SPEED_FACTOR: f32 = 0.1;
/// Upper bound of the movement speed factor
pub const MAX_SPEED_FACTOR: f32 = 5.0;

/// Mutable view and debug state shared by input and rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Near clip plane
    pub near_plane: f32,
    /// Far clip plane
    pub far_plane: f32,
    /// Camera driving the frame
    pub active_camera: ActiveCamera,
    /// Whether light markers are drawn
    pub show_light_indicators: bool,
    /// Multiplier on walking speed, kept in [`MIN_SPEED_FACTOR`, `MAX_SPEED_FACTOR`]
    pub movement_speed_factor: f32,
    /// Multiplier on mouse look speed
    pub mouse_sensitivity_factor: f32,
    /// Set when the user asked to quit
    pub exit_requested: bool,
}

impl RenderContext {
    /// Build a context from configuration
    pub fn from_config(display: &DisplayConfig, input: &InputConfig, lighting: &LightingConfig) -> Self {
        Self {
            width: display.width,
            height: display.height,
            near_plane: display.near_plane,
            far_plane: display.far_plane,
            active_camera: ActiveCamera::FirstPerson,
            show_light_indicators: lighting.show_light_indicators,
            movement_speed_factor: input
                .movement_speed_factor
                .clamp(MIN_SPEED_FACTOR, MAX_SPEED_FACTOR),
            mouse_sensitivity_factor: input.mouse_sensitivity_factor,
            exit_requested: false,
        }
    }

    /// Width over height; a zero-sized viewport yields 1
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::from_config(
            &DisplayConfig::default(),
            &InputConfig::default(),
            &LightingConfig::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_context() {
        let context = RenderContext::default();
        assert_eq!(context.active_camera, ActiveCamera::FirstPerson);
        assert!(!context.show_light_indicators);
        assert_relative_eq!(context.aspect_ratio(), 1024.0 / 768.0);
        assert_relative_eq!(context.far_plane, 10000.0);
    }

    #[test]
    fn test_zero_sized_viewport_has_unit_aspect() {
        let mut context = RenderContext::default();
        context.width = 0;
        assert_relative_eq!(context.aspect_ratio(), 1.0);
        context.width = 800;
        context.height = 0;
        assert_relative_eq!(context.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_speed_factor_clamped_from_config() {
        let input = InputConfig {
            movement_speed_factor: 12.0,
            ..InputConfig::default()
        };
        let context = RenderContext::from_config(&DisplayConfig::default(), &input, &LightingConfig::default());
        assert_relative_eq!(context.movement_speed_factor, MAX_SPEED_FACTOR);
    }
}
