//! Elliptical orbit kinematics
//!
//! An orbiting body only stores its elapsed time; every position is derived
//! from time and parameters when asked for. The ellipse lies in the local XZ
//! plane with semi-axes `radius` (X) and `radius · ellipse_ratio` (Z), lifted by
//! `height`, then tilted by the orbit-plane angles applied as `Rz · Ry · Rx`.

use crate::foundation::math::{constants, transform_point, utils, Mat4, Mat4Ext, Vec3};
use crate::render::backend::{uniforms, GraphicsBackend};

/// Self-rotation angle in radians after `seconds` at `rpm` revolutions per minute
///
/// Only the fractional part of the elapsed turns is kept before adding the
/// phase, so the result stays precise for long running times. Always in
/// `[0, 2π)`.
pub fn rotation_angle_rad(seconds: f32, rpm: f32, phase: f32) -> f32 {
    let turns = rpm * (seconds / 60.0);
    let fraction = turns - turns.floor();
    (fraction * constants::TAU + phase).rem_euclid(constants::TAU)
}

/// Orbit parameters and clock of an orbiting render object
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitMotion {
    time: f32,
    /// Angular speed in radians per second
    pub speed: f32,
    /// Semi-axis along local X
    pub radius: f32,
    /// Ratio of the Z semi-axis to the X semi-axis
    pub ellipse_ratio: f32,
    /// Offset along local Y before tilting
    pub height: f32,
    /// Centre the ellipse is placed around
    pub center: Vec3,
    /// Orbit-plane tilt in degrees, applied as Rz · Ry · Rx
    pub angles: Vec3,
    /// Spin of the body around its own Y axis
    pub self_rotation_rpm: f32,
}

impl Default for OrbitMotion {
    fn default() -> Self {
        Self {
            time: 0.0,
            speed: 0.2,
            radius: 30.0,
            ellipse_ratio: 0.6,
            height: 0.0,
            center: Vec3::zeros(),
            angles: Vec3::new(90.0, 60.0, 0.0),
            self_rotation_rpm: 10.0,
        }
    }
}

impl OrbitMotion {
    /// Create an orbit with the default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set speed, radius and ellipse ratio
    pub fn with_parameters(mut self, speed: f32, radius: f32, ellipse_ratio: f32) -> Self {
        self.speed = speed;
        self.radius = radius;
        self.ellipse_ratio = ellipse_ratio;
        self
    }

    /// Builder pattern: Set the orbit-plane angles in degrees
    pub fn with_angles(mut self, angles: Vec3) -> Self {
        self.angles = angles;
        self
    }

    /// Builder pattern: Set the orbit centre
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Builder pattern: Set the height offset
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Builder pattern: Set the self-rotation rate
    pub fn with_self_rotation_rpm(mut self, rpm: f32) -> Self {
        self.self_rotation_rpm = rpm;
        self
    }

    /// Advance the orbit clock
    pub fn advance(&mut self, delta_time: f32) {
        self.time += delta_time;
    }

    /// Seconds elapsed since creation
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Current orbit phase in radians
    pub fn phase(&self) -> f32 {
        self.time * self.speed
    }

    /// Point on the untilted ellipse at phase `t`
    fn ellipse_point(&self, t: f32) -> Vec3 {
        Vec3::new(
            self.radius * t.cos(),
            self.height,
            self.radius * self.ellipse_ratio * t.sin(),
        )
    }

    /// World position of a body whose base position is `base`
    pub fn current_position(&self, base: &Vec3) -> Vec3 {
        let tilt = Mat4::identity().rotated_zyx(&self.angles);
        transform_point(&tilt, &self.ellipse_point(self.phase())) + self.center + base
    }

    /// Point running `lead_angle` radians ahead of the body, used to place lights
    ///
    /// The ellipse is sampled at the negated phase and additionally rotated by
    /// the body's initial rotation before the orbit tilt. This is not the same
    /// curve as [`OrbitMotion::current_position`]; lights placed with it ride
    /// the orbit as the shaders animate it.
    pub fn leading_position(&self, base: &Vec3, initial_rotation: &Vec3, lead_angle: f32) -> Vec3 {
        let t = self.phase() + lead_angle;
        let rotation = Mat4::identity()
            .rotated_zyx(initial_rotation)
            .rotated_zyx(&self.angles);
        transform_point(&rotation, &self.ellipse_point(-t)) + self.center + base
    }

    /// Current spin about the body's Y axis in radians
    pub fn spin_angle(&self) -> f32 {
        rotation_angle_rad(self.time, self.self_rotation_rpm, 0.0)
    }

    /// Model matrix of the body, composed under `parent`
    ///
    /// `parent · T(position) · S(scale) · Ry(spin) · Ry·Rx·Rz(initial rotation)`
    pub fn model_matrix(&self, parent: &Mat4, position: &Vec3, scale: &Vec3, initial_rotation: &Vec3) -> Mat4 {
        parent
            .translated(position)
            .scaled(scale)
            * Mat4::rotation_y(self.spin_angle())
            * Mat4::identity().rotated_yaw_pitch_roll(initial_rotation)
    }

    /// Write the orbit uniforms consumed by the orbit shader
    pub fn upload(&self, backend: &mut dyn GraphicsBackend) {
        backend.set_float(uniforms::TIME, self.phase());
        backend.set_float(uniforms::RADIUS, self.radius);
        backend.set_float(uniforms::ELLIPSE_RATIO, self.ellipse_ratio);
        backend.set_float(uniforms::HEIGHT, self.height);
        backend.set_vec3(uniforms::ORBIT_CENTER, &self.center);
        backend.set_float(uniforms::ORBIT_ANGLE_X, utils::deg_to_rad(self.angles.x));
        backend.set_float(uniforms::ORBIT_ANGLE_Y, utils::deg_to_rad(self.angles.y));
        backend.set_float(uniforms::ORBIT_ANGLE_Z, utils::deg_to_rad(self.angles.z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_rotation_angle_wraps() {
        // 10 rpm: one full turn every 6 seconds
        assert_relative_eq!(rotation_angle_rad(0.0, 10.0, 0.0), 0.0);
        assert_relative_eq!(rotation_angle_rad(1.5, 10.0, 0.0), constants::PI / 2.0, epsilon = EPSILON);
        assert_relative_eq!(rotation_angle_rad(7.5, 10.0, 0.0), constants::PI / 2.0, epsilon = EPSILON);

        let with_phase = rotation_angle_rad(4.5, 10.0, constants::PI);
        assert_relative_eq!(with_phase, constants::PI / 2.0, epsilon = EPSILON);
        assert!(rotation_angle_rad(1000.0, 37.0, -1.0) < constants::TAU);
        assert!(rotation_angle_rad(1000.0, 37.0, -1.0) >= 0.0);
    }

    #[test]
    fn test_position_at_time_zero() {
        let orbit = OrbitMotion::new()
            .with_parameters(0.5, 10.0, 0.5)
            .with_angles(Vec3::new(0.0, 90.0, 0.0))
            .with_center(Vec3::new(1.0, 2.0, 3.0))
            .with_height(4.0);
        let base = Vec3::new(0.0, 0.0, 100.0);

        // (radius, height, 0) yawed +90° becomes (0, height, -radius)
        let expected = Vec3::new(0.0, 4.0, -10.0) + orbit.center + base;
        assert_relative_eq!(orbit.current_position(&base), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_position_follows_ellipse() {
        let mut orbit = OrbitMotion::new()
            .with_parameters(1.0, 10.0, 0.5)
            .with_angles(Vec3::zeros());
        orbit.advance(constants::PI / 2.0);

        assert_relative_eq!(orbit.phase(), constants::PI / 2.0, epsilon = EPSILON);
        assert_relative_eq!(orbit.current_position(&Vec3::zeros()), Vec3::new(0.0, 0.0, 5.0), epsilon = EPSILON);
    }

    #[test]
    fn test_leading_position_samples_negated_phase() {
        let orbit = OrbitMotion::new()
            .with_parameters(1.0, 10.0, 1.0)
            .with_angles(Vec3::zeros());

        let lead = constants::PI / 2.0;
        let leading = orbit.leading_position(&Vec3::zeros(), &Vec3::zeros(), lead);
        assert_relative_eq!(leading, Vec3::new(0.0, 0.0, -10.0), epsilon = EPSILON);

        // Initial rotation is applied before the tilt
        let rotated = orbit.leading_position(&Vec3::zeros(), &Vec3::new(0.0, 90.0, 0.0), 0.0);
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -10.0), epsilon = EPSILON);
    }

    #[test]
    fn test_model_matrix_places_body_at_position() {
        let orbit = OrbitMotion::new();
        let matrix = orbit.model_matrix(
            &Mat4::identity(),
            &Vec3::new(5.0, 0.0, 0.0),
            &Vec3::new(2.0, 2.0, 2.0),
            &Vec3::new(-90.0, 0.0, 0.0),
        );
        assert_relative_eq!(matrix.translation_part(), Vec3::new(5.0, 0.0, 0.0), epsilon = EPSILON);

        let parent = Mat4::new_translation(&Vec3::new(0.0, 10.0, 0.0));
        let nested = orbit.model_matrix(&parent, &Vec3::new(5.0, 0.0, 0.0), &Vec3::repeat(1.0), &Vec3::zeros());
        assert_relative_eq!(nested.translation_part(), Vec3::new(5.0, 10.0, 0.0), epsilon = EPSILON);
    }
}
