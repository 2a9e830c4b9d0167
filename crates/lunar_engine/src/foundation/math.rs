//! Math utilities and types
//!
//! Provides fundamental math types for the scene graph and render path.
//!
//! Rotations in this engine are authored as Euler angles in **degrees**
//! (`x` = pitch, `y` = yaw, `z` = roll). The [`Mat4Ext`] helpers post-multiply,
//! so a chain like `m.translated(p).rotated_y_deg(yaw).scaled(s)` reads in the
//! same order the transforms are stacked onto the parent frame.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Position, Euler rotation (degrees) and scale
///
/// The matrix form is `T(position) · Ry(yaw) · Rx(pitch) · Rz(roll) · S(scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in parent space
    pub position: Vec3,

    /// Euler rotation in degrees (x = pitch, y = yaw, z = roll)
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set Euler rotation in degrees
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::identity()
            .translated(&self.position)
            .rotated_yaw_pitch_roll(&self.rotation)
            .scaled(&self.scale)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Distance between two points projected on the XZ plane
    pub fn planar_distance(a: &super::Vec3, b: &super::Vec3) -> f32 {
        let dx = a.x - b.x;
        let dz = a.z - b.z;
        dx.hypot(dz)
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis (radians)
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis (radians)
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis (radians)
    fn rotation_z(angle: f32) -> Mat4;

    /// Right-multiply by a translation
    fn translated(&self, offset: &Vec3) -> Mat4;

    /// Right-multiply by a rotation about X given in degrees
    fn rotated_x_deg(&self, degrees: f32) -> Mat4;

    /// Right-multiply by a rotation about Y given in degrees
    fn rotated_y_deg(&self, degrees: f32) -> Mat4;

    /// Right-multiply by a rotation about Z given in degrees
    fn rotated_z_deg(&self, degrees: f32) -> Mat4;

    /// Right-multiply by yaw → pitch → roll (Y, X, Z) from Euler degrees
    fn rotated_yaw_pitch_roll(&self, rotation: &Vec3) -> Mat4;

    /// Right-multiply by Rz · Ry · Rx from Euler degrees (orbit-plane order)
    fn rotated_zyx(&self, angles: &Vec3) -> Mat4;

    /// Right-multiply by a non-uniform scale
    fn scaled(&self, scale: &Vec3) -> Mat4;

    /// Translation column of an affine matrix
    fn translation_part(&self) -> Vec3;

    /// Copy of the matrix with its translation removed (rotation/scale only)
    fn without_translation(&self) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn translated(&self, offset: &Vec3) -> Mat4 {
        self * Mat4::new_translation(offset)
    }

    fn rotated_x_deg(&self, degrees: f32) -> Mat4 {
        self * Mat4::rotation_x(utils::deg_to_rad(degrees))
    }

    fn rotated_y_deg(&self, degrees: f32) -> Mat4 {
        self * Mat4::rotation_y(utils::deg_to_rad(degrees))
    }

    fn rotated_z_deg(&self, degrees: f32) -> Mat4 {
        self * Mat4::rotation_z(utils::deg_to_rad(degrees))
    }

    fn rotated_yaw_pitch_roll(&self, rotation: &Vec3) -> Mat4 {
        self.rotated_y_deg(rotation.y)
            .rotated_x_deg(rotation.x)
            .rotated_z_deg(rotation.z)
    }

    fn rotated_zyx(&self, angles: &Vec3) -> Mat4 {
        self.rotated_z_deg(angles.z)
            .rotated_y_deg(angles.y)
            .rotated_x_deg(angles.x)
    }

    fn scaled(&self, scale: &Vec3) -> Mat4 {
        self * Mat4::new_nonuniform_scaling(scale)
    }

    fn translation_part(&self) -> Vec3 {
        Vec3::new(self.m14, self.m24, self.m34)
    }

    fn without_translation(&self) -> Mat4 {
        let mut result = *self;
        result.m14 = 0.0;
        result.m24 = 0.0;
        result.m34 = 0.0;
        result
    }
}

/// OpenGL-style perspective projection from a vertical field of view in degrees
pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::new_perspective(aspect, utils::deg_to_rad(fov_y_degrees), near, far)
}

/// Transform a point by an affine matrix
pub fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
    matrix.transform_point(&Point3::from(*point)).coords
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_transform_identity_matrix() {
        assert_relative_eq!(Transform::identity().to_matrix(), Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_translation_is_outermost() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Vec3::new(10.0, 45.0, 20.0))
            .with_uniform_scale(3.0);

        let origin = transform_point(&transform.to_matrix(), &Vec3::zeros());
        assert_relative_eq!(origin, Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_yaw_rotates_x_toward_negative_z() {
        // Right-handed Y-up: +90 degrees of yaw sends +X to -Z
        let m = Mat4::identity().rotated_y_deg(90.0);
        let rotated = m.transform_vector(&Vec3::x());
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_zyx_order_matches_explicit_product() {
        let angles = Vec3::new(30.0, 60.0, 90.0);
        let expected = Mat4::rotation_z(utils::deg_to_rad(90.0))
            * Mat4::rotation_y(utils::deg_to_rad(60.0))
            * Mat4::rotation_x(utils::deg_to_rad(30.0));
        assert_relative_eq!(Mat4::identity().rotated_zyx(&angles), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_without_translation_keeps_rotation() {
        let m = Mat4::new_translation(&Vec3::new(5.0, 6.0, 7.0)) * Mat4::rotation_y(0.5);
        let stripped = m.without_translation();
        assert_relative_eq!(stripped.translation_part(), Vec3::zeros(), epsilon = EPSILON);
        assert_relative_eq!(stripped, Mat4::rotation_y(0.5), epsilon = EPSILON);
    }

    #[test]
    fn test_planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 100.0, 0.0);
        let b = Vec3::new(3.0, -50.0, 4.0);
        assert_relative_eq!(utils::planar_distance(&a, &b), 5.0, epsilon = EPSILON);
    }
}
