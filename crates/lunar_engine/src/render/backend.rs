//! Graphics backend abstraction
//!
//! The scene code never talks to a graphics API directly. Everything it needs
//! (program binding, blend state, uniforms and draws) goes through
//! [`GraphicsBackend`], addressed by the uniform names in [`uniforms`].
//! Uniform setters apply to the currently bound program. Backends with a
//! uniform-buffer binding can take the lights as one [`LightBlock`].

use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::render::lighting::LightBlock;

/// Opaque handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Opaque handle to uploaded mesh data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Low-level operations the render path issues each frame
pub trait GraphicsBackend {
    /// Make `shader` the current program
    fn use_program(&mut self, shader: ShaderHandle);

    /// Unbind the current program
    fn unbind_program(&mut self);

    /// Enable standard `src_alpha / one_minus_src_alpha` blending
    fn enable_alpha_blending(&mut self);

    /// Unbind any texture from the given unit
    fn clear_texture_unit(&mut self, unit: u32);

    /// Set an integer uniform
    fn set_int(&mut self, name: &str, value: i32);

    /// Set a boolean uniform
    fn set_bool(&mut self, name: &str, value: bool);

    /// Set a float uniform
    fn set_float(&mut self, name: &str, value: f32);

    /// Set a vec3 uniform
    fn set_vec3(&mut self, name: &str, value: &Vec3);

    /// Set a vec4 uniform
    fn set_vec4(&mut self, name: &str, value: &Vec4);

    /// Set a mat4 uniform
    fn set_mat4(&mut self, name: &str, value: &Mat4);

    /// Set a mat4 array uniform starting at element 0
    fn set_mat4_array(&mut self, name: &str, values: &[Mat4]);

    /// Issue the draw call for a mesh with the bound program
    fn draw_mesh(&mut self, mesh: MeshHandle);

    /// Bind all lights for one draw as a single uniform block
    ///
    /// Returns `false` when the backend has no block binding; the lights are
    /// then written as individual `allLights[i]` uniforms instead.
    fn set_light_block(&mut self, _block: &LightBlock) -> bool {
        false
    }
}

/// Uniform names shared with the shaders
pub mod uniforms {
    /// Projection matrix
    pub const PROJECTION: &str = "projection";
    /// View matrix
    pub const VIEW: &str = "view";
    /// Model matrix
    pub const MODEL: &str = "model";
    /// Eye position in world space
    pub const EYE: &str = "eye";

    /// Number of lights uploaded for this draw
    pub const NUM_LIGHTS: &str = "numLights";
    /// Prefix of the light array
    pub const LIGHT_ARRAY: &str = "allLights";

    /// Material ambient colour
    pub const MATERIAL_AMBIENT: &str = "MaterialAmbientColor";
    /// Material diffuse colour
    pub const MATERIAL_DIFFUSE: &str = "MaterialDiffuseColor";
    /// Material specular colour
    pub const MATERIAL_SPECULAR: &str = "MaterialSpecularColor";
    /// Material opacity
    pub const TRANSPARENCY: &str = "transparency";

    /// Skinning matrices
    pub const BONES: &str = "gBones";
    /// Seconds since the current jump started
    pub const PHYSICS_TIME: &str = "physicsTime";
    /// Whether a jump is in flight
    pub const IS_JUMPING: &str = "isJumping";
    /// Take-off speed
    pub const INITIAL_VELOCITY: &str = "initialVelocity";
    /// Gravity
    pub const LUNAR_GRAVITY: &str = "lunarGravity";
    /// Jumper mass
    pub const ASTRONAUT_MASS: &str = "astronautMass";
    /// Ground height
    pub const GROUND_LEVEL: &str = "groundLevel";

    /// Orbit phase (angular speed × elapsed time)
    pub const TIME: &str = "time";
    /// Orbit radius
    pub const RADIUS: &str = "radius";
    /// Minor/major axis ratio
    pub const ELLIPSE_RATIO: &str = "ellipseRatio";
    /// Orbit height offset
    pub const HEIGHT: &str = "height";
    /// Orbit centre
    pub const ORBIT_CENTER: &str = "orbitCenter";
    /// Orbit plane angle about X (radians)
    pub const ORBIT_ANGLE_X: &str = "orbitAngleX";
    /// Orbit plane angle about Y (radians)
    pub const ORBIT_ANGLE_Y: &str = "orbitAngleY";
    /// Orbit plane angle about Z (radians)
    pub const ORBIT_ANGLE_Z: &str = "orbitAngleZ";

    /// Indicator colour
    pub const LIGHT_COLOR: &str = "lightColor";

    /// Name of one field of one element of the light array, e.g. `allLights[2].Color`
    pub fn light_field(index: usize, field: &str) -> String {
        format!("{LIGHT_ARRAY}[{index}].{field}")
    }
}

#[cfg(test)]
pub(crate) mod recording {
    //! Backend double that records every call for assertions

    use super::{GraphicsBackend, MeshHandle, ShaderHandle};
    use crate::foundation::math::{Mat4, Vec3, Vec4};
    use crate::render::lighting::LightBlock;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        UseProgram(ShaderHandle),
        UnbindProgram,
        EnableBlending,
        ClearTextureUnit(u32),
        Int(String, i32),
        Bool(String, bool),
        Float(String, f32),
        Vec3(String, Vec3),
        Vec4(String, Vec4),
        Mat4(String, Mat4),
        Mat4Array(String, usize),
        LightBlock(LightBlock),
        Draw(MeshHandle),
    }

    #[derive(Debug, Default)]
    pub struct RecordingBackend {
        pub calls: Vec<Call>,
        accepts_light_blocks: bool,
    }

    impl RecordingBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Recorder that binds lights as a uniform block
        pub fn with_light_blocks() -> Self {
            Self {
                accepts_light_blocks: true,
                ..Self::default()
            }
        }

        pub fn draws(&self) -> Vec<MeshHandle> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Call::Draw(mesh) => Some(*mesh),
                    _ => None,
                })
                .collect()
        }

        /// Last value written to a mat4 uniform
        pub fn last_mat4(&self, name: &str) -> Option<Mat4> {
            self.calls.iter().rev().find_map(|call| match call {
                Call::Mat4(n, m) if n == name => Some(*m),
                _ => None,
            })
        }

        pub fn last_int(&self, name: &str) -> Option<i32> {
            self.calls.iter().rev().find_map(|call| match call {
                Call::Int(n, v) if n == name => Some(*v),
                _ => None,
            })
        }

        pub fn last_float(&self, name: &str) -> Option<f32> {
            self.calls.iter().rev().find_map(|call| match call {
                Call::Float(n, v) if n == name => Some(*v),
                _ => None,
            })
        }

        pub fn last_bool(&self, name: &str) -> Option<bool> {
            self.calls.iter().rev().find_map(|call| match call {
                Call::Bool(n, v) if n == name => Some(*v),
                _ => None,
            })
        }

        pub fn last_vec3(&self, name: &str) -> Option<Vec3> {
            self.calls.iter().rev().find_map(|call| match call {
                Call::Vec3(n, v) if n == name => Some(*v),
                _ => None,
            })
        }

        pub fn last_vec4(&self, name: &str) -> Option<Vec4> {
            self.calls.iter().rev().find_map(|call| match call {
                Call::Vec4(n, v) if n == name => Some(*v),
                _ => None,
            })
        }

        pub fn count(&self, wanted: &Call) -> usize {
            self.calls.iter().filter(|call| *call == wanted).count()
        }
    }

    impl GraphicsBackend for RecordingBackend {
        fn use_program(&mut self, shader: ShaderHandle) {
            self.calls.push(Call::UseProgram(shader));
        }

        fn unbind_program(&mut self) {
            self.calls.push(Call::UnbindProgram);
        }

        fn enable_alpha_blending(&mut self) {
            self.calls.push(Call::EnableBlending);
        }

        fn clear_texture_unit(&mut self, unit: u32) {
            self.calls.push(Call::ClearTextureUnit(unit));
        }

        fn set_int(&mut self, name: &str, value: i32) {
            self.calls.push(Call::Int(name.to_string(), value));
        }

        fn set_bool(&mut self, name: &str, value: bool) {
            self.calls.push(Call::Bool(name.to_string(), value));
        }

        fn set_float(&mut self, name: &str, value: f32) {
            self.calls.push(Call::Float(name.to_string(), value));
        }

        fn set_vec3(&mut self, name: &str, value: &Vec3) {
            self.calls.push(Call::Vec3(name.to_string(), *value));
        }

        fn set_vec4(&mut self, name: &str, value: &Vec4) {
            self.calls.push(Call::Vec4(name.to_string(), *value));
        }

        fn set_mat4(&mut self, name: &str, value: &Mat4) {
            self.calls.push(Call::Mat4(name.to_string(), *value));
        }

        fn set_mat4_array(&mut self, name: &str, values: &[Mat4]) {
            self.calls.push(Call::Mat4Array(name.to_string(), values.len()));
        }

        fn draw_mesh(&mut self, mesh: MeshHandle) {
            self.calls.push(Call::Draw(mesh));
        }

        fn set_light_block(&mut self, block: &LightBlock) -> bool {
            if self.accepts_light_blocks {
                self.calls.push(Call::LightBlock(*block));
            }
            self.accepts_light_blocks
        }
    }
}

#[cfg(test)]
mod tests {
    use super::uniforms;

    #[test]
    fn test_light_field_names() {
        assert_eq!(uniforms::light_field(0, "Position"), "allLights[0].Position");
        assert_eq!(uniforms::light_field(3, "alphaIndex"), "allLights[3].alphaIndex");
    }
}
