//! Debug overlays and background
//!
//! These draw through the same [`Model`]/[`GraphicsBackend`] interfaces as
//! scene objects but never receive lighting.

use std::rc::Rc;

use super::backend::{uniforms, GraphicsBackend, ShaderHandle};
use super::model::Model;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3, Vec4};

/// Scale applied to every light marker
pub const LIGHT_MARKER_SCALE: f32 = 0.5;

/// Draws a small marker at every tracked light position
pub struct LightIndicator {
    marker: Rc<dyn Model>,
    shader: ShaderHandle,
    positions: Vec<Vec3>,
    colors: Vec<Vec4>,
}

impl LightIndicator {
    /// Create an indicator drawing `marker` with `shader`
    pub fn new(marker: Rc<dyn Model>, shader: ShaderHandle) -> Self {
        Self {
            marker,
            shader,
            positions: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Track a light; returns its indicator index
    pub fn add_light(&mut self, position: Vec3, color: Vec4) -> usize {
        self.positions.push(position);
        self.colors.push(color);
        self.positions.len() - 1
    }

    /// Move a marker; out-of-range indices are ignored
    pub fn update_light_position(&mut self, index: usize, position: Vec3) {
        if let Some(slot) = self.positions.get_mut(index) {
            *slot = position;
        }
    }

    /// Position of a marker
    pub fn light_position(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied()
    }

    /// Number of markers
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no markers are tracked
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Draw every marker
    pub fn draw(&self, backend: &mut dyn GraphicsBackend, projection: &Mat4, view: &Mat4) {
        backend.use_program(self.shader);
        backend.set_mat4(uniforms::PROJECTION, projection);
        backend.set_mat4(uniforms::VIEW, view);

        let scale = Vec3::repeat(LIGHT_MARKER_SCALE);
        for (position, color) in self.positions.iter().zip(&self.colors) {
            let model = Mat4::identity().translated(position).scaled(&scale);
            backend.set_mat4(uniforms::MODEL, &model);
            backend.set_vec4(uniforms::LIGHT_COLOR, color);
            self.marker.draw(backend, self.shader);
        }
        backend.unbind_program();
    }
}

/// World axes drawn as coloured lines
pub struct AxisGizmo {
    lines: Rc<dyn Model>,
    shader: ShaderHandle,
    origin: Vec3,
    scale: f32,
}

impl AxisGizmo {
    /// Create a gizmo at `origin` with the given uniform scale
    pub fn new(lines: Rc<dyn Model>, shader: ShaderHandle, origin: Vec3, scale: f32) -> Self {
        Self {
            lines,
            shader,
            origin,
            scale,
        }
    }

    /// Draw the axes
    pub fn draw(&self, backend: &mut dyn GraphicsBackend, projection: &Mat4, view: &Mat4) {
        backend.use_program(self.shader);
        backend.set_mat4(uniforms::PROJECTION, projection);
        backend.set_mat4(uniforms::VIEW, view);
        let model = Mat4::identity()
            .translated(&self.origin)
            .scaled(&Vec3::repeat(self.scale));
        backend.set_mat4(uniforms::MODEL, &model);
        self.lines.draw(backend, self.shader);
        backend.unbind_program();
    }
}

/// Background cube that follows the camera
pub struct Skybox {
    cube: Rc<dyn Model>,
    shader: ShaderHandle,
}

impl Skybox {
    /// Create a skybox drawing `cube` with `shader`
    pub fn new(cube: Rc<dyn Model>, shader: ShaderHandle) -> Self {
        Self { cube, shader }
    }

    /// Draw the background; the view's translation is ignored
    pub fn draw(&self, backend: &mut dyn GraphicsBackend, projection: &Mat4, view: &Mat4) {
        backend.use_program(self.shader);
        backend.set_mat4(uniforms::PROJECTION, projection);
        backend.set_mat4(uniforms::VIEW, &view.without_translation());
        self.cube.draw(backend, self.shader);
        backend.unbind_program();
    }
}
