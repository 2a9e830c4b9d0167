//! Drawable model interfaces
//!
//! Mesh loading and skeletal playback live outside the engine; the scene only
//! needs something it can ask to draw, and for skinned models, something it
//! can advance and read bone matrices from.

use super::backend::{GraphicsBackend, MeshHandle, ShaderHandle};
use crate::foundation::math::Mat4;

/// Upper bound on bone matrices uploaded per draw
pub const MAX_BONES: usize = 100;

/// Anything that can draw itself with a bound program
pub trait Model {
    /// Issue the draw calls for this model
    fn draw(&self, backend: &mut dyn GraphicsBackend, shader: ShaderHandle);
}

/// A model with skeletal animation
pub trait SkinnedModel: Model {
    /// Advance the animation clock by `delta_time` seconds
    fn advance(&mut self, delta_time: f32);

    /// Current bone matrices, in bone order
    fn bone_transforms(&self) -> &[Mat4];
}

/// Model backed by a single uploaded mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticModel {
    mesh: MeshHandle,
}

impl StaticModel {
    /// Wrap an uploaded mesh
    pub fn new(mesh: MeshHandle) -> Self {
        Self { mesh }
    }

    /// The wrapped mesh
    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }
}

impl Model for StaticModel {
    fn draw(&self, backend: &mut dyn GraphicsBackend, _shader: ShaderHandle) {
        backend.draw_mesh(self.mesh);
    }
}

/// Skinned model whose pose is a fixed set of bones cycled by a clock
///
/// Stands in for an imported animation clip. The clock only ever grows; the
/// pose returned is the bind pose.
#[derive(Debug, Clone)]
pub struct PosedModel {
    mesh: MeshHandle,
    bones: Vec<Mat4>,
    clock: f32,
}

impl PosedModel {
    /// Create a model with `bone_count` identity bones
    pub fn new(mesh: MeshHandle, bone_count: usize) -> Self {
        Self {
            mesh,
            bones: vec![Mat4::identity(); bone_count],
            clock: 0.0,
        }
    }

    /// Seconds of animation played so far
    pub fn clock(&self) -> f32 {
        self.clock
    }
}

impl Model for PosedModel {
    fn draw(&self, backend: &mut dyn GraphicsBackend, _shader: ShaderHandle) {
        backend.draw_mesh(self.mesh);
    }
}

impl SkinnedModel for PosedModel {
    fn advance(&mut self, delta_time: f32) {
        self.clock += delta_time;
    }

    fn bone_transforms(&self) -> &[Mat4] {
        &self.bones
    }
}
