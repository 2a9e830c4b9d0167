//! Indexed lighting
//!
//! Lights live in a single [`LightRegistry`] and are referred to everywhere
//! else by their registry index. Every draw receives all *global* lights first,
//! in registration order, followed by the drawing object's own *local* lights.
//! At most [`MAX_ACTIVE_LIGHTS`] reach the shader, so globals always win when
//! the list has to be cut.

use bytemuck::{Pod, Zeroable};

use super::backend::{uniforms, GraphicsBackend};
use crate::foundation::math::{Vec3, Vec4};

/// Number of lights the shaders can consume per draw
pub const MAX_ACTIVE_LIGHTS: usize = 4;

/// Light source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// World-space position
    pub position: Vec3,
    /// Direction the light points to
    pub direction: Vec3,
    /// Light colour
    pub color: Vec4,
    /// Per-channel intensity
    pub power: Vec4,
    /// Specular exponent
    pub alpha_index: i32,
    /// Falloff distance
    pub distance: f32,
}

impl Light {
    /// Create a point light with white power 1 and default falloff
    pub fn point(position: Vec3, color: Vec4) -> Self {
        Self {
            position,
            direction: Vec3::new(0.0, -1.0, 0.0),
            color,
            power: Vec4::new(1.0, 1.0, 1.0, 1.0),
            alpha_index: 10,
            distance: 1.0,
        }
    }

    /// Builder pattern: Set the direction
    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = direction;
        self
    }

    /// Builder pattern: Set the power
    pub fn with_power(mut self, power: Vec4) -> Self {
        self.power = power;
        self
    }

    /// Builder pattern: Set the specular exponent
    pub fn with_alpha_index(mut self, alpha_index: i32) -> Self {
        self.alpha_index = alpha_index;
        self
    }

    /// Builder pattern: Set the falloff distance
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    /// GPU layout of this light
    pub fn to_uniform(&self) -> LightUniform {
        LightUniform {
            position: [self.position.x, self.position.y, self.position.z, 1.0],
            direction: [self.direction.x, self.direction.y, self.direction.z, 0.0],
            color: self.color.into(),
            power: self.power.into(),
            alpha_index: self.alpha_index,
            distance: self.distance,
            _padding: [0.0; 2],
        }
    }

    fn upload(&self, backend: &mut dyn GraphicsBackend, slot: usize) {
        backend.set_vec3(&uniforms::light_field(slot, "Position"), &self.position);
        backend.set_vec3(&uniforms::light_field(slot, "Direction"), &self.direction);
        backend.set_vec4(&uniforms::light_field(slot, "Color"), &self.color);
        backend.set_vec4(&uniforms::light_field(slot, "Power"), &self.power);
        backend.set_int(&uniforms::light_field(slot, "alphaIndex"), self.alpha_index);
        backend.set_float(&uniforms::light_field(slot, "distance"), self.distance);
    }
}

/// std140-compatible layout of one light
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    /// xyz position, w = 1
    pub position: [f32; 4],
    /// xyz direction, w = 0
    pub direction: [f32; 4],
    /// RGBA colour
    pub color: [f32; 4],
    /// RGBA power
    pub power: [f32; 4],
    /// Specular exponent
    pub alpha_index: i32,
    /// Falloff distance
    pub distance: f32,
    _padding: [f32; 2],
}

/// All lights for one draw, ready to copy into a uniform buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightBlock {
    /// Active lights; entries past `count` are zeroed
    pub lights: [LightUniform; MAX_ACTIVE_LIGHTS],
    /// Number of valid entries
    pub count: i32,
    _padding: [i32; 3],
}

impl LightBlock {
    /// Raw bytes for a uniform-buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Owner of every light in the scene
#[derive(Debug, Clone, Default)]
pub struct LightRegistry {
    lights: Vec<Light>,
    global_indices: Vec<usize>,
}

impl LightRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a light and return its index
    pub fn add(&mut self, light: Light, is_global: bool) -> usize {
        let index = self.lights.len();
        self.lights.push(light);
        if is_global {
            self.global_indices.push(index);
        }
        log::debug!("Registered light {} (global: {})", index, is_global);
        index
    }

    /// Mark or unmark a light as global; out-of-range indices are ignored
    pub fn set_global(&mut self, index: usize, is_global: bool) {
        if index >= self.lights.len() {
            return;
        }
        let existing = self.global_indices.iter().position(|&i| i == index);
        match (is_global, existing) {
            (true, None) => self.global_indices.push(index),
            (false, Some(pos)) => {
                self.global_indices.remove(pos);
            }
            _ => {}
        }
    }

    /// Move a light; out-of-range indices are ignored
    pub fn update_position(&mut self, index: usize, position: Vec3) {
        if let Some(light) = self.lights.get_mut(index) {
            light.position = position;
        }
    }

    /// Light at `index`
    pub fn get(&self, index: usize) -> Option<&Light> {
        self.lights.get(index)
    }

    /// Mutable light at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    /// Total number of lights
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Number of global lights
    pub fn global_count(&self) -> usize {
        self.global_indices.len()
    }

    /// Global light indices in registration order
    pub fn global_indices(&self) -> &[usize] {
        &self.global_indices
    }

    /// Registry indices that apply to an object with the given local lights
    ///
    /// Globals come first; locals follow in caller order with duplicates and
    /// out-of-range entries dropped. The result is not truncated.
    pub fn active_indices(&self, local_indices: &[usize]) -> Vec<usize> {
        let mut active: Vec<usize> = self
            .global_indices
            .iter()
            .copied()
            .filter(|&i| i < self.lights.len())
            .collect();

        for &index in local_indices {
            if index < self.lights.len() && !active.contains(&index) {
                active.push(index);
            }
        }
        active
    }

    /// Lights that apply to an object with the given local lights
    pub fn resolve_active(&self, local_indices: &[usize]) -> Vec<&Light> {
        self.active_indices(local_indices)
            .into_iter()
            .map(|i| &self.lights[i])
            .collect()
    }

    /// Upload the active lights for one draw, capped at [`MAX_ACTIVE_LIGHTS`]
    ///
    /// Backends that accept a [`LightBlock`] get the whole set in one call,
    /// all others get `numLights` and the `allLights[i]` fields.
    pub fn upload(&self, backend: &mut dyn GraphicsBackend, local_indices: &[usize]) {
        let active = self.resolve_active(local_indices);
        if active.len() > MAX_ACTIVE_LIGHTS {
            log::trace!(
                "{} lights apply, only the first {} are uploaded",
                active.len(),
                MAX_ACTIVE_LIGHTS
            );
        }
        let uploaded = &active[..active.len().min(MAX_ACTIVE_LIGHTS)];

        if backend.set_light_block(&Self::pack(uploaded)) {
            return;
        }
        backend.set_int(uniforms::NUM_LIGHTS, i32::try_from(uploaded.len()).unwrap_or(i32::MAX));
        for (slot, light) in uploaded.iter().enumerate() {
            light.upload(backend, slot);
        }
    }

    /// Active lights for one draw in uniform-buffer form
    ///
    /// Same selection and order as [`LightRegistry::upload`].
    pub fn light_block(&self, local_indices: &[usize]) -> LightBlock {
        let active = self.resolve_active(local_indices);
        Self::pack(&active[..active.len().min(MAX_ACTIVE_LIGHTS)])
    }

    fn pack(lights: &[&Light]) -> LightBlock {
        let mut block = LightBlock::zeroed();
        for (slot, light) in lights.iter().enumerate() {
            block.lights[slot] = light.to_uniform();
        }
        block.count = i32::try_from(lights.len()).unwrap_or(i32::MAX);
        block
    }
}
