//! # Render Objects
//!
//! A [`RenderObject`] is everything the scene draws: a model and shader, a
//! local transform, a material, the indices of the local lights that affect
//! it, and optionally one specialised [`Behavior`] (skinned animation or an
//! orbit).
//!
//! ## Model matrix
//!
//! Static and skinned objects compose
//!
//! ```text
//! H · T(position) · Ry·Rx·Rz(rotation) · T(initial_translation) · Ry·Rx·Rz(initial_rotation) · S(scale)
//! ```
//!
//! where `H` is the hierarchical transform injected by the node that owns the
//! object this frame, or identity. Orbiting objects use
//! [`OrbitMotion::model_matrix`] under the same `H`.
//!
//! ## Following external state
//!
//! An object can follow a shared position and yaw (the player, usually). The
//! values are copied in at `update` time, so rendering always sees the
//! snapshot taken at the start of the frame.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

use super::animation::SkinnedAnimation;
use super::orbit::OrbitMotion;
use crate::foundation::math::{Mat4, Mat4Ext, Transform, Vec3};
use crate::physics::JumpPhysics;
use crate::render::backend::{uniforms, GraphicsBackend, ShaderHandle};
use crate::render::lighting::LightRegistry;
use crate::render::material::Material;
use crate::render::model::{Model, SkinnedModel};

bitflags! {
    /// Specialised capabilities a render object exposes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RenderCapabilities: u32 {
        /// Draws a skinned model and uploads bone matrices
        const SKINNED = 0b0001;
        /// Drives and uploads jump physics
        const PHYSICS = 0b0010;
        /// Follows an elliptical orbit
        const ORBIT = 0b0100;
    }
}

/// Per-frame camera data shared by every draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Projection matrix
    pub projection: Mat4,
    /// View matrix
    pub view: Mat4,
    /// Eye position in world space
    pub eye: Vec3,
}

/// Specialised behaviour of a render object
#[derive(Debug)]
pub enum Behavior {
    /// Plain mesh
    Static,
    /// Skinned mesh with optional jump physics
    Skinned(SkinnedAnimation),
    /// Body on an elliptical orbit
    Orbiting(OrbitMotion),
}

/// A drawable scene object
pub struct RenderObject {
    /// Local position, rotation (Euler degrees) and scale
    pub transform: Transform,
    initial_rotation: Vec3,
    initial_translation: Vec3,
    material: Material,
    affected_lights: Vec<usize>,
    model: Option<Rc<dyn Model>>,
    shader: Option<ShaderHandle>,
    use_blending: bool,
    external_position: Option<Rc<Cell<Vec3>>>,
    external_rotation: Option<Rc<Cell<f32>>>,
    hierarchical_transform: Option<Mat4>,
    behavior: Behavior,
}

impl RenderObject {
    fn with_behavior(model: Option<Rc<dyn Model>>, shader: Option<ShaderHandle>, behavior: Behavior) -> Self {
        Self {
            transform: Transform::identity(),
            initial_rotation: Vec3::zeros(),
            initial_translation: Vec3::zeros(),
            material: Material::default(),
            affected_lights: Vec::new(),
            model,
            shader,
            use_blending: false,
            external_position: None,
            external_rotation: None,
            hierarchical_transform: None,
            behavior,
        }
    }

    /// Static object drawing `model` with `shader`
    pub fn new(model: Rc<dyn Model>, shader: ShaderHandle) -> Self {
        Self::with_behavior(Some(model), Some(shader), Behavior::Static)
    }

    /// Object without a model; renders nothing but can anchor a hierarchy node
    pub fn anchor() -> Self {
        Self::with_behavior(None, None, Behavior::Static)
    }

    /// Skinned object, optionally driving jump physics
    pub fn skinned(
        model: Box<dyn SkinnedModel>,
        shader: ShaderHandle,
        physics: Option<Rc<RefCell<JumpPhysics>>>,
    ) -> Self {
        let animation = SkinnedAnimation::new(model, physics);
        Self::with_behavior(None, Some(shader), Behavior::Skinned(animation))
    }

    /// Orbiting body drawing `model` with `shader`
    pub fn orbiting(model: Rc<dyn Model>, shader: ShaderHandle, orbit: OrbitMotion) -> Self {
        Self::with_behavior(Some(model), Some(shader), Behavior::Orbiting(orbit))
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Builder pattern: Set rotation (Euler degrees)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Builder pattern: Set the initial rotation offset
    pub fn with_initial_rotation(mut self, rotation: Vec3) -> Self {
        self.initial_rotation = rotation;
        self
    }

    /// Builder pattern: Set the initial translation offset
    pub fn with_initial_translation(mut self, translation: Vec3) -> Self {
        self.initial_translation = translation;
        self
    }

    /// Builder pattern: Set the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Builder pattern: Enable alpha blending
    pub fn with_blending(mut self, use_blending: bool) -> Self {
        self.use_blending = use_blending;
        self
    }

    /// Builder pattern: Follow a shared position
    pub fn following_position(mut self, source: Rc<Cell<Vec3>>) -> Self {
        self.follow_position(source);
        self
    }

    /// Builder pattern: Follow a shared yaw in degrees
    pub fn following_rotation(mut self, source: Rc<Cell<f32>>) -> Self {
        self.follow_rotation(source);
        self
    }

    /// Follow a shared position; the current value is adopted immediately
    pub fn follow_position(&mut self, source: Rc<Cell<Vec3>>) {
        let position = source.get();
        self.transform.position = position;
        if let Behavior::Skinned(animation) = &mut self.behavior {
            animation.prime_position(position);
        }
        self.external_position = Some(source);
    }

    /// Follow a shared yaw in degrees; the current value is adopted immediately
    ///
    /// Only the yaw is driven, pitch and roll keep their values.
    pub fn follow_rotation(&mut self, source: Rc<Cell<f32>>) {
        self.transform.rotation.y = source.get();
        self.external_rotation = Some(source);
    }

    /// Advance this object by one frame
    ///
    /// Static and skinned objects copy in followed state. Skinned objects then
    /// advance their animation and physics; orbiting objects only advance
    /// their orbit clock.
    pub fn update(&mut self, delta_time: f32) {
        if let Behavior::Orbiting(orbit) = &mut self.behavior {
            orbit.advance(delta_time);
            return;
        }

        if let Some(source) = &self.external_position {
            self.transform.position = source.get();
        }
        if let Some(source) = &self.external_rotation {
            self.transform.rotation.y = source.get();
        }

        if let Behavior::Skinned(animation) = &mut self.behavior {
            if self.external_position.is_some() {
                animation.track_position(self.transform.position);
            }
            animation.advance(delta_time);
        }
    }

    /// Model matrix for this frame, including any hierarchical transform
    pub fn model_matrix(&self) -> Mat4 {
        let parent = self.hierarchical_transform.unwrap_or_else(Mat4::identity);
        match &self.behavior {
            Behavior::Orbiting(orbit) => orbit.model_matrix(
                &parent,
                &self.transform.position,
                &self.transform.scale,
                &self.initial_rotation,
            ),
            Behavior::Static | Behavior::Skinned(_) => parent
                .translated(&self.transform.position)
                .rotated_yaw_pitch_roll(&self.transform.rotation)
                .translated(&self.initial_translation)
                .rotated_yaw_pitch_roll(&self.initial_rotation)
                .scaled(&self.transform.scale),
        }
    }

    /// Draw this object; objects without a model or shader draw nothing
    pub fn render(&self, backend: &mut dyn GraphicsBackend, lights: &LightRegistry, frame: &FrameContext) {
        let Some(shader) = self.shader else {
            return;
        };
        let has_model = match &self.behavior {
            Behavior::Skinned(_) => true,
            Behavior::Static | Behavior::Orbiting(_) => self.model.is_some(),
        };
        if !has_model {
            return;
        }

        backend.use_program(shader);
        let blend = match &self.behavior {
            Behavior::Static => self.use_blending,
            Behavior::Skinned(_) => false,
            Behavior::Orbiting(_) => true,
        };
        if blend {
            backend.enable_alpha_blending();
        }

        backend.set_mat4(uniforms::PROJECTION, &frame.projection);
        backend.set_mat4(uniforms::VIEW, &frame.view);
        backend.set_mat4(uniforms::MODEL, &self.model_matrix());

        match &self.behavior {
            Behavior::Skinned(animation) => animation.upload(backend),
            Behavior::Orbiting(orbit) => orbit.upload(backend),
            Behavior::Static => {}
        }

        lights.upload(backend, &self.affected_lights);
        backend.set_vec3(uniforms::EYE, &frame.eye);
        self.material.upload(backend);

        match &self.behavior {
            Behavior::Skinned(animation) => animation.model().draw(backend, shader),
            Behavior::Static | Behavior::Orbiting(_) => {
                if self.material.is_transparent() {
                    backend.clear_texture_unit(0);
                }
                if let Some(model) = &self.model {
                    model.draw(backend, shader);
                }
            }
        }
        backend.unbind_program();
    }

    /// Compose the model matrix under `transform` from now on
    pub fn set_hierarchical_transform(&mut self, transform: Mat4) {
        self.hierarchical_transform = Some(transform);
    }

    /// Stop composing under a hierarchical transform
    pub fn disable_hierarchical_transform(&mut self) {
        self.hierarchical_transform = None;
    }

    /// Whether a hierarchical transform is active
    pub fn is_using_hierarchical_transform(&self) -> bool {
        self.hierarchical_transform.is_some()
    }

    /// Let light `index` affect this object; duplicates are ignored
    pub fn add_affected_light(&mut self, index: usize) {
        if !self.affected_lights.contains(&index) {
            self.affected_lights.push(index);
        }
    }

    /// Stop light `index` from affecting this object
    pub fn remove_affected_light(&mut self, index: usize) {
        self.affected_lights.retain(|&i| i != index);
    }

    /// Remove every local light
    pub fn clear_affected_lights(&mut self) {
        self.affected_lights.clear();
    }

    /// Replace the local lights, keeping the first occurrence of each index
    pub fn set_affected_lights(&mut self, indices: &[usize]) {
        self.affected_lights.clear();
        for &index in indices {
            self.add_affected_light(index);
        }
    }

    /// Local light indices in insertion order
    pub fn affected_lights(&self) -> &[usize] {
        &self.affected_lights
    }

    /// Capabilities of this object
    pub fn capabilities(&self) -> RenderCapabilities {
        match &self.behavior {
            Behavior::Static => RenderCapabilities::empty(),
            Behavior::Skinned(animation) if animation.physics().is_some() => {
                RenderCapabilities::SKINNED | RenderCapabilities::PHYSICS
            }
            Behavior::Skinned(_) => RenderCapabilities::SKINNED,
            Behavior::Orbiting(_) => RenderCapabilities::ORBIT,
        }
    }

    /// Animation capability, if skinned
    pub fn animation(&self) -> Option<&SkinnedAnimation> {
        match &self.behavior {
            Behavior::Skinned(animation) => Some(animation),
            _ => None,
        }
    }

    /// Orbit capability, if orbiting
    pub fn orbit(&self) -> Option<&OrbitMotion> {
        match &self.behavior {
            Behavior::Orbiting(orbit) => Some(orbit),
            _ => None,
        }
    }

    /// Mutable orbit capability, if orbiting
    pub fn orbit_mut(&mut self) -> Option<&mut OrbitMotion> {
        match &mut self.behavior {
            Behavior::Orbiting(orbit) => Some(orbit),
            _ => None,
        }
    }

    /// World position along the orbit, if orbiting
    pub fn current_orbit_position(&self) -> Option<Vec3> {
        self.orbit().map(|orbit| orbit.current_position(&self.transform.position))
    }

    /// Point `lead_angle` radians ahead on the orbit, if orbiting
    pub fn leading_orbit_position(&self, lead_angle: f32) -> Option<Vec3> {
        self.orbit().map(|orbit| {
            orbit.leading_position(&self.transform.position, &self.initial_rotation, lead_angle)
        })
    }

    /// Local position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Set local position
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Set rotation (Euler degrees)
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.transform.rotation = rotation;
    }

    /// Set scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    /// Initial rotation offset
    pub fn initial_rotation(&self) -> Vec3 {
        self.initial_rotation
    }

    /// Set the initial rotation offset
    pub fn set_initial_rotation(&mut self, rotation: Vec3) {
        self.initial_rotation = rotation;
    }

    /// Set the initial translation offset
    pub fn set_initial_translation(&mut self, translation: Vec3) {
        self.initial_translation = translation;
    }

    /// Material
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Mutable material
    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// Replace the material
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Enable or disable alpha blending for static objects
    pub fn set_use_blending(&mut self, use_blending: bool) {
        self.use_blending = use_blending;
    }
}

impl fmt::Debug for RenderObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderObject")
            .field("transform", &self.transform)
            .field("behavior", &self.behavior)
            .field("affected_lights", &self.affected_lights)
            .field("has_model", &self.model.is_some())
            .field("shader", &self.shader)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::JumpParams;
    use crate::foundation::math::{transform_point, Vec4};
    use crate::render::backend::recording::{Call, RecordingBackend};
    use crate::render::backend::MeshHandle;
    use crate::render::lighting::Light;
    use crate::render::model::{PosedModel, StaticModel};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn cube() -> Rc<dyn Model> {
        Rc::new(StaticModel::new(MeshHandle(1)))
    }

    fn frame() -> FrameContext {
        FrameContext {
            projection: Mat4::identity(),
            view: Mat4::identity(),
            eye: Vec3::new(0.0, 1.0, 0.0),
        }
    }

    #[test]
    fn test_model_matrix_translation_and_yaw() {
        let object = RenderObject::new(cube(), ShaderHandle(1))
            .with_position(Vec3::new(3.0, 0.0, -2.0))
            .with_rotation(Vec3::new(0.0, 90.0, 0.0));

        let matrix = object.model_matrix();
        assert_relative_eq!(transform_point(&matrix, &Vec3::zeros()), Vec3::new(3.0, 0.0, -2.0), epsilon = EPSILON);

        // Local forward (+Z) turned by the yaw now points along +X
        let forward = matrix.transform_vector(&Vec3::z());
        assert_relative_eq!(forward, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_initial_offsets_apply_inside_rotation() {
        let object = RenderObject::new(cube(), ShaderHandle(1))
            .with_rotation(Vec3::new(0.0, 90.0, 0.0))
            .with_initial_translation(Vec3::new(0.0, 0.0, 1.0))
            .with_scale(Vec3::repeat(2.0));

        let origin = transform_point(&object.model_matrix(), &Vec3::zeros());
        assert_relative_eq!(origin, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_hierarchical_transform_is_prefix_and_resets() {
        let mut object = RenderObject::new(cube(), ShaderHandle(1)).with_position(Vec3::new(1.0, 0.0, 0.0));
        let local = object.model_matrix();

        let parent = Mat4::new_translation(&Vec3::new(0.0, 5.0, 0.0));
        object.set_hierarchical_transform(parent);
        assert!(object.is_using_hierarchical_transform());
        assert_relative_eq!(object.model_matrix(), parent * local, epsilon = EPSILON);

        object.disable_hierarchical_transform();
        assert!(!object.is_using_hierarchical_transform());
        assert_relative_eq!(object.model_matrix(), local, epsilon = EPSILON);
    }

    #[test]
    fn test_affected_lights_are_a_set() {
        let mut object = RenderObject::anchor();
        object.add_affected_light(2);
        object.add_affected_light(2);
        object.add_affected_light(0);
        assert_eq!(object.affected_lights(), &[2, 0]);

        object.remove_affected_light(2);
        object.remove_affected_light(7);
        assert_eq!(object.affected_lights(), &[0]);

        object.set_affected_lights(&[1, 3, 1]);
        assert_eq!(object.affected_lights(), &[1, 3]);

        object.clear_affected_lights();
        assert!(object.affected_lights().is_empty());
    }

    #[test]
    fn test_follows_external_state_on_update() {
        let position = Rc::new(Cell::new(Vec3::new(1.0, 0.0, 0.0)));
        let yaw = Rc::new(Cell::new(30.0));
        let mut object = RenderObject::new(cube(), ShaderHandle(1))
            .following_position(Rc::clone(&position))
            .following_rotation(Rc::clone(&yaw));
        assert_relative_eq!(object.position(), Vec3::new(1.0, 0.0, 0.0));

        position.set(Vec3::new(4.0, 0.0, 4.0));
        yaw.set(45.0);
        assert_relative_eq!(object.position(), Vec3::new(1.0, 0.0, 0.0));

        object.update(0.016);
        assert_relative_eq!(object.position(), Vec3::new(4.0, 0.0, 4.0));
        assert_relative_eq!(object.transform.rotation.y, 45.0);
    }

    #[test]
    fn test_followed_yaw_keeps_pitch_and_roll() {
        let yaw = Rc::new(Cell::new(30.0));
        let mut object = RenderObject::new(cube(), ShaderHandle(1))
            .with_rotation(Vec3::new(10.0, 0.0, 5.0))
            .following_rotation(Rc::clone(&yaw));
        assert_relative_eq!(object.transform.rotation, Vec3::new(10.0, 30.0, 5.0));

        yaw.set(-60.0);
        object.update(0.016);
        assert_relative_eq!(object.transform.rotation, Vec3::new(10.0, -60.0, 5.0));
    }

    #[test]
    fn test_rebinding_skinned_position_is_not_movement() {
        let start = Rc::new(Cell::new(Vec3::zeros()));
        let mut object = RenderObject::skinned(Box::new(PosedModel::new(MeshHandle(2), 1)), ShaderHandle(2), None)
            .following_position(Rc::clone(&start));
        object.update(0.1);

        let elsewhere = Rc::new(Cell::new(Vec3::new(50.0, 0.0, -20.0)));
        object.follow_position(Rc::clone(&elsewhere));
        object.update(0.1);
        assert!(!object.animation().map_or(true, SkinnedAnimation::is_moving));
        assert_relative_eq!(object.position(), Vec3::new(50.0, 0.0, -20.0));

        elsewhere.set(Vec3::new(51.0, 0.0, -20.0));
        object.update(0.1);
        assert!(object.animation().map_or(false, SkinnedAnimation::is_moving));
    }

    #[test]
    fn test_render_sequence_for_static_object() {
        let mut lights = LightRegistry::new();
        lights.add(Light::point(Vec3::zeros(), Vec4::new(1.0, 1.0, 1.0, 1.0)), true);
        let local = lights.add(Light::point(Vec3::x(), Vec4::new(1.0, 0.0, 0.0, 1.0)), false);

        let mut object = RenderObject::new(cube(), ShaderHandle(4))
            .with_material(Material::new().with_transparency(0.5))
            .with_blending(true);
        object.add_affected_light(local);

        let mut backend = RecordingBackend::new();
        object.render(&mut backend, &lights, &frame());

        assert_eq!(backend.calls.first(), Some(&Call::UseProgram(ShaderHandle(4))));
        assert_eq!(backend.calls.get(1), Some(&Call::EnableBlending));
        assert_eq!(backend.last_int("numLights"), Some(2));
        assert_eq!(backend.last_vec3("eye"), Some(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(backend.last_float("transparency"), Some(0.5));
        assert_eq!(backend.count(&Call::ClearTextureUnit(0)), 1);
        assert_eq!(backend.draws(), vec![MeshHandle(1)]);
        assert_eq!(backend.calls.last(), Some(&Call::UnbindProgram));
    }

    #[test]
    fn test_render_without_model_or_shader_is_noop() {
        let lights = LightRegistry::new();
        let mut backend = RecordingBackend::new();
        RenderObject::anchor().render(&mut backend, &lights, &frame());
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn test_skinned_object_tracks_movement_and_physics() {
        let physics = Rc::new(RefCell::new(JumpPhysics::new(JumpParams::default())));
        let position = Rc::new(Cell::new(Vec3::zeros()));
        let mut object = RenderObject::skinned(
            Box::new(PosedModel::new(MeshHandle(2), 3)),
            ShaderHandle(2),
            Some(Rc::clone(&physics)),
        )
        .following_position(Rc::clone(&position));

        assert_eq!(
            object.capabilities(),
            RenderCapabilities::SKINNED | RenderCapabilities::PHYSICS
        );

        object.update(0.1);
        assert!(!object.animation().map_or(true, SkinnedAnimation::is_moving));

        position.set(Vec3::new(0.5, 0.0, 0.0));
        physics.borrow_mut().initiate_jump();
        object.update(0.1);
        assert!(object.animation().map_or(false, SkinnedAnimation::is_moving));
        assert_relative_eq!(physics.borrow().jump_time(), 0.1, epsilon = EPSILON);

        // Tiny movements below the threshold do not count as walking
        position.set(Vec3::new(0.50001, 0.0, 0.0));
        object.update(0.1);
        assert!(!object.animation().map_or(true, SkinnedAnimation::is_moving));

        let mut backend = RecordingBackend::new();
        object.render(&mut backend, &LightRegistry::new(), &frame());
        assert_eq!(backend.count(&Call::Mat4Array("gBones".to_string(), 3)), 1);
        assert_eq!(backend.last_bool("isJumping"), Some(true));
        assert_eq!(backend.count(&Call::EnableBlending), 0);
        assert_eq!(backend.draws(), vec![MeshHandle(2)]);
    }

    #[test]
    fn test_skinned_without_physics_uploads_fallbacks() {
        let object = RenderObject::skinned(Box::new(PosedModel::new(MeshHandle(2), 1)), ShaderHandle(2), None);
        assert_eq!(object.capabilities(), RenderCapabilities::SKINNED);

        let mut backend = RecordingBackend::new();
        object.render(&mut backend, &LightRegistry::new(), &frame());
        assert_eq!(backend.last_float("physicsTime"), Some(0.0));
        assert_eq!(backend.last_bool("isJumping"), Some(false));
        assert_eq!(backend.last_float("lunarGravity"), Some(1.62));
        assert_eq!(backend.last_float("astronautMass"), Some(180.0));
    }

    #[test]
    fn test_orbiting_object_always_blends_and_uploads_orbit() {
        let mut object = RenderObject::orbiting(cube(), ShaderHandle(3), OrbitMotion::new());
        assert_eq!(object.capabilities(), RenderCapabilities::ORBIT);

        object.update(2.0);
        assert_relative_eq!(object.orbit().map_or(0.0, OrbitMotion::time), 2.0);

        let mut backend = RecordingBackend::new();
        object.render(&mut backend, &LightRegistry::new(), &frame());
        assert_eq!(backend.count(&Call::EnableBlending), 1);
        assert_relative_eq!(backend.last_float("time").unwrap_or_default(), 0.4, epsilon = EPSILON);
        assert_relative_eq!(backend.last_float("radius").unwrap_or_default(), 30.0);
        assert_relative_eq!(
            backend.last_float("orbitAngleX").unwrap_or_default(),
            std::f32::consts::FRAC_PI_2,
            epsilon = EPSILON
        );
        assert_eq!(backend.count(&Call::Mat4("model".to_string(), object.model_matrix())), 1);
    }

    #[test]
    fn test_static_object_has_no_capabilities() {
        let object = RenderObject::new(cube(), ShaderHandle(1));
        assert!(object.capabilities().is_empty());
        assert!(object.orbit().is_none());
        assert!(object.current_orbit_position().is_none());
        assert!(object.leading_orbit_position(0.5).is_none());
    }
}
