//! Skinned animation coupled to jump physics

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::foundation::math::Vec3;
use crate::physics::JumpPhysics;
use crate::render::backend::{uniforms, GraphicsBackend};
use crate::render::model::{SkinnedModel, MAX_BONES};

/// Distance a followed position must move in one frame to count as walking
const MOVEMENT_THRESHOLD: f32 = 0.0001;

/// Physics uniforms written when no physics is bound
const FALLBACK_GRAVITY: f32 = 1.62;
const FALLBACK_MASS: f32 = 180.0;

/// Animation capability of a render object
///
/// The walk cycle only advances while the followed position moves. The bound
/// jump physics is stepped with the object and its state is forwarded to the
/// shader so vertices can be lifted on the GPU.
pub struct SkinnedAnimation {
    model: Box<dyn SkinnedModel>,
    physics: Option<Rc<RefCell<JumpPhysics>>>,
    is_moving: bool,
    last_position: Option<Vec3>,
}

impl SkinnedAnimation {
    /// Animate `model`, optionally driving `physics`
    pub fn new(model: Box<dyn SkinnedModel>, physics: Option<Rc<RefCell<JumpPhysics>>>) -> Self {
        Self {
            model,
            physics,
            is_moving: false,
            last_position: None,
        }
    }

    /// Whether the followed position moved during the last update
    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    /// The bound jump physics
    pub fn physics(&self) -> Option<&Rc<RefCell<JumpPhysics>>> {
        self.physics.as_ref()
    }

    /// The animated model
    pub fn model(&self) -> &dyn SkinnedModel {
        self.model.as_ref()
    }

    /// Start tracking from `position` without counting it as movement
    pub(crate) fn prime_position(&mut self, position: Vec3) {
        self.last_position = Some(position);
        self.is_moving = false;
    }

    /// Record the followed position for this frame and recompute the moving flag
    pub(crate) fn track_position(&mut self, position: Vec3) {
        let previous = *self.last_position.get_or_insert(position);
        self.is_moving = (position - previous).norm() > MOVEMENT_THRESHOLD;
        self.last_position = Some(position);
    }

    /// Advance the walk cycle if moving, then step physics
    pub(crate) fn advance(&mut self, delta_time: f32) {
        if self.is_moving {
            self.model.advance(delta_time);
        }
        if let Some(physics) = &self.physics {
            physics.borrow_mut().update(delta_time);
        }
    }

    /// Write bone matrices and jump uniforms
    pub(crate) fn upload(&self, backend: &mut dyn GraphicsBackend) {
        let bones = self.model.bone_transforms();
        backend.set_mat4_array(uniforms::BONES, &bones[..bones.len().min(MAX_BONES)]);

        match &self.physics {
            Some(physics) => {
                let physics = physics.borrow();
                let params = physics.params();
                backend.set_float(uniforms::PHYSICS_TIME, physics.jump_time());
                backend.set_bool(uniforms::IS_JUMPING, physics.is_jumping());
                backend.set_float(uniforms::INITIAL_VELOCITY, params.initial_velocity);
                backend.set_float(uniforms::LUNAR_GRAVITY, params.gravity);
                backend.set_float(uniforms::ASTRONAUT_MASS, params.mass);
                backend.set_float(uniforms::GROUND_LEVEL, physics.ground_level());
            }
            None => {
                backend.set_float(uniforms::PHYSICS_TIME, 0.0);
                backend.set_bool(uniforms::IS_JUMPING, false);
                backend.set_float(uniforms::INITIAL_VELOCITY, 0.0);
                backend.set_float(uniforms::LUNAR_GRAVITY, FALLBACK_GRAVITY);
                backend.set_float(uniforms::ASTRONAUT_MASS, FALLBACK_MASS);
                backend.set_float(uniforms::GROUND_LEVEL, 0.0);
            }
        }
    }
}

impl fmt::Debug for SkinnedAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkinnedAnimation")
            .field("bones", &self.model.bone_transforms().len())
            .field("has_physics", &self.physics.is_some())
            .field("is_moving", &self.is_moving)
            .finish()
    }
}
