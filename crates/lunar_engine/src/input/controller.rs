//! Player controller
//!
//! Translates the per-frame key snapshot and mouse events into player
//! movement, yaw, camera direction, jumps and debug toggles. All state it
//! touches is passed in explicitly.
//!
//! Yaw is in degrees about +Y; a yaw of 0 faces +Z. The player's forward
//! vector is always horizontal, while the first-person camera also carries a
//! pitch driven by the scroll wheel.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{InputState, KeyCode};
use crate::core::config::InputConfig;
use crate::foundation::math::{utils, Vec3};
use crate::physics::JumpPhysics;
use crate::render::camera::{ActiveCamera, CameraRig};
use crate::render::context::{RenderContext, MAX_SPEED_FACTOR, MIN_SPEED_FACTOR};

const YAW_STEP_DEG: f32 = 0.2;
const MOUSE_SENSITIVITY: f32 = 0.1;
const SPEED_FACTOR_STEP: f32 = 0.01;
const PITCH_STEP_DEG: f32 = 2.0;
const PITCH_LIMIT_DEG: f32 = 50.0;
const OFFSET_STEP: f32 = 0.5;
const MIN_OFFSET: f32 = 1.0;
const MAX_OFFSET: f32 = 15.0;

/// What the controller moves
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Shared position that followers read at update time
    pub position: Rc<Cell<Vec3>>,
    /// Shared yaw in degrees
    pub yaw: Rc<Cell<f32>>,
    /// Horizontal facing direction
    pub forward: Vec3,
    /// Distance of the third-person camera behind the player
    pub third_person_offset: f32,
    /// Jump model started by the jump key
    pub physics: Option<Rc<RefCell<JumpPhysics>>>,
}

impl PlayerState {
    /// Player at `position` facing `yaw` degrees
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            position: Rc::new(Cell::new(position)),
            yaw: Rc::new(Cell::new(yaw)),
            forward: facing(yaw),
            third_person_offset: 5.0,
            physics: None,
        }
    }

    /// Attach the jump model
    pub fn with_physics(mut self, physics: Rc<RefCell<JumpPhysics>>) -> Self {
        self.physics = Some(physics);
        self
    }

    /// Set the third-person follow distance
    pub fn with_third_person_offset(mut self, offset: f32) -> Self {
        self.third_person_offset = offset.clamp(MIN_OFFSET, MAX_OFFSET);
        self
    }
}

fn facing(yaw_deg: f32) -> Vec3 {
    let yaw = utils::deg_to_rad(yaw_deg);
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Keyboard, mouse and scroll handling for the player
#[derive(Debug, Clone)]
pub struct InputController {
    base_speed: f32,
    run_multiplier: f32,
    camera_pitch: f32,
    last_x: Option<f32>,
    c_held: bool,
    space_held: bool,
    l_held: bool,
}

impl InputController {
    /// Create a controller from configuration
    pub fn new(config: &InputConfig) -> Self {
        Self {
            base_speed: config.base_speed,
            run_multiplier: config.run_multiplier,
            camera_pitch: 0.0,
            last_x: None,
            c_held: false,
            space_held: false,
            l_held: false,
        }
    }

    /// First-person pitch in degrees
    pub fn camera_pitch(&self) -> f32 {
        self.camera_pitch
    }

    /// Speed multiplier while running
    pub fn run_multiplier(&self) -> f32 {
        self.run_multiplier
    }

    /// Set the speed multiplier while running
    pub fn set_run_multiplier(&mut self, multiplier: f32) {
        self.run_multiplier = multiplier;
    }

    /// Apply one frame of held keys; returns whether the player walked
    pub fn process_keyboard(
        &mut self,
        input: &InputState,
        player: &mut PlayerState,
        rig: &mut CameraRig,
        context: &mut RenderContext,
    ) -> bool {
        if input.is_pressed(KeyCode::Escape) {
            context.exit_requested = true;
        }

        if input.is_pressed(KeyCode::KeypadAdd) {
            context.movement_speed_factor = (context.movement_speed_factor + SPEED_FACTOR_STEP).min(MAX_SPEED_FACTOR);
        }
        if input.is_pressed(KeyCode::KeypadSubtract) {
            context.movement_speed_factor = (context.movement_speed_factor - SPEED_FACTOR_STEP).max(MIN_SPEED_FACTOR);
        }

        let running = input.any_pressed(&[KeyCode::LeftShift, KeyCode::RightShift]);
        let speed = if running {
            self.base_speed * self.run_multiplier
        } else {
            self.base_speed
        } * context.movement_speed_factor;

        let right = player.forward.cross(&Vec3::y()).normalize();
        let mut position = player.position.get();
        let mut moving = false;

        if input.any_pressed(&[KeyCode::Up, KeyCode::W]) {
            position += player.forward * speed;
            moving = true;
        }
        if input.any_pressed(&[KeyCode::Down, KeyCode::S]) {
            position -= player.forward * speed;
            moving = true;
        }
        if input.is_pressed(KeyCode::A) {
            position -= right * speed;
            moving = true;
        }
        if input.is_pressed(KeyCode::D) {
            position += right * speed;
            moving = true;
        }
        player.position.set(position);

        if input.is_pressed(KeyCode::Left) {
            player.yaw.set(player.yaw.get() + YAW_STEP_DEG);
            self.update_directions(player, rig, context.active_camera);
        }
        if input.is_pressed(KeyCode::Right) {
            player.yaw.set(player.yaw.get() - YAW_STEP_DEG);
            self.update_directions(player, rig, context.active_camera);
        }

        let space = input.is_pressed(KeyCode::Space);
        if space && !self.space_held {
            if let Some(physics) = &player.physics {
                physics.borrow_mut().initiate_jump();
            }
        }
        self.space_held = space;

        let c = input.is_pressed(KeyCode::C);
        if c && !self.c_held {
            context.active_camera = context.active_camera.toggled();
            if context.active_camera == ActiveCamera::ThirdPerson {
                self.camera_pitch = 0.0;
            }
            log::debug!("Switched to {:?} camera", context.active_camera);
            self.update_directions(player, rig, context.active_camera);
        }
        self.c_held = c;

        let l = input.is_pressed(KeyCode::L);
        if l && !self.l_held {
            context.show_light_indicators = !context.show_light_indicators;
            log::debug!("Light indicators {}", if context.show_light_indicators { "on" } else { "off" });
        }
        self.l_held = l;

        moving
    }

    /// Turn the player with horizontal mouse motion
    ///
    /// The first event only records the cursor position.
    pub fn process_mouse(&mut self, x: f32, player: &mut PlayerState, rig: &mut CameraRig, context: &RenderContext) {
        let last_x = self.last_x.replace(x).unwrap_or(x);
        let offset = x - last_x;
        let sensitivity = MOUSE_SENSITIVITY * context.mouse_sensitivity_factor;
        player.yaw.set(player.yaw.get() - offset * sensitivity);
        self.update_directions(player, rig, context.active_camera);
    }

    /// Pitch the first-person camera or move the third-person camera closer
    pub fn process_scroll(&mut self, y_offset: f32, player: &mut PlayerState, rig: &mut CameraRig, context: &RenderContext) {
        match context.active_camera {
            ActiveCamera::FirstPerson => {
                self.camera_pitch = (self.camera_pitch + y_offset * PITCH_STEP_DEG).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
                self.update_directions(player, rig, context.active_camera);
            }
            ActiveCamera::ThirdPerson => {
                player.third_person_offset = (player.third_person_offset - y_offset * OFFSET_STEP).clamp(MIN_OFFSET, MAX_OFFSET);
            }
        }
    }

    /// Point the active camera along the player's yaw and refresh `forward`
    fn update_directions(&self, player: &mut PlayerState, rig: &mut CameraRig, active: ActiveCamera) {
        let yaw = utils::deg_to_rad(player.yaw.get());
        let front = match active {
            ActiveCamera::FirstPerson => {
                let pitch = utils::deg_to_rad(self.camera_pitch);
                Vec3::new(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos())
            }
            ActiveCamera::ThirdPerson => Vec3::new(yaw.sin(), 0.0, yaw.cos()),
        };
        rig.camera_mut(active).set_front(front);
        player.forward = facing(player.yaw.get());
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}
