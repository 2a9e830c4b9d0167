//! Closed-form jump kinematics
//!
//! The jumper's height above ground is `y(t) = v0·t − ½·g·t²`, evaluated from
//! the moment the jump started. Nothing is integrated; the model only keeps a
//! clock and the start time, so rendering can reproduce the exact same curve on
//! the GPU from `physicsTime` and the constants.

use crate::core::config::JumpParams;

/// Where the jumper is in its jump cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    /// Standing on the ground; a jump may start
    Grounded,
    /// In flight
    Jumping,
}

/// Stateless-per-frame jump model
#[derive(Debug, Clone, PartialEq)]
pub struct JumpPhysics {
    params: JumpParams,
    phase: JumpPhase,
    jump_start_time: f32,
    current_time: f32,
    ground_level: f32,
}

impl JumpPhysics {
    /// Create a grounded jumper with the given constants
    pub fn new(params: JumpParams) -> Self {
        Self {
            params,
            phase: JumpPhase::Grounded,
            jump_start_time: 0.0,
            current_time: 0.0,
            ground_level: 0.0,
        }
    }

    /// Start a jump; ignored unless grounded
    pub fn initiate_jump(&mut self) {
        if self.phase == JumpPhase::Grounded {
            self.phase = JumpPhase::Jumping;
            self.jump_start_time = self.current_time;
            log::debug!("Jump started at t = {:.3}", self.current_time);
        }
    }

    /// Advance the clock and land when the curve returns to the ground
    pub fn update(&mut self, delta_time: f32) {
        self.current_time += delta_time;

        if self.phase == JumpPhase::Jumping && self.height_at(self.jump_time()) <= 0.0 {
            self.phase = JumpPhase::Grounded;
            self.jump_start_time = 0.0;
            log::debug!("Landed at t = {:.3}", self.current_time);
        }
    }

    /// Height above ground, never negative; zero when grounded
    pub fn current_vertical_displacement(&self) -> f32 {
        match self.phase {
            JumpPhase::Jumping => self.height_at(self.jump_time()).max(0.0),
            JumpPhase::Grounded => 0.0,
        }
    }

    /// Seconds since the jump started; zero when grounded
    pub fn jump_time(&self) -> f32 {
        match self.phase {
            JumpPhase::Jumping => self.current_time - self.jump_start_time,
            JumpPhase::Grounded => 0.0,
        }
    }

    /// Force the jumper back onto the ground
    pub fn reset(&mut self) {
        self.phase = JumpPhase::Grounded;
        self.jump_start_time = 0.0;
    }

    /// Current phase
    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    /// Whether a jump is in flight
    pub fn is_jumping(&self) -> bool {
        self.phase == JumpPhase::Jumping
    }

    /// Whether the jumper stands on the ground
    pub fn is_grounded(&self) -> bool {
        self.phase == JumpPhase::Grounded
    }

    /// Jump constants
    pub fn params(&self) -> &JumpParams {
        &self.params
    }

    /// Height of the ground the jumper stands on
    pub fn ground_level(&self) -> f32 {
        self.ground_level
    }

    /// Change the ground height
    pub fn set_ground_level(&mut self, level: f32) {
        self.ground_level = level;
    }

    fn height_at(&self, t: f32) -> f32 {
        self.params.initial_velocity * t - 0.5 * self.params.gravity * t * t
    }
}

impl Default for JumpPhysics {
    fn default() -> Self {
        Self::new(JumpParams::default())
    }
}
