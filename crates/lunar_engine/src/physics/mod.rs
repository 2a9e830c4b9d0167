//! Physics module
//!
//! Only kinematics the render path consumes directly; there is no collision
//! detection or response.

pub mod jump;

pub use jump::{JumpPhase, JumpPhysics};
