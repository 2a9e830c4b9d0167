//! Scene composition
//!
//! Render objects and their capabilities, the transform hierarchy, scenery
//! generation and the scene manager that ties them to the light registry.
//!
//! ## Architecture
//!
//! ```text
//! SceneManager
//!   ├── object store ── flat list (updated + drawn directly)
//!   ├── Hierarchy ───── nodes refer to objects by key
//!   ├── LightRegistry ─ satellite bindings move lights each frame
//!   └── overlays
//! ```

pub mod animation;
pub mod hierarchy;
pub mod object_generator;
pub mod orbit;
pub mod render_object;
pub mod scene_manager;

#[cfg(test)]
mod tests;

pub use animation::SkinnedAnimation;
pub use hierarchy::{Hierarchy, HierarchyError, HierarchyNode, NodeKind, NodeOrbit};
pub use object_generator::{GenerationReport, ObjectGenerator, ObjectTemplate, PlacementArea, PlacementRequest};
pub use orbit::OrbitMotion;
pub use render_object::{Behavior, FrameContext, RenderCapabilities, RenderObject};
pub use scene_manager::{FrameStats, SatelliteLight, SceneManager};
