//! # Rendering
//!
//! API-agnostic pieces of the render path: the backend trait the scene
//! issues calls through, drawable model interfaces, materials, indexed
//! lighting, cameras and debug overlays.
//!
//! ## Architecture
//!
//! - **Backend**: program binding, blend state, named uniforms and draws
//! - **Lighting**: the light registry and its globals-first upload order
//! - **Cameras**: view/zoom/eye providers and the player camera rig
//! - **Context**: viewport, live camera and debug toggles
//! - **Overlays**: light markers, axis gizmo and skybox

pub mod backend;
pub mod camera;
pub mod context;
pub mod lighting;
pub mod material;
pub mod model;
pub mod overlays;

pub use backend::{uniforms, GraphicsBackend, MeshHandle, ShaderHandle};
pub use camera::{ActiveCamera, Camera, CameraProvider, CameraRig};
pub use context::RenderContext;
pub use lighting::{Light, LightBlock, LightRegistry, LightUniform, MAX_ACTIVE_LIGHTS};
pub use material::Material;
pub use model::{Model, PosedModel, SkinnedModel, StaticModel, MAX_BONES};
pub use overlays::{AxisGizmo, LightIndicator, Skybox};
