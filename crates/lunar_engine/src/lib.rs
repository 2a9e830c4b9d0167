//! # Lunar Engine
//!
//! Scene composition and lighting assignment for a small moon-base renderer.
//!
//! ## Features
//!
//! - **Indexed Lighting**: a light registry with global lights and per-object local lights
//! - **Render Objects**: static, skinned (with jump physics) and orbiting bodies
//! - **Transform Hierarchy**: parent-relative and orbital motion in a node arena
//! - **Procedural Scenery**: seeded placement with minimum spacing
//! - **Backend Agnostic**: every draw goes through the [`render::GraphicsBackend`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lunar_engine::prelude::*;
//! use std::rc::Rc;
//!
//! fn frame(backend: &mut dyn GraphicsBackend) -> Result<(), HierarchyError> {
//!     let mut scene = SceneManager::new();
//!     scene.lights_mut().add(Light::point(Vec3::new(0.0, 100.0, 0.0), Vec4::repeat(1.0)), true);
//!
//!     let planet = scene.add_object(RenderObject::new(Rc::new(StaticModel::new(MeshHandle(0))), ShaderHandle(0)));
//!     let root = scene.create_node(Some(planet));
//!     let moon = scene.register_object(RenderObject::new(Rc::new(StaticModel::new(MeshHandle(1))), ShaderHandle(0)));
//!     let orbit = scene.create_orbiting_node(Some(moon), NodeOrbit::default());
//!     scene.add_child(root, orbit)?;
//!     scene.set_world_root(root);
//!
//!     scene.update(0.016);
//!     scene.render(backend, &CameraRig::new(1.8), &RenderContext::default());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat},
        core::{DisplayConfig, EngineConfig, GeneratorConfig, InputConfig, JumpParams, LightingConfig, SceneConfig},
        foundation::{
            collections::{NodeId, ObjectId},
            math::{Mat4, Mat4Ext, Transform, Vec3, Vec4},
        },
        input::{InputController, InputState, KeyCode, PlayerState},
        physics::{JumpPhase, JumpPhysics},
        render::{
            ActiveCamera, Camera, CameraProvider, CameraRig, GraphicsBackend, Light, LightIndicator, LightRegistry,
            Material, MeshHandle, Model, PosedModel, RenderContext, ShaderHandle, SkinnedModel, StaticModel,
            AxisGizmo, Skybox,
        },
        scene::{
            FrameStats, GenerationReport, HierarchyError, NodeOrbit, ObjectGenerator, ObjectTemplate, OrbitMotion,
            PlacementArea, PlacementRequest, RenderCapabilities, RenderObject, SceneManager,
        },
    };
}
