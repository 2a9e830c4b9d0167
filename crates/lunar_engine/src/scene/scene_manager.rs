//! # Scene Manager
//!
//! Owns every render object, the light registry, the transform hierarchy and
//! the satellite light bindings, and runs the per-frame update and render
//! passes over them.
//!
//! ## Ownership
//!
//! Objects live in a single store keyed by [`ObjectId`]. The *flat list* is the
//! ordered subset updated and drawn directly each frame; hierarchy nodes refer
//! to objects by the same keys. An object may be in both. It is then updated
//! by both paths but drawn only once, by the hierarchy.
//!
//! ## Frame order
//!
//! `update`: satellite lights → flat-list objects → hierarchy.
//! `render`: background → hierarchy → remaining flat-list objects → axis gizmo
//! → light indicators (when enabled).

use std::collections::HashSet;

use crate::core::config::LightingConfig;
use crate::foundation::collections::{NodeId, ObjectId, ObjectStore};
use crate::foundation::math::{perspective, Mat4};
use crate::render::backend::GraphicsBackend;
use crate::render::camera::{CameraProvider, CameraRig};
use crate::render::context::RenderContext;
use crate::render::lighting::LightRegistry;
use crate::render::material::Material;
use crate::render::overlays::{AxisGizmo, LightIndicator, Skybox};

use super::hierarchy::{Hierarchy, HierarchyError, NodeOrbit};
use super::render_object::{FrameContext, RenderCapabilities, RenderObject};

/// A registry light that rides ahead of an orbiting object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatelliteLight {
    /// The orbiting object
    pub satellite: ObjectId,
    /// Index of the light in the registry
    pub light_index: usize,
    /// Index of the light's marker in the light indicator
    pub indicator_index: Option<usize>,
}

/// Draw counts of one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Objects reached through the hierarchy
    pub hierarchy_objects: usize,
    /// Flat-list objects drawn directly
    pub flat_objects: usize,
    /// Flat-list objects skipped because the hierarchy drew them
    pub skipped_shared: usize,
}

/// Scene controller
pub struct SceneManager {
    objects: ObjectStore<RenderObject>,
    flat_list: Vec<ObjectId>,
    lights: LightRegistry,
    default_material: Material,
    hierarchy: Hierarchy,
    world_root: Option<NodeId>,
    satellites: Vec<SatelliteLight>,
    satellite_lead_angle: f32,
    skybox: Option<Skybox>,
    axis_gizmo: Option<AxisGizmo>,
    light_indicator: Option<LightIndicator>,
}

impl SceneManager {
    /// Create an empty scene with default lighting settings
    pub fn new() -> Self {
        Self::with_lighting(&LightingConfig::default())
    }

    /// Create an empty scene
    pub fn with_lighting(lighting: &LightingConfig) -> Self {
        Self {
            objects: ObjectStore::with_key(),
            flat_list: Vec::new(),
            lights: LightRegistry::new(),
            default_material: Material::default(),
            hierarchy: Hierarchy::new(),
            world_root: None,
            satellites: Vec::new(),
            satellite_lead_angle: lighting.satellite_lead_angle,
            skybox: None,
            axis_gizmo: None,
            light_indicator: None,
        }
    }

    /// Store an object and append it to the flat list
    pub fn add_object(&mut self, object: RenderObject) -> ObjectId {
        let id = self.objects.insert(object);
        self.flat_list.push(id);
        id
    }

    /// Store an object without adding it to the flat list
    ///
    /// Use this for objects that are only reached through hierarchy nodes.
    pub fn register_object(&mut self, object: RenderObject) -> ObjectId {
        self.objects.insert(object)
    }

    /// Object by key
    pub fn object(&self, id: ObjectId) -> Option<&RenderObject> {
        self.objects.get(id)
    }

    /// Mutable object by key
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut RenderObject> {
        self.objects.get_mut(id)
    }

    /// Keys of the flat list in insertion order
    pub fn flat_list(&self) -> &[ObjectId] {
        &self.flat_list
    }

    /// Number of stored objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Light registry
    pub fn lights(&self) -> &LightRegistry {
        &self.lights
    }

    /// Mutable light registry
    pub fn lights_mut(&mut self) -> &mut LightRegistry {
        &mut self.lights
    }

    /// Material new objects usually start from
    pub fn default_material(&self) -> &Material {
        &self.default_material
    }

    /// Mutable default material
    pub fn default_material_mut(&mut self) -> &mut Material {
        &mut self.default_material
    }

    /// Transform hierarchy
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Mutable transform hierarchy
    pub fn hierarchy_mut(&mut self) -> &mut Hierarchy {
        &mut self.hierarchy
    }

    /// Create a plain hierarchy node positioning `object`
    pub fn create_node(&mut self, object: Option<ObjectId>) -> NodeId {
        self.hierarchy.create_node(object)
    }

    /// Create an orbiting hierarchy node positioning `object`
    ///
    /// When `object` is itself an orbiting render object, the node steps it
    /// during hierarchy updates.
    pub fn create_orbiting_node(&mut self, object: Option<ObjectId>, orbit: NodeOrbit) -> NodeId {
        let forwards_update = object
            .and_then(|id| self.objects.get(id))
            .is_some_and(|o| o.capabilities().contains(RenderCapabilities::ORBIT));
        self.hierarchy.create_orbiting_node(object, orbit, forwards_update)
    }

    /// Attach `child` under `parent`
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HierarchyError> {
        self.hierarchy.add_child(parent, child)
    }

    /// Choose the node the hierarchy passes start from
    pub fn set_world_root(&mut self, root: NodeId) {
        self.world_root = Some(root);
    }

    /// Root of the hierarchy passes
    pub fn world_root(&self) -> Option<NodeId> {
        self.world_root
    }

    /// Make light `light_index` follow `satellite` every frame
    pub fn add_satellite_light(&mut self, satellite: ObjectId, light_index: usize, indicator_index: Option<usize>) {
        self.satellites.push(SatelliteLight {
            satellite,
            light_index,
            indicator_index,
        });
    }

    /// Current satellite bindings
    pub fn satellite_lights(&self) -> &[SatelliteLight] {
        &self.satellites
    }

    /// Set the background
    pub fn set_skybox(&mut self, skybox: Skybox) {
        self.skybox = Some(skybox);
    }

    /// Set the axis gizmo
    pub fn set_axis_gizmo(&mut self, gizmo: AxisGizmo) {
        self.axis_gizmo = Some(gizmo);
    }

    /// Set the light indicator
    pub fn set_light_indicator(&mut self, indicator: LightIndicator) {
        self.light_indicator = Some(indicator);
    }

    /// Light indicator
    pub fn light_indicator(&self) -> Option<&LightIndicator> {
        self.light_indicator.as_ref()
    }

    /// Mutable light indicator
    pub fn light_indicator_mut(&mut self) -> Option<&mut LightIndicator> {
        self.light_indicator.as_mut()
    }

    /// Advance the scene by one frame
    ///
    /// Satellite lights are placed from the orbit state of the previous frame,
    /// before any object moves.
    pub fn update(&mut self, delta_time: f32) {
        for binding in &self.satellites {
            let Some(position) = self
                .objects
                .get(binding.satellite)
                .and_then(|o| o.leading_orbit_position(self.satellite_lead_angle))
            else {
                continue;
            };
            self.lights.update_position(binding.light_index, position);
            if let (Some(indicator), Some(index)) = (self.light_indicator.as_mut(), binding.indicator_index) {
                indicator.update_light_position(index, position);
            }
        }

        for &id in &self.flat_list {
            if let Some(object) = self.objects.get_mut(id) {
                object.update(delta_time);
            }
        }

        if let Some(root) = self.world_root {
            self.hierarchy.update(root, delta_time, &mut self.objects);
        }
    }

    /// Camera matrices for this frame
    ///
    /// `None` when the clip planes cannot form a projection (equal or
    /// non-finite near and far).
    pub fn frame_context(&self, rig: &CameraRig, context: &RenderContext) -> Option<FrameContext> {
        let (near, far) = (context.near_plane, context.far_plane);
        if !near.is_finite() || !far.is_finite() || (far - near).abs() <= f32::EPSILON {
            return None;
        }
        let camera = rig.camera(context.active_camera);
        Some(FrameContext {
            projection: perspective(camera.zoom(), context.aspect_ratio(), near, far),
            view: camera.view_matrix(),
            eye: camera.eye_position(),
        })
    }

    /// Draw the scene from the active camera
    ///
    /// Nothing is drawn when [`SceneManager::frame_context`] yields no frame.
    pub fn render(&mut self, backend: &mut dyn GraphicsBackend, rig: &CameraRig, context: &RenderContext) -> FrameStats {
        let Some(frame) = self.frame_context(rig, context) else {
            log::warn!(
                "Skipping frame: degenerate clip planes near = {}, far = {}",
                context.near_plane,
                context.far_plane
            );
            return FrameStats::default();
        };
        let mut stats = FrameStats::default();

        if let Some(skybox) = &self.skybox {
            skybox.draw(backend, &frame.projection, &frame.view);
        }

        let mut drawn_by_hierarchy = HashSet::new();
        if let Some(root) = self.world_root {
            drawn_by_hierarchy = self.hierarchy.collect_objects(root);
            stats.hierarchy_objects = drawn_by_hierarchy.len();
            self.hierarchy.render(
                root,
                &Mat4::identity(),
                &mut self.objects,
                &self.lights,
                backend,
                &frame,
            );
        }

        for &id in &self.flat_list {
            if drawn_by_hierarchy.contains(&id) {
                stats.skipped_shared += 1;
                continue;
            }
            if let Some(object) = self.objects.get(id) {
                object.render(backend, &self.lights, &frame);
                stats.flat_objects += 1;
            }
        }

        if let Some(gizmo) = &self.axis_gizmo {
            gizmo.draw(backend, &frame.projection, &frame.view);
        }

        if context.show_light_indicators {
            if let Some(indicator) = &self.light_indicator {
                indicator.draw(backend, &frame.projection, &frame.view);
            }
        }

        log::trace!("Rendered frame: {:?}", stats);
        stats
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}
