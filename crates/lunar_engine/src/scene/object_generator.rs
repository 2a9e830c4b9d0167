//! Procedural scenery placement
//!
//! Scatters copies of a template over a rectangle in the XZ plane with
//! rejection sampling on a minimum planar spacing. Placement, orientation,
//! scale and material variation all come from one seeded generator, so a fixed
//! seed reproduces the same layout.

use std::rc::Rc;

use rand::prelude::*;

use super::render_object::RenderObject;
use super::scene_manager::SceneManager;
use crate::core::config::GeneratorConfig;
use crate::foundation::collections::ObjectId;
use crate::foundation::math::{utils, Vec3};
use crate::render::backend::ShaderHandle;
use crate::render::material::Material;
use crate::render::model::Model;

/// Range of the per-colour material variation factors
const MATERIAL_VARIATION: std::ops::RangeInclusive<f32> = 0.7..=1.3;

/// Default yaw options in degrees
pub const DEFAULT_ROTATIONS: [f32; 4] = [0.0, 90.0, 180.0, 270.0];

/// Default uniform scale options
pub const DEFAULT_SCALES: [f32; 5] = [0.8, 0.9, 1.0, 1.1, 1.2];

/// Rectangle in the XZ plane at a fixed height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementArea {
    /// Lower X bound
    pub x_min: f32,
    /// Upper X bound
    pub x_max: f32,
    /// Lower Z bound
    pub z_min: f32,
    /// Upper Z bound
    pub z_max: f32,
    /// Y of every placed object
    pub height: f32,
}

impl PlacementArea {
    /// Create an area
    pub fn new(x_min: f32, x_max: f32, z_min: f32, z_max: f32, height: f32) -> Self {
        Self {
            x_min,
            x_max,
            z_min,
            z_max,
            height,
        }
    }

    /// Finite, non-inverted bounds whose extents also fit in an `f32`
    fn is_valid(&self) -> bool {
        let bounds = [self.x_min, self.x_max, self.z_min, self.z_max, self.height];
        bounds.iter().all(|v| v.is_finite())
            && self.x_min <= self.x_max
            && self.z_min <= self.z_max
            && (self.x_max - self.x_min).is_finite()
            && (self.z_max - self.z_min).is_finite()
    }
}

/// What every generated object is built from
#[derive(Clone)]
pub struct ObjectTemplate {
    /// Model shared by all copies
    pub model: Rc<dyn Model>,
    /// Shader shared by all copies
    pub shader: ShaderHandle,
    /// Material the variations start from
    pub base_material: Material,
    /// Orientation before the random yaw is added
    pub initial_rotation: Vec3,
}

impl ObjectTemplate {
    /// Template with the default material and a (-90, 0, 0) base orientation
    pub fn new(model: Rc<dyn Model>, shader: ShaderHandle) -> Self {
        Self {
            model,
            shader,
            base_material: Material::default(),
            initial_rotation: Vec3::new(-90.0, 0.0, 0.0),
        }
    }

    /// Set the material the variations start from
    pub fn with_material(mut self, material: Material) -> Self {
        self.base_material = material;
        self
    }

    /// Set the base orientation
    pub fn with_initial_rotation(mut self, rotation: Vec3) -> Self {
        self.initial_rotation = rotation;
        self
    }
}

/// Parameters of one batch
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    /// Where objects go
    pub area: PlacementArea,
    /// How many to place
    pub count: usize,
    /// Minimum planar distance between two objects of this batch
    pub min_spacing: f32,
    /// Yaw options in degrees
    pub rotations: Vec<f32>,
    /// Uniform scale options
    pub scales: Vec<f32>,
    /// Candidates tried per object before it is skipped
    pub max_attempts: u32,
}

impl PlacementRequest {
    /// Request with the default rotation and scale sets and 10 attempts
    pub fn new(area: PlacementArea, count: usize, min_spacing: f32) -> Self {
        Self {
            area,
            count,
            min_spacing,
            rotations: DEFAULT_ROTATIONS.to_vec(),
            scales: DEFAULT_SCALES.to_vec(),
            max_attempts: 10,
        }
    }

    /// Request shaped by a generator configuration
    pub fn from_config(area: PlacementArea, count: usize, config: &GeneratorConfig) -> Self {
        Self {
            area,
            count,
            min_spacing: config.min_spacing,
            rotations: config.rotations.clone(),
            scales: config.scales.clone(),
            max_attempts: config.max_attempts,
        }
    }
}

/// Outcome of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Objects asked for
    pub requested: usize,
    /// Objects placed
    pub placed: usize,
    /// Objects skipped after running out of attempts
    pub skipped: usize,
    /// Keys of the placed objects in placement order
    pub objects: Vec<ObjectId>,
}

/// Seeded scenery scatterer
#[derive(Debug, Clone)]
pub struct ObjectGenerator {
    rng: StdRng,
}

impl ObjectGenerator {
    /// Create a generator with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from configuration
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.seed)
    }

    /// Restart the random sequence
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Place a batch of objects into the scene's flat list
    ///
    /// Empty option sets or an inverted or unbounded area yield an empty
    /// report. Objects that find no free spot within `max_attempts` are
    /// skipped.
    pub fn generate_objects(
        &mut self,
        scene: &mut SceneManager,
        template: &ObjectTemplate,
        request: &PlacementRequest,
    ) -> GenerationReport {
        let mut report = GenerationReport {
            requested: request.count,
            ..GenerationReport::default()
        };

        if request.rotations.is_empty() || request.scales.is_empty() {
            log::error!("Object generation needs at least one rotation and one scale option");
            return report;
        }
        if !request.area.is_valid() {
            log::error!("Object generation area is inverted or unbounded: {:?}", request.area);
            return report;
        }

        let mut placed_positions: Vec<Vec3> = Vec::with_capacity(request.count);

        for index in 0..request.count {
            let Some(position) = self.find_position(&placed_positions, request) else {
                log::warn!(
                    "Skipping object {} after {} placement attempts",
                    index,
                    request.max_attempts
                );
                report.skipped += 1;
                continue;
            };
            placed_positions.push(position);

            let object = self.build_object(template, request, position);
            report.objects.push(scene.add_object(object));
            report.placed += 1;

            if report.placed % 10 == 0 {
                log::info!("Generated {}/{} objects", report.placed, request.count);
            }
        }

        log::info!(
            "Object generation finished: {} placed, {} skipped of {}",
            report.placed,
            report.skipped,
            report.requested
        );
        report
    }

    /// Place a batch with the default rotation and scale sets
    pub fn generate_objects_simple(
        &mut self,
        scene: &mut SceneManager,
        template: &ObjectTemplate,
        area: PlacementArea,
        count: usize,
        min_spacing: f32,
    ) -> GenerationReport {
        let request = PlacementRequest::new(area, count, min_spacing);
        self.generate_objects(scene, template, &request)
    }

    fn find_position(&mut self, placed: &[Vec3], request: &PlacementRequest) -> Option<Vec3> {
        let area = &request.area;
        for _ in 0..request.max_attempts {
            let candidate = Vec3::new(
                self.rng.gen_range(area.x_min..=area.x_max),
                area.height,
                self.rng.gen_range(area.z_min..=area.z_max),
            );
            let clear = placed
                .iter()
                .all(|p| utils::planar_distance(p, &candidate) >= request.min_spacing);
            if clear {
                return Some(candidate);
            }
            let reseed = self.rng.next_u64().wrapping_add(1);
            self.rng = StdRng::seed_from_u64(reseed);
        }
        None
    }

    fn build_object(&mut self, template: &ObjectTemplate, request: &PlacementRequest, position: Vec3) -> RenderObject {
        let yaw = request.rotations.choose(&mut self.rng).copied().unwrap_or(0.0);
        let scale = request.scales.choose(&mut self.rng).copied().unwrap_or(1.0);
        let material = template.base_material.varied(
            self.rng.gen_range(MATERIAL_VARIATION),
            self.rng.gen_range(MATERIAL_VARIATION),
            self.rng.gen_range(MATERIAL_VARIATION),
        );

        let mut initial_rotation = template.initial_rotation;
        initial_rotation.y += yaw;

        RenderObject::new(Rc::clone(&template.model), template.shader)
            .with_position(position)
            .with_scale(Vec3::repeat(scale))
            .with_initial_rotation(initial_rotation)
            .with_material(material)
    }
}

impl Default for ObjectGenerator {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::default())
    }
}
