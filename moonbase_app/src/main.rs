//! Moon-base demo application
//!
//! Builds a small lunar scene (a planet with an orbiting moon, satellites
//! carrying leading lights, a jumping astronaut and scattered rocks) and runs
//! it headless through a logging graphics backend with scripted input.
//!
//! Usage: `moonbase_demo [config.toml|config.ron] [frames]`

use std::cell::RefCell;
use std::rc::Rc;

use lunar_engine::config::{Config, ConfigError};
use lunar_engine::core::SceneConfig;
use lunar_engine::foundation::logging;
use lunar_engine::foundation::math::{Mat4, Vec3, Vec4};
use lunar_engine::input::{InputController, InputState, KeyCode, PlayerState};
use lunar_engine::physics::JumpPhysics;
use lunar_engine::render::{
    AxisGizmo, CameraRig, GraphicsBackend, Light, LightBlock, LightIndicator, Material, MeshHandle, PosedModel,
    RenderContext, ShaderHandle, Skybox, StaticModel,
};
use lunar_engine::scene::{
    HierarchyError, NodeOrbit, ObjectGenerator, ObjectTemplate, OrbitMotion, PlacementArea, PlacementRequest,
    RenderObject, SceneManager,
};
use thiserror::Error;

const DEFAULT_FRAMES: u32 = 240;
const FRAME_TIME: f32 = 1.0 / 60.0;
const EYE_HEIGHT: f32 = 1.7;

const PHONG_SHADER: ShaderHandle = ShaderHandle(1);
const SKINNED_SHADER: ShaderHandle = ShaderHandle(2);
const ORBIT_SHADER: ShaderHandle = ShaderHandle(3);
const OVERLAY_SHADER: ShaderHandle = ShaderHandle(4);
const SKYBOX_SHADER: ShaderHandle = ShaderHandle(5);

/// Demo failures
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scene graph could not be assembled
    #[error("scene setup error: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// Bad command line argument
    #[error("invalid argument '{0}'")]
    Argument(String),
}

/// Backend that only counts and traces what it is asked to do
///
/// Lights arrive as one uniform block per draw.
#[derive(Debug, Default)]
struct LogBackend {
    program: Option<ShaderHandle>,
    draws: usize,
    uniform_writes: usize,
}

impl LogBackend {
    fn begin_frame(&mut self) {
        self.draws = 0;
        self.uniform_writes = 0;
    }

    fn uniform(&mut self, name: &str) {
        self.uniform_writes += 1;
        log::trace!("{:?} <- {}", self.program, name);
    }
}

impl GraphicsBackend for LogBackend {
    fn use_program(&mut self, shader: ShaderHandle) {
        self.program = Some(shader);
    }

    fn unbind_program(&mut self) {
        self.program = None;
    }

    fn enable_alpha_blending(&mut self) {
        log::trace!("blending on");
    }

    fn clear_texture_unit(&mut self, unit: u32) {
        log::trace!("texture unit {} cleared", unit);
    }

    fn set_int(&mut self, name: &str, _value: i32) {
        self.uniform(name);
    }

    fn set_bool(&mut self, name: &str, _value: bool) {
        self.uniform(name);
    }

    fn set_float(&mut self, name: &str, _value: f32) {
        self.uniform(name);
    }

    fn set_vec3(&mut self, name: &str, _value: &Vec3) {
        self.uniform(name);
    }

    fn set_vec4(&mut self, name: &str, _value: &Vec4) {
        self.uniform(name);
    }

    fn set_mat4(&mut self, name: &str, _value: &Mat4) {
        self.uniform(name);
    }

    fn set_mat4_array(&mut self, name: &str, _values: &[Mat4]) {
        self.uniform(name);
    }

    fn draw_mesh(&mut self, mesh: MeshHandle) {
        self.draws += 1;
        log::trace!("draw {:?} with {:?}", mesh, self.program);
    }

    fn set_light_block(&mut self, block: &LightBlock) -> bool {
        self.uniform("lightBlock");
        log::trace!("{} lights in {} bytes", block.count, block.as_bytes().len());
        true
    }
}

struct MoonbaseDemo {
    scene: SceneManager,
    rig: CameraRig,
    context: RenderContext,
    controller: InputController,
    player: PlayerState,
    backend: LogBackend,
}

impl MoonbaseDemo {
    fn new(config: &SceneConfig) -> Result<Self, AppError> {
        log::info!("Building moon-base scene...");
        let mut scene = SceneManager::with_lighting(&config.lighting);

        let sphere = Rc::new(StaticModel::new(MeshHandle(1)));
        let rock = Rc::new(StaticModel::new(MeshHandle(2)));
        let satellite_mesh = Rc::new(StaticModel::new(MeshHandle(3)));
        let marker = Rc::new(StaticModel::new(MeshHandle(4)));

        scene
            .lights_mut()
            .add(Light::point(Vec3::new(0.0, 500.0, 0.0), Vec4::new(1.0, 0.95, 0.9, 1.0)), true);

        // Planet at the root, a moon circling it on an orbiting node
        let planet = scene.add_object(
            RenderObject::new(sphere.clone(), PHONG_SHADER)
                .with_position(Vec3::new(0.0, -60.0, 0.0))
                .with_scale(Vec3::repeat(50.0)),
        );
        let root = scene.create_node(Some(planet));
        let moon = scene.register_object(
            RenderObject::orbiting(sphere, ORBIT_SHADER, OrbitMotion::new().with_parameters(0.05, 0.0, 1.0))
                .with_scale(Vec3::repeat(8.0))
                .with_material(Material::new().with_transparency(0.9)),
        );
        let moon_node = scene.create_orbiting_node(Some(moon), NodeOrbit::default().with_center(Vec3::new(0.0, 80.0, 0.0)));
        scene.add_child(root, moon_node)?;
        scene.set_world_root(root);

        // Satellites with lights riding ahead of them
        let mut indicator = LightIndicator::new(marker, OVERLAY_SHADER);
        let mut satellite_lights = Vec::new();
        for (i, color) in [Vec4::new(0.4, 0.6, 1.0, 1.0), Vec4::new(1.0, 0.5, 0.3, 1.0)].into_iter().enumerate() {
            let orbit = OrbitMotion::new()
                .with_parameters(0.2 + 0.1 * i as f32, 30.0 + 15.0 * i as f32, 0.6)
                .with_height(10.0);
            let satellite = scene.add_object(RenderObject::orbiting(satellite_mesh.clone(), ORBIT_SHADER, orbit));
            let light = scene.lights_mut().add(Light::point(Vec3::zeros(), color).with_distance(40.0), false);
            let index = indicator.add_light(Vec3::zeros(), color);
            scene.add_satellite_light(satellite, light, Some(index));
            satellite_lights.push(light);
        }
        scene.set_light_indicator(indicator);

        // Astronaut following the player
        let physics = Rc::new(RefCell::new(JumpPhysics::new(config.jump)));
        let player = PlayerState::new(Vec3::zeros(), 0.0).with_physics(Rc::clone(&physics));
        let mut astronaut = RenderObject::skinned(Box::new(PosedModel::new(MeshHandle(5), 31)), SKINNED_SHADER, Some(physics))
            .following_position(Rc::clone(&player.position))
            .following_rotation(Rc::clone(&player.yaw))
            .with_initial_rotation(Vec3::new(-90.0, 0.0, 0.0));
        astronaut.set_affected_lights(&satellite_lights);
        scene.add_object(astronaut);

        // Scenery
        let mut generator = ObjectGenerator::from_config(&config.generator);
        let template = ObjectTemplate::new(rock, PHONG_SHADER);
        let request = PlacementRequest::from_config(PlacementArea::new(-100.0, 100.0, -100.0, 100.0, 0.0), 40, &config.generator);
        let report = generator.generate_objects(&mut scene, &template, &request);
        for id in &report.objects {
            if let Some(object) = scene.object_mut(*id) {
                object.set_affected_lights(&satellite_lights);
            }
        }

        scene.set_skybox(Skybox::new(Rc::new(StaticModel::new(MeshHandle(6))), SKYBOX_SHADER));
        scene.set_axis_gizmo(AxisGizmo::new(
            Rc::new(StaticModel::new(MeshHandle(7))),
            OVERLAY_SHADER,
            Vec3::repeat(0.1),
            1.0,
        ));

        log::info!(
            "Scene ready: {} objects, {} lights ({} global), {} rocks placed",
            scene.object_count(),
            scene.lights().count(),
            scene.lights().global_count(),
            report.placed
        );

        Ok(Self {
            scene,
            rig: CameraRig::new(EYE_HEIGHT),
            context: RenderContext::from_config(&config.display, &config.input, &config.lighting),
            controller: InputController::new(&config.input),
            player,
            backend: LogBackend::default(),
        })
    }

    /// Keys held on a given frame of the scripted walk
    fn scripted_input(frame: u32) -> InputState {
        let mut keys = Vec::new();
        if frame < 120 {
            keys.push(KeyCode::W);
        }
        if (60..90).contains(&frame) {
            keys.push(KeyCode::LeftShift);
            keys.push(KeyCode::Left);
        }
        if frame == 30 {
            keys.push(KeyCode::Space);
        }
        if frame == 150 {
            keys.push(KeyCode::C);
        }
        if frame == 180 {
            keys.push(KeyCode::L);
        }
        keys.into_iter().collect()
    }

    fn run(&mut self, frames: u32) {
        log::info!("Running {} frames", frames);
        for frame in 0..frames {
            let input = Self::scripted_input(frame);
            let moving = self
                .controller
                .process_keyboard(&input, &mut self.player, &mut self.rig, &mut self.context);
            if frame == 200 {
                self.controller
                    .process_scroll(-2.0, &mut self.player, &mut self.rig, &self.context);
            }
            self.rig
                .follow(&self.player.position.get(), self.player.third_person_offset);

            self.scene.update(FRAME_TIME);
            self.backend.begin_frame();
            let stats = self.scene.render(&mut self.backend, &self.rig, &self.context);

            if frame % 60 == 0 {
                log::info!(
                    "frame {}: {:?}, {} draws, {} uniforms, player at {:?} (moving: {})",
                    frame,
                    stats,
                    self.backend.draws,
                    self.backend.uniform_writes,
                    self.player.position.get(),
                    moving
                );
            }
            if self.context.exit_requested {
                log::info!("Exit requested at frame {}", frame);
                break;
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => SceneConfig::load_from_file(path).map_err(AppError::from)?,
        None => SceneConfig::default(),
    };
    let frames = match args.next() {
        Some(arg) => arg.parse().map_err(|_| AppError::Argument(arg))?,
        None => DEFAULT_FRAMES,
    };

    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting moon-base demo");

    let mut demo = MoonbaseDemo::new(&config)?;
    demo.run(frames);

    log::info!("Moon-base demo finished successfully");
    Ok(())
}
