//! Scene-level behaviour across the manager, hierarchy and registry

use std::rc::Rc;

use approx::assert_relative_eq;

use super::hierarchy::NodeOrbit;
use super::orbit::OrbitMotion;
use super::render_object::RenderObject;
use super::scene_manager::{FrameStats, SceneManager};
use crate::foundation::math::{transform_point, Vec3, Vec4};
use crate::render::backend::recording::{Call, RecordingBackend};
use crate::render::backend::{MeshHandle, ShaderHandle};
use crate::render::camera::{ActiveCamera, CameraRig};
use crate::render::context::RenderContext;
use crate::render::lighting::Light;
use crate::render::model::{Model, StaticModel};
use crate::render::overlays::{AxisGizmo, LightIndicator, Skybox};

const EPSILON: f32 = 1e-4;

fn mesh(id: u32) -> Rc<dyn Model> {
    Rc::new(StaticModel::new(MeshHandle(id)))
}

fn white() -> Vec4 {
    Vec4::new(1.0, 1.0, 1.0, 1.0)
}

#[test]
fn test_shared_object_is_rendered_once() {
    let mut scene = SceneManager::new();
    let shared = scene.add_object(RenderObject::new(mesh(1), ShaderHandle(1)));
    scene.add_object(RenderObject::new(mesh(2), ShaderHandle(1)));

    let root = scene.create_node(None);
    let node = scene.create_node(Some(shared));
    scene.add_child(root, node).expect("attach");
    scene.set_world_root(root);

    let mut backend = RecordingBackend::new();
    let stats = scene.render(&mut backend, &CameraRig::new(1.8), &RenderContext::default());

    assert_eq!(backend.draws(), vec![MeshHandle(1), MeshHandle(2)]);
    assert_eq!(stats.hierarchy_objects, 1);
    assert_eq!(stats.flat_objects, 1);
    assert_eq!(stats.skipped_shared, 1);
}

#[test]
fn test_hierarchy_transform_reaches_the_object() {
    let mut scene = SceneManager::new();
    let moon = scene.register_object(RenderObject::new(mesh(3), ShaderHandle(1)));

    let root = scene.create_node(None);
    let node = scene.create_node(Some(moon));
    scene.add_child(root, node).expect("attach");
    if let Some(n) = scene.hierarchy_mut().node_mut(root) {
        n.transform.position = Vec3::new(0.0, 0.0, 50.0);
    }
    scene.set_world_root(root);

    let mut backend = RecordingBackend::new();
    scene.render(&mut backend, &CameraRig::new(1.8), &RenderContext::default());

    let model = backend.last_mat4("model").expect("model uploaded");
    assert_relative_eq!(transform_point(&model, &Vec3::zeros()), Vec3::new(0.0, 0.0, 50.0), epsilon = EPSILON);
    assert!(scene.object(moon).map_or(false, RenderObject::is_using_hierarchical_transform));
}

#[test]
fn test_satellite_light_leads_its_body() {
    let mut scene = SceneManager::new();
    let satellite = scene.add_object(RenderObject::orbiting(mesh(4), ShaderHandle(2), OrbitMotion::new()));
    let light = scene.lights_mut().add(Light::point(Vec3::zeros(), white()), false);

    let mut indicator = LightIndicator::new(mesh(9), ShaderHandle(9));
    let marker = indicator.add_light(Vec3::zeros(), white());
    scene.set_light_indicator(indicator);
    scene.add_satellite_light(satellite, light, Some(marker));

    // Lights are placed from the orbit state before this frame's step
    let expected = scene
        .object(satellite)
        .and_then(|o| o.leading_orbit_position(0.5))
        .expect("orbiting");
    scene.update(1.0);

    let placed = scene.lights().get(light).map(|l| l.position).expect("light");
    assert_relative_eq!(placed, expected, epsilon = EPSILON);
    let shown = scene.light_indicator().and_then(|i| i.light_position(marker)).expect("marker");
    assert_relative_eq!(shown, expected, epsilon = EPSILON);
    assert_relative_eq!(scene.object(satellite).and_then(RenderObject::orbit).map_or(0.0, OrbitMotion::time), 1.0);
}

#[test]
fn test_orbit_position_at_time_zero() {
    let orbit = OrbitMotion::new()
        .with_height(4.0)
        .with_center(Vec3::new(0.0, 10.0, 0.0));
    let object = RenderObject::orbiting(mesh(4), ShaderHandle(2), orbit).with_position(Vec3::new(1.0, 0.0, -1.0));

    // Rx(90) lifts the height into +Z, then Ry(60) swings the radius
    let half_root_three = 3.0_f32.sqrt() / 2.0;
    let tilted = Vec3::new(30.0 * 0.5 + 4.0 * half_root_three, 0.0, -30.0 * half_root_three + 4.0 * 0.5);
    let expected = Vec3::new(1.0, 10.0, -1.0) + tilted;

    let position = object.current_orbit_position().expect("orbiting");
    assert_relative_eq!(position, expected, epsilon = EPSILON);
}

#[test]
fn test_orbiting_node_steps_its_orbiting_object() {
    let mut scene = SceneManager::new();
    let moon = scene.register_object(RenderObject::orbiting(mesh(5), ShaderHandle(2), OrbitMotion::new()));
    let rock = scene.register_object(RenderObject::orbiting(mesh(6), ShaderHandle(2), OrbitMotion::new()));

    let root = scene.create_node(None);
    let carrier = scene.create_orbiting_node(Some(moon), NodeOrbit::default());
    let plain = scene.create_node(Some(rock));
    scene.add_child(root, carrier).expect("attach");
    scene.add_child(carrier, plain).expect("attach");
    scene.set_world_root(root);

    scene.update(0.5);

    let time = |id| scene.object(id).and_then(RenderObject::orbit).map_or(0.0, OrbitMotion::time);
    assert_relative_eq!(time(moon), 0.5);
    assert_relative_eq!(time(rock), 0.0);
}

#[test]
fn test_light_upload_is_capped() {
    let mut scene = SceneManager::new();
    for i in 0..3 {
        scene.lights_mut().add(Light::point(Vec3::new(i as f32, 0.0, 0.0), white()), true);
    }
    let locals: Vec<usize> = (0..3)
        .map(|i| scene.lights_mut().add(Light::point(Vec3::new(0.0, i as f32, 0.0), white()), false))
        .collect();

    let mut object = RenderObject::new(mesh(1), ShaderHandle(1));
    object.set_affected_lights(&locals);
    scene.add_object(object);

    let mut backend = RecordingBackend::new();
    scene.render(&mut backend, &CameraRig::new(1.8), &RenderContext::default());

    assert_eq!(backend.last_int("numLights"), Some(4));
    assert_eq!(backend.last_vec3("allLights[3].Position"), Some(Vec3::new(0.0, 0.0, 0.0)));
    assert_eq!(backend.last_vec3("allLights[2].Position"), Some(Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn test_overlays_follow_frame_order_and_toggle() {
    let mut scene = SceneManager::new();
    scene.add_object(RenderObject::new(mesh(1), ShaderHandle(1)));
    scene.set_skybox(Skybox::new(mesh(20), ShaderHandle(20)));
    scene.set_axis_gizmo(AxisGizmo::new(mesh(21), ShaderHandle(21), Vec3::repeat(0.1), 1.0));
    let mut indicator = LightIndicator::new(mesh(22), ShaderHandle(22));
    indicator.add_light(Vec3::new(0.0, 5.0, 0.0), white());
    scene.set_light_indicator(indicator);

    let rig = CameraRig::new(1.8);
    let mut context = RenderContext::default();

    let mut backend = RecordingBackend::new();
    scene.render(&mut backend, &rig, &context);
    assert_eq!(backend.draws(), vec![MeshHandle(20), MeshHandle(1), MeshHandle(21)]);

    context.show_light_indicators = true;
    let mut backend = RecordingBackend::new();
    scene.render(&mut backend, &rig, &context);
    assert_eq!(
        backend.draws(),
        vec![MeshHandle(20), MeshHandle(1), MeshHandle(21), MeshHandle(22)]
    );
}

#[test]
fn test_render_uses_the_active_camera() {
    let mut scene = SceneManager::new();
    scene.add_object(RenderObject::new(mesh(1), ShaderHandle(1)));

    let mut rig = CameraRig::new(1.8);
    rig.follow(&Vec3::new(0.0, 0.0, 0.0), 5.0);
    let mut context = RenderContext::default();
    context.active_camera = ActiveCamera::ThirdPerson;

    let mut backend = RecordingBackend::new();
    scene.render(&mut backend, &rig, &context);

    let eye = backend.last_vec3("eye").expect("eye uploaded");
    assert_relative_eq!(eye, rig.third_person.position, epsilon = EPSILON);
    assert_eq!(backend.count(&Call::UseProgram(ShaderHandle(1))), 1);
}

#[test]
fn test_zero_width_viewport_still_renders() {
    let mut scene = SceneManager::new();
    scene.add_object(RenderObject::new(mesh(1), ShaderHandle(1)));

    let mut context = RenderContext::default();
    context.width = 0;

    let mut backend = RecordingBackend::new();
    let stats = scene.render(&mut backend, &CameraRig::new(1.8), &context);

    assert_eq!(backend.draws(), vec![MeshHandle(1)]);
    assert_eq!(stats.flat_objects, 1);
}

#[test]
fn test_degenerate_clip_planes_skip_the_frame() {
    let mut scene = SceneManager::new();
    scene.add_object(RenderObject::new(mesh(1), ShaderHandle(1)));
    scene.set_skybox(Skybox::new(mesh(20), ShaderHandle(20)));

    let rig = CameraRig::new(1.8);
    let mut context = RenderContext::default();
    context.near_plane = 1.0;
    context.far_plane = 1.0;
    assert!(scene.frame_context(&rig, &context).is_none());

    let mut backend = RecordingBackend::new();
    let stats = scene.render(&mut backend, &rig, &context);
    assert!(backend.draws().is_empty());
    assert_eq!(stats, FrameStats::default());

    context.far_plane = f32::INFINITY;
    assert!(scene.frame_context(&rig, &context).is_none());
}

#[test]
fn test_orbiting_node_renders_plain_object_on_its_orbit() {
    let mut scene = SceneManager::new();
    let rock = scene.register_object(RenderObject::new(mesh(8), ShaderHandle(1)));

    let orbit = NodeOrbit::default()
        .with_parameters(1.0, 5.0, 1.0)
        .with_angles(Vec3::new(0.0, 90.0, 0.0))
        .with_center(Vec3::new(0.0, 2.0, 0.0));
    let node = scene.create_orbiting_node(Some(rock), orbit);
    scene.set_world_root(node);

    // A quarter turn puts the rock at +Z, then Ry(90) swings it onto +X
    scene.update(std::f32::consts::FRAC_PI_2);

    let mut backend = RecordingBackend::new();
    let stats = scene.render(&mut backend, &CameraRig::new(1.8), &RenderContext::default());

    let model = backend.last_mat4("model").expect("model uploaded");
    assert_relative_eq!(transform_point(&model, &Vec3::zeros()), Vec3::new(5.0, 2.0, 0.0), epsilon = EPSILON);
    assert_eq!(backend.draws(), vec![MeshHandle(8)]);
    assert_eq!(stats.hierarchy_objects, 1);
    assert!(scene.object(rock).map_or(false, RenderObject::is_using_hierarchical_transform));
}
