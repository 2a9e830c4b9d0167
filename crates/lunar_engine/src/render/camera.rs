//! # Cameras
//!
//! A [`Camera`] is a position plus a viewing direction (`front`), an up vector
//! and a vertical zoom angle. The scene does not care how a camera got where
//! it is; it only asks a [`CameraProvider`] for the view matrix, the zoom used
//! to build the projection and the eye position used for specular lighting.
//!
//! The player carries two cameras, bundled in a [`CameraRig`]: one at eye
//! height for first person and one trailing behind for third person. Which one
//! drives the frame is an [`ActiveCamera`] value stored in the render context.

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Default vertical field of view in degrees
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Anything the render pass can take a view from
pub trait CameraProvider {
    /// World-to-view transform
    fn view_matrix(&self) -> Mat4;

    /// Vertical field of view in degrees
    fn zoom(&self) -> f32;

    /// Eye position in world space
    fn eye_position(&self) -> Vec3;
}

/// Free camera defined by position and viewing direction
///
/// # Coordinate System
/// Right-handed and Y-up; `front` does not need to be normalized when passed
/// in, it is normalized on assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Unit viewing direction
    front: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in degrees
    pub zoom: f32,
}

impl Camera {
    /// Create a camera at `position` looking down +Z
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            front: Vec3::new(0.0, 0.0, 1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            zoom: DEFAULT_ZOOM,
        }
    }

    /// Builder pattern: Set the field of view in degrees
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Current viewing direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Point the camera along `front`; zero vectors are ignored
    pub fn set_front(&mut self, front: Vec3) {
        if let Some(unit) = front.try_normalize(f32::EPSILON) {
            self.front = unit;
            log::trace!("Camera front updated to: {:?}", unit);
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}

impl CameraProvider for Camera {
    fn view_matrix(&self) -> Mat4 {
        let eye = Point3::from(self.position);
        let target = Point3::from(self.position + self.front);
        Mat4::look_at_rh(&eye, &target, &self.up)
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn eye_position(&self) -> Vec3 {
        self.position
    }
}

/// Which of the rig's cameras drives the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveCamera {
    /// Camera at the player's eyes
    #[default]
    FirstPerson,
    /// Camera trailing behind the player
    ThirdPerson,
}

impl ActiveCamera {
    /// The other camera
    pub fn toggled(self) -> Self {
        match self {
            Self::FirstPerson => Self::ThirdPerson,
            Self::ThirdPerson => Self::FirstPerson,
        }
    }
}

/// First- and third-person cameras that follow the player
#[derive(Debug, Clone, Default)]
pub struct CameraRig {
    /// First-person camera
    pub first_person: Camera,
    /// Third-person camera
    pub third_person: Camera,
    /// Height of the first-person camera above the player origin
    pub eye_height: f32,
}

impl CameraRig {
    /// Create a rig with both cameras at the origin
    pub fn new(eye_height: f32) -> Self {
        Self {
            first_person: Camera::default(),
            third_person: Camera::default(),
            eye_height,
        }
    }

    /// The camera selected by `active`
    pub fn camera(&self, active: ActiveCamera) -> &Camera {
        match active {
            ActiveCamera::FirstPerson => &self.first_person,
            ActiveCamera::ThirdPerson => &self.third_person,
        }
    }

    /// Mutable access to the camera selected by `active`
    pub fn camera_mut(&mut self, active: ActiveCamera) -> &mut Camera {
        match active {
            ActiveCamera::FirstPerson => &mut self.first_person,
            ActiveCamera::ThirdPerson => &mut self.third_person,
        }
    }

    /// Place both cameras relative to the player
    ///
    /// The third-person camera sits `offset` units behind the player along its
    /// own front and half that distance above the eye height.
    pub fn follow(&mut self, player_position: &Vec3, offset: f32) {
        let eye = player_position + Vec3::new(0.0, self.eye_height, 0.0);
        self.first_person.set_position(eye);

        let behind = eye - self.third_person.front() * offset + Vec3::new(0.0, offset * 0.5, 0.0);
        self.third_person.set_position(behind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::transform_point;
    use approx::assert_relative_eq;

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        camera.set_front(Vec3::new(0.0, 0.0, -5.0));

        let view = camera.view_matrix();
        assert_relative_eq!(transform_point(&view, &camera.position), Vec3::zeros(), epsilon = 1e-5);

        // A point straight ahead ends up on the -Z view axis
        let ahead = transform_point(&view, &(camera.position + camera.front() * 2.0));
        assert_relative_eq!(ahead, Vec3::new(0.0, 0.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_zero_front_is_ignored() {
        let mut camera = Camera::default();
        camera.set_front(Vec3::zeros());
        assert_relative_eq!(camera.front(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_rig_follow_places_cameras() {
        let mut rig = CameraRig::new(1.5);
        rig.third_person.set_front(Vec3::new(0.0, 0.0, 1.0));
        rig.follow(&Vec3::new(10.0, 0.0, 0.0), 4.0);

        assert_relative_eq!(rig.first_person.position, Vec3::new(10.0, 1.5, 0.0));
        assert_relative_eq!(rig.third_person.position, Vec3::new(10.0, 3.5, -4.0));
        assert_eq!(ActiveCamera::FirstPerson.toggled(), ActiveCamera::ThirdPerson);
        assert_relative_eq!(rig.camera(ActiveCamera::ThirdPerson).eye_position(), Vec3::new(10.0, 3.5, -4.0));
    }
}
