//! Phong material description

use super::backend::{uniforms, GraphicsBackend};
use crate::foundation::math::Vec4;

/// Ambient/diffuse/specular colours plus opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient colour (RGBA)
    pub ambient: Vec4,

    /// Diffuse colour (RGBA)
    pub diffuse: Vec4,

    /// Specular colour (RGBA)
    pub specular: Vec4,

    /// Opacity (0.0 = transparent, 1.0 = opaque)
    pub transparency: f32,
}

impl Material {
    /// Create a new material with default properties
    pub fn new() -> Self {
        Self {
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::new(0.7, 0.7, 0.7, 1.0),
            specular: Vec4::new(0.3, 0.3, 0.3, 1.0),
            transparency: 1.0,
        }
    }

    /// Set the ambient colour
    pub fn with_ambient(mut self, ambient: Vec4) -> Self {
        self.ambient = ambient;
        self
    }

    /// Set the diffuse colour
    pub fn with_diffuse(mut self, diffuse: Vec4) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Set the specular colour
    pub fn with_specular(mut self, specular: Vec4) -> Self {
        self.specular = specular;
        self
    }

    /// Set the opacity
    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency.clamp(0.0, 1.0);
        self
    }

    /// Whether the material needs the transparent draw path
    pub fn is_transparent(&self) -> bool {
        self.transparency < 1.0
    }

    /// Scale each colour by its own factor, clamping every channel to [0, 1]
    pub fn varied(&self, ambient_factor: f32, diffuse_factor: f32, specular_factor: f32) -> Self {
        let scale = |color: &Vec4, factor: f32| (color * factor).map(|c| c.clamp(0.0, 1.0));
        Self {
            ambient: scale(&self.ambient, ambient_factor),
            diffuse: scale(&self.diffuse, diffuse_factor),
            specular: scale(&self.specular, specular_factor),
            transparency: self.transparency,
        }
    }

    /// Write the material uniforms to the bound program
    pub fn upload(&self, backend: &mut dyn GraphicsBackend) {
        backend.set_vec4(uniforms::MATERIAL_AMBIENT, &self.ambient);
        backend.set_vec4(uniforms::MATERIAL_DIFFUSE, &self.diffuse);
        backend.set_vec4(uniforms::MATERIAL_SPECULAR, &self.specular);
        backend.set_float(uniforms::TRANSPARENCY, self.transparency);
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}
