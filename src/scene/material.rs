use bon::Builder;

use crate::util::{BLACK, Color};

/// Phong coefficients of a surface.
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Diffuse
    #[builder(default = BLACK)]
    pub kd: Color,
    /// Specular
    #[builder(default = BLACK)]
    pub ks: Color,
    /// Reflection
    #[builder(default = BLACK)]
    pub kr: Color,
    /// Transparency
    #[builder(default = BLACK)]
    pub kt: Color,
    #[builder(default = 1)]
    pub shininess: u32,
}

impl Default for Material {
    fn default() -> Self {
        Material::builder().build()
    }
}
