//! Sky dome scattering parameters and the sun light.

use glam::Vec3;

use crate::params::WeatherBundle;

/// Shader-facing sky values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyUniforms {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    /// Position the sun disc is drawn towards
    pub sun_position: Vec3,
}

/// Sky dome object
pub struct Sky {
    pub uniforms: SkyUniforms,
    /// Dome radius (meters)
    pub scale: f32,
}

impl Sky {
    pub fn new(bundle: &WeatherBundle, scale: f32) -> Self {
        Self {
            uniforms: SkyUniforms {
                turbidity: bundle.turbidity,
                rayleigh: bundle.rayleigh,
                mie_coefficient: bundle.mie_coefficient,
                mie_directional_g: bundle.mie_directional_g,
                sun_position: Vec3::Y,
            },
            scale,
        }
    }

    pub fn apply_bundle(&mut self, bundle: &WeatherBundle) {
        self.uniforms.turbidity = bundle.turbidity;
        self.uniforms.rayleigh = bundle.rayleigh;
        self.uniforms.mie_coefficient = bundle.mie_coefficient;
        self.uniforms.mie_directional_g = bundle.mie_directional_g;
    }
}

/// Directional sun light; its tint lives in the water's `sun_color`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunLight {
    pub position: Vec3,
    pub intensity: f32,
}
