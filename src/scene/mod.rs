//! Scene composition: every visual object the renderer draws, as typed state.
//!
//! Nothing here touches the GPU. The renderer reads a [`Scene`] each frame and
//! the frame updater and control handlers mutate it between frames.

mod sky;
mod water;

pub use sky::{Sky, SkyUniforms, SunLight};
pub use water::{Water, WaterUniforms};

use glam::Vec3;
use rand::Rng;

use crate::ocean::SurfaceTexture;
use crate::params::{LightningConfig, OceanPhysics, RainConfig, WeatherBundle};
use crate::weather::{FlashLight, RainField};

/// Everything needed to compose the scene
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub physics: OceanPhysics,
    pub rain: RainConfig,
    pub lightning: LightningConfig,
    /// Sky dome radius (meters)
    pub sky_scale_m: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            physics: OceanPhysics::default(),
            rain: RainConfig::default(),
            lightning: LightningConfig::default(),
            sky_scale_m: 10000.0,
        }
    }
}

/// The composed scene graph
pub struct Scene {
    pub sky: Sky,
    pub sun: SunLight,
    pub water: Water,
    pub rain: RainField,
    pub flash: FlashLight,
}

impl Scene {
    /// Build the scene once at startup around an already generated normal map
    pub fn compose<R: Rng>(
        config: &SceneConfig,
        normal_map: SurfaceTexture,
        bundle: &WeatherBundle,
        rng: &mut R,
    ) -> Self {
        let sun = SunLight {
            position: Vec3::Y,
            intensity: bundle.sun_intensity,
        };

        let mut scene = Self {
            sky: Sky::new(bundle, config.sky_scale_m),
            sun,
            water: Water::new(config.physics.clone(), normal_map, bundle),
            rain: RainField::new(config.rain.clone(), rng),
            flash: FlashLight::new(config.lightning.clone()),
        };
        scene.apply_weather(bundle);

        log::info!(
            "Scene composed: {} rain drops, {} water vertices",
            scene.rain.len(),
            scene.water.grid.vertices.len()
        );
        scene
    }

    /// Apply every bundle-driven value in one step
    ///
    /// Sun placement is not part of the bundle; callers decide where the sky
    /// draws the sun for the new weather.
    pub fn apply_weather(&mut self, bundle: &WeatherBundle) {
        self.sky.apply_bundle(bundle);
        self.sun.intensity = bundle.sun_intensity;
        self.water.uniforms.sun_color = bundle.sun_color;
        self.water.uniforms.water_color = bundle.water_color;
        self.rain.visible = bundle.rain_visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocean::generate_normal_map;
    use crate::params::NormalMapConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tiny_scene(bundle: &WeatherBundle) -> Scene {
        let mut rng = StdRng::seed_from_u64(0);
        let config = SceneConfig {
            physics: OceanPhysics {
                grid_size: 4,
                ..Default::default()
            },
            rain: RainConfig {
                count: 10,
                ..Default::default()
            },
            ..Default::default()
        };
        let normal_map = generate_normal_map(&NormalMapConfig {
            size: 8,
            circle_count: 4,
            ..Default::default()
        });
        Scene::compose(&config, normal_map, bundle, &mut rng)
    }

    #[test]
    fn test_compose_applies_bundle() {
        let calm = WeatherBundle::calm();
        let scene = tiny_scene(&calm);
        assert_eq!(scene.sky.uniforms.turbidity, 5.0);
        assert_eq!(scene.sky.uniforms.rayleigh, 0.5);
        assert_eq!(scene.sun.intensity, 0.5);
        assert_eq!(scene.water.uniforms.water_color, calm.water_color);
        assert_eq!(scene.water.uniforms.distortion_scale, 3.7);
        assert_eq!(scene.sky.scale, 10000.0);
        assert_eq!(scene.rain.len(), 10);
        assert!(!scene.rain.visible);
        assert_eq!(scene.flash.intensity, 0.0);
    }

    #[test]
    fn test_apply_storm_bundle() {
        let mut scene = tiny_scene(&WeatherBundle::calm());
        let storm = WeatherBundle::storm();
        scene.apply_weather(&storm);
        assert_eq!(scene.sky.uniforms.rayleigh, 0.0);
        assert_eq!(scene.sky.uniforms.mie_coefficient, 0.1);
        assert_eq!(scene.sun.intensity, 0.0);
        assert_eq!(scene.water.uniforms.sun_color, Vec3::ZERO);
        assert!(scene.rain.visible);
    }

    #[test]
    fn test_water_advance_accumulates_time() {
        let mut scene = tiny_scene(&WeatherBundle::calm());
        scene.water.advance_time(0.5);
        scene.water.advance_time(0.25);
        assert_eq!(scene.water.uniforms.time, 0.75);
        // Flat water never needs re-uploading
        scene.water.displace();
        assert!(!scene.water.take_mesh_dirty());

        scene.water.uniforms.wave_weight = 1.0;
        scene.water.displace();
        assert!(scene.water.take_mesh_dirty());
        assert!(!scene.water.take_mesh_dirty());
    }
}
