//! GPU uniform layouts and packing from scene state.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::camera::CameraSystem;
use crate::scene::Scene;

/// Normalises flash intensity for the sky glow (roughly the strongest strike)
const FLASH_SKY_REFERENCE: f32 = 300.0;

/// Shared sky + water uniform buffer (must match `SceneUniforms` in WGSL)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    pub water_model: [[f32; 4]; 4],
    /// xyz: camera position
    pub eye: [f32; 4],
    /// xyz: unit vector towards the sun, w: sun light intensity
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
    pub water_color: [f32; 4],
    /// xyz: where the sky draws the sun
    pub sky_sun_position: [f32; 4],
    /// turbidity, rayleigh, mie coefficient, mie directional g
    pub scattering: [f32; 4],
    /// xyz: flash position, w: flash intensity
    pub flash: [f32; 4],
    pub flash_color: [f32; 4],
    /// time, size, distortion scale, wave weight
    pub water_params: [f32; 4],
    /// flash falloff exponent, normalised flash for the sky, unused, unused
    pub misc: [f32; 4],
}

const _: () = assert!(std::mem::size_of::<SceneUniforms>() == 352);

fn vec4(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

impl SceneUniforms {
    pub fn from_scene(scene: &Scene, camera: &CameraSystem) -> Self {
        let view_proj = camera.view_proj();
        let water = &scene.water.uniforms;
        let sky = &scene.sky.uniforms;
        let flash = &scene.flash;

        Self {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            water_model: scene.water.model_matrix().to_cols_array_2d(),
            eye: vec4(camera.eye(), 1.0),
            sun_direction: vec4(water.sun_direction, scene.sun.intensity),
            sun_color: vec4(water.sun_color, 1.0),
            water_color: vec4(water.water_color, 1.0),
            sky_sun_position: vec4(sky.sun_position, 1.0),
            scattering: [
                sky.turbidity,
                sky.rayleigh,
                sky.mie_coefficient,
                sky.mie_directional_g,
            ],
            flash: vec4(flash.position, flash.intensity),
            flash_color: vec4(flash.color, 1.0),
            water_params: [
                water.time,
                water.size,
                water.distortion_scale,
                water.wave_weight,
            ],
            misc: [
                flash.falloff(),
                (flash.intensity / FLASH_SKY_REFERENCE).clamp(0.0, 1.0),
                0.0,
                0.0,
            ],
        }
    }
}

/// Rain point-cloud uniforms (must match `RainUniforms` in WGSL)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct RainUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// rgb: drop color, a: opacity
    pub color: [f32; 4],
}

const _: () = assert!(std::mem::size_of::<RainUniforms>() == 80);

impl RainUniforms {
    pub fn from_scene(scene: &Scene, camera: &CameraSystem) -> Self {
        let rain = &scene.rain;
        let model = Mat4::from_rotation_y(rain.rotation_y);
        Self {
            view_proj: (camera.view_proj() * model).to_cols_array_2d(),
            color: vec4(rain.config().color, rain.config().opacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{ContextConfig, OceanContext};
    use crate::params::{NormalMapConfig, OceanPhysics, RainConfig};
    use crate::scene::SceneConfig;

    fn context() -> OceanContext {
        OceanContext::new(ContextConfig {
            scene: SceneConfig {
                physics: OceanPhysics {
                    grid_size: 2,
                    ..Default::default()
                },
                rain: RainConfig {
                    count: 4,
                    ..Default::default()
                },
                ..Default::default()
            },
            normal_map: NormalMapConfig {
                size: 4,
                circle_count: 1,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_scene_uniform_packing() {
        let mut ctx = context();
        ctx.scene.flash.intensity = 600.0;
        ctx.update();
        let u = SceneUniforms::from_scene(&ctx.scene, &ctx.camera);

        let water = ctx.scene.water.uniforms;
        assert_eq!(u.water_params, [water.time, water.size, water.distortion_scale, water.wave_weight]);
        assert_eq!(u.scattering, [5.0, 0.5, 0.005, 0.8]);
        assert_eq!(u.sun_direction[3], 0.5);
        assert_eq!(u.eye, [0.0, 30.0, 100.0, 1.0]);
        assert_eq!(u.misc[0], 1.7);
        assert_eq!(u.flash_color, [0.8, 0.85, 1.0, 1.0]);
        // 600 * 0.85 is brighter than any single strike
        assert_eq!(u.misc[1], 1.0);
    }

    #[test]
    fn test_flash_color_follows_scene() {
        let mut ctx = context();
        ctx.scene.flash.color = Vec3::new(1.0, 0.5, 0.25);
        let u = SceneUniforms::from_scene(&ctx.scene, &ctx.camera);
        assert_eq!(u.flash_color, [1.0, 0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_inverse_view_proj_round_trips() {
        let ctx = context();
        let u = SceneUniforms::from_scene(&ctx.scene, &ctx.camera);
        let product = Mat4::from_cols_array_2d(&u.view_proj) * Mat4::from_cols_array_2d(&u.inv_view_proj);
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-3));
    }

    #[test]
    fn test_rain_uniforms_follow_rotation() {
        let mut ctx = context();
        let still = RainUniforms::from_scene(&ctx.scene, &ctx.camera);
        assert_eq!(still.color[3], 0.8);
        assert_eq!(still.view_proj, ctx.camera.view_proj().to_cols_array_2d());

        ctx.scene.rain.rotation_y = 1.0;
        let turned = RainUniforms::from_scene(&ctx.scene, &ctx.camera);
        assert_ne!(turned.view_proj, still.view_proj);
    }
}
