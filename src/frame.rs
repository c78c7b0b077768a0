//! Per-frame scene update and the single context object that owns all state.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::CameraSystem;
use crate::controls::{apply_controls, ControlEvent, ControlInputs};
use crate::ocean::{generate_normal_map, SurfaceTexture};
use crate::params::{ControlMapping, FixedCamera, NormalMapConfig, RenderConfig};
use crate::scene::{Scene, SceneConfig};
use crate::weather::WeatherState;

/// Startup configuration for the whole simulation
#[derive(Debug, Clone, Default)]
pub struct ContextConfig {
    pub scene: SceneConfig,
    pub normal_map: NormalMapConfig,
    pub mapping: ControlMapping,
    pub camera: FixedCamera,
    pub render: RenderConfig,
    pub inputs: ControlInputs,
    /// Seed for rain placement and lightning
    pub seed: u64,
    /// Start in storm weather
    pub start_in_storm: bool,
}

/// Scene, camera, weather and controls, mutated only through `&mut self`
pub struct OceanContext {
    pub scene: Scene,
    pub camera: CameraSystem,
    weather: WeatherState,
    inputs: ControlInputs,
    mapping: ControlMapping,
    rng: StdRng,
    frame: u64,
}

impl OceanContext {
    /// Generate the normal map and compose the scene
    pub fn new(config: ContextConfig) -> Self {
        let normal_map = generate_normal_map(&config.normal_map);
        Self::with_normal_map(config, normal_map)
    }

    /// Compose the scene around an existing normal map
    pub fn with_normal_map(config: ContextConfig, normal_map: SurfaceTexture) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let weather = WeatherState::Calm;
        let scene = Scene::compose(&config.scene, normal_map, &weather.bundle(), &mut rng);

        let mut context = Self {
            scene,
            camera: CameraSystem::new(config.camera, config.render),
            weather,
            inputs: config.inputs,
            mapping: config.mapping,
            rng,
            frame: 0,
        };
        context.apply_controls();
        if config.start_in_storm {
            context.toggle_storm();
        }
        context
    }

    pub fn weather(&self) -> WeatherState {
        self.weather
    }

    pub fn inputs(&self) -> &ControlInputs {
        &self.inputs
    }

    /// Direct access for hosts that edit controls in place; changes apply next frame
    pub fn inputs_mut(&mut self) -> &mut ControlInputs {
        &mut self.inputs
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Time accumulator step for the current weather
    pub fn time_step(&self) -> f32 {
        self.weather.bundle().time_step
    }

    /// Dispatch one input message
    pub fn handle(&mut self, event: ControlEvent) {
        match event.as_value() {
            Some((name, value)) => {
                if self.inputs.get(name).is_none() {
                    log::debug!("{} is not present, ignoring {}", name.id(), value);
                } else if self.inputs.set(name, value) {
                    log::debug!("{} = {}", name.id(), value);
                    self.apply_controls();
                } else {
                    log::warn!(
                        "Rejected {} = {}, keeping {:?}",
                        name.id(),
                        value,
                        self.inputs.get(name)
                    );
                }
            }
            None if self.inputs.storm_toggle => self.toggle_storm(),
            None => log::debug!("storm toggle is not present, ignoring"),
        }
    }

    /// Flip the weather and apply the complete bundle before returning
    pub fn toggle_storm(&mut self) {
        self.weather = self.weather.toggled();
        let bundle = self.weather.bundle();
        self.scene.apply_weather(&bundle);
        // Re-runs the state-dependent mappings and hides or restores the sky sun
        self.apply_controls();
        log::info!("Storm mode: {}", self.weather.is_storm());
    }

    /// Track a new viewport size
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let resized = self.camera.resize(width, height);
        if resized {
            log::debug!("Viewport resized to {}x{}", width, height);
        }
        resized
    }

    fn apply_controls(&mut self) {
        apply_controls(&self.inputs, self.weather, &self.mapping, &mut self.scene);
    }

    /// Advance the scene by one frame; the host draws afterwards
    pub fn update(&mut self) {
        self.scene.water.advance_time(self.time_step());

        // Picks up programmatic control changes as well as events
        self.apply_controls();
        self.scene.water.displace();

        if self.weather.is_storm() {
            self.scene.rain.visible = true;
            self.scene.rain.step(&mut self.rng);
            if self.scene.flash.maybe_strike(&mut self.rng) {
                log::debug!(
                    "Lightning at {:?} ({:.0})",
                    self.scene.flash.position,
                    self.scene.flash.intensity
                );
            }
        } else {
            self.scene.rain.visible = false;
        }

        self.scene.flash.decay();
        self.frame += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ControlName;
    use crate::params::{
        rgb_from_hex, LightningConfig, OceanPhysics, RainConfig, WeatherBundle,
    };
    use crate::scene::{SkyUniforms, SunLight, WaterUniforms};
    use glam::Vec3;

    fn test_config() -> ContextConfig {
        ContextConfig {
            scene: SceneConfig {
                physics: OceanPhysics {
                    grid_size: 8,
                    ..Default::default()
                },
                rain: RainConfig {
                    count: 200,
                    ..Default::default()
                },
                ..Default::default()
            },
            normal_map: NormalMapConfig {
                size: 16,
                circle_count: 50,
                ..Default::default()
            },
            seed: 1234,
            ..Default::default()
        }
    }

    /// Every derived value except the time accumulator
    fn derived(ctx: &OceanContext) -> (SkyUniforms, SunLight, WaterUniforms, bool, f32) {
        let mut water = ctx.scene.water.uniforms;
        water.time = 0.0;
        (
            ctx.scene.sky.uniforms,
            ctx.scene.sun,
            water,
            ctx.scene.rain.visible,
            ctx.time_step(),
        )
    }

    #[test]
    fn test_double_toggle_restores_everything() {
        let mut ctx = OceanContext::new(test_config());
        ctx.handle(ControlEvent::WindChanged(7.5));
        ctx.handle(ControlEvent::BreezeChanged(33.0));
        let before = derived(&ctx);

        ctx.handle(ControlEvent::StormToggled);
        assert_ne!(derived(&ctx), before);
        ctx.handle(ControlEvent::StormToggled);
        assert_eq!(derived(&ctx), before);
    }

    #[test]
    fn test_calm_storm_calm_scenario() {
        let mut ctx = OceanContext::new(test_config());
        assert_eq!(ctx.weather(), WeatherState::Calm);

        ctx.handle(ControlEvent::WindChanged(6.0));
        ctx.handle(ControlEvent::WaveHeightChanged(2.0));
        ctx.handle(ControlEvent::BreezeChanged(90.0));

        let phi = 88.0f32.to_radians();
        let expected = Vec3::new(phi.sin(), phi.cos(), 0.0);
        let water = ctx.scene.water.uniforms;
        assert!(water.sun_direction.abs_diff_eq(expected, 1e-6));
        assert_eq!(water.size, 12.0);
        assert_eq!(water.distortion_scale, 6.0);
        assert!(ctx.scene.sky.uniforms.sun_position.abs_diff_eq(expected * 100.0, 1e-4));

        ctx.handle(ControlEvent::StormToggled);
        assert_eq!(ctx.weather(), WeatherState::Storm);
        assert_eq!(ctx.scene.water.uniforms.water_color, rgb_from_hex(0x0b1a1e));
        assert_eq!(ctx.scene.water.uniforms.size, 60.0);
        assert_eq!(ctx.scene.sky.uniforms.sun_position, Vec3::new(0.0, -1000.0, 0.0));
        let t0 = ctx.scene.water.uniforms.time;
        ctx.update();
        assert!((ctx.scene.water.uniforms.time - t0 - 1.0 / 20.0).abs() < 1e-6);

        ctx.handle(ControlEvent::StormToggled);
        assert_eq!(ctx.weather(), WeatherState::Calm);
        assert_eq!(ctx.scene.water.uniforms.water_color, rgb_from_hex(0x002b36));
        assert_eq!(ctx.scene.water.uniforms.size, 12.0);
        assert!(ctx.scene.sky.uniforms.sun_position.abs_diff_eq(expected * 100.0, 1e-4));
        let t1 = ctx.scene.water.uniforms.time;
        ctx.update();
        assert!((ctx.scene.water.uniforms.time - t1 - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_input_retains_last_value() {
        let mut ctx = OceanContext::new(test_config());
        ctx.handle(ControlEvent::WindChanged(4.0));
        ctx.handle(ControlEvent::CurrentDirectionChanged(45.0));
        let size = ctx.scene.water.uniforms.size;
        let rotation = ctx.scene.water.rotation_y;

        ctx.handle(ControlEvent::WindChanged(f32::NAN));
        ctx.handle(ControlEvent::CurrentDirectionChanged(f32::NAN));
        ctx.update();
        assert_eq!(ctx.scene.water.uniforms.size, size);
        assert_eq!(ctx.scene.water.rotation_y, rotation);
    }

    #[test]
    fn test_malformed_wind_retained_across_storm_toggle() {
        let mut ctx = OceanContext::new(test_config());
        ctx.handle(ControlEvent::WindChanged(4.0));
        assert_eq!(ctx.scene.water.uniforms.size, 8.0);

        ctx.handle(ControlEvent::WindChanged(f32::NAN));
        ctx.handle(ControlEvent::StormToggled);
        ctx.update();
        assert_eq!(ctx.inputs().wind, Some(4.0));
        assert_eq!(ctx.scene.water.uniforms.size, 40.0);

        ctx.handle(ControlEvent::StormToggled);
        ctx.update();
        assert_eq!(ctx.scene.water.uniforms.size, 8.0);
    }

    #[test]
    fn test_malformed_wave_height_retained_across_storm_toggle() {
        let mut ctx = OceanContext::new(test_config());
        ctx.handle(ControlEvent::WaveHeightChanged(2.0));
        ctx.handle(ControlEvent::WaveHeightChanged(f32::INFINITY));
        ctx.handle(ControlEvent::StormToggled);
        assert_eq!(ctx.scene.water.uniforms.distortion_scale, 40.0);
        assert_eq!(ctx.scene.water.uniforms.wave_weight, 3.0);
    }

    #[test]
    fn test_nudge_after_malformed_value_starts_from_last_accepted() {
        let mut ctx = OceanContext::new(test_config());
        ctx.handle(ControlEvent::WindChanged(4.0));
        ctx.handle(ControlEvent::WindChanged(f32::NAN));

        let mut inputs = ctx.inputs().clone();
        let nudged = inputs.nudge(ControlName::Wind, 0.5);
        assert_eq!(nudged, Some(4.5));
        ctx.handle(ControlEvent::WindChanged(4.5));
        assert_eq!(ctx.scene.water.uniforms.size, 9.0);
    }

    #[test]
    fn test_out_of_range_values_keep_last_accepted() {
        let mut ctx = OceanContext::new(test_config());
        ctx.handle(ControlEvent::WindChanged(6.0));
        ctx.handle(ControlEvent::WindChanged(50.0));
        assert_eq!(ctx.scene.water.uniforms.size, 12.0);

        ctx.handle(ControlEvent::WaveHeightChanged(2.0));
        ctx.handle(ControlEvent::WaveHeightChanged(-4.0));
        ctx.update();
        assert_eq!(ctx.scene.water.uniforms.distortion_scale, 6.0);
        assert_eq!(ctx.scene.water.uniforms.wave_weight, 1.0);

        // Storm ordering holds for the retained wind
        ctx.handle(ControlEvent::StormToggled);
        assert_eq!(ctx.scene.water.uniforms.size, 60.0);
    }

    #[test]
    fn test_injected_normal_map_is_used() {
        let flat = generate_normal_map(&NormalMapConfig {
            size: 8,
            circle_count: 0,
            ..Default::default()
        });
        let ctx = OceanContext::with_normal_map(test_config(), flat);
        assert_eq!(ctx.scene.water.normal_map.size(), 8);
        assert!(ctx
            .scene
            .water
            .normal_map
            .image()
            .pixels()
            .all(|p| p.0 == [128, 128, 255]));
    }

    #[test]
    fn test_absent_inputs_skip_their_mapping() {
        let mut config = test_config();
        config.inputs = ControlInputs {
            wind: None,
            wave_height: None,
            breeze_deg: None,
            current_deg: None,
            storm_toggle: false,
        };
        let mut ctx = OceanContext::new(config);
        let before = ctx.scene.water.uniforms;

        ctx.handle(ControlEvent::WindChanged(9.0));
        ctx.handle(ControlEvent::StormToggled);
        ctx.update();
        assert_eq!(ctx.weather(), WeatherState::Calm);
        assert_eq!(ctx.scene.water.uniforms.size, before.size);
        assert_eq!(ctx.scene.water.uniforms.distortion_scale, 3.7);
    }

    #[test]
    fn test_programmatic_changes_picked_up_each_frame() {
        let mut ctx = OceanContext::new(test_config());
        ctx.inputs_mut().wind = Some(3.0);
        ctx.update();
        assert_eq!(ctx.scene.water.uniforms.size, 6.0);
    }

    #[test]
    fn test_rain_only_moves_while_storming() {
        let mut ctx = OceanContext::new(test_config());
        let calm_positions = ctx.scene.rain.positions().to_vec();
        for _ in 0..10 {
            ctx.update();
        }
        assert!(!ctx.scene.rain.visible);
        assert_eq!(ctx.scene.rain.positions(), calm_positions.as_slice());

        ctx.toggle_storm();
        for _ in 0..300 {
            ctx.update();
            assert!(ctx.scene.rain.visible);
            assert_eq!(ctx.scene.rain.len(), 200);
            assert!(ctx.scene.rain.positions().iter().all(|p| p[1] <= 1000.0));
        }
        assert_ne!(ctx.scene.rain.positions(), calm_positions.as_slice());
        assert_eq!(ctx.frame_count(), 310);
    }

    #[test]
    fn test_flash_decays_without_retrigger() {
        let mut config = test_config();
        config.scene.lightning = LightningConfig {
            strike_probability: 0.0,
            ..Default::default()
        };
        config.start_in_storm = true;
        let mut ctx = OceanContext::new(config);
        assert!(ctx.weather().is_storm());

        ctx.scene.flash.intensity = 200.0;
        for _ in 0..10 {
            ctx.update();
        }
        let expected = 200.0 * 0.85f32.powi(10);
        assert!((ctx.scene.flash.intensity - expected).abs() < 1e-3);
    }

    #[test]
    fn test_flash_decays_in_calm_too() {
        let mut ctx = OceanContext::new(test_config());
        ctx.scene.flash.intensity = 100.0;
        ctx.update();
        assert!((ctx.scene.flash.intensity - 85.0).abs() < 1e-4);
    }

    #[test]
    fn test_storm_always_strikes_at_full_probability() {
        let mut config = test_config();
        config.scene.lightning = LightningConfig {
            strike_probability: 1.0,
            ..Default::default()
        };
        config.start_in_storm = true;
        let mut ctx = OceanContext::new(config);
        ctx.update();
        // Struck in [100, 300) then decayed once
        let i = ctx.scene.flash.intensity;
        assert!((85.0..255.0).contains(&i), "{i}");
    }

    #[test]
    fn test_start_in_storm_matches_toggle() {
        let mut config = test_config();
        config.start_in_storm = true;
        let ctx = OceanContext::new(config);
        assert_eq!(ctx.scene.sun.intensity, WeatherBundle::storm().sun_intensity);
        assert!(ctx.scene.rain.visible);
    }

    #[test]
    fn test_resize() {
        let mut ctx = OceanContext::new(test_config());
        assert!(ctx.resize(640, 480));
        assert_eq!(ctx.camera.viewport(), (640, 480));
        assert!(!ctx.resize(0, 0));
    }
}
