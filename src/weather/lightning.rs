//! Lightning flash point light.

use glam::Vec3;
use rand::Rng;

use crate::params::LightningConfig;

/// Point light that spikes on a strike and fades geometrically
#[derive(Debug, Clone)]
pub struct FlashLight {
    pub position: Vec3,
    pub intensity: f32,
    /// Light tint, cool white
    pub color: Vec3,
    config: LightningConfig,
}

impl FlashLight {
    pub fn new(config: LightningConfig) -> Self {
        Self {
            position: Vec3::new(0.0, config.height_m, 0.0),
            intensity: 0.0,
            color: Vec3::new(0.8, 0.85, 1.0),
            config,
        }
    }

    pub fn falloff(&self) -> f32 {
        self.config.falloff
    }

    /// Strike with the configured per-frame probability
    ///
    /// Returns `true` if a new flash started.
    pub fn maybe_strike<R: Rng>(&mut self, rng: &mut R) -> bool {
        if rng.gen::<f32>() < self.config.strike_probability {
            self.strike(rng);
            true
        } else {
            false
        }
    }

    /// Start a flash at a random intensity and horizontal position
    pub fn strike<R: Rng>(&mut self, rng: &mut R) {
        let (low, high) = self.config.intensity;
        self.intensity = low + rng.gen::<f32>() * (high - low);

        let spread = 2.0 * self.config.half_extent_m;
        self.position = Vec3::new(
            (rng.gen::<f32>() - 0.5) * spread,
            self.config.height_m,
            (rng.gen::<f32>() - 0.5) * spread,
        );
    }

    /// Fade by one frame
    pub fn decay(&mut self) {
        self.intensity *= self.config.decay;
    }
}
