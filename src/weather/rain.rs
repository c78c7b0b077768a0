//! Rain particle cloud.

use rand::Rng;

use crate::params::RainConfig;

/// Fixed-size cloud of rain drops
///
/// Drops drift a fixed amount every storm frame; any drop climbing past the
/// ceiling respawns low inside the spawn box. The count never changes.
pub struct RainField {
    positions: Vec<[f32; 3]>,
    /// Rotation of the whole field about +Y (radians)
    pub rotation_y: f32,
    pub visible: bool,
    needs_update: bool,
    config: RainConfig,
}

impl RainField {
    /// Scatter `config.count` drops through the initial spawn volume
    pub fn new<R: Rng>(config: RainConfig, rng: &mut R) -> Self {
        let (low, high) = config.initial_height_m;
        let positions = (0..config.count)
            .map(|_| {
                [
                    Self::random_horizontal(&config, rng),
                    rng.gen_range(low..high),
                    Self::random_horizontal(&config, rng),
                ]
            })
            .collect();

        Self {
            positions,
            rotation_y: 0.0,
            visible: false,
            needs_update: true,
            config,
        }
    }

    fn random_horizontal<R: Rng>(config: &RainConfig, rng: &mut R) -> f32 {
        (rng.gen::<f32>() - 0.5) * 2.0 * config.half_extent_m
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    /// Advance every drop by one frame of drift, respawning those past the ceiling
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        self.rotation_y += self.config.spin_per_frame;

        let [dx, dy, dz] = self.config.drift_per_frame;
        let (low, high) = self.config.respawn_height_m;
        for drop in &mut self.positions {
            drop[0] += dx;
            drop[1] += dy;
            drop[2] += dz;

            if drop[1] > self.config.ceiling_m {
                drop[1] = rng.gen_range(low..high);
                // Respawned drops land back inside the spawn box
                drop[0] = Self::random_horizontal(&self.config, rng);
                drop[2] = Self::random_horizontal(&self.config, rng);
            }
        }
        self.needs_update = true;
    }

    /// Whether positions changed since the last upload (clears the flag)
    pub fn take_needs_update(&mut self) -> bool {
        std::mem::take(&mut self.needs_update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_field(rng: &mut StdRng) -> RainField {
        RainField::new(
            RainConfig {
                count: 500,
                ..Default::default()
            },
            rng,
        )
    }

    #[test]
    fn test_initial_spawn_volume() {
        let mut rng = StdRng::seed_from_u64(1);
        let rain = small_field(&mut rng);
        assert_eq!(rain.len(), 500);
        assert!(!rain.visible);
        for p in rain.positions() {
            assert!((-1000.0..1000.0).contains(&p[0]));
            assert!((50.0..850.0).contains(&p[1]));
            assert!((-1000.0..1000.0).contains(&p[2]));
        }
    }

    #[test]
    fn test_count_invariant_across_steps() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut rain = small_field(&mut rng);
        for _ in 0..1000 {
            rain.step(&mut rng);
            assert_eq!(rain.len(), 500);
        }
    }

    #[test]
    fn test_drops_never_exceed_ceiling_after_step() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut rain = small_field(&mut rng);
        for _ in 0..400 {
            rain.step(&mut rng);
            assert!(rain.positions().iter().all(|p| p[1] <= 1000.0));
        }
    }

    #[test]
    fn test_drop_past_ceiling_respawns_low() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut rain = small_field(&mut rng);
        rain.positions[0] = [10.0, 999.0, 10.0];
        rain.positions[1] = [10.0, 900.0, 10.0];
        rain.step(&mut rng);

        // 999 + 5 crosses the ceiling
        let respawned = rain.positions()[0];
        assert!((0.0..200.0).contains(&respawned[1]));
        assert!((-1000.0..1000.0).contains(&respawned[0]));

        // 900 + 5 just drifts
        assert_eq!(rain.positions()[1], [9.0, 905.0, 9.0]);
    }

    #[test]
    fn test_step_spins_and_flags_upload() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut rain = small_field(&mut rng);
        assert!(rain.take_needs_update());
        assert!(!rain.take_needs_update());

        rain.step(&mut rng);
        assert!(rain.take_needs_update());
        assert!((rain.rotation_y + 0.002).abs() < 1e-7);
    }
}
