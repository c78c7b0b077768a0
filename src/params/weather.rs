//! Weather bundles, rain and lightning parameters.

use glam::Vec3;

/// Convert a 0xRRGGBB hex color to linear-ish 0..1 RGB
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Every visual value that changes together when the weather flips
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherBundle {
    /// Sky haziness (dimensionless, 1 = clear, 10+ = murky)
    pub turbidity: f32,

    /// Rayleigh scattering strength (0 = black sky)
    pub rayleigh: f32,

    /// Mie scattering coefficient (sun glare)
    pub mie_coefficient: f32,

    /// Mie anisotropy (0..1, forward scattering)
    pub mie_directional_g: f32,

    /// Directional sun light intensity
    pub sun_intensity: f32,

    /// Sun reflection tint on the water
    pub sun_color: Vec3,

    /// Deep water tint
    pub water_color: Vec3,

    /// Rain particle visibility
    pub rain_visible: bool,

    /// Water time uniform increment per frame (seconds)
    pub time_step: f32,
}

impl WeatherBundle {
    /// North Atlantic grey day
    pub fn calm() -> Self {
        Self {
            turbidity: 5.0,
            rayleigh: 0.5,
            mie_coefficient: 0.005,
            mie_directional_g: 0.8,
            sun_intensity: 0.5,
            sun_color: rgb_from_hex(0x707070), // Greyish reflection, not bright white
            water_color: rgb_from_hex(0x002b36),
            rain_visible: false,
            time_step: 1.0 / 60.0,
        }
    }

    /// Pitch black storm
    pub fn storm() -> Self {
        Self {
            turbidity: 10.0, // Blurs any remaining sun artifacts
            rayleigh: 0.0,
            mie_coefficient: 0.1,
            mie_directional_g: 0.8,
            sun_intensity: 0.0,
            sun_color: Vec3::ZERO, // No reflection
            water_color: rgb_from_hex(0x0b1a1e),
            rain_visible: true,
            time_step: 1.0 / 20.0,
        }
    }
}

/// Rain particle cloud parameters
#[derive(Debug, Clone)]
pub struct RainConfig {
    /// Number of drops (fixed for the lifetime of the field)
    pub count: usize,

    /// Horizontal half-extent of the spawn box (meters, X and Z)
    pub half_extent_m: f32,

    /// Initial vertical spawn range (meters)
    pub initial_height_m: (f32, f32),

    /// Vertical respawn range after wrapping (meters)
    pub respawn_height_m: (f32, f32),

    /// Height above which a drop wraps (meters)
    pub ceiling_m: f32,

    /// Per-frame displacement (meters per frame, X/Y/Z)
    pub drift_per_frame: [f32; 3],

    /// Field rotation about Y per frame (radians)
    pub spin_per_frame: f32,

    /// Drop color
    pub color: Vec3,

    /// Drop opacity (0..1)
    pub opacity: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            count: 10000,
            half_extent_m: 1000.0,
            initial_height_m: (50.0, 850.0),
            respawn_height_m: (0.0, 200.0),
            ceiling_m: 1000.0,
            // Streaks rise through the view with a diagonal wind
            drift_per_frame: [-1.0, 5.0, -1.0],
            spin_per_frame: -0.002,
            color: rgb_from_hex(0xdddddd),
            opacity: 0.8,
        }
    }
}

/// Lightning flash parameters
#[derive(Debug, Clone)]
pub struct LightningConfig {
    /// Chance of a new flash per storm frame
    pub strike_probability: f32,

    /// Flash intensity range
    pub intensity: (f32, f32),

    /// Horizontal half-extent for flash placement (meters)
    pub half_extent_m: f32,

    /// Fixed flash altitude (meters)
    pub height_m: f32,

    /// Per-frame multiplicative intensity decay
    pub decay: f32,

    /// Point light falloff exponent
    pub falloff: f32,
}

impl Default for LightningConfig {
    fn default() -> Self {
        Self {
            strike_probability: 0.005,
            intensity: (100.0, 300.0),
            half_extent_m: 500.0,
            height_m: 300.0,
            decay: 0.85,
            falloff: 1.7,
        }
    }
}
