//! Control-to-uniform mapping factors.

use glam::Vec3;

/// Linear and angular mapping constants from user controls to water/sky state
#[derive(Debug, Clone)]
pub struct ControlMapping {
    /// Wind → ripple size factor in calm weather
    /// Formula: size = max(min_ripple_size, wind * factor)
    pub calm_wind_factor: f32,

    /// Wind → ripple size factor while storming (violent chop)
    pub storm_wind_factor: f32,

    /// Lower bound on the ripple size uniform
    pub min_ripple_size: f32,

    /// Wave height → distortion scale factor in calm weather
    pub calm_distortion_factor: f32,

    /// Wave height → distortion scale factor while storming
    pub storm_distortion_factor: f32,

    /// Wave height → vertex displacement weight (meters per unit) in calm weather
    pub calm_wave_weight_factor: f32,

    /// Wave height → vertex displacement weight while storming
    pub storm_wave_weight_factor: f32,

    /// Fixed sun elevation above the horizon (degrees)
    pub sun_elevation_deg: f32,

    /// Distance of the sun light from the origin (meters)
    pub sun_distance_m: f32,

    /// Sky sun position used while storming (below the horizon, hides the disc)
    pub hidden_sun_position: Vec3,
}

impl Default for ControlMapping {
    fn default() -> Self {
        Self {
            calm_wind_factor: 2.0,
            storm_wind_factor: 10.0,
            min_ripple_size: 0.1,
            calm_distortion_factor: 3.0,
            storm_distortion_factor: 20.0,
            calm_wave_weight_factor: 0.5,
            storm_wave_weight_factor: 1.5,
            sun_elevation_deg: 2.0,
            sun_distance_m: 100.0,
            hidden_sun_position: Vec3::new(0.0, -1000.0, 0.0),
        }
    }
}
