//! User controls and their mapping onto water, sun and sky values.
//!
//! Inputs are optional: a control that is not present simply never drives its
//! target. Values are read fresh every frame. A malformed (NaN or infinite)
//! or out-of-range value is dropped, and the last accepted value stays in use.

use glam::Vec3;

use crate::params::ControlMapping;
use crate::scene::Scene;
use crate::weather::WeatherState;

/// Named scalar controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlName {
    Wind,
    WaveHeight,
    Breeze,
    CurrentDirection,
}

impl ControlName {
    pub const ALL: [ControlName; 4] = [
        ControlName::Wind,
        ControlName::WaveHeight,
        ControlName::Breeze,
        ControlName::CurrentDirection,
    ];

    /// Stable identifier of the control
    pub fn id(self) -> &'static str {
        match self {
            Self::Wind => "wind",
            Self::WaveHeight => "waveHeight",
            Self::Breeze => "breeze",
            Self::CurrentDirection => "currentDirection",
        }
    }

    /// Accepted range; angles wrap instead of clamping
    pub fn range(self) -> (f32, f32) {
        match self {
            Self::Wind => (0.0, 12.0),
            Self::WaveHeight => (0.0, 6.0),
            Self::Breeze | Self::CurrentDirection => (0.0, 360.0),
        }
    }

    fn is_angle(self) -> bool {
        matches!(self, Self::Breeze | Self::CurrentDirection)
    }
}

/// Input messages dispatched into the context
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    WindChanged(f32),
    WaveHeightChanged(f32),
    BreezeChanged(f32),
    CurrentDirectionChanged(f32),
    StormToggled,
}

impl ControlEvent {
    /// Split a value event into its target control and value
    pub fn as_value(self) -> Option<(ControlName, f32)> {
        match self {
            Self::WindChanged(v) => Some((ControlName::Wind, v)),
            Self::WaveHeightChanged(v) => Some((ControlName::WaveHeight, v)),
            Self::BreezeChanged(v) => Some((ControlName::Breeze, v)),
            Self::CurrentDirectionChanged(v) => Some((ControlName::CurrentDirection, v)),
            Self::StormToggled => None,
        }
    }
}

/// Live control values; `None` means the control is absent
#[derive(Debug, Clone, PartialEq)]
pub struct ControlInputs {
    pub wind: Option<f32>,
    pub wave_height: Option<f32>,
    pub breeze_deg: Option<f32>,
    pub current_deg: Option<f32>,
    /// Whether a storm toggle exists
    pub storm_toggle: bool,
}

impl Default for ControlInputs {
    fn default() -> Self {
        Self {
            wind: Some(6.0),
            wave_height: Some(1.0),
            breeze_deg: Some(180.0),
            current_deg: Some(0.0),
            storm_toggle: true,
        }
    }
}

impl ControlInputs {
    fn slot_mut(&mut self, name: ControlName) -> &mut Option<f32> {
        match name {
            ControlName::Wind => &mut self.wind,
            ControlName::WaveHeight => &mut self.wave_height,
            ControlName::Breeze => &mut self.breeze_deg,
            ControlName::CurrentDirection => &mut self.current_deg,
        }
    }

    pub fn get(&self, name: ControlName) -> Option<f32> {
        match name {
            ControlName::Wind => self.wind,
            ControlName::WaveHeight => self.wave_height,
            ControlName::Breeze => self.breeze_deg,
            ControlName::CurrentDirection => self.current_deg,
        }
    }

    /// Check a raw value against the control's range
    ///
    /// Angles wrap into `0..360`; other controls reject values outside their
    /// range. Non-finite values are always rejected.
    pub fn accept(name: ControlName, value: f32) -> Option<f32> {
        let value = usable(value)?;
        let (min, max) = name.range();
        if name.is_angle() {
            Some(value.rem_euclid(max))
        } else {
            (min..=max).contains(&value).then_some(value)
        }
    }

    /// Overwrite a present control with an accepted value
    ///
    /// Absent controls ignore the write. A malformed or out-of-range value is
    /// dropped and the last accepted value stays in place, so every mapping
    /// keeps recomputing from it. Returns `true` if the value was stored.
    pub fn set(&mut self, name: ControlName, value: f32) -> bool {
        let Some(slot) = self.slot_mut(name).as_mut() else {
            return false;
        };
        match Self::accept(name, value) {
            Some(value) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Step a present control, clamping (or wrapping angles) to its range
    ///
    /// A malformed value restarts from the bottom of the range.
    pub fn nudge(&mut self, name: ControlName, delta: f32) -> Option<f32> {
        let (min, max) = name.range();
        let slot = self.slot_mut(name).as_mut()?;
        let base = if slot.is_finite() { *slot } else { min };
        *slot = if name.is_angle() {
            (base + delta).rem_euclid(max)
        } else {
            (base + delta).clamp(min, max)
        };
        Some(*slot)
    }

    /// Mark a control as absent
    pub fn remove(&mut self, name: ControlName) {
        *self.slot_mut(name) = None;
    }
}

/// Lenient float parsing: the longest numeric prefix wins, otherwise NaN
///
/// `" 4.5 knots"` → 4.5, `"abc"` → NaN.
pub fn parse_control_value(raw: &str) -> f32 {
    let s = raw.trim_start();
    (1..=s.len())
        .rev()
        .filter(|&n| s.is_char_boundary(n))
        .find_map(|n| s[..n].trim_end().parse::<f32>().ok())
        .unwrap_or(f32::NAN)
}

fn usable(value: f32) -> Option<f32> {
    value.is_finite().then_some(value)
}

/// Wind → ripple size: `max(floor, wind * factor)`, factor larger while storming
pub fn ripple_size(wind: f32, weather: WeatherState, mapping: &ControlMapping) -> Option<f32> {
    let wind = usable(wind)?;
    let factor = if weather.is_storm() {
        mapping.storm_wind_factor
    } else {
        mapping.calm_wind_factor
    };
    Some((wind * factor).max(mapping.min_ripple_size))
}

/// Wave height → distortion scale
pub fn distortion_scale(height: f32, weather: WeatherState, mapping: &ControlMapping) -> Option<f32> {
    let height = usable(height)?;
    let factor = if weather.is_storm() {
        mapping.storm_distortion_factor
    } else {
        mapping.calm_distortion_factor
    };
    Some(height * factor)
}

/// Wave height → vertex displacement weight (meters)
pub fn wave_weight(height: f32, weather: WeatherState, mapping: &ControlMapping) -> Option<f32> {
    let height = usable(height)?;
    let factor = if weather.is_storm() {
        mapping.storm_wave_weight_factor
    } else {
        mapping.calm_wave_weight_factor
    };
    Some(height * factor)
}

/// Breeze angle → unit vector towards the sun
///
/// The azimuth follows the breeze; elevation is fixed just above the horizon.
pub fn sun_direction(breeze_deg: f32, mapping: &ControlMapping) -> Option<Vec3> {
    let theta = usable(breeze_deg)?.to_radians();
    let phi = (90.0 - mapping.sun_elevation_deg).to_radians();
    Some(Vec3::new(
        phi.sin() * theta.sin(),
        phi.cos(),
        phi.sin() * theta.cos(),
    ))
}

/// Current angle → water rotation about +Y (radians)
pub fn water_rotation(current_deg: f32) -> Option<f32> {
    usable(current_deg).map(|deg| -deg.to_radians())
}

/// Point the sun light and water highlights along the breeze
///
/// The sky follows only in calm weather; while storming its sun stays hidden.
pub fn apply_breeze(
    inputs: &ControlInputs,
    weather: WeatherState,
    mapping: &ControlMapping,
    scene: &mut Scene,
) {
    if let Some(dir) = inputs
        .breeze_deg
        .and_then(|deg| sun_direction(deg, mapping))
    {
        scene.sun.position = dir * mapping.sun_distance_m;
        scene.water.uniforms.sun_direction = dir;
    }
    scene.sky.uniforms.sun_position = if weather.is_storm() {
        mapping.hidden_sun_position
    } else {
        scene.sun.position
    };
}

/// Re-read every control and push the mapped values into the scene
pub fn apply_controls(
    inputs: &ControlInputs,
    weather: WeatherState,
    mapping: &ControlMapping,
    scene: &mut Scene,
) {
    let water = &mut scene.water;

    if let Some(size) = inputs.wind.and_then(|w| ripple_size(w, weather, mapping)) {
        water.uniforms.size = size;
    }

    if let Some(height) = inputs.wave_height {
        if let Some(scale) = distortion_scale(height, weather, mapping) {
            water.uniforms.distortion_scale = scale;
        }
        if let Some(weight) = wave_weight(height, weather, mapping) {
            water.uniforms.wave_weight = weight;
        }
    }

    if let Some(rotation) = inputs.current_deg.and_then(water_rotation) {
        water.rotation_y = rotation;
    }

    apply_breeze(inputs, weather, mapping, scene);
}
