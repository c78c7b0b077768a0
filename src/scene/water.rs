//! Water object: mesh, normal map and its shader uniforms.

use glam::{Mat4, Vec3};

use crate::ocean::{OceanGrid, SurfaceTexture};
use crate::params::{OceanPhysics, WeatherBundle};

/// Shader-facing water values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterUniforms {
    /// Animation time accumulator
    pub time: f32,
    /// Ripple size (normal-map tiling density)
    pub size: f32,
    /// Strength of normal perturbation on reflections
    pub distortion_scale: f32,
    /// Unit vector towards the sun
    pub sun_direction: Vec3,
    pub sun_color: Vec3,
    pub water_color: Vec3,
    /// Vertex displacement height (meters)
    pub wave_weight: f32,
}

/// Water surface object
pub struct Water {
    pub uniforms: WaterUniforms,
    /// Rotation about +Y (radians), sets the flow direction of the ripples
    pub rotation_y: f32,
    pub grid: OceanGrid,
    pub normal_map: SurfaceTexture,
    physics: OceanPhysics,
    mesh_dirty: bool,
}

impl Water {
    pub fn new(physics: OceanPhysics, normal_map: SurfaceTexture, bundle: &WeatherBundle) -> Self {
        let grid = OceanGrid::new(&physics);
        Self {
            uniforms: WaterUniforms {
                time: 0.0,
                size: 1.0,
                distortion_scale: physics.initial_distortion_scale,
                sun_direction: Vec3::Y,
                sun_color: bundle.sun_color,
                water_color: bundle.water_color,
                wave_weight: 0.0,
            },
            rotation_y: 0.0,
            grid,
            normal_map,
            physics,
            mesh_dirty: false,
        }
    }

    /// Advance the time accumulator
    pub fn advance_time(&mut self, step: f32) {
        self.uniforms.time += step;
    }

    /// Re-displace the mesh for the current time and wave weight
    pub fn displace(&mut self) {
        let changed = self
            .grid
            .update(self.uniforms.time, self.uniforms.wave_weight, &self.physics);
        self.mesh_dirty |= changed;
    }

    /// Whether vertices changed since the last upload (clears the flag)
    pub fn take_mesh_dirty(&mut self) -> bool {
        std::mem::take(&mut self.mesh_dirty)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }
}
