//! Water plane mesh with noise-driven vertex displacement.

use bytemuck::{Pod, Zeroable};
use noise::{NoiseFn, Perlin};

use crate::params::OceanPhysics;

/// Vertex data for the water mesh (position + plane-local coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    /// Undisplaced XZ position in meters, drives normal-map lookups
    pub uv: [f32; 2],
}

/// Water plane grid, centred on the origin in the XZ plane
pub struct OceanGrid {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    perlin: Perlin,
    /// Displacement weight applied on the previous update
    last_weight: f32,
}

impl OceanGrid {
    /// Create a new water grid with specified parameters
    pub fn new(physics: &OceanPhysics) -> Self {
        let grid_size = physics.grid_size;
        let spacing = physics.plane_size_m / grid_size as f32;
        let half_size = physics.plane_size_m / 2.0;

        let mut vertices = Vec::with_capacity((grid_size + 1).pow(2));
        let mut indices = Vec::with_capacity(grid_size.pow(2) * 6);

        // Generate flat XZ plane grid
        for z in 0..=grid_size {
            for x in 0..=grid_size {
                let x_pos = x as f32 * spacing - half_size;
                let z_pos = z as f32 * spacing - half_size;

                vertices.push(Vertex {
                    position: [x_pos, 0.0, z_pos],
                    uv: [x_pos, z_pos],
                });
            }
        }

        // Generate triangle indices (counter-clockwise winding seen from above)
        for z in 0..grid_size {
            for x in 0..grid_size {
                let top_left = (z * (grid_size + 1) + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * (grid_size + 1) + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self {
            vertices,
            indices,
            perlin: Perlin::new(physics.noise_seed),
            last_weight: 0.0,
        }
    }

    /// Displace vertices vertically by animated Perlin swell
    ///
    /// # Arguments
    /// * `time` - Water time accumulator
    /// * `wave_weight_m` - Swell height in meters (0 keeps the plane flat)
    /// * `physics` - Water physics parameters
    ///
    /// # Returns
    /// * `true` if vertex heights changed and need re-uploading
    pub fn update(&mut self, time: f32, wave_weight_m: f32, physics: &OceanPhysics) -> bool {
        if wave_weight_m == 0.0 && self.last_weight == 0.0 {
            return false;
        }
        self.last_weight = wave_weight_m;

        let t = (time * physics.wave_speed) as f64;
        let freq = physics.swell_frequency as f64;
        for vertex in &mut self.vertices {
            let [x, z] = vertex.uv;
            let n = self.perlin.get([x as f64 * freq, z as f64 * freq, t]) as f32;
            vertex.position[1] = n * wave_weight_m;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let physics = OceanPhysics {
            grid_size: 16,
            ..Default::default()
        };
        let grid = OceanGrid::new(&physics);

        // Check vertex count: (grid_size + 1)^2
        assert_eq!(grid.vertices.len(), 17 * 17);

        // Check triangle count: grid_size^2 * 2 triangles * 3 indices
        assert_eq!(grid.indices.len(), 16 * 16 * 6);

        // Plane spans the configured size, centred on the origin
        let first = grid.vertices.first().unwrap().position;
        let last = grid.vertices.last().unwrap().position;
        assert_eq!(first, [-5000.0, 0.0, -5000.0]);
        assert_eq!(last, [5000.0, 0.0, 5000.0]);
    }

    #[test]
    fn test_zero_weight_stays_flat() {
        let physics = OceanPhysics {
            grid_size: 8,
            ..Default::default()
        };
        let mut grid = OceanGrid::new(&physics);
        assert!(!grid.update(1.0, 0.0, &physics));
        assert!(grid.vertices.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn test_displacement_bounded_by_weight() {
        let physics = OceanPhysics {
            grid_size: 8,
            ..Default::default()
        };
        let mut grid = OceanGrid::new(&physics);
        assert!(grid.update(3.3, 2.0, &physics));
        assert!(grid.vertices.iter().all(|v| v.position[1].abs() <= 2.0 * 1.1));

        // Dropping back to zero flattens once, then stops re-uploading
        assert!(grid.update(3.4, 0.0, &physics));
        assert!(grid.vertices.iter().all(|v| v.position[1] == 0.0));
        assert!(!grid.update(3.5, 0.0, &physics));
    }
}
