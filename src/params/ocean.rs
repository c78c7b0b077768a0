//! Water surface parameters and normal-map generation settings.

/// Water surface geometry and animation parameters
#[derive(Debug, Clone)]
pub struct OceanPhysics {
    /// Grid resolution (segments per side, e.g., 128 = 16,641 vertices)
    pub grid_size: usize,

    /// Edge length of the square water plane (meters)
    pub plane_size_m: f32,

    /// Swell animation speed multiplier (dimensionless, scales the time uniform)
    pub wave_speed: f32,

    /// Spatial frequency of vertex displacement swell (cycles per meter)
    pub swell_frequency: f32,

    /// Distortion scale before any wave-height input is applied
    pub initial_distortion_scale: f32,

    /// Perlin noise seed for vertex displacement
    pub noise_seed: u32,
}

impl Default for OceanPhysics {
    fn default() -> Self {
        Self {
            grid_size: 128,
            plane_size_m: 10000.0, // Reaches the horizon from the default camera
            wave_speed: 0.5,
            swell_frequency: 0.01, // 100m swells
            initial_distortion_scale: 3.7,
            noise_seed: 42,
        }
    }
}

/// Shape family stamped onto the normal map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalMapVariant {
    /// Tiny round speckles, not wrapped (a faint seam can show when tiled)
    #[default]
    Circles,

    /// Horizontally stretched ellipses drawn three times across the edges,
    /// so the map tiles seamlessly along X
    WrappedEllipses,
}

/// Procedural water normal-map settings
#[derive(Debug, Clone)]
pub struct NormalMapConfig {
    /// Square texture edge (pixels)
    pub size: u32,

    /// Shape family
    pub variant: NormalMapVariant,

    /// Seed for shape placement
    pub seed: u64,

    /// Flat color encoding an upward normal
    pub base_color: [u8; 3],

    /// Opacity of each stamped shape (0..1)
    pub stamp_alpha: f32,

    /// Number of circles (Circles variant)
    pub circle_count: usize,

    /// Circle radius upper bound (pixels, lower bound is 0)
    pub max_circle_radius_px: f32,

    /// Number of ellipses (WrappedEllipses variant)
    pub ellipse_count: usize,

    /// Ellipse horizontal radius range (pixels)
    pub ellipse_radius_x_px: (f32, f32),

    /// Vertical radius as a fraction of the horizontal one
    pub ellipse_aspect: (f32, f32),
}

impl Default for NormalMapConfig {
    fn default() -> Self {
        Self {
            size: 512,
            variant: NormalMapVariant::default(),
            seed: 7,
            base_color: [128, 128, 255],
            stamp_alpha: 0.1,
            circle_count: 20000,
            max_circle_radius_px: 2.0,
            ellipse_count: 4000,
            ellipse_radius_x_px: (3.0, 14.0),
            ellipse_aspect: (0.2, 0.5), // Always flatter than wide
        }
    }
}
