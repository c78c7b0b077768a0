//! Procedural water normal map.
//!
//! Starts from a flat "straight up" normal color and perturbs it by stamping
//! thousands of faint, randomly tinted shapes. The result is sampled with
//! repeat addressing, so it is tiled across the whole water plane.

use std::path::Path;

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::OceanResult;
use crate::params::{NormalMapConfig, NormalMapVariant};

/// Texture addressing mode along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
}

/// Square RGB normal-map raster with its addressing mode
#[derive(Debug, Clone)]
pub struct SurfaceTexture {
    image: RgbImage,
    wrap_u: WrapMode,
    wrap_v: WrapMode,
}

impl SurfaceTexture {
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn wrap_modes(&self) -> (WrapMode, WrapMode) {
        (self.wrap_u, self.wrap_v)
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Texel lookup honouring the wrap mode (coordinates may be out of range)
    pub fn texel(&self, x: i64, y: i64) -> [u8; 3] {
        let size = self.size() as i64;
        let resolve = |c: i64, mode: WrapMode| match mode {
            WrapMode::Repeat => c.rem_euclid(size),
        };
        let px = resolve(x, self.wrap_u) as u32;
        let py = resolve(y, self.wrap_v) as u32;
        self.image.get_pixel(px, py).0
    }

    /// Tightly packed RGBA8 rows for GPU upload (no RGB8 texture format exists)
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.image
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2], 255])
            .collect()
    }

    /// Write the raster to disk (format picked from the extension)
    pub fn save(&self, path: &Path) -> OceanResult<()> {
        self.image.save(path)?;
        Ok(())
    }
}

/// Floating-point canvas with source-over blending
struct Canvas {
    size: u32,
    pixels: Vec<[f32; 3]>,
}

impl Canvas {
    fn filled(size: u32, color: [u8; 3]) -> Self {
        let fill = color.map(f32::from);
        Self {
            size,
            pixels: vec![fill; (size * size) as usize],
        }
    }

    fn blend(&mut self, x: u32, y: u32, color: [f32; 3], alpha: f32) {
        let px = &mut self.pixels[(y * self.size + x) as usize];
        for (dst, src) in px.iter_mut().zip(color) {
            *dst = *dst * (1.0 - alpha) + src * alpha;
        }
    }

    /// Fill an axis-aligned ellipse; pixels are covered when their centre is inside.
    /// Parts falling off the canvas are clipped.
    fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: [f32; 3], alpha: f32) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let max = self.size as f32;
        let x0 = (cx - rx).floor().max(0.0) as u32;
        let x1 = (cx + rx).ceil().min(max) as u32;
        let y0 = (cy - ry).floor().max(0.0) as u32;
        let y1 = (cy + ry).ceil().min(max) as u32;

        for y in y0..y1 {
            let dy = (y as f32 + 0.5 - cy) / ry;
            for x in x0..x1 {
                let dx = (x as f32 + 0.5 - cx) / rx;
                if dx * dx + dy * dy <= 1.0 {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// Stamp the ellipse at x, x - size and x + size so it wraps around both edges
    fn fill_ellipse_wrapped_x(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        color: [f32; 3],
        alpha: f32,
    ) {
        let width = self.size as f32;
        for offset in [0.0, -width, width] {
            self.fill_ellipse(cx + offset, cy, rx, ry, color, alpha);
        }
    }

    fn into_image(self) -> RgbImage {
        let size = self.size;
        let mut image = RgbImage::new(size, size);
        for (i, px) in self.pixels.into_iter().enumerate() {
            let x = i as u32 % size;
            let y = i as u32 / size;
            image.put_pixel(x, y, Rgb(px.map(|c| c.round().clamp(0.0, 255.0) as u8)));
        }
        image
    }
}

/// Random tint: red and green jitter across the full range, blue stays maxed
fn jitter_color(rng: &mut StdRng) -> [f32; 3] {
    [rng.gen::<f32>() * 255.0, rng.gen::<f32>() * 255.0, 255.0]
}

/// Generate the water normal map
pub fn generate_normal_map(config: &NormalMapConfig) -> SurfaceTexture {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut canvas = Canvas::filled(config.size, config.base_color);
    let size = config.size as f32;

    match config.variant {
        NormalMapVariant::Circles => {
            for _ in 0..config.circle_count {
                let x = rng.gen::<f32>() * size;
                let y = rng.gen::<f32>() * size;
                let r = rng.gen::<f32>() * config.max_circle_radius_px;
                let color = jitter_color(&mut rng);
                canvas.fill_ellipse(x, y, r, r, color, config.stamp_alpha);
            }
        }
        NormalMapVariant::WrappedEllipses => {
            let (rx_min, rx_max) = config.ellipse_radius_x_px;
            let (aspect_min, aspect_max) = config.ellipse_aspect;
            for _ in 0..config.ellipse_count {
                let x = rng.gen::<f32>() * size;
                let y = rng.gen::<f32>() * size;
                let rx = rng.gen_range(rx_min..rx_max);
                let ry = rx * rng.gen_range(aspect_min..aspect_max);
                let color = jitter_color(&mut rng);
                canvas.fill_ellipse_wrapped_x(x, y, rx, ry, color, config.stamp_alpha);
            }
        }
    }

    log::debug!(
        "Generated {}x{} normal map ({:?})",
        config.size,
        config.size,
        config.variant
    );

    SurfaceTexture {
        image: canvas.into_image(),
        wrap_u: WrapMode::Repeat,
        wrap_v: WrapMode::Repeat,
    }
}
