//! Fixed perspective camera with viewport resizing.

use glam::{Mat4, Vec3};

use crate::params::{FixedCamera, RenderConfig};

/// Camera system looking over the water from a fixed viewpoint
pub struct CameraSystem {
    placement: FixedCamera,
    config: RenderConfig,
}

impl CameraSystem {
    /// Create new camera system with specified placement and projection config
    pub fn new(placement: FixedCamera, config: RenderConfig) -> Self {
        Self { placement, config }
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::from_array(self.placement.position)
    }

    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.placement.target)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Viewport size in pixels
    pub fn viewport(&self) -> (u32, u32) {
        (self.config.window_width, self.config.window_height)
    }

    /// Track a new viewport size; zero-sized (minimised) windows are ignored
    ///
    /// Returns `true` if the aspect ratio was updated.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.config.window_width = width;
        self.config.window_height = height;
        true
    }

    pub fn view(&self) -> Mat4 {
        // Always keep Y as up vector (camera never rolls)
        Mat4::look_at_rh(self.eye(), self.target(), Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov_degrees.to_radians(),
            self.config.aspect_ratio(),
            self.config.near_plane_m,
            self.config.far_plane_m,
        )
    }

    /// Create view-projection matrix for rendering
    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}
