//! Startup error types.
//!
//! Everything here is fatal: the scene is either fully built or not started.

use thiserror::Error;

/// Errors raised while bringing the window, GPU and scene up
#[derive(Debug, Error)]
pub enum OceanError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    Adapter,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    SurfaceFormat,

    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type OceanResult<T> = Result<T, OceanError>;
