//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (meters, seconds, degrees, etc.)
//! - Documented ranges and meanings
//! - Type safety where possible

mod camera;
mod controls;
mod ocean;
mod render;
mod weather;

// Re-export all types
pub use camera::FixedCamera;
pub use controls::ControlMapping;
pub use ocean::{NormalMapConfig, NormalMapVariant, OceanPhysics};
pub use render::RenderConfig;
pub use weather::{rgb_from_hex, LightningConfig, RainConfig, WeatherBundle};
