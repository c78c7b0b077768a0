//! Water surface: plane mesh and procedural normal map.

mod mesh;
mod normal_map;

// Re-export public types
pub use mesh::{OceanGrid, Vertex};
pub use normal_map::{generate_normal_map, SurfaceTexture, WrapMode};
