//! Camera placement.

/// Fixed viewpoint over the water
#[derive(Debug, Clone)]
pub struct FixedCamera {
    /// Camera position (meters)
    pub position: [f32; 3],

    /// Look-at target (meters)
    pub target: [f32; 3],
}

impl Default for FixedCamera {
    fn default() -> Self {
        Self {
            position: [0.0, 30.0, 100.0], // Low over the water, slightly back
            target: [0.0, 0.0, 0.0],
        }
    }
}
