//! Plane geometry parameters.

/// Subdivided plane the wave is drawn on, lying in local XY facing +z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneParams {
    /// Extent along local x (plane units)
    pub width: f32,

    /// Extent along local y (plane units)
    pub height: f32,

    /// Segments along x (vertices per row = segments + 1)
    pub width_segments: u32,

    /// Segments along y
    pub height_segments: u32,
}

impl Default for PlaneParams {
    fn default() -> Self {
        Self {
            width: 0.4,
            height: 0.6,
            width_segments: 16,
            height_segments: 16,
        }
    }
}

impl PlaneParams {
    /// Vertex count: (segX + 1) * (segY + 1)
    pub fn vertex_count(&self) -> usize {
        (self.width_segments as usize + 1) * (self.height_segments as usize + 1)
    }

    /// Index count: two triangles per cell
    pub fn index_count(&self) -> usize {
        self.width_segments as usize * self.height_segments as usize * 6
    }
}
