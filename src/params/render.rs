//! Window and camera configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window title
    pub title: String,

    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    /// 10° = long-lens look, the plane fills the frame without perspective skew
    pub fov_degrees: f32,

    /// Near clipping plane (plane units)
    pub near_plane: f32,

    /// Far clipping plane (plane units)
    pub far_plane: f32,

    /// Camera distance from the origin along +z, looking at the origin
    pub camera_distance: f32,

    /// Framebuffer clear color (linear RGBA)
    pub clear_color: [f64; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "PUSHPA".to_string(),
            window_width: 1280,
            window_height: 720,
            fov_degrees: 10.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            camera_distance: 5.0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}
