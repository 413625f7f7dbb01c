//! Fixed perspective camera looking down -z at the wave plane.

use glam::{Mat4, Vec3};

use crate::params::RenderConfig;

/// Stationary camera on the +z axis, aimed at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Vec3,
    fov_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, config.camera_distance),
            fov_degrees: config.fov_degrees,
            aspect: config.aspect_ratio(),
            near: config.near_plane,
            far: config.far_plane,
        }
    }

    /// Track a new framebuffer size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Combined view-projection for the camera uniform
    pub fn view_proj(&self) -> Mat4 {
        // Y stays up; the camera never rolls
        let view = Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn ndc(view_proj: Mat4, point: Vec3) -> Vec3 {
        let clip = view_proj * point.extend(1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::new(&RenderConfig::default());
        let center = ndc(camera.view_proj(), Vec3::ZERO);
        assert!(center.x.abs() < 1e-6);
        assert!(center.y.abs() < 1e-6);
        assert!(center.z > 0.0 && center.z < 1.0);
    }

    #[test]
    fn test_default_plane_fits_in_view() {
        let camera = Camera::new(&RenderConfig::default());
        let view_proj = camera.view_proj();

        // Corners of the 0.4 x 0.6 plane, pushed to the displacement extremes
        for x in [-0.2, 0.2] {
            for y in [-0.3, 0.3] {
                for z in [-0.26, 0.26] {
                    let p = ndc(view_proj, Vec3::new(x, y, z));
                    assert!(p.x.abs() < 1.0 && p.y.abs() < 1.0, "{:?} off screen", p);
                    assert!(p.z > 0.0 && p.z < 1.0);
                }
            }
        }
    }

    #[test]
    fn test_closer_points_are_nearer_in_depth() {
        let camera = Camera::new(&RenderConfig::default());
        let view_proj = camera.view_proj();
        let raised = ndc(view_proj, Vec3::new(0.0, 0.0, 0.2));
        let lowered = ndc(view_proj, Vec3::new(0.0, 0.0, -0.2));
        assert!(raised.z < lowered.z);
    }

    #[test]
    fn test_resize_changes_horizontal_scale_only() {
        let mut camera = Camera::new(&RenderConfig::default());
        let before = camera.view_proj() * Vec4::new(0.1, 0.1, 0.0, 1.0);
        camera.resize(640, 640);
        let after = camera.view_proj() * Vec4::new(0.1, 0.1, 0.0, 1.0);

        assert!((before.y - after.y).abs() < 1e-6);
        assert!(after.x > before.x);
    }

    #[test]
    fn test_resize_to_zero_height_stays_finite() {
        let mut camera = Camera::new(&RenderConfig::default());
        camera.resize(800, 0);
        assert!(camera.view_proj().is_finite());
    }
}
