use std::time::Instant;

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Free-flying observer camera.
///
/// Angles are plain accumulators in radians and are never wrapped or clamped,
/// so looking straight up and beyond flips the view.
#[derive(Debug, Clone)]
pub struct CameraState {
    pub position: Vec3,
    pub horizontal_angle: f32,
    pub vertical_angle: f32,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Movement speed in units per second.
    pub speed: f32,
    /// Radians per pixel of cursor travel.
    pub mouse_sensitivity: f32,
    pub last_update: Option<Instant>,
}

impl CameraState {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: Vec3::from_array(config.position),
            horizontal_angle: config.horizontal_angle,
            vertical_angle: config.vertical_angle,
            fov_deg: config.fov_deg,
            speed: config.speed,
            mouse_sensitivity: config.mouse_sensitivity,
            last_update: None,
        }
    }

    /// Spherical to Cartesian conversion of the two view angles.
    pub fn direction(&self) -> Vec3 {
        let (h, v) = (self.horizontal_angle, self.vertical_angle);
        Vec3::new(v.cos() * h.sin(), v.sin(), v.cos() * h.cos())
    }

    /// Horizontal right vector, a quarter turn clockwise from the heading.
    pub fn right(&self) -> Vec3 {
        let h = self.horizontal_angle - std::f32::consts::FRAC_PI_2;
        Vec3::new(h.sin(), 0.0, h.cos())
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.direction())
    }

    pub fn target(&self) -> Vec3 { self.position + self.direction() }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target(), self.up())
    }

    /// OpenGL clip-space perspective (depth in -1..1).
    pub fn projection(&self, aspect: f32, z_near: f32, z_far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), aspect, z_near, z_far)
    }

    /// Seconds since the previous call, or zero on the first one. Stores `now`.
    pub fn advance_clock(&mut self, now: Instant) -> f32 {
        let dt = self
            .last_update
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_update = Some(now);
        dt
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_basis_vectors_are_orthogonal() {
        let mut camera = CameraState::default();
        for (h, v) in [(0.0, 0.0), (3.14, 0.3), (-1.2, 0.9), (7.5, -0.4)] {
            camera.horizontal_angle = h;
            camera.vertical_angle = v;
            let dir = camera.direction();
            let right = camera.right();
            let up = camera.up();
            assert!((dir.length() - 1.0).abs() < 1e-5);
            assert!(dir.dot(right).abs() < 1e-5);
            assert!(up.dot(dir).abs() < 1e-5);
            assert!(up.dot(right).abs() < 1e-5);
        }
    }

    #[test]
    fn test_level_camera_looks_along_heading() {
        let mut camera = CameraState::default();
        camera.horizontal_angle = 0.0;
        camera.vertical_angle = 0.0;
        assert!(camera.direction().abs_diff_eq(Vec3::Z, 1e-6));
        assert!(camera.right().abs_diff_eq(Vec3::NEG_X, 1e-6));
        assert!(camera.up().abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_view_maps_target_onto_negative_z() {
        let camera = CameraState::default();
        let in_view = camera.view().transform_point3(camera.target());
        assert!(in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-4));
    }

    #[test]
    fn test_first_clock_tick_is_zero() {
        let mut camera = CameraState::default();
        let start = Instant::now();
        assert_eq!(camera.advance_clock(start), 0.0);
        let dt = camera.advance_clock(start + Duration::from_millis(250));
        assert!((dt - 0.25).abs() < 1e-6);
        assert_eq!(camera.last_update, Some(start + Duration::from_millis(250)));
    }
}
