use glam::{Mat4, Vec3};

use crate::config::CameraConfig;
use crate::controller::input::MovementKeys;
use crate::model::CameraState;

/// View and projection for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    pub view: Mat4,
    pub projection: Mat4,
}

impl CameraMatrices {
    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Handles camera movement and orientation
#[derive(Debug, Clone)]
pub struct CameraController {
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl CameraController {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            aspect: config.aspect,
            z_near: config.z_near,
            z_far: config.z_far,
        }
    }

    /// Apply a look delta measured from the screen centre.
    pub fn apply_look(&self, camera: &mut CameraState, dx: f32, dy: f32) {
        camera.horizontal_angle += camera.mouse_sensitivity * dx;
        camera.vertical_angle += camera.mouse_sensitivity * dy;
    }

    /// Move along the view direction and the horizontal right vector. Each held
    /// key contributes a full `speed * dt` step, so diagonals are faster.
    pub fn update_movement(&self, camera: &mut CameraState, keys: MovementKeys, dt: f32) {
        let step = camera.speed * dt;
        let direction = camera.direction();
        let right = camera.right();

        let mut cam_move = Vec3::ZERO;
        if keys.forward {
            cam_move += direction;
        }
        if keys.backward {
            cam_move -= direction;
        }
        if keys.right {
            cam_move += right;
        }
        if keys.left {
            cam_move -= right;
        }

        camera.position += cam_move * step;
    }

    pub fn matrices(&self, camera: &CameraState) -> CameraMatrices {
        CameraMatrices {
            view: camera.view(),
            projection: camera.projection(self.aspect, self.z_near, self.z_far),
        }
    }

    /// One frame: look, move, then derive the matrices.
    pub fn update(
        &self,
        camera: &mut CameraState,
        dt: f32,
        mouse_dx: f32,
        mouse_dy: f32,
        keys: MovementKeys,
    ) -> CameraMatrices {
        self.apply_look(camera, mouse_dx, mouse_dy);
        self.update_movement(camera, keys, dt);
        self.matrices(camera)
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn level_camera() -> CameraState {
        let mut camera = CameraState::default();
        camera.position = Vec3::ZERO;
        camera.horizontal_angle = 0.0;
        camera.vertical_angle = 0.0;
        camera.speed = 3.0;
        camera
    }

    #[test]
    fn test_no_keys_keeps_position() {
        let controller = CameraController::default();
        let mut camera = CameraState::default();
        let start = camera.position;
        for dt in [0.0, 0.016, 1.0, 25.0] {
            controller.update(&mut camera, dt, 4.0, -2.0, MovementKeys::default());
            assert_eq!(camera.position, start);
        }
    }

    #[test]
    fn test_look_accumulates_without_wrapping() {
        let controller = CameraController::default();
        let mut camera = level_camera();
        camera.mouse_sensitivity = 0.005;
        for _ in 0..1000 {
            controller.apply_look(&mut camera, 10.0, 4.0);
        }
        assert!((camera.horizontal_angle - 50.0).abs() < 1e-2);
        assert!((camera.vertical_angle - 20.0).abs() < 1e-2);
    }

    #[test]
    fn test_forward_moves_along_direction() {
        let controller = CameraController::default();
        let mut camera = level_camera();
        let keys = MovementKeys { forward: true, ..MovementKeys::default() };
        controller.update(&mut camera, 0.5, 0.0, 0.0, keys);
        assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, 1.5), 1e-5));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let controller = CameraController::default();
        let mut camera = level_camera();
        let keys = MovementKeys { forward: true, backward: true, left: true, right: true };
        controller.update(&mut camera, 1.0, 0.0, 0.0, keys);
        assert!(camera.position.abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let controller = CameraController::default();
        let mut camera = level_camera();
        let keys = MovementKeys { forward: true, right: true, ..MovementKeys::default() };
        controller.update(&mut camera, 1.0, 0.0, 0.0, keys);
        let travelled = camera.position.length();
        assert!((travelled - 3.0 * std::f32::consts::SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn test_projection_uses_fixed_aspect_and_range() {
        let controller = CameraController::default();
        let camera = CameraState::default();
        let matrices = controller.matrices(&camera);

        // Points on the near and far planes land on the clip-space depth bounds.
        let near = matrices.projection * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = matrices.projection * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert!((near.z / near.w + 1.0).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);

        let x_scale = matrices.projection.x_axis.x;
        let y_scale = matrices.projection.y_axis.y;
        assert!((y_scale / x_scale - 4.0 / 3.0).abs() < 1e-5);
    }
}
