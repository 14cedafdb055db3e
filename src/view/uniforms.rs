use glam::{Mat4, Vec3};

use crate::controller::FrameOutput;
use crate::model::RocketPose;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            view_proj: (projection * view).to_cols_array_2d(),
        }
    }
}

/// Model transforms for the rocket body and its parachute.
///
/// The body tilts around X once it falls; the parachute only follows the height.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RocketUniform {
    pub rocket_model: [[f32; 4]; 4],
    pub parachute_model: [[f32; 4]; 4],
    /// 1.0 when the parachute should be drawn.
    pub parachute_visible: f32,
    pub _pad: [f32; 3],
}

impl RocketUniform {
    pub fn from_pose(pose: &RocketPose) -> Self {
        let lift = Mat4::from_translation(Vec3::new(0.0, pose.height, 0.0));
        let tilt = Mat4::from_rotation_x(pose.rotation.to_radians());
        Self {
            rocket_model: (lift * tilt).to_cols_array_2d(),
            parachute_model: lift.to_cols_array_2d(),
            parachute_visible: if pose.parachute_visible { 1.0 } else { 0.0 },
            _pad: [0.0; 3],
        }
    }
}

/// Both uniform blocks for one frame.
pub fn frame_uniforms(frame: &FrameOutput) -> (CameraUniform, RocketUniform) {
    (
        CameraUniform::new(frame.view, frame.projection),
        RocketUniform::from_pose(&frame.pose),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlightState;

    #[test]
    fn test_uniform_sizes_are_gpu_friendly() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 3 * 64);
        assert_eq!(std::mem::size_of::<RocketUniform>() % 16, 0);
        let rocket = RocketUniform::from_pose(&FlightState::new().pose());
        assert_eq!(bytemuck::bytes_of(&rocket).len(), std::mem::size_of::<RocketUniform>());
    }

    #[test]
    fn test_rocket_model_follows_pose() {
        let flight = FlightState {
            height: 12.5,
            rotation: 10.0,
            parachute_deployed: true,
            launched: true,
            ..FlightState::default()
        };
        let uniform = RocketUniform::from_pose(&flight.pose());

        let parachute = Mat4::from_cols_array_2d(&uniform.parachute_model);
        assert!(parachute
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(0.0, 12.5, 0.0), 1e-5));

        // The nose tilts toward +Z.
        let rocket = Mat4::from_cols_array_2d(&uniform.rocket_model);
        let nose = rocket.transform_point3(Vec3::Y);
        assert!((nose.y - (12.5 + 10f32.to_radians().cos())).abs() < 1e-5);
        assert!((nose.z - 10f32.to_radians().sin()).abs() < 1e-5);
        assert_eq!(uniform.parachute_visible, 1.0);
    }

    #[test]
    fn test_camera_uniform_combines_matrices() {
        let view = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let projection = Mat4::perspective_rh_gl(1.0, 4.0 / 3.0, 0.1, 100.0);
        let uniform = CameraUniform::new(view, projection);
        assert_eq!(Mat4::from_cols_array_2d(&uniform.view_proj), projection * view);
    }
}
