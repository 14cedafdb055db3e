use std::time::Instant;

use glam::Mat4;

use crate::config::Config;
use crate::controller::camera_controller::{CameraController, CameraMatrices};
use crate::controller::flight_controller::FlightController;
use crate::controller::input::{InputProcessor, InputState};
use crate::model::{CameraState, FlightPhase, FlightState, RocketPose};

/// What the renderer needs after one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub view: Mat4,
    pub projection: Mat4,
    pub pose: RocketPose,
    /// Seconds since the previous frame.
    pub dt: f32,
}

/// Main loop state: owns both simulations and advances them once per frame.
pub struct FrameLoopContext {
    pub camera: CameraState,
    pub flight: FlightState,
    pub camera_controller: CameraController,
    pub flight_controller: FlightController,
    pub input_processor: InputProcessor,
    /// Screen-space point the cursor is warped back to every frame.
    pub cursor_center: (f64, f64),
    /// Off while the window is unfocused or the cursor cannot be warped;
    /// cursor offsets are then ignored.
    pub look_enabled: bool,
    last_phase: FlightPhase,
}

impl FrameLoopContext {
    pub fn new(config: &Config) -> Self {
        Self {
            camera: CameraState::new(&config.camera),
            flight: FlightState::new(),
            camera_controller: CameraController::new(&config.camera),
            flight_controller: FlightController::new(config.flight.clone()),
            input_processor: InputProcessor::new(config.input.clone()),
            cursor_center: (
                f64::from(config.window.width) / 2.0,
                f64::from(config.window.height) / 2.0,
            ),
            look_enabled: true,
            last_phase: FlightPhase::Idle,
        }
    }

    pub fn set_cursor_center(&mut self, width: u32, height: u32) {
        self.cursor_center = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    }

    /// Poll input, advance camera and rocket, and return matrices and pose.
    /// Clearing the per-frame transients in `input` is left to the caller.
    pub fn update(&mut self, input: &InputState, now: Instant) -> FrameOutput {
        let dt = self.camera.advance_clock(now);

        let (dx, dy) = if self.look_enabled {
            input.centered_delta(self.cursor_center)
        } else {
            (0.0, 0.0)
        };
        let movement = self.input_processor.movement(input);
        let CameraMatrices { view, projection } =
            self.camera_controller.update(&mut self.camera, dt, dx, dy, movement);

        let charge = self.input_processor.charge(input);
        let pose = self.flight_controller.update(&mut self.flight, dt, charge);

        if pose.phase != self.last_phase {
            tracing::info!(
                from = %self.last_phase,
                to = %pose.phase,
                height = pose.height,
                speed = pose.vertical_speed,
                gauge = pose.charge_gauge,
                "flight phase changed"
            );
            self.last_phase = pose.phase;
        }
        tracing::trace!(
            dt,
            height = pose.height,
            speed = pose.vertical_speed,
            eye = ?self.camera.position,
            "frame"
        );

        FrameOutput { view, projection, pose, dt }
    }

    pub fn wants_exit(&self, input: &InputState) -> bool {
        self.input_processor.wants_exit(input)
    }
}
