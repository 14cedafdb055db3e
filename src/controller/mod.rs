// CONTROLLER: Input, flight logic, and update loop
pub mod input;
pub mod camera_controller;
pub mod flight_controller;
pub mod frame_loop;

pub use input::{ChargeInput, InputEvent, InputProcessor, InputState, MovementKeys};
pub use camera_controller::{CameraController, CameraMatrices};
pub use flight_controller::FlightController;
pub use frame_loop::{FrameLoopContext, FrameOutput};
