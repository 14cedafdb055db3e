// MODEL: Camera and rocket state
pub mod camera;
pub mod flight;

pub use camera::CameraState;
pub use flight::{FlightPhase, FlightState, RocketPose};
