// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod error;
pub mod logging;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use config::{CliArgs, Config};
pub use controller::{FrameLoopContext, FrameOutput};
pub use error::{AppError, ConfigError};
pub use model::{CameraState, FlightPhase, FlightState, RocketPose};
