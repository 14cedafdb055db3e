// VIEW: Data handed to the renderer and the status line
pub mod uniforms;
pub mod hud;

pub use uniforms::{CameraUniform, RocketUniform, frame_uniforms};
pub use hud::status_line;
