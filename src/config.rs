//! Runtime settings with defaults taken from the original demo, persisted as RON.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "config.ron";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub flight: FlightConfig,
    pub input: KeyBindings,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Skyrocket".to_string(),
        }
    }
}

/// Initial camera placement and the fixed projection parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub horizontal_angle: f32,
    pub vertical_angle: f32,
    pub fov_deg: f32,
    pub speed: f32,
    pub mouse_sensitivity: f32,
    /// Fixed projection aspect; window resizes do not change it.
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, 70.0],
            horizontal_angle: 3.14,
            vertical_angle: 0.3,
            fov_deg: 45.0,
            speed: 3.0,
            mouse_sensitivity: 0.005,
            aspect: 4.0 / 3.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

/// How the per-tick flight constants relate to wall-clock time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum TickMode {
    /// Every update applies the constants once, regardless of frame time.
    PerFrame,
    /// Constants are scaled by `dt * hz`, matching `PerFrame` at `hz` fps.
    FixedRate { hz: f32 },
}

impl TickMode {
    /// `FixedRate` with a rate that is zero, negative or not finite becomes `PerFrame`.
    pub fn sanitized(self) -> Self {
        match self {
            TickMode::FixedRate { hz } if hz.is_finite() && hz > 0.0 => self,
            TickMode::FixedRate { .. } => TickMode::PerFrame,
            TickMode::PerFrame => self,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlightConfig {
    pub tick_mode: TickMode,
    pub charge_step: f32,
    pub max_charge: f32,
    /// Speed lost per tick while the parachute is stowed.
    pub gravity_decay: f32,
    /// Divisor turning vertical speed into height change per tick.
    pub gravity: f32,
    pub fall_tilt_deg: f32,
    pub parachute_speed: f32,
    pub parachute_drag: f32,
    pub landing_height: f32,
    pub reset_height: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            tick_mode: TickMode::PerFrame,
            charge_step: 0.01,
            max_charge: 3.0,
            gravity_decay: 0.01,
            gravity: 9.8,
            fall_tilt_deg: 10.0,
            parachute_speed: -2.0,
            parachute_drag: 5.0,
            landing_height: -0.5,
            reset_height: -0.5,
        }
    }
}

/// Physical key bindings. Physical codes keep the layout independent of the
/// user's keyboard language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub charge: KeyCode,
    pub exit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::ArrowUp,
            backward: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            charge: KeyCode::Space,
            exit: KeyCode::Escape,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Show phase, height and speed in the window title.
    pub status_in_title: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            status_in_title: true,
        }
    }
}

impl Config {
    /// Load `config.ron` from the given directory, or write a default one there.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let mut config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.sanitize();
            tracing::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            tracing::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Replace values the simulation cannot run with.
    pub fn sanitize(&mut self) {
        let tick_mode = self.flight.tick_mode.sanitized();
        if tick_mode != self.flight.tick_mode {
            tracing::warn!(
                configured = ?self.flight.tick_mode,
                "tick rate must be positive, falling back to per-frame steps"
            );
            self.flight.tick_mode = tick_mode;
        }
    }

    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(hz) = args.tick_rate {
            self.flight.tick_mode = TickMode::FixedRate { hz }.sanitized();
        }
    }
}

/// Command-line arguments. Values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "skyrocket", about = "Charge, launch and land a toy rocket")]
pub struct CliArgs {
    /// Directory holding config.ron; created with defaults if missing.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Scale flight physics to this frame rate; 0 keeps per-frame steps.
    #[arg(long)]
    pub tick_rate: Option<f32>,
}
