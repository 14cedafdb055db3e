use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{CursorGrabMode, Window, WindowId};

// Import from the library crate
use skyrocket::controller::{InputEvent, InputState};
use skyrocket::{logging, view, AppError, CliArgs, Config, FrameLoopContext};

const TITLE_REFRESH: Duration = Duration::from_millis(250);

struct App {
    config: Config,
    window: Option<Arc<Window>>,
    frame_loop: FrameLoopContext,
    input_state: InputState,
    last_title_update: Option<Instant>,
    focused: bool,
    cursor_warp_failed: bool,
    failure: Option<AppError>,
}

impl App {
    fn new(config: Config) -> Self {
        let frame_loop = FrameLoopContext::new(&config);
        Self {
            config,
            window: None,
            frame_loop,
            input_state: InputState::new(),
            last_title_update: None,
            focused: true,
            cursor_warp_failed: false,
            failure: None,
        }
    }

    fn set_cursor_captured(window: &Window, captured: bool) {
        if captured {
            // Confined keeps CursorMoved events flowing, which the look delta is built from.
            if window.set_cursor_grab(CursorGrabMode::Confined).is_err() {
                let _ = window.set_cursor_grab(CursorGrabMode::Locked);
            }
            window.set_cursor_visible(false);
        } else {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
    }

    /// Clear per-frame input and, while focused, warp the cursor back to the
    /// window centre.
    fn end_frame(&mut self) {
        let center = self.frame_loop.cursor_center;
        self.input_state.end_frame(center);

        if !self.focused || self.cursor_warp_failed {
            return;
        }
        let Some(window) = &self.window else { return };
        if let Err(e) = window.set_cursor_position(PhysicalPosition::new(center.0, center.1)) {
            warn!("Cursor cannot be re-centred, mouse look disabled: {e}");
            self.cursor_warp_failed = true;
            self.frame_loop.look_enabled = false;
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.frame_loop.look_enabled = focused && !self.cursor_warp_failed;
        if let Some(window) = &self.window {
            Self::set_cursor_captured(window, focused);
        }
        if focused {
            // Drop whatever offset the cursor picked up outside the window.
            self.end_frame();
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let output = self.frame_loop.update(&self.input_state, now);

        if self.frame_loop.wants_exit(&self.input_state) {
            info!("Exit key pressed, shutting down");
            event_loop.exit();
            return;
        }

        let title_due = self
            .last_title_update
            .map_or(true, |last| now.duration_since(last) >= TITLE_REFRESH);
        if self.config.debug.status_in_title && title_due {
            if let Some(window) = &self.window {
                window.set_title(&format!(
                    "{} - {}",
                    self.config.window.title,
                    view::status_line(&output)
                ));
            }
            self.last_title_update = Some(now);
        }

        self.end_frame();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(self.config.window.width, self.config.window.height));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Window creation failed: {e}");
                self.failure = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.frame_loop.set_cursor_center(size.width, size.height);
        Self::set_cursor_captured(&window, true);
        info!("Window created: {}x{}", size.width, size.height);

        self.window = Some(window);
        self.end_frame();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(input) = InputEvent::from_window_event(&event) {
            self.input_state.process_event(&input);
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.frame_loop.set_cursor_center(size.width, size.height);
            }
            WindowEvent::Focused(focused) => self.set_focused(focused),
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = CliArgs::parse();
    let mut config = match &args.config {
        Some(dir) => Config::load_or_create(dir)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    logging::init(&config.debug.log_level);
    info!(
        tick_mode = ?config.flight.tick_mode,
        config_dir = ?args.config,
        "Starting skyrocket"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
