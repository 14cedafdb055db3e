//! Platform-agnostic input handling: raw key/cursor state and key bindings.
use std::collections::HashSet;

use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config::KeyBindings;

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key { code: KeyCode, state: ElementState, repeat: bool },
    CursorMoved { x: f64, y: f64 },
    FocusLost,
}

impl InputEvent {
    /// Convert a winit window event into an input event, if it carries one.
    pub fn from_window_event(event: &winit::event::WindowEvent) -> Option<Self> {
        use winit::event::WindowEvent;
        match event {
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) => Some(InputEvent::Key {
                    code,
                    state: event.state,
                    repeat: event.repeat,
                }),
                PhysicalKey::Unidentified(_) => None,
            },
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::CursorMoved {
                x: position.x,
                y: position.y,
            }),
            WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
            _ => None,
        }
    }
}

/// Raw input accumulated between two frames.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub pressed_keys: HashSet<KeyCode>,
    pub released_keys: HashSet<KeyCode>,
    /// Last known cursor position, `None` until the cursor first moves.
    pub cursor: Option<(f64, f64)>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Key { repeat: true, .. } => {}
            InputEvent::Key { code, state: ElementState::Pressed, .. } => {
                self.pressed_keys.insert(code);
            }
            InputEvent::Key { code, state: ElementState::Released, .. } => {
                if self.pressed_keys.remove(&code) {
                    self.released_keys.insert(code);
                }
            }
            InputEvent::CursorMoved { x, y } => {
                self.cursor = Some((x, y));
            }
            InputEvent::FocusLost => {
                self.clear_keys();
            }
        }
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn was_key_released(&self, key: KeyCode) -> bool {
        self.released_keys.contains(&key)
    }

    /// Drop held keys without reporting releases, so focus loss never launches.
    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
        self.released_keys.clear();
    }

    /// Cursor offset from `center`, positive when the cursor sits left of / above it.
    pub fn centered_delta(&self, center: (f64, f64)) -> (f32, f32) {
        match self.cursor {
            Some((x, y)) => ((center.0 - x) as f32, (center.1 - y) as f32),
            None => (0.0, 0.0),
        }
    }

    /// Forget per-frame transients. The host warps the cursor back to `center`
    /// right after this, so the next delta starts from there.
    pub fn end_frame(&mut self, center: (f64, f64)) {
        self.released_keys.clear();
        if self.cursor.is_some() {
            self.cursor = Some(center);
        }
    }
}

/// Movement keys held this frame; simultaneous keys add up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Charge key signal for one flight tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChargeInput {
    pub held: bool,
    pub just_released: bool,
}

/// High-level input processor
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn movement(&self, input: &InputState) -> MovementKeys {
        MovementKeys {
            forward: input.is_key_pressed(self.bindings.forward),
            backward: input.is_key_pressed(self.bindings.backward),
            left: input.is_key_pressed(self.bindings.left),
            right: input.is_key_pressed(self.bindings.right),
        }
    }

    pub fn charge(&self, input: &InputState) -> ChargeInput {
        ChargeInput {
            held: input.is_key_pressed(self.bindings.charge),
            just_released: input.was_key_released(self.bindings.charge),
        }
    }

    pub fn wants_exit(&self, input: &InputState) -> bool {
        input.is_key_pressed(self.bindings.exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, state: ElementState) -> InputEvent {
        InputEvent::Key { code, state, repeat: false }
    }

    #[test]
    fn test_press_and_release_tracking() {
        let mut input = InputState::new();
        input.process_event(&key(KeyCode::Space, ElementState::Pressed));
        assert!(input.is_key_pressed(KeyCode::Space));
        assert!(!input.was_key_released(KeyCode::Space));

        input.process_event(&key(KeyCode::Space, ElementState::Released));
        assert!(!input.is_key_pressed(KeyCode::Space));
        assert!(input.was_key_released(KeyCode::Space));

        input.end_frame((512.0, 384.0));
        assert!(!input.was_key_released(KeyCode::Space));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut input = InputState::new();
        input.process_event(&key(KeyCode::Space, ElementState::Released));
        assert!(!input.was_key_released(KeyCode::Space));
    }

    #[test]
    fn test_repeat_events_ignored() {
        let mut input = InputState::new();
        input.process_event(&InputEvent::Key {
            code: KeyCode::ArrowUp,
            state: ElementState::Pressed,
            repeat: true,
        });
        assert!(!input.is_key_pressed(KeyCode::ArrowUp));
    }

    #[test]
    fn test_focus_lost_clears_keys() {
        let mut input = InputState::new();
        input.process_event(&key(KeyCode::ArrowUp, ElementState::Pressed));
        input.process_event(&key(KeyCode::Space, ElementState::Pressed));
        input.process_event(&InputEvent::FocusLost);
        assert!(input.pressed_keys.is_empty());
        assert!(!input.was_key_released(KeyCode::Space));
    }

    #[test]
    fn test_centered_delta_and_recenter() {
        let mut input = InputState::new();
        assert_eq!(input.centered_delta((512.0, 384.0)), (0.0, 0.0));

        input.process_event(&InputEvent::CursorMoved { x: 500.0, y: 400.0 });
        assert_eq!(input.centered_delta((512.0, 384.0)), (12.0, -16.0));

        input.end_frame((512.0, 384.0));
        assert_eq!(input.centered_delta((512.0, 384.0)), (0.0, 0.0));
    }

    #[test]
    fn test_processor_uses_bindings() {
        let processor = InputProcessor::default();
        let mut input = InputState::new();
        input.process_event(&key(KeyCode::ArrowUp, ElementState::Pressed));
        input.process_event(&key(KeyCode::ArrowLeft, ElementState::Pressed));
        input.process_event(&key(KeyCode::KeyW, ElementState::Pressed));

        let movement = processor.movement(&input);
        assert_eq!(
            movement,
            MovementKeys { forward: true, backward: false, left: true, right: false }
        );
        assert_eq!(processor.charge(&input), ChargeInput::default());
        assert!(!processor.wants_exit(&input));

        input.process_event(&key(KeyCode::Escape, ElementState::Pressed));
        assert!(processor.wants_exit(&input));
    }
}
