use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::ModifiersState;

use super::event::{Buttons, InputEvent, Modifiers, LINE_HEIGHT_PX};

/// Tracks button, modifier and cursor state across winit
/// [`WindowEvent`]s and emits [`InputEvent`]s with DOM conventions.
///
/// winit reports button changes and motion separately; every button
/// change is surfaced as a [`InputEvent::PointerMove`] at the last known
/// cursor position so the translator sees the new mask immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinitInputAdapter {
    buttons: Buttons,
    modifiers: Modifiers,
    position: (f64, f64),
}

impl WinitInputAdapter {
    /// Create an adapter with nothing held and the cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently held buttons.
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        self.buttons
    }

    /// Returns the normalized event for `event`, or `None` if the event
    /// carries no pointer input.
    pub fn handle_window_event(
        &mut self,
        event: &WindowEvent,
    ) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x, position.y))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_input(*button, *state == ElementState::Pressed)
            }
            WindowEvent::MouseWheel { delta, .. } => Some(wheel(*delta)),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers_changed(modifiers.state());
                None
            }
            WindowEvent::Focused(false) => {
                // Releases are not delivered once focus is gone.
                self.buttons = Buttons::NONE;
                None
            }
            _ => None,
        }
    }

    fn cursor_moved(&mut self, x: f64, y: f64) -> InputEvent {
        self.position = (x, y);
        self.pointer()
    }

    fn mouse_input(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<InputEvent> {
        let bit = match button {
            MouseButton::Left => Buttons::PRIMARY,
            MouseButton::Right => Buttons::SECONDARY,
            MouseButton::Middle => Buttons::TERTIARY,
            _ => return None,
        };
        if pressed {
            self.buttons.insert(bit);
        } else {
            self.buttons.remove(bit);
        }
        Some(self.pointer())
    }

    fn modifiers_changed(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers {
            shift: state.shift_key(),
            alt: state.alt_key(),
            control: state.control_key(),
            meta: state.super_key(),
        };
    }

    fn pointer(&self) -> InputEvent {
        InputEvent::PointerMove {
            buttons: self.buttons,
            x: self.position.0,
            y: self.position.1,
            modifiers: self.modifiers,
        }
    }
}

/// winit scrolls are positive away from the user; DOM wheel deltas are
/// positive toward the bottom of the page.
fn wheel(delta: MouseScrollDelta) -> InputEvent {
    let (dx, dy) = match delta {
        MouseScrollDelta::LineDelta(x, y) => (
            f64::from(x) * LINE_HEIGHT_PX,
            f64::from(y) * LINE_HEIGHT_PX,
        ),
        MouseScrollDelta::PixelDelta(pos) => (pos.x, pos.y),
    };
    InputEvent::Wheel {
        dx: -dx,
        dy: -dy,
        dz: 0.0,
    }
}
