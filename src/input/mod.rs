//! Input handling: normalized event types, the gesture translator that
//! turns them into camera commands, and optional platform adapters that
//! produce them from raw window or DOM events.

/// Platform-agnostic input events.
pub mod event;
/// Converts normalized events into camera commands.
pub mod translator;

/// winit window events to [`InputEvent`]s.
#[cfg(feature = "viewer")]
pub mod native;

/// DOM mouse and wheel events to [`InputEvent`]s.
#[cfg(feature = "web")]
pub mod dom;

pub use event::{Buttons, InputEvent, Modifiers, LINE_HEIGHT_PX};
#[cfg(feature = "viewer")]
pub use native::WinitInputAdapter;
pub use translator::{Command, EventResponse, InputTranslator};
