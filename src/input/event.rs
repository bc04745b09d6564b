use std::ops::BitOr;

/// Pixels per wheel "line" when a platform reports line deltas.
pub const LINE_HEIGHT_PX: f64 = 16.0;

/// Held pointer buttons, using the DOM `MouseEvent.buttons` bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Buttons(u16);

impl Buttons {
    /// No button held.
    pub const NONE: Self = Self(0);
    /// Primary (usually left) button.
    pub const PRIMARY: Self = Self(1);
    /// Secondary (usually right) button.
    pub const SECONDARY: Self = Self(2);
    /// Tertiary (usually middle/wheel) button.
    pub const TERTIARY: Self = Self(4);

    /// Wrap a raw bitmask.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// The raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Whether every bit of `other` is held.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no button is held.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Mark `other` as held.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Mark `other` as released.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    /// Shift key. Turns a primary drag into a roll.
    pub shift: bool,
    /// Alt / Option key.
    pub alt: bool,
    /// Control key.
    pub control: bool,
    /// Meta / Command / Super key.
    pub meta: bool,
}

impl Modifiers {
    /// Only shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        alt: false,
        control: false,
        meta: false,
    };
}

/// Normalized, platform-agnostic input events.
///
/// Platform adapters produce these; an
/// [`InputTranslator`](super::InputTranslator) turns them into camera
/// commands.
///
/// # Example
///
/// ```ignore
/// let response = controls.handle_event(InputEvent::PointerMove {
///     buttons: Buttons::PRIMARY,
///     x: 420.0,
///     y: 300.0,
///     modifiers: Modifiers::default(),
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved or its button state changed.
    PointerMove {
        /// Buttons held after the change.
        buttons: Buttons,
        /// Horizontal position in surface-local pixels.
        x: f64,
        /// Vertical position in surface-local pixels, growing downward.
        y: f64,
        /// Modifier keys held.
        modifiers: Modifiers,
    },
    /// Wheel or trackpad scroll, in pixels.
    Wheel {
        /// Horizontal scroll; positive scrolls right.
        dx: f64,
        /// Vertical scroll; positive scrolls down.
        dy: f64,
        /// Depth scroll, unused by the default translator.
        dz: f64,
    },
    /// The surface is about to open a context menu.
    ContextMenu,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_mask_operations() {
        let mut held = Buttons::NONE;
        assert!(held.is_empty());
        held.insert(Buttons::SECONDARY);
        held.insert(Buttons::TERTIARY);
        assert!(held.contains(Buttons::SECONDARY));
        assert!(!held.contains(Buttons::PRIMARY));
        assert_eq!(held, Buttons::SECONDARY | Buttons::TERTIARY);
        assert_eq!(held.bits(), 6);

        held.remove(Buttons::SECONDARY);
        assert_eq!(held, Buttons::from_bits(4));
    }
}
