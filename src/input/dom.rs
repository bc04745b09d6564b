use web_sys::{MouseEvent, WheelEvent};

use super::event::{Buttons, InputEvent, Modifiers, LINE_HEIGHT_PX};

impl From<&MouseEvent> for InputEvent {
    /// Pointer move in the target element's local coordinates.
    fn from(event: &MouseEvent) -> Self {
        Self::PointerMove {
            buttons: Buttons::from_bits(event.buttons()),
            x: f64::from(event.offset_x()),
            y: f64::from(event.offset_y()),
            modifiers: Modifiers {
                shift: event.shift_key(),
                alt: event.alt_key(),
                control: event.ctrl_key(),
                meta: event.meta_key(),
            },
        }
    }
}

/// Convert a wheel event to pixel deltas.
///
/// `page_height` is the pixel size of one page, used when the browser
/// reports page-mode deltas (usually the surface height).
#[must_use]
pub fn wheel_event(event: &WheelEvent, page_height: f64) -> InputEvent {
    let scale = delta_scale(event.delta_mode(), page_height);
    InputEvent::Wheel {
        dx: event.delta_x() * scale,
        dy: event.delta_y() * scale,
        dz: event.delta_z() * scale,
    }
}

fn delta_scale(mode: u32, page_height: f64) -> f64 {
    match mode {
        WheelEvent::DOM_DELTA_LINE => LINE_HEIGHT_PX,
        WheelEvent::DOM_DELTA_PAGE => page_height,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_modes_scale_to_pixels() {
        assert_eq!(delta_scale(WheelEvent::DOM_DELTA_PIXEL, 600.0), 1.0);
        assert_eq!(delta_scale(WheelEvent::DOM_DELTA_LINE, 600.0), 16.0);
        assert_eq!(delta_scale(WheelEvent::DOM_DELTA_PAGE, 600.0), 600.0);
    }
}
