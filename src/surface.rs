//! Drawing-surface dimensions used to normalize gestures.

/// Anything with a client-area size in CSS/logical pixels.
pub trait Surface {
    /// Client-area width in pixels.
    fn client_width(&self) -> f64;

    /// Client-area height in pixels.
    fn client_height(&self) -> f64;
}

/// A fixed-size surface, for headless use and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl SurfaceSize {
    /// Create a surface of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Surface for SurfaceSize {
    fn client_width(&self) -> f64 {
        self.width
    }

    fn client_height(&self) -> f64 {
        self.height
    }
}

impl<S: Surface + ?Sized> Surface for &S {
    fn client_width(&self) -> f64 {
        (**self).client_width()
    }

    fn client_height(&self) -> f64 {
        (**self).client_height()
    }
}

#[cfg(feature = "viewer")]
impl Surface for winit::window::Window {
    fn client_width(&self) -> f64 {
        f64::from(self.inner_size().width)
    }

    fn client_height(&self) -> f64 {
        f64::from(self.inner_size().height)
    }
}

#[cfg(feature = "web")]
impl Surface for web_sys::Element {
    fn client_width(&self) -> f64 {
        f64::from(web_sys::Element::client_width(self))
    }

    fn client_height(&self) -> f64 {
        f64::from(web_sys::Element::client_height(self))
    }
}
