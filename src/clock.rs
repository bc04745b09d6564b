//! Time sources for stamping camera commands.
//!
//! All timestamps in this crate are `f64` milliseconds on an arbitrary,
//! monotonic origin. The origin only has to be shared between the clock
//! and the camera model it drives.

use std::cell::Cell;
use std::rc::Rc;

use web_time::Instant;

/// A monotonic millisecond clock.
pub trait Clock {
    /// Current time in milliseconds.
    fn now(&self) -> f64;
}

/// Wall-clock time measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock whose origin is "now".
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle
/// and hand another to an [`Orbiter`](crate::Orbiter).
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock reading `start` milliseconds.
    #[must_use]
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, t: f64) {
        self.now.set(t);
    }

    /// Move the clock forward by `dt` milliseconds.
    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
