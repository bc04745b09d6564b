//! Time-stamped keyframe track with cubic Hermite reconstruction.
//!
//! A track is an append-only history of `(time, value, velocity)` keys.
//! Writers push keys at non-decreasing times; readers evaluate the track
//! at any time, including times in the past of the newest key. This is
//! what lets the orbiter query the camera slightly behind the input
//! stream and still get smooth motion from irregular samples.

/// A single key in a [`Track`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<const N: usize> {
    /// Timestamp in milliseconds.
    pub t: f64,
    /// Value at `t`.
    pub value: [f64; N],
    /// Rate of change at `t`, per millisecond.
    pub velocity: [f64; N],
}

/// An `N`-dimensional value filtered over time.
///
/// Never empty: construction seeds one resting key and
/// [`flush`](Track::flush) always keeps at least one.
#[derive(Debug, Clone)]
pub struct Track<const N: usize> {
    keys: Vec<Keyframe<N>>,
    lo: [f64; N],
    hi: [f64; N],
}

impl<const N: usize> Track<N> {
    /// Create an unbounded track resting at `value` from time `t0`.
    #[must_use]
    pub fn new(t0: f64, value: [f64; N]) -> Self {
        Self {
            keys: vec![Keyframe {
                t: t0,
                value,
                velocity: [0.0; N],
            }],
            lo: [f64::NEG_INFINITY; N],
            hi: [f64::INFINITY; N],
        }
    }

    /// Timestamp of the newest key.
    #[must_use]
    pub fn last_t(&self) -> f64 {
        self.last().t
    }

    /// Number of buffered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; kept for API symmetry with [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Per-component clamp range `(lo, hi)`.
    #[must_use]
    pub fn bounds(&self) -> ([f64; N], [f64; N]) {
        (self.lo, self.hi)
    }

    /// Replace the clamp range. Applies to subsequent evaluations and
    /// pushes; stored keys are left untouched.
    pub fn set_bounds(&mut self, lo: [f64; N], hi: [f64; N]) {
        self.lo = lo;
        self.hi = hi;
    }

    /// Evaluate the track at `t`.
    ///
    /// Before the first key the first value is held; past the newest key
    /// its velocity is extrapolated; in between, neighbouring keys are
    /// joined by a cubic Hermite segment.
    #[must_use]
    pub fn curve(&self, t: f64) -> [f64; N] {
        let idx = self.keys.partition_point(|k| k.t <= t);
        let raw = if idx == 0 {
            self.keys[0].value
        } else if idx >= self.keys.len() {
            let k = self.last();
            let dt = t - k.t;
            std::array::from_fn(|i| k.value[i] + dt * k.velocity[i])
        } else {
            hermite(&self.keys[idx - 1], &self.keys[idx], t)
        };
        self.clamp(raw)
    }

    /// Push a resting key at `t`. Ignored if `t` precedes the newest key.
    pub fn set(&mut self, t: f64, value: [f64; N]) {
        if t < self.last_t() {
            log::trace!("dropping stale set at {t} < {}", self.last_t());
            return;
        }
        let value = self.clamp(value);
        self.keys.push(Keyframe {
            t,
            value,
            velocity: [0.0; N],
        });
    }

    /// Push a key displaced by `delta` from the newest one, carrying the
    /// implied velocity. Ignored if `t` precedes the newest key.
    pub fn move_by(&mut self, t: f64, delta: [f64; N]) {
        let last = *self.last();
        if t < last.t {
            log::trace!("dropping stale move at {t} < {}", last.t);
            return;
        }
        let dt = t - last.t;
        let value =
            self.clamp(std::array::from_fn(|i| last.value[i] + delta[i]));
        let velocity = std::array::from_fn(|i| {
            if dt > 0.0 {
                (value[i] - last.value[i]) / dt
            } else {
                0.0
            }
        });
        self.keys.push(Keyframe { t, value, velocity });
    }

    /// Come to rest at the newest key's value by `t`. Ignored unless `t`
    /// is strictly after the newest key.
    pub fn idle(&mut self, t: f64) {
        let last = *self.last();
        if t <= last.t {
            return;
        }
        let value = self.clamp(last.value);
        self.keys.push(Keyframe {
            t,
            value,
            velocity: [0.0; N],
        });
    }

    /// Drop every key older than the newest key at or before `t`.
    pub fn flush(&mut self, t: f64) {
        let idx = self.keys.partition_point(|k| k.t <= t);
        if idx <= 1 {
            return;
        }
        self.keys = self.keys.split_off(idx - 1);
    }

    fn last(&self) -> &Keyframe<N> {
        &self.keys[self.keys.len() - 1]
    }

    fn clamp(&self, value: [f64; N]) -> [f64; N] {
        std::array::from_fn(|i| value[i].max(self.lo[i]).min(self.hi[i]))
    }
}

fn hermite<const N: usize>(
    a: &Keyframe<N>,
    b: &Keyframe<N>,
    t: f64,
) -> [f64; N] {
    let resting = a.value == b.value
        && a.velocity.iter().chain(&b.velocity).all(|&v| v == 0.0);
    if resting {
        return a.value;
    }

    let span = b.t - a.t;
    let dt = if span > 0.0 { span } else { 1.0 };
    let s = (t - a.t) / dt;
    let s2 = s * s;
    let s3 = s2 * s;
    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;

    std::array::from_fn(|i| {
        h00 * a.value[i]
            + h10 * a.velocity[i] * dt
            + h01 * b.value[i]
            + h11 * b.velocity[i] * dt
    })
}
