//! A camera model that records every call, for orbiter and translator
//! tests.

use serde_json::{json, Value};

use crate::camera::{CameraFrame, CameraModel};
use crate::clock::ManualClock;
use crate::options::OrbiterOptions;
use crate::orbiter::Orbiter;

/// Start time used by [`recording_orbiter`].
pub(crate) const T0: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Recalc(f64),
    Idle(f64),
    Flush(f64),
    Rotate { t: f64, yaw: f64, pitch: f64, roll: f64 },
    Pan { t: f64, dx: f64, dy: f64, dz: f64 },
    Translate { t: f64, dx: f64, dy: f64, dz: f64 },
    LookAt { t: f64 },
    SetMatrix { t: f64, matrix: [f64; 16] },
    SetDistance { t: f64, distance: f64 },
    SetDistanceLimits { lo: f64, hi: f64 },
    FromJson(Value),
}

impl Call {
    const fn is_maintenance(&self) -> bool {
        matches!(self, Self::Recalc(_) | Self::Idle(_) | Self::Flush(_))
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingModel {
    pub calls: Vec<Call>,
    /// Frame published by the next `recalc_matrix`.
    pub next: CameraFrame,
    pub last_t: f64,
    frame: CameraFrame,
}

impl RecordingModel {
    /// Calls other than recalc/idle/flush.
    pub fn commands(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|c| !c.is_maintenance())
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, call: Call) {
        self.calls.push(call);
    }
}

impl CameraModel for RecordingModel {
    fn recalc_matrix(&mut self, t: f64) {
        self.frame = self.next;
        self.record(Call::Recalc(t));
    }

    fn frame(&self) -> &CameraFrame {
        &self.frame
    }

    fn idle(&mut self, t: f64) {
        self.record(Call::Idle(t));
    }

    fn flush(&mut self, t: f64) {
        self.record(Call::Flush(t));
    }

    fn rotate(&mut self, t: f64, yaw: f64, pitch: f64, roll: f64) {
        self.record(Call::Rotate { t, yaw, pitch, roll });
    }

    fn pan(&mut self, t: f64, dx: f64, dy: f64, dz: f64) {
        self.record(Call::Pan { t, dx, dy, dz });
    }

    fn translate(&mut self, t: f64, dx: f64, dy: f64, dz: f64) {
        self.record(Call::Translate { t, dx, dy, dz });
    }

    fn look_at(
        &mut self,
        t: f64,
        _eye: Option<[f64; 3]>,
        _center: Option<[f64; 3]>,
        _up: Option<[f64; 3]>,
    ) {
        self.record(Call::LookAt { t });
    }

    fn set_matrix(&mut self, t: f64, matrix: &[f64; 16]) {
        self.record(Call::SetMatrix { t, matrix: *matrix });
    }

    fn set_distance(&mut self, t: f64, distance: f64) {
        self.record(Call::SetDistance { t, distance });
    }

    fn set_distance_limits(&mut self, lo: f64, hi: f64) {
        self.record(Call::SetDistanceLimits { lo, hi });
    }

    fn last_t(&self) -> f64 {
        self.last_t
    }

    fn to_json(&self) -> Value {
        json!({ "recorded": self.calls.len() })
    }

    fn from_json(&mut self, value: &Value) {
        self.record(Call::FromJson(value.clone()));
    }
}

/// An orbiter over a [`RecordingModel`] at [`T0`], plus a handle on its
/// clock.
pub(crate) fn recording_orbiter() -> (Orbiter<RecordingModel, ManualClock>, ManualClock)
{
    let clock = ManualClock::new(T0);
    let model = RecordingModel {
        last_t: T0,
        ..RecordingModel::default()
    };
    let orbiter =
        Orbiter::with_options(model, clock.clone(), OrbiterOptions::default());
    (orbiter, clock)
}
