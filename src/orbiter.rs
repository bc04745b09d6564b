//! The orbiter: a lagged, change-detecting view of a camera model.
//!
//! Commands go to the model immediately, stamped with the clock. The
//! published [`Snapshot`] only moves on [`Orbiter::tick`], which queries
//! the model `delay` milliseconds in the past so that scattered input
//! samples have already been smoothed into a continuous path.

use serde_json::{json, Value};

use crate::camera::{CameraModel, OrbitCameraController};
use crate::clock::{Clock, SystemClock};
use crate::error::OrbiterError;
use crate::options::OrbiterOptions;
use crate::snapshot::Snapshot;

/// Matrix entries must move by more than this to count as a change.
pub const CHANGE_TOLERANCE: f64 = 1e-5;

/// History kept behind the query time, in milliseconds.
const HISTORY_MS: f64 = 1000.0;

/// Facade over a [`CameraModel`] that publishes a snapshot per frame.
#[derive(Debug)]
pub struct Orbiter<M = OrbitCameraController, C = SystemClock> {
    model: M,
    clock: C,
    options: OrbiterOptions,
    snapshot: Snapshot,
    changed: bool,
}

impl<M: CameraModel, C: Clock> Orbiter<M, C> {
    /// Take ownership of `model` and seed the snapshot.
    ///
    /// The first [`tick`](Self::tick) after construction always reports a
    /// change.
    pub fn with_options(model: M, clock: C, options: OrbiterOptions) -> Self {
        let mut orbiter = Self {
            model,
            clock,
            options,
            snapshot: Snapshot::default(),
            changed: false,
        };
        let _ = orbiter.tick();
        orbiter.changed = true;
        orbiter
    }

    /// Advance the model and publish its lagged state.
    ///
    /// Returns whether the view matrix moved since the previous tick, or
    /// whether a change was forced since then (construction, import,
    /// options edit).
    pub fn tick(&mut self) -> bool {
        let t = self.clock.now();
        let delay = self.options.delay;

        self.model.idle(0.5_f64.mul_add(-delay, t));
        let horizon = (HISTORY_MS * (1.0 + delay.min(0.0))).max(0.0);
        self.model.flush(t - horizon);
        self.model.recalc_matrix(t - delay);

        let next = Snapshot::from_frame(self.model.frame());
        let changed = self.changed
            || next.matrix_differs(&self.snapshot, CHANGE_TOLERANCE);
        self.snapshot = next;
        self.changed = false;
        if changed {
            log::trace!("camera moved at t={t:.1}");
        }
        changed
    }

    /// Re-aim the camera. `None` keeps the model's current value.
    pub fn look_at(
        &mut self,
        eye: Option<[f64; 3]>,
        center: Option<[f64; 3]>,
        up: Option<[f64; 3]>,
    ) {
        let t = self.model.last_t();
        self.model.look_at(t, eye, center, up);
    }

    /// Adopt the pose of a world-to-view matrix.
    pub fn set_matrix(&mut self, matrix: &[f64; 16]) {
        let t = self.model.last_t();
        self.model.set_matrix(t, matrix);
    }

    /// Set the eye-to-center distance.
    pub fn set_distance(&mut self, distance: f64) {
        let t = self.model.last_t();
        self.model.set_distance(t, distance);
    }

    /// Clamp the distance; non-positive bounds are unbounded.
    pub fn set_distance_limits(&mut self, lo: f64, hi: f64) {
        self.model.set_distance_limits(lo, hi);
    }

    /// Incremental camera-space rotation, stamped now.
    pub fn rotate(&mut self, yaw: f64, pitch: f64, roll: f64) {
        let t = self.clock.now();
        self.model.rotate(t, yaw, pitch, roll);
    }

    /// Camera-relative pan, stamped now. `dz` dollies.
    pub fn pan(&mut self, dx: f64, dy: f64, dz: f64) {
        let t = self.clock.now();
        self.model.pan(t, dx, dy, dz);
    }

    /// World-space move of the center, stamped now.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        let t = self.clock.now();
        self.model.translate(t, dx, dy, dz);
    }

    /// Newest timestamp the model knows about.
    pub fn last_t(&self) -> f64 {
        self.model.last_t()
    }

    /// Export the camera state and the runtime options.
    ///
    /// The model is brought up to [`last_t`](Self::last_t) first so the
    /// export reflects every submitted command. The published snapshot
    /// is not touched.
    pub fn to_json(&mut self) -> Value {
        let t = self.model.last_t();
        self.model.recalc_matrix(t);
        let o = &self.options;
        json!({
            "camera": self.model.to_json(),
            "delay": o.delay,
            "inputEnabled": o.input_enabled,
            "flipX": o.flip_x,
            "flipY": o.flip_y,
            "translateSpeed": o.translate_speed,
            "zoomSpeed": o.zoom_speed,
            "rotateSpeed": o.rotate_speed,
        })
    }

    /// Import a state produced by [`to_json`](Self::to_json).
    ///
    /// Unknown keys and values of the wrong type are skipped. The next
    /// [`tick`](Self::tick) reports a change.
    pub fn from_json(&mut self, value: &Value) {
        if let Some(camera) = value.get("camera") {
            self.model.from_json(camera);
        }
        self.options.merge_json(value);
        self.changed = true;
    }

    /// [`to_json`](Self::to_json) rendered as a string.
    pub fn to_json_string(&mut self) -> String {
        self.to_json().to_string()
    }

    /// Parse and [`from_json`](Self::from_json) a JSON document.
    pub fn from_json_str(&mut self, s: &str) -> Result<(), OrbiterError> {
        let value: Value = serde_json::from_str(s)?;
        self.from_json(&value);
        Ok(())
    }

    /// Current options.
    pub fn options(&self) -> &OrbiterOptions {
        &self.options
    }

    /// Mutable options. Any access forces the next tick to report a
    /// change.
    pub fn options_mut(&mut self) -> &mut OrbiterOptions {
        self.changed = true;
        &mut self.options
    }

    /// State published by the most recent tick.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Published view matrix.
    pub fn matrix(&self) -> &[f64; 16] {
        &self.snapshot.matrix
    }

    /// Published orientation.
    pub fn rotation(&self) -> &[f64; 4] {
        &self.snapshot.rotation
    }

    /// Published up direction.
    pub fn up(&self) -> &[f64; 3] {
        &self.snapshot.up
    }

    /// Published eye position.
    pub fn eye(&self) -> &[f64; 3] {
        &self.snapshot.eye
    }

    /// Published orbit center.
    pub fn center(&self) -> &[f64; 3] {
        &self.snapshot.center
    }

    /// Published eye-to-center distance.
    pub fn distance(&self) -> f64 {
        self.snapshot.distance
    }

    /// Whether a change is pending for the next tick.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// The camera model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The time source.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[cfg(test)]
    pub(crate) fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }
}

impl<C: Clock> Orbiter<OrbitCameraController, C> {
    /// Build the stock track-backed controller at the placement in
    /// `options`.
    pub fn new(clock: C, options: OrbiterOptions) -> Self {
        let model = OrbitCameraController::new(&options.camera, clock.now());
        Self::with_options(model, clock, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraFrame;
    use crate::clock::ManualClock;
    use crate::options::CameraOptions;
    use crate::test_support::{recording_orbiter, Call, T0};

    fn shifted_frame(dx: f64) -> CameraFrame {
        let mut frame = CameraFrame::default();
        frame.matrix[12] += dx;
        frame
    }

    #[test]
    fn construction_forces_first_change() {
        let (mut orbiter, _clock) = recording_orbiter();
        assert!(orbiter.is_changed());
        assert!(orbiter.tick());
        assert!(!orbiter.is_changed());
    }

    #[test]
    fn repoll_without_input_reports_nothing() {
        let (mut orbiter, _clock) = recording_orbiter();
        let _ = orbiter.tick();
        assert!(!orbiter.tick());
        assert!(!orbiter.tick());
    }

    #[test]
    fn change_threshold() {
        let (mut orbiter, _clock) = recording_orbiter();
        let _ = orbiter.tick();

        orbiter.model_mut().next = shifted_frame(5e-6);
        assert!(!orbiter.tick());

        orbiter.model_mut().next = shifted_frame(5e-6 + 1e-4);
        assert!(orbiter.tick());
        assert_eq!(orbiter.matrix()[12], 5e-6 + 1e-4);
    }

    #[test]
    fn sub_threshold_drift_still_publishes() {
        let (mut orbiter, _clock) = recording_orbiter();
        let _ = orbiter.tick();
        orbiter.model_mut().next = CameraFrame {
            eye: [0.0, 0.0, 3.0],
            ..CameraFrame::default()
        };
        assert!(!orbiter.tick());
        assert_eq!(orbiter.eye(), &[0.0, 0.0, 3.0]);
    }

    #[test]
    fn tick_settles_flushes_and_recalcs_in_order() {
        let (mut orbiter, clock) = recording_orbiter();
        clock.set(5000.0);
        orbiter.model_mut().clear();
        let _ = orbiter.tick();
        assert_eq!(
            orbiter.model().calls,
            vec![
                Call::Idle(5000.0 - 20.0),
                Call::Flush(4000.0),
                Call::Recalc(5000.0 - 40.0),
            ]
        );
    }

    #[test]
    fn negative_delay_queries_ahead_and_shortens_history() {
        let (mut orbiter, clock) = recording_orbiter();
        clock.set(5000.0);
        orbiter.options_mut().delay = -0.5;
        orbiter.model_mut().clear();
        let _ = orbiter.tick();
        assert_eq!(
            orbiter.model().calls,
            vec![
                Call::Idle(5000.25),
                Call::Flush(4500.0),
                Call::Recalc(5000.5),
            ]
        );

        // Never flushes past the query time.
        orbiter.options_mut().delay = -3.0;
        orbiter.model_mut().clear();
        let _ = orbiter.tick();
        assert_eq!(orbiter.model().calls[1], Call::Flush(5000.0));
    }

    #[test]
    fn command_timestamps() {
        let (mut orbiter, clock) = recording_orbiter();
        orbiter.model_mut().last_t = 900.0;
        clock.set(1234.0);
        orbiter.model_mut().clear();

        orbiter.rotate(0.1, 0.2, 0.3);
        orbiter.pan(1.0, 2.0, 3.0);
        orbiter.translate(4.0, 5.0, 6.0);
        orbiter.look_at(None, Some([0.0; 3]), None);
        orbiter.set_matrix(&[1.0; 16]);
        orbiter.set_distance(7.0);
        orbiter.set_distance_limits(1.0, 2.0);

        assert_eq!(
            orbiter.model().commands(),
            vec![
                Call::Rotate { t: 1234.0, yaw: 0.1, pitch: 0.2, roll: 0.3 },
                Call::Pan { t: 1234.0, dx: 1.0, dy: 2.0, dz: 3.0 },
                Call::Translate { t: 1234.0, dx: 4.0, dy: 5.0, dz: 6.0 },
                Call::LookAt { t: 900.0 },
                Call::SetMatrix { t: 900.0, matrix: [1.0; 16] },
                Call::SetDistance { t: 900.0, distance: 7.0 },
                Call::SetDistanceLimits { lo: 1.0, hi: 2.0 },
            ]
        );
    }

    #[test]
    fn commands_do_not_touch_published_state() {
        let (mut orbiter, _clock) = recording_orbiter();
        let _ = orbiter.tick();
        let before = *orbiter.snapshot();
        orbiter.model_mut().next = shifted_frame(3.0);
        orbiter.rotate(1.0, 0.0, 0.0);
        let _ = orbiter.to_json();
        assert_eq!(orbiter.snapshot(), &before);
    }

    #[test]
    fn export_includes_every_option() {
        let (mut orbiter, _clock) = recording_orbiter();
        orbiter.options_mut().flip_y = true;
        let exported = orbiter.to_json();
        for key in [
            "camera",
            "delay",
            "inputEnabled",
            "flipX",
            "flipY",
            "translateSpeed",
            "zoomSpeed",
            "rotateSpeed",
        ] {
            assert!(exported.get(key).is_some(), "missing {key}");
        }
        assert_eq!(exported["flipY"], true);
    }

    #[test]
    fn import_forces_change_and_routes_camera() {
        let (mut orbiter, _clock) = recording_orbiter();
        let _ = orbiter.tick();
        orbiter.model_mut().clear();

        orbiter.from_json(&json!({
            "camera": { "distance": 4.0 },
            "zoomSpeed": 2.0,
            "flipX": "yes",
        }));
        assert!(orbiter.is_changed());
        assert!(orbiter.tick());
        assert_eq!(orbiter.options().zoom_speed, 2.0);
        assert!(!orbiter.options().flip_x);
        assert_eq!(
            orbiter.model().commands(),
            vec![Call::FromJson(json!({ "distance": 4.0 }))]
        );
    }

    #[test]
    fn from_json_str_reports_syntax_errors() {
        let (mut orbiter, _clock) = recording_orbiter();
        let _ = orbiter.tick();
        let err = orbiter.from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, OrbiterError::Json(_)));
        assert!(!orbiter.is_changed());
    }

    #[test]
    fn config_round_trip() {
        let clock = ManualClock::new(0.0);
        let mut source = Orbiter::new(clock.clone(), OrbiterOptions::default());
        source.look_at(Some([2.0, 1.0, 4.0]), Some([0.0, 1.0, 0.0]), None);
        {
            let options = source.options_mut();
            options.delay = 15.0;
            options.input_enabled = false;
            options.flip_x = true;
            options.rotate_speed = 0.25;
        }
        let exported = source.to_json_string();

        let mut target = Orbiter::new(clock.clone(), OrbiterOptions::default());
        target.from_json_str(&exported).unwrap();
        assert_eq!(target.options(), source.options());

        clock.advance(100.0);
        let _ = source.tick();
        let _ = target.tick();
        for (a, b) in source.matrix().iter().zip(target.matrix()) {
            assert!((a - b).abs() < 1e-9);
        }
        assert!((target.distance() - source.distance()).abs() < 1e-9);
    }

    #[test]
    fn distance_stays_positive() {
        let clock = ManualClock::new(0.0);
        let mut orbiter = Orbiter::new(clock.clone(), OrbiterOptions::default());
        for step in 0..50 {
            clock.advance(16.0);
            orbiter.pan(0.0, 0.0, -10.0 * f64::from(step));
            orbiter.set_distance(-1.0);
            let _ = orbiter.tick();
            assert!(orbiter.distance() > 0.0);
        }
    }

    #[test]
    fn distance_limits_clamp_published_distance() {
        let clock = ManualClock::new(0.0);
        let options = OrbiterOptions {
            camera: CameraOptions {
                radius: 5.0,
                ..CameraOptions::default()
            },
            ..OrbiterOptions::default()
        };
        let mut orbiter = Orbiter::new(clock.clone(), options);
        orbiter.set_distance_limits(1.0, 10.0);
        orbiter.set_distance(0.5);
        clock.advance(100.0);
        let _ = orbiter.tick();
        assert!(orbiter.distance() >= 1.0 - 1e-9);
    }

    #[test]
    fn drag_settles_after_delay() {
        let clock = ManualClock::new(0.0);
        let mut orbiter = Orbiter::new(clock.clone(), OrbiterOptions::default());
        let _ = orbiter.tick();
        clock.advance(16.0);
        orbiter.rotate(0.5, 0.0, 0.0);
        // The lagged query has not reached the command yet.
        assert!(!orbiter.tick());
        let mut moved = false;
        for _ in 0..20 {
            clock.advance(16.0);
            moved |= orbiter.tick();
        }
        assert!(moved);
        assert!(orbiter.eye()[0] < 0.0);
        clock.advance(2000.0);
        let _ = orbiter.tick();
        assert!(!orbiter.tick());
    }

    #[test]
    fn starts_at_configured_placement() {
        let (orbiter, _clock) = recording_orbiter();
        assert_eq!(orbiter.last_t(), T0);
        let orbiter =
            Orbiter::new(ManualClock::new(0.0), OrbiterOptions::default());
        assert_eq!(orbiter.eye(), &[0.0, 0.0, 1.0]);
        assert_eq!(orbiter.distance(), 1.0);
    }

    fn settle<M: CameraModel>(orbiter: &mut Orbiter<M, ManualClock>, ticks: u32) {
        for _ in 0..ticks {
            orbiter.clock().advance(16.0);
            let _ = orbiter.tick();
        }
    }

    #[test]
    fn translate_settles_at_commanded_offset() {
        let mut orbiter =
            Orbiter::new(ManualClock::new(0.0), OrbiterOptions::default());
        settle(&mut orbiter, 5);
        orbiter.translate(1.0, 0.0, 0.0);
        settle(&mut orbiter, 200);
        let center = *orbiter.center();
        assert!((center[0] - 1.0).abs() < 1e-9, "{center:?}");
        assert!(center[1].abs() < 1e-9);
        assert!(center[2].abs() < 1e-9);
    }

    #[test]
    fn negative_delay_keeps_input_live() {
        let options = OrbiterOptions {
            delay: -100.0,
            ..OrbiterOptions::default()
        };
        let mut orbiter = Orbiter::new(ManualClock::new(0.0), options);
        settle(&mut orbiter, 5);
        orbiter.rotate(0.5, 0.0, 0.0);
        orbiter.translate(0.0, 2.0, 0.0);
        settle(&mut orbiter, 200);
        assert!(orbiter.eye()[0] < 0.0);
        assert!((orbiter.center()[1] - 2.0).abs() < 1e-9);
        assert!((orbiter.distance() - 1.0).abs() < 1e-9);
    }
}
