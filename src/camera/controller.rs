use glam::{DMat3, DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::{CameraFrame, CameraModel};
use super::track::Track;
use crate::options::CameraOptions;

/// Smallest distance the controller will orbit at.
const MIN_RADIUS: f64 = 1e-4;

/// Serialized controller state.
///
/// Every field is optional on import; missing fields keep the current
/// value. Unbounded zoom limits are omitted on export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraState {
    /// Orbit center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 3]>,
    /// Orientation quaternion `[x, y, z, w]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f64; 4]>,
    /// Eye-to-center distance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Lower zoom limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_min: Option<f64>,
    /// Upper zoom limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_max: Option<f64>,
}

/// Orbit camera whose center, orientation and log-distance are each a
/// filtered [`Track`], so the pose can be evaluated at any time.
#[derive(Debug, Clone)]
pub struct OrbitCameraController {
    center: Track<3>,
    rotation: Track<4>,
    radius: Track<1>,
    frame: CameraFrame,
}

impl OrbitCameraController {
    /// Build a controller resting at the placement in `options` from
    /// time `t0`.
    #[must_use]
    pub fn new(options: &CameraOptions, t0: f64) -> Self {
        let rotation =
            normalize_or_identity(DQuat::from_array(options.rotation));
        let mut controller = Self {
            center: Track::new(t0, options.center),
            rotation: Track::new(t0, rotation.to_array()),
            radius: Track::new(t0, [options.radius.max(MIN_RADIUS).ln()]),
            frame: CameraFrame::default(),
        };
        if let Some([lo, hi]) = options.distance_limits {
            controller.set_distance_limits(lo, hi);
        }
        if options.eye.is_some() {
            controller.look_at(
                t0,
                options.eye,
                Some(options.center),
                options.up,
            );
        }
        controller.recalc_matrix(t0);
        controller
    }

    /// Current zoom clamp `(lo, hi)`. Unbounded sides are `0` and
    /// `f64::INFINITY`.
    #[must_use]
    pub fn distance_limits(&self) -> (f64, f64) {
        let (lo, hi) = self.radius.bounds();
        (lo[0].exp(), hi[0].exp())
    }

    /// Typed form of [`CameraModel::to_json`].
    #[must_use]
    pub fn state(&self) -> CameraState {
        let (lo, hi) = self.radius.bounds();
        CameraState {
            center: Some(self.frame.center),
            rotation: Some(self.frame.rotation),
            distance: Some(self.frame.log_radius.exp()),
            zoom_min: lo[0].is_finite().then(|| lo[0].exp()),
            zoom_max: hi[0].is_finite().then(|| hi[0].exp()),
        }
    }

    /// Typed form of [`CameraModel::from_json`], stamped at
    /// [`last_t`](CameraModel::last_t). A missing zoom limit is
    /// unbounded.
    pub fn apply_state(&mut self, state: &CameraState) {
        let t = self.last_t();
        // Export omits unbounded sides.
        self.set_distance_limits(
            state.zoom_min.unwrap_or(0.0),
            state.zoom_max.unwrap_or(0.0),
        );
        if let Some(center) = state.center {
            self.center.set(t, center);
        }
        if let Some(rotation) = state.rotation {
            let rotation = normalize_or_identity(DQuat::from_array(rotation));
            self.set_rotation(t, rotation);
        }
        if let Some(distance) = state.distance {
            self.set_distance(t, distance);
        }
    }

    /// Incremental commands stamped behind the newest key (for example
    /// when a negative delay idles ahead of the clock) apply at the
    /// newest key instead of being dropped.
    fn command_time(&self, t: f64) -> f64 {
        t.max(self.last_t())
    }

    fn orientation(&self) -> DQuat {
        DQuat::from_array(self.frame.rotation)
    }

    /// Push a rotation key in the same hemisphere as the track's value
    /// at `t`; component-wise interpolation must not cross the origin.
    fn set_rotation(&mut self, t: f64, rotation: DQuat) {
        let current = DQuat::from_array(self.rotation.curve(t));
        let rotation = if current.dot(rotation) < 0.0 {
            -rotation
        } else {
            rotation
        };
        self.rotation.set(t, rotation.to_array());
    }
}

impl CameraModel for OrbitCameraController {
    fn recalc_matrix(&mut self, t: f64) {
        let center = DVec3::from_array(self.center.curve(t));
        let rotation =
            normalize_or_identity(DQuat::from_array(self.rotation.curve(t)));
        let [log_radius] = self.radius.curve(t);
        let radius = log_radius.exp();

        let view = DMat4::from_translation(DVec3::new(0.0, 0.0, -radius))
            * DMat4::from_quat(rotation.conjugate())
            * DMat4::from_translation(-center);

        self.frame = CameraFrame {
            matrix: view.to_cols_array(),
            rotation: rotation.to_array(),
            eye: (center + rotation * DVec3::Z * radius).to_array(),
            up: (rotation * DVec3::Y).to_array(),
            center: center.to_array(),
            log_radius,
        };
    }

    fn frame(&self) -> &CameraFrame {
        &self.frame
    }

    fn idle(&mut self, t: f64) {
        self.center.idle(t);
        self.rotation.idle(t);
        self.radius.idle(t);
    }

    fn flush(&mut self, t: f64) {
        self.center.flush(t);
        self.rotation.flush(t);
        self.radius.flush(t);
    }

    fn rotate(&mut self, t: f64, yaw: f64, pitch: f64, roll: f64) {
        let t = self.command_time(t);
        self.recalc_matrix(t);
        // Positive yaw/pitch swing the eye left/up around the center.
        let delta = DQuat::from_axis_angle(DVec3::Y, -yaw)
            * DQuat::from_axis_angle(DVec3::X, -pitch)
            * DQuat::from_axis_angle(DVec3::Z, roll);
        let next = normalize_or_identity(self.orientation() * delta);
        self.set_rotation(t, next);
    }

    fn pan(&mut self, t: f64, dx: f64, dy: f64, dz: f64) {
        let t = self.command_time(t);
        self.recalc_matrix(t);
        let rotation = self.orientation();
        let shift = rotation * DVec3::X * dx + rotation * DVec3::Y * dy;
        self.center.move_by(t, shift.to_array());
        let radius = (self.frame.log_radius.exp() + dz).max(MIN_RADIUS);
        self.radius.set(t, [radius.ln()]);
    }

    fn translate(&mut self, t: f64, dx: f64, dy: f64, dz: f64) {
        let t = self.command_time(t);
        self.center.move_by(t, [dx, dy, dz]);
    }

    fn look_at(
        &mut self,
        t: f64,
        eye: Option<[f64; 3]>,
        center: Option<[f64; 3]>,
        up: Option<[f64; 3]>,
    ) {
        self.recalc_matrix(t);
        let center = DVec3::from_array(center.unwrap_or(self.frame.center));
        let eye = DVec3::from_array(eye.unwrap_or(self.frame.eye));
        let up = DVec3::from_array(up.unwrap_or(self.frame.up));

        let offset = eye - center;
        match basis_rotation(offset, up) {
            Some(rotation) => self.set_rotation(t, rotation),
            None => log::debug!("degenerate look-at basis, keeping rotation"),
        }
        self.center.set(t, center.to_array());
        self.radius.set(t, [offset.length().max(MIN_RADIUS).ln()]);
    }

    fn set_matrix(&mut self, t: f64, matrix: &[f64; 16]) {
        let view = DMat4::from_cols_array(matrix);
        let det = view.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            log::debug!("ignoring singular view matrix (det = {det})");
            self.center.idle(t);
            self.radius.idle(t);
            return;
        }
        let camera = view.inverse();
        let (_, rotation, eye) = camera.to_scale_rotation_translation();
        let eye = eye / camera.w_axis.w;
        let rotation = normalize_or_identity(rotation);

        self.recalc_matrix(t);
        let radius = self.frame.log_radius.exp();
        self.set_rotation(t, rotation);
        self.center
            .set(t, (eye - rotation * DVec3::Z * radius).to_array());
        self.radius.idle(t);
    }

    fn set_distance(&mut self, t: f64, distance: f64) {
        if distance > 0.0 {
            self.radius.set(t, [distance.ln()]);
        }
    }

    fn set_distance_limits(&mut self, lo: f64, hi: f64) {
        let lo = if lo > 0.0 { lo.ln() } else { f64::NEG_INFINITY };
        let hi = if hi > 0.0 { hi.ln() } else { f64::INFINITY };
        self.radius.set_bounds([lo], [hi.max(lo)]);
    }

    fn last_t(&self) -> f64 {
        self.center
            .last_t()
            .max(self.rotation.last_t())
            .max(self.radius.last_t())
    }

    fn to_json(&self) -> Value {
        serde_json::to_value(self.state()).unwrap_or_else(|e| {
            log::warn!("failed to serialize camera state: {e}");
            Value::Null
        })
    }

    fn from_json(&mut self, value: &Value) {
        match CameraState::deserialize(value) {
            Ok(state) => self.apply_state(&state),
            Err(e) => log::warn!("ignoring malformed camera state: {e}"),
        }
    }
}

fn normalize_or_identity(q: DQuat) -> DQuat {
    let len = q.length();
    if len.is_finite() && len > 1e-12 {
        q / len
    } else {
        DQuat::IDENTITY
    }
}

/// Rotation whose +Z axis points along `back` and whose +Y axis is as
/// close to `up` as possible.
fn basis_rotation(back: DVec3, up: DVec3) -> Option<DQuat> {
    let back = back.try_normalize()?;
    let right = up.cross(back).try_normalize()?;
    let up = back.cross(right);
    Some(DQuat::from_mat3(&DMat3::from_cols(right, up, back)))
}
