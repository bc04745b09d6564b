use glam::DMat4;
use serde_json::Value;

/// Camera fields recomputed by [`CameraModel::recalc_matrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// World-to-view matrix, column-major.
    pub matrix: [f64; 16],
    /// Orientation as a unit quaternion `[x, y, z, w]`.
    pub rotation: [f64; 4],
    /// Eye position in world space.
    pub eye: [f64; 3],
    /// Camera up direction in world space.
    pub up: [f64; 3],
    /// Orbit center in world space.
    pub center: [f64; 3],
    /// Natural log of the eye-to-center distance.
    pub log_radius: f64,
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self {
            matrix: DMat4::IDENTITY.to_cols_array(),
            rotation: [0.0, 0.0, 0.0, 1.0],
            eye: [0.0, 0.0, 1.0],
            up: [0.0, 1.0, 0.0],
            center: [0.0; 3],
            log_radius: 0.0,
        }
    }
}

/// A continuous-time orbital camera driven by timestamped commands.
///
/// Commands record intent at a time `t` (milliseconds); they do not
/// change [`frame`](Self::frame) until the next
/// [`recalc_matrix`](Self::recalc_matrix). Commands stamped earlier than
/// the model's newest state are resolved by the model, typically by
/// dropping them (last-committed-wins).
pub trait CameraModel {
    /// Recompute [`frame`](Self::frame) as of query time `t`.
    fn recalc_matrix(&mut self, t: f64);

    /// Fields from the most recent [`recalc_matrix`](Self::recalc_matrix).
    fn frame(&self) -> &CameraFrame;

    /// Settle buffered motion up to `t` without discarding history.
    fn idle(&mut self, t: f64);

    /// Discard history older than `t`.
    fn flush(&mut self, t: f64);

    /// Incremental rotation in camera space, in radians.
    fn rotate(&mut self, t: f64, yaw: f64, pitch: f64, roll: f64);

    /// Move the center along the camera's right/up axes by `dx`/`dy` and
    /// change the distance by `dz`.
    fn pan(&mut self, t: f64, dx: f64, dy: f64, dz: f64);

    /// Move the center in world space.
    fn translate(&mut self, t: f64, dx: f64, dy: f64, dz: f64);

    /// Re-aim the camera. Missing arguments keep their current values.
    fn look_at(
        &mut self,
        t: f64,
        eye: Option<[f64; 3]>,
        center: Option<[f64; 3]>,
        up: Option<[f64; 3]>,
    );

    /// Adopt the pose described by a world-to-view matrix.
    fn set_matrix(&mut self, t: f64, matrix: &[f64; 16]);

    /// Set the eye-to-center distance.
    fn set_distance(&mut self, t: f64, distance: f64);

    /// Clamp the distance to `[lo, hi]`.
    fn set_distance_limits(&mut self, lo: f64, hi: f64);

    /// Newest timestamp the model knows about.
    fn last_t(&self) -> f64;

    /// Serialize the current [`frame`](Self::frame) plus model settings.
    fn to_json(&self) -> Value;

    /// Apply a state previously produced by [`to_json`](Self::to_json).
    fn from_json(&mut self, value: &Value);
}
