use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default, rename_all = "camelCase")]
/// Initial camera placement, consumed once when the controller is built.
///
/// When `eye` is present the orientation and radius are derived from a
/// look-at of `eye` toward `center`, and `rotation`/`radius` are ignored.
pub struct CameraOptions {
    /// Orbit center in world space.
    pub center: [f64; 3],
    /// Initial orientation as a unit quaternion `[x, y, z, w]`.
    pub rotation: [f64; 4],
    /// Initial distance from the center.
    #[schemars(range(min = 0.0))]
    pub radius: f64,
    /// Optional eye position; overrides `rotation` and `radius`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye: Option<[f64; 3]>,
    /// Up direction used together with `eye`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up: Option<[f64; 3]>,
    /// Zoom clamp `[min, max]`. Non-positive bounds are unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_limits: Option<[f64; 2]>,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            center: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            radius: 1.0,
            eye: None,
            up: None,
            distance_limits: None,
        }
    }
}
