//! Continuous-time orbit camera.
//!
//! The [`CameraModel`] trait is the seam the orbiter drives; the
//! [`OrbitCameraController`] is the stock implementation, built from
//! time-stamped [`Track`]s.

/// Track-backed orbit camera controller.
pub mod controller;
/// The timestamped camera command interface.
pub mod model;
/// Keyframe track with Hermite reconstruction.
pub mod track;

pub use controller::{CameraState, OrbitCameraController};
pub use model::{CameraFrame, CameraModel};
pub use track::{Keyframe, Track};
