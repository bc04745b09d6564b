// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Time-reconciled orbit camera controls for interactive 3D viewers.
//!
//! Input arrives at irregular times; frames are drawn at others. Orbiter
//! records every camera command against a millisecond clock and
//! publishes the camera as it was a short, configurable delay ago, so the
//! renderer always sees a smooth path and can skip redraws when nothing
//! moved.
//!
//! # Key entry points
//!
//! - [`OrbitControls`] - an orbiter bound to a drawing surface and its
//!   input events
//! - [`Orbiter`] - the lagged, change-detecting camera facade
//! - [`InputTranslator`] - pointer and wheel gestures to camera commands
//! - [`camera::OrbitCameraController`] - the stock track-backed camera
//! - [`OrbiterOptions`] - runtime configuration with TOML presets
//!
//! # Frame loop
//!
//! ```ignore
//! let mut controls = OrbitControls::new(surface, OrbiterOptions::default());
//! // per input event
//! let response = controls.handle_event(event);
//! // per frame
//! if controls.tick() {
//!     upload(controls.orbiter().snapshot().to_uniform());
//! }
//! ```

pub mod camera;
pub mod clock;
/// Orbiter, translator and surface bundled for a host window.
pub mod controls;
pub mod error;
pub mod input;
pub mod options;
pub mod orbiter;
/// Published camera state and its GPU uniform form.
pub mod snapshot;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controls::OrbitControls;
pub use error::OrbiterError;
pub use input::{Command, EventResponse, InputEvent, InputTranslator};
pub use options::OrbiterOptions;
pub use orbiter::Orbiter;
pub use snapshot::{Snapshot, ViewUniform};
pub use surface::{Surface, SurfaceSize};
