//! Converts normalized pointer and wheel events into camera commands.
//!
//! The translator owns the only transient gesture state (the previous
//! pointer sample) and reads everything else (gains, flips, gating,
//! current distance) from the orbiter at event time, so configuration
//! changes apply from the very next event.

use std::f64::consts::PI;

use super::event::{Buttons, InputEvent};
use crate::camera::CameraModel;
use crate::clock::Clock;
use crate::options::OrbiterOptions;
use crate::orbiter::Orbiter;
use crate::surface::Surface;

/// A camera command produced by a single gesture sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Incremental rotation in camera space, in radians.
    Rotate {
        /// About the camera up axis.
        yaw: f64,
        /// About the camera right axis.
        pitch: f64,
        /// About the view axis.
        roll: f64,
    },
    /// Camera-relative pan; `dz` dollies along the view axis.
    Pan {
        /// Along the camera right axis.
        dx: f64,
        /// Along the camera up axis.
        dy: f64,
        /// Change in distance.
        dz: f64,
    },
}

impl Command {
    /// Submit to an orbiter, stamped with the orbiter's current time.
    pub fn apply<M: CameraModel, C: Clock>(self, orbiter: &mut Orbiter<M, C>) {
        match self {
            Self::Rotate { yaw, pitch, roll } => orbiter.rotate(yaw, pitch, roll),
            Self::Pan { dx, dy, dz } => orbiter.pan(dx, dy, dz),
        }
    }
}

/// What the translator did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EventResponse {
    /// The command issued, if any.
    pub command: Option<Command>,
    /// Whether the host should suppress the surface's default handling
    /// (page scroll, context menu).
    pub prevent_default: bool,
}

/// Gesture interpreter for one drawing surface.
///
/// Drag precedence when several buttons are held is fixed: primary
/// (rotate, or roll with shift) wins over secondary (pan), which wins
/// over tertiary (dolly).
#[derive(Debug, Clone, Default)]
pub struct InputTranslator {
    last_x: f64,
    last_y: f64,
}

impl InputTranslator {
    /// Create a translator whose previous sample is the surface origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Previous pointer sample in surface pixels.
    #[must_use]
    pub fn last_position(&self) -> (f64, f64) {
        (self.last_x, self.last_y)
    }

    /// Translate `event` and submit the resulting command to `orbiter`.
    pub fn handle<M, C, S>(
        &mut self,
        event: InputEvent,
        orbiter: &mut Orbiter<M, C>,
        surface: &S,
    ) -> EventResponse
    where
        M: CameraModel,
        C: Clock,
        S: Surface + ?Sized,
    {
        let response =
            self.translate(event, orbiter.options(), orbiter.distance(), surface);
        if let Some(command) = response.command {
            log::trace!("{event:?} -> {command:?}");
            command.apply(orbiter);
        }
        response
    }

    /// Map `event` to at most one command without submitting it.
    ///
    /// `distance` is the orbiter's published distance and scales pan and
    /// dolly so they feel the same at every zoom level.
    pub fn translate<S: Surface + ?Sized>(
        &mut self,
        event: InputEvent,
        options: &OrbiterOptions,
        distance: f64,
        surface: &S,
    ) -> EventResponse {
        match event {
            InputEvent::PointerMove { buttons, x, y, modifiers } => {
                let (px, py) = (x - self.last_x, y - self.last_y);
                self.last_x = x;
                self.last_y = y;
                if !options.input_enabled {
                    return EventResponse::default();
                }
                let command = Gesture::new(options, distance, surface)
                    .and_then(|g| g.drag(buttons, modifiers.shift, px, py));
                EventResponse {
                    command,
                    prevent_default: false,
                }
            }
            InputEvent::Wheel { dx, dy, .. } => {
                if !options.input_enabled {
                    return EventResponse::default();
                }
                let command = Gesture::new(options, distance, surface)
                    .map(|g| g.wheel(dx, dy));
                EventResponse {
                    command,
                    prevent_default: true,
                }
            }
            InputEvent::ContextMenu => EventResponse {
                command: None,
                prevent_default: options.input_enabled,
            },
        }
    }
}

/// Per-event gains, resolved once the surface is known to be usable.
struct Gesture {
    width: f64,
    height: f64,
    flip_x: f64,
    flip_y: f64,
    rotate: f64,
    pan: f64,
    zoom: f64,
    distance: f64,
}

impl Gesture {
    fn new<S: Surface + ?Sized>(
        options: &OrbiterOptions,
        distance: f64,
        surface: &S,
    ) -> Option<Self> {
        let width = surface.client_width();
        let height = surface.client_height();
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
        {
            log::debug!("dropping gesture on a {width}x{height} surface");
            return None;
        }
        Some(Self {
            width,
            height,
            flip_x: if options.flip_x { -1.0 } else { 1.0 },
            flip_y: if options.flip_y { -1.0 } else { 1.0 },
            rotate: PI * options.rotate_speed,
            pan: options.translate_speed,
            zoom: options.zoom_speed,
            distance,
        })
    }

    /// `px`/`py` are raw pixel deltas; everything is normalized by the
    /// surface height so behavior does not depend on resolution.
    fn drag(&self, buttons: Buttons, roll: bool, px: f64, py: f64) -> Option<Command> {
        let dx = px / self.height;
        let dy = py / self.height;
        if buttons.contains(Buttons::PRIMARY) {
            if roll {
                Some(Command::Rotate {
                    yaw: 0.0,
                    pitch: 0.0,
                    roll: -self.rotate * dx,
                })
            } else {
                Some(Command::Rotate {
                    yaw: self.flip_x * self.rotate * dx,
                    pitch: self.flip_y * self.rotate * dy,
                    roll: 0.0,
                })
            }
        } else if buttons.contains(Buttons::SECONDARY) {
            let aspect = self.width / self.height;
            Some(Command::Pan {
                dx: -self.pan * dx * self.distance * aspect,
                dy: self.pan * dy * self.distance,
                dz: 0.0,
            })
        } else if buttons.contains(Buttons::TERTIARY) {
            Some(Command::Pan {
                dx: 0.0,
                dy: 0.0,
                dz: self.zoom * dy * self.distance,
            })
        } else {
            None
        }
    }

    fn wheel(&self, dx: f64, dy: f64) -> Command {
        if dx.abs() > dy.abs() {
            Command::Rotate {
                yaw: self.flip_x * self.rotate * dx / self.width,
                pitch: 0.0,
                roll: 0.0,
            }
        } else {
            Command::Pan {
                dx: 0.0,
                dy: 0.0,
                dz: self.zoom * dy / self.height * self.distance,
            }
        }
    }
}
