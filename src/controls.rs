use crate::camera::{CameraModel, OrbitCameraController};
use crate::clock::{Clock, SystemClock};
use crate::input::{EventResponse, InputEvent, InputTranslator};
use crate::options::OrbiterOptions;
use crate::orbiter::Orbiter;
use crate::surface::Surface;

/// An [`Orbiter`] bound to a drawing surface and its input stream.
///
/// The host forwards normalized events to
/// [`handle_event`](Self::handle_event) and calls [`tick`](Self::tick)
/// once per frame, redrawing only when it returns `true`.
#[derive(Debug)]
pub struct OrbitControls<S, M = OrbitCameraController, C = SystemClock> {
    surface: S,
    orbiter: Orbiter<M, C>,
    translator: InputTranslator,
}

impl<S: Surface> OrbitControls<S> {
    /// Attach the stock controller, driven by wall-clock time, to
    /// `surface`.
    pub fn new(surface: S, options: OrbiterOptions) -> Self {
        let orbiter = Orbiter::new(SystemClock::new(), options);
        log::debug!(
            "orbit controls attached to a {}x{} surface",
            surface.client_width(),
            surface.client_height()
        );
        Self {
            surface,
            orbiter,
            translator: InputTranslator::new(),
        }
    }
}

impl<S: Surface, M: CameraModel, C: Clock> OrbitControls<S, M, C> {
    /// Assemble from an explicit model and clock.
    pub fn with_parts(
        surface: S,
        model: M,
        clock: C,
        options: OrbiterOptions,
    ) -> Self {
        Self {
            surface,
            orbiter: Orbiter::with_options(model, clock, options),
            translator: InputTranslator::new(),
        }
    }

    /// Feed one normalized input event.
    pub fn handle_event(&mut self, event: InputEvent) -> EventResponse {
        self.translator
            .handle(event, &mut self.orbiter, &self.surface)
    }

    /// See [`Orbiter::tick`].
    pub fn tick(&mut self) -> bool {
        self.orbiter.tick()
    }

    /// The wrapped orbiter.
    pub fn orbiter(&self) -> &Orbiter<M, C> {
        &self.orbiter
    }

    /// The wrapped orbiter, for programmatic commands and options.
    pub fn orbiter_mut(&mut self) -> &mut Orbiter<M, C> {
        &mut self.orbiter
    }

    /// The bound surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The bound surface, e.g. to record a resize.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The gesture interpreter.
    pub fn translator(&self) -> &InputTranslator {
        &self.translator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::input::{Buttons, Modifiers};
    use crate::surface::SurfaceSize;

    fn drag(buttons: Buttons, x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove {
            buttons,
            x,
            y,
            modifiers: Modifiers::default(),
        }
    }

    fn manual_controls(
        clock: &ManualClock,
    ) -> OrbitControls<SurfaceSize, OrbitCameraController, ManualClock> {
        let options = OrbiterOptions::default();
        let model = OrbitCameraController::new(&options.camera, clock.now());
        OrbitControls::with_parts(
            SurfaceSize::new(800.0, 600.0),
            model,
            clock.clone(),
            options,
        )
    }

    #[test]
    fn stock_controls_start_changed() {
        let mut controls =
            OrbitControls::new(SurfaceSize::new(640.0, 480.0), OrbiterOptions::default());
        assert!(controls.orbiter().is_changed());
        assert!(controls.tick());
        assert_eq!(controls.surface().client_width(), 640.0);
    }

    #[test]
    fn drag_then_settle_moves_the_eye() {
        let clock = ManualClock::new(0.0);
        let mut controls = manual_controls(&clock);
        let _ = controls.tick();

        let _ = controls.handle_event(drag(Buttons::NONE, 400.0, 300.0));
        for step in 1..=10 {
            clock.advance(16.0);
            let x = 400.0 + f64::from(step) * 10.0;
            let response = controls.handle_event(drag(Buttons::PRIMARY, x, 300.0));
            assert!(matches!(response.command, Some(crate::Command::Rotate { .. })));
            let _ = controls.tick();
        }
        clock.advance(500.0);
        let _ = controls.tick();
        assert!(controls.orbiter().eye()[0] < 0.0);
        assert!((controls.orbiter().distance() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn wheel_dollies_and_requests_suppression() {
        let clock = ManualClock::new(0.0);
        let mut controls = manual_controls(&clock);
        clock.advance(16.0);
        let response = controls.handle_event(InputEvent::Wheel {
            dx: 0.0,
            dy: 120.0,
            dz: 0.0,
        });
        assert!(response.prevent_default);
        clock.advance(500.0);
        let _ = controls.tick();
        assert!((controls.orbiter().distance() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn resize_changes_gesture_scale() {
        let clock = ManualClock::new(0.0);
        let mut controls = manual_controls(&clock);
        let _ = controls.handle_event(drag(Buttons::NONE, 0.0, 0.0));
        *controls.surface_mut() = SurfaceSize::new(800.0, 300.0);
        let response = controls.handle_event(drag(Buttons::PRIMARY, 30.0, 0.0));
        let Some(crate::Command::Rotate { yaw, .. }) = response.command else {
            panic!("expected a rotate, got {:?}", response.command);
        };
        assert!((yaw - std::f64::consts::PI * 0.1).abs() < 1e-12);
        assert_eq!(controls.translator().last_position(), (30.0, 0.0));
    }

    #[test]
    fn single_pan_sample_settles_at_commanded_offset() {
        let clock = ManualClock::new(0.0);
        let mut controls = manual_controls(&clock);
        let _ = controls.handle_event(drag(Buttons::NONE, 0.0, 0.0));
        clock.advance(16.0);
        let response = controls.handle_event(drag(Buttons::SECONDARY, 60.0, 30.0));
        let Some(crate::Command::Pan { dx, dy, dz }) = response.command else {
            panic!("expected a pan, got {:?}", response.command);
        };
        assert_eq!(dz, 0.0);
        for _ in 0..100 {
            clock.advance(16.0);
            let _ = controls.tick();
        }
        // Default camera axes are the world axes.
        let center = *controls.orbiter().center();
        assert!((center[0] - dx).abs() < 1e-9, "{center:?}");
        assert!((center[1] - dy).abs() < 1e-9, "{center:?}");
        assert!(center[2].abs() < 1e-9);
        assert!((dx + 0.1 * 800.0 / 600.0).abs() < 1e-12);
    }
}
