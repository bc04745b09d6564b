//! Headless replay of a scripted orbit session.
//!
//! Drives an [`OrbitControls`] with a manual clock at 60 Hz: a hover, a
//! left drag, a shift-drag roll, a right-drag pan and a few wheel
//! notches, logging every frame that publishes a change.
//!
//! ```text
//! orbiter [options.toml]
//! ```

use std::path::Path;

use orbiter::camera::OrbitCameraController;
use orbiter::input::{Buttons, Modifiers};
use orbiter::{
    Clock, InputEvent, ManualClock, OrbitControls, OrbiterError,
    OrbiterOptions, SurfaceSize,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> Result<(), OrbiterError> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let options = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading options from {path}");
            OrbiterOptions::load(Path::new(&path))?
        }
        None => OrbiterOptions::default(),
    };

    let clock = ManualClock::new(0.0);
    let model = OrbitCameraController::new(&options.camera, clock.now());
    let mut controls = OrbitControls::with_parts(
        SurfaceSize::new(800.0, 600.0),
        model,
        clock.clone(),
        options,
    );

    let mut frame = 0_u32;
    for event in script() {
        clock.advance(FRAME_MS);
        frame += 1;
        let response = controls.handle_event(event);
        if let Some(command) = response.command {
            log::debug!("frame {frame}: {command:?}");
        }
        report(&mut controls, frame);
    }

    // Let the lagged query catch up with the last command.
    for _ in 0..30 {
        clock.advance(FRAME_MS);
        frame += 1;
        report(&mut controls, frame);
    }

    log::info!("final state: {}", controls.orbiter_mut().to_json_string());
    Ok(())
}

fn report(
    controls: &mut OrbitControls<SurfaceSize, OrbitCameraController, ManualClock>,
    frame: u32,
) {
    if controls.tick() {
        let orbiter = controls.orbiter();
        let [x, y, z] = *orbiter.eye();
        log::info!(
            "frame {frame}: eye ({x:.3}, {y:.3}, {z:.3}), distance {:.3}",
            orbiter.distance()
        );
    }
}

fn script() -> Vec<InputEvent> {
    let pointer = |buttons, x, y, modifiers| InputEvent::PointerMove {
        buttons,
        x,
        y,
        modifiers,
    };
    let plain = Modifiers::default();

    let mut events = vec![pointer(Buttons::NONE, 400.0, 300.0, plain)];
    events.extend((1..=12).map(|i| {
        pointer(Buttons::PRIMARY, 400.0 + f64::from(i) * 8.0, 300.0, plain)
    }));
    events.extend((1..=6).map(|i| {
        pointer(Buttons::PRIMARY, 496.0 - f64::from(i) * 6.0, 300.0, Modifiers::SHIFT)
    }));
    events.push(pointer(Buttons::NONE, 460.0, 300.0, plain));
    events.extend((1..=8).map(|i| {
        pointer(Buttons::SECONDARY, 460.0, 300.0 + f64::from(i) * 5.0, plain)
    }));
    events.extend((0..4).map(|_| InputEvent::Wheel {
        dx: 0.0,
        dy: -100.0,
        dz: 0.0,
    }));
    events
}
