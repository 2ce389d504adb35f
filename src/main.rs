//! Topdown - headless driver for the top-down camera pawn
//!
//! Loads settings, builds the pawn and plays a scripted input session on the
//! fixed tick, logging what the pawn did.

mod settings;
mod sim;

use std::rc::Rc;

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use settings::Settings;
use sim::{demo_script, HostController, Marker, Session};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting top-down session...");

    let settings = Settings::load();
    settings
        .write_defaults_if_missing()
        .context("Failed to save settings")?;

    let mut session = Session::new(&settings).context("Invalid controller settings")?;
    for (origin, extent) in [
        (Vec3::new(2500.0, 0.0, 0.0), Vec3::new(150.0, 150.0, 400.0)),
        (Vec3::new(-1800.0, 1200.0, 0.0), Vec3::new(300.0, 80.0, 200.0)),
        (Vec3::new(600.0, -2200.0, 0.0), Vec3::new(120.0, 120.0, 900.0)),
    ] {
        session.add_actor(Rc::new(Marker::new(origin, extent)));
    }

    let (width, height) = settings.session.resolution();
    let script = demo_script(Vec2::new(width as f32, height as f32));
    let summary = session.run(
        &script,
        settings.session.duration,
        settings.session.frame_delta,
    );

    info!(
        "Session finished: {} ticks, {} device switches, {} selections, {} drags, {} overlap events",
        summary.ticks,
        summary.device_switches,
        summary.selections,
        summary.drags_started,
        summary.overlap_events
    );
    info!(
        "Pawn ended at ({:.1}, {:.1}) with zoom {:.2}",
        summary.final_position.x, summary.final_position.y, summary.final_zoom
    );
    if let Some(view) = session.pawn().controller().and_then(HostController::camera) {
        info!(
            "Camera at ({:.1}, {:.1}, {:.1}), fov {:.1}",
            view.position.x, view.position.y, view.position.z, view.field_of_view
        );
    }

    Ok(())
}
