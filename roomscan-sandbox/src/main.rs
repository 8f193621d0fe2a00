mod scripted;

use log::*;
use roomscan_measure::{ceiling_height, MeasureSession, MeasureSettings};
use roomscan_viewport::Viewport;
use scripted::ScriptedTracker;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Clone)]
#[structopt(
    name = "roomscan-sandbox",
    about = "Walks a scripted rectangular room and exports its geometry"
)]
struct Opt {
    /// Room width along the X axis, in meters.
    #[structopt(long, default_value = "4.0")]
    width: f64,
    /// Room depth along the Z axis, in meters.
    #[structopt(long, default_value = "3.0")]
    depth: f64,
    /// Room height, in meters. Measured from scripted floor/ceiling points.
    #[structopt(long, default_value = "2.5")]
    height: f64,
    /// The file where settings are specified.
    ///
    /// This is in the format of `roomscan_measure::MeasureSettings`.
    #[structopt(short, long, default_value = "roomscan-settings.json")]
    settings: PathBuf,
    /// Output file for the room geometry.
    #[structopt(short, long, default_value = "room_data.json")]
    output: PathBuf,
    /// Viewport width in pixels.
    #[structopt(long, default_value = "1280")]
    viewport_width: u32,
    /// Viewport height in pixels.
    #[structopt(long, default_value = "720")]
    viewport_height: u32,
    /// Vertical field of view in degrees.
    #[structopt(long, default_value = "60.0")]
    fov_y: f64,
}

fn main() {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();

    let settings = std::fs::File::open(&opt.settings)
        .ok()
        .and_then(|file| serde_json::from_reader(file).ok());
    if settings.is_some() {
        info!("loaded existing settings");
    } else {
        info!("used default settings");
    }
    let settings: MeasureSettings = settings.unwrap_or_default();

    let viewport = Viewport::new(opt.viewport_width, opt.viewport_height);
    let mut tracker = ScriptedTracker::new(opt.width, opt.depth, opt.height, opt.fov_y.to_radians());
    let mut session = MeasureSession::new(settings);

    // Height first, the way a surveyor would: one point on the floor, one on
    // the ceiling.
    let height = ceiling_height(tracker.floor_reference(), tracker.ceiling_reference());
    info!("measured ceiling height {:.2} m", height);

    // Walk the corners.
    for corner in tracker.corner_route() {
        tracker.aim_at(corner);
        let state = session.tick(&mut tracker, viewport);
        debug!(
            "tick: {} anchor points on screen, preview {:?}",
            state.screen_points.len(),
            state.preview_point
        );
        if !state.tracking_ok {
            warn!("tracking lost, skipping placement");
            continue;
        }
        match session.hit_at_center(&mut tracker, viewport) {
            Some(hit) => {
                session.place_point(&mut tracker, &hit);
                if let Some(length) = session.last_wall_length() {
                    info!("segment closed at {:.2} m", length);
                }
            }
            None => warn!("no valid hit under the reticle"),
        }
    }
    session.confirm();
    info!("confirmed {} corners", session.confirmed_count());

    // Aim back at the first corner to show the closure snap before export.
    if let Some(first) = tracker.corner_route().first().copied() {
        tracker.aim_at(first);
        let state = session.tick(&mut tracker, viewport);
        if state.snap_point.is_some() {
            info!("closure snap active on the first corner");
        }
    }

    if let Err(err) = session.export(height, &opt.output) {
        error!("export failed: {}", err);
        std::process::exit(1);
    }
}
