//! Conversion of a measured corner sequence into the serializable room
//! model, and the file export itself.
//!
//! The model is a point-in-time snapshot: it is built only when the user
//! asks for an export and holds plain data, so everything here is
//! side-effect-free until [`write_room_model`] touches the filesystem.

use roomscan_core::WorldPoint;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Minimum number of corners that makes a closed room polygon.
pub const MIN_CORNERS: usize = 3;

/// Failures surfaced by room export. Per-tick and per-placement conditions
/// never reach this enum; only the export precondition and I/O do.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The session does not hold enough corners for a closed polygon.
    #[error("room export requires at least 3 corners, got {0}")]
    InsufficientGeometry(usize),
    /// The room model failed to serialize.
    #[error("failed to encode room geometry: {0}")]
    Encode(#[from] serde_json::Error),
    /// The room file could not be written. The session is unaffected; the
    /// caller may retry.
    #[error("failed to write room geometry: {0}")]
    Io(#[from] std::io::Error),
}

/// Compass direction of a wall in the tracking frame, where north is +Z and
/// east is +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Dominant-axis classification of a floor-plane segment. A zero-length
    /// segment defaults to east.
    pub fn of_segment(dx: f64, dz: f64) -> Self {
        if dx == 0.0 && dz == 0.0 {
            return Self::East;
        }
        if dx.abs() > dz.abs() {
            if dx > 0.0 {
                Self::East
            } else {
                Self::West
            }
        } else if dz > 0.0 {
            Self::North
        } else {
            Self::South
        }
    }
}

/// Scalar dimensions of the room; the footprint itself lives in `corners`
/// and `walls`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub height: f64,
    pub unit: String,
}

/// A position on the floor plane. `x` carries world X and `y` carries world
/// Z; the vertical axis is dropped at export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

/// A room corner with its sequential letter id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    pub id: String,
    pub position: PlanarPoint,
}

/// A wall between two adjacent corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub direction: Direction,
}

/// Dimensions of an obstacle attached to one or more walls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleDimensions {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

/// Furniture or fixtures inside the room. Carried in the schema for
/// downstream consumers; the measurement walkthrough records none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub dimensions: ObstacleDimensions,
    pub attached_to: Vec<String>,
}

/// A point-in-time snapshot of the measured room, in the shape downstream
/// tooling consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomModel {
    pub room_dimensions: RoomDimensions,
    pub corners: Vec<Corner>,
    pub walls: Vec<Wall>,
    pub obstacles: Vec<Obstacle>,
    pub origin_reference: String,
}

/// Sequential corner labels: `A` through `Z`, then `AA`, `AB`, and so on.
fn corner_label(index: usize) -> String {
    let mut n = index;
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().map(|&letter| letter as char).collect()
}

/// Room height measured between a floor point and a ceiling point placed
/// above it.
pub fn ceiling_height(floor: WorldPoint, ceiling: WorldPoint) -> f64 {
    floor.distance(ceiling)
}

/// Builds the room snapshot from anchor positions in placement order.
///
/// Corners take the planar `(x, z)` of each anchor; the vertical axis is
/// dropped and `height` is supplied by the caller. Walls connect corner `i`
/// to corner `i + 1` and the last corner back to the first, whether or not
/// the user explicitly re-tapped the starting corner.
pub fn build_room_model(points: &[WorldPoint], height: f64) -> Result<RoomModel, ExportError> {
    if points.len() < MIN_CORNERS {
        return Err(ExportError::InsufficientGeometry(points.len()));
    }

    let corners: Vec<Corner> = points
        .iter()
        .enumerate()
        .map(|(index, point)| Corner {
            id: corner_label(index),
            position: PlanarPoint {
                x: point.x,
                y: point.z,
            },
        })
        .collect();

    let walls = corners
        .iter()
        .enumerate()
        .map(|(index, corner)| {
            let next = &corners[(index + 1) % corners.len()];
            let dx = next.position.x - corner.position.x;
            let dz = next.position.y - corner.position.y;
            Wall {
                from: corner.id.clone(),
                to: next.id.clone(),
                distance: f64::hypot(dx, dz),
                direction: Direction::of_segment(dx, dz),
            }
        })
        .collect();

    Ok(RoomModel {
        room_dimensions: RoomDimensions {
            height,
            unit: "meters".to_string(),
        },
        corners,
        walls,
        obstacles: Vec::new(),
        origin_reference: "A".to_string(),
    })
}

/// Serializes the model as pretty-printed UTF-8 JSON, writes it to `path`,
/// and returns the absolute path of the written file.
pub fn write_room_model(model: &RoomModel, path: &Path) -> Result<PathBuf, ExportError> {
    let json = serde_json::to_string_pretty(model)?;
    fs::write(path, json)?;
    Ok(fs::canonicalize(path)?)
}
