//! Snap resolution between the live preview point and placed anchors.
//!
//! Two rules, tried in order. Closing the polygon comes first: aiming back
//! at the first anchor snaps on pixel distance alone, because re-finding the
//! exact depth of a far-away first point is unreliable. Every other anchor
//! snaps only when it is both pixel-near and world-near, since two points
//! can coincide on screen while sitting at very different depths.

use crate::MeasureSettings;
use float_ord::FloatOrd;
use roomscan_core::{ScreenPoint, WorldPoint};

/// Outcome of snap resolution for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResolution {
    /// Screen position of the preview reticle, moved onto the snap target
    /// when one is active.
    pub preview: ScreenPoint,
    /// Screen position of the active snap target, if any.
    pub snap_point: Option<ScreenPoint>,
    /// Index of the anchor the preview snapped to. Placement must reuse this
    /// anchor's identity instead of creating a new one.
    pub snap_anchor: Option<usize>,
}

impl SnapResolution {
    fn free(preview: ScreenPoint) -> Self {
        Self {
            preview,
            snap_point: None,
            snap_anchor: None,
        }
    }

    fn snapped(target: ScreenPoint, index: usize) -> Self {
        Self {
            preview: target,
            snap_point: Some(target),
            snap_anchor: Some(index),
        }
    }
}

/// Resolves whether the preview point should merge into an existing anchor.
///
/// `anchor_screens` holds this tick's reprojections aligned with
/// `anchor_worlds`; anchors that failed to project hold `None` and can never
/// be snap targets.
pub fn resolve(
    preview: ScreenPoint,
    hit_world: WorldPoint,
    anchor_screens: &[Option<ScreenPoint>],
    anchor_worlds: &[WorldPoint],
    settings: &MeasureSettings,
) -> SnapResolution {
    let pixel_radius_sq = settings.snap_pixel_radius * settings.snap_pixel_radius;

    if let Some(first) = anchor_screens.first().copied().flatten() {
        if preview.distance_squared(first) <= pixel_radius_sq {
            return SnapResolution::snapped(first, 0);
        }
    }

    let nearest = anchor_screens
        .iter()
        .enumerate()
        .filter_map(|(index, screen)| screen.map(|screen| (index, screen)))
        .min_by_key(|&(_, screen)| FloatOrd(preview.distance_squared(screen)));

    if let Some((index, screen)) = nearest {
        if preview.distance_squared(screen) <= pixel_radius_sq
            && anchor_worlds[index].distance(hit_world) <= settings.snap_world_radius
        {
            return SnapResolution::snapped(screen, index);
        }
    }

    SnapResolution::free(preview)
}
