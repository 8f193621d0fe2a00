//! Hit-candidate arbitration.
//!
//! A hit test returns every trackable a ray intersects, in no particular
//! order. Arbitration picks the one worth measuring against: depth samples
//! first, then vertical planes, then range-limited feature points, then
//! horizontal planes that contain the hit. A flat surface is often ambiguous
//! between the floor and an unintended detection, so it comes last.

use crate::MeasureSettings;
use roomscan_core::{HitCandidate, TrackableKind, WorldPoint};

/// Selects the best candidate among the raw trackable intersections at a
/// screen point.
///
/// Candidates whose trackable is not actively tracked are discarded. Within
/// each category only the first candidate encountered is kept. Precedence:
/// depth point > vertical plane > feature point (within
/// [`MeasureSettings::feature_point_range`] of the camera) > horizontal
/// plane (only when the hit pose lies inside the plane's measured polygon).
pub fn best_candidate(
    candidates: Vec<HitCandidate>,
    camera_position: WorldPoint,
    settings: &MeasureSettings,
) -> Option<HitCandidate> {
    let mut depth = None;
    let mut vertical = None;
    let mut feature = None;
    let mut horizontal = None;

    for candidate in candidates {
        if !candidate.tracking.is_tracking() {
            continue;
        }
        match candidate.kind {
            TrackableKind::DepthPoint => {
                depth.get_or_insert(candidate);
            }
            TrackableKind::VerticalPlane { .. } => {
                vertical.get_or_insert(candidate);
            }
            TrackableKind::FeaturePoint => {
                if candidate.point.distance(camera_position) < settings.feature_point_range {
                    feature.get_or_insert(candidate);
                }
            }
            TrackableKind::HorizontalPlane { pose_in_polygon } => {
                if pose_in_polygon {
                    horizontal.get_or_insert(candidate);
                }
            }
        }
    }

    depth.or(vertical).or(feature).or(horizontal)
}
