//! # Roomscan Measure
//!
//! The stateful heart of the measurement engine: a checkpointed
//! [`MeasureSession`] that a host drives once per tick (about 20 Hz) and on
//! every user action. The session owns the ordered anchor list and the
//! confirm/undo checkpoint stack; each tick it reprojects the anchors
//! through `roomscan-viewport`, arbitrates a hit under the reticle
//! ([`hit`]), resolves snapping against the placed anchors ([`snap`]), and
//! hands the resulting [`UiState`] to whatever draws the overlay. On demand
//! it snapshots itself into a serializable room model ([`RoomModel`]) and
//! writes it to disk.
//!
//! Everything mutates on the single logical thread that drives the tick
//! loop; there is no internal locking. Recoverable per-tick conditions (the
//! camera not tracking, nothing valid under the reticle) quietly produce a
//! suppressed state and are retried next tick. Only the export precondition
//! and file I/O surface errors.

pub mod hit;
pub mod snap;

mod export;
mod settings;

pub use export::*;
pub use settings::*;

use log::*;
use roomscan_core::{
    AnchorHandle, CameraFrame, HitCandidate, ScreenPoint, TrackingAdapter, WorldPoint,
};
use roomscan_viewport::{ViewProjection, Viewport};
use std::path::{Path, PathBuf};

/// Per-tick state handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    /// Screen positions of the anchors that projected this tick, in
    /// placement order.
    pub screen_points: Vec<ScreenPoint>,
    /// Where the reticle's hit would land, snapped onto a target when one is
    /// active. `None` while tracking is unavailable or nothing valid is
    /// under the reticle.
    pub preview_point: Option<ScreenPoint>,
    /// The active snap target, if any.
    pub snap_point: Option<ScreenPoint>,
    /// Whether the camera was actively tracking this tick.
    pub tracking_ok: bool,
}

/// A checkpointed room-measurement session.
///
/// A session is an explicit, constructor-created instance: create one per
/// measurement flow, and as many as needed side by side, since they share
/// no global state. The session starts empty and becomes active with the
/// first placed point.
///
/// Anchors are owned by the tracking runtime and held here as handles;
/// [`MeasureSession::undo`] and [`MeasureSession::clear`] are the only
/// places that release them.
pub struct MeasureSession<T: TrackingAdapter> {
    settings: MeasureSettings,
    anchors: Vec<T::Anchor>,
    reprojections: Vec<Option<ScreenPoint>>,
    checkpoints: Vec<usize>,
    snap_candidate: Option<usize>,
}

impl<T: TrackingAdapter> Default for MeasureSession<T> {
    fn default() -> Self {
        Self::new(MeasureSettings::default())
    }
}

impl<T: TrackingAdapter> MeasureSession<T> {
    pub fn new(settings: MeasureSettings) -> Self {
        Self {
            settings,
            anchors: Vec::new(),
            reprojections: Vec::new(),
            checkpoints: vec![0],
            snap_candidate: None,
        }
    }

    pub fn settings(&self) -> &MeasureSettings {
        &self.settings
    }

    /// The placed anchors in placement order.
    pub fn anchors(&self) -> &[T::Anchor] {
        &self.anchors
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Whether no point has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Index of the anchor the preview snapped to on the last tick.
    pub fn snap_candidate(&self) -> Option<usize> {
        self.snap_candidate
    }

    /// The anchor count at the last confirm: the floor `undo` will not drop
    /// below.
    pub fn confirmed_count(&self) -> usize {
        self.checkpoints.last().copied().unwrap_or(0)
    }

    /// Detaches every anchor and resets the checkpoint stack.
    pub fn clear(&mut self, tracker: &mut T) {
        for anchor in self.anchors.drain(..) {
            if let Err(err) = tracker.detach_anchor(anchor) {
                error!("anchor detach failed during clear: {}", err);
            }
        }
        self.reprojections.clear();
        self.snap_candidate = None;
        self.checkpoints.clear();
        self.checkpoints.push(0);
    }

    /// Places a measurement point from an already-validated hit.
    ///
    /// With a snap target active from the last tick the placement reuses
    /// that anchor's identity and the anchor list is unchanged; otherwise a
    /// new anchor is created from the hit and appended.
    pub fn place_point(&mut self, tracker: &mut T, hit: &HitCandidate) {
        if let Some(index) = self.snap_candidate {
            debug!("placement reuses snapped anchor {}", index);
            return;
        }
        self.anchors.push(tracker.create_anchor(hit));
    }

    /// Pushes the current anchor count as the new undo floor.
    pub fn confirm(&mut self) {
        self.checkpoints.push(self.anchors.len());
    }

    /// Removes the most recently placed anchor unless that would drop the
    /// count below the last confirmed floor. Returns whether an anchor was
    /// removed. Never errors.
    pub fn undo(&mut self, tracker: &mut T) -> bool {
        if self.anchors.len() <= self.confirmed_count() {
            return false;
        }
        if let Some(anchor) = self.anchors.pop() {
            if let Err(err) = tracker.detach_anchor(anchor) {
                error!("anchor detach failed during undo: {}", err);
            }
            self.reprojections.truncate(self.anchors.len());
            self.snap_candidate = self.snap_candidate.filter(|&index| index < self.anchors.len());
            true
        } else {
            false
        }
    }

    /// Distance in meters of the most recently closed segment.
    pub fn last_wall_length(&self) -> Option<f64> {
        let count = self.anchors.len();
        (count >= 2).then(|| {
            self.anchors[count - 2]
                .world_point()
                .distance(self.anchors[count - 1].world_point())
        })
    }

    /// Runs one preview tick.
    ///
    /// Reprojects every anchor with this tick's camera frame, hit-tests the
    /// reticle, arbitrates the candidates, and resolves snapping. A
    /// degenerate viewport or a camera that is not tracking yields a
    /// suppressed state; the host simply calls again next tick.
    pub fn tick(&mut self, tracker: &mut T, viewport: Viewport) -> UiState {
        self.snap_candidate = None;
        if viewport.is_empty() {
            self.reprojections.clear();
            return UiState::default();
        }

        let frame = tracker.camera_frame();
        let projection = ViewProjection::new(&frame, viewport);
        self.reprojections = self
            .anchors
            .iter()
            .map(|anchor| projection.project(anchor.world_point()))
            .collect();

        let tracking_ok = frame.is_tracking();
        let mut preview_point = None;
        let mut snap_point = None;
        if tracking_ok {
            if let Some(candidate) = self.arbitrate(tracker, viewport.center(), &frame) {
                if let Some(preview) = projection.project(candidate.point) {
                    let anchor_worlds: Vec<WorldPoint> = self
                        .anchors
                        .iter()
                        .map(|anchor| anchor.world_point())
                        .collect();
                    let resolution = snap::resolve(
                        preview,
                        candidate.point,
                        &self.reprojections,
                        &anchor_worlds,
                        &self.settings,
                    );
                    preview_point = Some(resolution.preview);
                    snap_point = resolution.snap_point;
                    self.snap_candidate = resolution.snap_anchor;
                }
            }
        }

        UiState {
            screen_points: self.reprojections.iter().copied().flatten().collect(),
            preview_point,
            snap_point,
            tracking_ok,
        }
    }

    /// The arbitrated hit under the reticle, fetched with a fresh camera
    /// frame. `None` while the viewport is degenerate, the camera is not
    /// tracking, or nothing valid is under the reticle.
    pub fn hit_at_center(&self, tracker: &mut T, viewport: Viewport) -> Option<HitCandidate> {
        if viewport.is_empty() {
            return None;
        }
        let frame = tracker.camera_frame();
        if !frame.is_tracking() {
            return None;
        }
        self.arbitrate(tracker, viewport.center(), &frame)
    }

    fn arbitrate(
        &self,
        tracker: &mut T,
        point: ScreenPoint,
        frame: &CameraFrame,
    ) -> Option<HitCandidate> {
        hit::best_candidate(tracker.hit_test(point), frame.pose.position(), &self.settings)
    }

    /// Snapshots the session into a room model. Requires at least
    /// [`MIN_CORNERS`] placed anchors.
    pub fn room_model(&self, height: f64) -> Result<RoomModel, ExportError> {
        let points: Vec<WorldPoint> = self
            .anchors
            .iter()
            .map(|anchor| anchor.world_point())
            .collect();
        build_room_model(&points, height)
    }

    /// Builds the room model and writes it as pretty-printed JSON, returning
    /// the absolute path written. Failure leaves the session untouched; the
    /// caller may retry.
    pub fn export(&self, height: f64, path: &Path) -> Result<PathBuf, ExportError> {
        let model = self.room_model(height)?;
        let written = write_room_model(&model, path)?;
        info!("room geometry exported to {}", written.display());
        Ok(written)
    }
}
