mod common;

use common::{depth_hit, FakeTracker};
use roomscan_core::{ScreenPoint, TrackingState, WorldPoint};
use roomscan_measure::MeasureSession;
use roomscan_viewport::Viewport;

fn viewport() -> Viewport {
    Viewport::new(1000, 1000)
}

fn place(session: &mut MeasureSession<FakeTracker>, tracker: &mut FakeTracker, point: WorldPoint) {
    let hit = depth_hit(point);
    session.place_point(tracker, &hit);
}

fn assert_near(actual: ScreenPoint, x: f64, y: f64) {
    assert!(
        (actual.x - x).abs() < 1e-6 && (actual.y - y).abs() < 1e-6,
        "expected ({}, {}), got {:?}",
        x,
        y,
        actual,
    );
}

#[test]
fn undo_respects_checkpoint_floor() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();

    // Nothing to undo in an empty session.
    assert!(!session.undo(&mut tracker));
    assert_eq!(session.confirmed_count(), 0);

    place(&mut session, &mut tracker, WorldPoint::new(0.0, 0.0, -5.0));
    place(&mut session, &mut tracker, WorldPoint::new(1.0, 0.0, -5.0));
    session.confirm();
    assert_eq!(session.confirmed_count(), 2);

    place(&mut session, &mut tracker, WorldPoint::new(2.0, 0.0, -5.0));
    assert_eq!(session.anchor_count(), 3);

    // One unconfirmed anchor comes back off; the confirmed two do not.
    assert!(session.undo(&mut tracker));
    assert_eq!(session.anchor_count(), 2);
    assert!(!session.undo(&mut tracker));
    assert_eq!(session.anchor_count(), 2);
    assert_eq!(tracker.detached, 1);

    // Anchor count never drops below the topmost checkpoint.
    assert!(session.anchor_count() >= session.confirmed_count());
}

#[test]
fn confirm_keeps_the_floor_monotonic() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();

    place(&mut session, &mut tracker, WorldPoint::new(0.0, 0.0, -5.0));
    session.confirm();
    place(&mut session, &mut tracker, WorldPoint::new(1.0, 0.0, -5.0));
    session.confirm();
    assert_eq!(session.confirmed_count(), 2);

    // Confirming without new placements repeats the same floor.
    session.confirm();
    assert_eq!(session.confirmed_count(), 2);
    assert!(!session.undo(&mut tracker));
}

#[test]
fn clear_detaches_everything_and_resets() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();

    for x in 0..3 {
        place(&mut session, &mut tracker, WorldPoint::new(f64::from(x), 0.0, -5.0));
    }
    session.confirm();
    session.clear(&mut tracker);

    assert!(session.is_empty());
    assert_eq!(session.confirmed_count(), 0);
    assert_eq!(tracker.detached, 3);
    assert!(!session.undo(&mut tracker));
}

#[test]
fn snapped_placement_is_idempotent() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();
    let first = WorldPoint::new(0.0, 0.0, -5.0);

    tracker.aim(first);
    let hit = session.hit_at_center(&mut tracker, viewport()).unwrap();
    session.place_point(&mut tracker, &hit);
    assert_eq!(session.anchor_count(), 1);

    // Aiming back at the placed point makes it the snap target.
    let state = session.tick(&mut tracker, viewport());
    assert_eq!(session.snap_candidate(), Some(0));
    assert_near(state.snap_point.unwrap(), 500.0, 500.0);
    assert_near(state.preview_point.unwrap(), 500.0, 500.0);

    // Placing on the snap target reuses the anchor.
    let hit = session.hit_at_center(&mut tracker, viewport()).unwrap();
    session.place_point(&mut tracker, &hit);
    assert_eq!(session.anchor_count(), 1);
    assert_eq!(tracker.created, 1);
}

#[test]
fn closure_snap_is_world_distance_agnostic() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();

    place(&mut session, &mut tracker, WorldPoint::new(0.0, 0.0, -5.0));

    // 20 px from the first anchor on screen, 0.2 m away in the world: the
    // closure rule snaps regardless of the world distance.
    tracker.aim(WorldPoint::new(0.2, 0.0, -5.0));
    let state = session.tick(&mut tracker, viewport());
    assert_eq!(session.snap_candidate(), Some(0));
    assert_near(state.snap_point.unwrap(), 500.0, 500.0);
}

#[test]
fn nearest_snap_enforces_world_radius() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();

    place(&mut session, &mut tracker, WorldPoint::new(0.0, 0.0, -5.0));
    place(&mut session, &mut tracker, WorldPoint::new(1.0, 0.0, -5.0));

    // Pixel-near the second anchor but 0.2 m off in depth: no snap, and the
    // placement appends a fresh anchor.
    tracker.aim(WorldPoint::new(1.2, 0.0, -5.0));
    let state = session.tick(&mut tracker, viewport());
    assert_eq!(session.snap_candidate(), None);
    assert_eq!(state.snap_point, None);
    assert_near(state.preview_point.unwrap(), 620.0, 500.0);

    let hit = session.hit_at_center(&mut tracker, viewport()).unwrap();
    session.place_point(&mut tracker, &hit);
    assert_eq!(session.anchor_count(), 3);
}

#[test]
fn nearest_snap_reuses_identity_within_both_radii() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();

    place(&mut session, &mut tracker, WorldPoint::new(0.0, 0.0, -5.0));
    place(&mut session, &mut tracker, WorldPoint::new(1.0, 0.0, -5.0));

    tracker.aim(WorldPoint::new(1.05, 0.0, -5.0));
    let state = session.tick(&mut tracker, viewport());
    assert_eq!(session.snap_candidate(), Some(1));
    assert_near(state.snap_point.unwrap(), 600.0, 500.0);

    let hit = session.hit_at_center(&mut tracker, viewport()).unwrap();
    session.place_point(&mut tracker, &hit);
    assert_eq!(session.anchor_count(), 2);
}

#[test]
fn reprojections_stay_aligned_when_an_anchor_is_off_screen() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();

    place(&mut session, &mut tracker, WorldPoint::new(0.0, 0.0, -5.0));
    // Behind the camera; it will not project this tick.
    place(&mut session, &mut tracker, WorldPoint::new(0.0, 0.0, 5.0));

    tracker.aim(WorldPoint::new(0.05, 0.0, -5.0));
    let state = session.tick(&mut tracker, viewport());
    assert_eq!(state.screen_points.len(), 1);
    // The visible anchor is still index 0; the hidden one cannot shift it.
    assert_eq!(session.snap_candidate(), Some(0));

    let hit = session.hit_at_center(&mut tracker, viewport()).unwrap();
    session.place_point(&mut tracker, &hit);
    assert_eq!(session.anchor_count(), 2);
}

#[test]
fn paused_tracking_suppresses_the_preview() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();

    place(&mut session, &mut tracker, WorldPoint::new(0.0, 0.0, -5.0));
    tracker.aim(WorldPoint::new(1.0, 0.0, -5.0));
    tracker.frame.tracking = TrackingState::Paused;

    let state = session.tick(&mut tracker, viewport());
    assert!(!state.tracking_ok);
    assert_eq!(state.preview_point, None);
    assert_eq!(state.snap_point, None);
    // Anchors still reproject for the overlay.
    assert_eq!(state.screen_points.len(), 1);

    assert!(session.hit_at_center(&mut tracker, viewport()).is_none());

    // Tracking resumes, the preview comes back on the next tick.
    tracker.frame.tracking = TrackingState::Tracking;
    let state = session.tick(&mut tracker, viewport());
    assert!(state.tracking_ok);
    assert_near(state.preview_point.unwrap(), 600.0, 500.0);
}

#[test]
fn empty_viewport_yields_a_suppressed_state() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();

    place(&mut session, &mut tracker, WorldPoint::new(0.0, 0.0, -5.0));
    tracker.aim(WorldPoint::new(1.0, 0.0, -5.0));

    let state = session.tick(&mut tracker, Viewport::new(0, 0));
    assert_eq!(state, roomscan_measure::UiState::default());
    assert!(session.hit_at_center(&mut tracker, Viewport::new(0, 0)).is_none());
}

#[test]
fn no_hit_under_the_reticle_is_a_quiet_no_op() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();

    place(&mut session, &mut tracker, WorldPoint::new(0.0, 0.0, -5.0));
    tracker.hits.clear();

    let state = session.tick(&mut tracker, viewport());
    assert!(state.tracking_ok);
    assert_eq!(state.preview_point, None);
    assert!(session.hit_at_center(&mut tracker, viewport()).is_none());
    assert_eq!(session.anchor_count(), 1);
}

#[test]
fn last_wall_length_tracks_the_newest_segment() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();

    assert_eq!(session.last_wall_length(), None);
    place(&mut session, &mut tracker, WorldPoint::new(0.0, 0.0, -5.0));
    assert_eq!(session.last_wall_length(), None);
    place(&mut session, &mut tracker, WorldPoint::new(3.0, 4.0, -5.0));
    assert_eq!(session.last_wall_length(), Some(5.0));
}

#[test]
fn undo_invalidates_a_stale_snap_candidate() {
    let mut tracker = FakeTracker::new();
    let mut session: MeasureSession<FakeTracker> = MeasureSession::default();

    place(&mut session, &mut tracker, WorldPoint::new(0.0, 0.0, -5.0));
    place(&mut session, &mut tracker, WorldPoint::new(1.0, 0.0, -5.0));

    tracker.aim(WorldPoint::new(1.0, 0.0, -5.0));
    session.tick(&mut tracker, viewport());
    assert_eq!(session.snap_candidate(), Some(1));

    assert!(session.undo(&mut tracker));
    assert_eq!(session.snap_candidate(), None);

    // With the stale target gone this placement appends again.
    let hit = session.hit_at_center(&mut tracker, viewport()).unwrap();
    session.place_point(&mut tracker, &hit);
    assert_eq!(session.anchor_count(), 2);
}
