use crate::store::EditorStore;
use crate::types::{Micros, Timeline};
use uuid::Uuid;

/// Default window within which a dragged clip edge sticks to a neighbor.
pub const SNAP_THRESHOLD: Micros = Micros(250_000);

/// Snapshot captured on pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub clip_id: Uuid,
    pub origin_start: Micros,
    pub origin_track: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging(DragSession),
}

/// Pointer-driven move interaction as an explicit state machine:
/// `Idle -> Dragging(session) -> Idle`. Pointer events dispatch through
/// this controller instead of ad hoc listeners; every candidate position is
/// snapped, then offered to the placement engine, and a rejection simply
/// leaves the clip at its last valid position.
#[derive(Debug)]
pub struct DragController {
    state: DragState,
    snap_threshold: Micros,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            snap_threshold: SNAP_THRESHOLD,
        }
    }

    pub fn with_snap_threshold(threshold: Micros) -> Self {
        Self {
            state: DragState::Idle,
            snap_threshold: threshold,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Pointer-down: capture the clip's origin. Returns `false` (staying
    /// Idle) for unknown clips or when a drag is already active.
    pub fn begin(&mut self, store: &EditorStore, clip_id: Uuid) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(clip) = store.timeline().clip(clip_id) else {
            return false;
        };
        self.state = DragState::Dragging(DragSession {
            clip_id,
            origin_start: clip.start,
            origin_track: clip.track_id,
        });
        true
    }

    /// Pointer-move: snap the candidate start against other clip edges and
    /// attempt the move. Returns whether the model accepted it; on `false`
    /// the clip stays where the last accepted move put it.
    pub fn update(
        &mut self,
        store: &mut EditorStore,
        candidate_start: Micros,
        candidate_track: Option<Uuid>,
    ) -> bool {
        let DragState::Dragging(session) = self.state else {
            return false;
        };
        let snapped = snap_start(
            store.timeline(),
            session.clip_id,
            candidate_start,
            self.snap_threshold,
        );
        store.move_clip(session.clip_id, snapped, candidate_track)
    }

    /// Pointer-up (or the pointer leaving the tracked surface): end the
    /// session. No further model access happens; the clip keeps its last
    /// valid position.
    pub fn end(&mut self) -> Option<DragSession> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

/// Snap a candidate start so that either edge of the dragged clip can stick
/// to another clip's edge (or to 0). The nearest snap within the threshold
/// wins; otherwise the candidate passes through unchanged.
pub fn snap_start(
    timeline: &Timeline,
    clip_id: Uuid,
    candidate_start: Micros,
    threshold: Micros,
) -> Micros {
    let Some(clip) = timeline.clip(clip_id) else {
        return candidate_start;
    };
    let duration = clip.duration;

    let mut points = vec![Micros::ZERO];
    for other in &timeline.clips {
        if other.id == clip_id {
            continue;
        }
        points.push(other.start);
        points.push(other.end());
    }

    let mut best = candidate_start;
    let mut best_dist = Micros(threshold.0 + 1);
    for &point in &points {
        // Leading edge lands on the point.
        let dist = (candidate_start - point).abs();
        if dist < best_dist {
            best = point;
            best_dist = dist;
        }
        // Trailing edge lands on the point.
        let end_aligned = point - duration;
        let dist = (candidate_start - end_aligned).abs();
        if end_aligned >= Micros::ZERO && dist < best_dist {
            best = end_aligned;
            best_dist = dist;
        }
    }

    if best_dist <= threshold {
        best
    } else {
        candidate_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClipSpec, MediaKind};

    fn store_with_clips() -> (EditorStore, Uuid, Uuid, Uuid) {
        let mut store = EditorStore::new();
        let track = store.timeline().tracks[0].id;
        let a = store
            .add_clip(
                track,
                ClipSpec::new(MediaKind::Video, "a", "blob:a", Micros::ZERO, Micros(5_000_000)),
            )
            .unwrap();
        let b = store
            .add_clip(
                track,
                ClipSpec::new(
                    MediaKind::Video,
                    "b",
                    "blob:b",
                    Micros(10_000_000),
                    Micros(5_000_000),
                ),
            )
            .unwrap();
        (store, track, a, b)
    }

    // -----------------------------------------------------------------------
    // state machine
    // -----------------------------------------------------------------------

    #[test]
    fn begin_captures_origin() {
        let (store, track, a, _) = store_with_clips();
        let mut drag = DragController::new();

        assert!(drag.begin(&store, a));
        let session = drag.session().unwrap();
        assert_eq!(session.clip_id, a);
        assert_eq!(session.origin_start, Micros::ZERO);
        assert_eq!(session.origin_track, track);
    }

    #[test]
    fn begin_unknown_clip_stays_idle() {
        let (store, _, _, _) = store_with_clips();
        let mut drag = DragController::new();
        assert!(!drag.begin(&store, Uuid::new_v4()));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn begin_while_dragging_is_refused() {
        let (store, _, a, b) = store_with_clips();
        let mut drag = DragController::new();
        assert!(drag.begin(&store, a));
        assert!(!drag.begin(&store, b));
        assert_eq!(drag.session().unwrap().clip_id, a);
    }

    #[test]
    fn end_returns_session_and_goes_idle() {
        let (store, _, a, _) = store_with_clips();
        let mut drag = DragController::new();
        drag.begin(&store, a);

        let session = drag.end().unwrap();
        assert_eq!(session.clip_id, a);
        assert!(!drag.is_dragging());
        assert!(drag.end().is_none());
    }

    #[test]
    fn update_without_session_is_noop() {
        let (mut store, _, a, _) = store_with_clips();
        let mut drag = DragController::new();
        assert!(!drag.update(&mut store, Micros(6_000_000), None));
        assert_eq!(store.timeline().clip(a).unwrap().start, Micros::ZERO);
    }

    // -----------------------------------------------------------------------
    // move + rejection during drag
    // -----------------------------------------------------------------------

    #[test]
    fn rejected_update_leaves_last_valid_position() {
        let (mut store, _, _, b) = store_with_clips();
        let mut drag = DragController::with_snap_threshold(Micros::ZERO);
        drag.begin(&store, b);

        assert!(drag.update(&mut store, Micros(6_000_000), None));
        assert_eq!(store.timeline().clip(b).unwrap().start, Micros(6_000_000));

        // Candidate [2s,7s) collides with a [0,5s); b stays at 6s.
        assert!(!drag.update(&mut store, Micros(2_000_000), None));
        assert_eq!(store.timeline().clip(b).unwrap().start, Micros(6_000_000));

        drag.end();
        assert_eq!(store.timeline().clip(b).unwrap().start, Micros(6_000_000));
    }

    // -----------------------------------------------------------------------
    // snapping
    // -----------------------------------------------------------------------

    #[test]
    fn snap_leading_edge_to_neighbor_end() {
        let (store, _, _, b) = store_with_clips();
        // a ends at 5s; candidate 5.2s is within the 250ms window.
        let snapped = snap_start(store.timeline(), b, Micros(5_200_000), SNAP_THRESHOLD);
        assert_eq!(snapped, Micros(5_000_000));
    }

    #[test]
    fn snap_trailing_edge_to_neighbor_start() {
        let (store, _, a, _) = store_with_clips();
        // a is 5s long; b starts at 10s. Candidate 4.9s puts a's end at
        // 9.9s, within the window of b's start -> start snaps to 5s.
        let snapped = snap_start(store.timeline(), a, Micros(4_900_000), SNAP_THRESHOLD);
        assert_eq!(snapped, Micros(5_000_000));
    }

    #[test]
    fn snap_to_timeline_origin() {
        let (store, _, _, b) = store_with_clips();
        let snapped = snap_start(store.timeline(), b, Micros(150_000), SNAP_THRESHOLD);
        assert_eq!(snapped, Micros::ZERO);
    }

    #[test]
    fn no_snap_beyond_threshold() {
        let (store, _, _, b) = store_with_clips();
        let snapped = snap_start(store.timeline(), b, Micros(7_300_000), SNAP_THRESHOLD);
        assert_eq!(snapped, Micros(7_300_000));
    }

    #[test]
    fn snapped_drag_lands_flush() {
        let (mut store, _, _, b) = store_with_clips();
        let mut drag = DragController::new();
        drag.begin(&store, b);

        // Near-adjacent drop snaps flush against a's end; half-open ranges
        // make the placement legal.
        assert!(drag.update(&mut store, Micros(5_100_000), None));
        assert_eq!(store.timeline().clip(b).unwrap().start, Micros(5_000_000));
    }
}
