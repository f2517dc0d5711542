use crate::bin::MediaItem;
use crate::timeline::TrackDirection;
use crate::types::*;
use uuid::Uuid;

/// Notification emitted after a successful store mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    TrackAdded(Uuid),
    TrackRemoved(Uuid),
    TrackMoved(Uuid),
    TrackToggled(Uuid),
    ClipAdded(Uuid),
    ClipMoved(Uuid),
    ClipResized(Uuid),
    ClipUpdated(Uuid),
    ClipRemoved(Uuid),
    ClipSplit { left: Uuid, right: Uuid },
    SelectionChanged(Option<Uuid>),
    ZoomChanged(f64),
    Restored,
}

type Listener = Box<dyn FnMut(&EditorEvent) + Send>;

/// The single owned editor state behind named operations.
///
/// Components never reach into the timeline to mutate it directly; every
/// change goes through a method here so the per-track no-overlap invariant
/// and selection bookkeeping hold. The facade is forgiving: operations on
/// unknown ids are no-ops and a colliding move reports `false` rather than
/// an error, matching interactive-editor semantics.
pub struct EditorStore {
    timeline: Timeline,
    selected: Option<Uuid>,
    zoom: f64,
    listeners: Vec<Listener>,
}

impl EditorStore {
    /// Fresh project: default Video and Audio tracks, nothing selected,
    /// zoom 1.
    pub fn new() -> Self {
        Self {
            timeline: Timeline::with_default_tracks(),
            selected: None,
            zoom: 1.0,
            listeners: vec![],
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn duration(&self) -> Micros {
        self.timeline.duration()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
        self.emit(EditorEvent::ZoomChanged(zoom));
    }

    /// Register a mutation listener, invoked after each successful change.
    pub fn subscribe(&mut self, listener: impl FnMut(&EditorEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: EditorEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    // -----------------------------------------------------------------------
    // Track registry
    // -----------------------------------------------------------------------

    pub fn add_track(&mut self, kind: MediaKind) -> Uuid {
        let id = self.timeline.add_track(kind);
        self.emit(EditorEvent::TrackAdded(id));
        id
    }

    /// Delete a track and its clips. Clears the selection if it pointed at
    /// a cascaded clip. Unknown id: no-op.
    pub fn remove_track(&mut self, track_id: Uuid) {
        let Ok(removed) = self.timeline.remove_track(track_id) else {
            return;
        };
        if self.selected.is_some_and(|sel| removed.contains(&sel)) {
            self.selected = None;
            self.emit(EditorEvent::SelectionChanged(None));
        }
        self.emit(EditorEvent::TrackRemoved(track_id));
    }

    pub fn move_track(&mut self, track_id: Uuid, direction: TrackDirection) {
        if self.timeline.move_track(track_id, direction).is_ok() {
            self.emit(EditorEvent::TrackMoved(track_id));
        }
    }

    pub fn toggle_track_lock(&mut self, track_id: Uuid) {
        if self.timeline.toggle_lock(track_id).is_ok() {
            self.emit(EditorEvent::TrackToggled(track_id));
        }
    }

    pub fn toggle_track_visibility(&mut self, track_id: Uuid) {
        if self.timeline.toggle_visibility(track_id).is_ok() {
            self.emit(EditorEvent::TrackToggled(track_id));
        }
    }

    // -----------------------------------------------------------------------
    // Clip store
    // -----------------------------------------------------------------------

    /// Place a new clip and select it. Returns the clip id, or `None` when
    /// the target track does not exist.
    pub fn add_clip(&mut self, track_id: Uuid, spec: ClipSpec) -> Option<Uuid> {
        let clip = Clip {
            id: Uuid::new_v4(),
            track_id,
            kind: spec.kind,
            name: spec.name,
            source_url: spec.source_url,
            start: spec.start.max(Micros::ZERO),
            duration: spec.duration,
            offset: spec.offset,
            transform: Transform::default(),
            opacity: 100.0,
            volume: 100.0,
        };
        let id = clip.id;
        self.timeline.add_clip(clip).ok()?;
        self.selected = Some(id);
        self.emit(EditorEvent::ClipAdded(id));
        self.emit(EditorEvent::SelectionChanged(Some(id)));
        Some(id)
    }

    /// Construct a clip from a media-bin drag payload. Media without a
    /// probed duration (images, pending loads) falls back to
    /// `DEFAULT_MEDIA_DURATION`.
    pub fn add_clip_from_media(
        &mut self,
        item: &MediaItem,
        track_id: Uuid,
        at: Micros,
    ) -> Option<Uuid> {
        let duration = item.duration.unwrap_or(DEFAULT_MEDIA_DURATION);
        self.add_clip(
            track_id,
            ClipSpec::new(item.kind, item.name.clone(), item.source_url.clone(), at, duration),
        )
    }

    /// Attempt a move; `false` means the placement was rejected (collision)
    /// or the target was unknown, and nothing changed.
    pub fn move_clip(&mut self, clip_id: Uuid, new_start: Micros, new_track: Option<Uuid>) -> bool {
        if self.timeline.move_clip(clip_id, new_start, new_track).is_err() {
            return false;
        }
        self.emit(EditorEvent::ClipMoved(clip_id));
        true
    }

    pub fn resize_clip(&mut self, clip_id: Uuid, new_duration: Micros) {
        if self.timeline.resize_clip(clip_id, new_duration).is_ok() {
            self.emit(EditorEvent::ClipResized(clip_id));
        }
    }

    pub fn update_clip(&mut self, clip_id: Uuid, patch: &ClipPatch) {
        if self.timeline.update_clip(clip_id, patch).is_ok() {
            self.emit(EditorEvent::ClipUpdated(clip_id));
        }
    }

    /// Remove a clip, clearing a dangling selection. Unknown id: no-op.
    pub fn remove_clip(&mut self, clip_id: Uuid) {
        if self.timeline.remove_clip(clip_id).is_err() {
            return;
        }
        if self.selected == Some(clip_id) {
            self.selected = None;
            self.emit(EditorEvent::SelectionChanged(None));
        }
        self.emit(EditorEvent::ClipRemoved(clip_id));
    }

    /// Split a clip at `at`, selecting the new right half. Returns its id,
    /// or `None` when the position is outside the clip or the id unknown.
    pub fn split_clip(&mut self, clip_id: Uuid, at: Micros) -> Option<Uuid> {
        let (left, right) = self.timeline.split_clip(clip_id, at).ok()?;
        self.selected = Some(right);
        self.emit(EditorEvent::ClipSplit { left, right });
        self.emit(EditorEvent::SelectionChanged(Some(right)));
        Some(right)
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn select_clip(&mut self, clip_id: Option<Uuid>) {
        // Selecting an unknown clip resolves to no selection.
        let next = clip_id.filter(|id| self.timeline.clip(*id).is_some());
        if next != self.selected {
            self.selected = next;
            self.emit(EditorEvent::SelectionChanged(next));
        }
    }

    pub fn selected_clip_id(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn selected_clip(&self) -> Option<&Clip> {
        self.selected.and_then(|id| self.timeline.clip(id))
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Earliest collision-free append position on a track.
    pub fn next_free_start(&self, track_id: Uuid) -> Micros {
        self.timeline.next_free_start(track_id)
    }

    pub(crate) fn replace_state(&mut self, timeline: Timeline, zoom: f64) {
        self.timeline = timeline;
        self.zoom = zoom;
        self.selected = None;
        self.emit(EditorEvent::Restored);
    }
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}
