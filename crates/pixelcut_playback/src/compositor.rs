use pixelcut_core::types::{MediaKind, Micros, Timeline, Transform};
use serde::Serialize;
use uuid::Uuid;

/// A clip that is live at a playhead time, annotated with everything the
/// view layer needs to render and steer it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActiveLayer {
    pub clip_id: Uuid,
    pub track_id: Uuid,
    /// Position in the layer stack; 0 renders first (bottom), higher draws
    /// on top.
    pub layer: usize,
    pub kind: MediaKind,
    pub name: String,
    pub source_url: String,
    /// Position within the source media: `(at - start) + offset`.
    pub local_time: Micros,
    pub opacity: f64,
    /// Present for audible kinds only.
    pub volume: Option<f64>,
    pub transform: Transform,
}

/// Resolve the ordered active-layer stack for a playhead time.
///
/// Pure function of `(timeline, at)`: clips whose half-open range contains
/// `at`, on visible tracks, ordered by track registry index (never by clip
/// id). The no-overlap invariant means each track contributes at most one
/// layer.
pub fn resolve_layers(timeline: &Timeline, at: Micros) -> Vec<ActiveLayer> {
    let mut layers = Vec::new();
    for (index, track) in timeline.tracks.iter().enumerate() {
        if !track.visible {
            continue;
        }
        for clip in timeline.clips_on(track.id) {
            if !clip.contains(at) {
                continue;
            }
            layers.push(ActiveLayer {
                clip_id: clip.id,
                track_id: track.id,
                layer: index,
                kind: clip.kind,
                name: clip.name.clone(),
                source_url: clip.source_url.clone(),
                local_time: clip.local_time(at),
                opacity: clip.opacity,
                volume: clip.kind.is_audible().then_some(clip.volume),
                transform: clip.transform,
            });
        }
    }
    layers
}
