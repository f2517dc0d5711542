use crate::error::{ExportError, Result};
use pixelcut_core::types::{Clip, MediaKind, Micros, Timeline};
use serde::{Deserialize, Serialize};

/// One trim instruction for the external processor: cut `source_url` from
/// `in_point` to `out_point` (source-relative, half-open).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrimSegment {
    pub source_url: String,
    pub in_point: Micros,
    pub out_point: Micros,
}

impl TrimSegment {
    pub fn duration(&self) -> Micros {
        self.out_point - self.in_point
    }
}

/// An ordered list of trim segments to be concatenated into one output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportPlan {
    pub segments: Vec<TrimSegment>,
}

impl ExportPlan {
    pub fn total_duration(&self) -> Micros {
        self.segments
            .iter()
            .fold(Micros::ZERO, |acc, s| acc + s.duration())
    }
}

/// Compile the video clips intersecting `[start, end)` into a plan.
///
/// Clips come from visible video tracks, ordered by timeline start. A clip
/// only partially inside the range is trimmed to the intersection, with the
/// clip's source offset carried into the in/out points -- split fragments
/// therefore export the same source span they play.
pub fn compile_range(timeline: &Timeline, start: Micros, end: Micros) -> Result<ExportPlan> {
    if end <= start {
        return Err(ExportError::EmptyRange);
    }

    let mut clips: Vec<&Clip> = timeline
        .tracks
        .iter()
        .filter(|t| t.visible && t.kind == MediaKind::Video)
        .flat_map(|t| timeline.clips_on(t.id))
        .filter(|c| c.kind == MediaKind::Video)
        .collect();
    clips.sort_by_key(|c| c.start);

    let mut segments = Vec::new();
    for clip in clips {
        let overlap_start = clip.start.max(start);
        let overlap_end = clip.end().min(end);
        if overlap_start >= overlap_end {
            continue;
        }
        segments.push(TrimSegment {
            source_url: clip.source_url.clone(),
            in_point: clip.offset + (overlap_start - clip.start),
            out_point: clip.offset + (overlap_end - clip.start),
        });
    }

    if segments.is_empty() {
        return Err(ExportError::NoClips);
    }
    Ok(ExportPlan { segments })
}

/// Compile an explicit ordered clip selection; each clip contributes its
/// full source span.
pub fn compile_clips(clips: &[&Clip]) -> Result<ExportPlan> {
    if clips.is_empty() {
        return Err(ExportError::NoClips);
    }
    let segments = clips
        .iter()
        .map(|clip| TrimSegment {
            source_url: clip.source_url.clone(),
            in_point: clip.offset,
            out_point: clip.offset + clip.duration,
        })
        .collect();
    Ok(ExportPlan { segments })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelcut_core::store::EditorStore;
    use pixelcut_core::types::ClipSpec;

    fn store_with_two_clips() -> EditorStore {
        let mut store = EditorStore::new();
        let video = store.timeline().tracks[0].id;
        store
            .add_clip(
                video,
                ClipSpec::new(MediaKind::Video, "a", "src:a", Micros::ZERO, Micros(5_000_000)),
            )
            .unwrap();
        store
            .add_clip(
                video,
                ClipSpec::new(
                    MediaKind::Video,
                    "b",
                    "src:b",
                    Micros(5_000_000),
                    Micros(5_000_000),
                ),
            )
            .unwrap();
        store
    }

    #[test]
    fn full_range_exports_all_clips_in_order() {
        let store = store_with_two_clips();
        let plan = compile_range(store.timeline(), Micros::ZERO, Micros(10_000_000)).unwrap();

        assert_eq!(plan.segments.len(), 2);
        assert_eq!(plan.segments[0].source_url, "src:a");
        assert_eq!(plan.segments[1].source_url, "src:b");
        assert_eq!(plan.total_duration(), Micros(10_000_000));
    }

    #[test]
    fn partial_overlap_trims_to_intersection() {
        let store = store_with_two_clips();
        // Range [3s, 7s): 2s tail of a, 2s head of b.
        let plan = compile_range(store.timeline(), Micros(3_000_000), Micros(7_000_000)).unwrap();

        assert_eq!(plan.segments.len(), 2);
        assert_eq!(plan.segments[0].in_point, Micros(3_000_000));
        assert_eq!(plan.segments[0].out_point, Micros(5_000_000));
        assert_eq!(plan.segments[1].in_point, Micros::ZERO);
        assert_eq!(plan.segments[1].out_point, Micros(2_000_000));
    }

    #[test]
    fn clip_offset_shifts_source_points() {
        let mut store = EditorStore::new();
        let video = store.timeline().tracks[0].id;
        let id = store
            .add_clip(
                video,
                ClipSpec::new(MediaKind::Video, "a", "src:a", Micros::ZERO, Micros(10_000_000)),
            )
            .unwrap();
        // Split at 4s: the right half plays source [4s, 10s).
        store.split_clip(id, Micros(4_000_000)).unwrap();

        let plan =
            compile_range(store.timeline(), Micros(4_000_000), Micros(10_000_000)).unwrap();
        assert_eq!(plan.segments.len(), 1);
        assert_eq!(plan.segments[0].in_point, Micros(4_000_000));
        assert_eq!(plan.segments[0].out_point, Micros(10_000_000));
    }

    #[test]
    fn non_video_clips_are_excluded() {
        let mut store = store_with_two_clips();
        let audio = store.timeline().tracks[1].id;
        store
            .add_clip(
                audio,
                ClipSpec::new(MediaKind::Audio, "bgm", "src:bgm", Micros::ZERO, Micros(10_000_000)),
            )
            .unwrap();

        let plan = compile_range(store.timeline(), Micros::ZERO, Micros(10_000_000)).unwrap();
        assert!(plan.segments.iter().all(|s| s.source_url != "src:bgm"));
    }

    #[test]
    fn hidden_video_tracks_are_excluded() {
        let mut store = store_with_two_clips();
        let video = store.timeline().tracks[0].id;
        store.toggle_track_visibility(video);

        let result = compile_range(store.timeline(), Micros::ZERO, Micros(10_000_000));
        assert!(matches!(result.unwrap_err(), ExportError::NoClips));
    }

    #[test]
    fn empty_range_is_rejected() {
        let store = store_with_two_clips();
        let result = compile_range(store.timeline(), Micros(5_000_000), Micros(5_000_000));
        assert!(matches!(result.unwrap_err(), ExportError::EmptyRange));

        let result = compile_range(store.timeline(), Micros(7_000_000), Micros(3_000_000));
        assert!(matches!(result.unwrap_err(), ExportError::EmptyRange));
    }

    #[test]
    fn range_with_no_clips_is_rejected() {
        let store = store_with_two_clips();
        let result = compile_range(store.timeline(), Micros(20_000_000), Micros(30_000_000));
        assert!(matches!(result.unwrap_err(), ExportError::NoClips));
    }

    #[test]
    fn compile_clips_uses_full_source_spans() {
        let store = store_with_two_clips();
        let timeline = store.timeline();
        let clips: Vec<&Clip> = timeline.clips.iter().collect();

        let plan = compile_clips(&clips).unwrap();
        assert_eq!(plan.segments.len(), 2);
        assert_eq!(plan.segments[0].in_point, Micros::ZERO);
        assert_eq!(plan.segments[0].duration(), Micros(5_000_000));
    }

    #[test]
    fn compile_clips_empty_selection_is_rejected() {
        let result = compile_clips(&[]);
        assert!(matches!(result.unwrap_err(), ExportError::NoClips));
    }
}
