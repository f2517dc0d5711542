use crate::error::{CoreError, Result};
use crate::types::*;
use uuid::Uuid;

/// Direction for reordering a track within the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackDirection {
    Up,
    Down,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            tracks: vec![],
            clips: vec![],
        }
    }

    /// Registry with the two default lanes a fresh project starts with.
    pub fn with_default_tracks() -> Self {
        Self {
            tracks: vec![
                Track::new(MediaKind::Video, "Video 1"),
                Track::new(MediaKind::Audio, "Audio 1"),
            ],
            clips: vec![],
        }
    }

    // -----------------------------------------------------------------------
    // Track registry
    // -----------------------------------------------------------------------

    pub fn track(&self, track_id: Uuid) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    /// Index of a track in the registry; this is its layer position
    /// (0 = bottom layer).
    pub fn track_index(&self, track_id: Uuid) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    /// Append a new track, auto-named "Kind N" by the existing count of that
    /// kind. Returns the new track's id.
    pub fn add_track(&mut self, kind: MediaKind) -> Uuid {
        let count = self.tracks.iter().filter(|t| t.kind == kind).count() + 1;
        let track = Track::new(kind, format!("{} {}", kind.label(), count));
        let id = track.id;
        self.tracks.push(track);
        id
    }

    /// Remove a track and every clip bound to it. Returns the ids of the
    /// cascaded clips so callers can fix up selection.
    pub fn remove_track(&mut self, track_id: Uuid) -> Result<Vec<Uuid>> {
        let pos = self
            .track_index(track_id)
            .ok_or(CoreError::TrackNotFound(track_id))?;
        self.tracks.remove(pos);

        let removed: Vec<Uuid> = self
            .clips
            .iter()
            .filter(|c| c.track_id == track_id)
            .map(|c| c.id)
            .collect();
        self.clips.retain(|c| c.track_id != track_id);
        Ok(removed)
    }

    /// Swap a track with its neighbor in layer order. A move past either
    /// boundary is a successful no-op.
    pub fn move_track(&mut self, track_id: Uuid, direction: TrackDirection) -> Result<()> {
        let pos = self
            .track_index(track_id)
            .ok_or(CoreError::TrackNotFound(track_id))?;
        match direction {
            TrackDirection::Up if pos > 0 => self.tracks.swap(pos, pos - 1),
            TrackDirection::Down if pos + 1 < self.tracks.len() => self.tracks.swap(pos, pos + 1),
            _ => {}
        }
        Ok(())
    }

    /// Toggle the lock flag. Returns the new value.
    pub fn toggle_lock(&mut self, track_id: Uuid) -> Result<bool> {
        let track = self
            .tracks
            .iter_mut()
            .find(|t| t.id == track_id)
            .ok_or(CoreError::TrackNotFound(track_id))?;
        track.locked = !track.locked;
        Ok(track.locked)
    }

    /// Toggle the visibility flag. Returns the new value.
    pub fn toggle_visibility(&mut self, track_id: Uuid) -> Result<bool> {
        let track = self
            .tracks
            .iter_mut()
            .find(|t| t.id == track_id)
            .ok_or(CoreError::TrackNotFound(track_id))?;
        track.visible = !track.visible;
        Ok(track.visible)
    }

    // -----------------------------------------------------------------------
    // Clip store
    // -----------------------------------------------------------------------

    pub fn clip(&self, clip_id: Uuid) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    pub fn clips_on(&self, track_id: Uuid) -> impl Iterator<Item = &Clip> {
        self.clips.iter().filter(move |c| c.track_id == track_id)
    }

    /// Place a clip. The drop slot is caller-resolved, so no overlap check
    /// runs here; the target track must exist.
    pub fn add_clip(&mut self, clip: Clip) -> Result<()> {
        if self.track(clip.track_id).is_none() {
            return Err(CoreError::TrackNotFound(clip.track_id));
        }
        self.clips.push(clip);
        Ok(())
    }

    /// Remove a clip by id. Returns the removed clip.
    pub fn remove_clip(&mut self, clip_id: Uuid) -> Result<Clip> {
        let pos = self
            .clips
            .iter()
            .position(|c| c.id == clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?;
        Ok(self.clips.remove(pos))
    }

    /// Move a clip to a new start time, optionally onto another track.
    ///
    /// The candidate start is clamped to >= 0 and the candidate range is
    /// tested against every other clip on the candidate track. Any hit
    /// rejects the whole move and leaves the store unchanged; on success
    /// `start` and `track_id` update together.
    pub fn move_clip(
        &mut self,
        clip_id: Uuid,
        new_start: Micros,
        new_track: Option<Uuid>,
    ) -> Result<()> {
        let clip = self
            .clips
            .iter()
            .find(|c| c.id == clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?;

        let target_track = new_track.unwrap_or(clip.track_id);
        if self.track(target_track).is_none() {
            return Err(CoreError::TrackNotFound(target_track));
        }

        let cand_start = new_start.max(Micros::ZERO);
        let cand_end = cand_start + clip.duration;

        let collision = self.clips.iter().any(|other| {
            other.id != clip_id
                && other.track_id == target_track
                && cand_start < other.end()
                && cand_end > other.start
        });
        if collision {
            return Err(CoreError::OverlapDetected);
        }

        let clip = self.clips.iter_mut().find(|c| c.id == clip_id).unwrap();
        clip.start = cand_start;
        clip.track_id = target_track;
        Ok(())
    }

    /// Set a clip's duration, clamped to `MIN_CLIP_DURATION`. No collision
    /// check runs on resize.
    pub fn resize_clip(&mut self, clip_id: Uuid, new_duration: Micros) -> Result<()> {
        let clip = self
            .clips
            .iter_mut()
            .find(|c| c.id == clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?;
        clip.duration = new_duration.max(MIN_CLIP_DURATION);
        Ok(())
    }

    /// Merge a partial property update into a clip. Values apply as-is.
    pub fn update_clip(&mut self, clip_id: Uuid, patch: &ClipPatch) -> Result<()> {
        let clip = self
            .clips
            .iter_mut()
            .find(|c| c.id == clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?;
        if let Some(name) = &patch.name {
            clip.name = name.clone();
        }
        if let Some(x) = patch.x {
            clip.transform.x = x;
        }
        if let Some(y) = patch.y {
            clip.transform.y = y;
        }
        if let Some(scale) = patch.scale {
            clip.transform.scale = scale;
        }
        if let Some(rotation) = patch.rotation {
            clip.transform.rotation = rotation;
        }
        if let Some(opacity) = patch.opacity {
            clip.opacity = opacity;
        }
        if let Some(volume) = patch.volume {
            clip.volume = volume;
        }
        Ok(())
    }

    /// Split a clip at a timeline position strictly inside it.
    ///
    /// The original clip becomes the left half (same id, same offset); the
    /// right half is a new clip starting at the split point whose offset is
    /// advanced by the elapsed span, so source-backed media resumes mid
    /// stream instead of replaying from its beginning. Returns
    /// (left, right) ids.
    pub fn split_clip(&mut self, clip_id: Uuid, at: Micros) -> Result<(Uuid, Uuid)> {
        let clip = self
            .clips
            .iter()
            .find(|c| c.id == clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?;

        if at <= clip.start || at >= clip.end() {
            return Err(CoreError::InvalidOperation(
                "split position must be strictly between clip start and end".into(),
            ));
        }

        let elapsed = at - clip.start;
        let mut right = clip.clone();
        right.id = Uuid::new_v4();
        right.start = at;
        right.duration = clip.duration - elapsed;
        right.offset = clip.offset + elapsed;
        let right_id = right.id;

        let clip = self.clips.iter_mut().find(|c| c.id == clip_id).unwrap();
        clip.duration = elapsed;
        self.clips.push(right);

        Ok((clip_id, right_id))
    }

    // -----------------------------------------------------------------------
    // Derived values
    // -----------------------------------------------------------------------

    /// Project duration: max clip end across all tracks, zero when empty.
    /// Always recomputed, never stored.
    pub fn duration(&self) -> Micros {
        self.clips
            .iter()
            .map(|c| c.end())
            .max()
            .unwrap_or(Micros::ZERO)
    }

    /// Earliest start on a track at which a new clip can be appended
    /// without colliding: the max end of its clips, zero when empty.
    pub fn next_free_start(&self, track_id: Uuid) -> Micros {
        self.clips_on(track_id)
            .map(|c| c.end())
            .max()
            .unwrap_or(Micros::ZERO)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
