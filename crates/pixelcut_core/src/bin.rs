use crate::types::{MediaKind, Micros};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// An imported source asset. Clips reference it by `source_url`; the bin
/// itself (upload, transcode) is owned by a collaborator -- this is the
/// read contract plus the drag-and-drop payload shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    pub id: Uuid,
    pub kind: MediaKind,
    pub name: String,
    pub source_url: String,
    /// Probed source duration. `None` until a load resolves (and always for
    /// stills).
    pub duration: Option<Micros>,
}

/// Partial media item update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaPatch {
    pub name: Option<String>,
    pub source_url: Option<String>,
    pub duration: Option<Micros>,
}

/// Outcome of an asynchronous metadata load: the ready descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedMedia {
    pub duration: Micros,
}

#[derive(Debug, Error)]
pub enum MediaLoadError {
    #[error("metadata unavailable: {0}")]
    Metadata(String),

    #[error("unsupported media: {0}")]
    Unsupported(String),
}

/// Each load attempt yields a ready descriptor or a recoverable failure.
pub type LoadResult = Result<LoadedMedia, MediaLoadError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MediaBin {
    items: Vec<MediaItem>,
}

impl MediaBin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: MediaKind, name: impl Into<String>, source_url: impl Into<String>) -> Uuid {
        let item = MediaItem {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            source_url: source_url.into(),
            duration: None,
        };
        let id = item.id;
        self.items.push(item);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&MediaItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Merge a partial update. Unknown id: no-op.
    pub fn update(&mut self, id: Uuid, patch: &MediaPatch) {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return;
        };
        if let Some(name) = &patch.name {
            item.name = name.clone();
        }
        if let Some(url) = &patch.source_url {
            item.source_url = url.clone();
        }
        if let Some(duration) = patch.duration {
            item.duration = Some(duration);
        }
    }

    pub fn remove(&mut self, id: Uuid) {
        self.items.retain(|i| i.id != id);
    }

    /// Resolve an async load attempt. Success fills in the probed duration;
    /// failure keeps the item as-is (the caller decides whether to surface
    /// or retry it).
    pub fn resolve_load(&mut self, id: Uuid, result: LoadResult) {
        if let Ok(loaded) = result {
            if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
                item.duration = Some(loaded.duration);
            }
        }
    }
}
