use crate::error::{CoreError, Result};
use crate::store::EditorStore;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The serializable engine state handed to collaborators (persistence,
/// export UIs). Transient state -- selection, playhead, drag sessions -- is
/// not part of the shape. `duration` is derived but included for readers
/// that cannot recompute it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectSnapshot {
    pub tracks: Vec<Track>,
    pub clips: Vec<Clip>,
    pub duration: Micros,
    pub zoom: f64,
}

impl EditorStore {
    pub fn snapshot(&self) -> ProjectSnapshot {
        let timeline = self.timeline();
        ProjectSnapshot {
            tracks: timeline.tracks.clone(),
            clips: timeline.clips.clone(),
            duration: timeline.duration(),
            zoom: self.zoom(),
        }
    }

    /// Replace all engine state from a snapshot in one step. Selection is
    /// dropped; the snapshot's stored duration is ignored in favor of the
    /// recomputed value.
    pub fn restore(&mut self, snapshot: ProjectSnapshot) {
        let timeline = Timeline {
            tracks: snapshot.tracks,
            clips: snapshot.clips,
        };
        self.replace_state(timeline, snapshot.zoom);
    }
}

impl ProjectSnapshot {
    /// Save as pretty-printed JSON, appending the `.pixelcut` extension if
    /// absent.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = ensure_extension(path.as_ref());
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref()).map_err(CoreError::Io)?;
        let snapshot: ProjectSnapshot = serde_json::from_str(&data)?;
        Ok(snapshot)
    }
}

fn ensure_extension(path: &Path) -> std::path::PathBuf {
    if path.extension().and_then(|e| e.to_str()) == Some("pixelcut") {
        path.to_path_buf()
    } else {
        let mut p = path.to_path_buf();
        let mut name = p.file_name().unwrap_or_default().to_os_string();
        name.push(".pixelcut");
        p.set_file_name(name);
        p
    }
}
