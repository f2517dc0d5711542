use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Micros
// ---------------------------------------------------------------------------

/// Timeline time in microseconds. All placement math is integral; seconds
/// only appear at the boundaries (UI, media surfaces, export timestamps).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Micros(pub i64);

impl Micros {
    pub const ZERO: Self = Self(0);

    pub fn from_secs(s: f64) -> Self {
        Self((s * 1_000_000.0) as i64)
    }

    pub fn as_secs(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

impl Add for Micros {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Micros {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<i64> for Micros {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self(self.0 * rhs)
    }
}

impl fmt::Display for Micros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_ms = self.0.unsigned_abs() / 1_000;
        let ms = total_ms % 1_000;
        let total_secs = total_ms / 1_000;
        let secs = total_secs % 60;
        let total_mins = total_secs / 60;
        let mins = total_mins % 60;
        let hours = total_mins / 60;
        if self.0 < 0 {
            write!(f, "-{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
        } else {
            write!(f, "{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
        }
    }
}

/// Shortest clip a resize may leave behind (0.5 s).
pub const MIN_CLIP_DURATION: Micros = Micros(500_000);

/// Fallback clip length for media with unknown duration (images, unprobed
/// sources).
pub const DEFAULT_MEDIA_DURATION: Micros = Micros(5_000_000);

// ---------------------------------------------------------------------------
// MediaKind
// ---------------------------------------------------------------------------

/// Kind of media a track lane carries and a clip references.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Text,
    Image,
}

impl MediaKind {
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Video => "Video",
            MediaKind::Audio => "Audio",
            MediaKind::Text => "Text",
            MediaKind::Image => "Image",
        }
    }

    /// Whether clips of this kind carry an audible signal (and thus a
    /// meaningful volume).
    pub fn is_audible(&self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::Audio)
    }
}

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub id: Uuid,
    pub name: String,
    pub kind: MediaKind,
    pub locked: bool,
    pub visible: bool,
}

impl Track {
    pub fn new(kind: MediaKind, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            locked: false,
            visible: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Clip
// ---------------------------------------------------------------------------

/// A time-bounded placement of a media reference on a track.
///
/// `offset` is how far into the original source this clip's content begins
/// playing. A freshly dropped clip has offset 0; the right half of a split
/// inherits `offset + elapsed` so the source stream resumes rather than
/// restarting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clip {
    pub id: Uuid,
    pub track_id: Uuid,
    pub kind: MediaKind,
    pub name: String,
    pub source_url: String,
    pub start: Micros,
    pub duration: Micros,
    pub offset: Micros,
    pub transform: Transform,
    /// Percent, 0..=100.
    pub opacity: f64,
    /// Percent, 0..=100. Only consumed for audible kinds.
    pub volume: f64,
}

impl Clip {
    pub fn end(&self) -> Micros {
        self.start + self.duration
    }

    /// Half-open containment: `start <= at < end`.
    pub fn contains(&self, at: Micros) -> bool {
        at >= self.start && at < self.end()
    }

    /// Position within the source media corresponding to playhead time `at`.
    pub fn local_time(&self, at: Micros) -> Micros {
        (at - self.start) + self.offset
    }
}

/// Caller-facing description of a clip to place; ids and defaulted fields
/// are filled in by the store.
#[derive(Debug, Clone)]
pub struct ClipSpec {
    pub kind: MediaKind,
    pub name: String,
    pub source_url: String,
    pub start: Micros,
    pub duration: Micros,
    pub offset: Micros,
}

impl ClipSpec {
    pub fn new(
        kind: MediaKind,
        name: impl Into<String>,
        source_url: impl Into<String>,
        start: Micros,
        duration: Micros,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            source_url: source_url.into(),
            start,
            duration,
            offset: Micros::ZERO,
        }
    }
}

/// Partial clip property update. Absent fields are left untouched; present
/// values are applied as-is (callers clamp).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClipPatch {
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub volume: Option<f64>,
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Track registry plus the flat clip set. Track order is layer order:
/// earlier index = rendered first = lower layer, later tracks draw on top.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timeline {
    pub tracks: Vec<Track>,
    pub clips: Vec<Clip>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
