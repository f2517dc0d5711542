//! Playback side of the PixelCut engine: the master clock that owns the
//! shared playhead, the compositor that resolves the active layer stack for
//! a playhead time, and the drift-corrected steering of per-clip media
//! surfaces.

pub mod clock;
pub mod compositor;
pub mod sync;
