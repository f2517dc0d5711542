use pixelcut_core::types::Micros;
use thiserror::Error;

/// Maximum divergence between a media surface's actual position and its
/// derived local time before a corrective seek is issued. Seeking every
/// tick would stutter; small drift is tolerated instead.
pub const DRIFT_THRESHOLD: Micros = Micros(150_000);

#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Playback start was refused (e.g. autoplay policy). Recoverable: the
    /// surface stays paused and the next tick retries.
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
}

/// A per-clip playback element (video/audio element, player process, ...).
/// Surfaces play autonomously; the engine only nudges them back toward the
/// master clock.
pub trait MediaSurface {
    /// Current position within the source media.
    fn position(&self) -> Result<Micros, SurfaceError>;

    /// Hard seek to a source position.
    fn seek(&mut self, to: Micros);

    /// Begin playback. May be rejected; rejection must leave the surface
    /// paused but otherwise usable.
    fn play(&mut self) -> Result<(), SurfaceError>;

    fn pause(&mut self);
}

/// Steer one surface toward the compositor-derived `local_time`.
///
/// Corrective, not authoritative: a seek is issued only when drift exceeds
/// `DRIFT_THRESHOLD`. Play/pause follows the master clock's state, and a
/// rejected play is swallowed -- the shared playhead keeps advancing and the
/// next tick retries while still in the playing state.
pub fn drive_layer(surface: &mut dyn MediaSurface, local_time: Micros, playing: bool) {
    match surface.position() {
        Ok(position) => {
            let drift = (position - local_time).abs();
            if drift > DRIFT_THRESHOLD {
                surface.seek(local_time);
            }
        }
        Err(err) => {
            // No position to compare against; align the surface outright.
            tracing::debug!(error = %err, "surface position unavailable, forcing seek");
            surface.seek(local_time);
        }
    }

    if playing {
        if let Err(err) = surface.play() {
            tracing::debug!(error = %err, "playback start rejected, retrying next tick");
        }
    } else {
        surface.pause();
    }
}
