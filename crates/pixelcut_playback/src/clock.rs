use pixelcut_core::types::Micros;
use std::time::Instant;

/// Nominal frame duration for frame-step helpers (1/30 s).
pub const FRAME_STEP: Micros = Micros(33_333);

#[derive(Debug, Clone, Copy)]
struct Anchor {
    instant: Instant,
    time: Micros,
}

/// The shared playhead, advanced at wall-clock rate while playing.
///
/// The clock is time-authoritative: it anchors a (monotonic instant,
/// playhead time) pair on `play()` and derives `current` from elapsed wall
/// time on every tick. Reads never re-anchor -- only `play()` and a seek do
/// -- so polling `current()` from the outside cannot introduce drift or
/// stutter. Reaching the project duration clamps the playhead there and
/// stops.
#[derive(Debug)]
pub struct MasterClock {
    current: Micros,
    playing: bool,
    anchor: Option<Anchor>,
}

impl MasterClock {
    pub fn new() -> Self {
        Self {
            current: Micros::ZERO,
            playing: false,
            anchor: None,
        }
    }

    pub fn current(&self) -> Micros {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.play_at(Instant::now());
    }

    pub fn play_at(&mut self, now: Instant) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.anchor = Some(Anchor {
            instant: now,
            time: self.current,
        });
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.anchor = None;
    }

    pub fn toggle(&mut self) {
        self.toggle_at(Instant::now());
    }

    pub fn toggle_at(&mut self, now: Instant) {
        if self.playing {
            self.pause();
        } else {
            self.play_at(now);
        }
    }

    /// Advance the playhead from the anchored origin. Call once per
    /// animation tick; a no-op while stopped.
    pub fn tick(&mut self, duration: Micros) {
        self.tick_at(Instant::now(), duration);
    }

    pub fn tick_at(&mut self, now: Instant, duration: Micros) {
        let Some(anchor) = self.anchor else {
            return;
        };
        if !self.playing {
            return;
        }
        let elapsed = Micros(now.saturating_duration_since(anchor.instant).as_micros() as i64);
        self.current = anchor.time + elapsed;
        if self.current >= duration {
            self.current = duration;
            self.pause();
        }
    }

    /// Scrub to `t`, clamped to `[0, duration]`. While stopped this sets the
    /// playhead directly; while playing it re-anchors the tick origin at the
    /// new position without touching the playing flag.
    pub fn seek(&mut self, t: Micros, duration: Micros) {
        self.seek_at(Instant::now(), t, duration);
    }

    pub fn seek_at(&mut self, now: Instant, t: Micros, duration: Micros) {
        self.current = t.clamp(Micros::ZERO, duration);
        if self.playing {
            self.anchor = Some(Anchor {
                instant: now,
                time: self.current,
            });
        }
    }

    pub fn step_forward(&mut self, duration: Micros) {
        self.seek(self.current + FRAME_STEP, duration);
    }

    pub fn step_back(&mut self, duration: Micros) {
        self.seek(self.current - FRAME_STEP, duration);
    }
}

impl Default for MasterClock {
    fn default() -> Self {
        Self::new()
    }
}
