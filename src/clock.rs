//! Tick-to-frame conversion.
//!
//! `frame = round(ticks / ticks_per_beat * tempo / 1_000_000 * frame_rate)`
//!
//! Rounding is half away from zero (`f64::round`). The tempo is whatever the last
//! tempo-change event set; a new tempo rescales every tick, not just the ones after
//! the change.

use tracing::debug;

use crate::error::LightsError;

const MICROSECONDS_PER_SECOND: f64 = 1_000_000.0;

#[derive(Debug, Clone)]
pub struct TempoClock {
    ticks_per_beat: u16,
    frame_rate: f64,
    /// Microseconds per beat
    tempo: u32,
}

impl TempoClock {
    /// # Errors
    /// Fails with [`LightsError::Clock`] on zero ticks per beat, a non-positive frame
    /// rate, or a zero starting tempo.
    pub fn new(ticks_per_beat: u16, frame_rate: f64, tempo: u32) -> Result<Self, LightsError> {
        if ticks_per_beat == 0 {
            return Err(LightsError::Clock("ticks per beat must be positive".to_string()));
        }
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(LightsError::Clock(format!(
                "frame rate must be positive, got {}",
                frame_rate
            )));
        }
        if tempo == 0 {
            return Err(LightsError::Clock("starting tempo must be positive".to_string()));
        }

        Ok(Self {
            ticks_per_beat,
            frame_rate,
            tempo,
        })
    }

    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    /// Apply a tempo change found at tick `time`.
    pub fn set_tempo(&mut self, time: u64, tempo: u32) -> Result<(), LightsError> {
        if tempo == 0 {
            return Err(LightsError::Tempo { time, tempo });
        }
        debug!(time, tempo, "tempo change");
        self.tempo = tempo;
        Ok(())
    }

    /// Frame index of absolute tick `time` at the current tempo.
    pub fn frame_at(&self, time: u64) -> u64 {
        let beats = time as f64 / f64::from(self.ticks_per_beat);
        let seconds = beats * f64::from(self.tempo) / MICROSECONDS_PER_SECOND;
        (seconds * self.frame_rate).round() as u64
    }
}
