//! Animation type definitions

use crate::led::Rgb;

/// One output color per LED, in wiring order.
pub type Frame = Vec<Rgb>;

/// A complete animation, one entry per output frame.
///
/// # Fields
/// - `led_count`: Width of every frame
/// - `frame_rate`: Frames per second the frames were generated for
/// - `frames`: All frames in playback order; the last one is always all black
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub led_count: usize,
    pub frame_rate: f64,
    pub frames: Vec<Frame>,
}

impl Animation {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Playing time in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames.len() as f64 / self.frame_rate
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}
