//! # Error Types
//!
//! This module defines all error types for the LED animation pipeline.
//!
//! Every error names the stage that failed and the value that made it fail, so a bad
//! input file can be tracked down without re-running with extra logging.
//!
//! ## Error Types
//! - `Merge` - An event stream produced a negative absolute time
//! - `PitchRange` - The song has no note-on events to spread across the LEDs
//! - `Tempo` - A tempo-change event carried a zero tempo
//! - `Clock` - Ticks-per-beat or frame rate cannot produce frame numbers
//! - `Config` - Invalid settings (YAML or values out of range)
//! - `Midi` - The MIDI file could not be read
//! - `Coordinates` - A malformed record in the LED coordinate file
//! - `Csv` - The CSV writer failed
//! - `Io` - Reading or writing a file failed
//!
//! ## Usage
//! ```rust,no_run
//! use xmaslights::{render_csv, LightsError, Settings};
//!
//! # let (coords, intro, song) = (String::new(), Vec::<u8>::new(), Vec::<u8>::new());
//! match render_csv(&coords, &intro, &song, &Settings::default()) {
//!     Ok(csv) => println!("{}", csv),
//!     Err(LightsError::Coordinates { line, message }) => {
//!         eprintln!("Bad coordinate on line {}: {}", line, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LightsError {
    /// Timeline merge error.
    ///
    /// Occurs when the running sum of delta times in a stream drops below zero.
    ///
    /// # Example
    /// ```
    /// # use xmaslights::LightsError;
    /// let err = LightsError::Merge {
    ///     stream: "main",
    ///     index: 3,
    ///     time: -20,
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Merge error in main stream at event 3: absolute time -20 is negative"
    /// );
    /// ```
    #[error("Merge error in {stream} stream at event {index}: absolute time {time} is negative")]
    Merge {
        stream: &'static str,
        index: usize,
        time: i64,
    },

    /// Pitch assignment error.
    ///
    /// Occurs when the main stream holds no note-on events, so there is no pitch range
    /// to distribute across the LEDs.
    #[error("Pitch assignment error: {0}")]
    PitchRange(String),

    /// Frame generation error caused by a tempo-change event.
    ///
    /// # Example
    /// ```
    /// # use xmaslights::LightsError;
    /// let err = LightsError::Tempo { time: 960, tempo: 0 };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Frame generation error at tick 960: tempo 0 us/beat must be positive"
    /// );
    /// ```
    #[error("Frame generation error at tick {time}: tempo {tempo} us/beat must be positive")]
    Tempo { time: u64, tempo: u32 },

    /// Tick-to-frame conversion cannot be set up (zero ticks per beat, bad frame rate).
    #[error("Frame generation error: {0}")]
    Clock(String),

    /// Invalid settings.
    ///
    /// # Example
    /// ```
    /// # use xmaslights::LightsError;
    /// let err = LightsError::Config("frame-rate must be positive, got 0".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: frame-rate must be positive, got 0");
    /// ```
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The note-event source could not be decoded.
    #[error("MIDI error: {0}")]
    Midi(String),

    /// Malformed LED coordinate record (1-indexed line).
    ///
    /// # Example
    /// ```
    /// # use xmaslights::LightsError;
    /// let err = LightsError::Coordinates {
    ///     line: 12,
    ///     message: "expected 3 values, found 2".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Coordinate error at line 12: expected 3 values, found 2");
    /// ```
    #[error("Coordinate error at line {line}: {message}")]
    Coordinates { line: usize, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error accessing '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
