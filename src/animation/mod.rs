//! # Animation Module
//!
//! Turn the merged event timeline into per-frame LED colors.
//!
//! ## Purpose
//! This module is the last stage of the pipeline. It takes:
//! 1. **Events** - the merged, time-sorted timeline from `timeline`
//! 2. **LED pitches** - one pitch per LED from `pitch`
//!
//! and produces one color snapshot for every frame of the song.
//!
//! ## Sub-modules
//! - `types` - Animation and Frame type definitions
//! - `engine` - The timeline walk that emits frames
//!
//! ## Key Types
//! - [`Animation`] - All frames plus the LED count and frame rate
//! - [`Frame`] - One RGB triple per LED
//!
//! ## Entry Point
//! [`generate_animation()`] - Convert a merged timeline into frames
//!
//! ## Event Handling
//!
//! | Event        | Effect                                             |
//! |--------------|----------------------------------------------------|
//! | Note on      | Every LED with that pitch takes the velocity       |
//! | Note off     | Every LED with that pitch goes dark                |
//! | Tempo change | Frame numbers are computed with the new tempo      |
//! | Other        | Nothing                                            |
//!
//! There is no voice tracking: a second note-on for a sounding pitch simply
//! overwrites the intensity.
//!
//! ## Related Modules
//! - `clock` - Tick-to-frame conversion
//! - `led` - LED state and color scaling
//! - `export` - CSV output of an [`Animation`]

mod types;
mod engine;


pub use types::{Animation, Frame};
pub use engine::generate_animation;
