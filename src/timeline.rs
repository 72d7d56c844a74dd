//! # Timeline Module
//!
//! Merges the intro stream and the song stream into one absolute-time timeline.
//!
//! ## Purpose
//! Both event sources store their timestamps as deltas (ticks since the previous event
//! in the same stream). Frame generation needs a single list ordered by absolute tick,
//! so this module:
//! 1. Runs a cumulative sum over each stream independently
//! 2. Resets the sum at every end-of-track marker, so that the tracks of a multi-track
//!    file all start together instead of one after another
//! 3. Shifts the whole song stream by the lead-in (the length of the intro)
//! 4. Concatenates intro then song and stable-sorts by absolute time
//!
//! ## Ordering
//! Ties keep their input order. A tempo change written before a note at the same tick
//! is therefore still applied before that note.
//!
//! ## Example
//! ```rust
//! use xmaslights::timeline::{merge_streams, EventKind, RawEvent};
//!
//! let intro = vec![
//!     RawEvent::new(0, EventKind::NoteOn { pitch: 60, velocity: 100 }),
//!     RawEvent::new(7680, EventKind::EndOfTrack),
//! ];
//! let song = vec![RawEvent::new(0, EventKind::NoteOn { pitch: 64, velocity: 90 })];
//!
//! let events = merge_streams(&intro, &song, 7680)?;
//! assert_eq!(events[2].time, 7680);
//! # Ok::<(), xmaslights::LightsError>(())
//! ```

use tracing::debug;

use crate::error::LightsError;
use crate::settings::LeadIn;

/// What happened at an event. Payloads only exist on the kinds that carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    NoteOn { pitch: u8, velocity: u8 },
    NoteOff { pitch: u8 },
    /// Microseconds per beat
    Tempo(u32),
    EndOfTrack,
    Other,
}

/// An event as delivered by the note-event source: time is relative to the previous
/// event of the same stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub delta: i64,
    pub kind: EventKind,
}

impl RawEvent {
    pub fn new(delta: i64, kind: EventKind) -> Self {
        Self { delta, kind }
    }
}

/// An event placed on the merged timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Absolute time in ticks
    pub time: u64,
    pub kind: EventKind,
}

/// The song stream: its events plus the tick resolution used for the whole piece.
#[derive(Debug, Clone, PartialEq)]
pub struct EventStream {
    pub ticks_per_beat: u16,
    pub events: Vec<RawEvent>,
}

/// Convert one stream's delta times into absolute times starting at `base`.
///
/// The running sum goes back to `base` after each end-of-track marker.
fn to_absolute(
    stream: &'static str,
    events: &[RawEvent],
    base: i64,
) -> Result<Vec<Event>, LightsError> {
    let mut running = base;

    events
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let time = running.saturating_add(raw.delta);
            running = if raw.kind == EventKind::EndOfTrack { base } else { time };

            u64::try_from(time)
                .map(|time| Event { time, kind: raw.kind })
                .map_err(|_| LightsError::Merge { stream, index, time })
        })
        .collect()
}

/// Total length of a stream in ticks: the latest absolute time any of its events
/// reaches. An empty stream has length 0.
pub fn stream_duration(events: &[RawEvent]) -> Result<u64, LightsError> {
    let absolute = to_absolute("intro", events, 0)?;
    Ok(absolute.iter().map(|e| e.time).max().unwrap_or(0))
}

/// Resolve the configured lead-in to a tick count.
pub fn lead_in_ticks(lead_in: LeadIn, intro: &[RawEvent]) -> Result<u64, LightsError> {
    match lead_in {
        LeadIn::Ticks(ticks) => Ok(ticks),
        LeadIn::IntroLength => stream_duration(intro),
    }
}

/// Merge the intro and song streams into one timeline ordered by absolute time.
///
/// # Parameters
/// - `intro`: Intro events, placed from tick 0
/// - `song`: Song events, every track of which starts at `lead_in`
/// - `lead_in`: Offset in ticks applied to the song stream
///
/// # Errors
/// Returns [`LightsError::Merge`] if a negative delta drives a stream below tick 0.
pub fn merge_streams(
    intro: &[RawEvent],
    song: &[RawEvent],
    lead_in: u64,
) -> Result<Vec<Event>, LightsError> {
    let base = i64::try_from(lead_in)
        .map_err(|_| LightsError::Config(format!("lead-in of {} ticks is too large", lead_in)))?;

    let mut events = to_absolute("intro", intro, 0)?;
    events.extend(to_absolute("main", song, base)?);

    // Vec::sort_by_key is stable, which keeps same-tick events in source order
    events.sort_by_key(|e| e.time);

    debug!(
        intro = intro.len(),
        song = song.len(),
        lead_in,
        "merged event streams"
    );
    Ok(events)
}
