//! # MIDI Reader
//!
//! Decodes Standard MIDI Files into the delta-timed event streams the timeline
//! merges.
//!
//! ## Streams
//! - **Intro**: the first track of the intro file only
//! - **Song**: every track of the song file, in file order
//!
//! Each track is closed by an end-of-track event (one is added if the file leaves it
//! out), which lets the merger line the tracks up at the same start tick.
//!
//! ## Event Mapping
//! | MIDI                       | `EventKind`      |
//! |----------------------------|------------------|
//! | Note On (any velocity)     | `NoteOn`         |
//! | Note Off                   | `NoteOff`        |
//! | Meta: Set Tempo            | `Tempo`          |
//! | Meta: End of Track         | `EndOfTrack`     |
//! | anything else              | `Other`          |
//!
//! A Note On with velocity 0 stays a `NoteOn`: it still counts towards the pitch range
//! and simply sets the intensity to 0.

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use tracing::debug;

use crate::error::LightsError;
use crate::timeline::{EventKind, EventStream, RawEvent};

fn parse_smf(bytes: &[u8]) -> Result<Smf<'_>, LightsError> {
    Smf::parse(bytes).map_err(|e| LightsError::Midi(e.to_string()))
}

fn convert_kind(kind: &TrackEventKind) -> EventKind {
    match kind {
        TrackEventKind::Midi { message, .. } => match *message {
            MidiMessage::NoteOn { key, vel } => EventKind::NoteOn {
                pitch: key.as_int(),
                velocity: vel.as_int(),
            },
            MidiMessage::NoteOff { key, .. } => EventKind::NoteOff { pitch: key.as_int() },
            _ => EventKind::Other,
        },
        TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => EventKind::Tempo(tempo.as_int()),
        TrackEventKind::Meta(MetaMessage::EndOfTrack) => EventKind::EndOfTrack,
        _ => EventKind::Other,
    }
}

/// Convert one track, making sure it ends with an end-of-track event.
fn convert_track(track: &[TrackEvent]) -> Vec<RawEvent> {
    let mut events: Vec<RawEvent> = track
        .iter()
        .map(|event| RawEvent::new(i64::from(event.delta.as_int()), convert_kind(&event.kind)))
        .collect();

    if events.last().map(|e| e.kind) != Some(EventKind::EndOfTrack) {
        events.push(RawEvent::new(0, EventKind::EndOfTrack));
    }
    events
}

/// Read the intro stream: the first track of the intro file.
///
/// The intro's own timing header is ignored; its ticks are played at the song's
/// resolution.
pub fn read_intro(bytes: &[u8]) -> Result<Vec<RawEvent>, LightsError> {
    let smf = parse_smf(bytes)?;
    let track = smf
        .tracks
        .first()
        .ok_or_else(|| LightsError::Midi("intro file has no tracks".to_string()))?;

    let events = convert_track(track);
    debug!(events = events.len(), "read intro track");
    Ok(events)
}

/// Read the song stream: all tracks plus the ticks-per-beat resolution.
///
/// # Errors
/// Returns [`LightsError::Midi`] for unreadable files and for files timed in SMPTE
/// timecode, which have no beat to convert from.
pub fn read_song(bytes: &[u8]) -> Result<EventStream, LightsError> {
    let smf = parse_smf(bytes)?;

    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(ticks) => ticks.as_int(),
        Timing::Timecode(fps, subframe) => {
            return Err(LightsError::Midi(format!(
                "timecode timing ({} fps, {} ticks per frame) is not supported",
                fps.as_f32(),
                subframe
            )))
        }
    };

    let events: Vec<RawEvent> = smf.tracks.iter().flat_map(|t| convert_track(t)).collect();

    debug!(
        tracks = smf.tracks.len(),
        events = events.len(),
        ticks_per_beat,
        "read song"
    );
    Ok(EventStream {
        ticks_per_beat,
        events,
    })
}
