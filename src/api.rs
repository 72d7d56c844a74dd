//! # Public API
//!
//! Entry points that run the whole pipeline.
//!
//! ## Functions
//!
//! - [`animate()`] - Core pipeline over decoded event streams and LED heights
//! - [`animate_midi()`] - From file contents (coordinates CSV and two MIDI files)
//! - [`render_csv()`] - Same, straight to CSV text
//!
//! ## Pipeline
//! 1. Resolve the lead-in and merge intro and song into one timeline
//! 2. Find the song's pitch range and assign a pitch to each LED by height
//! 3. Walk the timeline and emit frames
//!
//! ## Typical Usage
//!
//! ```rust,no_run
//! use xmaslights::{render_csv, Settings};
//!
//! let coords = std::fs::read_to_string("coords_2021.csv")?;
//! let intro = std::fs::read("countdown.mid")?;
//! let song = std::fs::read("song.mid")?;
//!
//! let csv = render_csv(&coords, &intro, &song, &Settings::default())?;
//! std::fs::write("animation.csv", csv)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tracing::{info, warn};

use crate::animation::{generate_animation, Animation};
use crate::coords::parse_heights;
use crate::error::LightsError;
use crate::export::to_csv;
use crate::midi::{read_intro, read_song};
use crate::pitch::{assign_pitches, PitchRange};
use crate::settings::Settings;
use crate::timeline::{lead_in_ticks, merge_streams, EventKind, EventStream, RawEvent};

/// Build the animation from decoded streams and LED heights.
///
/// # Parameters
/// - `intro`: Intro events (delta-timed), played from tick 0
/// - `song`: Song events and tick resolution; the pitch range comes from here
/// - `heights`: One height per LED, in wiring order
/// - `settings`: Brightness, frame rate, lead-in, starting tempo, palette
///
/// # Errors
/// Returns [`LightsError`] if the settings are invalid, a stream goes below tick 0,
/// the song has no note-on events, or a tempo is zero.
pub fn animate(
    intro: &[RawEvent],
    song: &EventStream,
    heights: &[f64],
    settings: &Settings,
) -> Result<Animation, LightsError> {
    settings.validate()?;

    let lead_in = lead_in_ticks(settings.lead_in, intro)?;
    let events = merge_streams(intro, &song.events, lead_in)?;
    info!(events = events.len(), lead_in, "built timeline");

    let range = PitchRange::from_events(&song.events)?;
    let pitches = assign_pitches(heights, range);
    warn_unplayable_intro_notes(intro, &pitches);

    generate_animation(&events, &pitches, song.ticks_per_beat, settings)
}

/// Intro notes that no LED was assigned stay dark.
fn warn_unplayable_intro_notes(intro: &[RawEvent], pitches: &[u8]) {
    let unplayable = intro
        .iter()
        .filter(|e| matches!(e.kind, EventKind::NoteOn { pitch, .. } if !pitches.contains(&pitch)))
        .count();

    if unplayable > 0 {
        warn!(unplayable, "intro notes have no LED with their pitch and will stay dark");
    }
}

/// Build the animation from raw file contents.
///
/// # Parameters
/// - `coords_csv`: GIFT coordinate file text
/// - `intro_midi`: Intro MIDI file bytes (first track is used)
/// - `song_midi`: Song MIDI file bytes (all tracks are used)
pub fn animate_midi(
    coords_csv: &str,
    intro_midi: &[u8],
    song_midi: &[u8],
    settings: &Settings,
) -> Result<Animation, LightsError> {
    let heights = parse_heights(coords_csv)?;
    let intro = read_intro(intro_midi)?;
    let song = read_song(song_midi)?;
    animate(&intro, &song, &heights, settings)
}

/// Build the animation from raw file contents and render it as CSV.
pub fn render_csv(
    coords_csv: &str,
    intro_midi: &[u8],
    song_midi: &[u8],
    settings: &Settings,
) -> Result<String, LightsError> {
    let animation = animate_midi(coords_csv, intro_midi, song_midi, settings)?;
    to_csv(&animation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led::BLACK;
    use crate::settings::LeadIn;

    fn on(delta: i64, pitch: u8) -> RawEvent {
        RawEvent::new(delta, EventKind::NoteOn { pitch, velocity: 127 })
    }

    fn off(delta: i64, pitch: u8) -> RawEvent {
        RawEvent::new(delta, EventKind::NoteOff { pitch })
    }

    #[test]
    fn test_intro_then_song() {
        let intro = vec![on(0, 50), RawEvent::new(480, EventKind::EndOfTrack)];
        let song = EventStream {
            ticks_per_beat: 480,
            events: vec![on(0, 60), off(480, 60), on(0, 61), off(480, 61)],
        };
        let settings = Settings { lead_in: LeadIn::IntroLength, ..Settings::default() };

        // Range [60, 62): two LEDs get 61 and 62
        let animation = animate(&intro, &song, &[0.0, 1.0], &settings).unwrap();

        // intro beat (dark: 50 has no LED), 60 (no LED either), 61 lit, terminal
        assert_eq!(animation.frame_count(), 30 + 30 + 30 + 1);
        assert!(animation.frames[..60].iter().all(|f| f == &vec![BLACK, BLACK]));
        assert!(animation.frames[60..90].iter().all(|f| f[0] != BLACK && f[1] == BLACK));
    }

    #[test]
    fn test_top_led_plays_highest_note() {
        let song = EventStream {
            ticks_per_beat: 480,
            events: vec![on(0, 60), off(480, 60), on(0, 63), off(480, 63)],
        };
        let settings = Settings { lead_in: LeadIn::Ticks(0), ..Settings::default() };

        // Range [60, 64) over four LEDs: 61, 62, 63, 64 from the bottom up
        let animation = animate(&[], &song, &[0.3, 0.2, 0.1, 0.0], &settings).unwrap();

        assert_eq!(animation.frame_count(), 30 + 30 + 1);
        assert!(animation.frames[..30].iter().all(|f| f.iter().all(|c| *c == BLACK)));
        let lit = &animation.frames[30];
        assert_eq!(lit[1], [180, 0, 180]);
        assert_eq!([lit[0], lit[2], lit[3]], [BLACK; 3]);
    }

    #[test]
    fn test_song_without_notes_fails() {
        let song = EventStream {
            ticks_per_beat: 480,
            events: vec![RawEvent::new(0, EventKind::Tempo(500_000))],
        };
        let result = animate(&[on(0, 60)], &song, &[1.0], &Settings::default());
        assert!(matches!(result, Err(LightsError::PitchRange(_))));
    }

    #[test]
    fn test_invalid_settings_fail_before_work() {
        let song = EventStream { ticks_per_beat: 480, events: vec![on(0, 60)] };
        let settings = Settings { frame_rate: -1.0, ..Settings::default() };
        let result = animate(&[], &song, &[1.0], &settings);
        assert!(matches!(result, Err(LightsError::Config(_))));
    }

    #[test]
    fn test_zero_ticks_per_beat_fails() {
        let song = EventStream { ticks_per_beat: 0, events: vec![on(0, 60), off(10, 60)] };
        let result = animate(&[], &song, &[1.0], &Settings::default());
        assert!(matches!(result, Err(LightsError::Clock(_))));
    }
}
