//! Frame generation engine
//!
//! Walks the merged timeline one `(event, next)` pair at a time, applying each event
//! to the LED string and emitting frames whenever the clock moves on.

use itertools::Itertools;
use tracing::info;

use super::types::{Animation, Frame};
use crate::clock::TempoClock;
use crate::error::LightsError;
use crate::led::{LedString, BLACK};
use crate::settings::Settings;
use crate::timeline::{Event, EventKind};

/// Apply a single event to the LEDs and clock.
fn apply_event(event: &Event, leds: &mut LedString, clock: &mut TempoClock) -> Result<(), LightsError> {
    match event.kind {
        EventKind::Tempo(tempo) => clock.set_tempo(event.time, tempo)?,
        EventKind::NoteOn { pitch, velocity } => {
            leds.set_pitch_intensity(pitch, velocity);
        }
        EventKind::NoteOff { pitch } => {
            leds.set_pitch_intensity(pitch, 0);
        }
        EventKind::EndOfTrack | EventKind::Other => {}
    }
    Ok(())
}

/// Generate every frame of the animation.
///
/// # Parameters
/// - `events`: Merged timeline, sorted by absolute tick
/// - `led_pitches`: Assigned pitch of each LED, in wiring order
/// - `ticks_per_beat`: Tick resolution of the song
/// - `settings`: Brightness, frame rate, starting tempo and palette
///
/// # Frame Windows
/// Events sharing a tick form one group: their combined effect is what the next
/// frames show. When the tick changes between `event` and `next`, both ticks are
/// converted to frame numbers at the tempo in force *now*, and one copy of the LED
/// state is appended for each frame in `[frame(event), frame(next))`. A window that
/// rounds to zero frames appends nothing, but the LED state carries forward.
///
/// The last event only marks the end of the final window. After it comes one
/// terminal frame with every LED off.
///
/// # Example
/// ```rust
/// use xmaslights::animation::generate_animation;
/// use xmaslights::timeline::{Event, EventKind};
/// use xmaslights::Settings;
///
/// let events = vec![
///     Event { time: 0, kind: EventKind::NoteOn { pitch: 65, velocity: 127 } },
///     Event { time: 480, kind: EventKind::NoteOff { pitch: 65 } },
/// ];
/// let animation = generate_animation(&events, &[65], 480, &Settings::default())?;
///
/// // One beat at 120 BPM and 60 fps is 30 frames, plus the terminal frame
/// assert_eq!(animation.frame_count(), 31);
/// assert_eq!(animation.frames[0], vec![[255, 0, 0]]);
/// assert_eq!(animation.frames[30], vec![[0, 0, 0]]);
/// # Ok::<(), xmaslights::LightsError>(())
/// ```
pub fn generate_animation(
    events: &[Event],
    led_pitches: &[u8],
    ticks_per_beat: u16,
    settings: &Settings,
) -> Result<Animation, LightsError> {
    let mut leds = LedString::new(led_pitches, &settings.palette, settings.overall_brightness);
    let mut clock = TempoClock::new(ticks_per_beat, settings.frame_rate, settings.default_tempo)?;
    let mut frames: Vec<Frame> = Vec::new();

    for (event, next) in events.iter().tuple_windows() {
        apply_event(event, &mut leds, &mut clock)?;

        if event.time == next.time {
            continue;
        }

        let start = clock.frame_at(event.time);
        let end = clock.frame_at(next.time);
        if end > start {
            let snapshot = leds.snapshot();
            let count = (end - start) as usize;
            frames.extend(std::iter::repeat(snapshot).take(count));
        }
    }

    // Clear the tree as the final frame
    frames.push(vec![BLACK; leds.len()]);

    info!(
        frames = frames.len(),
        leds = leds.len(),
        seconds = frames.len() as f64 / settings.frame_rate,
        "generated animation"
    );

    Ok(Animation {
        led_count: leds.len(),
        frame_rate: settings.frame_rate,
        frames,
    })
}
