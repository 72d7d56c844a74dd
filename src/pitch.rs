//! # Pitch Assignment
//!
//! Gives every LED a fixed pitch based on how high it hangs on the tree.
//!
//! ## Algorithm
//! 1. Find the song's pitch range: the lowest note-on pitch and one past the highest
//! 2. Rank the LED heights ordinally (1 = lowest, ties broken by wiring order)
//! 3. Split the range into `N` equal steps and give the LED of rank `r` the pitch at
//!    step `r`, so the highest LED sits on `max`
//!
//! Only the song stream counts towards the range. Intro notes outside it never light
//! anything.

use std::cmp::Ordering;

use tracing::info;

use crate::error::LightsError;
use crate::timeline::{EventKind, RawEvent};

/// Pitch range of the song: `min` is the lowest note, `max` one past the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchRange {
    pub min: u8,
    pub max: u8,
}

impl PitchRange {
    /// Scan note-on events for the lowest and highest pitch.
    ///
    /// # Errors
    /// Returns [`LightsError::PitchRange`] when there are no note-on events.
    pub fn from_events(events: &[RawEvent]) -> Result<Self, LightsError> {
        let bounds = events
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::NoteOn { pitch, .. } => Some(pitch),
                _ => None,
            })
            .fold(None, |bounds: Option<(u8, u8)>, pitch| match bounds {
                None => Some((pitch, pitch)),
                Some((lo, hi)) => Some((lo.min(pitch), hi.max(pitch))),
            });

        match bounds {
            Some((lo, hi)) => Ok(Self {
                min: lo,
                max: hi.saturating_add(1),
            }),
            None => Err(LightsError::PitchRange(
                "song contains no note-on events".to_string(),
            )),
        }
    }

    pub fn span(&self) -> u8 {
        self.max - self.min
    }
}

/// Ordinal ranks (1-indexed) of `heights`: ascending, equal heights ranked in input
/// order.
///
/// # Example
/// ```rust
/// use xmaslights::pitch::ordinal_ranks;
///
/// assert_eq!(ordinal_ranks(&[3.0, 1.0, 1.0, 2.0]), vec![4, 1, 2, 3]);
/// ```
pub fn ordinal_ranks(heights: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..heights.len()).collect();
    // sort_by is stable, so equal heights stay in input order
    order.sort_by(|&a, &b| heights[a].partial_cmp(&heights[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0; heights.len()];
    for (position, &index) in order.iter().enumerate() {
        ranks[index] = position + 1;
    }
    ranks
}

/// Pitch for the LED of ordinal rank `rank` out of `led_count`.
pub fn pitch_for_rank(rank: usize, led_count: usize, range: PitchRange) -> u8 {
    let step = f64::from(range.span()) / led_count as f64;
    let offset = (step * rank as f64).floor() as u8;
    range.min + offset
}

/// Assign one pitch to each LED from its height.
///
/// # Example
/// ```rust
/// use xmaslights::pitch::{assign_pitches, PitchRange};
///
/// let range = PitchRange { min: 60, max: 72 };
/// let pitches = assign_pitches(&[0.4, 0.1, 0.3, 0.2], range);
/// assert_eq!(pitches, vec![72, 63, 69, 66]);
/// ```
pub fn assign_pitches(heights: &[f64], range: PitchRange) -> Vec<u8> {
    let led_count = heights.len();
    let pitches: Vec<u8> = ordinal_ranks(heights)
        .into_iter()
        .map(|rank| pitch_for_rank(rank, led_count, range))
        .collect();

    info!(
        leds = led_count,
        min_pitch = range.min,
        max_pitch = range.max,
        "assigned LED pitches"
    );
    pitches
}
