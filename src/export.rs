use std::iter;

use csv::{Terminator, WriterBuilder};

use crate::animation::Animation;
use crate::error::LightsError;

/// Convert an Animation to CSV text
///
/// Header: `FRAME_ID,R_0,G_0,B_0,R_1,...`, then one row per frame with the frame
/// index followed by every LED's red, green and blue values.
///
/// # Example
/// ```rust
/// use xmaslights::animation::Animation;
/// use xmaslights::to_csv;
///
/// let animation = Animation {
///     led_count: 2,
///     frame_rate: 60.0,
///     frames: vec![vec![[255, 0, 0], [0, 8, 16]], vec![[0, 0, 0], [0, 0, 0]]],
/// };
/// assert_eq!(
///     to_csv(&animation)?,
///     "FRAME_ID,R_0,G_0,B_0,R_1,G_1,B_1\n0,255,0,0,0,8,16\n1,0,0,0,0,0,0\n"
/// );
/// # Ok::<(), xmaslights::LightsError>(())
/// ```
pub fn to_csv(animation: &Animation) -> Result<String, LightsError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let header = iter::once("FRAME_ID".to_string()).chain(
        (0..animation.led_count)
            .flat_map(|i| [format!("R_{i}"), format!("G_{i}"), format!("B_{i}")]),
    );
    writer.write_record(header)?;

    for (frame_id, frame) in animation.frames.iter().enumerate() {
        let row = iter::once(frame_id.to_string())
            .chain(frame.iter().flatten().map(|channel| channel.to_string()));
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
