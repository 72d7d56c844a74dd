//! LED string state: each bulb's pitch, color and current intensity.

use tracing::trace;

/// Fractional RGB, each component in `[0, 1]`.
pub type BaseColor = [f64; 3];

/// Output RGB, each component in `[0, overall_brightness]`.
pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];

/// Highest MIDI velocity, used as full intensity.
pub const MAX_INTENSITY: u8 = 127;

/// Scale a base color by an intensity (0-127) and the overall brightness.
///
/// `round(brightness * intensity / 127 * component)` per channel.
///
/// # Example
/// ```rust
/// use xmaslights::led::scale_color;
///
/// assert_eq!(scale_color([1.0, 0.5, 0.0], 127, 255), [255, 128, 0]);
/// assert_eq!(scale_color([1.0, 0.5, 0.0], 0, 255), [0, 0, 0]);
/// ```
pub fn scale_color(base: BaseColor, intensity: u8, brightness: u8) -> Rgb {
    let level = f64::from(brightness) * f64::from(intensity.min(MAX_INTENSITY))
        / f64::from(MAX_INTENSITY);
    base.map(|component| (level * component).round() as u8)
}

/// A single bulb on the string.
#[derive(Debug, Clone, PartialEq)]
pub struct Led {
    pitch: u8,
    base_color: BaseColor,
    intensity: u8,
    output: Rgb,
}

impl Led {
    /// A dark LED tuned to `pitch`, colored by its pitch class.
    pub fn new(pitch: u8, palette: &[BaseColor; 12]) -> Self {
        Self {
            pitch,
            base_color: palette[usize::from(pitch % 12)],
            intensity: 0,
            output: BLACK,
        }
    }

    pub fn pitch(&self) -> u8 {
        self.pitch
    }

    pub fn base_color(&self) -> BaseColor {
        self.base_color
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    pub fn output(&self) -> Rgb {
        self.output
    }

    /// Set the intensity and refresh the cached output color.
    pub fn set_intensity(&mut self, intensity: u8, brightness: u8) {
        self.intensity = intensity.min(MAX_INTENSITY);
        self.output = scale_color(self.base_color, self.intensity, brightness);
    }
}

/// All LEDs in wiring order.
#[derive(Debug, Clone)]
pub struct LedString {
    leds: Vec<Led>,
    brightness: u8,
}

impl LedString {
    pub fn new(pitches: &[u8], palette: &[BaseColor; 12], brightness: u8) -> Self {
        Self {
            leds: pitches.iter().map(|&pitch| Led::new(pitch, palette)).collect(),
            brightness,
        }
    }

    pub fn len(&self) -> usize {
        self.leds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    pub fn leds(&self) -> &[Led] {
        &self.leds
    }

    /// Set every LED tuned to `pitch` to `intensity`. Returns how many were touched.
    pub fn set_pitch_intensity(&mut self, pitch: u8, intensity: u8) -> usize {
        let brightness = self.brightness;
        let mut touched = 0;
        for led in self.leds.iter_mut().filter(|led| led.pitch == pitch) {
            led.set_intensity(intensity, brightness);
            touched += 1;
        }
        if touched == 0 {
            trace!(pitch, "no LED assigned to pitch");
        }
        touched
    }

    /// Current output color of every LED, in wiring order.
    pub fn snapshot(&self) -> Vec<Rgb> {
        self.leds.iter().map(Led::output).collect()
    }
}
