//! # Settings
//!
//! Animation settings and their YAML representation.
//!
//! Every key is optional; anything left out keeps its default.
//!
//! ```yaml
//! overall-brightness: 128   # 0-255, scales every output color
//! frame-rate: 30            # frames per second
//! lead-in: intro            # ticks, or "intro" to use the intro's own length
//! default-tempo: 500000     # microseconds per beat until the first tempo change
//! palette:                  # 12 RGB triples in [0, 1], indexed by pitch mod 12
//!   - [0.0, 0.577, 0.816]
//!   # ...
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::LightsError;
use crate::led::BaseColor;

/// Tempo used until the first tempo-change event (120 BPM).
pub const DEFAULT_TEMPO: u32 = 500_000;

/// Length of the countdown intro the animation was built around.
pub const DEFAULT_LEAD_IN_TICKS: u64 = 7680;

/// One color per pitch class: `[C C# D D# E F F# G G# A A# B]`.
pub const DEFAULT_PALETTE: [BaseColor; 12] = [
    [0.0, 0.577, 0.816],
    [0.0, 0.0, 1.0],
    [0.577, 0.0, 0.816],
    [0.707, 0.0, 0.707],
    [0.816, 0.0, 0.577],
    [1.0, 0.0, 0.0],
    [0.816, 0.577, 0.0],
    [0.707, 0.707, 0.0],
    [0.577, 0.816, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.816, 0.577],
    [0.0, 0.707, 0.707],
];

/// How far the song stream is shifted past the start of the intro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadIn {
    /// A fixed number of ticks
    Ticks(u64),
    /// The intro stream's own length
    IntroLength,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub overall_brightness: u8,
    pub frame_rate: f64,
    pub lead_in: LeadIn,
    pub default_tempo: u32,
    pub palette: [BaseColor; 12],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            overall_brightness: 255,
            frame_rate: 60.0,
            lead_in: LeadIn::Ticks(DEFAULT_LEAD_IN_TICKS),
            default_tempo: DEFAULT_TEMPO,
            palette: DEFAULT_PALETTE,
        }
    }
}

/// Settings as they appear in the YAML file, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSettings {
    overall_brightness: Option<u8>,
    frame_rate: Option<f64>,
    lead_in: Option<RawLeadIn>,
    default_tempo: Option<u32>,
    palette: Option<Vec<BaseColor>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLeadIn {
    Ticks(u64),
    Keyword(String),
}

impl Settings {
    /// Parse settings from YAML text, filling unset keys with defaults.
    ///
    /// # Example
    /// ```rust
    /// use xmaslights::Settings;
    ///
    /// let settings = Settings::from_yaml("frame-rate: 30\noverall-brightness: 100")?;
    /// assert_eq!(settings.frame_rate, 30.0);
    /// assert_eq!(settings.overall_brightness, 100);
    /// # Ok::<(), xmaslights::LightsError>(())
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, LightsError> {
        // An empty document deserializes as unit, not as an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawSettings =
            serde_yaml::from_str(content).map_err(|e| LightsError::Config(e.to_string()))?;

        let defaults = Self::default();

        let lead_in = match raw.lead_in {
            None => defaults.lead_in,
            Some(RawLeadIn::Ticks(ticks)) => LeadIn::Ticks(ticks),
            Some(RawLeadIn::Keyword(word)) if word.trim() == "intro" => LeadIn::IntroLength,
            Some(RawLeadIn::Keyword(word)) => {
                return Err(LightsError::Config(format!(
                    "lead-in must be a tick count or \"intro\", got \"{}\"",
                    word
                )))
            }
        };

        let palette = match raw.palette {
            None => defaults.palette,
            Some(colors) => {
                let count = colors.len();
                colors.try_into().map_err(|_| {
                    LightsError::Config(format!("palette needs 12 colors, got {}", count))
                })?
            }
        };

        let settings = Self {
            overall_brightness: raw.overall_brightness.unwrap_or(defaults.overall_brightness),
            frame_rate: raw.frame_rate.unwrap_or(defaults.frame_rate),
            lead_in,
            default_tempo: raw.default_tempo.unwrap_or(defaults.default_tempo),
            palette,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a YAML settings file.
    pub fn load(path: &Path) -> Result<Self, LightsError> {
        let content = std::fs::read_to_string(path).map_err(|source| LightsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Apply command-line overrides given as raw strings, then validate.
    ///
    /// # Example
    /// ```rust
    /// use xmaslights::Settings;
    ///
    /// let settings = Settings::default().with_overrides(Some("128"), Some("30"))?;
    /// assert_eq!(settings.overall_brightness, 128);
    /// assert_eq!(settings.frame_rate, 30.0);
    /// # Ok::<(), xmaslights::LightsError>(())
    /// ```
    pub fn with_overrides(
        mut self,
        brightness: Option<&str>,
        frame_rate: Option<&str>,
    ) -> Result<Self, LightsError> {
        if let Some(value) = brightness {
            self.overall_brightness = value.trim().parse().map_err(|_| {
                LightsError::Config(format!("overall-brightness must be 0-255, got '{}'", value))
            })?;
        }
        if let Some(value) = frame_rate {
            self.frame_rate = value.trim().parse().map_err(|_| {
                LightsError::Config(format!("frame-rate must be a number, got '{}'", value))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check the values that the YAML types alone cannot rule out.
    pub fn validate(&self) -> Result<(), LightsError> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(LightsError::Config(format!(
                "frame-rate must be positive, got {}",
                self.frame_rate
            )));
        }
        if self.default_tempo == 0 {
            return Err(LightsError::Config(
                "default-tempo must be positive, got 0".to_string(),
            ));
        }
        for (pitch_class, color) in self.palette.iter().enumerate() {
            if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(LightsError::Config(format!(
                    "palette entry {} has a component outside [0, 1]: {:?}",
                    pitch_class, color
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let settings = Settings::from_yaml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.overall_brightness, 255);
        assert_eq!(settings.frame_rate, 60.0);
        assert_eq!(settings.lead_in, LeadIn::Ticks(7680));
        assert_eq!(settings.default_tempo, 500_000);
    }

    #[test]
    fn test_partial_yaml() {
        let settings = Settings::from_yaml("overall-brightness: 64\nlead-in: 960").unwrap();
        assert_eq!(settings.overall_brightness, 64);
        assert_eq!(settings.lead_in, LeadIn::Ticks(960));
        assert_eq!(settings.frame_rate, 60.0);
    }

    #[test]
    fn test_lead_in_intro_keyword() {
        let settings = Settings::from_yaml("lead-in: intro").unwrap();
        assert_eq!(settings.lead_in, LeadIn::IntroLength);
    }

    #[test]
    fn test_bad_lead_in_keyword() {
        let result = Settings::from_yaml("lead-in: outro");
        assert!(matches!(result, Err(LightsError::Config(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = Settings::from_yaml("brightness: 10");
        assert!(matches!(result, Err(LightsError::Config(_))));
    }

    #[test]
    fn test_brightness_out_of_range() {
        let result = Settings::from_yaml("overall-brightness: 300");
        assert!(matches!(result, Err(LightsError::Config(_))));
    }

    #[test]
    fn test_zero_frame_rate_rejected() {
        let result = Settings::from_yaml("frame-rate: 0");
        match result {
            Err(LightsError::Config(message)) => assert!(message.contains("frame-rate")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_tempo_rejected() {
        let result = Settings::from_yaml("default-tempo: 0");
        assert!(matches!(result, Err(LightsError::Config(_))));
    }

    #[test]
    fn test_palette_length_checked() {
        let result = Settings::from_yaml("palette:\n  - [1.0, 0.0, 0.0]\n");
        match result {
            Err(LightsError::Config(message)) => assert!(message.contains("got 1")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_palette_component_range_checked() {
        let mut yaml = String::from("palette:\n");
        for _ in 0..11 {
            yaml.push_str("  - [0.5, 0.5, 0.5]\n");
        }
        yaml.push_str("  - [1.5, 0.0, 0.0]\n");
        let result = Settings::from_yaml(&yaml);
        assert!(matches!(result, Err(LightsError::Config(_))));
    }

    #[test]
    fn test_custom_palette() {
        let mut yaml = String::from("palette:\n");
        for _ in 0..12 {
            yaml.push_str("  - [1.0, 1.0, 1.0]\n");
        }
        let settings = Settings::from_yaml(&yaml).unwrap();
        assert!(settings.palette.iter().all(|c| *c == [1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let settings = Settings::from_yaml("overall-brightness: 64
frame-rate: 25").unwrap();
        let settings = settings.with_overrides(Some("200"), None).unwrap();
        assert_eq!(settings.overall_brightness, 200);
        assert_eq!(settings.frame_rate, 25.0);
    }

    #[test]
    fn test_override_frame_rate_validated() {
        for value in ["-5", "0", "NaN", "inf"] {
            let result = Settings::default().with_overrides(None, Some(value));
            match result {
                Err(LightsError::Config(message)) => assert!(message.contains("frame-rate")),
                other => panic!("expected config error for {}, got {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_override_not_a_number() {
        let result = Settings::default().with_overrides(None, Some("fast"));
        assert!(matches!(result, Err(LightsError::Config(m)) if m.contains("'fast'")));

        let result = Settings::default().with_overrides(Some("300"), None);
        assert!(matches!(result, Err(LightsError::Config(m)) if m.contains("0-255")));
    }
}
