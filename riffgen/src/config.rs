// File-backed generation settings.
//
// `RiffConfig` mirrors the command-line options and loads from JSON, so a
// set of generation parameters can be kept alongside the output it produces.
// Every field is optional; missing fields fall back to the generator's own
// defaults (random note count, chromatic pitches, all durations).
//
// Example:
//
//   {
//     "scale": "minor-pentatonic",
//     "root": "E",
//     "note_count": 12,
//     "allowed_durations": ["quarter", "eighth"],
//     "seed": 7,
//     "track_length": "include-end-of-track"
//   }

use crate::midi::{EncodeOptions, TrackLength};
use crate::riff::RiffParams;
use crate::theory::{NoteDuration, PitchValue, Scale};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiffConfig {
    pub scale: Option<Scale>,
    pub root: Option<PitchValue>,
    pub note_count: Option<usize>,
    pub allowed_durations: Option<Vec<NoteDuration>>,
    /// Seed for reproducible output. Unseeded runs draw from the OS.
    pub seed: Option<u64>,
    pub track_length: TrackLength,
}

impl RiffConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Generation parameters. A scale without a root (or a root without a
    /// scale) is dropped with a warning and the riff stays chromatic.
    pub fn params(&self) -> RiffParams {
        let (scale, root) = match (self.scale, self.root) {
            (Some(scale), Some(root)) => (Some(scale), Some(root)),
            (Some(scale), None) => {
                log::warn!("scale {scale} given without a root; using all pitches");
                (None, None)
            }
            (None, Some(root)) => {
                log::warn!("root {root} given without a scale; using all pitches");
                (None, None)
            }
            (None, None) => (None, None),
        };
        RiffParams {
            scale,
            root,
            note_count: self.note_count,
            allowed_durations: self.allowed_durations.clone(),
        }
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            track_length: self.track_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = RiffConfig::from_json("{}").unwrap();
        assert_eq!(config, RiffConfig::default());
        assert_eq!(config.params(), RiffParams::default());
        let options = config.encode_options();
        assert_eq!(options.track_length, TrackLength::NoteEventsOnly);
    }

    #[test]
    fn full_config_parses() {
        let json = r#"{
            "scale": "harmonic-minor",
            "root": "Bb",
            "note_count": 12,
            "allowed_durations": ["quarter", "sixty-fourth"],
            "seed": 7,
            "track_length": "include-end-of-track"
        }"#;
        let config = RiffConfig::from_json(json).unwrap();
        assert_eq!(config.scale, Some(Scale::HarmonicMinor));
        assert_eq!(config.root, Some(PitchValue::ASharp));
        assert_eq!(config.seed, Some(7));
        let params = config.params();
        assert_eq!(params.note_count, Some(12));
        assert_eq!(
            params.allowed_durations,
            Some(vec![NoteDuration::Quarter, NoteDuration::SixtyFourth])
        );
        let options = config.encode_options();
        assert_eq!(options.track_length, TrackLength::IncludeEndOfTrack);
    }

    #[test]
    fn lone_scale_is_dropped() {
        let config = RiffConfig {
            scale: Some(Scale::Major),
            ..Default::default()
        };
        let params = config.params();
        assert_eq!(params.scale, None);
        assert_eq!(params.root, None);
    }

    #[test]
    fn rejects_unknown_names_and_fields() {
        assert!(RiffConfig::from_json(r#"{"root": "H"}"#).is_err());
        assert!(RiffConfig::from_json(r#"{"scale": "dorian"}"#).is_err());
        assert!(RiffConfig::from_json(r#"{"tempo": 120}"#).is_err());
    }

    #[test]
    fn json_roundtrip() {
        let config = RiffConfig {
            scale: Some(Scale::MajorPentatonic),
            root: Some(PitchValue::FSharp),
            note_count: Some(3),
            allowed_durations: Some(vec![NoteDuration::Whole]),
            seed: Some(1),
            track_length: TrackLength::IncludeEndOfTrack,
        };
        let json = config.to_json().unwrap();
        assert_eq!(RiffConfig::from_json(&json).unwrap(), config);
    }
}
