// Error types for riff generation and MIDI writing.
//
// `ConfigError` covers riffs that cannot be populated. `MidiWriteError` covers
// everything that can go wrong while serializing: a sink that accepted fewer
// bytes than a field needs, a sink that failed outright, or a riff too long
// for the track-length field. Each write failure names the `EncodeStep` it
// happened in so the caller can report exactly which field was short.

use crate::midi::EncodeStep;
use std::io;
use thiserror::Error;

/// A riff whose pools leave nothing to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no allowed pitches to draw notes from")]
    EmptyPitches,
    #[error("no allowed durations to draw notes from")]
    EmptyDurations,
}

#[derive(Debug, Error)]
pub enum MidiWriteError {
    #[error("error when writing {step}: wrote {actual} bytes instead of {expected}")]
    ShortWrite {
        step: EncodeStep,
        expected: usize,
        actual: usize,
    },
    #[error("error when writing {step}: {source}")]
    Sink {
        step: EncodeStep,
        #[source]
        source: io::Error,
    },
    #[error("riff of {notes} notes does not fit in a 32-bit track length")]
    TrackTooLong { notes: usize },
}

impl MidiWriteError {
    /// The step that failed, if the failure happened mid-write.
    pub fn step(&self) -> Option<EncodeStep> {
        match self {
            MidiWriteError::ShortWrite { step, .. } | MidiWriteError::Sink { step, .. } => {
                Some(*step)
            }
            MidiWriteError::TrackTooLong { .. } => None,
        }
    }
}

/// A scale, pitch, interval, or duration name that matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{name}'")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub name: String,
}

impl ParseNameError {
    pub fn new(kind: &'static str, name: &str) -> Self {
        ParseNameError {
            kind,
            name: name.to_string(),
        }
    }
}
