// Riff generator with a minimal MIDI writer.
//
// Builds a short random phrase from a pitch pool (a scale rooted on one of
// twelve pitches, or the whole chromatic octave) and a set of allowed note
// durations, then serializes it as a single-track MIDI file with fixed
// 8-byte note events.
//
// Architecture:
// - theory.rs: Pitch constants and synonyms, intervals, scales, duration codes
// - riff.rs: Riff configuration, random note drawing via `RandomSource`
// - midi.rs: Byte-exact MThd/MTrk writer with per-field short-write checks
// - config.rs: JSON-loadable generation settings
// - error.rs: Configuration, write, and name-parsing errors
//
// The `generate` binary (main.rs) is the command-line front end. Output is
// deterministic given a seed.

pub mod config;
pub mod error;
pub mod midi;
pub mod riff;
pub mod theory;

pub use config::RiffConfig;
pub use error::{ConfigError, MidiWriteError, ParseNameError};
pub use midi::{EncodeOptions, EncodeStep, TrackLength, encode_riff, write_riff_file};
pub use riff::{Note, RandomSource, Riff, RiffParams, generate, new_riff};
pub use theory::{Interval, NoteDuration, PitchValue, Scale, expand_scale, relative_pitch};
