// Random riff generation.
//
// A `Riff` holds a pitch pool, a duration pool, and a target note count.
// `new_riff` builds the pools from `RiffParams`: a (scale, root) pair expands
// to the scale's pitches via `theory::expand_scale`, anything less falls back
// to the full chromatic octave, and missing or empty duration lists fall back
// to all seven durations. `populate` then draws each note independently and
// uniformly, with replacement, from both pools.
//
// Randomness is injected through `RandomSource`, implemented for every
// `rand::Rng`. Seeded `StdRng`s give reproducible riffs; tests also script
// exact draws.

use crate::error::ConfigError;
use crate::midi::NOTE_EVENT_LEN;
use crate::theory::{NoteDuration, PitchValue, Scale, expand_scale};
use rand::Rng;

/// Default note count is drawn from `1..=MAX_DEFAULT_NOTES`.
pub const MAX_DEFAULT_NOTES: usize = 16;

/// Uniform integer source used for every random decision in a riff.
pub trait RandomSource {
    /// Uniform value in `[low, high)`. Panics if `low >= high`.
    fn range_usize(&mut self, low: usize, high: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.random_range(low..high)
    }
}

/// One generated note: a MIDI note number and its duration code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub pitch: u8,
    pub duration: NoteDuration,
}

/// Caller-facing knobs for `new_riff`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiffParams {
    pub scale: Option<Scale>,
    /// Only used together with `scale`.
    pub root: Option<PitchValue>,
    pub note_count: Option<usize>,
    pub allowed_durations: Option<Vec<NoteDuration>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Riff {
    note_count: usize,
    allowed_pitches: Vec<u8>,
    allowed_durations: Vec<NoteDuration>,
    notes: Vec<Note>,
}

/// Configure a riff from `params`, drawing a note count if none is given.
/// The returned riff has no notes until `populate` runs.
pub fn new_riff<R: RandomSource + ?Sized>(params: &RiffParams, rng: &mut R) -> Riff {
    let note_count = match params.note_count {
        Some(n) => n,
        None => rng.range_usize(1, MAX_DEFAULT_NOTES + 1),
    };

    let allowed_pitches = match (params.scale, params.root) {
        (Some(scale), Some(root)) => expand_scale(scale, root),
        _ => PitchValue::ALL.iter().map(|p| p.note_number()).collect(),
    };

    let allowed_durations = match &params.allowed_durations {
        Some(durations) if !durations.is_empty() => durations.clone(),
        _ => NoteDuration::ALL.to_vec(),
    };

    Riff::from_pools(note_count, allowed_pitches, allowed_durations)
}

/// `new_riff` followed by `populate`.
pub fn generate<R: RandomSource + ?Sized>(
    params: &RiffParams,
    rng: &mut R,
) -> Result<Riff, ConfigError> {
    let mut riff = new_riff(params, rng);
    riff.populate(rng)?;
    Ok(riff)
}

impl Riff {
    /// A riff with explicit pools. Empty pools are accepted here and rejected
    /// by `populate`.
    pub fn from_pools(
        note_count: usize,
        allowed_pitches: Vec<u8>,
        allowed_durations: Vec<NoteDuration>,
    ) -> Self {
        Riff {
            note_count,
            allowed_pitches,
            allowed_durations,
            notes: Vec::new(),
        }
    }

    /// A riff holding exactly `notes`, with pools derived from them.
    pub fn from_notes(notes: Vec<Note>) -> Self {
        let mut allowed_pitches: Vec<u8> = notes.iter().map(|n| n.pitch).collect();
        allowed_pitches.sort_unstable();
        allowed_pitches.dedup();
        let mut allowed_durations: Vec<NoteDuration> = Vec::new();
        for note in &notes {
            if !allowed_durations.contains(&note.duration) {
                allowed_durations.push(note.duration);
            }
        }
        Riff {
            note_count: notes.len(),
            allowed_pitches,
            allowed_durations,
            notes,
        }
    }

    /// Fill `notes` with `note_count` independent draws. Replaces any notes
    /// from an earlier call.
    pub fn populate<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        if self.allowed_pitches.is_empty() {
            return Err(ConfigError::EmptyPitches);
        }
        if self.allowed_durations.is_empty() {
            return Err(ConfigError::EmptyDurations);
        }

        self.notes.clear();
        self.notes.reserve(self.note_count);
        for _ in 0..self.note_count {
            let pitch = self.allowed_pitches[rng.range_usize(0, self.allowed_pitches.len())];
            let duration = self.allowed_durations[rng.range_usize(0, self.allowed_durations.len())];
            self.notes.push(Note { pitch, duration });
        }
        log::debug!(
            "populated riff: {} notes from {} pitches x {} durations",
            self.notes.len(),
            self.allowed_pitches.len(),
            self.allowed_durations.len()
        );
        Ok(())
    }

    pub fn note_count(&self) -> usize {
        self.note_count
    }

    pub fn allowed_pitches(&self) -> &[u8] {
        &self.allowed_pitches
    }

    pub fn allowed_durations(&self) -> &[NoteDuration] {
        &self.allowed_durations
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Bytes the note events occupy in the track chunk.
    pub fn track_byte_size(&self) -> usize {
        NOTE_EVENT_LEN * self.notes.len()
    }
}
