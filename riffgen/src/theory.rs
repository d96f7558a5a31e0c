// Music theory primitives for riff generation.
//
// Pitches are MIDI note numbers. The twelve named `PitchValue` constants
// cover one octave from A (0x39) to G#/Ab (0x44); enharmonic spellings are
// not separate values but entries in a synonym table used for parsing and
// display. `Interval` classifies the distance from a root and maps to a
// semitone offset; `Scale` is a fixed table of intervals.
//
// Scale expansion adds offsets directly to the root's note number with no
// octave wraparound, so a G# major scale reaches up to 0x50. Callers treat
// expanded pitches as raw `u8` note numbers rather than `PitchValue`s.
//
// `NoteDuration` carries the 16-bit codes the MIDI writer (see `midi.rs`)
// emits verbatim in place of a delta-time. They are not tick counts.

use crate::error::ParseNameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the twelve chromatic pitches in the generator's base octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum PitchValue {
    A = 0x39,
    ASharp = 0x3A,
    B = 0x3B,
    C = 0x3C,
    CSharp = 0x3D,
    D = 0x3E,
    DSharp = 0x3F,
    E = 0x40,
    F = 0x41,
    FSharp = 0x42,
    G = 0x43,
    GSharp = 0x44,
}

/// Accepted spellings per pitch, in `PitchValue::ALL` order. The first entry
/// is the canonical ASCII name.
const PITCH_SYNONYMS: [(PitchValue, &[&str]); 12] = [
    (PitchValue::A, &["A"]),
    (PitchValue::ASharp, &["A#", "Bb", "A♯", "B♭"]),
    (PitchValue::B, &["B", "Cb", "C♭"]),
    (PitchValue::C, &["C", "B#", "B♯"]),
    (PitchValue::CSharp, &["C#", "Db", "C♯", "D♭"]),
    (PitchValue::D, &["D"]),
    (PitchValue::DSharp, &["D#", "Eb", "D♯", "E♭"]),
    (PitchValue::E, &["E", "Fb", "F♭"]),
    (PitchValue::F, &["F", "E#", "E♯"]),
    (PitchValue::FSharp, &["F#", "Gb", "F♯", "G♭"]),
    (PitchValue::G, &["G"]),
    (PitchValue::GSharp, &["G#", "Ab", "G♯", "A♭"]),
];

impl PitchValue {
    pub const ALL: [PitchValue; 12] = [
        PitchValue::A,
        PitchValue::ASharp,
        PitchValue::B,
        PitchValue::C,
        PitchValue::CSharp,
        PitchValue::D,
        PitchValue::DSharp,
        PitchValue::E,
        PitchValue::F,
        PitchValue::FSharp,
        PitchValue::G,
        PitchValue::GSharp,
    ];

    /// The MIDI note number.
    pub fn note_number(self) -> u8 {
        self as u8
    }

    /// Pitch at position `index` (0 = A) of the chromatic octave.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Canonical ASCII name, e.g. `"A#"`.
    pub fn name(self) -> &'static str {
        self.synonyms()[0]
    }

    /// Label shown to users: naturals as-is, accidentals spelled as flats.
    pub fn display_name(self) -> &'static str {
        match self {
            PitchValue::A => "A",
            PitchValue::ASharp => "B♭",
            PitchValue::B => "B",
            PitchValue::C => "C",
            PitchValue::CSharp => "D♭",
            PitchValue::D => "D",
            PitchValue::DSharp => "E♭",
            PitchValue::E => "E",
            PitchValue::F => "F",
            PitchValue::FSharp => "G♭",
            PitchValue::G => "G",
            PitchValue::GSharp => "A♭",
        }
    }

    /// Every accepted spelling of this pitch.
    pub fn synonyms(self) -> &'static [&'static str] {
        PITCH_SYNONYMS[(self as u8 - PitchValue::A as u8) as usize].1
    }
}

impl fmt::Display for PitchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PitchValue {
    type Err = ParseNameError;

    /// Letter names are case-insensitive; the accidental suffix is not, so
    /// `"bb"` is B-flat but `"BB"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let normalized: String = match chars.next() {
            Some(letter) => letter.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        };
        PITCH_SYNONYMS
            .iter()
            .find(|(_, names)| names.contains(&normalized.as_str()))
            .map(|(pitch, _)| *pitch)
            .ok_or_else(|| ParseNameError::new("pitch", s))
    }
}

impl TryFrom<String> for PitchValue {
    type Error = ParseNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PitchValue> for String {
    fn from(pitch: PitchValue) -> Self {
        pitch.name().to_string()
    }
}

/// Qualitative distance between a root and another pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Interval {
    Unison = 0,
    MinorSecond = 1,
    MajorSecond = 2,
    MinorThird = 3,
    MajorThird = 4,
    PerfectFourth = 5,
    AugmentedFourth = 6,
    PerfectFifth = 7,
    MinorSixth = 8,
    MajorSixth = 9,
    MinorSeventh = 10,
    MajorSeventh = 11,
    Octave = 12,
}

impl Interval {
    /// The tritone under its other name.
    pub const DIMINISHED_FIFTH: Interval = Interval::AugmentedFourth;

    pub const ALL: [Interval; 13] = [
        Interval::Unison,
        Interval::MinorSecond,
        Interval::MajorSecond,
        Interval::MinorThird,
        Interval::MajorThird,
        Interval::PerfectFourth,
        Interval::AugmentedFourth,
        Interval::PerfectFifth,
        Interval::MinorSixth,
        Interval::MajorSixth,
        Interval::MinorSeventh,
        Interval::MajorSeventh,
        Interval::Octave,
    ];

    /// Semitones above the root (0–12).
    pub fn semitones(self) -> u8 {
        self as u8
    }

    /// Kebab-case name, matching the serde form.
    pub fn name(self) -> &'static str {
        match self {
            Interval::Unison => "unison",
            Interval::MinorSecond => "minor-second",
            Interval::MajorSecond => "major-second",
            Interval::MinorThird => "minor-third",
            Interval::MajorThird => "major-third",
            Interval::PerfectFourth => "perfect-fourth",
            Interval::AugmentedFourth => "augmented-fourth",
            Interval::PerfectFifth => "perfect-fifth",
            Interval::MinorSixth => "minor-sixth",
            Interval::MajorSixth => "major-sixth",
            Interval::MinorSeventh => "minor-seventh",
            Interval::MajorSeventh => "major-seventh",
            Interval::Octave => "octave",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the kebab-case names plus `diminished-fifth` for the tritone.
impl FromStr for Interval {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        if key == "diminished-fifth" {
            return Ok(Interval::DIMINISHED_FIFTH);
        }
        Interval::ALL
            .into_iter()
            .find(|interval| interval.name() == key)
            .ok_or_else(|| ParseNameError::new("interval", s))
    }
}

/// Pitch reached by moving `interval` above `root`. No modulo is applied.
pub fn relative_pitch(root: PitchValue, interval: Interval) -> u8 {
    root.note_number() + interval.semitones()
}

/// Built-in scales, each an ordered interval list from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scale {
    NaturalMinor,
    HarmonicMinor,
    Major,
    MinorPentatonic,
    MajorPentatonic,
}

impl Scale {
    pub const ALL: [Scale; 5] = [
        Scale::NaturalMinor,
        Scale::HarmonicMinor,
        Scale::Major,
        Scale::MinorPentatonic,
        Scale::MajorPentatonic,
    ];

    pub fn intervals(self) -> &'static [Interval] {
        use Interval::*;
        match self {
            Scale::NaturalMinor => &[
                Unison,
                MajorSecond,
                MinorThird,
                PerfectFourth,
                PerfectFifth,
                MinorSixth,
                MinorSeventh,
                Octave,
            ],
            Scale::HarmonicMinor => &[
                Unison,
                MajorSecond,
                MinorThird,
                PerfectFourth,
                PerfectFifth,
                MinorSixth,
                MajorSeventh,
                Octave,
            ],
            Scale::Major => &[
                Unison,
                MajorSecond,
                MajorThird,
                PerfectFourth,
                PerfectFifth,
                MajorSixth,
                MajorSeventh,
                Octave,
            ],
            Scale::MinorPentatonic => &[
                Unison,
                MinorThird,
                PerfectFourth,
                PerfectFifth,
                MinorSeventh,
            ],
            Scale::MajorPentatonic => &[Unison, MajorSecond, MajorThird, PerfectFifth, MajorSixth],
        }
    }

    /// Kebab-case name as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Scale::NaturalMinor => "natural-minor",
            Scale::HarmonicMinor => "harmonic-minor",
            Scale::Major => "major",
            Scale::MinorPentatonic => "minor-pentatonic",
            Scale::MajorPentatonic => "major-pentatonic",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scale {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Scale::ALL
            .into_iter()
            .find(|scale| scale.name() == key)
            .ok_or_else(|| ParseNameError::new("scale", s))
    }
}

/// Concrete pitches of `scale` rooted at `root`, in interval order.
pub fn expand_scale(scale: Scale, root: PitchValue) -> Vec<u8> {
    scale
        .intervals()
        .iter()
        .map(|&interval| relative_pitch(root, interval))
        .collect()
}

/// Rhythmic length of a note, stored as the 16-bit code written to the
/// track in place of a real delta-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u16)]
pub enum NoteDuration {
    Whole = 0x8F00,
    Half = 0x8740,
    Quarter = 0x8360,
    Eighth = 0x8170,
    Sixteenth = 0x7880,
    ThirtySecond = 0x3C80,
    SixtyFourth = 0x1E80,
}

impl NoteDuration {
    pub const ALL: [NoteDuration; 7] = [
        NoteDuration::Whole,
        NoteDuration::Half,
        NoteDuration::Quarter,
        NoteDuration::Eighth,
        NoteDuration::Sixteenth,
        NoteDuration::ThirtySecond,
        NoteDuration::SixtyFourth,
    ];

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            NoteDuration::Whole => "whole",
            NoteDuration::Half => "half",
            NoteDuration::Quarter => "quarter",
            NoteDuration::Eighth => "eighth",
            NoteDuration::Sixteenth => "sixteenth",
            NoteDuration::ThirtySecond => "thirty-second",
            NoteDuration::SixtyFourth => "sixty-fourth",
        }
    }

    /// Fraction-of-a-whole-note spelling, e.g. `"1/8"`.
    pub fn fraction(self) -> &'static str {
        match self {
            NoteDuration::Whole => "1",
            NoteDuration::Half => "1/2",
            NoteDuration::Quarter => "1/4",
            NoteDuration::Eighth => "1/8",
            NoteDuration::Sixteenth => "1/16",
            NoteDuration::ThirtySecond => "1/32",
            NoteDuration::SixtyFourth => "1/64",
        }
    }
}

impl fmt::Display for NoteDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoteDuration {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        NoteDuration::ALL
            .into_iter()
            .find(|d| d.name() == key || d.fraction() == key)
            .ok_or_else(|| ParseNameError::new("duration", s))
    }
}
