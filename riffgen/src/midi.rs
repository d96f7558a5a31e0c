// MIDI output for generated riffs.
//
// Writes a riff as a minimal Standard MIDI File: a fixed 14-byte MThd chunk
// (format 1, one track, 480 ticks per quarter) followed by one MTrk chunk.
// The track holds one fixed 8-byte event per note and a 4-byte end marker:
//
//   note:  00 90 <pitch> 40 <duration hi> <duration lo> <pitch> 00
//   end:   01 FF 2F 00
//
// The duration code sits where the following event's delta-time would be,
// so a reader sees each note as a Note-On followed, after the duration, by a
// running-status Note-On of velocity 0 (or a Note-Off, for codes whose low
// byte is 0x80). The encoding is fixed-shape and not canonical.
//
// The MTrk length field counts only the note events by default, leaving the
// end marker outside the declared chunk. `TrackLength::IncludeEndOfTrack`
// selects the corrected length for readers that validate chunk sizes.
//
// Every field goes through `write_exact`, which compares the bytes the sink
// accepted against the field size and aborts the whole encode on the first
// mismatch. The encoder never closes or flushes the sink it is handed;
// `write_riff_file` owns its file and drops it on every exit path.

use crate::error::MidiWriteError;
use crate::riff::{Note, Riff};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Ticks per quarter note declared in the header.
pub const TICKS_PER_QUARTER: u16 = 480;

/// Size of the MThd chunk, tag and length included.
pub const HEADER_LEN: usize = 14;

/// Size of the MTrk tag plus its length field.
pub const TRACK_HEADER_LEN: usize = 8;

/// Size of one encoded note.
pub const NOTE_EVENT_LEN: usize = 8;

pub const END_OF_TRACK: [u8; 4] = [0x01, 0xFF, 0x2F, 0x00];

const NOTE_ON_CHANNEL_0: u8 = 0x90;
const DEFAULT_VELOCITY: u8 = 0x40;

/// The field being written, for error reports and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeStep {
    /// Opening the destination file.
    Open,
    Header,
    TrackId,
    TrackSize,
    NoteEvent {
        index: usize,
    },
    EndOfTrack,
    /// Flushing buffered output to the destination.
    Flush,
}

impl fmt::Display for EncodeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeStep::Open => f.write_str("output file"),
            EncodeStep::Header => f.write_str("MThd chunk"),
            EncodeStep::TrackId => f.write_str("MTrk identifier"),
            EncodeStep::TrackSize => f.write_str("MTrk data size"),
            EncodeStep::NoteEvent { index } => write!(f, "note {index}"),
            EncodeStep::EndOfTrack => f.write_str("MTrk end"),
            EncodeStep::Flush => f.write_str("buffered output"),
        }
    }
}

/// What the MTrk length field counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackLength {
    /// Note events only; the end marker falls outside the declared chunk.
    #[default]
    NoteEventsOnly,
    /// Note events plus the 4-byte end marker.
    IncludeEndOfTrack,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub track_length: TrackLength,
}

/// A destination that reports how many bytes each write accepted.
pub trait ByteSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<usize>;
}

impl<W: Write + ?Sized> ByteSink for W {
    /// Keeps writing until `bytes` is consumed or the writer stops accepting
    /// data. Returns the number of bytes taken.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < bytes.len() {
            match self.write(&bytes[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(written)
    }
}

/// Write one field, failing unless the sink took all of it.
pub fn write_exact<S: ByteSink + ?Sized>(
    sink: &mut S,
    step: EncodeStep,
    bytes: &[u8],
) -> Result<(), MidiWriteError> {
    let actual = sink
        .write_bytes(bytes)
        .map_err(|source| MidiWriteError::Sink { step, source })?;
    if actual != bytes.len() {
        return Err(MidiWriteError::ShortWrite {
            step,
            expected: bytes.len(),
            actual,
        });
    }
    Ok(())
}

/// The fixed MThd chunk.
pub fn header_chunk() -> [u8; HEADER_LEN] {
    let mut chunk = [0u8; HEADER_LEN];
    chunk[0..4].copy_from_slice(b"MThd");
    chunk[4..8].copy_from_slice(&6u32.to_be_bytes());
    chunk[8..10].copy_from_slice(&1u16.to_be_bytes()); // format
    chunk[10..12].copy_from_slice(&1u16.to_be_bytes()); // track count
    chunk[12..14].copy_from_slice(&TICKS_PER_QUARTER.to_be_bytes());
    chunk
}

pub fn note_event(note: &Note) -> [u8; NOTE_EVENT_LEN] {
    let [hi, lo] = note.duration.code().to_be_bytes();
    [
        0x00,
        NOTE_ON_CHANNEL_0,
        note.pitch,
        DEFAULT_VELOCITY,
        hi,
        lo,
        note.pitch,
        0x00,
    ]
}

/// Value of the MTrk length field for `riff`.
pub fn track_length_field(riff: &Riff, policy: TrackLength) -> Result<u32, MidiWriteError> {
    let len = match policy {
        TrackLength::NoteEventsOnly => riff.track_byte_size(),
        TrackLength::IncludeEndOfTrack => riff.track_byte_size() + END_OF_TRACK.len(),
    };
    u32::try_from(len).map_err(|_| MidiWriteError::TrackTooLong {
        notes: riff.notes().len(),
    })
}

/// Total bytes `encode_riff` writes for `riff`.
pub fn encoded_len(riff: &Riff) -> usize {
    HEADER_LEN + TRACK_HEADER_LEN + riff.track_byte_size() + END_OF_TRACK.len()
}

/// Encode `riff` with the default options. Returns the bytes written.
pub fn encode_riff<S: ByteSink + ?Sized>(
    riff: &Riff,
    sink: &mut S,
) -> Result<usize, MidiWriteError> {
    encode_riff_with(riff, sink, EncodeOptions::default())
}

pub fn encode_riff_with<S: ByteSink + ?Sized>(
    riff: &Riff,
    sink: &mut S,
    options: EncodeOptions,
) -> Result<usize, MidiWriteError> {
    let track_len = track_length_field(riff, options.track_length)?;

    write_exact(sink, EncodeStep::Header, &header_chunk())?;
    log::debug!("wrote {} ({HEADER_LEN} bytes)", EncodeStep::Header);

    write_exact(sink, EncodeStep::TrackId, b"MTrk")?;
    write_exact(sink, EncodeStep::TrackSize, &track_len.to_be_bytes())?;
    log::debug!("wrote MTrk header, declared length {track_len}");

    for (index, note) in riff.notes().iter().enumerate() {
        write_exact(sink, EncodeStep::NoteEvent { index }, &note_event(note))?;
        let Note { pitch, duration } = note;
        log::trace!("wrote note {index}: pitch {pitch:#04x} {duration}");
    }

    write_exact(sink, EncodeStep::EndOfTrack, &END_OF_TRACK)?;

    let total = encoded_len(riff);
    log::info!("encoded {} notes into {total} bytes", riff.notes().len());
    Ok(total)
}

/// Encode into a fresh buffer.
pub fn riff_to_bytes(riff: &Riff, options: EncodeOptions) -> Result<Vec<u8>, MidiWriteError> {
    let mut buf = Vec::with_capacity(encoded_len(riff));
    encode_riff_with(riff, &mut buf, options)?;
    Ok(buf)
}

/// Create (or truncate) `path` and write `riff` to it.
pub fn write_riff_file(
    riff: &Riff,
    path: &Path,
    options: EncodeOptions,
) -> Result<usize, MidiWriteError> {
    let file = File::create(path).map_err(|source| MidiWriteError::Sink {
        step: EncodeStep::Open,
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let written = encode_riff_with(riff, &mut writer, options)?;
    writer.flush().map_err(|source| MidiWriteError::Sink {
        step: EncodeStep::Flush,
        source,
    })?;
    Ok(written)
}
