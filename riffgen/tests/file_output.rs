// End-to-end tests: generate riffs, write them to disk, read them back.
//
// The corrected track-length variant is parsed with `midly` to check that a
// standard reader sees each fixed-shape event as a Note-On followed by its
// release after the duration's tick count.

use midly::num::{u4, u7, u15};
use midly::{Format, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use rand::SeedableRng;
use rand::rngs::StdRng;
use riffgen::midi::{EncodeOptions, EncodeStep, TrackLength, encoded_len, riff_to_bytes};
use riffgen::{
    MidiWriteError, Note, NoteDuration, PitchValue, Riff, RiffConfig, RiffParams, Scale, generate,
    write_riff_file,
};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("riffgen-{}-{name}.mid", std::process::id()))
}

fn corrected() -> EncodeOptions {
    EncodeOptions {
        track_length: TrackLength::IncludeEndOfTrack,
    }
}

#[test]
fn writes_expected_file() {
    let riff = Riff::from_notes(vec![Note {
        pitch: 0x3C,
        duration: NoteDuration::Quarter,
    }]);
    let path = temp_path("single");
    let written = write_riff_file(&riff, &path, EncodeOptions::default()).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(written, 34);
    assert_eq!(
        bytes,
        [
            0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x01, 0x01, 0xE0,
            0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x08, 0x00, 0x90, 0x3C, 0x40, 0x83, 0x60,
            0x3C, 0x00, 0x01, 0xFF, 0x2F, 0x00,
        ]
    );
}

#[test]
fn generated_riff_file_size() {
    let params = RiffParams {
        scale: Some(Scale::NaturalMinor),
        root: Some(PitchValue::D),
        note_count: Some(40),
        allowed_durations: None,
    };
    let riff = generate(&params, &mut StdRng::seed_from_u64(2024)).unwrap();
    let path = temp_path("generated");
    let written = write_riff_file(&riff, &path, EncodeOptions::default()).unwrap();
    let len = std::fs::metadata(&path).unwrap().len();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(written, 14 + 8 + 8 * 40 + 4);
    assert_eq!(len as usize, written);
}

#[test]
fn unopenable_destination_is_a_sink_error() {
    let riff = Riff::from_notes(Vec::new());
    let path = std::env::temp_dir()
        .join(format!("riffgen-missing-{}", std::process::id()))
        .join("out.mid");
    let err = write_riff_file(&riff, &path, EncodeOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        MidiWriteError::Sink {
            step: EncodeStep::Open,
            ..
        }
    ));
}

#[test]
fn corrected_variant_parses_as_standard_midi() {
    let riff = Riff::from_notes(vec![Note {
        pitch: 0x3C,
        duration: NoteDuration::Quarter,
    }]);
    let bytes = riff_to_bytes(&riff, corrected()).unwrap();
    let smf = Smf::parse(&bytes).unwrap();

    assert_eq!(smf.header.format, Format::Parallel);
    assert_eq!(smf.header.timing, Timing::Metrical(u15::new(480)));
    assert_eq!(smf.tracks.len(), 1);

    let track = &smf.tracks[0];
    assert_eq!(track.len(), 3);
    assert_eq!(track[0].delta.as_int(), 0);
    assert_eq!(
        track[0].kind,
        TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::NoteOn {
                key: u7::new(0x3C),
                vel: u7::new(0x40),
            },
        }
    );
    assert_eq!(track[1].delta.as_int(), 480);
    assert_eq!(
        track[1].kind,
        TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::NoteOn {
                key: u7::new(0x3C),
                vel: u7::new(0),
            },
        }
    );
    assert_eq!(track[2].delta.as_int(), 1);
    assert_eq!(track[2].kind, TrackEventKind::Meta(MetaMessage::EndOfTrack));
}

#[test]
fn duration_codes_read_back_as_tick_counts() {
    let expected_ticks = [
        (NoteDuration::Whole, 1920),
        (NoteDuration::Half, 960),
        (NoteDuration::Quarter, 480),
        (NoteDuration::Eighth, 240),
        (NoteDuration::Sixteenth, 120),
        (NoteDuration::ThirtySecond, 60),
        (NoteDuration::SixtyFourth, 30),
    ];
    for (duration, ticks) in expected_ticks {
        let riff = Riff::from_notes(vec![Note {
            pitch: 0x45,
            duration,
        }]);
        let bytes = riff_to_bytes(&riff, corrected()).unwrap();
        let smf = Smf::parse(&bytes).unwrap();
        let release = &smf.tracks[0][1];
        assert_eq!(release.delta.as_int(), ticks, "{duration}");
        match &release.kind {
            TrackEventKind::Midi {
                message: MidiMessage::NoteOn { key, vel },
                ..
            } => {
                assert_eq!((key.as_int(), vel.as_int()), (0x45, 0), "{duration}");
            }
            TrackEventKind::Midi {
                message: MidiMessage::NoteOff { key, .. },
                ..
            } => {
                assert_eq!(key.as_int(), 0x45, "{duration}");
            }
            other => panic!("{duration}: expected a note release, got {other:?}"),
        }
    }
}

#[test]
fn generated_corrected_riff_parses() {
    let config = RiffConfig::from_json(
        r#"{"scale": "major", "root": "G#", "note_count": 64, "seed": 5,
            "track_length": "include-end-of-track"}"#,
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap());
    let riff = generate(&config.params(), &mut rng).unwrap();
    let bytes = riff_to_bytes(&riff, config.encode_options()).unwrap();
    assert_eq!(bytes.len(), encoded_len(&riff));

    let smf = Smf::parse(&bytes).unwrap();
    // Two events per note plus the end marker.
    assert_eq!(smf.tracks[0].len(), 2 * 64 + 1);
}
