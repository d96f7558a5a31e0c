// Riff generator CLI entry point.
//
// Generates a random riff and writes it to a MIDI file. The pipeline:
// settings (config file, then flags) → riff generation → MIDI output.
//
// Usage:
//   cargo run -p riffgen -- [output.mid] [--scale SCALE --root PITCH]
//     [--notes N] [--rhythm LIST] [--seed N] [--config FILE] [--conformant]
//
// Set RUST_LOG=debug to trace each write step.

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use riffgen::midi::{encoded_len, write_riff_file};
use riffgen::{NoteDuration, PitchValue, RiffConfig, Scale, TrackLength, generate};
use std::path::PathBuf;

/// Upper bound on the note count, from `--notes` or a config file.
const MAX_NOTES: usize = 8161;

#[derive(Debug, Parser)]
#[command(name = "generate", about = "Generate a random riff as a MIDI file")]
struct Args {
    /// Output file (default: riff.mid)
    output: Option<PathBuf>,

    /// Scale to draw pitches from; needs --root
    #[arg(long)]
    scale: Option<Scale>,

    /// Root pitch of the scale, e.g. A, C#, Eb
    #[arg(long)]
    root: Option<PitchValue>,

    /// Number of notes (default: random 1-16)
    #[arg(
        long,
        value_parser = clap::value_parser!(u16).range(1..=MAX_NOTES as i64)
    )]
    notes: Option<u16>,

    /// Comma-separated allowed durations, e.g. quarter,eighth or 1/4,1/8
    #[arg(long, value_delimiter = ',')]
    rhythm: Vec<NoteDuration>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Count the end-of-track marker in the track length
    #[arg(long)]
    conformant: bool,

    /// List scales, roots and durations, then exit
    #[arg(long)]
    list: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if args.list {
        print_choices();
        return;
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| PathBuf::from("riff.mid"));
    let config = settings(&args)?;

    println!("=== Riff Generator ===");
    println!("Output: {}", output.display());
    match (config.scale, config.root) {
        (Some(scale), Some(root)) => println!("Scale: {scale} on {root}"),
        _ => println!("Scale: chromatic"),
    }
    if let Some(seed) = config.seed {
        println!("Seed: {seed}");
    }
    println!();

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!("[1/2] Generating riff...");
    let riff = generate(&config.params(), &mut rng).context("cannot generate riff")?;
    let count = riff.notes().len();
    let names: Vec<&str> = riff.allowed_durations().iter().map(|d| d.name()).collect();
    println!("  {count} notes, durations: {}", names.join(", "));

    let shown = output.display();
    println!("[2/2] Writing MIDI to {shown}...");
    let written = write_riff_file(&riff, &output, config.encode_options())
        .with_context(|| format!("an error occurred while writing {shown}"))?;
    debug_assert_eq!(written, encoded_len(&riff));
    println!("  Done! {written} bytes written.");
    println!();
    println!("Play with: timidity {shown} (or any MIDI player)");
    Ok(())
}

/// Config file values overlaid with command-line flags.
fn settings(args: &Args) -> Result<RiffConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let shown = path.display();
            match RiffConfig::load(path) {
                Ok(config) => config,
                Err(e) => bail!("cannot load config {shown}: {e}"),
            }
        }
        None => RiffConfig::default(),
    };

    if args.scale.is_some() {
        config.scale = args.scale;
    }
    if args.root.is_some() {
        config.root = args.root;
    }
    if let Some(n) = args.notes {
        config.note_count = Some(n.into());
    }
    if !args.rhythm.is_empty() {
        config.allowed_durations = Some(args.rhythm.clone());
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.conformant {
        config.track_length = TrackLength::IncludeEndOfTrack;
    }
    if let Some(count) = config.note_count.filter(|n| !(1..=MAX_NOTES).contains(n)) {
        bail!("note count {count} is outside 1..={MAX_NOTES}");
    }
    Ok(config)
}

fn print_choices() {
    println!("Scales:");
    for scale in Scale::ALL {
        println!("  {scale}");
    }
    println!("Roots:");
    for pitch in PitchValue::ALL {
        let synonyms = pitch.synonyms().join(", ");
        println!("  {:<3} ({synonyms})", pitch.display_name());
    }
    println!("Durations:");
    for duration in NoteDuration::ALL {
        println!("  {:<14} {}", duration.name(), duration.fraction());
    }
}
