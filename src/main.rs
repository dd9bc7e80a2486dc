use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use data2spiral::{refine, render, serial, Figure, Progress, RefineConfig};

#[derive(Parser)]
#[command(
    name = "data2spiral",
    about = "Binary data to self-avoiding spiral polylines"
)]
struct Cli {
    /// Input file path (raw bytes with --prepare, otherwise a figure file)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file path
    #[arg(short, long)]
    output: PathBuf,

    /// Build an unrefined figure from raw input bytes
    #[arg(short, long)]
    prepare: bool,

    /// Refine the figure's segment lengths
    #[arg(short, long)]
    generate: bool,

    /// Render the figure to an image instead of a figure file
    #[arg(short, long)]
    render: bool,

    /// Image format for --render
    #[arg(long, value_enum, default_value = "pbm")]
    format: Format,

    /// Perfection threshold (0 = no cap on geometric suggestions)
    #[arg(short = 'd', long, default_value = "1")]
    threshold: u32,

    /// Refine at most this many segments
    #[arg(long)]
    limit: Option<u32>,

    /// Image pixels per grid unit for PNG output
    #[arg(long, default_value = "4")]
    scale: u32,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Pbm,
    Svg,
    Png,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if !(cli.prepare || cli.generate || cli.render) {
        return Err("nothing to be done: pass --prepare, --generate or --render".into());
    }

    let input = fs::read(&cli.input)?;
    eprintln!();
    eprintln!("  data2spiral \u{00b7} {}", cli.input.display());
    eprintln!();

    let mut figure = if cli.prepare {
        let figure = Figure::begin(&input)?;
        eprintln!(
            "  Prepare     {} bytes \u{2192} {} segments",
            input.len(),
            figure.len()
        );
        figure
    } else {
        let figure = serial::load(&input)?;
        eprintln!("  Load        {} segments", figure.len());
        figure
    };

    if cli.generate {
        let config = RefineConfig {
            threshold: cli.threshold,
            max_segments: cli.limit.unwrap_or(u32::MAX),
            ..RefineConfig::default()
        };
        let quiet = cli.quiet;
        refine(
            &mut figure,
            &config,
            Some(&mut |_: &Figure, completed, target| {
                if !quiet {
                    eprint!("\r  Refine      {}/{} segments", completed, target);
                }
                Progress::Continue
            }),
        )?;
        if !quiet {
            eprintln!();
        }
        eprintln!(
            "  Refine      done, {} segments solved  ({}s)",
            figure.solved_count(),
            figure.seconds_spent()
        );
    }

    let output = if cli.render {
        let bytes = match cli.format {
            Format::Pbm => render::to_pbm(&figure)?,
            Format::Svg => render::to_svg(&figure)?.into_bytes(),
            Format::Png => render::to_png(&figure, cli.scale)?,
        };
        eprintln!(
            "  Render      {:?} \u{00b7} {} bytes",
            cli.format,
            bytes.len()
        );
        bytes
    } else {
        serial::dump(&figure)?
    };
    fs::write(&cli.output, output)?;

    eprintln!();
    eprintln!("  \u{2713} {}", cli.output.display());
    eprintln!();
    Ok(())
}
