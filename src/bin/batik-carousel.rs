use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use batik_carousel::{CarouselError, Cursor, Deck, Script, parallax_offset};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "batik-carousel", version, about = "Inspect and simulate carousel decks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a deck, then print a summary.
    Validate(ValidateArgs),
    /// Print the parallax offset of every layer of a slide for a cursor position.
    Parallax(ParallaxArgs),
    /// Replay a timed event script and emit stage snapshots as JSON lines.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input deck JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ParallaxArgs {
    /// Input deck JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Slide index (0-based).
    #[arg(long, default_value_t = 0)]
    slide: usize,

    /// Normalized cursor x in [0, 1].
    #[arg(long, default_value_t = 0.5)]
    x: f64,

    /// Normalized cursor y in [0, 1].
    #[arg(long, default_value_t = 0.5)]
    y: f64,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input deck JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Event script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Sampling step in milliseconds.
    #[arg(long, default_value_t = 100)]
    step_ms: u64,

    /// Output JSON lines path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Parallax(args) => cmd_parallax(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_deck(path: &Path) -> anyhow::Result<Deck> {
    let deck = Deck::from_path(path)?;
    deck.validate()
        .with_context(|| format!("validate deck '{}'", path.display()))?;
    Ok(deck)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let deck = load_deck(&args.in_path)?;
    println!(
        "ok: {} slides, autoplay every {} ms",
        deck.len(),
        deck.autoplay_interval_ms
    );
    for (i, slide) in deck.slides.iter().enumerate() {
        println!(
            "  [{i}] {} ({} layers, background {})",
            slide.key,
            slide.parallax_layers.len(),
            slide.background.resolved().image
        );
    }
    Ok(())
}

fn cmd_parallax(args: ParallaxArgs) -> anyhow::Result<()> {
    let deck = load_deck(&args.in_path)?;
    let slide = deck.slides.get(args.slide).with_context(|| {
        format!(
            "slide {} out of range (deck has {})",
            args.slide,
            deck.len()
        )
    })?;
    if !(0.0..=1.0).contains(&args.x) || !(0.0..=1.0).contains(&args.y) {
        anyhow::bail!("cursor must be within [0, 1], got ({}, {})", args.x, args.y);
    }
    let cursor = Cursor {
        x: args.x,
        y: args.y,
    };
    for layer in &slide.parallax_layers {
        let offset = parallax_offset(cursor, layer.depth);
        println!(
            "{}\tdepth={}\tdx={:.3}\tdy={:.3}",
            layer.source, layer.depth, offset.x, offset.y
        );
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let deck = load_deck(&args.in_path)?;
    let script = Script::from_path(&args.script)?;

    let mut out: Box<dyn Write> = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let stats = script.replay(deck, args.step_ms, |snap| {
        serde_json::to_writer(&mut out, snap)?;
        out.write_all(b"\n")
            .map_err(|e| CarouselError::Other(e.into()))
    })?;
    out.flush().context("flush snapshots")?;

    eprintln!(
        "simulated: {} transitions, {} skipped, {} by autoplay",
        stats.transitions, stats.skipped_transitions, stats.autoplay_advances
    );
    Ok(())
}
