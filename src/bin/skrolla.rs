use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "skrolla", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a page manifest and summarize its animated elements.
    Inspect(InspectArgs),
    /// Evaluate every element at a single scroll offset.
    Sample(SampleArgs),
    /// Evaluate a scroll sweep and emit the style updates per step.
    Sweep(SweepArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input page manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input page manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scroll offset in pixels.
    #[arg(long)]
    offset: f64,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    viewport_width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 800.0)]
    viewport_height: f64,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Input page manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First scroll offset of the sweep.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last scroll offset of the sweep.
    #[arg(long)]
    to: f64,

    /// Number of samples, spaced evenly and timed at 60 per second.
    #[arg(long, default_value_t = 120)]
    steps: u32,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    viewport_width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 800.0)]
    viewport_height: f64,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, serde::Serialize)]
struct SweepStep {
    offset: f64,
    updates: Vec<skrolla::StyleUpdate>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Sweep(args) => cmd_sweep(args),
    }
}

fn read_page_json(path: &Path) -> anyhow::Result<skrolla::Page> {
    let f = File::open(path).with_context(|| format!("open page manifest '{}'", path.display()))?;
    let r = BufReader::new(f);
    let page: skrolla::Page = serde_json::from_reader(r).with_context(|| "parse page JSON")?;
    Ok(page)
}

fn build_stage(
    page: &skrolla::Page,
    width: f64,
    height: f64,
) -> anyhow::Result<(skrolla::Stage, Vec<skrolla::BindingId>)> {
    let viewport = skrolla::Viewport::new(width, height)?;
    let mut stage = skrolla::Stage::new(viewport);
    let ids = stage.mount_page(page)?;
    Ok((stage, ids))
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let page = read_page_json(&args.in_path)?;
    page.validate()?;

    println!("page: {}", page.title);
    if let Some(hero) = &page.hero {
        println!("hero: {} ({} layers)", hero.heading, hero.layers.len());
    }
    for showcase in &page.showcases {
        let items = showcase
            .sequence
            .as_ref()
            .map_or(0, |sequence| sequence.items.len());
        println!(
            "showcase {}: {} blocks, {} sequence items",
            showcase.id,
            showcase.blocks.len(),
            items
        );
    }
    println!("projects: {}", page.projects.len());

    let (stage, _) = build_stage(&page, 1280.0, 800.0)?;
    println!("mounted elements: {}", stage.element_count());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let page = read_page_json(&args.in_path)?;
    let (mut stage, _) = build_stage(&page, args.viewport_width, args.viewport_height)?;

    let updates = stage.sample_scroll(args.offset, 0.0);
    println!("{}", serde_json::to_string_pretty(&updates)?);
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    if args.steps < 2 {
        anyhow::bail!("sweep needs at least 2 steps");
    }

    let page = read_page_json(&args.in_path)?;
    let (mut stage, _) = build_stage(&page, args.viewport_width, args.viewport_height)?;

    let mut steps = Vec::with_capacity(args.steps as usize);
    for i in 0..args.steps {
        let t = f64::from(i) / (f64::from(args.steps) - 1.0);
        let offset = skrolla::lerp(args.from, args.to, t);
        let updates = stage.sample_scroll(offset, f64::from(i) / 60.0);
        steps.push(SweepStep { offset, updates });
    }

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(out)
                .with_context(|| format!("write sweep '{}'", out.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(f), &steps)?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&steps)?),
    }
    Ok(())
}
