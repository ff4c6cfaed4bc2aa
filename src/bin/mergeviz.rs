use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_VALUES: &str = "3, 7, 6, -10, 15, 23.5, 55, -13";

#[derive(Parser, Debug)]
#[command(name = "mergeviz", version, about = "Animated merge sort")]
struct Cli {
    /// Layout/timing/output settings (JSON). Missing fields keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    input: InputArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Values to sort, e.g. "3,7,6". Integers and decimals may be mixed.
    #[arg(long, global = true, conflicts_with = "input")]
    values: Option<String>,

    /// JSON file holding an array of numbers to sort.
    #[arg(long, global = true)]
    input: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the narration lines in order.
    Narrate,
    /// Dump the sort event log as JSON.
    Events(EventsArgs),
    /// Build the animation timeline and write it as scene JSON.
    Scene(SceneArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct EventsArgs {
    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Output scene JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render this scene JSON instead of building one from the input values.
    #[arg(long)]
    scene: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Render this scene JSON instead of building one from the input values.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Overwrite output if it already exists.
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Narrate => cmd_narrate(&cli.input),
        Command::Events(args) => cmd_events(&cli.input, args),
        Command::Scene(args) => cmd_scene(&cli.input, &config, args),
        Command::Frame(args) => cmd_frame(&cli.input, &config, args),
        Command::Render(args) => cmd_render(&cli.input, &config, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<mergeviz::Config> {
    match path {
        Some(p) => mergeviz::Config::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(mergeviz::Config::default()),
    }
}

fn read_values(input: &InputArgs) -> anyhow::Result<mergeviz::Sequence> {
    if let Some(path) = &input.input {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read input '{}'", path.display()))?;
        return mergeviz::Sequence::from_json_str(&s)
            .with_context(|| format!("parse input '{}'", path.display()));
    }
    let text = input.values.as_deref().unwrap_or(DEFAULT_VALUES);
    mergeviz::Sequence::parse(text).with_context(|| format!("parse values '{text}'"))
}

fn build_scene(
    input: &InputArgs,
    config: &mergeviz::Config,
) -> anyhow::Result<mergeviz::Scene> {
    let seq = read_values(input)?;
    let stage = mergeviz::TimelineStage::new(config)?;
    let mut viz = mergeviz::MergeSortVisualizer::new(stage, config);
    viz.run(&seq)?;
    Ok(viz.into_stage().finish()?)
}

fn load_or_build_scene(
    scene: Option<&Path>,
    input: &InputArgs,
    config: &mergeviz::Config,
) -> anyhow::Result<mergeviz::Scene> {
    match scene {
        Some(p) => mergeviz::Scene::from_path(p)
            .with_context(|| format!("load scene '{}'", p.display())),
        None => build_scene(input, config),
    }
}

fn write_output(out: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, bytes).with_context(|| format!("write '{}'", out.display()))
}

fn cmd_narrate(input: &InputArgs) -> anyhow::Result<()> {
    let seq = read_values(input)?;
    let mut stdout = std::io::stdout().lock();
    for event in mergeviz::MergeSortEvents::new(seq)? {
        writeln!(stdout, "{}", event.narration())?;
    }
    Ok(())
}

fn cmd_events(input: &InputArgs, args: EventsArgs) -> anyhow::Result<()> {
    let trace = mergeviz::trace(read_values(input)?)?;
    let json = serde_json::to_string_pretty(&trace).context("serialize events")?;
    match args.out {
        Some(out) => {
            write_output(&out, json.as_bytes())?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_scene(
    input: &InputArgs,
    config: &mergeviz::Config,
    args: SceneArgs,
) -> anyhow::Result<()> {
    let scene = build_scene(input, config)?;
    let json = serde_json::to_string_pretty(&scene).context("serialize scene")?;
    write_output(&args.out, json.as_bytes())?;
    eprintln!(
        "wrote {} ({} frames, {} objects)",
        args.out.display(),
        scene.duration.0,
        scene.objects.len()
    );
    Ok(())
}

fn cmd_frame(
    input: &InputArgs,
    config: &mergeviz::Config,
    args: FrameArgs,
) -> anyhow::Result<()> {
    let scene = load_or_build_scene(args.scene.as_deref(), input, config)?;
    let rasterizer = mergeviz::Rasterizer::new();
    let frame = mergeviz::render_frame(&scene, mergeviz::FrameIndex(args.frame), &rasterizer)?;
    mergeviz::save_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(
    input: &InputArgs,
    config: &mergeviz::Config,
    args: RenderArgs,
) -> anyhow::Result<()> {
    let scene = load_or_build_scene(args.scene.as_deref(), input, config)?;
    let rasterizer = mergeviz::Rasterizer::new();
    let opts = mergeviz::RenderToMp4Opts {
        range: None,
        overwrite: args.overwrite,
    };
    mergeviz::render_to_mp4(&scene, &args.out, opts, &rasterizer)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
