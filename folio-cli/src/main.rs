use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an input script and print the final stage snapshot as JSON.
    Run(RunArgs),
    /// Print the effective stage layout as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Stage layout JSON (defaults to the shipped page).
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Write the snapshot here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Log phase changes and ignored input to stderr.
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Layout JSON to validate and fill with defaults.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "folio=debug" } else { "folio=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_layout(path: Option<&PathBuf>) -> anyhow::Result<folio::StageLayout> {
    let Some(path) = path else {
        return Ok(folio::StageLayout::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read layout '{}'", path.display()))?;
    folio::StageLayout::from_json_str(&text)
        .with_context(|| format!("parse layout '{}'", path.display()))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    init_logging(args.verbose);
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }

    let layout = load_layout(args.layout.as_ref())?;
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read script '{}'", args.script.display()))?;
    let script = folio::Script::from_json_str(&text)
        .with_context(|| format!("parse script '{}'", args.script.display()))?;

    let mut stage = folio::Stage::new(layout)?;
    let frame = Duration::from_secs(1) / args.fps;
    let snapshot = folio::run_script(&mut stage, &script, frame)?;
    tracing::info!(phase = ?snapshot.phase, frames = snapshot.frames, "replay done");

    let json = serde_json::to_string_pretty(&snapshot)?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json)
                .with_context(|| format!("write snapshot '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let layout = load_layout(args.in_path.as_ref())?;
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}
