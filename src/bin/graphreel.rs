use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "graphreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a graph as a static figure.
    Draw(DrawArgs),
    /// Render a graph as an interactive network.
    Interact(InteractArgs),
    /// Animate a sequence of graph snapshots.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct Output {
    /// Theme JSON; missing keys use the defaults.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct DrawArgs {
    /// Input graph JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    output: Output,
}

#[derive(Parser, Debug)]
struct InteractArgs {
    /// Input graph JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Let nodes move under the physics simulation.
    #[arg(long)]
    physics: bool,

    #[command(flatten)]
    output: Output,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Snapshot JSON, one per frame, in order.
    #[arg(long = "in", required = true, num_args = 1..)]
    in_paths: Vec<PathBuf>,

    /// Canvas width shared by all frames.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height shared by all frames.
    #[arg(long)]
    height: Option<u32>,

    #[command(flatten)]
    output: Output,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Draw(args) => cmd_draw(args),
        Command::Interact(args) => cmd_interact(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn read_graph(path: &Path) -> anyhow::Result<graphreel::Graph> {
    graphreel::Graph::from_path(path).with_context(|| format!("load graph '{}'", path.display()))
}

fn read_theme(path: Option<&Path>) -> anyhow::Result<graphreel::Theme> {
    match path {
        None => Ok(graphreel::Theme::default()),
        Some(path) => graphreel::Theme::from_path(path)
            .with_context(|| format!("load theme '{}'", path.display())),
    }
}

fn write_json(output: &Output, value: &impl serde::Serialize) -> anyhow::Result<()> {
    let json = if output.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serialize output")?;

    match &output.out {
        None => println!("{json}"),
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("write output '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn cmd_draw(args: DrawArgs) -> anyhow::Result<()> {
    let graph = read_graph(&args.in_path)?;
    let theme = read_theme(args.output.theme.as_deref())?;
    let rendered = graphreel::draw(&graph, &theme)?;
    write_json(&args.output, &rendered.figure)
}

fn cmd_interact(args: InteractArgs) -> anyhow::Result<()> {
    let graph = read_graph(&args.in_path)?;
    let theme = read_theme(args.output.theme.as_deref())?;
    let network = graphreel::interact(&graph, &theme, args.physics)?;
    write_json(&args.output, &network)
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let theme = read_theme(args.output.theme.as_deref())?;
    let mut anim = graphreel::Animation::with_size(args.width, args.height)?.with_theme(theme);
    for path in &args.in_paths {
        anim.rec(&read_graph(path)?);
    }
    let rendered = anim.play()?;
    write_json(&args.output, &rendered.figure)
}
