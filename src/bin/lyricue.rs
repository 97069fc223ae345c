use std::{
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lyricue", version)]
struct Cli {
    /// Log parser and evaluator diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an LRC file and print its cues.
    Cues(CuesArgs),
    /// Evaluate a single frame of a scene as JSON.
    Frame(FrameArgs),
    /// Evaluate a range of frames, one JSON object per line.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct CuesArgs {
    /// Input LRC file.
    #[arg(long)]
    lrc: PathBuf,

    /// Inline tag marking emphasized lines (repeatable, defaults to chorus and sabi).
    #[arg(long = "emphasis-tag")]
    emphasis_tags: Vec<String>,

    /// Print normalized LRC instead of JSON.
    #[arg(long)]
    lrc_out: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Input scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    from: u64,

    /// Last frame (exclusive); defaults to the scene duration.
    #[arg(long)]
    to: Option<u64>,

    /// Evaluate frames on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Cues(args) => cmd_cues(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn load_runtime(path: &Path) -> anyhow::Result<lyricue::SceneRuntime> {
    lyricue::SceneRuntime::from_path(path)
        .with_context(|| format!("load scene '{}'", path.display()))
}

fn cmd_cues(args: CuesArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.lrc)
        .with_context(|| format!("read lyrics '{}'", args.lrc.display()))?;
    let mut opts = lyricue::ParseOptions::default();
    if !args.emphasis_tags.is_empty() {
        opts.emphasis_tags = args.emphasis_tags;
    }
    let report = lyricue::parse_with_report(&raw, &opts);
    if report.skipped_lines > 0 || report.dropped_empty > 0 {
        eprintln!(
            "skipped {} untimed line(s), dropped {} empty cue(s)",
            report.skipped_lines, report.dropped_empty
        );
    }

    if args.lrc_out {
        print!("{}", report.cues.to_lrc());
    } else {
        let json = serde_json::to_string_pretty(&report.cues).context("serialize cues")?;
        println!("{json}");
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let rt = load_runtime(&args.scene)?;
    let state = lyricue::Evaluator::eval_frame(&rt, lyricue::FrameIndex(args.frame))?;
    let json = serde_json::to_string_pretty(&state).context("serialize frame state")?;
    println!("{json}");
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let rt = load_runtime(&args.scene)?;
    let to = args.to.unwrap_or(rt.scene.duration);
    let range = lyricue::FrameRange::new(lyricue::FrameIndex(args.from), lyricue::FrameIndex(to))?;
    let threading = lyricue::EvalThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let states = lyricue::Evaluator::eval_frames(&rt, range, &threading)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for state in &states {
        serde_json::to_writer(&mut out, state).context("serialize frame state")?;
        out.write_all(b"\n").context("write stdout")?;
    }
    out.flush().context("flush stdout")?;
    eprintln!("evaluated {} frame(s)", states.len());
    Ok(())
}
