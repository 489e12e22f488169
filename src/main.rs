use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gantt_timeline::chart::RowMetrics;
use gantt_timeline::config::Settings;
use gantt_timeline::session::{sample_json, sample_tasks};
use gantt_timeline::{io, ChartSession, OverlayMode, TaskKey};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Lay out Gantt charts from JSON or CSV task lists",
    long_about = None
)]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Settings file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that every dependency exists and ends before its dependent starts
    Validate { file: PathBuf },

    /// Print the chart layout and overlay decisions as JSON
    Layout {
        file: PathBuf,

        /// Overlay mode: hidden, hover, click or all
        #[arg(long)]
        mode: Option<OverlayMode>,

        /// Task under the pointer (hover mode)
        #[arg(long)]
        hover: Option<TaskKey>,

        /// Selected task, repeatable (click mode)
        #[arg(long = "select")]
        selected: Vec<TaskKey>,

        /// Reference chart width in pixels for arrow geometry
        #[arg(long)]
        width: Option<f32>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the built-in sample project
    Sample {
        #[arg(long)]
        csv: bool,
    },

    /// Convert between JSON and CSV task lists (by file extension)
    Convert { input: PathBuf, output: PathBuf },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    match cli.command {
        Command::Validate { file } => {
            let tasks = io::load_any(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            match gantt_timeline::model::validate_dependencies(&tasks) {
                Ok(()) => println!("ok ({} tasks)", tasks.len()),
                Err(err) if err.is_validation() => {
                    anyhow::bail!("invalid dependencies in {}: {err}", file.display())
                }
                Err(err) => return Err(err.into()),
            }
        }

        Command::Layout {
            file,
            mode,
            hover,
            selected,
            width,
            compact,
        } => {
            let mut session = ChartSession::new(&settings);
            if let Some(width) = width {
                session.metrics = RowMetrics::with_width(width);
            }
            session.open(&file)?;

            let mode = mode.unwrap_or(if selected.is_empty() {
                settings.default_mode
            } else {
                OverlayMode::Click
            });
            session.set_mode(mode);
            session.hover_task(hover);
            for key in selected {
                session.toggle_task_selection(key);
            }

            let output = serde_json::json!({
                "layout": session.layout,
                "overlay": session.overlay_view(),
            });
            let text = if compact || !settings.pretty_output {
                serde_json::to_string(&output)?
            } else {
                serde_json::to_string_pretty(&output)?
            };
            println!("{text}");
        }

        Command::Sample { csv } => {
            if csv {
                print!("{}", io::export_csv_string(&sample_tasks())?);
            } else {
                println!("{}", sample_json());
            }
        }

        Command::Convert { input, output } => {
            let tasks = io::load_any(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            io::save_any(&tasks, &output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            eprintln!("Converted {} tasks to {}", tasks.len(), output.display());
        }
    }

    Ok(())
}
