// File: crates/demo/src/main.rs
// Summary: Demo loads a downloads fixture, builds chart datasets and draws them once the chart library is ready.

mod input;
mod sparkline;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use graph_core::{
    ChartLibraryLoader, DownloadGraph, GraphConfig, GraphView, ProcessReload, Transformer,
};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use crate::sparkline::SparklineFetcher;

#[derive(Parser, Debug)]
#[command(name = "download-graph-demo", about = "Chart per-version crate downloads")]
struct Args {
    /// Downloads fixture: `.json` (versions + API payload) or `.csv`
    input: PathBuf,

    /// TOML config (window mode, palette, loader timeout, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Last day of the chart (YYYY-MM-DD); defaults to the latest record
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Print chart datasets as JSON instead of drawing them
    #[arg(long)]
    json: bool,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File holding the sparkline glyph ramp
    #[arg(long)]
    glyphs: Option<PathBuf>,

    /// Restart the process if the chart library fails to load
    #[arg(long)]
    reload_on_error: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GraphConfig::from_toml_str(&raw)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => GraphConfig::default(),
    };

    let input = input::load(&args.input)
        .with_context(|| format!("failed to load '{}'", args.input.display()))?;

    let mut transformer = Transformer::from_config(&config);
    if let Some(today) = args.today {
        transformer = transformer.with_today(today);
    }

    // One loader for the whole process.
    let loader = Arc::new(
        ChartLibraryLoader::new(SparklineFetcher::new(args.glyphs.clone()), Arc::new(ProcessReload))
            .with_settings(&config.loader),
    );
    let graph = DownloadGraph::from_records(loader, &transformer, &input.records, &input.extra)?;
    info!(series = graph.data().datasets.len(), "chart data ready");

    if args.json {
        let json = serde_json::to_string_pretty(graph.data())?;
        return emit(&args.output, &json);
    }

    match graph.ready().await {
        GraphView::Chart { library, data } => {
            if data.is_empty() {
                println!("No downloads to chart.");
                return Ok(());
            }
            emit(&args.output, &library.render(&data))
        }
        GraphView::Error { failure } => {
            if args.reload_on_error {
                graph.reload();
            }
            anyhow::bail!("chart library unavailable: {failure} (reload to try again)");
        }
        GraphView::Spinner => anyhow::bail!("chart library still loading after settle"),
    }
}

fn emit(output: &Option<PathBuf>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("graph_core={level},download_graph_demo={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
