//! Benchboard CLI
//!
//! Terminal rendering of the benchmark views:
//! - Show the update date and hardware
//! - List every framework's results
//! - Compare selected frameworks
//! - Generate a config file

use benchboard::config::{generate_default_config, Config};
use benchboard::controller::{AppState, Controller, SharedState};
use benchboard::decorate::{ColorSampler, RandomColors, SeededColors};
use benchboard::source::{DynSource, HttpSource, JsonFileSource};
use benchboard::views::{format_value, parse_selection, CompareView, HomeView, ResultView};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "benchboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Web framework benchmark results in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Revision to load (default: configured default revision)
    #[arg(long, global = true)]
    pub sha: Option<String>,

    /// Data URL template with a {revision} placeholder
    #[arg(long, global = true)]
    pub data_url: Option<String>,

    /// Read the benchmark payload from a local JSON file instead
    #[arg(long, global = true, conflicts_with = "data_url")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Seed for reproducible chart colors
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the update date and the benchmark hardware
    Home,

    /// List every framework with its colors and metrics
    Result,

    /// Compare frameworks side by side (all when none are given)
    Compare {
        /// Framework labels, e.g. actix gin
        frameworks: Vec<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let (mut config, problems) = Config::load_default();
    if let Some(url) = &cli.data_url {
        config.source.data_url = url.clone();
    }
    benchboard::logging::init(&config.logging);
    for problem in &problems {
        tracing::warn!("{}, using defaults", problem);
    }

    let source: DynSource = match &cli.file {
        Some(path) => Arc::new(JsonFileSource::new(path)),
        None => Arc::new(HttpSource::new(
            &config.source.data_url,
            config.source.request_timeout(),
        )?),
    };
    let colors: Box<dyn ColorSampler + Send + Sync> = match cli.seed {
        Some(seed) => Box::new(SeededColors::new(seed)),
        None => Box::new(RandomColors),
    };

    let controller = Controller::with_colors(source, SharedState::new(), colors);
    let revision = cli
        .sha
        .clone()
        .filter(|sha| !sha.is_empty())
        .unwrap_or_else(|| config.source.default_revision.clone());

    if let Err(e) = controller.fetch_benchmark_data(&revision, true).await {
        eprintln!("Failed to load benchmark data for {}: {}", revision, e);
        std::process::exit(1);
    }

    let state = controller.store().snapshot();
    match cli.command {
        Commands::Home => print_home(&HomeView::from_state(&state), &state, cli.format)?,
        Commands::Result => print_result(&ResultView::new(&state.benchmarks), cli.format)?,
        Commands::Compare { frameworks } => {
            let selection: Vec<String> = frameworks
                .iter()
                .flat_map(|f| parse_selection(f))
                .collect();
            print_compare(&CompareView::new(&state.benchmarks, &selection), cli.format)?
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn print_home(view: &HomeView, state: &AppState, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    println!("Benchboard v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!(
        "Revision:     {}",
        state.revision.as_deref().unwrap_or("unknown")
    );
    println!("Last updated: {}", view.updated_at);
    println!("Frameworks:   {}", state.benchmarks.len());

    if !view.hardware.is_empty() {
        println!();
        println!("Hardware:");
        let width = view.hardware.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in &view.hardware {
            println!("  {:<width$}  {}", key, value, width = width);
        }
    }
    Ok(())
}

fn print_result(view: &ResultView, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    if view.entries.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let mut header = vec!["Framework".to_string(), "Color".to_string()];
    header.extend(view.metric_names.iter().cloned());

    let rows: Vec<Vec<String>> = view
        .entries
        .iter()
        .map(|entry| {
            let mut row = vec![entry.label.clone(), entry.color.clone()];
            row.extend(
                view.metric_names
                    .iter()
                    .map(|metric| format_value(entry.metric(metric))),
            );
            row
        })
        .collect();

    print_table(&header, &rows);
    println!();
    println!("{} frameworks", view.entries.len());
    Ok(())
}

fn print_compare(view: &CompareView, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    if view.columns.is_empty() {
        println!("No matching frameworks.");
        return Ok(());
    }

    let mut header = vec!["Metric".to_string()];
    header.extend(view.columns.iter().map(|c| c.label.clone()));

    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.metric.clone()];
            cells.extend(row.values.iter().map(|v| format_value(*v)));
            cells
        })
        .collect();

    print_table(&header, &rows);
    Ok(())
}

fn print_table(header: &[String], rows: &[Vec<String>]) {
    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(String::len)
                .chain(std::iter::once(header[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", line(header));
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    );
    for row in rows {
        println!("{}", line(row.as_slice()));
    }
}
