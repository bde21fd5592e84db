mod input;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ensemble_core::{
    load_config, load_default_config, validate_config, AssignmentEngine, AssignmentError, Config,
    OutputFormat,
};

use input::CommandLineCounts;

/// Exit code when nothing was selected
const EXIT_EMPTY_SELECTION: i32 = 2;

#[derive(Parser)]
#[command(name = "ensemble")]
#[command(about = "Assign standardized ensemble parts to a group of instruments", long_about = None)]
#[command(version)]
struct Cli {
    /// Instrument counts as NAME=COUNT, e.g. "Violin=2" "Double Bass=1"
    selection: Vec<String>,

    /// Configuration file (TOML)
    #[arg(short, long, env = "ENSEMBLE_CONFIG")]
    config: Option<PathBuf>,

    /// JSON object of instrument counts, as submitted by a form
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Leave out the Sort Number column
    #[arg(long)]
    hide_sort_number: bool,

    /// Print the instrument catalog and exit
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        if let Some(AssignmentError::EmptySelection) = e.downcast_ref::<AssignmentError>() {
            eprintln!("{}", AssignmentError::EmptySelection);
            std::process::exit(EXIT_EMPTY_SELECTION);
        }
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Initialize logging; stdout carries the result, logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => load_default_config().context("Failed to load default configuration")?,
    };

    validate_config(&config).context("Configuration validation failed")?;
    debug!("Output format: {:?}", config.output.format);
    debug!("Instance limit: {}", config.limits.max_instances);

    let engine = AssignmentEngine::from_config(&config);

    if cli.list {
        print!("{}", render::render_catalog(engine.catalog()));
        return Ok(());
    }

    let counts = collect_counts(&cli, &config)?;
    let records = engine.assign(&counts)?;

    let format = cli.format.map(OutputFormat::from).unwrap_or(config.output.format);
    let show_sort_number = config.output.show_sort_number && !cli.hide_sort_number;

    match format {
        OutputFormat::Table => print!("{}", render::render_assignments(&records, show_sort_number)),
        OutputFormat::Json => println!("{}", render::render_json(&records)?),
    }

    Ok(())
}

fn collect_counts(cli: &Cli, config: &Config) -> Result<CommandLineCounts> {
    let mut counts = CommandLineCounts::new(&config.selection);
    if let Some(path) = &cli.input {
        counts.merge_json_file(path)?;
    }
    counts.merge_pairs(&cli.selection)?;

    if counts.is_empty() {
        debug!("No counts supplied on the command line, input file or config");
    }
    Ok(counts)
}
