//! MassBudget - mass budget calculator for engineering-model iterations
//!
//! A CLI tool that walks an engineering-model iteration, sums the
//! published values of every `<element>.m` parameter, and reports the
//! total mass with a per-element breakdown.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad data file, unknown model/iteration, parse failure)

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod source;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use report::{MassReport, ReportMetadata};
use source::{JsonFileSource, ModelSource};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("MassBudget v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Mass computation failed: {}", e);
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .massbudget.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".massbudget.toml");

    if path.exists() {
        eprintln!(".massbudget.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .massbudget.toml")?;

    println!("Created .massbudget.toml with default settings.");
    println!("Edit it to set the data file, model, and report format.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete workflow.
fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Load the model data file
    let data_path = resolve_data_path(&config)?;
    info!("Loading model data from: {}", data_path.display());

    let mut model_source = JsonFileSource::load(&data_path)
        .with_context(|| format!("Failed to load model data from {}", data_path.display()))?;

    // Handle --list: show models and iterations, no aggregation
    if args.list {
        return handle_list(&model_source);
    }

    let model_short_name = config
        .data
        .model
        .clone()
        .context("No engineering model specified (use --model or the config file)")?;
    let iteration_number = config.data.iteration;

    // Step 2: Fetch the iteration and walk it
    model_source.clear();

    let iteration = model_source
        .engineering_model_iteration(&model_short_name, iteration_number)
        .context("Iteration lookup failed")?;

    info!(
        "Computing mass budget for {} iteration {} ({} elements)",
        model_short_name,
        iteration_number,
        iteration.elements.len()
    );

    let breakdown = analysis::aggregate_masses(&iteration)?;

    // Step 3: Build the report
    let duration = start_time.elapsed().as_secs_f64();

    let mass_report = MassReport {
        metadata: ReportMetadata {
            model: model_short_name.clone(),
            iteration: iteration_number,
            analysis_date: Utc::now(),
            duration_seconds: duration,
        },
        breakdown,
    };

    let format = OutputFormat::from_name(&config.report.format)
        .with_context(|| format!("Unknown report format: {}", config.report.format))?;

    let output = match format {
        OutputFormat::Text => report::generate_text_report(&mass_report),
        OutputFormat::Markdown => report::generate_markdown_report(&mass_report),
        OutputFormat::Json => report::generate_json_report(&mass_report)?,
    };

    // Step 4: Write or print the report
    match config.general.output {
        Some(ref path) => {
            let path = PathBuf::from(path);
            report::write_report(&output, &path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!(
                "Total mass: {} kg. Report saved to: {}",
                mass_report.breakdown.total,
                path.display()
            );
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}

/// Handle --list: print models and iterations found in the data file.
fn handle_list(source: &JsonFileSource) -> Result<()> {
    let models = source.models();

    if models.is_empty() {
        println!("No engineering models found in {}", source.path().display());
        return Ok(());
    }

    println!("Engineering models in {}:\n", source.path().display());
    for model in models {
        println!("  {}", model.short_name);
        for iteration in &model.iterations {
            println!(
                "    iteration {} ({} elements)",
                iteration.number,
                iteration.elements.len()
            );
        }
    }

    Ok(())
}

/// Resolve the model data file path from the merged configuration.
fn resolve_data_path(config: &Config) -> Result<PathBuf> {
    config
        .data
        .path
        .as_ref()
        .map(PathBuf::from)
        .context("No model data file specified (use --data or the config file)")
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .massbudget.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
