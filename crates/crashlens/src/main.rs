use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crashlens_core::validation::validate_schema;
use crashlens_core::{render, DashboardConfig, RenderRequest};
use crashlens_parser::{load_accident_file, AccidentTable};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Parser, Debug)]
#[command(author, version, about = "Traffic accident dashboard data preparation", long_about = None)]
struct Cli {
    /// Dashboard settings (TOML). Falls back to CRASHLENS_CONFIG, then built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that an accident file carries every required column
    Validate(FileArgs),
    /// List the severities a view can be filtered by
    Severities(FileArgs),
    /// Prepare and print every dashboard view for one file
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct FileArgs {
    /// Accident data (CSV with a header row)
    file: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Accident data (CSV with a header row)
    file: PathBuf,
    /// Severity to filter by; defaults to the first one in the file
    #[arg(long)]
    severity: Option<String>,
    /// Print a JSON document instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Validate(args) => handle_validate(&args.file),
        Command::Severities(args) => handle_severities(&args.file, &config),
        Command::Render(args) => handle_render(args, &config),
    }
}

fn load_config(flag: Option<&Path>) -> Result<DashboardConfig> {
    let path = match flag {
        Some(path) => Some(path.to_path_buf()),
        None => env::var_os("CRASHLENS_CONFIG").map(PathBuf::from),
    };
    match path {
        Some(path) => {
            let config = DashboardConfig::load(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            info!(path = %path.display(), "loaded dashboard config");
            Ok(config)
        }
        None => Ok(DashboardConfig::default()),
    }
}

fn load_table(path: &Path) -> Result<AccidentTable> {
    let table = load_accident_file(path)
        .with_context(|| format!("failed to load accident data from {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = table.height(),
        source_hash = %table.source_hash,
        "loaded accident data"
    );
    Ok(table)
}

fn handle_validate(path: &Path) -> Result<()> {
    let table = load_table(path)?;
    validate_schema(&table.df)?;
    println!(
        "{}: all required columns present ({} rows)",
        path.display(),
        table.height()
    );
    Ok(())
}

fn handle_severities(path: &Path, config: &DashboardConfig) -> Result<()> {
    let table = load_table(path)?;
    let views = render(&table.df, &RenderRequest::default(), config)?;
    for severity in &views.severity_options {
        println!("{severity}");
    }
    Ok(())
}

fn handle_render(args: RenderArgs, config: &DashboardConfig) -> Result<()> {
    let table = load_table(&args.file)?;
    let request = RenderRequest {
        severity: args.severity,
    };
    let views = render(&table.df, &request, config)?;

    if args.json {
        let document = report::json_report(&table.source_hash, &views)?;
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        report::print_text_report(&views);
    }
    Ok(())
}
