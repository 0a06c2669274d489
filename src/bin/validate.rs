//! MicroJSON Validator CLI
//!
//! Validates GeoJSON and MicroJSON files, or whole directories of them.

use clap::Parser;
use microjson::loader::{check_paths, FileReport};
use microjson::validate::display_path;
use microjson::{Dialect, MicroJsonConfig, SchemaSet};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "microjson-validate")]
#[command(about = "Validate GeoJSON and MicroJSON documents")]
struct Cli {
    /// Files or directories to validate
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Dialect to validate against (default from config)
    #[arg(short, long, value_enum)]
    dialect: Option<Dialect>,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,

    /// Accept mixed 2D/3D positions with a warning
    #[arg(long)]
    allow_mixed_dimensions: bool,

    /// Skip the embedded JSON Schema check
    #[arg(long)]
    no_schema: bool,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Write a JSON report to this file ("-" for stdout)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Only print files with problems
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_file(report: &FileReport, quiet: bool) {
    let path = report.path.display();
    if let Some(failure) = &report.failure {
        println!("❌ {}", path);
        println!("   └─ {}", failure);
        return;
    }
    if report.report.is_valid() {
        if !report.report.has_warnings() && quiet {
            return;
        }
        println!("✅ {}", path);
    } else {
        println!("❌ {} ({} error(s))", path, report.report.errors.len());
    }
    for issue in &report.report.errors {
        println!("   └─ [{}] {}: {}", issue.code, display_path(&issue.path), issue.message);
    }
    for issue in &report.report.warnings {
        println!("   ⚠️  [{}] {}: {}", issue.code, display_path(&issue.path), issue.message);
    }
}

/// Returns whether every file was valid
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config = MicroJsonConfig::load_from(cli.config.as_deref())?;

    let dialect = cli.dialect.unwrap_or(config.validation.dialect);
    let mut options = config.validation.options();
    options.strict |= cli.strict;
    options.allow_mixed_dimensions |= cli.allow_mixed_dimensions;

    let schemas = if config.validation.json_schema && !cli.no_schema {
        Some(SchemaSet::embedded()?)
    } else {
        None
    };

    if !cli.quiet {
        println!("🔍 Validating as {}...", dialect);
        println!();
    }

    let results = check_paths(&cli.paths, dialect, &options, schemas.as_ref())?;
    for result in &results {
        print_file(result, cli.quiet);
    }

    let invalid = results.iter().filter(|r| !r.is_valid()).count();
    let warnings: usize = results.iter().map(|r| r.report.warnings.len()).sum();

    println!();
    if invalid == 0 {
        println!("✅ {} file(s) valid, {} warning(s)", results.len(), warnings);
    } else {
        println!("❌ {} of {} file(s) invalid", invalid, results.len());
    }

    if let Some(path) = cli.report {
        let report = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "dialect": dialect,
            "options": options,
            "files": results.len(),
            "invalid": invalid,
            "results": results,
        });
        let report_json = if config.output.format.is_pretty() {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };

        if path.as_os_str() == "-" {
            println!("{}", report_json);
        } else {
            std::fs::write(&path, &report_json)?;
            println!("📋 Report written to {:?}", path);
        }
    }

    Ok(invalid == 0)
}
