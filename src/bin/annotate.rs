//! MicroJSON Annotate CLI
//!
//! Recomputes `bbox`, `value_range` and `descriptive_fields` of a
//! MicroJSON FeatureCollection from its features.

use clap::Parser;
use microjson::loader::load_document;
use microjson::{Dialect, Document, MicroJson, MicroJsonConfig, Validate};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "microjson-annotate")]
#[command(about = "Write collection summaries into a MicroJSON FeatureCollection")]
struct Cli {
    /// Input MicroJSON file
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite the input file
    #[arg(long, conflicts_with = "output")]
    in_place: bool,

    /// Print compact JSON regardless of config
    #[arg(long)]
    compact: bool,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = MicroJsonConfig::load_from(cli.config.as_deref())?;

    let document = load_document(&cli.input, Dialect::MicroJson)?;
    let type_name = document.type_name();
    let Document::MicroJson(MicroJson::FeatureCollection(mut collection)) = document else {
        return Err(format!(
            "{} is a {}, expected a FeatureCollection",
            cli.input.display(),
            type_name
        )
        .into());
    };

    let summary = collection.annotate();
    eprintln!(
        "📋 {} feature(s), {} value range(s), {} descriptive field(s)",
        collection.features.len(),
        summary.value_range.len(),
        summary.descriptive_fields.len()
    );

    let report = collection.validate_opts(&config.validation.options());
    for issue in report.errors.iter().chain(&report.warnings) {
        eprintln!("   ⚠️  [{}] {}: {}", issue.code, issue.path, issue.message);
    }

    let pretty = config.output.format.is_pretty() && !cli.compact;
    let annotated = Document::MicroJson(MicroJson::FeatureCollection(collection));
    let json = annotated.to_json_string(pretty)?;

    let target = if cli.in_place { Some(cli.input) } else { cli.output };
    match target {
        Some(path) => {
            std::fs::write(&path, &json)?;
            eprintln!("✅ Written to {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
