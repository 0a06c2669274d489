//! Schema Export CLI
//!
//! Prints or writes the embedded JSON Schema of a dialect.

use clap::Parser;
use microjson::schema::raw_schema;
use microjson::Dialect;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "microjson-schema")]
#[command(about = "Export the embedded JSON Schemas")]
struct Cli {
    /// Dialect whose schema to export
    #[arg(value_enum, default_value_t = Dialect::MicroJson)]
    dialect: Dialect,

    /// Output file, or directory when --all is given (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export both schemas into the output directory
    #[arg(long, requires = "output")]
    all: bool,
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
    if cli.all {
        let dir = cli.output.ok_or("--all needs --output")?;
        std::fs::create_dir_all(&dir)?;
        for dialect in [Dialect::GeoJson, Dialect::MicroJson] {
            let path = dir.join(dialect.schema_file());
            std::fs::write(&path, raw_schema(dialect)?)?;
            println!("✅ {} schema written to {:?}", dialect, path);
        }
        return Ok(());
    }

    let schema = raw_schema(cli.dialect)?;
    match cli.output {
        Some(path) => {
            std::fs::write(&path, schema)?;
            println!("✅ {} schema written to {:?}", cli.dialect, path);
        }
        None => print!("{}", schema),
    }
    Ok(())
}
