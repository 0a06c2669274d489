//! MicroJSON Config CLI
//!
//! View and manage the configuration of the MicroJSON tools.

use clap::{Parser, Subcommand};
use microjson::MicroJsonConfig;
use std::path::Path;

#[derive(Parser)]
#[command(name = "microjson-config")]
#[command(about = "View and manage MicroJSON tool configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration
    Show {
        /// Config file to load (optional)
        #[arg(short, long)]
        config: Option<String>,

        /// Output as TOML
        #[arg(long)]
        toml: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new config file
    Init {
        /// Output path (default: microjson.toml)
        #[arg(short, long, default_value = "microjson.toml")]
        output: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate {
        /// Config file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Show { config, toml, json } => {
            let cfg = MicroJsonConfig::load_from(config.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else if toml {
                println!("{}", ::toml::to_string_pretty(&cfg)?);
            } else {
                println!("📋 MicroJSON Configuration\n");
                println!("Validation:");
                println!("  Dialect: {}", cfg.validation.dialect);
                println!("  Strict: {}", cfg.validation.strict);
                println!("  Ring closure: {}", cfg.validation.check_ring_closure);
                println!("  Mixed dimensions: {}", cfg.validation.allow_mixed_dimensions);
                println!("  JSON Schema: {}", cfg.validation.json_schema);

                println!("\nOutput:");
                println!("  Format: {:?}", cfg.output.format);
            }
        }

        Commands::Init { output, force } => {
            if Path::new(&output).exists() && !force {
                return Err(format!("{} already exists (use --force to overwrite)", output).into());
            }
            let cfg = MicroJsonConfig::default();
            cfg.save(&output)?;
            println!("✅ Created config file: {}", output);
        }

        Commands::Validate { config } => match MicroJsonConfig::load_from(config.as_deref()) {
            Ok(cfg) => {
                println!("✅ Configuration is valid");
                println!("   Dialect: {}", cfg.validation.dialect);
                println!("   Strict: {}", cfg.validation.strict);
            }
            Err(e) => {
                eprintln!("❌ Configuration error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
