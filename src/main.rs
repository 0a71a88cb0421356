use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use sql_modelgen::{check_model, dump_config, CheckOptions, DumpOptions};

#[derive(Parser)]
#[command(name = "sql-modelgen")]
#[command(author, version, about = "Resolve SQL schema descriptions into a model graph")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the model for one or more targets and report what it contains
    Check {
        /// Path to the JSON configuration
        #[arg(short, long)]
        config: PathBuf,

        /// Target language(s) to map column types for (csharp, rust)
        #[arg(short, long = "target", default_value = "csharp")]
        targets: Vec<String>,
    },

    /// Write the configuration back out in normalized form
    Dump {
        /// Path to the JSON configuration
        #[arg(short, long)]
        config: PathBuf,

        /// Target language used to validate column types
        #[arg(short, long, default_value = "csharp")]
        target: String,

        /// Output path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check { config, targets } => {
            let reports = check_model(&CheckOptions {
                config_path: config,
                targets,
            })?;
            for report in reports {
                println!(
                    "{}: {} database(s), {} schema(s), {} table(s), {} view(s), {} column(s), {} foreign key(s)",
                    report.target,
                    report.databases,
                    report.schemas,
                    report.tables,
                    report.views,
                    report.columns,
                    report.foreign_keys
                );
                for namespace in &report.namespaces {
                    println!("  uses {}", namespace);
                }
            }
        }
        Commands::Dump {
            config,
            target,
            output,
        } => {
            let to_stdout = output.is_none();
            let json = dump_config(&DumpOptions {
                config_path: config,
                target,
                output_path: output,
            })?;
            if to_stdout {
                println!("{}", json);
            }
        }
    }

    Ok(())
}
