//! fmgen CLI - Java class generator for remote function modules
//!
//! Commands:
//! - `fmgen generate` - Generate parameter classes and stubs from a schema
//! - `fmgen check` - Validate a schema document without writing anything

use clap::{Parser, Subcommand};
use fmgen_core::GenerateError;
use std::path::PathBuf;
use std::process::ExitCode;

mod check;
mod generate;

#[derive(Parser)]
#[command(name = "fmgen")]
#[command(author, version, about = "Java class generator for remote function modules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate parameter classes, caller and handler for a function module
    Generate {
        /// Schema document (JSON) describing the function signature
        #[arg(short, long)]
        schema: PathBuf,

        /// Base class name, e.g. GetMaterial
        #[arg(short, long)]
        class: String,

        /// Existing output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Remote function name (default: the schema's "function" entry)
        #[arg(short, long)]
        function: Option<String>,

        /// Java package of the generated files
        #[arg(short, long)]
        package: Option<String>,

        /// Path to fmgen.toml (default: ./fmgen.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Log level (trace, debug, info, warn, error, off)
        #[arg(long)]
        log_level: Option<String>,
    },

    /// Validate a schema document and show what would be generated
    Check {
        /// Schema document (JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// Path to fmgen.toml (default: ./fmgen.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Generate {
            schema,
            class,
            output,
            function,
            package,
            config,
            log_level,
        } => {
            let report = generate::run(generate::GenerateOptions {
                schema,
                class,
                output,
                function,
                package,
                config,
                log_level,
            })?;
            return Ok(report.exit_code());
        }
        Commands::Check { schema, config } => {
            check::run(&schema, config.as_deref())?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Exit status for a failed command: the generator's error code when the
/// failure came from the core, 1 otherwise
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<GenerateError>()
        .map_or(1, GenerateError::error_code)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
