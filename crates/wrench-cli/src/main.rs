//! v8-wrench CLI - Generate Torque class definitions from V8 object headers.
//!
//! Reads the symbol dumps written by the clang front-end and emits one `.tq`
//! file per class that befriends `tq::Torque<...>`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use wrench_ops::{Config, OpsContext};

mod commands;

use commands::{config as config_cmd, generate, inspect, inspect::OutputFormat};

/// v8-wrench - Generate Torque classes from annotated C++ classes.
#[derive(Parser, Debug)]
#[command(
    name = "v8-wrench",
    author,
    version,
    about = "v8-wrench: Generate Torque class definitions from V8 C++ headers",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one `.tq` file per torqueable class.
    Generate {
        /// Symbol dump files, or directories to search for them.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving the `.tq` files (must exist).
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Exit with an error if any class, annotation or field was skipped.
        #[arg(long)]
        strict: bool,
    },

    /// Show the classes that would be generated, without writing files.
    Inspect {
        /// Symbol dump files, or directories to search for them.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format: text or json.
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = Config::load()?;

    match cli.command {
        Commands::Generate {
            inputs,
            output_dir,
            strict,
        } => {
            let ctx = OpsContext::new(config);
            generate::execute(&ctx, inputs, output_dir, strict, cli.quiet)?;
        }

        Commands::Inspect { inputs, format } => {
            let ctx = OpsContext::new(config);
            let format: OutputFormat = format.parse()?;
            inspect::execute(&ctx, inputs, format)?;
        }

        Commands::Config(config_cmd_inner) => {
            let mut config = config;
            match config_cmd_inner {
                ConfigCommands::Show => {
                    config_cmd::show(&config)?;
                }
                ConfigCommands::Set { key, value } => {
                    config_cmd::set(&mut config, &key, &value)?;
                }
                ConfigCommands::Get { key } => {
                    config_cmd::get(&config, &key)?;
                }
                ConfigCommands::Reset => {
                    config_cmd::reset()?;
                }
                ConfigCommands::Path => {
                    if let Some(path) = Config::config_file_path() {
                        println!("{}", path.display());
                    } else {
                        println!("(no config file path available)");
                    }
                }
            }
        }
    }

    Ok(())
}
