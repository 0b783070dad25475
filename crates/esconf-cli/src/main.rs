//! esconf CLI tool.
//!
//! Usage:
//! ```bash
//! esconf [install] [--flavor legacy|modern] [--dir PATH]
//! esconf print [--flavor modern] [--format module]
//! esconf list-rules
//! esconf verify
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use esconf::Flavor;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Installs the shared ESLint + JSDoc configuration into a JavaScript project
#[derive(Parser)]
#[command(name = "esconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Defaults to `install` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install dependencies, write the config file and register scripts
    Install(InstallArgs),

    /// Print the exported configuration
    Print {
        /// Document flavor
        #[arg(long, default_value = "legacy")]
        flavor: Flavor,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: PrintFormat,
    },

    /// List the rules in the catalog
    ListRules {
        /// Document flavor
        #[arg(long, default_value = "legacy")]
        flavor: Flavor,
    },

    /// Validate both documents and check they declare the same rules
    Verify,
}

/// Options for the install command.
#[derive(clap::Args, Debug, Default)]
pub struct InstallArgs {
    /// Project directory (default: current directory)
    #[arg(short, long)]
    pub(crate) dir: Option<PathBuf>,

    /// Document flavor to install
    #[arg(long)]
    pub(crate) flavor: Option<Flavor>,

    /// Do not run the package manager
    #[arg(long)]
    pub(crate) skip_install: bool,

    /// Package manager program
    #[arg(long)]
    pub(crate) package_manager: Option<String>,
}

/// Output format for `print`.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum PrintFormat {
    /// The document as JSON.
    #[default]
    Json,
    /// The bootstrap module written into projects.
    Module,
}

/// With no subcommand, esconf installs.
fn command_or_default(command: Option<Commands>) -> Commands {
    command.unwrap_or_else(|| Commands::Install(InstallArgs::default()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match command_or_default(cli.command) {
        Commands::Install(args) => commands::install::run(&args, cli.config.as_deref()),
        Commands::Print { flavor, format } => commands::print::run(flavor, format),
        Commands::ListRules { flavor } => {
            commands::list_rules::run(flavor);
            Ok(())
        }
        Commands::Verify => {
            let documents: Vec<_> = Flavor::ALL
                .iter()
                .map(|f| (*f, esconf::configuration(*f)))
                .collect();
            if commands::verify::run(&documents) > 0 {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
