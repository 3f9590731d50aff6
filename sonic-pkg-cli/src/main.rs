//! sonic-pkg CLI - command-line interface for SONiC package management.
//!
//! This binary wraps the sonic-pkg library: authoring repositories,
//! validating and publishing packages, and installing their scripts
//! onto the executable search path.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::config::ConfigCommands;

/// Command-line interface for SONiC package management.
#[derive(Debug, Parser)]
#[command(name = "sonic-pkg", version, about = "Build, publish and install SONiC platform daemon packages")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a new package repository
    Init {
        /// Directory for the new repository
        path: PathBuf,

        /// Publisher name recorded in the repository index
        #[arg(long, default_value = "local")]
        publisher: String,
    },

    /// Validate a package manifest without building it
    Validate {
        /// Directory containing package.toml
        source_dir: PathBuf,
    },

    /// Build a package artifact from authored sources
    Build {
        /// Package name under the repository's packages/ directory
        name: String,

        /// Repository path (overrides configuration)
        #[arg(long)]
        repo: Option<PathBuf>,
    },

    /// Build and publish a package release to the repository index
    Publish {
        /// Package name under the repository's packages/ directory
        name: String,

        /// Repository path (overrides configuration)
        #[arg(long)]
        repo: Option<PathBuf>,
    },

    /// Install a published package's scripts onto the search path
    Install {
        /// Package name
        name: String,

        /// Version to install (defaults to the latest release)
        #[arg(long)]
        version: Option<String>,

        /// Repository path (overrides configuration)
        #[arg(long)]
        repo: Option<PathBuf>,

        /// Installation prefix (overrides configuration)
        #[arg(long)]
        prefix: Option<PathBuf>,

        /// Skip artifact checksum verification
        #[arg(long)]
        no_verify: bool,
    },

    /// Remove an installed package's scripts
    Uninstall {
        /// Package name
        name: String,

        /// Installation prefix (overrides configuration)
        #[arg(long)]
        prefix: Option<PathBuf>,
    },

    /// List installed packages, or published releases with --available
    List {
        /// List releases published in the repository index
        #[arg(long)]
        available: bool,

        /// Repository path (overrides configuration)
        #[arg(long)]
        repo: Option<PathBuf>,

        /// Installation prefix (overrides configuration)
        #[arg(long)]
        prefix: Option<PathBuf>,
    },

    /// Show descriptor, release and install state for a package
    Info {
        /// Package name
        name: String,

        /// Repository path (overrides configuration)
        #[arg(long)]
        repo: Option<PathBuf>,

        /// Installation prefix (overrides configuration)
        #[arg(long)]
        prefix: Option<PathBuf>,
    },

    /// Manage configuration settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Initialize tracing/logging.
///
/// Honors `RUST_LOG` when set; otherwise logs warnings, or debug
/// output with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init { path, publisher } => commands::init::run(path, publisher),
        Commands::Validate { source_dir } => commands::validate::run(source_dir),
        Commands::Build { name, repo } => commands::build::run(name, repo),
        Commands::Publish { name, repo } => commands::publish::run(name, repo),
        Commands::Install {
            name,
            version,
            repo,
            prefix,
            no_verify,
        } => commands::install::run(name, version, repo, prefix, no_verify),
        Commands::Uninstall { name, prefix } => commands::uninstall::run(name, prefix),
        Commands::List {
            available,
            repo,
            prefix,
        } => commands::list::run(available, repo, prefix),
        Commands::Info { name, repo, prefix } => commands::info::run(name, repo, prefix),
        Commands::Config(command) => commands::config::run(command),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
