//! Command line interface for the shelf paper library.
//!
//! This crate provides the `shelf` binary for managing a PDF library kept inside a markdown
//! vault using the [`shelf`] library. It supports operations like:
//! - Configuration setup
//! - Importing PDFs (single files or glob patterns)
//! - Listing, filtering, searching and sorting the catalog
//! - Editing metadata and removing papers
//! - Creating and opening companion notes
//! - Browsing the catalog interactively
//!
//! # Usage
//!
//! ```bash
//! # Point shelf at a vault
//! shelf init --vault ~/Documents/vault
//!
//! # Import papers
//! shelf import ~/Downloads/attention.pdf "~/papers/*.pdf"
//!
//! # List what is being read, most recently touched first
//! shelf list --status reading --sort updated-desc
//!
//! # Mark a paper as finished
//! shelf edit attention --status finished
//!
//! # Write notes about it
//! shelf note attention --open
//!
//! # Browse everything
//! shelf browse
//! ```
//!
//! Destructive operations ask for confirmation unless `--accept-defaults` is passed. The
//! `-v` flag raises logging verbosity.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use shelf::{
  catalog::{Session, SortOrder, StatusFilter},
  library::*,
  paper::{Descriptor, Status, NOT_AVAILABLE},
  pdf::PdfAnalyzer,
  prelude::*,
  store::LocalStore,
  Config,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "CLI for the shelf paper library")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Vault directory. Overrides the configured vault; with no configuration file present,
  /// the library is used with default settings inside this vault.
  #[arg(long, global = true)]
  vault: Option<PathBuf>,

  /// Path to the configuration file. If not specified, uses the platform-specific config
  /// directory.
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// The configuration file in use.
  fn config_path(&self) -> Result<PathBuf> {
    match &self.config {
      Some(path) => Ok(path.clone()),
      None => Ok(Config::default_path()?),
    }
  }

  /// Loads the configuration, applying the `--vault` override.
  fn load_config(&self) -> Result<Config> {
    let path = self.config_path()?;
    let config = match (Config::load(&path), &self.vault) {
      (Ok(config), _) => config,
      (Err(e), Some(_)) => {
        debug!("No usable config at {}: {e}; using defaults", path.display());
        Config::default()
      },
      (Err(e), None) => {
        debug!("Failed to load {}: {e}", path.display());
        return Err(ShelfdError::Config(format!(
          "No shelf configuration at {}. Run `shelf init` or pass --vault.",
          path.display()
        )));
      },
    };
    Ok(match &self.vault {
      Some(vault) => config.with_vault_path(vault),
      None => config,
    })
  }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used (0-4)
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Opens the library named by the configuration and command line.
fn open_library(cli: &Cli) -> Result<Library<LocalStore>> {
  let config = cli.load_config()?;
  trace!("Using {config:?}");
  Ok(Library::from_config(&config))
}

/// Runs the parsed command.
async fn run(cli: Cli) -> Result<()> {
  let interaction = Terminal::new(cli.accept_defaults);

  match cli.command.clone() {
    Commands::Init(init_options) => init(&interaction, &cli, init_options),
    Commands::Import(args) => import(&interaction, &open_library(&cli)?, args).await,
    Commands::List(args) => list(&interaction, &open_library(&cli)?, args).await,
    Commands::Edit(args) => edit(&interaction, &open_library(&cli)?, args).await,
    Commands::Remove(args) => remove(&interaction, &open_library(&cli)?, args).await,
    Commands::Note(args) => note(&interaction, &open_library(&cli)?, args).await,
    Commands::Browse => browse(&interaction, &open_library(&cli)?).await,
  }
}

/// Entry point for the shelf CLI application
///
/// Handles command line argument parsing, sets up logging, and executes the requested
/// command. Errors are reported on stderr and turn into a non-zero exit status.
#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  if let Err(e) = run(cli).await {
    eprintln!("{} {e}", style(ERROR_PREFIX).red());
    std::process::exit(1);
  }
}
