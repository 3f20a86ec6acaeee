//! Error types for the shelf CLI.

use thiserror::Error;

use super::*;

/// Error type alias used for the `shelf` binary.
pub type Result<T> = core::result::Result<T, ShelfdError>;

/// Errors that can occur while running a CLI command.
#[derive(Error, Debug)]
pub enum ShelfdError {
  /// An error from the library itself.
  #[error(transparent)]
  Shelf(#[from] ShelfError),

  /// Reading an input file or writing to the terminal failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A prompt could not be shown or answered.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// An import pattern is not a valid glob.
  #[error(transparent)]
  Glob(#[from] glob::PatternError),

  /// The catalog could not be rendered as JSON.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// The CLI could not work out which library to use.
  #[error("{0}")]
  Config(String),

  /// Some of the requested imports failed. Each failure has been reported already.
  #[error("{failed} of {total} imports failed")]
  ImportFailed {
    /// Number of failed imports
    failed: usize,
    /// Number of attempted imports
    total:  usize,
  },
}
