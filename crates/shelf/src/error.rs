//! Error types for the shelf library.
//!
//! This module provides a single error type covering every failure mode of the library:
//! - File store access
//! - PDF parsing during metadata extraction
//! - Frontmatter and configuration (de)serialization
//! - Input validation (names, statuses, paths)
//!
//! # Examples
//!
//! ```no_run
//! use shelf::{
//!   library::{Import, Library},
//!   pdf::PdfAnalyzer,
//!   prelude::*,
//!   store::LocalStore,
//! };
//!
//! # async fn example() -> Result<(), ShelfError> {
//! let library = Library::new(LocalStore::new("vault"), "researcher-library");
//! let result = Import::new("notes.txt", b"not a pdf".to_vec(), &PdfAnalyzer::new())
//!   .execute(&library)
//!   .await;
//! match result {
//!   Err(ShelfError::Lopdf(e)) => println!("Could not read PDF: {}", e),
//!   Err(ShelfError::DuplicatePaper(name)) => println!("{} is already on the shelf", name),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(_) => println!("Imported!"),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`shelf`](crate) crate.
pub type Result<T> = core::result::Result<T, ShelfError>;

/// Errors that can occur when working with the shelf library.
#[derive(Error, Debug)]
pub enum ShelfError {
  /// A file system operation failed.
  ///
  /// This occurs when:
  /// - Reading or writing a descriptor, note, or PDF fails
  /// - A folder cannot be created
  /// - Permission errors occur
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// PDF parsing errors from the lopdf library.
  ///
  /// Raised by the metadata extractor when the imported payload is not a readable PDF.
  /// Import aborts before anything is written when this happens.
  #[error(transparent)]
  Lopdf(#[from] lopdf::Error),

  /// Frontmatter could not be parsed or rendered as YAML.
  #[error(transparent)]
  Yaml(#[from] serde_yaml::Error),

  /// The configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be rendered.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A configuration problem that is not a parse failure.
  #[error("{0}")]
  Config(String),

  /// The imported payload name does not yield a usable basename.
  ///
  /// Basenames must be non-empty once the directory and `.pdf` extension are stripped.
  #[error("Invalid paper name: \"{0}\"")]
  InvalidName(String),

  /// A status string is not one of `to-read`, `reading`, `finished`, `re-read`.
  #[error("Invalid status \"{0}\", expected one of: to-read, reading, finished, re-read")]
  InvalidStatus(String),

  /// A sort order string is not recognized.
  #[error("Invalid sort order \"{0}\"")]
  InvalidSortOrder(String),

  /// Tried to import a paper whose descriptor already exists.
  ///
  /// Basenames are the only join key, so a second import under the same name would
  /// silently merge two papers. The existing files are left untouched.
  #[error("A paper named \"{0}\" is already in the library.")]
  DuplicatePaper(String),

  /// No descriptor exists for the requested basename.
  #[error("No paper named \"{0}\" in the library.")]
  UnknownPaper(String),

  /// A store path tried to leave the vault root.
  #[error("Path \"{0}\" escapes the vault")]
  PathEscape(String),
}
