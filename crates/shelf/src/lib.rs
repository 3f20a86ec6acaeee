//! Personal paper library management inside a markdown vault.
//!
//! `shelf` keeps a library of PDF papers inside a directory tree that a note-taking
//! application treats as its vault, providing:
//!
//! - PDF import with automatic metadata extraction
//! - Markdown descriptors carrying metadata as YAML frontmatter
//! - On-demand companion notes for your own annotations
//! - A filterable, searchable, sortable catalog
//! - Metadata editing and cascade removal
//!
//! # Layout
//!
//! Every paper is identified by its *basename* (the imported filename without its `.pdf`
//! extension) and is spread over up to three files inside the library folder:
//!
//! ```text
//! <library>/papers/<basename>.pdf      the PDF itself
//! <library>/papers/md/<basename>.md    the descriptor (frontmatter + link to the PDF)
//! <library>/notes/<basename>.md        an optional free-form note
//! ```
//!
//! Only the descriptor is required; a paper exists in the catalog exactly when its
//! descriptor does.
//!
//! # Getting Started
//!
//! ```no_run
//! use shelf::{
//!   catalog::{SortOrder, StatusFilter},
//!   library::{Catalog, Import, Library},
//!   pdf::PdfAnalyzer,
//!   prelude::*,
//!   store::LocalStore,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let library = Library::new(LocalStore::new("/home/me/vault"), "researcher-library");
//!
//!   let bytes = std::fs::read("Attention.pdf")?;
//!   let descriptor =
//!     Import::new("Attention.pdf", bytes, &PdfAnalyzer::new()).execute(&library).await?;
//!   println!("Imported {}", descriptor.display_title());
//!
//!   let papers = Catalog::new()
//!     .with_status(StatusFilter::All)
//!     .with_search("vaswani")
//!     .with_sort(SortOrder::ImportDateDesc)
//!     .execute(&library)
//!     .await?;
//!   println!("{} matching papers", papers.len());
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`locator`]: The basename join key and the three path conventions
//! - [`store`]: The file store abstraction and its local-disk implementation
//! - [`frontmatter`]: Frontmatter parsing and rewriting
//! - [`pdf`]: PDF metadata extraction
//! - [`paper`]: Status values, catalog entries and document templates
//! - [`catalog`]: The pure filter/search/sort pipeline and its session state
//! - [`library`]: Library operations as composable instructions
//! - [`config`]: On-disk configuration
//! - [`prelude`]: Common traits and types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::HashMap,
  fmt::Display,
  path::{Path, PathBuf},
  str::FromStr,
  sync::Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod catalog;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod library;
pub mod locator;
pub mod paper;
pub mod pdf;
pub mod store;

pub use crate::config::Config;
use crate::{error::*, frontmatter::*, locator::*, paper::*, store::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use shelf::{
///   library::{Catalog, Library},
///   prelude::*,
///   store::LocalStore,
/// };
///
/// async fn example() -> Result<(), ShelfError> {
///   let library = Library::new(LocalStore::new("vault"), "researcher-library");
///   let papers = Catalog::new().execute(&library).await?;
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    error::ShelfError, library::LibraryInstruction, pdf::MetadataExtractor, store::FileStore,
  };
}
