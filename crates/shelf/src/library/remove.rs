//! Remove instruction: cascade deletion of a paper's files.
//!
//! Removing a paper deletes its descriptor and then, best effort, its PDF and note:
//!
//! - The descriptor removal is the primary operation; if it fails, nothing else is touched
//!   and the error is returned
//! - A missing PDF or note is skipped silently
//! - A PDF or note that exists but cannot be removed is reported in
//!   [`Removal::failures`] without failing the operation
//!
//! Whether files are trashed or deleted outright follows [`Library::with_trash`].
//!
//! [`LibraryInstruction::execute`] does not ask anybody anything. Interactive callers should
//! go through [`Remove::execute_confirmed`] (or [`MetadataEditor::remove`]), which requires a
//! confirmation first.
//!
//! # Examples
//!
//! ```no_run
//! use shelf::{
//!   library::{Library, Remove},
//!   prelude::*,
//!   store::LocalStore,
//! };
//!
//! # async fn example() -> Result<(), ShelfError> {
//! let library = Library::new(LocalStore::new("vault"), "researcher-library");
//!
//! // Preview which files would go
//! let preview = Remove::new("Foo").dry_run().execute(&library).await?;
//! println!("Would remove {:?}", preview.paths());
//!
//! Remove::new("Foo").execute(&library).await?;
//! # Ok(())
//! # }
//! ```

use super::*;

/// Configuration options for paper removal.
#[derive(Debug, Clone, Default)]
pub struct RemoveOptions {
  /// When true, reports what would be removed without modifying anything.
  pub dry_run: bool,
}

/// What a removal touched (or, for a dry run, would touch).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Removal {
  /// The removed paper
  pub basename:   String,
  /// Descriptor path; always present since the descriptor must exist
  pub descriptor: String,
  /// PDF path, if there was a PDF
  pub blob:       Option<String>,
  /// Note path, if there was a note
  pub note:       Option<String>,
  /// Companion files that were found but could not be removed, with the reason
  pub failures:   Vec<(String, String)>,
  /// Whether this was only a preview
  pub dry_run:    bool,
}

impl Removal {
  /// Every path involved, descriptor first.
  pub fn paths(&self) -> Vec<&str> {
    std::iter::once(self.descriptor.as_str())
      .chain(self.blob.as_deref())
      .chain(self.note.as_deref())
      .collect()
  }
}

/// Instruction for removing one paper.
#[derive(Debug, Clone)]
pub struct Remove {
  /// Paper to remove
  basename: String,
  /// Configuration options
  options:  RemoveOptions,
}

impl Remove {
  /// Creates a removal of the paper with this basename.
  pub fn new(basename: impl Into<String>) -> Self {
    Self { basename: basename.into(), options: RemoveOptions::default() }
  }

  /// Enables dry run mode: files are looked up but nothing is removed.
  pub fn dry_run(mut self) -> Self {
    self.options.dry_run = true;
    self
  }

  /// Runs the removal once `confirm` approves [`REMOVE_CONFIRMATION`].
  ///
  /// Only the descriptor's existence is checked before asking, so a paper whose frontmatter
  /// no longer parses can still be removed. Returns `None` without touching anything when
  /// `confirm` says no. Errors from `confirm` are passed through as they are.
  pub async fn execute_confirmed<S, F, E>(
    &self,
    library: &Library<S>,
    confirm: F,
  ) -> core::result::Result<Option<Removal>, E>
  where
    S: FileStore,
    F: FnOnce(&str) -> core::result::Result<bool, E>,
    E: From<ShelfError>, {
    let descriptor = library.locator().descriptor_path(&self.basename);
    if !library.store().exists(&descriptor).await? {
      return Err(ShelfError::UnknownPaper(self.basename.clone()).into());
    }
    if !confirm(REMOVE_CONFIRMATION)? {
      debug!("Removal of {} cancelled", self.basename);
      return Ok(None);
    }
    Ok(Some(self.execute(library).await?))
  }

  /// Removes a companion file if it exists, recording failures instead of returning them.
  async fn remove_companion<S: FileStore>(
    library: &Library<S>,
    path: String,
    removal: &mut Removal,
  ) -> Result<Option<String>> {
    if library.store().get_file_by_path(&path).await?.is_none() {
      trace!("No companion at {path}");
      return Ok(None);
    }
    if !removal.dry_run {
      if let Err(e) = library.discard(&path).await {
        warn!("Could not remove {path}: {e}");
        removal.failures.push((path.clone(), e.to_string()));
      }
    }
    Ok(Some(path))
  }
}

#[async_trait]
impl LibraryInstruction for Remove {
  type Output = Removal;

  async fn execute<S: FileStore>(&self, library: &Library<S>) -> Result<Self::Output> {
    let _guard = library.lock(&self.basename).await;
    let locator = library.locator();

    let descriptor = locator.descriptor_path(&self.basename);
    if library.store().get_file_by_path(&descriptor).await?.is_none() {
      return Err(ShelfError::UnknownPaper(self.basename.clone()));
    }

    let mut removal = Removal {
      basename: self.basename.clone(),
      descriptor: descriptor.clone(),
      dry_run: self.options.dry_run,
      ..Default::default()
    };

    if !self.options.dry_run {
      library.discard(&descriptor).await?;
    }
    removal.blob =
      Self::remove_companion(library, locator.blob_path(&self.basename), &mut removal).await?;
    removal.note =
      Self::remove_companion(library, locator.note_path(&self.basename), &mut removal).await?;

    debug!(
      "{} {}: {:?}",
      if self.options.dry_run { "Would remove" } else { "Removed" },
      self.basename,
      removal.paths()
    );
    Ok(removal)
  }
}
