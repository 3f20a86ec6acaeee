//! The library: a file store, the paper locator, and the operations on top of them.
//!
//! Operations are modeled as instructions implementing [`LibraryInstruction`], so each one
//! can be configured with a builder and then executed against a [`Library`]:
//!
//! - [`Import`]: add a PDF and its descriptor
//! - [`Catalog`]: list descriptors through the filter/search/sort pipeline
//! - [`Update`]: write the editable metadata fields
//! - [`Remove`]: cascade-delete a paper's files
//! - [`CreateNote`]: open or create a paper's note
//!
//! [`MetadataEditor`] wraps [`Update`] and [`Remove`] into the edit-then-save (or
//! confirm-then-remove) interaction a user sees.
//!
//! # Concurrency
//!
//! Instructions take the library by shared reference, so a library can be shared between
//! tasks. Instructions that write an existing paper's files hold a per-basename lock for
//! their whole duration, which keeps a save from interleaving with a removal of the same
//! paper.

use std::sync::{Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::*;

mod editor;
mod import;
mod list;
mod note;
mod remove;
mod update;

pub use self::{editor::*, import::*, list::*, note::*, remove::*, update::*};

/// An operation on a [`Library`].
#[async_trait]
pub trait LibraryInstruction {
  /// What the operation produces.
  type Output;

  /// Runs the operation.
  async fn execute<S: FileStore>(&self, library: &Library<S>) -> Result<Self::Output>;
}

/// Per-basename async locks.
#[derive(Debug, Default)]
struct PaperLocks {
  /// One lock per basename currently (or recently) in use
  locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl PaperLocks {
  /// Waits for exclusive access to `basename`.
  async fn lock(&self, basename: &str) -> OwnedMutexGuard<()> {
    let lock = {
      let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
      // Forget locks nobody holds or waits on.
      locks.retain(|_, lock| Arc::strong_count(lock) > 1);
      locks.entry(basename.to_string()).or_default().clone()
    };
    lock.lock_owned().await
  }
}

/// Where a paper's note stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteLink {
  /// A note exists and can be opened
  Open(FileEntry),
  /// No note yet; one can be created
  Create,
}

/// A paper library inside a vault.
#[derive(Debug)]
pub struct Library<S: FileStore> {
  /// Backing store, rooted at the vault
  store:   S,
  /// Path conventions for the library folder
  locator: PaperLocator,
  /// Whether removals go to the trash instead of being permanent
  trash:   bool,
  /// Serializes writes per paper
  locks:   PaperLocks,
}

impl<S: FileStore> Library<S> {
  /// Creates a library in `library_folder` (vault-relative) of `store`.
  ///
  /// Removals go to the store's trash by default; see [`Library::with_trash`].
  pub fn new(store: S, library_folder: impl Into<String>) -> Self {
    Self {
      store,
      locator: PaperLocator::new(library_folder),
      trash: true,
      locks: PaperLocks::default(),
    }
  }

  /// Chooses between trashing (`true`) and permanently deleting (`false`) removed files.
  pub fn with_trash(mut self, trash: bool) -> Self {
    self.trash = trash;
    self
  }

  /// The backing store.
  pub fn store(&self) -> &S { &self.store }

  /// The path conventions in use.
  pub fn locator(&self) -> &PaperLocator { &self.locator }

  /// Whether removals go to the trash.
  pub fn uses_trash(&self) -> bool { self.trash }

  /// Takes the write lock for a paper.
  pub(crate) async fn lock(&self, basename: &str) -> OwnedMutexGuard<()> {
    trace!("Locking paper {basename}");
    self.locks.lock(basename).await
  }

  /// Removes a file the way this library is configured to.
  pub(crate) async fn discard(&self, path: &str) -> Result<()> {
    if self.trash {
      self.store.trash(path).await
    } else {
      self.store.delete(path).await
    }
  }

  /// Loads the descriptor of one paper.
  pub async fn descriptor(&self, basename: &str) -> Result<Descriptor> {
    let path = self.locator.descriptor_path(basename);
    let entry = self
      .store
      .get_file_by_path(&path)
      .await?
      .ok_or_else(|| ShelfError::UnknownPaper(basename.to_string()))?;
    let content = self.store.read(&path).await?;
    Descriptor::from_entry(basename, &entry, &content)
  }

  /// Loads every descriptor, in the store's listing order.
  ///
  /// Descriptors that cannot be read or whose frontmatter cannot be parsed are skipped with
  /// a warning so that a single broken file does not hide the rest of the library.
  pub async fn descriptors(&self) -> Result<Vec<Descriptor>> {
    let entries = self.store.list(&self.locator.descriptors_dir()).await?;
    let mut descriptors = Vec::with_capacity(entries.len());
    for entry in entries {
      let Some(basename) = self.locator.basename_of_descriptor(&entry.path) else {
        continue;
      };
      let descriptor = self
        .store
        .read(&entry.path)
        .await
        .and_then(|content| Descriptor::from_entry(basename, &entry, &content));
      match descriptor {
        Ok(descriptor) => descriptors.push(descriptor),
        Err(e) => warn!("Skipping unreadable descriptor {}: {e}", entry.path),
      }
    }
    debug!("Loaded {} descriptors", descriptors.len());
    Ok(descriptors)
  }

  /// The paper's PDF, if it exists.
  pub async fn blob(&self, basename: &str) -> Result<Option<FileEntry>> {
    self.store.get_file_by_path(&self.locator.blob_path(basename)).await
  }

  /// Whether the paper's note exists. Not cached: notes come and go outside the library.
  pub async fn resolve_note(&self, basename: &str) -> Result<NoteLink> {
    Ok(match self.store.get_file_by_path(&self.locator.note_path(basename)).await? {
      Some(entry) => NoteLink::Open(entry),
      None => NoteLink::Create,
    })
  }
}

impl Library<LocalStore> {
  /// Opens the library described by a configuration.
  pub fn from_config(config: &Config) -> Self {
    Library::new(LocalStore::new(&config.vault_path), config.library_folder.clone())
      .with_trash(config.use_trash)
  }
}
