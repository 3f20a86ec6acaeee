//! Import instruction: bring a PDF into the library.
//!
//! Importing writes two files: the PDF itself, unchanged, and a descriptor seeded from the
//! PDF's metadata. Metadata is extracted before anything is written, so a PDF that cannot
//! be read leaves no trace in the vault.
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
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let library = Library::new(LocalStore::new("vault"), "researcher-library");
//! let bytes = std::fs::read("Foo.pdf")?;
//!
//! let descriptor = Import::new("Foo.pdf", bytes, &PdfAnalyzer::new()).execute(&library).await?;
//! assert_eq!(descriptor.path, "researcher-library/papers/md/Foo.md");
//! # Ok(())
//! # }
//! ```

use std::io::ErrorKind;

use super::*;
use crate::pdf::MetadataExtractor;

/// Instruction for importing one PDF.
pub struct Import<'a> {
  /// Name of the payload, usually the original filename
  name:      String,
  /// Raw PDF bytes, written unchanged
  bytes:     Vec<u8>,
  /// Source of the seeded metadata
  extractor: &'a dyn MetadataExtractor,
}

impl<'a> Import<'a> {
  /// Creates an import of `bytes` under `name`.
  ///
  /// The basename is derived from `name` when the instruction runs; see
  /// [`basename_from_name`](crate::locator::basename_from_name).
  pub fn new(
    name: impl Into<String>,
    bytes: Vec<u8>,
    extractor: &'a dyn MetadataExtractor,
  ) -> Self {
    Self { name: name.into(), bytes, extractor }
  }
}

#[async_trait]
impl LibraryInstruction for Import<'_> {
  type Output = Descriptor;

  async fn execute<S: FileStore>(&self, library: &Library<S>) -> Result<Self::Output> {
    let basename = basename_from_name(&self.name)?;
    let _guard = library.lock(&basename).await;

    let locator = library.locator();
    let store = library.store();
    let descriptor_path = locator.descriptor_path(&basename);
    if store.exists(&descriptor_path).await? {
      return Err(ShelfError::DuplicatePaper(basename));
    }

    let metadata = self.extractor.extract(&self.bytes)?;
    debug!("Importing {basename} with {metadata:?}");

    ensure_folder(store, locator.root()).await?;
    ensure_folder(store, &locator.papers_dir()).await?;
    ensure_folder(store, &locator.descriptors_dir()).await?;

    let blob_path = locator.blob_path(&basename);
    match store.create_binary(&blob_path, &self.bytes).await {
      Ok(_) => {},
      Err(ShelfError::Io(e)) if e.kind() == ErrorKind::AlreadyExists => {
        warn!("{blob_path} already exists, keeping the existing file");
      },
      Err(e) => return Err(e),
    }

    let content = descriptor_document(&basename, &metadata);
    let entry = store.create(&descriptor_path, &content).await?;
    Descriptor::from_entry(basename, &entry, &content)
  }
}
