//! Note instruction: open or create a paper's companion note.

use std::io::ErrorKind;

use super::*;

/// A paper's note, and whether this call created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFile {
  /// The note on disk
  pub entry:   FileEntry,
  /// `true` when the note did not exist before
  pub created: bool,
}

/// Instruction that returns a paper's note, creating it first when there is none.
///
/// New notes link back to the PDF (when it exists) and the descriptor and carry a snapshot
/// of the author, publication year and category.
#[derive(Debug, Clone)]
pub struct CreateNote {
  /// Paper the note belongs to
  basename: String,
}

impl CreateNote {
  /// Opens or creates the note of the paper with this basename.
  pub fn new(basename: impl Into<String>) -> Self { Self { basename: basename.into() } }
}

#[async_trait]
impl LibraryInstruction for CreateNote {
  type Output = NoteFile;

  async fn execute<S: FileStore>(&self, library: &Library<S>) -> Result<Self::Output> {
    let _guard = library.lock(&self.basename).await;
    let locator = library.locator();
    let store = library.store();

    if let NoteLink::Open(entry) = library.resolve_note(&self.basename).await? {
      return Ok(NoteFile { entry, created: false });
    }

    let descriptor = library.descriptor(&self.basename).await?;
    let blob = library.blob(&self.basename).await?;

    ensure_folder(store, locator.root()).await?;
    ensure_folder(store, &locator.notes_dir()).await?;

    let note_path = locator.note_path(&self.basename);
    let content = note_document(
      &descriptor.path,
      blob.as_ref().map(|entry| entry.path.as_str()),
      &descriptor.fields,
    );
    match store.create(&note_path, &content).await {
      Ok(entry) => {
        debug!("Created note {note_path}");
        Ok(NoteFile { entry, created: true })
      },
      // Someone else wrote the note in the meantime; use theirs.
      Err(ShelfError::Io(e)) if e.kind() == ErrorKind::AlreadyExists => {
        let entry = store
          .get_file_by_path(&note_path)
          .await?
          .ok_or_else(|| ShelfError::Io(std::io::Error::from(ErrorKind::NotFound)))?;
        Ok(NoteFile { entry, created: false })
      },
      Err(e) => Err(e),
    }
  }
}
