//! Editing state for one paper's metadata.
//!
//! A [`MetadataEditor`] is opened on a paper, takes edits to the four editable fields in
//! memory, and writes them only on [`MetadataEditor::save`]. Discarding an editor discards
//! the edits. Removal of the paper goes through the editor as well, behind a confirmation.

use super::*;

/// Question asked before an editor removes its paper.
pub const REMOVE_CONFIRMATION: &str = "Are you sure you want to remove this paper and its note?";

/// Pending edits for one paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEditor {
  /// Paper being edited
  basename: String,
  /// Title field
  title:    String,
  /// Author field
  author:   String,
  /// Status field
  status:   Status,
  /// Category field
  category: String,
}

impl MetadataEditor {
  /// Opens an editor initialized from the paper's descriptor.
  ///
  /// Missing fields start empty. A missing status starts as `to-read`, and so does a status
  /// that is not one of the known values (with a warning, since saving will replace it).
  pub async fn open<S: FileStore>(library: &Library<S>, basename: &str) -> Result<Self> {
    let descriptor = library.descriptor(basename).await?;
    let fields = descriptor.fields;
    let status = match fields.status.as_deref() {
      None | Some("") => Status::default(),
      Some(raw) => raw.parse().unwrap_or_else(|_| {
        warn!("{basename} has unknown status \"{raw}\", editing it as {}", Status::default());
        Status::default()
      }),
    };
    Ok(Self {
      basename: descriptor.basename,
      title: fields.title.unwrap_or_default(),
      author: fields.author.unwrap_or_default(),
      status,
      category: fields.category.unwrap_or_default(),
    })
  }

  /// The paper being edited.
  pub fn basename(&self) -> &str { &self.basename }

  /// Current title.
  pub fn title(&self) -> &str { &self.title }

  /// Current author.
  pub fn author(&self) -> &str { &self.author }

  /// Current status.
  pub fn status(&self) -> Status { self.status }

  /// Current category.
  pub fn category(&self) -> &str { &self.category }

  /// Edits the title.
  pub fn set_title(&mut self, title: impl Into<String>) { self.title = title.into(); }

  /// Edits the author.
  pub fn set_author(&mut self, author: impl Into<String>) { self.author = author.into(); }

  /// Edits the status.
  pub fn set_status(&mut self, status: Status) { self.status = status; }

  /// Edits the category.
  pub fn set_category(&mut self, category: impl Into<String>) { self.category = category.into(); }

  /// Writes all four fields to the descriptor and returns the reloaded descriptor.
  pub async fn save<S: FileStore>(&self, library: &Library<S>) -> Result<Descriptor> {
    Update::from(self).execute(library).await
  }

  /// Removes the paper after `confirm` approves [`REMOVE_CONFIRMATION`].
  ///
  /// Returns `None` without touching anything when `confirm` says no.
  pub async fn remove<S, F>(&self, library: &Library<S>, confirm: F) -> Result<Option<Removal>>
  where
    S: FileStore,
    F: FnOnce(&str) -> Result<bool>, {
    Remove::new(&self.basename).execute_confirmed(library, confirm).await
  }
}

impl From<&MetadataEditor> for Update {
  fn from(editor: &MetadataEditor) -> Self {
    Update {
      basename: editor.basename.clone(),
      title:    editor.title.clone(),
      author:   editor.author.clone(),
      status:   editor.status,
      category: editor.category.clone(),
    }
  }
}
