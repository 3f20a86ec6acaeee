//! Update instruction: write a paper's editable metadata.
//!
//! The four editable fields (title, author, status, category) are written into the
//! descriptor's frontmatter. Every other key, `publicationYear` included, and the whole
//! document body are left as they were.

use serde_yaml::Value;

use super::*;

/// Instruction that overwrites the editable fields of one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
  /// Paper to update
  pub basename: String,
  /// New title
  pub title:    String,
  /// New author
  pub author:   String,
  /// New status
  pub status:   Status,
  /// New category
  pub category: String,
}

impl Update {
  /// Creates an update that writes empty fields and `to-read`; set the fields to write
  /// with the `with_*` builders, or start from [`MetadataEditor`] to keep current values.
  pub fn new(basename: impl Into<String>) -> Self {
    Self {
      basename: basename.into(),
      title:    String::new(),
      author:   String::new(),
      status:   Status::default(),
      category: String::new(),
    }
  }

  /// Sets the title.
  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = title.into();
    self
  }

  /// Sets the author.
  pub fn with_author(mut self, author: impl Into<String>) -> Self {
    self.author = author.into();
    self
  }

  /// Sets the status.
  pub fn with_status(mut self, status: Status) -> Self {
    self.status = status;
    self
  }

  /// Sets the category.
  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = category.into();
    self
  }
}

#[async_trait]
impl LibraryInstruction for Update {
  type Output = Descriptor;

  async fn execute<S: FileStore>(&self, library: &Library<S>) -> Result<Self::Output> {
    let _guard = library.lock(&self.basename).await;

    let path = library.locator().descriptor_path(&self.basename);
    if !library.store().exists(&path).await? {
      return Err(ShelfError::UnknownPaper(self.basename.clone()));
    }

    let fields = [
      (TITLE_KEY, self.title.clone()),
      (AUTHOR_KEY, self.author.clone()),
      (STATUS_KEY, self.status.as_str().to_string()),
      (CATEGORY_KEY, self.category.clone()),
    ];
    process_frontmatter(library.store(), &path, move |mapping| {
      for (key, value) in fields {
        mapping.insert(Value::from(key), Value::from(value));
      }
    })
    .await?;
    debug!("Saved metadata of {}", self.basename);

    library.descriptor(&self.basename).await
  }
}
