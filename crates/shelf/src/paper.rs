//! Reading statuses, catalog entries and the documents the library writes.
//!
//! A paper is never stored as an object. What the catalog works with is a [`Descriptor`]:
//! the parsed frontmatter of a descriptor file together with that file's timestamps. The
//! templates in this module produce the descriptor and note documents written on import
//! and on note creation.

use super::*;

/// Placeholder shown for missing metadata in notes and listings.
pub const NOT_AVAILABLE: &str = "N/A";

/// Where a reader is with a paper.
///
/// The descriptor stores the kebab-case string. The catalog compares that string
/// verbatim, so the spelling here is part of the file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
  /// Not started yet; the status every import starts with
  #[default]
  ToRead,
  /// Currently being read
  Reading,
  /// Read to the end
  Finished,
  /// Worth another pass
  ReRead,
}

impl Status {
  /// Every status, in workflow order.
  pub const ALL: [Status; 4] = [Status::ToRead, Status::Reading, Status::Finished, Status::ReRead];

  /// The string stored in frontmatter.
  pub fn as_str(&self) -> &'static str {
    match self {
      Status::ToRead => "to-read",
      Status::Reading => "reading",
      Status::Finished => "finished",
      Status::ReRead => "re-read",
    }
  }
}

impl Display for Status {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Status {
  type Err = ShelfError;

  fn from_str(s: &str) -> Result<Self> {
    Status::ALL
      .into_iter()
      .find(|status| status.as_str() == s)
      .ok_or_else(|| ShelfError::InvalidStatus(s.to_string()))
  }
}

/// One catalog entry: a descriptor file and its parsed metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
  /// The join key shared with the blob and note
  pub basename: String,
  /// Vault path of the descriptor file
  pub path:     String,
  /// Parsed frontmatter fields
  pub fields:   PaperFields,
  /// Creation time of the descriptor, i.e. the import date
  pub created:  DateTime<Utc>,
  /// Last modification time of the descriptor
  pub modified: DateTime<Utc>,
}

impl Descriptor {
  /// Builds an entry from a listed file and its contents.
  pub fn from_entry(basename: impl Into<String>, entry: &FileEntry, content: &str) -> Result<Self> {
    Ok(Self {
      basename: basename.into(),
      path:     entry.path.clone(),
      fields:   PaperFields::from_document(content)?,
      created:  entry.created,
      modified: entry.modified,
    })
  }

  /// Title to show: the frontmatter title, or the PDF filename when there is none.
  pub fn display_title(&self) -> String {
    match self.fields.title.as_deref().map(str::trim) {
      Some(title) if !title.is_empty() => title.to_string(),
      _ => format!("{}.pdf", self.basename),
    }
  }

  /// Status to show, with the `to-read` default for descriptors that have none.
  pub fn display_status(&self) -> &str {
    match self.fields.status.as_deref() {
      Some(status) if !status.is_empty() => status,
      _ => Status::default().as_str(),
    }
  }
}

/// Renders a freshly imported descriptor.
///
/// ```
/// use shelf::{paper::descriptor_document, pdf::PdfMetadata};
///
/// let metadata = PdfMetadata {
///   title: Some("T".into()),
///   author: Some("A".into()),
///   publication_year: Some("2020".into()),
///   ..Default::default()
/// };
/// assert_eq!(
///   descriptor_document("Foo", &metadata),
///   "---\ntitle: \"T\"\nauthor: \"A\"\npublicationYear: \"2020\"\nstatus: \"to-read\"\ncategory: \
///    \"\"\n---\n\n# [[Foo.pdf]]\n\n"
/// );
/// ```
pub fn descriptor_document(basename: &str, metadata: &pdf::PdfMetadata) -> String {
  let value = |field: &Option<String>| quote(field.as_deref().unwrap_or_default());
  format!(
    "---\n{TITLE_KEY}: {}\n{AUTHOR_KEY}: {}\n{PUBLICATION_YEAR_KEY}: {}\n{STATUS_KEY}: {}\n{CATEGORY_KEY}: \
     {}\n---\n\n# {}\n\n",
    value(&metadata.title),
    value(&metadata.author),
    value(&metadata.publication_year),
    quote(Status::ToRead.as_str()),
    quote(""),
    wikilink(&format!("{basename}.pdf")),
  )
}

/// Renders a new note for a paper.
///
/// `blob_path` is `None` when the PDF is missing, in which case the PDF line is left
/// empty. Missing metadata shows as `N/A`.
pub fn note_document(
  descriptor_path: &str,
  blob_path: Option<&str>,
  fields: &PaperFields,
) -> String {
  let value = |field: &Option<String>| match field.as_deref().map(str::trim) {
    Some(v) if !v.is_empty() => v.to_string(),
    _ => NOT_AVAILABLE.to_string(),
  };
  format!(
    "**PDF**: {}\n**Paper**: {}\n**Author**: {}\n**Publication Year**: {}\n**Category**: \
     {}\n\n## Notes\n\n",
    blob_path.map(wikilink).unwrap_or_default(),
    wikilink(descriptor_path),
    value(&fields.author),
    value(&fields.publication_year),
    value(&fields.category),
  )
}
