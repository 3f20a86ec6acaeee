//! The basename join key and the file naming convention built on it.
//!
//! A paper has no identifier of its own. Its PDF, descriptor and note are tied together
//! only by sharing a basename, and every location is derived from that basename by the
//! pure path builders on [`PaperLocator`]. Paths are vault-relative and always use `/`,
//! so they can be written into wikilinks unchanged.
//!
//! ```
//! use shelf::locator::PaperLocator;
//!
//! let locator = PaperLocator::new("researcher-library");
//! assert_eq!(locator.blob_path("Foo"), "researcher-library/papers/Foo.pdf");
//! assert_eq!(locator.descriptor_path("Foo"), "researcher-library/papers/md/Foo.md");
//! assert_eq!(locator.note_path("Foo"), "researcher-library/notes/Foo.md");
//! ```

use super::*;

/// Default name of the library folder inside the vault.
pub const DEFAULT_LIBRARY_FOLDER: &str = "researcher-library";

/// Extension of blob files.
const PDF_EXTENSION: &str = "pdf";
/// Extension of descriptor and note files.
const MARKDOWN_EXTENSION: &str = "md";

/// Builds every conventional path of a paper from its basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperLocator {
  /// Library folder relative to the vault root, without trailing `/`
  root: String,
}

impl PaperLocator {
  /// Creates a locator for the library folder `root` (vault-relative).
  pub fn new(root: impl Into<String>) -> Self {
    let root = root.into().trim_matches('/').to_string();
    Self { root }
  }

  /// The library folder itself.
  pub fn root(&self) -> &str { &self.root }

  /// Folder holding the PDFs: `<library>/papers`.
  pub fn papers_dir(&self) -> String { format!("{}/papers", self.root) }

  /// Folder holding the descriptors: `<library>/papers/md`.
  pub fn descriptors_dir(&self) -> String { format!("{}/papers/md", self.root) }

  /// Folder holding the notes: `<library>/notes`.
  pub fn notes_dir(&self) -> String { format!("{}/notes", self.root) }

  /// `<library>/papers/<basename>.pdf`
  pub fn blob_path(&self, basename: &str) -> String {
    format!("{}/{basename}.{PDF_EXTENSION}", self.papers_dir())
  }

  /// `<library>/papers/md/<basename>.md`
  pub fn descriptor_path(&self, basename: &str) -> String {
    format!("{}/{basename}.{MARKDOWN_EXTENSION}", self.descriptors_dir())
  }

  /// `<library>/notes/<basename>.md`
  pub fn note_path(&self, basename: &str) -> String {
    format!("{}/{basename}.{MARKDOWN_EXTENSION}", self.notes_dir())
  }

  /// Recovers the basename from a descriptor path, if the path is one.
  pub fn basename_of_descriptor(&self, path: &str) -> Option<String> {
    let name = path.strip_prefix(&self.descriptors_dir())?.strip_prefix('/')?;
    if name.contains('/') {
      return None;
    }
    name.strip_suffix(&format!(".{MARKDOWN_EXTENSION}")).filter(|b| !b.is_empty()).map(Into::into)
  }
}

impl Default for PaperLocator {
  fn default() -> Self { Self::new(DEFAULT_LIBRARY_FOLDER) }
}

/// Derives the basename of an imported payload from its name.
///
/// Directory components are dropped and a trailing `.pdf` (any case) is removed. Names
/// that end up empty, or that consist only of dots, are rejected.
///
/// ```
/// use shelf::locator::basename_from_name;
///
/// assert_eq!(basename_from_name("Foo.pdf").unwrap(), "Foo");
/// assert_eq!(basename_from_name("/tmp/Bar Baz.PDF").unwrap(), "Bar Baz");
/// assert!(basename_from_name(".pdf").is_err());
/// ```
pub fn basename_from_name(name: &str) -> Result<String> {
  let file_name = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
  let basename = match file_name.len().checked_sub(PDF_EXTENSION.len() + 1) {
    Some(cut)
      if file_name.is_char_boundary(cut)
        && file_name[cut..].eq_ignore_ascii_case(&format!(".{PDF_EXTENSION}")) =>
      &file_name[..cut],
    _ => file_name,
  };

  if basename.is_empty() || basename.chars().all(|c| c == '.') {
    return Err(ShelfError::InvalidName(name.to_string()));
  }
  Ok(basename.to_string())
}

/// Renders a vault path as a wikilink.
pub fn wikilink(path: &str) -> String { format!("[[{path}]]") }
