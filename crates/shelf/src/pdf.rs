//! PDF metadata extraction.
//!
//! Import seeds each descriptor from the PDF's document information dictionary. The
//! extraction step sits behind [`MetadataExtractor`] so callers can swap in their own
//! implementation; [`PdfAnalyzer`] reads the `/Info` dictionary with `lopdf`.

use lazy_static::lazy_static;
use lopdf::{Dictionary, Document, Object};
use regex::Regex;

use super::*;

lazy_static! {
  /// Year at the start of a PDF date string such as `D:20200131120000+01'00'`.
  static ref PDF_DATE_YEAR: Regex = Regex::new(r"^(?:D:)?([0-9]{4})").unwrap();
}

/// Bibliographic metadata pulled out of a PDF. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfMetadata {
  /// `/Title`
  pub title:            Option<String>,
  /// `/Author`
  pub author:           Option<String>,
  /// `/Subject`
  pub subject:          Option<String>,
  /// `/Keywords`
  pub keywords:         Option<String>,
  /// Year of `/CreationDate`
  pub publication_year: Option<String>,
}

/// Turns raw PDF bytes into [`PdfMetadata`].
///
/// A returned error is a hard failure and aborts the import that asked for it. Missing
/// individual fields are not errors.
pub trait MetadataExtractor: Send + Sync {
  /// Extracts metadata from a PDF held in memory.
  fn extract(&self, bytes: &[u8]) -> Result<PdfMetadata>;
}

/// Extractor backed by `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfAnalyzer;

impl PdfAnalyzer {
  /// Creates a new analyzer.
  pub fn new() -> Self { Self }

  /// Extracts metadata from a PDF on disk.
  pub fn analyze<P: AsRef<Path>>(&self, path: P) -> Result<PdfMetadata> {
    let doc = Document::load(path)?;
    Ok(self.extract_metadata(&doc))
  }

  /// Reads the fields of the trailer's `/Info` dictionary.
  fn extract_metadata(&self, doc: &Document) -> PdfMetadata {
    let info = match doc.trailer.get(b"Info") {
      Ok(Object::Reference(id)) => doc.get_object(*id).and_then(Object::as_dict).ok(),
      Ok(Object::Dictionary(dict)) => Some(dict),
      _ => None,
    };

    let Some(info) = info else {
      debug!("PDF has no /Info dictionary");
      return PdfMetadata::default();
    };

    let creation_date = get_text_from_dict(doc, info, "CreationDate");
    let metadata = PdfMetadata {
      title:            get_text_from_dict(doc, info, "Title"),
      author:           get_text_from_dict(doc, info, "Author"),
      subject:          get_text_from_dict(doc, info, "Subject"),
      keywords:         get_text_from_dict(doc, info, "Keywords"),
      publication_year: creation_date.as_deref().and_then(year_of_pdf_date),
    };
    trace!("Extracted {metadata:?}");
    metadata
  }
}

impl MetadataExtractor for PdfAnalyzer {
  fn extract(&self, bytes: &[u8]) -> Result<PdfMetadata> {
    let doc = Document::load_mem(bytes)?;
    Ok(self.extract_metadata(&doc))
  }
}

/// Reads a text string from an info dictionary, resolving references. Empty and
/// whitespace-only values count as missing.
fn get_text_from_dict(doc: &Document, dict: &Dictionary, key: &str) -> Option<String> {
  let object = match dict.get(key.as_bytes()).ok()? {
    Object::Reference(id) => doc.get_object(*id).ok()?,
    other => other,
  };
  let Object::String(bytes, _) = object else {
    return None;
  };

  // UTF-16BE strings carry a byte order mark.
  let text = if bytes.starts_with(&[0xFE, 0xFF]) {
    let (cow, ..) = encoding_rs::UTF_16BE.decode(&bytes[2..]);
    cow.into_owned()
  } else {
    String::from_utf8_lossy(bytes).into_owned()
  };

  let text = text.trim_matches(char::from(0)).trim();
  (!text.is_empty()).then(|| text.to_string())
}

/// The year of a PDF date string.
fn year_of_pdf_date(date: &str) -> Option<String> {
  PDF_DATE_YEAR.captures(date.trim()).map(|captures| captures[1].to_string())
}
