//! YAML frontmatter parsing and rewriting.
//!
//! Descriptors keep their metadata in a frontmatter block at the head of the file:
//!
//! ```text
//! ---
//! title: "Attention Is All You Need"
//! author: "Vaswani et al."
//! publicationYear: "2017"
//! status: "to-read"
//! category: ""
//! ---
//!
//! # [[Attention.pdf]]
//! ```
//!
//! Reading goes through [`parse_frontmatter`] and [`PaperFields`]; writing goes through
//! [`process_frontmatter`], which hands the block to a closure as a YAML mapping and
//! rewrites only that block, leaving the body byte-for-byte intact.

use serde_yaml::{Mapping, Value};

use super::*;

/// Frontmatter delimiter line.
const DELIMITER: &str = "---";

/// Frontmatter key for the title.
pub const TITLE_KEY: &str = "title";
/// Frontmatter key for the author list.
pub const AUTHOR_KEY: &str = "author";
/// Frontmatter key for the publication year.
pub const PUBLICATION_YEAR_KEY: &str = "publicationYear";
/// Frontmatter key for the reading status.
pub const STATUS_KEY: &str = "status";
/// Frontmatter key for the category.
pub const CATEGORY_KEY: &str = "category";

/// A markdown document split into its frontmatter source and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
  /// YAML between the delimiters, `None` when the document has no frontmatter
  pub yaml: Option<&'a str>,
  /// Everything after the closing delimiter line
  pub body: &'a str,
}

/// Splits a markdown document into frontmatter and body.
///
/// Frontmatter must start on the very first line with `---` and end at the next line that
/// is exactly `---`. Anything else is treated as a document without frontmatter.
pub fn split(content: &str) -> Document<'_> {
  let no_frontmatter = Document { yaml: None, body: content };

  let Some(rest) = strip_delimiter_line(content) else {
    return no_frontmatter;
  };

  let mut offset = 0;
  for line in rest.split_inclusive('\n') {
    if line.trim_end_matches(['\r', '\n']) == DELIMITER {
      return Document { yaml: Some(&rest[..offset]), body: &rest[offset + line.len()..] };
    }
    offset += line.len();
  }
  no_frontmatter
}

/// Strips an opening `---` line, returning what follows it.
fn strip_delimiter_line(content: &str) -> Option<&str> {
  let rest = content.strip_prefix(DELIMITER)?;
  rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Parses a document's frontmatter into a mapping; documents without frontmatter (or with
/// an empty block) yield an empty mapping.
pub fn parse_frontmatter(content: &str) -> Result<Mapping> {
  match split(content).yaml {
    Some(yaml) if !yaml.trim().is_empty() => match serde_yaml::from_str::<Value>(yaml)? {
      Value::Mapping(mapping) => Ok(mapping),
      Value::Null => Ok(Mapping::new()),
      other => {
        warn!("Frontmatter is not a mapping: {other:?}");
        Ok(Mapping::new())
      },
    },
    _ => Ok(Mapping::new()),
  }
}

/// Reads a frontmatter field as a string.
///
/// Strings are returned as-is, numbers and booleans are stringified, and anything else
/// (null, lists, nested mappings) counts as absent.
pub fn field(mapping: &Mapping, key: &str) -> Option<String> {
  match mapping.get(key)? {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    Value::Tagged(tagged) => match &tagged.value {
      Value::String(s) => Some(s.clone()),
      _ => None,
    },
    _ => None,
  }
}

/// The descriptor fields the library cares about, all optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperFields {
  /// Paper title
  pub title:            Option<String>,
  /// Author(s), free text
  pub author:           Option<String>,
  /// Publication year, free text
  pub publication_year: Option<String>,
  /// Raw status string, compared verbatim by the catalog
  pub status:           Option<String>,
  /// User-assigned category
  pub category:         Option<String>,
}

impl PaperFields {
  /// Extracts the known fields from a frontmatter mapping.
  pub fn from_mapping(mapping: &Mapping) -> Self {
    Self {
      title:            field(mapping, TITLE_KEY),
      author:           field(mapping, AUTHOR_KEY),
      publication_year: field(mapping, PUBLICATION_YEAR_KEY),
      status:           field(mapping, STATUS_KEY),
      category:         field(mapping, CATEGORY_KEY),
    }
  }

  /// Parses the known fields out of a whole markdown document.
  pub fn from_document(content: &str) -> Result<Self> {
    Ok(Self::from_mapping(&parse_frontmatter(content)?))
  }
}

/// Renders a mapping back into a document with the given body.
pub fn render(mapping: &Mapping, body: &str) -> Result<String> {
  let yaml = if mapping.is_empty() { String::new() } else { serde_yaml::to_string(mapping)? };
  Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{body}"))
}

/// Quotes a value as a double-quoted YAML scalar.
pub fn quote(value: &str) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push('"');
  for c in value.chars() {
    match c {
      '"' => quoted.push_str("\\\""),
      '\\' => quoted.push_str("\\\\"),
      '\n' => quoted.push_str("\\n"),
      '\r' => quoted.push_str("\\r"),
      '\t' => quoted.push_str("\\t"),
      _ => quoted.push(c),
    }
  }
  quoted.push('"');
  quoted
}

/// Rewrites the frontmatter of the file at `path` through `mutate`.
///
/// The closure receives the parsed frontmatter (empty if the file had none) and may change
/// it freely. Only the frontmatter block is re-rendered; the body is written back exactly
/// as it was read. Callers are responsible for serializing concurrent rewrites of the same
/// file.
pub async fn process_frontmatter<S, F>(store: &S, path: &str, mutate: F) -> Result<Mapping>
where
  S: FileStore + ?Sized,
  F: FnOnce(&mut Mapping) + Send, {
  let content = store.read(path).await?;
  let document = split(&content);
  let mut mapping = parse_frontmatter(&content)?;

  mutate(&mut mapping);

  let rendered = render(&mapping, document.body)?;
  store.modify(path, &rendered).await?;
  trace!("Rewrote frontmatter of {path}");
  Ok(mapping)
}
