//! The catalog pipeline: status filter, text search, sort.
//!
//! [`run`] is a pure function of the descriptor list and the three view settings. It is
//! cheap enough to recompute in full on every change, which is what the catalog view does.
//! [`Session`] holds the settings for one open view.
//!
//! # Examples
//!
//! ```
//! use shelf::catalog::{Session, SortOrder, StatusFilter};
//! use shelf::paper::Status;
//!
//! let mut session = Session::new();
//! session.set_status_filter(StatusFilter::Only(Status::Reading));
//! session.set_search("lamport");
//! session.set_sort(SortOrder::UpdatedDateDesc);
//!
//! let visible = session.run(Vec::new());
//! assert!(visible.is_empty());
//! ```

use std::cmp::Ordering;

use super::*;

/// Which statuses pass the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
  /// Every descriptor passes
  #[default]
  All,
  /// Only descriptors whose `status` field is exactly this value
  Only(Status),
}

impl StatusFilter {
  /// Whether a descriptor passes.
  ///
  /// The raw field is compared verbatim; a descriptor without a status only passes `All`.
  pub fn matches(&self, descriptor: &Descriptor) -> bool {
    match self {
      StatusFilter::All => true,
      StatusFilter::Only(status) => descriptor.fields.status.as_deref() == Some(status.as_str()),
    }
  }
}

impl Display for StatusFilter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      StatusFilter::All => f.write_str("All"),
      StatusFilter::Only(status) => status.fmt(f),
    }
  }
}

impl FromStr for StatusFilter {
  type Err = ShelfError;

  fn from_str(s: &str) -> Result<Self> {
    if s.eq_ignore_ascii_case("all") {
      Ok(StatusFilter::All)
    } else {
      s.parse().map(StatusFilter::Only)
    }
  }
}

/// How to order the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
  /// Keep the store's listing order, which is unspecified and may differ between stores
  #[default]
  None,
  /// Oldest import first
  ImportDateAsc,
  /// Newest import first
  ImportDateDesc,
  /// Least recently updated first
  UpdatedDateAsc,
  /// Most recently updated first
  UpdatedDateDesc,
}

impl SortOrder {
  /// Every sort order, in menu order.
  pub const ALL: [SortOrder; 5] = [
    SortOrder::None,
    SortOrder::ImportDateAsc,
    SortOrder::ImportDateDesc,
    SortOrder::UpdatedDateAsc,
    SortOrder::UpdatedDateDesc,
  ];

  /// Stable identifier, as accepted by [`FromStr`] along with kebab-case forms such as
  /// `updated-desc`.
  pub fn as_str(&self) -> &'static str {
    match self {
      SortOrder::None => "None",
      SortOrder::ImportDateAsc => "ImportDateAsc",
      SortOrder::ImportDateDesc => "ImportDateDesc",
      SortOrder::UpdatedDateAsc => "UpdatedDateAsc",
      SortOrder::UpdatedDateDesc => "UpdatedDateDesc",
    }
  }

  /// Human-readable label.
  pub fn label(&self) -> &'static str {
    match self {
      SortOrder::None => "None",
      SortOrder::ImportDateAsc => "Import Date (Oldest First)",
      SortOrder::ImportDateDesc => "Import Date (Newest First)",
      SortOrder::UpdatedDateAsc => "Updated Date (Oldest First)",
      SortOrder::UpdatedDateDesc => "Updated Date (Newest First)",
    }
  }

  /// Compares two descriptors, or `None` when the order leaves the list alone.
  fn compare(&self, a: &Descriptor, b: &Descriptor) -> Option<Ordering> {
    let ordering = match self {
      SortOrder::None => return None,
      SortOrder::ImportDateAsc => a.created.cmp(&b.created),
      SortOrder::ImportDateDesc => b.created.cmp(&a.created),
      SortOrder::UpdatedDateAsc => a.modified.cmp(&b.modified),
      SortOrder::UpdatedDateDesc => b.modified.cmp(&a.modified),
    };
    Some(ordering)
  }
}

impl Display for SortOrder {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.label()) }
}

impl FromStr for SortOrder {
  type Err = ShelfError;

  fn from_str(s: &str) -> Result<Self> {
    // "updated-date-desc", "UpdatedDateDesc" and "updated-desc" all name the same order.
    let normalize = |s: &str| {
      s.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase()
        .replace("date", "")
    };
    let wanted = normalize(s);
    SortOrder::ALL
      .into_iter()
      .find(|order| normalize(order.as_str()) == wanted)
      .ok_or_else(|| ShelfError::InvalidSortOrder(s.to_string()))
  }
}

/// Whether a descriptor matches a search term.
///
/// The term matches when it is a case-insensitive substring of the title, author or
/// category. An empty term matches everything; a missing field never matches a
/// non-empty term.
pub fn matches_search(descriptor: &Descriptor, term: &str) -> bool {
  if term.is_empty() {
    return true;
  }
  let term = term.to_lowercase();
  let fields = &descriptor.fields;
  [&fields.title, &fields.author, &fields.category]
    .into_iter()
    .any(|field| field.as_deref().unwrap_or_default().to_lowercase().contains(&term))
}

/// Runs the catalog pipeline: status filter, then search, then a stable sort.
pub fn run(
  descriptors: Vec<Descriptor>,
  filter: StatusFilter,
  search: &str,
  sort: SortOrder,
) -> Vec<Descriptor> {
  let mut visible: Vec<Descriptor> = descriptors
    .into_iter()
    .filter(|descriptor| filter.matches(descriptor))
    .filter(|descriptor| matches_search(descriptor, search))
    .collect();

  // `sort_by` is stable, so equal timestamps keep their listing order.
  if sort != SortOrder::None {
    visible.sort_by(|a, b| sort.compare(a, b).unwrap_or(Ordering::Equal));
  }
  visible
}

/// The settings of one open catalog view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
  /// Status filter, `All` by default
  pub status_filter: StatusFilter,
  /// Free-text search term, empty by default
  pub search:        String,
  /// Sort order, `None` by default
  pub sort:          SortOrder,
}

impl Session {
  /// A session with nothing filtered and no sorting.
  pub fn new() -> Self { Self::default() }

  /// Changes the status filter.
  pub fn set_status_filter(&mut self, filter: StatusFilter) { self.status_filter = filter; }

  /// Changes the search term.
  pub fn set_search(&mut self, search: impl Into<String>) { self.search = search.into(); }

  /// Changes the sort order.
  pub fn set_sort(&mut self, sort: SortOrder) { self.sort = sort; }

  /// Runs the pipeline with this session's settings.
  pub fn run(&self, descriptors: Vec<Descriptor>) -> Vec<Descriptor> {
    run(descriptors, self.status_filter, &self.search, self.sort)
  }
}
