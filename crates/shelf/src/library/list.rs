//! Catalog instruction: list the library through the filter/search/sort pipeline.

use super::*;
use crate::catalog::{self, Session, SortOrder, StatusFilter};

/// A query over the library's descriptors.
///
/// ```no_run
/// use shelf::{
///   catalog::{SortOrder, StatusFilter},
///   library::{Catalog, Library},
///   paper::Status,
///   prelude::*,
///   store::LocalStore,
/// };
///
/// # async fn example() -> Result<(), ShelfError> {
/// let library = Library::new(LocalStore::new("vault"), "researcher-library");
/// let reading = Catalog::new()
///   .with_status(StatusFilter::Only(Status::Reading))
///   .with_sort(SortOrder::UpdatedDateDesc)
///   .execute(&library)
///   .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  /// Status filter
  status_filter: StatusFilter,
  /// Free-text search term
  search:        String,
  /// Result order
  sort:          SortOrder,
}

impl Catalog {
  /// Lists everything in listing order.
  pub fn new() -> Self { Self::default() }

  /// Uses the settings of an open view.
  pub fn from_session(session: &Session) -> Self {
    Self {
      status_filter: session.status_filter,
      search:        session.search.clone(),
      sort:          session.sort,
    }
  }

  /// Restricts the listing by status.
  pub fn with_status(mut self, filter: StatusFilter) -> Self {
    self.status_filter = filter;
    self
  }

  /// Restricts the listing to title/author/category matches.
  pub fn with_search(mut self, search: impl Into<String>) -> Self {
    self.search = search.into();
    self
  }

  /// Orders the listing.
  pub fn with_sort(mut self, sort: SortOrder) -> Self {
    self.sort = sort;
    self
  }
}

#[async_trait]
impl LibraryInstruction for Catalog {
  type Output = Vec<Descriptor>;

  async fn execute<S: FileStore>(&self, library: &Library<S>) -> Result<Self::Output> {
    let descriptors = library.descriptors().await?;
    let visible = catalog::run(descriptors, self.status_filter, &self.search, self.sort);
    trace!(
      "Catalog ({}, {:?}, {}) shows {} papers",
      self.status_filter,
      self.search,
      self.sort.as_str(),
      visible.len()
    );
    Ok(visible)
  }
}
