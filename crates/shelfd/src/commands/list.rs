//! Module for abstracting the "list" functionality of the [`shelf`] library.

use serde::Serialize;

use super::*;

/// Arguments that can be used for the [`Commands::List`]
#[derive(Args, Clone)]
pub struct ListArgs {
  /// Only show papers with this status (to-read, reading, finished, re-read or all)
  #[arg(long, default_value = "all")]
  pub status: String,

  /// Only show papers whose title, author or category contains this text
  #[arg(long, default_value = "")]
  pub search: String,

  /// Order of the listing (none, import-asc, import-desc, updated-asc, updated-desc)
  #[arg(long, default_value = "none")]
  pub sort: String,

  /// Print the listing as JSON
  #[arg(long)]
  pub json: bool,
}

/// One row of the JSON listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListedPaper<'a> {
  /// The join key
  basename:         &'a str,
  /// Title, falling back to the PDF filename
  title:            String,
  /// Author as stored
  author:           Option<&'a str>,
  /// Publication year as stored
  publication_year: Option<&'a str>,
  /// Status, defaulting to `to-read`
  status:           &'a str,
  /// Category as stored
  category:         Option<&'a str>,
  /// Descriptor path
  path:             &'a str,
  /// Import date
  imported:         chrono::DateTime<chrono::Utc>,
  /// Last update
  updated:          chrono::DateTime<chrono::Utc>,
}

impl<'a> From<&'a Descriptor> for ListedPaper<'a> {
  fn from(paper: &'a Descriptor) -> Self {
    Self {
      basename:         &paper.basename,
      title:            paper.display_title(),
      author:           paper.fields.author.as_deref(),
      publication_year: paper.fields.publication_year.as_deref(),
      status:           paper.display_status(),
      category:         paper.fields.category.as_deref(),
      path:             &paper.path,
      imported:         paper.created,
      updated:          paper.modified,
    }
  }
}

/// Function for the [`Commands::List`] in the CLI.
pub async fn list<I: UserInteraction>(
  interaction: &I,
  library: &Library<LocalStore>,
  list_args: ListArgs,
) -> Result<()> {
  let ListArgs { status, search, sort, json } = list_args;
  let papers = Catalog::new()
    .with_status(status.parse::<StatusFilter>()?)
    .with_search(search)
    .with_sort(sort.parse::<SortOrder>()?)
    .execute(library)
    .await?;

  if json {
    let rows: Vec<ListedPaper> = papers.iter().map(ListedPaper::from).collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    return Ok(());
  }

  if papers.is_empty() {
    interaction.reply(ResponseContent::Info("No papers found"))
  } else {
    interaction.reply(ResponseContent::Papers(&papers))
  }
}
