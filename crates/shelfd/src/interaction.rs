//! Terminal interaction: prompts, confirmations and the way results are printed.

use chrono::Local;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Branch of a listing
pub static ITEM_PREFIX: &str = "├─";
/// Last branch of a listing
pub static LAST_ITEM_PREFIX: &str = "└─";
/// Continuation line under a branch
pub static CONTINUE_PREFIX: &str = "│  ";

/// Something to tell the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Full details of one paper
  Paper(&'a Descriptor),
  /// A catalog listing
  Papers(&'a [Descriptor]),
  /// The files a removal touched
  Removal(&'a Removal),
  /// An operation succeeded
  Success(&'a str),
  /// An operation failed but the command carries on
  Error(ShelfdError),
  /// Anything else
  Info(&'a str),
}

/// How commands talk to the user.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str) -> Result<bool>;

  /// Asks for a line of text, offering `default`.
  fn prompt(&self, message: &str, default: &str) -> Result<String>;

  /// Lets the user pick one of `items`. `None` means the user backed out.
  fn select(&self, message: &str, items: &[String], default: usize) -> Result<Option<usize>>;

  /// Shows a result.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// Formats a timestamp the way listings show it.
fn format_time(time: &chrono::DateTime<chrono::Utc>) -> String {
  time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// A field value, or `N/A` when it is missing or blank.
fn or_na(value: &Option<String>) -> &str {
  match value.as_deref().map(str::trim) {
    Some(v) if !v.is_empty() => v,
    _ => NOT_AVAILABLE,
  }
}

/// Interaction on the controlling terminal.
#[derive(Debug, Clone)]
pub struct Terminal {
  /// Answer every question with its default instead of asking
  accept_defaults: bool,
  /// Output handle
  term:            Term,
}

impl Terminal {
  /// Creates a terminal interaction; `accept_defaults` makes it non-interactive.
  pub fn new(accept_defaults: bool) -> Self { Self { accept_defaults, term: Term::stdout() } }

  /// Prints the detail block of one paper.
  fn print_paper(&self, paper: &Descriptor) -> Result<()> {
    let fields = &paper.fields;
    self.term.write_line(&format!("{}", style(paper.display_title()).white().bold()))?;
    let rows = [
      ("Author", or_na(&fields.author).to_string()),
      ("Publication Year", or_na(&fields.publication_year).to_string()),
      ("Status", paper.display_status().to_string()),
      ("Category", or_na(&fields.category).to_string()),
      ("Date Imported", format_time(&paper.created)),
      ("Last Updated", format_time(&paper.modified)),
      ("Descriptor", paper.path.clone()),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
      let prefix = if i + 1 == rows.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
      self.term.write_line(&format!(
        "   {} {}: {}",
        style(prefix).dim(),
        style(label).cyan(),
        style(value).yellow()
      ))?;
    }
    Ok(())
  }

  /// Prints a one-line-per-paper listing.
  fn print_papers(&self, papers: &[Descriptor]) -> Result<()> {
    self.term.write_line(&format!(
      "{} Found {} papers:",
      style(SUCCESS_PREFIX).green(),
      style(papers.len()).yellow()
    ))?;
    for (i, paper) in papers.iter().enumerate() {
      let prefix = if i + 1 == papers.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
      self.term.write_line(&format!(
        "   {} {} {}",
        style(prefix).dim(),
        style(paper.display_title()).white().bold(),
        style(format!("[{}]", paper.display_status())).magenta(),
      ))?;
      let continuation = if i + 1 == papers.len() { "   " } else { CONTINUE_PREFIX };
      self.term.write_line(&format!(
        "   {}  {} {} {}",
        style(continuation).dim(),
        style(or_na(&paper.fields.author)).cyan(),
        style(format!("· {}", or_na(&paper.fields.category))).dim(),
        style(format!("· {}", paper.basename)).dim(),
      ))?;
    }
    Ok(())
  }

  /// Prints the outcome of a removal.
  fn print_removal(&self, removal: &Removal) -> Result<()> {
    let (prefix, verb) = if removal.dry_run {
      (style(INFO_PREFIX).blue(), "Would remove")
    } else {
      (style(SUCCESS_PREFIX).green(), "Removed")
    };
    self.term.write_line(&format!("{prefix} {verb} {}:", style(&removal.basename).yellow()))?;
    for path in removal.paths() {
      self.term.write_line(&format!("   {} {}", style(ITEM_PREFIX).dim(), path))?;
    }
    for (path, reason) in &removal.failures {
      self.term.write_line(&format!(
        "{} Could not remove {}: {}",
        style(WARNING_PREFIX).yellow(),
        path,
        reason
      ))?;
    }
    Ok(())
  }
}

impl UserInteraction for Terminal {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      return Ok(true);
    }
    Ok(
      Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(false)
        .wait_for_newline(true)
        .interact()?,
    )
  }

  fn prompt(&self, message: &str, default: &str) -> Result<String> {
    if self.accept_defaults {
      return Ok(default.to_string());
    }
    Ok(
      Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{PROMPT_PREFIX}{message}"))
        .with_initial_text(default)
        .allow_empty(true)
        .interact_text()?,
    )
  }

  fn select(&self, message: &str, items: &[String], default: usize) -> Result<Option<usize>> {
    if self.accept_defaults {
      return Ok(None);
    }
    Ok(
      Select::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .items(items)
        .default(default)
        .interact_opt()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Paper(paper) => self.print_paper(paper)?,
      ResponseContent::Papers(papers) => self.print_papers(papers)?,
      ResponseContent::Removal(removal) => self.print_removal(removal)?,
      ResponseContent::Success(message) =>
        self.term.write_line(&format!("{} {message}", style(SUCCESS_PREFIX).green()))?,
      ResponseContent::Error(error) =>
        self.term.write_line(&format!("{} {error}", style(ERROR_PREFIX).red()))?,
      ResponseContent::Info(message) =>
        self.term.write_line(&format!("{} {message}", style(INFO_PREFIX).blue()))?,
    }
    Ok(())
  }
}
