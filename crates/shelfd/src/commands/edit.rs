//! Module for abstracting the "edit" functionality of the [`shelf`] library.

use super::*;

/// Arguments that can be used for the [`Commands::Edit`]
#[derive(Args, Clone)]
pub struct EditArgs {
  /// Basename of the paper (its PDF filename without `.pdf`)
  pub basename: String,

  /// New title
  #[arg(long)]
  pub title: Option<String>,

  /// New author
  #[arg(long)]
  pub author: Option<String>,

  /// New status (to-read, reading, finished, re-read)
  #[arg(long)]
  pub status: Option<String>,

  /// New category
  #[arg(long)]
  pub category: Option<String>,
}

impl EditArgs {
  /// Whether any field was given on the command line.
  fn has_edits(&self) -> bool {
    self.title.is_some() || self.author.is_some() || self.status.is_some() || self.category.is_some()
  }
}

/// Walks the user through every field of the editor.
pub fn edit_interactively<I: UserInteraction>(
  interaction: &I,
  editor: &mut MetadataEditor,
) -> Result<()> {
  let title = interaction.prompt("Title", editor.title())?;
  editor.set_title(title);
  let author = interaction.prompt("Author", editor.author())?;
  editor.set_author(author);

  let statuses: Vec<String> = Status::ALL.iter().map(ToString::to_string).collect();
  let current = Status::ALL.iter().position(|status| *status == editor.status()).unwrap_or(0);
  if let Some(choice) = interaction.select("Status", &statuses, current)? {
    editor.set_status(Status::ALL[choice]);
  }

  let category = interaction.prompt("Category", editor.category())?;
  editor.set_category(category);
  Ok(())
}

/// Function for the [`Commands::Edit`] in the CLI.
///
/// Fields passed as flags are written directly; with no flags the fields are prompted for
/// one by one, starting from their current values.
pub async fn edit<I: UserInteraction>(
  interaction: &I,
  library: &Library<LocalStore>,
  edit_args: EditArgs,
) -> Result<()> {
  let mut editor = MetadataEditor::open(library, &edit_args.basename).await?;

  if edit_args.has_edits() {
    let EditArgs { title, author, status, category, .. } = edit_args;
    if let Some(title) = title {
      editor.set_title(title);
    }
    if let Some(author) = author {
      editor.set_author(author);
    }
    if let Some(status) = status {
      editor.set_status(status.parse()?);
    }
    if let Some(category) = category {
      editor.set_category(category);
    }
  } else {
    edit_interactively(interaction, &mut editor)?;
  }

  let descriptor = editor.save(library).await?;
  interaction.reply(ResponseContent::Success("Metadata saved"))?;
  interaction.reply(ResponseContent::Paper(&descriptor))
}
