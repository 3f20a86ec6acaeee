//! Module for abstracting the note functionality of the [`shelf`] library.

use super::*;

/// Arguments that can be used for the [`Commands::Note`]
#[derive(Args, Clone)]
pub struct NoteArgs {
  /// Basename of the paper (its PDF filename without `.pdf`)
  pub basename: String,

  /// Open the note with the system's default application
  #[arg(long)]
  pub open: bool,

  /// Open the paper's PDF with the system's default application
  #[arg(long)]
  pub pdf: bool,
}

/// Function for the [`Commands::Note`] in the CLI.
pub async fn note<I: UserInteraction>(
  interaction: &I,
  library: &Library<LocalStore>,
  note_args: NoteArgs,
) -> Result<()> {
  let NoteArgs { basename, open, pdf } = note_args;

  let note = CreateNote::new(&basename).execute(library).await?;
  let message = if note.created {
    format!("Created note {}", note.entry.path)
  } else {
    format!("Note {}", note.entry.path)
  };
  interaction.reply(ResponseContent::Success(&message))?;

  if open {
    open_in_vault(library, &note.entry.path)?;
  }
  if pdf {
    match library.blob(&basename).await? {
      Some(blob) => open_in_vault(library, &blob.path)?,
      None => interaction.reply(ResponseContent::Info("This paper has no PDF"))?,
    }
  }
  Ok(())
}
