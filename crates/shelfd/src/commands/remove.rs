//! Module for abstracting the "remove" functionality of the [`shelf`] library.

use super::*;

/// Arguments that can be used for the [`Commands::Remove`]
#[derive(Args, Clone)]
pub struct RemoveArgs {
  /// Basename of the paper (its PDF filename without `.pdf`)
  pub basename: String,

  /// Show what would be removed without removing anything
  #[arg(long)]
  pub dry_run: bool,
}

/// Removes a paper after asking for confirmation. Returns `false` when the user declined.
pub async fn confirm_and_remove<I: UserInteraction>(
  interaction: &I,
  library: &Library<LocalStore>,
  basename: &str,
) -> Result<bool> {
  let removal = Remove::new(basename)
    .execute_confirmed(library, |question| interaction.confirm(question))
    .await?;
  match removal {
    Some(removal) => {
      interaction.reply(ResponseContent::Removal(&removal))?;
      Ok(true)
    },
    None => {
      interaction.reply(ResponseContent::Info("Removal cancelled"))?;
      Ok(false)
    },
  }
}

/// Function for the [`Commands::Remove`] in the CLI.
pub async fn remove<I: UserInteraction>(
  interaction: &I,
  library: &Library<LocalStore>,
  remove_args: RemoveArgs,
) -> Result<()> {
  let RemoveArgs { basename, dry_run } = remove_args;

  if dry_run {
    let preview = Remove::new(&basename).dry_run().execute(library).await?;
    return interaction.reply(ResponseContent::Removal(&preview));
  }

  confirm_and_remove(interaction, library, &basename).await?;
  Ok(())
}
