//! Module for setting up a [`shelf`] configuration.

use super::*;

/// Arguments that can be used for the [`Commands::Init`]
#[derive(Args, Clone)]
pub struct InitOptions {
  /// Folder inside the vault that holds the library
  #[arg(long)]
  pub library_folder: Option<String>,

  /// Delete removed files permanently instead of moving them to the vault trash
  #[arg(long, action = ArgAction::SetTrue)]
  pub no_trash: bool,
}

/// Function for the [`Commands::Init`] in the CLI.
pub fn init<I: UserInteraction>(interaction: &I, cli: &Cli, init_options: InitOptions) -> Result<()> {
  let InitOptions { library_folder, no_trash } = init_options;
  let config_path = cli.config_path()?;

  // Vault location
  let config = if let Some(vault) = &cli.vault {
    Config::default().with_vault_path(vault)
  } else if !interaction.confirm(&format!(
    "Would you like to use the default vault {:?}?",
    Config::default_vault_path(),
  ))? {
    interaction.reply(ResponseContent::Info("Please pass in your vault using --vault"))?;
    return Ok(());
  } else {
    Config::default()
  };

  let config = match library_folder {
    Some(folder) => config.with_library_folder(folder),
    None => config,
  }
  .with_trash(!no_trash);

  if config_path.exists()
    && !interaction.confirm("A configuration already exists, do you want to overwrite it?")?
  {
    interaction.reply(ResponseContent::Info(
      "Keeping the existing configuration. Pass --config to write one elsewhere.",
    ))?;
    return Ok(());
  }

  std::fs::create_dir_all(config.vault_path.join(&config.library_folder))?;
  config.save(&config_path)?;

  interaction.reply(ResponseContent::Success(&format!(
    "Created shelf configuration with\nConfig path: {:?}\nVault: {:?}\nLibrary folder: {}\nUse \
     trash: {}",
    config_path, config.vault_path, config.library_folder, config.use_trash,
  )))?;
  Ok(())
}
