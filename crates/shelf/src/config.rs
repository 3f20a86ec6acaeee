//! On-disk configuration for a shelf library.
//!
//! The configuration is a small TOML file naming the vault and the library folder inside
//! it:
//!
//! ```toml
//! vault_path = "/home/me/Documents/vault"
//! library_folder = "researcher-library"
//! use_trash = true
//! ```
//!
//! Only `vault_path` is required; the other keys fall back to their defaults.

use std::fs;

use super::*;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Library configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Root of the vault every library path is relative to
  pub vault_path:     PathBuf,
  /// Vault-relative folder holding the library
  #[serde(default = "default_library_folder")]
  pub library_folder: String,
  /// Whether removed files go to the vault trash instead of being deleted
  #[serde(default = "default_use_trash")]
  pub use_trash:      bool,
}

/// Serde default for [`Config::library_folder`].
fn default_library_folder() -> String { DEFAULT_LIBRARY_FOLDER.to_string() }

/// Serde default for [`Config::use_trash`].
fn default_use_trash() -> bool { true }

impl Default for Config {
  fn default() -> Self {
    Self {
      vault_path:     Self::default_vault_path(),
      library_folder: default_library_folder(),
      use_trash:      default_use_trash(),
    }
  }
}

impl Config {
  /// Default location of the configuration file, `<config dir>/shelf/config.toml`.
  pub fn default_path() -> Result<PathBuf> {
    dirs::config_dir()
      .map(|dir| dir.join("shelf").join(CONFIG_FILE))
      .ok_or_else(|| ShelfError::Config("Could not determine the user config directory".into()))
  }

  /// Default vault location, `<documents dir>/vault`.
  pub fn default_vault_path() -> PathBuf {
    dirs::document_dir().unwrap_or_else(|| PathBuf::from(".")).join("vault")
  }

  /// Reads a configuration file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let config: Self = toml::from_str(&content)?;
    if config.library_folder.trim_matches('/').is_empty() {
      return Err(ShelfError::Config(format!("{}: library_folder must not be empty", path.display())));
    }
    debug!("Loaded config from {}", path.display());
    Ok(config)
  }

  /// Writes the configuration, creating parent directories as needed.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(self)?)?;
    debug!("Saved config to {}", path.display());
    Ok(())
  }

  /// Sets the vault root.
  pub fn with_vault_path(mut self, vault_path: impl AsRef<Path>) -> Self {
    self.vault_path = vault_path.as_ref().to_path_buf();
    self
  }

  /// Sets the library folder.
  pub fn with_library_folder(mut self, library_folder: impl Into<String>) -> Self {
    self.library_folder = library_folder.into();
    self
  }

  /// Chooses between trashing and deleting removed files.
  pub fn with_trash(mut self, use_trash: bool) -> Self {
    self.use_trash = use_trash;
    self
  }
}
