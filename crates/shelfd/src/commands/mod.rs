//! The subcommands of the `shelf` binary.

use super::*;

pub mod browse;
pub mod edit;
pub mod import;
pub mod init;
pub mod list;
pub mod note;
pub mod remove;

pub use browse::browse;
pub use edit::{edit, edit_interactively, EditArgs};
pub use import::{import, ImportArgs};
pub use init::{init, InitOptions};
pub use list::{list, ListArgs};
pub use note::{note, NoteArgs};
pub use remove::{confirm_and_remove, remove, RemoveArgs};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write a configuration pointing at a vault
  Init(InitOptions),

  /// Import PDFs into the library
  Import(ImportArgs),

  /// List papers, optionally filtered, searched and sorted
  List(ListArgs),

  /// Edit a paper's title, author, status or category
  Edit(EditArgs),

  /// Remove a paper together with its PDF and note
  Remove(RemoveArgs),

  /// Open or create a paper's note
  Note(NoteArgs),

  /// Browse the catalog interactively
  Browse,
}

/// Opens a file with the platform's default application.
#[cfg(target_os = "windows")]
pub fn open_with_system_viewer(path: &Path) -> Result<()> {
  std::process::Command::new("cmd").arg("/C").arg("start").arg("").arg(path).spawn()?;
  Ok(())
}

/// Opens a file with the platform's default application.
#[cfg(target_os = "macos")]
pub fn open_with_system_viewer(path: &Path) -> Result<()> {
  std::process::Command::new("open").arg(path).spawn()?;
  Ok(())
}

/// Opens a file with the platform's default application.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn open_with_system_viewer(path: &Path) -> Result<()> {
  std::process::Command::new("xdg-open").arg(path).spawn()?;
  Ok(())
}

/// Opens a vault-relative file of the library with the system viewer.
pub fn open_in_vault(library: &Library<LocalStore>, path: &str) -> Result<()> {
  let absolute = library.store().resolve(path)?;
  debug!("Opening {}", absolute.display());
  open_with_system_viewer(&absolute)
}
