//! Module for abstracting the "import" functionality of the [`shelf`] library.

use super::*;

/// Arguments that can be used for the [`Commands::Import`]
#[derive(Args, Clone)]
pub struct ImportArgs {
  /// PDF files or glob patterns (e.g. "~/Downloads/*.pdf")
  #[arg(required = true)]
  pub paths: Vec<String>,
}

/// Whether an argument should be expanded as a glob pattern.
fn is_pattern(arg: &str) -> bool { arg.contains(['*', '?', '[']) }

/// Expands the arguments into the files to import, reporting patterns that match nothing.
fn expand<I: UserInteraction>(interaction: &I, args: &[String]) -> Result<Vec<PathBuf>> {
  let mut files = Vec::new();
  for arg in args {
    if !is_pattern(arg) {
      files.push(PathBuf::from(arg));
      continue;
    }
    let matches: Vec<PathBuf> =
      glob::glob(arg)?.flatten().filter(|path| path.is_file()).collect();
    if matches.is_empty() {
      interaction.reply(ResponseContent::Info(&format!("No files match {arg}")))?;
    }
    files.extend(matches);
  }
  Ok(files)
}

/// Imports one file.
async fn import_file(library: &Library<LocalStore>, file: &Path) -> Result<Descriptor> {
  let bytes = tokio::fs::read(file).await?;
  let name = file.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
  Ok(Import::new(name, bytes, &PdfAnalyzer::new()).execute(library).await?)
}

/// Function for the [`Commands::Import`] in the CLI.
///
/// Every file is imported on its own: a failure is reported and the remaining files are
/// still imported. The command fails at the end if any import did.
pub async fn import<I: UserInteraction>(
  interaction: &I,
  library: &Library<LocalStore>,
  import_args: ImportArgs,
) -> Result<()> {
  let files = expand(interaction, &import_args.paths)?;
  let mut failed = 0;

  for file in &files {
    trace!("Importing {}", file.display());
    match import_file(library, file).await {
      Ok(descriptor) => interaction.reply(ResponseContent::Success(&format!(
        "Imported {} as {}",
        descriptor.display_title(),
        descriptor.basename
      )))?,
      Err(e) => {
        failed += 1;
        interaction.reply(ResponseContent::Error(e))?;
      },
    }
  }

  match failed {
    0 => Ok(()),
    failed => Err(ShelfdError::ImportFailed { failed, total: files.len() }),
  }
}
