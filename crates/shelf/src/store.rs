//! File store abstraction over the vault.
//!
//! The library never touches the file system directly. Every read, write and deletion
//! goes through a [`FileStore`], which addresses files by vault-relative `/`-separated
//! paths. [`LocalStore`] implements it over a directory on disk.
//!
//! Store semantics follow the usual note-taking host conventions:
//! - `create_folder`, `create` and `create_binary` fail with
//!   [`std::io::ErrorKind::AlreadyExists`] when the target exists; callers decide whether
//!   that is benign (see [`ensure_folder`])
//! - `modify` rewrites an existing file in place, keeping its creation time. The rewrite
//!   is not atomic, so [`LocalStore`] first stages the new text in a sibling
//!   `<name>.staged` file that survives an interrupted rewrite
//! - `trash` moves a file somewhere recoverable instead of destroying it
//! - `list` returns files in whatever order the underlying directory listing yields,
//!   which is unspecified and differs across platforms and file systems

use std::{io::ErrorKind, path::Component, time::SystemTime};

use tokio::io::AsyncWriteExt;

use super::*;

/// Name of the recoverable trash folder at the vault root.
pub const TRASH_FOLDER: &str = ".trash";

/// Suffix of the sibling file that holds new contents while a file is rewritten.
pub const STAGED_SUFFIX: &str = ".staged";

/// A file known to the store, with the timestamps the catalog sorts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
  /// Vault-relative path
  pub path:     String,
  /// Creation time, used as the import date
  pub created:  DateTime<Utc>,
  /// Last modification time
  pub modified: DateTime<Utc>,
  /// Size in bytes
  pub size:     u64,
}

impl FileEntry {
  /// File name without its extension.
  pub fn basename(&self) -> &str {
    let name = self.path.rsplit('/').next().unwrap_or_default();
    match name.rfind('.') {
      Some(0) | None => name,
      Some(dot) => &name[..dot],
    }
  }

  /// File extension without the dot, if any.
  pub fn extension(&self) -> Option<&str> {
    let name = self.path.rsplit('/').next().unwrap_or_default();
    match name.rfind('.') {
      Some(0) | None => None,
      Some(dot) => Some(&name[dot + 1..]),
    }
  }
}

/// Hierarchical, path-addressed storage backing a vault.
#[async_trait]
pub trait FileStore: Send + Sync {
  /// Whether a file or folder exists at `path`.
  async fn exists(&self, path: &str) -> Result<bool>;

  /// Creates a folder; fails with `AlreadyExists` if it is already there.
  async fn create_folder(&self, path: &str) -> Result<()>;

  /// Creates a new binary file; fails with `AlreadyExists` if it is already there.
  async fn create_binary(&self, path: &str, bytes: &[u8]) -> Result<FileEntry>;

  /// Creates a new text file; fails with `AlreadyExists` if it is already there.
  async fn create(&self, path: &str, text: &str) -> Result<FileEntry>;

  /// Reads a text file.
  async fn read(&self, path: &str) -> Result<String>;

  /// Replaces the contents of an existing text file.
  ///
  /// The file keeps its identity (and so its creation time). A rewrite in place is not atomic;
  /// stores that cannot swap files without losing the creation time should keep a recoverable
  /// copy of the new text until the rewrite is done.
  async fn modify(&self, path: &str, text: &str) -> Result<()>;

  /// Permanently deletes a file.
  async fn delete(&self, path: &str) -> Result<()>;

  /// Moves a file to the store's recoverable trash.
  async fn trash(&self, path: &str) -> Result<()>;

  /// Looks up a file, returning `None` when nothing is there.
  async fn get_file_by_path(&self, path: &str) -> Result<Option<FileEntry>>;

  /// Lists the files (not folders) directly inside `dir`. A missing folder lists as empty.
  async fn list(&self, dir: &str) -> Result<Vec<FileEntry>>;
}

/// Creates a folder unless it already exists.
pub async fn ensure_folder<S: FileStore + ?Sized>(store: &S, path: &str) -> Result<()> {
  match store.create_folder(path).await {
    Err(ShelfError::Io(e)) if e.kind() == ErrorKind::AlreadyExists => {
      trace!("Folder {path} already exists");
      Ok(())
    },
    other => other,
  }
}

/// A [`FileStore`] over a directory on the local file system.
#[derive(Debug, Clone)]
pub struct LocalStore {
  /// The vault directory every path is resolved against
  root: PathBuf,
}

impl LocalStore {
  /// Creates a store rooted at the vault directory `root`.
  pub fn new(root: impl AsRef<Path>) -> Self { Self { root: root.as_ref().to_path_buf() } }

  /// The vault directory.
  pub fn root(&self) -> &Path { &self.root }

  /// Resolves a vault path to an absolute location, refusing anything that would leave
  /// the vault.
  pub fn resolve(&self, path: &str) -> Result<PathBuf> {
    let relative = Path::new(path);
    let mut resolved = self.root.clone();
    for component in relative.components() {
      match component {
        Component::Normal(part) => resolved.push(part),
        Component::CurDir => {},
        _ => return Err(ShelfError::PathEscape(path.to_string())),
      }
    }
    Ok(resolved)
  }

  /// Builds a [`FileEntry`] for an on-disk file.
  async fn entry(&self, path: &str, absolute: &Path) -> Result<FileEntry> {
    let metadata = tokio::fs::metadata(absolute).await?;
    let modified = metadata.modified()?;
    // Not every file system records birth times.
    let created = metadata.created().unwrap_or(modified);
    Ok(FileEntry {
      path:     path.to_string(),
      created:  to_utc(created),
      modified: to_utc(modified),
      size:     metadata.len(),
    })
  }

  /// Writes a brand new file, failing if the path is taken.
  async fn create_new(&self, path: &str, bytes: &[u8]) -> Result<FileEntry> {
    let absolute = self.resolve(path)?;
    let mut file = tokio::fs::OpenOptions::new().write(true).create_new(true).open(&absolute).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);
    debug!("Created {path}");
    self.entry(path, &absolute).await
  }
}

/// Sibling file holding the new text of a file being modified.
fn staged_path(absolute: &Path) -> PathBuf {
  let mut name = absolute.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(STAGED_SUFFIX);
  absolute.with_file_name(name)
}

/// Converts a file system timestamp.
fn to_utc(time: SystemTime) -> DateTime<Utc> { DateTime::<Utc>::from(time) }

#[async_trait]
impl FileStore for LocalStore {
  async fn exists(&self, path: &str) -> Result<bool> {
    Ok(tokio::fs::try_exists(self.resolve(path)?).await?)
  }

  async fn create_folder(&self, path: &str) -> Result<()> {
    let absolute = self.resolve(path)?;
    if tokio::fs::try_exists(&absolute).await? {
      return Err(std::io::Error::new(ErrorKind::AlreadyExists, "Folder already exists").into());
    }
    tokio::fs::create_dir_all(&absolute).await?;
    debug!("Created folder {path}");
    Ok(())
  }

  async fn create_binary(&self, path: &str, bytes: &[u8]) -> Result<FileEntry> {
    self.create_new(path, bytes).await
  }

  async fn create(&self, path: &str, text: &str) -> Result<FileEntry> {
    self.create_new(path, text.as_bytes()).await
  }

  async fn read(&self, path: &str) -> Result<String> {
    Ok(tokio::fs::read_to_string(self.resolve(path)?).await?)
  }

  async fn modify(&self, path: &str, text: &str) -> Result<()> {
    let absolute = self.resolve(path)?;
    if !tokio::fs::try_exists(&absolute).await? {
      return Err(std::io::Error::new(ErrorKind::NotFound, "File does not exist").into());
    }

    // The new text survives in the staged copy if the rewrite below is interrupted.
    let staged = staged_path(&absolute);
    let mut file = tokio::fs::File::create(&staged).await?;
    file.write_all(text.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);

    // In place: the creation time doubles as the import date.
    let mut file = tokio::fs::OpenOptions::new().write(true).truncate(true).open(&absolute).await?;
    file.write_all(text.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::remove_file(&staged).await?;
    debug!("Modified {path}");
    Ok(())
  }

  async fn delete(&self, path: &str) -> Result<()> {
    tokio::fs::remove_file(self.resolve(path)?).await?;
    debug!("Deleted {path}");
    Ok(())
  }

  async fn trash(&self, path: &str) -> Result<()> {
    let absolute = self.resolve(path)?;
    let mut target = self.resolve(&format!("{TRASH_FOLDER}/{path}"))?;
    if let Some(parent) = target.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    if tokio::fs::try_exists(&target).await? {
      let stamp = Utc::now().format("%Y%m%d%H%M%S%3f");
      let name = target.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
      target.set_file_name(format!("{name}.{stamp}"));
    }
    tokio::fs::rename(&absolute, &target).await?;
    debug!("Moved {path} to {}", target.display());
    Ok(())
  }

  async fn get_file_by_path(&self, path: &str) -> Result<Option<FileEntry>> {
    let absolute = self.resolve(path)?;
    match tokio::fs::metadata(&absolute).await {
      Ok(metadata) if metadata.is_file() => Ok(Some(self.entry(path, &absolute).await?)),
      Ok(_) => Ok(None),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  async fn list(&self, dir: &str) -> Result<Vec<FileEntry>> {
    let absolute = self.resolve(dir)?;
    let mut read_dir = match tokio::fs::read_dir(&absolute).await {
      Ok(read_dir) => read_dir,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(e.into()),
    };

    let mut entries = Vec::new();
    while let Some(dir_entry) = read_dir.next_entry().await? {
      if !dir_entry.file_type().await?.is_file() {
        continue;
      }
      let name = dir_entry.file_name().to_string_lossy().into_owned();
      let path = format!("{}/{name}", dir.trim_end_matches('/'));
      entries.push(self.entry(&path, &dir_entry.path()).await?);
    }
    trace!("Listed {} files in {dir}", entries.len());
    Ok(entries)
  }
}
