//! File-backed token store.
//!
//! The token lives in a single file opened through `cap_std` so the adapter
//! only ever touches its own directory. A missing file means "no token".
//! On Unix the file is recreated owner-only (`0600`) on every save.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::domain::AccessToken;
use crate::domain::ports::{TokenStore, TokenStoreError};

/// Token persisted in one file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the token at `path`; parent directories are created on save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn split(&self) -> Result<(&Path, OsString), TokenStoreError> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| io_error(&self.path, "path has no file name"))?;
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Ok((parent, file_name.to_owned()))
    }

    fn open_parent(&self, parent: &Path) -> Result<Option<Dir>, TokenStoreError> {
        match Dir::open_ambient_dir(parent, ambient_authority()) {
            Ok(dir) => Ok(Some(dir)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(parent, err)),
        }
    }
}

/// Replace `name` with a fresh file only the owner can read.
///
/// The old file is removed first so a mode widened by hand does not survive.
fn write_private(dir: &Dir, name: &Path, contents: &[u8]) -> io::Result<()> {
    match dir.remove_file(name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use cap_std::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = dir.open_with(name, &options)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn io_error(path: &Path, err: impl std::fmt::Display) -> TokenStoreError {
    TokenStoreError::io(format!("{}: {err}", path.display()))
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<AccessToken>, TokenStoreError> {
        let (parent, file_name) = self.split()?;
        let Some(dir) = self.open_parent(parent)? else {
            return Ok(None);
        };
        match dir.read_to_string(Path::new(&file_name)) {
            Ok(contents) => Ok(AccessToken::new(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&self.path, err)),
        }
    }

    async fn save(&self, token: &AccessToken) -> Result<(), TokenStoreError> {
        let (parent, file_name) = self.split()?;
        Dir::create_ambient_dir_all(parent, ambient_authority())
            .map_err(|err| io_error(parent, err))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| io_error(parent, err))?;
        write_private(&dir, Path::new(&file_name), token.expose().as_bytes())
            .map_err(|err| io_error(&self.path, err))?;
        debug!(path = %self.path.display(), "token persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        let (parent, file_name) = self.split()?;
        let Some(dir) = self.open_parent(parent)? else {
            return Ok(());
        };
        match dir.remove_file(Path::new(&file_name)) {
            Ok(()) => {
                debug!(path = %self.path.display(), "token removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&self.path, err)),
        }
    }
}
