use crate::error::{ProcessError, ProcessResult};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Durable destination for encoded audio.
/// Keys are assigned by the caller; the store only persists bytes under them.
pub trait AudioStore {
    fn put(&self, key: &str, bytes: &[u8]) -> ProcessResult<()>;
}

/// Stores objects as files under a root directory, e.g. a mounted bucket
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a key to a path inside the root
    pub fn path_for(&self, key: &str) -> ProcessResult<PathBuf> {
        let relative = Path::new(key);
        let is_contained = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !is_contained {
            return Err(ProcessError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl AudioStore for DirectoryStore {
    fn put(&self, key: &str, bytes: &[u8]) -> ProcessResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        log::info!("Saved {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }
}
