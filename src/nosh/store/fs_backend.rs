use std::fs;
use std::path::{Path, PathBuf};

use super::backend::StorageBackend;
use super::Collection;
use crate::error::{NoshError, Result};
use crate::ids;

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NoshError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, collection: Collection) -> Result<Option<String>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(None);
        }
        let payload = fs::read_to_string(path).map_err(NoshError::Io)?;
        Ok(Some(payload))
    }

    fn write(&self, collection: Collection, payload: &str) -> Result<()> {
        self.ensure_dir()?;

        let target = self.collection_path(collection);

        // Atomic write
        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", collection.key(), ids::generate()));
        fs::write(&tmp, payload).map_err(NoshError::Io)?;
        fs::rename(&tmp, target).map_err(NoshError::Io)?;

        Ok(())
    }
}
