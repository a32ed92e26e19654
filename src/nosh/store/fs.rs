use std::path::PathBuf;

use super::fs_backend::FsBackend;
use super::json_store::JsonStore;

pub type FileStore = JsonStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        JsonStore::with_backend(FsBackend::new(root))
    }
}
