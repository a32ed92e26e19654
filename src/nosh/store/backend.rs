use super::Collection;
use crate::error::Result;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory), while
/// JsonStore handles the "what" (parsing, migration, ordering).
pub trait StorageBackend {
    /// Read the serialized payload for a collection.
    /// Returns Ok(None) if the collection has never been written.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, collection: Collection) -> Result<Option<String>>;

    /// Write the serialized payload for a collection.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, collection: Collection, payload: &str) -> Result<()>;
}
