//! # Storage Layer
//!
//! Two collections, each a JSON array in its own file:
//!
//! ```text
//! <data-dir>/
//! ├── library.json        # FoodItem records
//! └── history.json        # MealEntry records
//! ```
//!
//! The layer is split in two, with a trait at each seam:
//!
//! - [`backend::StorageBackend`]: raw payload I/O (the "how"). Production is
//!   [`fs_backend::FsBackend`] (atomic tmp-file-then-rename writes);
//!   tests use [`mem_backend::MemBackend`].
//! - [`DataStore`]: typed record operations (the "what"), implemented once by
//!   [`json_store::JsonStore`] over any backend.
//!
//! ## Read Path: Fail Soft, Repair Eagerly
//!
//! Every read runs two guards before records reach a caller:
//!
//! 1. **Fail-soft parse**: a missing collection is an empty one, and an
//!    unreadable payload degrades to empty with a `tracing` warning; a
//!    corrupt file never takes the application down. The corrupt payload is
//!    left on disk untouched.
//! 2. **Migration** ([`migrate`]): records from older format versions are
//!    repaired in memory (missing ids backfilled, legacy meal-item shapes
//!    converted to the canonical tagged form) and, if anything changed, the
//!    corrected collection is persisted immediately. Idempotent: a second
//!    read performs no write.
//!
//! ## Write Path: Ordering Is the Store's Job
//!
//! Every write sorts before persisting (library by name, history by
//! timestamp descending), so callers can rely on collection order without
//! re-sorting on read.

use std::fmt;

use crate::error::Result;
use crate::model::{FoodItem, MealEntry};

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod json_store;
pub mod mem_backend;
pub mod memory;
pub mod migrate;

/// The two persisted collections, with their fixed storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Library,
    History,
}

impl Collection {
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Library => "library",
            Collection::History => "history",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.key())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Abstract interface for food and meal persistence.
///
/// `library`/`history` are the get-all operations; `save_*` upserts one
/// record by id; `save_library`/`save_history` persist a whole collection
/// (bulk import, rename cascade); `delete_*` removes by id and reports
/// whether anything was actually removed; a missing id is a no-op, not an
/// error.
pub trait DataStore {
    fn library(&self) -> Result<Vec<FoodItem>>;
    fn history(&self) -> Result<Vec<MealEntry>>;

    fn save_food(&mut self, item: &FoodItem) -> Result<()>;
    fn save_library(&mut self, items: &[FoodItem]) -> Result<()>;
    fn delete_food(&mut self, id: &str) -> Result<bool>;

    fn save_meal(&mut self, entry: &MealEntry) -> Result<()>;
    fn save_history(&mut self, entries: &[MealEntry]) -> Result<()>;
    fn delete_meal(&mut self, id: &str) -> Result<bool>;
}
