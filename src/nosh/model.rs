//! # Domain Model: Foods, Meals, and Name Snapshots
//!
//! Two collections make up all persistent state:
//!
//! - The **library**: the user's reusable catalog of named foods.
//! - The **history**: the chronological log of meals.
//!
//! ## The Snapshot Problem
//!
//! A meal references foods, but the library is mutable: foods get renamed and
//! deleted. History must stay intelligible after its source food changes or
//! disappears, so a meal item is one of:
//!
//! - [`MealItem::Direct`]: a plain name copy, owned by the entry.
//! - [`MealItem::Referenced`]: a library id plus a **snapshot** of the name
//!   that was valid at logging time. Display resolves to the current library
//!   name while the food exists, then falls back to the snapshot, then to the
//!   `"Unknown"` sentinel.
//!
//! This is the single canonical representation; the legacy shapes
//! (`itemNames` lists, `itemIds` + `itemSnapshots` maps) are converted to it
//! by the read-time migration in [`crate::store::migrate`].
//!
//! ## Ordering Invariants
//!
//! The library is always sorted by name (case-insensitive); the history is
//! always sorted by timestamp descending. Every write path in the store goes
//! through [`sort_library`] / [`sort_history`].
//!
//! Wire format is camelCase JSON with epoch-millisecond timestamps, matching
//! backups produced by earlier versions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;

/// Display label for a referenced food whose library entry and snapshot are
/// both gone.
pub const UNKNOWN_ITEM: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl FoodItem {
    pub fn new(name: String) -> Self {
        Self {
            id: ids::generate(),
            name,
            created_at: Utc::now(),
        }
    }
}

/// One food on a logged meal. See the module docs for why two variants exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MealItem {
    #[serde(rename_all = "camelCase")]
    Direct { name: String },
    #[serde(rename_all = "camelCase")]
    Referenced { id: String, snapshot: String },
}

impl MealItem {
    /// Resolve the name to display for this item against the current library.
    pub fn display_name<'a>(&'a self, library: &'a [FoodItem]) -> &'a str {
        match self {
            MealItem::Direct { name } => name,
            MealItem::Referenced { id, snapshot } => {
                if let Some(food) = library.iter().find(|f| &f.id == id) {
                    &food.name
                } else if !snapshot.is_empty() {
                    snapshot
                } else {
                    UNKNOWN_ITEM
                }
            }
        }
    }

    /// Re-capture the snapshot from the current library, if the referenced
    /// food still exists. Direct items are untouched.
    pub fn refresh_snapshot(&mut self, library: &[FoodItem]) {
        if let MealItem::Referenced { id, snapshot } = self {
            if let Some(food) = library.iter().find(|f| &f.id == id) {
                *snapshot = food.name.clone();
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub id: String,
    /// When the meal was eaten, not when the record was created.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub items: Vec<MealItem>,
}

impl MealEntry {
    pub fn new(items: Vec<MealItem>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: ids::generate(),
            timestamp,
            items,
        }
    }

    /// Display names for every item, resolved against the current library.
    pub fn display_names(&self, library: &[FoodItem]) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.display_name(library).to_string())
            .collect()
    }
}

/// Sort the library by name, case-insensitive, with the raw name as a
/// deterministic tie-breaker.
pub fn sort_library(items: &mut [FoodItem]) {
    items.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Sort the history most-recent-first. Stable, so same-timestamp entries keep
/// their stored order.
pub fn sort_history(entries: &mut [MealEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
