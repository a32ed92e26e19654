use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::backend::StorageBackend;
use super::{migrate, Collection, DataStore};
use crate::error::Result;
use crate::model::{sort_history, sort_library, FoodItem, MealEntry};

/// The store proper: JSON (de)serialization, fail-soft reads, read-time
/// migration, and the ordering invariants. Generic over the raw I/O backend.
pub struct JsonStore<B: StorageBackend> {
    /// Exposed as pub(crate) for tests only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> JsonStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Read and parse a collection payload. A missing collection is empty;
    /// an unreadable payload degrades to empty with a diagnostic, and is left
    /// on disk untouched so nothing is destroyed by a bad read.
    fn load_raw<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let Some(payload) = self.backend.read(collection)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&payload) {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!(%collection, %err, "unreadable collection payload, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn write_records<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        let payload = serde_json::to_string_pretty(records)?;
        self.backend.write(collection, &payload)
    }
}

impl<B: StorageBackend> DataStore for JsonStore<B> {
    fn library(&self) -> Result<Vec<FoodItem>> {
        let raw = self.load_raw(Collection::Library)?;
        let (mut items, dirty) = migrate::repair_library(raw);
        sort_library(&mut items);
        if dirty {
            self.write_records(Collection::Library, &items)?;
        }
        Ok(items)
    }

    fn history(&self) -> Result<Vec<MealEntry>> {
        let raw = self.load_raw(Collection::History)?;
        let (mut entries, dirty) = migrate::repair_history(raw);
        sort_history(&mut entries);
        if dirty {
            self.write_records(Collection::History, &entries)?;
        }
        Ok(entries)
    }

    fn save_food(&mut self, item: &FoodItem) -> Result<()> {
        let mut items = self.library()?;
        match items.iter_mut().find(|f| f.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        self.save_library(&items)
    }

    fn save_library(&mut self, items: &[FoodItem]) -> Result<()> {
        let mut items = items.to_vec();
        sort_library(&mut items);
        self.write_records(Collection::Library, &items)
    }

    fn delete_food(&mut self, id: &str) -> Result<bool> {
        let mut items = self.library()?;
        let before = items.len();
        items.retain(|f| f.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.write_records(Collection::Library, &items)?;
        Ok(true)
    }

    fn save_meal(&mut self, entry: &MealEntry) -> Result<()> {
        let mut entries = self.history()?;
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => entries.push(entry.clone()),
        }
        self.save_history(&entries)
    }

    fn save_history(&mut self, entries: &[MealEntry]) -> Result<()> {
        let mut entries = entries.to_vec();
        sort_history(&mut entries);
        self.write_records(Collection::History, &entries)
    }

    fn delete_meal(&mut self, id: &str) -> Result<bool> {
        let mut entries = self.history()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.write_records(Collection::History, &entries)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MealItem;
    use crate::store::mem_backend::MemBackend;
    use chrono::{TimeZone, Utc};

    fn make_store() -> JsonStore<MemBackend> {
        JsonStore::with_backend(MemBackend::new())
    }

    fn food(id: &str, name: &str) -> FoodItem {
        FoodItem {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc.timestamp_millis_opt(0).unwrap(),
        }
    }

    fn meal(id: &str, millis: i64, names: &[&str]) -> MealEntry {
        MealEntry {
            id: id.to_string(),
            timestamp: Utc.timestamp_millis_opt(millis).unwrap(),
            items: names
                .iter()
                .map(|n| MealItem::Direct {
                    name: n.to_string(),
                })
                .collect(),
        }
    }

    // --- Missing / unreadable collections ---

    #[test]
    fn test_missing_collections_are_empty() {
        let store = make_store();
        assert!(store.library().unwrap().is_empty());
        assert!(store.history().unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_payload_fails_soft() {
        let store = make_store();
        store
            .backend
            .write(Collection::Library, "{ not json ]")
            .unwrap();

        let items = store.library().unwrap();
        assert!(items.is_empty());

        // The corrupt payload must not be clobbered by the failed read.
        let on_disk = store.backend.read(Collection::Library).unwrap().unwrap();
        assert_eq!(on_disk, "{ not json ]");
    }

    #[test]
    fn test_wrong_shape_payload_fails_soft() {
        let store = make_store();
        store
            .backend
            .write(Collection::History, r#"{"library": []}"#)
            .unwrap();
        assert!(store.history().unwrap().is_empty());
    }

    // --- Migration on read ---

    #[test]
    fn test_read_repairs_missing_ids_and_persists_once() {
        let store = make_store();
        store
            .backend
            .write(
                Collection::Library,
                r#"[{"name":"Rice","createdAt":1000},{"name":"Eggs","createdAt":2000}]"#,
            )
            .unwrap();
        let writes_before = store.backend.write_count();

        let items = store.library().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|f| !f.id.is_empty()));
        assert_eq!(store.backend.write_count(), writes_before + 1);

        // Second read: already migrated, no further write.
        let again = store.library().unwrap();
        assert_eq!(again, items);
        assert_eq!(store.backend.write_count(), writes_before + 1);
    }

    #[test]
    fn test_read_converts_legacy_meal_shapes_and_persists() {
        let store = make_store();
        store
            .backend
            .write(
                Collection::History,
                r#"[{"id":"m1","timestamp":1000,"itemNames":["Rice"]}]"#,
            )
            .unwrap();

        let entries = store.history().unwrap();
        assert_eq!(
            entries[0].items,
            vec![MealItem::Direct {
                name: "Rice".to_string()
            }]
        );

        // The persisted payload is now canonical.
        let on_disk = store.backend.read(Collection::History).unwrap().unwrap();
        assert!(on_disk.contains(r#""kind""#));
        assert!(!on_disk.contains("itemNames"));
    }

    // --- Ordering invariants ---

    #[test]
    fn test_library_is_sorted_after_saves() {
        let mut store = make_store();
        store.save_food(&food("1", "rice")).unwrap();
        store.save_food(&food("2", "Apple")).unwrap();
        store.save_food(&food("3", "banana")).unwrap();

        let names: Vec<String> = store
            .library()
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Apple", "banana", "rice"]);
    }

    #[test]
    fn test_history_is_sorted_descending_after_saves() {
        let mut store = make_store();
        store.save_meal(&meal("m1", 100, &["a"])).unwrap();
        store.save_meal(&meal("m2", 300, &["b"])).unwrap();
        store.save_meal(&meal("m3", 200, &["c"])).unwrap();

        let ids: Vec<String> = store.history().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["m2", "m3", "m1"]);
    }

    // --- Upsert semantics ---

    #[test]
    fn test_save_food_replaces_by_id() {
        let mut store = make_store();
        store.save_food(&food("1", "Rice")).unwrap();
        store.save_food(&food("1", "Brown Rice")).unwrap();

        let items = store.library().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Brown Rice");
    }

    #[test]
    fn test_save_meal_replaces_by_id() {
        let mut store = make_store();
        store.save_meal(&meal("m1", 100, &["Rice"])).unwrap();
        store.save_meal(&meal("m1", 200, &["Eggs"])).unwrap();

        let entries = store.history().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp.timestamp_millis(), 200);
    }

    // --- Delete semantics ---

    #[test]
    fn test_delete_food_reports_removal() {
        let mut store = make_store();
        store.save_food(&food("1", "Rice")).unwrap();

        assert!(store.delete_food("1").unwrap());
        assert!(store.library().unwrap().is_empty());
    }

    #[test]
    fn test_delete_absent_id_is_a_noop() {
        let mut store = make_store();
        store.save_food(&food("1", "Rice")).unwrap();
        let writes_before = store.backend.write_count();

        assert!(!store.delete_food("nope").unwrap());
        assert!(!store.delete_meal("nope").unwrap());
        assert_eq!(store.library().unwrap().len(), 1);
        // No-op deletes don't rewrite the collections.
        assert_eq!(store.backend.write_count(), writes_before);
    }

    // --- Error propagation ---

    #[test]
    fn test_save_fails_on_write_error() {
        let mut store = make_store();
        store.backend.set_simulate_write_error(true);
        assert!(store.save_food(&food("1", "Rice")).is_err());
    }
}
