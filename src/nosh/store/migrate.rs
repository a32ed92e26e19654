//! Read-time repair of legacy record shapes.
//!
//! Earlier format versions wrote records without ids, and meals in one of two
//! looser shapes: a bare `itemNames` list, or an `itemIds` list with an
//! `itemSnapshots` map alongside. Collections are deserialized into the raw
//! shapes below and repaired on every read:
//!
//! - missing `id` → a fresh one is assigned
//! - missing `createdAt` / `timestamp` → filled with now
//! - legacy meal shapes → the canonical tagged [`MealItem`] list
//!
//! The repair functions report whether anything changed so the store can
//! re-persist the corrected collection once. Already-canonical data passes
//! through untouched, which is what makes the pass idempotent.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::ids;
use crate::model::{FoodItem, MealEntry, MealItem};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawFoodItem {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawMealEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    timestamp: Option<DateTime<Utc>>,
    /// Canonical shape.
    #[serde(default)]
    items: Option<Vec<MealItem>>,
    /// Legacy shape (a): plain name copies.
    #[serde(default)]
    item_names: Option<Vec<String>>,
    /// Legacy shape (b): library ids plus a snapshot map.
    #[serde(default)]
    item_ids: Option<Vec<String>>,
    #[serde(default)]
    item_snapshots: Option<HashMap<String, String>>,
}

/// Repair a raw library collection. Returns the records plus a dirty flag:
/// true when the caller must re-persist.
pub(crate) fn repair_library(raw: Vec<RawFoodItem>) -> (Vec<FoodItem>, bool) {
    let mut dirty = false;
    let items = raw
        .into_iter()
        .map(|r| {
            let id = r.id.unwrap_or_else(|| {
                dirty = true;
                ids::generate()
            });
            let created_at = r.created_at.unwrap_or_else(|| {
                dirty = true;
                Utc::now()
            });
            FoodItem {
                id,
                name: r.name,
                created_at,
            }
        })
        .collect();
    (items, dirty)
}

/// Repair a raw history collection, converting legacy item shapes to the
/// canonical tagged form.
pub(crate) fn repair_history(raw: Vec<RawMealEntry>) -> (Vec<MealEntry>, bool) {
    let mut dirty = false;
    let entries = raw
        .into_iter()
        .map(|r| {
            let id = r.id.unwrap_or_else(|| {
                dirty = true;
                ids::generate()
            });
            let timestamp = r.timestamp.unwrap_or_else(|| {
                dirty = true;
                Utc::now()
            });

            let items = match (r.items, r.item_names, r.item_ids) {
                (Some(items), _, _) => items,
                (None, Some(names), _) => {
                    dirty = true;
                    names
                        .into_iter()
                        .map(|name| MealItem::Direct { name })
                        .collect()
                }
                (None, None, Some(ids)) => {
                    dirty = true;
                    let snapshots = r.item_snapshots.unwrap_or_default();
                    ids.into_iter()
                        .map(|id| {
                            let snapshot = snapshots.get(&id).cloned().unwrap_or_default();
                            MealItem::Referenced { id, snapshot }
                        })
                        .collect()
                }
                (None, None, None) => Vec::new(),
            };

            MealEntry {
                id,
                timestamp,
                items,
            }
        })
        .collect();
    (entries, dirty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_library(json: &str) -> Vec<RawFoodItem> {
        serde_json::from_str(json).unwrap()
    }

    fn parse_history(json: &str) -> Vec<RawMealEntry> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_canonical_library_passes_through_clean() {
        let raw = parse_library(r#"[{"id":"a","name":"Rice","createdAt":1000}]"#);
        let (items, dirty) = repair_library(raw);
        assert!(!dirty);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "a");
        assert_eq!(items[0].name, "Rice");
        assert_eq!(items[0].created_at.timestamp_millis(), 1000);
    }

    #[test]
    fn test_missing_food_id_is_backfilled() {
        let raw = parse_library(r#"[{"name":"Rice","createdAt":1000}]"#);
        let (items, dirty) = repair_library(raw);
        assert!(dirty);
        assert!(!items[0].id.is_empty());
    }

    #[test]
    fn test_missing_created_at_is_backfilled() {
        let raw = parse_library(r#"[{"id":"a","name":"Rice"}]"#);
        let (items, dirty) = repair_library(raw);
        assert!(dirty);
        assert!(items[0].created_at.timestamp_millis() > 0);
    }

    #[test]
    fn test_repair_is_idempotent() {
        let raw = parse_library(r#"[{"name":"Rice"}]"#);
        let (items, dirty) = repair_library(raw);
        assert!(dirty);

        // Round-trip the repaired records: a second pass must be clean.
        let json = serde_json::to_string(&items).unwrap();
        let (again, dirty_again) = repair_library(parse_library(&json));
        assert!(!dirty_again);
        assert_eq!(again, items);
    }

    #[test]
    fn test_canonical_history_passes_through_clean() {
        let raw = parse_history(
            r#"[{"id":"m1","timestamp":1000,"items":[{"kind":"direct","name":"Toast"}]}]"#,
        );
        let (entries, dirty) = repair_history(raw);
        assert!(!dirty);
        assert_eq!(
            entries[0].items,
            vec![MealItem::Direct {
                name: "Toast".to_string()
            }]
        );
    }

    #[test]
    fn test_legacy_item_names_become_direct_items() {
        let raw = parse_history(r#"[{"id":"m1","timestamp":1000,"itemNames":["Rice","Eggs"]}]"#);
        let (entries, dirty) = repair_history(raw);
        assert!(dirty);
        assert_eq!(
            entries[0].items,
            vec![
                MealItem::Direct {
                    name: "Rice".to_string()
                },
                MealItem::Direct {
                    name: "Eggs".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_legacy_item_ids_become_referenced_items() {
        let raw = parse_history(
            r#"[{"id":"m1","timestamp":1000,"itemIds":["a","b"],"itemSnapshots":{"a":"Rice"}}]"#,
        );
        let (entries, dirty) = repair_history(raw);
        assert!(dirty);
        assert_eq!(
            entries[0].items,
            vec![
                MealItem::Referenced {
                    id: "a".to_string(),
                    snapshot: "Rice".to_string(),
                },
                // No snapshot recorded for "b": empty, displays as Unknown
                MealItem::Referenced {
                    id: "b".to_string(),
                    snapshot: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_missing_meal_id_is_backfilled() {
        let raw = parse_history(r#"[{"timestamp":1000,"itemNames":["Rice"]}]"#);
        let (entries, dirty) = repair_history(raw);
        assert!(dirty);
        assert!(!entries[0].id.is_empty());
    }

    #[test]
    fn test_entry_with_no_item_fields_gets_empty_items() {
        let raw = parse_history(r#"[{"id":"m1","timestamp":1000}]"#);
        let (entries, dirty) = repair_history(raw);
        assert!(!dirty);
        assert!(entries[0].items.is_empty());
    }
}
