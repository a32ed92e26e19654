//! Restore collections from a backup document.
//!
//! Import is per-collection: each collection present in the backup and
//! shaped like a list replaces the stored one wholesale; a present but
//! malformed collection is skipped with a warning. The store is not touched
//! until every collection has been parsed, so a rejected backup leaves the
//! data exactly as it was. Records go through the same read-time repair as
//! stored data, which lets old backups (missing ids, legacy meal shapes)
//! import cleanly.

use serde_json::Value;

use crate::commands::{resolve_meals, CmdMessage, CmdResult};
use crate::error::{NoshError, Result};
use crate::model::{FoodItem, MealEntry};
use crate::store::migrate::{repair_history, repair_library, RawFoodItem, RawMealEntry};
use crate::store::DataStore;

fn parse_library(value: &Value, result: &mut CmdResult) -> Option<Vec<FoodItem>> {
    match serde_json::from_value::<Vec<RawFoodItem>>(value.clone()) {
        Ok(raw) => Some(repair_library(raw).0),
        Err(err) => {
            result.add_message(CmdMessage::warning(format!(
                "Skipping library collection: {}",
                err
            )));
            None
        }
    }
}

fn parse_history(value: &Value, result: &mut CmdResult) -> Option<Vec<MealEntry>> {
    match serde_json::from_value::<Vec<RawMealEntry>>(value.clone()) {
        Ok(raw) => Some(repair_history(raw).0),
        Err(err) => {
            result.add_message(CmdMessage::warning(format!(
                "Skipping history collection: {}",
                err
            )));
            None
        }
    }
}

pub fn run<S: DataStore>(store: &mut S, text: &str) -> Result<CmdResult> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| NoshError::Api(format!("Backup is not valid JSON: {}", err)))?;
    let Value::Object(map) = value else {
        return Err(NoshError::Api("Backup must be a JSON object".to_string()));
    };
    if !map.contains_key("library") && !map.contains_key("history") {
        return Err(NoshError::Api(
            "Backup has neither a library nor a history collection".to_string(),
        ));
    }

    let mut result = CmdResult::default();

    // Parse everything before writing anything, so a rejected backup cannot
    // leave the store half-replaced.
    let library = map.get("library").and_then(|v| parse_library(v, &mut result));
    let history = map.get("history").and_then(|v| parse_history(v, &mut result));

    if library.is_none() && history.is_none() {
        return Err(NoshError::Api(
            "Backup contained no importable collections".to_string(),
        ));
    }

    if let Some(items) = &library {
        store.save_library(items)?;
        result.add_message(CmdMessage::success(format!(
            "Imported {} food{}",
            items.len(),
            if items.len() == 1 { "" } else { "s" }
        )));
    }
    if let Some(entries) = &history {
        store.save_history(entries)?;
        result.add_message(CmdMessage::success(format!(
            "Imported {} meal{}",
            entries.len(),
            if entries.len() == 1 { "" } else { "s" }
        )));
    }

    let library = store.library()?;
    let meals = resolve_meals(store.history()?, &library);
    Ok(result.with_foods(library).with_meals(meals))
}
