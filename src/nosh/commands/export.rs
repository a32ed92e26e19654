use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{FoodItem, MealEntry};
use crate::store::DataStore;

/// The backup envelope. Field names and timestamp encoding match the stored
/// collections, so a backup file is importable as-is.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Backup<'a> {
    library: &'a [FoodItem],
    history: &'a [MealEntry],
    #[serde(with = "chrono::serde::ts_milliseconds")]
    exported_at: DateTime<Utc>,
}

/// Suggested file name for a backup taken at `now`, e.g.
/// `nosh-backup-2026-08-23.json`.
pub fn default_filename(now: DateTime<Local>) -> String {
    format!("nosh-backup-{}.json", now.format("%Y-%m-%d"))
}

/// Serialize both collections into a pretty-printed backup document. Writing
/// it somewhere is the caller's job.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let library = store.library()?;
    let history = store.history()?;

    let backup = Backup {
        library: &library,
        history: &history,
        exported_at: Utc::now(),
    };
    let text = serde_json::to_string_pretty(&backup)?;

    let mut result = CmdResult::default();
    result.export = Some(text);
    result.add_message(CmdMessage::success(format!(
        "Exported {} foods and {} meals",
        library.len(),
        history.len()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add_food, log_meal};
    use crate::store::memory::InMemoryStore;
    use chrono::TimeZone;

    #[test]
    fn test_export_produces_backup_document() {
        let mut store = InMemoryStore::new();
        add_food::run(&mut store, "Rice").unwrap();
        log_meal::run(&mut store, &["Rice".to_string()], None).unwrap();

        let result = run(&store).unwrap();
        let text = result.export.unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["library"].as_array().unwrap().len(), 1);
        assert_eq!(value["history"].as_array().unwrap().len(), 1);
        assert!(value["exportedAt"].is_number());
        // Pretty-printed, not a single line.
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_export_of_empty_store() {
        let store = InMemoryStore::new();
        let result = run(&store).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(result.export.as_deref().unwrap()).unwrap();
        assert_eq!(value["library"], serde_json::json!([]));
        assert_eq!(value["history"], serde_json::json!([]));
    }

    #[test]
    fn test_default_filename_uses_date() {
        let now = Local.with_ymd_and_hms(2026, 8, 23, 9, 30, 0).unwrap();
        assert_eq!(default_filename(now), "nosh-backup-2026-08-23.json");
    }
}
