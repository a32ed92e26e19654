use chrono::{DateTime, Utc};

use crate::commands::{log_meal::resolve_items, resolve_meals, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Edit a logged meal in place. `tokens` of `None` keeps the current items
/// (a time-only edit); `Some` of an empty list is rejected, since an entry
/// must always have at least one item. Referenced snapshots are refreshed against
/// the current library either way.
pub fn run<S: DataStore>(
    store: &mut S,
    id: &str,
    tokens: Option<&[String]>,
    timestamp: Option<DateTime<Utc>>,
) -> Result<CmdResult> {
    let library = store.library()?;
    let history = store.history()?;

    let Some(mut entry) = history.iter().find(|e| e.id == id).cloned() else {
        let mut result = CmdResult::default().with_meals(resolve_meals(history, &library));
        result.add_message(CmdMessage::info("No such meal; nothing to change"));
        return Ok(result);
    };

    if let Some(tokens) = tokens {
        let items = resolve_items(tokens, &library);
        if items.is_empty() {
            let mut result = CmdResult::default().with_meals(resolve_meals(history, &library));
            result.add_message(CmdMessage::warning("A meal needs at least one item"));
            return Ok(result);
        }
        entry.items = items;
    }
    for item in &mut entry.items {
        item.refresh_snapshot(&library);
    }
    if let Some(timestamp) = timestamp {
        entry.timestamp = timestamp;
    }

    store.save_meal(&entry)?;

    let mut result = CmdResult::default().with_meals(resolve_meals(store.history()?, &library));
    result.add_message(CmdMessage::success("Meal updated"));
    Ok(result)
}
