use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Remove a food from the library. History is deliberately untouched: past
/// entries keep their name copies and snapshots, so the log stays readable.
pub fn run<S: DataStore>(store: &mut S, id: &str) -> Result<CmdResult> {
    let removed = store.delete_food(id)?;

    let mut result = CmdResult::default().with_foods(store.library()?);
    if removed {
        result.add_message(CmdMessage::success("Food removed from library"));
    } else {
        result.add_message(CmdMessage::info("No such food; nothing to remove"));
    }
    Ok(result)
}
