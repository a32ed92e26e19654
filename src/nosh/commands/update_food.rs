use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::MealItem;
use crate::store::DataStore;

/// Rename a food, then cascade the new name into past log entries: direct
/// name copies equal to the old name are rewritten, and snapshots on entries
/// that reference this food's id are refreshed. The reference links
/// themselves are untouched.
pub fn run<S: DataStore>(store: &mut S, id: &str, new_name: &str) -> Result<CmdResult> {
    let mut foods = store.library()?;

    let Some(item) = foods.iter_mut().find(|f| f.id == id) else {
        // Vanished target: same caller-visible effect as success, so no error.
        let mut result = CmdResult::default().with_foods(foods);
        result.add_message(CmdMessage::info("No such food; nothing to rename"));
        return Ok(result);
    };

    let new_name = new_name.trim();
    if new_name.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning("Food name cannot be empty"));
        result.foods = store.library()?;
        return Ok(result);
    }

    let old_name = std::mem::replace(&mut item.name, new_name.to_string());
    store.save_library(&foods)?;

    // Cascade into history so past entries keep reading correctly.
    let mut history = store.history()?;
    let mut touched = 0usize;
    for entry in &mut history {
        let mut changed = false;
        for item in &mut entry.items {
            match item {
                MealItem::Direct { name } if *name == old_name => {
                    *name = new_name.to_string();
                    changed = true;
                }
                MealItem::Referenced {
                    id: ref_id,
                    snapshot,
                } if ref_id.as_str() == id => {
                    *snapshot = new_name.to_string();
                    changed = true;
                }
                _ => {}
            }
        }
        if changed {
            touched += 1;
        }
    }
    if touched > 0 {
        store.save_history(&history)?;
    }

    let mut result = CmdResult::default().with_foods(store.library()?);
    result.add_message(CmdMessage::success(format!(
        "Renamed {} to {}",
        old_name, new_name
    )));
    if touched > 0 {
        result.add_message(CmdMessage::info(format!(
            "Updated {} past log entr{}",
            touched,
            if touched == 1 { "y" } else { "ies" }
        )));
    }
    Ok(result)
}
