use crate::commands::{resolve_meals, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// List the food library, sorted by name.
pub fn foods<S: DataStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_foods(store.library()?))
}

/// List logged meals, most recent first, with display names resolved.
pub fn meals<S: DataStore>(store: &S, limit: Option<usize>) -> Result<CmdResult> {
    let library = store.library()?;
    let mut meals = resolve_meals(store.history()?, &library);
    if let Some(limit) = limit {
        meals.truncate(limit);
    }
    Ok(CmdResult::default().with_meals(meals))
}
