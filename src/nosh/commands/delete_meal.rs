use crate::commands::{resolve_meals, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S, id: &str) -> Result<CmdResult> {
    let removed = store.delete_meal(id)?;

    let library = store.library()?;
    let mut result = CmdResult::default().with_meals(resolve_meals(store.history()?, &library));
    if removed {
        result.add_message(CmdMessage::success("Meal deleted"));
    } else {
        result.add_message(CmdMessage::info("No such meal; nothing to delete"));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::log_meal;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_delete_meal() {
        let mut store = InMemoryStore::new();
        log_meal::run(&mut store, &["Toast".to_string()], None).unwrap();
        let id = store.history().unwrap()[0].id.clone();

        let result = run(&mut store, &id).unwrap();
        assert!(result.meals.is_empty());
    }

    #[test]
    fn test_delete_unknown_meal_is_benign() {
        let mut store = InMemoryStore::new();
        log_meal::run(&mut store, &["Toast".to_string()], None).unwrap();

        let result = run(&mut store, "nope").unwrap();
        assert_eq!(result.meals.len(), 1);
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("nothing to delete")));
    }
}
