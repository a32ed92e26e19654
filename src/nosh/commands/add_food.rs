use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::FoodItem;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        let mut result = CmdResult::default().with_foods(store.library()?);
        result.add_message(CmdMessage::warning("Food name cannot be empty"));
        return Ok(result);
    }

    let item = FoodItem::new(name.to_string());
    store.save_food(&item)?;

    let mut result = CmdResult::default().with_foods(store.library()?);
    result.add_message(CmdMessage::success(format!("Added food: {}", item.name)));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_add_food_inserts_sorted() {
        let mut store = InMemoryStore::new();
        run(&mut store, "Rice").unwrap();
        let result = run(&mut store, "Coffee").unwrap();

        let names: Vec<&str> = result.foods.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Coffee", "Rice"]);
    }

    #[test]
    fn test_add_food_trims_name() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, "  Oats  ").unwrap();
        assert_eq!(result.foods[0].name, "Oats");
    }

    #[test]
    fn test_add_food_rejects_empty_name() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, "   ").unwrap();

        assert!(result.foods.is_empty());
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("cannot be empty")));
        assert!(store.library().unwrap().is_empty());
    }

    #[test]
    fn test_added_foods_have_unique_ids() {
        let mut store = InMemoryStore::new();
        run(&mut store, "Rice").unwrap();
        run(&mut store, "Rice").unwrap();

        let foods = store.library().unwrap();
        assert_eq!(foods.len(), 2);
        assert_ne!(foods[0].id, foods[1].id);
    }
}
