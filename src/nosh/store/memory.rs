use super::json_store::JsonStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = JsonStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        JsonStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{FoodItem, MealEntry, MealItem};
    use crate::store::DataStore;
    use chrono::{DateTime, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_food(mut self, name: &str) -> Self {
            let item = FoodItem::new(name.to_string());
            self.store.save_food(&item).unwrap();
            self
        }

        pub fn with_foods(mut self, names: &[&str]) -> Self {
            for name in names {
                let item = FoodItem::new(name.to_string());
                self.store.save_food(&item).unwrap();
            }
            self
        }

        /// Log a meal of direct-name items at the given time.
        pub fn with_meal(mut self, names: &[&str], timestamp: DateTime<Utc>) -> Self {
            let items = names
                .iter()
                .map(|n| MealItem::Direct {
                    name: n.to_string(),
                })
                .collect();
            let entry = MealEntry::new(items, timestamp);
            self.store.save_meal(&entry).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use crate::store::DataStore;
    use chrono::Utc;

    #[test]
    fn test_fixture_builders() {
        let fixture = StoreFixture::default()
            .with_foods(&["Rice", "Eggs"])
            .with_food("Coffee")
            .with_meal(&["Rice", "Coffee"], Utc::now());

        let foods = fixture.store.library().unwrap();
        assert_eq!(foods.len(), 3);

        let meals = fixture.store.history().unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].items.len(), 2);
    }
}
