use chrono::{DateTime, Utc};

use crate::commands::{resolve_meals, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{FoodItem, MealEntry, MealItem};
use crate::store::DataStore;

/// Turn user item tokens into meal items against the current library.
///
/// A token that matches a library entry (by id, by 1-based position in the
/// sorted library, or by case-insensitive name) becomes a `Referenced` item
/// with the name snapshot captured now. Anything else is kept as a `Direct`
/// name. Blank tokens are dropped.
pub(crate) fn resolve_items(tokens: &[String], library: &[FoodItem]) -> Vec<MealItem> {
    tokens
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|token| {
            let by_position = token
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .and_then(|n| library.get(n - 1));
            let food = by_position.or_else(|| {
                library
                    .iter()
                    .find(|f| f.id == token || f.name.eq_ignore_ascii_case(token))
            });
            match food {
                Some(f) => MealItem::Referenced {
                    id: f.id.clone(),
                    snapshot: f.name.clone(),
                },
                None => MealItem::Direct {
                    name: token.to_string(),
                },
            }
        })
        .collect()
}

pub fn run<S: DataStore>(
    store: &mut S,
    tokens: &[String],
    timestamp: Option<DateTime<Utc>>,
) -> Result<CmdResult> {
    let library = store.library()?;
    let items = resolve_items(tokens, &library);

    if items.is_empty() {
        let mut result =
            CmdResult::default().with_meals(resolve_meals(store.history()?, &library));
        result.add_message(CmdMessage::warning("A meal needs at least one item"));
        return Ok(result);
    }

    let entry = MealEntry::new(items, timestamp.unwrap_or_else(Utc::now));
    let names = entry.display_names(&library).join(", ");
    store.save_meal(&entry)?;

    let mut result = CmdResult::default().with_meals(resolve_meals(store.history()?, &library));
    result.add_message(CmdMessage::success(format!("Logged meal: {}", names)));
    Ok(result)
}
