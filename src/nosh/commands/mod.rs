//! # Command Layer
//!
//! The core business logic. Each operation lives in its own submodule and
//! implements pure functions over a [`DataStore`]; nothing here touches
//! stdout, stderr, or the terminal.
//!
//! Commands return a structured [`CmdResult`] (collections to display plus
//! leveled messages) and the UI layer decides how to render it. Invalid user
//! input (an empty food name, a meal with no items) is reported as a warning
//! message and never reaches storage; operations against ids that no longer
//! exist are benign no-ops.
//!
//! Testing lives here too: every command module carries unit tests against
//! `InMemoryStore`.

use serde::Serialize;

use crate::model::{FoodItem, MealEntry};

pub mod add_food;
pub mod delete_food;
pub mod delete_meal;
pub mod export;
pub mod import;
pub mod list;
pub mod log_meal;
pub mod stats;
pub mod update_food;
pub mod update_meal;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A meal entry paired with its resolved display names, so clients never
/// re-implement snapshot resolution.
#[derive(Debug, Clone)]
pub struct DisplayMeal {
    pub entry: MealEntry,
    pub names: Vec<String>,
}

impl DisplayMeal {
    pub fn resolve(entry: MealEntry, library: &[FoodItem]) -> Self {
        let names = entry.display_names(library);
        Self { entry, names }
    }
}

pub(crate) fn resolve_meals(entries: Vec<MealEntry>, library: &[FoodItem]) -> Vec<DisplayMeal> {
    entries
        .into_iter()
        .map(|entry| DisplayMeal::resolve(entry, library))
        .collect()
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Library state to display, post-operation.
    pub foods: Vec<FoodItem>,
    /// History state to display, post-operation, names resolved.
    pub meals: Vec<DisplayMeal>,
    /// Stats payload (stats command only).
    pub stats: Option<stats::WeekStats>,
    /// Serialized backup text (export command only).
    pub export: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_foods(mut self, foods: Vec<FoodItem>) -> Self {
        self.foods = foods;
        self
    }

    pub fn with_meals(mut self, meals: Vec<DisplayMeal>) -> Self {
        self.meals = meals;
        self
    }
}
