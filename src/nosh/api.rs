//! # API Facade
//!
//! The API layer is a thin facade over the command layer. It serves as the
//! single entry point for all nosh operations, regardless of the UI being
//! used.
//!
//! The facade dispatches to the right command function, normalizes inputs
//! (resolving display selectors to record ids) and returns structured
//! `Result<CmdResult>` values. Business logic belongs in `commands/*.rs`;
//! presentation belongs to the caller.
//!
//! ## Selectors
//!
//! Foods and meals are addressed by a selector string, tried in order:
//!
//! - **Display index**: the 1-based position in the listed collection
//!   (library sorted by name, history most recent first)
//! - **Record id**
//! - **Name** (foods only, case-insensitive)
//!
//! A selector that resolves to nothing is passed through as an id, so the
//! command layer reports the miss as a benign message instead of an error.
//!
//! ## Generic Over DataStore
//!
//! `NoshApi<S: DataStore>` is generic over the storage backend:
//! - Production: `NoshApi<FileStore>`
//! - Testing: `NoshApi<InMemoryStore>`

use chrono::{DateTime, Utc};

use crate::commands;
use crate::error::Result;
use crate::store::DataStore;

pub struct NoshApi<S: DataStore> {
    store: S,
}

impl<S: DataStore> NoshApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn add_food(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::add_food::run(&mut self.store, name)
    }

    pub fn list_foods(&self) -> Result<commands::CmdResult> {
        commands::list::foods(&self.store)
    }

    pub fn rename_food(&mut self, selector: &str, new_name: &str) -> Result<commands::CmdResult> {
        let id = self.resolve_food_id(selector)?;
        commands::update_food::run(&mut self.store, &id, new_name)
    }

    pub fn delete_food(&mut self, selector: &str) -> Result<commands::CmdResult> {
        let id = self.resolve_food_id(selector)?;
        commands::delete_food::run(&mut self.store, &id)
    }

    pub fn log_meal(
        &mut self,
        items: &[String],
        at: Option<DateTime<Utc>>,
    ) -> Result<commands::CmdResult> {
        commands::log_meal::run(&mut self.store, items, at)
    }

    pub fn list_meals(&self, limit: Option<usize>) -> Result<commands::CmdResult> {
        commands::list::meals(&self.store, limit)
    }

    pub fn update_meal(
        &mut self,
        selector: &str,
        items: Option<&[String]>,
        at: Option<DateTime<Utc>>,
    ) -> Result<commands::CmdResult> {
        let id = self.resolve_meal_id(selector)?;
        commands::update_meal::run(&mut self.store, &id, items, at)
    }

    pub fn delete_meal(&mut self, selector: &str) -> Result<commands::CmdResult> {
        let id = self.resolve_meal_id(selector)?;
        commands::delete_meal::run(&mut self.store, &id)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn export(&self) -> Result<commands::CmdResult> {
        commands::export::run(&self.store)
    }

    pub fn import(&mut self, text: &str) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, text)
    }

    fn resolve_food_id(&self, selector: &str) -> Result<String> {
        let library = self.store.library()?;
        let by_position = selector
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .and_then(|n| library.get(n - 1));
        let found = by_position.or_else(|| {
            library
                .iter()
                .find(|f| f.id == selector || f.name.eq_ignore_ascii_case(selector))
        });
        Ok(found
            .map(|f| f.id.clone())
            .unwrap_or_else(|| selector.to_string()))
    }

    fn resolve_meal_id(&self, selector: &str) -> Result<String> {
        let history = self.store.history()?;
        let by_position = selector
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .and_then(|n| history.get(n - 1));
        Ok(by_position
            .map(|e| e.id.clone())
            .unwrap_or_else(|| selector.to_string()))
    }
}

pub use commands::{CmdMessage, CmdResult, DisplayMeal, MessageLevel};
