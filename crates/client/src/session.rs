//! Client state: the API plus the current habit and category snapshots.
//!
//! Each operation calls the server and, on success, swaps in a new
//! snapshot built from the server's response. Failures leave the
//! snapshots untouched and come back as a [`Notice`].

use habitry_core::types::DbId;

use crate::api::HabitryApi;
use crate::error::Notice;
use crate::models::{Category, CategoryPatch, Habit, HabitPatch, NewCategory, NewHabit};
use crate::store::{CategoryStore, HabitStore};

pub struct HabitSession {
    api: HabitryApi,
    habits: HabitStore,
    categories: CategoryStore,
}

impl HabitSession {
    pub fn new(api: HabitryApi) -> Self {
        Self {
            api,
            habits: HabitStore::new(),
            categories: CategoryStore::new(),
        }
    }

    pub fn api(&self) -> &HabitryApi {
        &self.api
    }

    /// Current habit snapshot. Cloning it is cheap and later operations
    /// never change a snapshot already handed out.
    pub fn habits(&self) -> &HabitStore {
        &self.habits
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    /// Reload both lists from the server.
    pub async fn refresh(&mut self) -> Result<(), Notice> {
        let habits = self.api.list_habits(None).await?;
        let categories = self.api.list_categories().await?;
        self.habits = HabitStore::with_loaded(habits);
        self.categories = CategoryStore::with_loaded(categories);
        tracing::debug!(
            habits = self.habits.len(),
            categories = self.categories.len(),
            "Session refreshed"
        );
        Ok(())
    }

    // ---- habits ----

    pub async fn create_habit(&mut self, habit: &NewHabit) -> Result<Habit, Notice> {
        let created = self.api.create_habit(habit).await?;
        self.habits = self.habits.with_created(created.clone());
        Ok(created)
    }

    pub async fn update_habit(&mut self, id: DbId, patch: &HabitPatch) -> Result<Habit, Notice> {
        let updated = self.api.update_habit(id, patch).await?;
        self.habits = self.habits.with_replaced(updated.clone());
        Ok(updated)
    }

    /// Flip the cached completion state of a habit on the server.
    pub async fn toggle_completion(&mut self, id: DbId) -> Result<Habit, Notice> {
        let completed = self
            .habits
            .get(id)
            .map(|h| h.completed)
            .ok_or_else(|| Notice::new("Habit is not loaded"))?;
        let updated = self.api.set_completed(id, !completed).await?;
        self.habits = self.habits.with_replaced(updated.clone());
        Ok(updated)
    }

    pub async fn delete_habit(&mut self, id: DbId) -> Result<(), Notice> {
        self.api.delete_habit(id).await?;
        self.habits = self.habits.without(id);
        Ok(())
    }

    // ---- categories ----

    pub async fn create_category(&mut self, category: &NewCategory) -> Result<Category, Notice> {
        let created = self.api.create_category(category).await?;
        self.categories = self.categories.with_created(created.clone());
        Ok(created)
    }

    pub async fn update_category(
        &mut self,
        id: DbId,
        patch: &CategoryPatch,
    ) -> Result<Category, Notice> {
        let updated = self.api.update_category(id, patch).await?;
        self.categories = self.categories.with_replaced(updated.clone());
        Ok(updated)
    }

    /// Delete a category. Cached habits keep their stale category until
    /// the next refresh, when the server resolves it to `None`.
    pub async fn delete_category(&mut self, id: DbId) -> Result<(), Notice> {
        self.api.delete_category(id).await?;
        self.categories = self.categories.without(id);
        Ok(())
    }
}
