//! Repository for the `habits` table.

use habitry_core::ids::new_id;
use habitry_core::types::DbId;
use sqlx::PgPool;

use crate::models::habit::{Habit, NewHabit};

/// Column list for habits queries.
const COLUMNS: &str = "id, title, description, category_id, completed, streak, best_streak, \
                       completion_history, created_at";

/// Provides CRUD operations for habits.
pub struct HabitRepo;

impl HabitRepo {
    /// List all habits in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Habit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM habits ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, Habit>(&query).fetch_all(pool).await
    }

    /// List habits that reference the given category.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Habit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM habits WHERE category_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Find a habit by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Habit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM habits WHERE id = $1");
        sqlx::query_as::<_, Habit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new habit with default completion fields, returning the row.
    pub async fn create(pool: &PgPool, input: &NewHabit) -> Result<Habit, sqlx::Error> {
        let query = format!(
            "INSERT INTO habits (id, title, description, category_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(new_id())
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Write back every mutable field of a loaded habit in one statement.
    ///
    /// `completed`, `streak`, `best_streak` and `completion_history` always
    /// land together.
    /// Returns `None` if the row was deleted in the meantime.
    pub async fn save(pool: &PgPool, habit: &Habit) -> Result<Option<Habit>, sqlx::Error> {
        let query = format!(
            "UPDATE habits SET
                title = $2,
                description = $3,
                category_id = $4,
                completed = $5,
                streak = $6,
                best_streak = $7,
                completion_history = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let saved = sqlx::query_as::<_, Habit>(&query)
            .bind(habit.id)
            .bind(&habit.title)
            .bind(&habit.description)
            .bind(habit.category_id)
            .bind(habit.completed)
            .bind(habit.streak)
            .bind(habit.best_streak)
            .bind(&habit.completion_history)
            .fetch_optional(pool)
            .await?;

        if saved.is_none() {
            tracing::debug!(habit_id = %habit.id, "Habit vanished before save");
        }
        Ok(saved)
    }

    /// Delete a habit by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM habits WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
