//! Repository layer: one unit struct per table with async associated
//! functions taking a `&PgPool`.

pub mod category_repo;
pub mod habit_repo;

pub use category_repo::CategoryRepo;
pub use habit_repo::HabitRepo;
