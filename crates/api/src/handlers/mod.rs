pub mod categories;
pub mod habits;
pub mod insights;
