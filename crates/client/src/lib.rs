//! Typed client for the habit tracker REST API, plus the client-side
//! state layer that keeps cached habits and categories in step with the
//! server.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod store;

pub use api::HabitryApi;
pub use config::ClientConfig;
pub use error::{ClientError, Notice};
pub use session::HabitSession;
pub use store::{CategoryStore, HabitStore};
