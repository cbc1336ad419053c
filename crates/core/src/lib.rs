//! Domain types and pure logic for the habit tracker.
//!
//! Nothing in this crate performs I/O. The database and HTTP layers call
//! into it for id parsing, input rules, the completion transition, and
//! insight computation.

pub mod achievements;
pub mod categories;
pub mod completion;
pub mod error;
pub mod habits;
pub mod ids;
pub mod serde_helpers;
pub mod types;
