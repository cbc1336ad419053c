//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` + `Validate` request DTOs for create and patch
//! - A `Serialize` response shape where the wire format differs from the row

pub mod category;
pub mod habit;
