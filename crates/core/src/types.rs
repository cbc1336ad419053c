/// Primary keys are UUIDs (v7, generated by the server) and are exposed
/// to clients as opaque strings.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
