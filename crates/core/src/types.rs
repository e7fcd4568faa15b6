/// All entity identifiers are random UUIDs (v4), client- or server-generated.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
