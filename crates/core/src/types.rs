/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Locally generated correlation identifier for a synthesis job.
///
/// Used both as the vendor resource path segment and as the client-facing
/// job handle.
pub type JobId = String;
