/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Render a submission timestamp the way the API expects `version`:
/// RFC 3339, millisecond precision, `Z` suffix.
pub fn version_stamp(at: Timestamp) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
