/// All timestamps are UTC with millisecond precision.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Truncate a timestamp to whole milliseconds.
///
/// Stored version columns carry millisecond precision, so every timestamp
/// that enters a record must be truncated first to keep comparisons between
/// in-memory and round-tripped values exact.
pub fn truncate_to_millis(ts: Timestamp) -> Timestamp {
    use chrono::DurationRound;
    ts.duration_trunc(chrono::Duration::milliseconds(1)).unwrap_or(ts)
}
