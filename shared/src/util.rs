//! Small helpers shared across crates

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a random resource ID (UUID v4, hyphenated)
///
/// Matches the string keys used by the legacy realtime-database backend,
/// e.g. `09108898-fc1f-49b9-a92b-229f99615ae8`.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Start of the UTC day containing `millis`, in milliseconds
pub fn day_start_millis(millis: i64) -> i64 {
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;
    millis - millis.rem_euclid(DAY_MS)
}
