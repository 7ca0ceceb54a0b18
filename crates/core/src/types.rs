/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Replace a timestamp still at its `Default` value (the Unix epoch) with `now`.
///
/// Converters leave timestamps unset; services stamp them before persisting.
pub fn fill_if_unset(ts: &mut Timestamp, now: Timestamp) {
    if *ts == Timestamp::default() {
        *ts = now;
    }
}
