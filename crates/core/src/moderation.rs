//! Report-count moderation rule.

/// Whether a post with `reports_count` reports should be blocked automatically.
///
/// A threshold of zero or less disables automatic blocking.
pub fn reaches_block_threshold(reports_count: i64, threshold: i64) -> bool {
    threshold > 0 && reports_count >= threshold
}
