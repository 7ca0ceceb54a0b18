//! Post report model and DTOs.

use pethaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `reports` table. Reports are never edited or soft-deleted;
/// moderation approval removes them.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub post_id: DbId,
    pub reporter_id: DbId,
    pub reason: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateReport {
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,
}

impl CreateReport {
    pub fn to_domain(&self, post_id: DbId, reporter_id: DbId) -> Report {
        Report {
            post_id,
            reporter_id,
            reason: self.reason.clone(),
            ..Report::default()
        }
    }
}

/// Outcome of filing a report: the report plus the post's state after the
/// recount.
#[derive(Debug, Clone, Serialize)]
pub struct ReportReceipt {
    pub report: Report,
    pub reports_count: i32,
    pub post_status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_domain_injects_post_and_reporter() {
        let report = CreateReport {
            reason: "spam".into(),
        }
        .to_domain(10, 20);
        assert_eq!(report.post_id, 10);
        assert_eq!(report.reporter_id, 20);
        assert_eq!(report.reason, "spam");
        assert_eq!(report.id, 0);
    }

    #[test]
    fn empty_reason_is_invalid() {
        assert!(CreateReport::default().validate().is_err());
    }
}
