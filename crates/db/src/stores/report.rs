//! Store for the `reports` table.
//!
//! Filing a report is the one write in the system where concurrent
//! requests race on a shared counter. The post row is locked with
//! `SELECT ... FOR UPDATE` for the whole transaction and the counter is
//! recomputed from `COUNT(*)` rather than incremented.

use async_trait::async_trait;
use pethaven_core::error::CoreResult;
use pethaven_core::moderation::reaches_block_threshold;
use pethaven_core::post_status::PostStatus;
use pethaven_core::types::DbId;

use super::PgStore;
use crate::error::{map_db_error, not_found};
use crate::models::report::{Report, ReportReceipt};

const COLUMNS: &str = "id, post_id, reporter_id, reason, created_at";

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// File a report against a published post, refresh the post's
    /// `reports_count` and block it once `block_threshold` is reached.
    ///
    /// A missing, deleted or non-published post is `NotFound` and nothing
    /// is written.
    async fn create_report(&self, report: &Report, block_threshold: i64)
        -> CoreResult<ReportReceipt>;

    async fn list_reports_for_post(&self, post_id: DbId) -> CoreResult<Vec<Report>>;

    async fn count_reports_for_post(&self, post_id: DbId) -> CoreResult<i64>;
}

#[async_trait]
impl ReportStore for PgStore {
    async fn create_report(
        &self,
        report: &Report,
        block_threshold: i64,
    ) -> CoreResult<ReportReceipt> {
        let mut tx = self.pool().begin().await.map_err(map_db_error)?;

        let status: Option<String> = sqlx::query_scalar(
            "SELECT status FROM posts WHERE id = $1 AND is_deleted = false FOR UPDATE",
        )
        .bind(report.post_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if status.as_deref() != Some(PostStatus::Published.as_str()) {
            return Err(not_found("Post", report.post_id));
        }

        let insert = format!(
            "INSERT INTO reports (post_id, reporter_id, reason, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Report>(&insert)
            .bind(report.post_id)
            .bind(report.reporter_id)
            .bind(&report.reason)
            .bind(report.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE post_id = $1")
            .bind(report.post_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let post_status = if reaches_block_threshold(count, block_threshold) {
            PostStatus::Blocked
        } else {
            PostStatus::Published
        };

        sqlx::query(
            "UPDATE posts SET reports_count = $2, status = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(report.post_id)
        .bind(count as i32)
        .bind(post_status.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        tracing::info!(
            report_id = created.id,
            post_id = created.post_id,
            reporter_id = created.reporter_id,
            reports_count = count,
            "Report created"
        );
        if post_status == PostStatus::Blocked {
            tracing::warn!(post_id = created.post_id, reports_count = count, "Post auto-blocked");
        }

        Ok(ReportReceipt {
            report: created,
            reports_count: count as i32,
            post_status: post_status.as_str().to_string(),
        })
    }

    async fn list_reports_for_post(&self, post_id: DbId) -> CoreResult<Vec<Report>> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports WHERE post_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(post_id)
            .fetch_all(self.pool())
            .await
            .map_err(map_db_error)
    }

    async fn count_reports_for_post(&self, post_id: DbId) -> CoreResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(self.pool())
            .await
            .map_err(map_db_error)
    }
}
