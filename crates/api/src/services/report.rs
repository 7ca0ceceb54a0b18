//! Post reports.

use pethaven_core::error::CoreResult;
use pethaven_core::types::DbId;
use pethaven_db::models::report::{CreateReport, Report, ReportReceipt};
use pethaven_db::stores::{PostStore, ReportStore};

pub struct ReportService<'a, S> {
    store: &'a S,
}

impl<'a, S: ReportStore + PostStore> ReportService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// File a report; the store blocks the post once `block_threshold`
    /// reports have accumulated.
    pub async fn create(
        &self,
        actor: DbId,
        post_id: DbId,
        input: &CreateReport,
        block_threshold: i64,
    ) -> CoreResult<ReportReceipt> {
        let mut report = input.to_domain(post_id, actor);
        report.created_at = chrono::Utc::now();
        self.store.create_report(&report, block_threshold).await
    }

    /// Reports filed against a live post.
    pub async fn list_for_post(&self, post_id: DbId) -> CoreResult<Vec<Report>> {
        self.store.find_post(post_id).await?;
        self.store.list_reports_for_post(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pethaven_core::error::CoreError;
    use pethaven_db::models::post::CreatePost;

    use super::*;
    use crate::services::fake::FakeStore;
    use crate::services::post::PostService;

    fn spam() -> CreateReport {
        CreateReport {
            reason: "spam".to_string(),
        }
    }

    #[tokio::test]
    async fn report_counts_and_blocks_at_threshold() {
        let store = FakeStore::default();
        let post = PostService::new(&store)
            .create(
                1,
                &CreatePost {
                    title: "Puppies for sale".to_string(),
                    body: "cheap".to_string(),
                    ..CreatePost::default()
                },
            )
            .await
            .unwrap();
        let service = ReportService::new(&store);

        let first = service.create(2, post.id, &spam(), 2).await.unwrap();
        assert_eq!(first.reports_count, 1);
        assert_eq!(first.post_status, "published");

        let second = service.create(3, post.id, &spam(), 2).await.unwrap();
        assert_eq!(second.reports_count, 2);
        assert_eq!(second.post_status, "blocked");

        assert_eq!(service.list_for_post(post.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn report_on_missing_post_is_not_found() {
        let store = FakeStore::default();
        let service = ReportService::new(&store);

        assert_matches!(
            service.create(2, 99, &spam(), 10).await,
            Err(CoreError::NotFound { entity: "Post", id: 99 })
        );
        assert_matches!(
            service.list_for_post(99).await,
            Err(CoreError::NotFound { .. })
        );
    }
}
