//! Keeper reviews.

use chrono::Utc;
use pethaven_core::error::{CoreError, CoreResult};
use pethaven_core::pagination::Page;
use pethaven_core::review::validate_grade;
use pethaven_core::sorting::{resolve_sort, SortDefaults};
use pethaven_core::types::DbId;
use pethaven_db::models::review::{CreateReview, KeeperReview, UpdateReview, REVIEW_SORT_FIELDS};
use pethaven_db::stores::{KeeperStore, ReviewStore};

use super::{ensure_owner, stamp};

pub struct ReviewService<'a, S> {
    store: &'a S,
}

impl<'a, S: ReviewStore + KeeperStore> ReviewService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Review a keeper. Grades outside 1..=5 and self-reviews are rejected.
    pub async fn create(
        &self,
        actor: DbId,
        keeper_id: DbId,
        input: &CreateReview,
    ) -> CoreResult<KeeperReview> {
        validate_grade(input.grade)?;
        let keeper = self.store.find_keeper(keeper_id).await?;
        if keeper.user_id == actor {
            return Err(CoreError::Forbidden(
                "Keepers cannot review themselves".to_string(),
            ));
        }
        let mut review = input.to_domain(keeper_id, actor);
        stamp(&mut review.created_at, &mut review.updated_at);
        self.store.create_review(&review).await
    }

    pub async fn get_by_id(&self, id: DbId) -> CoreResult<KeeperReview> {
        self.store.find_review(id).await
    }

    pub async fn list_for_keeper(
        &self,
        keeper_id: DbId,
        sort: Option<&str>,
        page: Page,
        defaults: &SortDefaults,
    ) -> CoreResult<Vec<KeeperReview>> {
        let sort = resolve_sort(sort, REVIEW_SORT_FIELDS, defaults)?;
        self.store.find_keeper(keeper_id).await?;
        self.store.list_reviews_for_keeper(keeper_id, &sort, page).await
    }

    pub async fn update(
        &self,
        actor: DbId,
        id: DbId,
        input: &UpdateReview,
    ) -> CoreResult<KeeperReview> {
        if let Some(grade) = input.grade {
            validate_grade(grade)?;
        }
        let mut review = self.store.find_review(id).await?;
        ensure_owner(actor, review.author_id, "Review")?;
        input.apply_to(&mut review);
        review.updated_at = Utc::now();
        self.store.update_review(&review).await
    }

    pub async fn delete(&self, actor: DbId, id: DbId) -> CoreResult<()> {
        let review = self.store.find_review(id).await?;
        ensure_owner(actor, review.author_id, "Review")?;
        self.store.soft_delete_review(id).await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pethaven_db::models::keeper::CreateKeeper;

    use super::*;
    use crate::services::fake::FakeStore;
    use crate::services::keeper::KeeperService;

    const KEEPER_OWNER: DbId = 10;

    async fn keeper_id(store: &FakeStore) -> DbId {
        KeeperService::new(store)
            .create(KEEPER_OWNER, &CreateKeeper::default())
            .await
            .unwrap()
            .id
    }

    fn graded(grade: i16) -> CreateReview {
        CreateReview {
            grade,
            comment: None,
        }
    }

    #[tokio::test]
    async fn grades_outside_range_are_rejected() {
        let store = FakeStore::default();
        let keeper = keeper_id(&store).await;
        let service = ReviewService::new(&store);

        for grade in [0, 6] {
            assert_matches!(
                service.create(1, keeper, &graded(grade)).await,
                Err(CoreError::Validation(_)),
                "grade {grade} must be rejected"
            );
        }
    }

    #[tokio::test]
    async fn grades_in_range_are_accepted() {
        let store = FakeStore::default();
        let keeper = keeper_id(&store).await;
        let service = ReviewService::new(&store);

        // One review per author, so each grade comes from a different user.
        for grade in 1..=5 {
            let review = service
                .create(DbId::from(grade), keeper, &graded(grade))
                .await
                .unwrap();
            assert_eq!(review.grade, grade);
        }
    }

    #[tokio::test]
    async fn self_review_is_forbidden() {
        let store = FakeStore::default();
        let keeper = keeper_id(&store).await;

        assert_matches!(
            ReviewService::new(&store)
                .create(KEEPER_OWNER, keeper, &graded(5))
                .await,
            Err(CoreError::Forbidden(_))
        );
    }

    #[tokio::test]
    async fn update_checks_grade_and_owner() {
        let store = FakeStore::default();
        let keeper = keeper_id(&store).await;
        let service = ReviewService::new(&store);
        let review = service.create(1, keeper, &graded(3)).await.unwrap();

        let bad_grade = UpdateReview {
            grade: Some(9),
            comment: None,
        };
        assert_matches!(
            service.update(1, review.id, &bad_grade).await,
            Err(CoreError::Validation(_))
        );

        let good_grade = UpdateReview {
            grade: Some(4),
            comment: None,
        };
        assert_matches!(
            service.update(2, review.id, &good_grade).await,
            Err(CoreError::Forbidden(_))
        );
        assert_eq!(service.update(1, review.id, &good_grade).await.unwrap().grade, 4);
    }

    #[tokio::test]
    async fn listing_reviews_of_unknown_keeper_is_not_found() {
        let store = FakeStore::default();
        let result = ReviewService::new(&store)
            .list_for_keeper(404, None, Page::default(), &SortDefaults::default())
            .await;
        assert_matches!(result, Err(CoreError::NotFound { entity: "Keeper", id: 404 }));
    }
}
