//! Posts and their visibility rules.
//!
//! Non-moderators see published posts plus their own posts in any status.
//! Authors may move their post between `draft`, `published` and `archived`;
//! `blocked` is set and cleared by moderation only.

use chrono::Utc;
use pethaven_core::error::{CoreError, CoreResult};
use pethaven_core::pagination::Page;
use pethaven_core::post_status::PostStatus;
use pethaven_core::sorting::{resolve_sort, SortDefaults};
use pethaven_core::types::DbId;
use pethaven_db::models::post::{CreatePost, Post, PostFilter, UpdatePost, POST_SORT_FIELDS};
use pethaven_db::stores::PostStore;

use super::{ensure_owner, stamp};

/// Who is reading posts. Visibility depends on nothing else.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub user_id: DbId,
    pub is_moderator: bool,
}

pub struct PostService<'a, S> {
    store: &'a S,
}

/// Parse a status an author asked for.
fn author_status(raw: &str) -> CoreResult<PostStatus> {
    let status: PostStatus = raw.parse()?;
    if !status.is_author_settable() {
        return Err(CoreError::Forbidden(format!(
            "Status '{status}' is reserved for moderators"
        )));
    }
    Ok(status)
}

fn is_visible(post: &Post, viewer: &Viewer) -> bool {
    viewer.is_moderator
        || post.author_id == viewer.user_id
        || post.status == PostStatus::Published.as_str()
}

impl<'a, S: PostStore> PostService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Status defaults to `published` when the request leaves it empty.
    pub async fn create(&self, actor: DbId, input: &CreatePost) -> CoreResult<Post> {
        let mut post = input.to_domain(actor);
        let status = if post.status.is_empty() {
            PostStatus::default()
        } else {
            author_status(&post.status)?
        };
        post.status = status.as_str().to_string();
        stamp(&mut post.created_at, &mut post.updated_at);
        self.store.create_post(&post).await
    }

    /// A post the viewer may not see is reported as missing.
    pub async fn get_by_id(&self, viewer: &Viewer, id: DbId) -> CoreResult<Post> {
        let post = self.store.find_post(id).await?;
        if !is_visible(&post, viewer) {
            return Err(CoreError::NotFound { entity: "Post", id });
        }
        Ok(post)
    }

    pub async fn list(
        &self,
        viewer: &Viewer,
        filter: &PostFilter,
        sort: Option<&str>,
        page: Page,
        defaults: &SortDefaults,
    ) -> CoreResult<Vec<Post>> {
        if let Some(status) = &filter.status {
            status.parse::<PostStatus>()?;
        }
        let sort = resolve_sort(sort, POST_SORT_FIELDS, defaults)?;
        let mut filter = filter.clone();
        filter.visible_to = (!viewer.is_moderator).then_some(viewer.user_id);
        self.store.list_posts(&filter, &sort, page).await
    }

    pub async fn update(&self, actor: DbId, id: DbId, input: &UpdatePost) -> CoreResult<Post> {
        let mut post = self.store.find_post(id).await?;
        ensure_owner(actor, post.author_id, "Post")?;
        if post.status == PostStatus::Blocked.as_str() {
            return Err(CoreError::Forbidden(
                "Post is blocked by moderation".to_string(),
            ));
        }
        if let Some(status) = &input.status {
            author_status(status)?;
        }
        input.apply_to(&mut post);
        post.updated_at = Utc::now();
        self.store.update_post(&post).await
    }

    pub async fn delete(&self, actor: DbId, id: DbId) -> CoreResult<()> {
        let post = self.store.find_post(id).await?;
        ensure_owner(actor, post.author_id, "Post")?;
        self.store.soft_delete_post(id).await
    }
}
