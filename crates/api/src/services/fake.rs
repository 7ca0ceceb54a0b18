//! In-memory store used by service unit tests.
//!
//! Mirrors the contract of `PgStore` closely enough for business rules:
//! soft-deleted rows are hidden, missing rows are `NotFound`, and the unique
//! constraints the services rely on raise `Conflict`. Sorting is ignored;
//! lists come back in insertion order.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use pethaven_core::error::{CoreError, CoreResult};
use pethaven_core::moderation::reaches_block_threshold;
use pethaven_core::pagination::Page;
use pethaven_core::post_status::PostStatus;
use pethaven_core::sorting::SortSpec;
use pethaven_core::types::DbId;
use pethaven_db::models::chat::{Chat, ChatWithMembers};
use pethaven_db::models::keeper::{Keeper, KeeperFilter};
use pethaven_db::models::message::Message;
use pethaven_db::models::post::{Post, PostFilter};
use pethaven_db::models::report::{Report, ReportReceipt};
use pethaven_db::models::review::KeeperReview;
use pethaven_db::models::seeker::{Seeker, SeekerFilter};
use pethaven_db::models::session::RefreshSession;
use pethaven_db::models::user::{User, UserFilter};
use pethaven_db::models::vet::{Vet, VetFilter};
use pethaven_db::stores::{
    ChatStore, KeeperStore, MessageStore, PostStore, ReportStore, ReviewStore, SeekerStore,
    SessionStore, UserStore, VetStore,
};

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: Vec<User>,
    keepers: Vec<Keeper>,
    seekers: Vec<Seeker>,
    vets: Vec<Vet>,
    posts: Vec<Post>,
    reports: Vec<Report>,
    reviews: Vec<KeeperReview>,
    chats: Vec<ChatWithMembers>,
    messages: Vec<Message>,
    sessions: Vec<RefreshSession>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub(crate) struct FakeStore {
    tables: Mutex<Tables>,
}

impl FakeStore {
    /// A store pre-seeded with live users having exactly these ids.
    pub(crate) fn with_users(ids: &[DbId]) -> Self {
        let store = Self::default();
        {
            let mut t = store.tables();
            for &id in ids {
                t.users.push(User {
                    id,
                    username: format!("user{id}"),
                    email: format!("user{id}@example.com"),
                    ..User::default()
                });
                t.next_id = t.next_id.max(id);
            }
        }
        store
    }

    /// Simulate a moderation decision.
    pub(crate) fn set_post_status(&self, id: DbId, status: &str) {
        let mut t = self.tables();
        if let Some(post) = t.posts.iter_mut().find(|p| p.id == id) {
            post.status = status.to_string();
        }
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

fn paged<T: Clone>(rows: Vec<&T>, page: Page) -> Vec<T> {
    rows.into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .cloned()
        .collect()
}

fn missing(entity: &'static str, id: DbId) -> CoreError {
    CoreError::NotFound { entity, id }
}

macro_rules! find_live {
    ($store:expr, $table:ident, $id:expr, $entity:literal) => {{
        let t = $store.tables();
        t.$table
            .iter()
            .find(|r| r.id == $id && !r.is_deleted)
            .cloned()
            .ok_or_else(|| missing($entity, $id))
    }};
}

macro_rules! soft_delete {
    ($store:expr, $table:ident, $id:expr, $entity:literal) => {{
        let mut t = $store.tables();
        let row = t
            .$table
            .iter_mut()
            .find(|r| r.id == $id && !r.is_deleted)
            .ok_or_else(|| missing($entity, $id))?;
        row.is_deleted = true;
        row.deleted_at = Some(Utc::now());
        Ok(())
    }};
}

macro_rules! replace_live {
    ($store:expr, $table:ident, $record:expr, $entity:literal) => {{
        let mut t = $store.tables();
        let row = t
            .$table
            .iter_mut()
            .find(|r| r.id == $record.id && !r.is_deleted)
            .ok_or_else(|| missing($entity, $record.id))?;
        *row = $record.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }};
}

#[async_trait]
impl UserStore for FakeStore {
    async fn create_user(&self, user: &User) -> CoreResult<User> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.username == user.username) {
            return Err(CoreError::Conflict("Username is already taken".to_string()));
        }
        let mut created = user.clone();
        created.id = t.next_id();
        t.users.push(created.clone());
        Ok(created)
    }

    async fn find_user(&self, id: DbId) -> CoreResult<User> {
        find_live!(self, users, id, "User")
    }

    async fn find_user_include_deleted(&self, id: DbId) -> CoreResult<User> {
        self.tables()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| missing("User", id))
    }

    async fn find_user_by_username(&self, username: &str) -> CoreResult<Option<User>> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.username == username && !u.is_deleted)
            .cloned())
    }

    async fn list_users(&self, filter: &UserFilter, _: &SortSpec, page: Page) -> CoreResult<Vec<User>> {
        let t = self.tables();
        let rows = t
            .users
            .iter()
            .filter(|u| !u.is_deleted)
            .filter(|u| filter.city.is_none() || u.city == filter.city)
            .collect();
        Ok(paged(rows, page))
    }

    async fn update_user(&self, user: &User) -> CoreResult<User> {
        replace_live!(self, users, user, "User")
    }

    async fn soft_delete_user(&self, id: DbId) -> CoreResult<()> {
        soft_delete!(self, users, id, "User")
    }
}

#[async_trait]
impl KeeperStore for FakeStore {
    async fn create_keeper(&self, keeper: &Keeper) -> CoreResult<Keeper> {
        let mut t = self.tables();
        if t.keepers.iter().any(|k| k.user_id == keeper.user_id && !k.is_deleted) {
            return Err(CoreError::Conflict("User already has a keeper profile".to_string()));
        }
        let mut created = keeper.clone();
        created.id = t.next_id();
        t.keepers.push(created.clone());
        Ok(created)
    }

    async fn find_keeper(&self, id: DbId) -> CoreResult<Keeper> {
        find_live!(self, keepers, id, "Keeper")
    }

    async fn find_keeper_include_deleted(&self, id: DbId) -> CoreResult<Keeper> {
        self.tables()
            .keepers
            .iter()
            .find(|k| k.id == id)
            .cloned()
            .ok_or_else(|| missing("Keeper", id))
    }

    async fn find_keeper_by_user(&self, user_id: DbId) -> CoreResult<Option<Keeper>> {
        Ok(self
            .tables()
            .keepers
            .iter()
            .find(|k| k.user_id == user_id && !k.is_deleted)
            .cloned())
    }

    async fn list_keepers(
        &self,
        filter: &KeeperFilter,
        _: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<Keeper>> {
        let t = self.tables();
        let rows = t
            .keepers
            .iter()
            .filter(|k| !k.is_deleted)
            .filter(|k| filter.city.is_none() || k.city == filter.city)
            .filter(|k| filter.has_cage.is_none_or(|c| k.has_cage == c))
            .filter(|k| filter.min_rating.is_none_or(|r| k.rating >= r))
            .collect();
        Ok(paged(rows, page))
    }

    async fn update_keeper(&self, keeper: &Keeper) -> CoreResult<Keeper> {
        replace_live!(self, keepers, keeper, "Keeper")
    }

    async fn soft_delete_keeper(&self, id: DbId) -> CoreResult<()> {
        soft_delete!(self, keepers, id, "Keeper")
    }
}

#[async_trait]
impl SeekerStore for FakeStore {
    async fn create_seeker(&self, seeker: &Seeker) -> CoreResult<Seeker> {
        let mut t = self.tables();
        let mut created = seeker.clone();
        created.id = t.next_id();
        t.seekers.push(created.clone());
        Ok(created)
    }

    async fn find_seeker(&self, id: DbId) -> CoreResult<Seeker> {
        find_live!(self, seekers, id, "Seeker")
    }

    async fn find_seeker_include_deleted(&self, id: DbId) -> CoreResult<Seeker> {
        self.tables()
            .seekers
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| missing("Seeker", id))
    }

    async fn find_seeker_by_user(&self, user_id: DbId) -> CoreResult<Option<Seeker>> {
        Ok(self
            .tables()
            .seekers
            .iter()
            .find(|s| s.user_id == user_id && !s.is_deleted)
            .cloned())
    }

    async fn list_seekers(
        &self,
        _: &SeekerFilter,
        _: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<Seeker>> {
        let t = self.tables();
        Ok(paged(t.seekers.iter().filter(|s| !s.is_deleted).collect(), page))
    }

    async fn update_seeker(&self, seeker: &Seeker) -> CoreResult<Seeker> {
        replace_live!(self, seekers, seeker, "Seeker")
    }

    async fn soft_delete_seeker(&self, id: DbId) -> CoreResult<()> {
        soft_delete!(self, seekers, id, "Seeker")
    }
}

#[async_trait]
impl VetStore for FakeStore {
    async fn create_vet(&self, vet: &Vet) -> CoreResult<Vet> {
        let mut t = self.tables();
        let mut created = vet.clone();
        created.id = t.next_id();
        t.vets.push(created.clone());
        Ok(created)
    }

    async fn find_vet(&self, id: DbId) -> CoreResult<Vet> {
        find_live!(self, vets, id, "Vet")
    }

    async fn find_vet_include_deleted(&self, id: DbId) -> CoreResult<Vet> {
        self.tables()
            .vets
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| missing("Vet", id))
    }

    async fn find_vet_by_user(&self, user_id: DbId) -> CoreResult<Option<Vet>> {
        Ok(self
            .tables()
            .vets
            .iter()
            .find(|v| v.user_id == user_id && !v.is_deleted)
            .cloned())
    }

    async fn list_vets(&self, _: &VetFilter, _: &SortSpec, page: Page) -> CoreResult<Vec<Vet>> {
        let t = self.tables();
        Ok(paged(t.vets.iter().filter(|v| !v.is_deleted).collect(), page))
    }

    async fn update_vet(&self, vet: &Vet) -> CoreResult<Vet> {
        replace_live!(self, vets, vet, "Vet")
    }

    async fn soft_delete_vet(&self, id: DbId) -> CoreResult<()> {
        soft_delete!(self, vets, id, "Vet")
    }
}

#[async_trait]
impl PostStore for FakeStore {
    async fn create_post(&self, post: &Post) -> CoreResult<Post> {
        let mut t = self.tables();
        let mut created = post.clone();
        created.id = t.next_id();
        t.posts.push(created.clone());
        Ok(created)
    }

    async fn find_post(&self, id: DbId) -> CoreResult<Post> {
        find_live!(self, posts, id, "Post")
    }

    async fn find_post_include_deleted(&self, id: DbId) -> CoreResult<Post> {
        self.tables()
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| missing("Post", id))
    }

    async fn list_posts(&self, filter: &PostFilter, _: &SortSpec, page: Page) -> CoreResult<Vec<Post>> {
        let t = self.tables();
        let rows = t
            .posts
            .iter()
            .filter(|p| !p.is_deleted)
            .filter(|p| filter.author_id.is_none_or(|a| p.author_id == a))
            .filter(|p| filter.status.as_ref().is_none_or(|s| &p.status == s))
            .filter(|p| filter.city.is_none() || p.city == filter.city)
            .filter(|p| filter.animal_type.is_none() || p.animal_type == filter.animal_type)
            .filter(|p| {
                filter.visible_to.is_none_or(|viewer| {
                    p.author_id == viewer || p.status == PostStatus::Published.as_str()
                })
            })
            .collect();
        Ok(paged(rows, page))
    }

    async fn update_post(&self, post: &Post) -> CoreResult<Post> {
        replace_live!(self, posts, post, "Post")
    }

    async fn soft_delete_post(&self, id: DbId) -> CoreResult<()> {
        soft_delete!(self, posts, id, "Post")
    }
}

#[async_trait]
impl ReportStore for FakeStore {
    async fn create_report(
        &self,
        report: &Report,
        block_threshold: i64,
    ) -> CoreResult<ReportReceipt> {
        let mut t = self.tables();
        let published = t.posts.iter().any(|p| {
            p.id == report.post_id && !p.is_deleted && p.status == PostStatus::Published.as_str()
        });
        if !published {
            return Err(missing("Post", report.post_id));
        }
        if t
            .reports
            .iter()
            .any(|r| r.post_id == report.post_id && r.reporter_id == report.reporter_id)
        {
            return Err(CoreError::Conflict(
                "You have already reported this post".to_string(),
            ));
        }

        let mut created = report.clone();
        created.id = t.next_id();
        t.reports.push(created.clone());

        let count = t.reports.iter().filter(|r| r.post_id == report.post_id).count() as i64;
        let status = if reaches_block_threshold(count, block_threshold) {
            PostStatus::Blocked
        } else {
            PostStatus::Published
        };
        if let Some(post) = t.posts.iter_mut().find(|p| p.id == report.post_id) {
            post.reports_count = count as i32;
            post.status = status.as_str().to_string();
        }

        Ok(ReportReceipt {
            report: created,
            reports_count: count as i32,
            post_status: status.as_str().to_string(),
        })
    }

    async fn list_reports_for_post(&self, post_id: DbId) -> CoreResult<Vec<Report>> {
        Ok(self
            .tables()
            .reports
            .iter()
            .filter(|r| r.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn count_reports_for_post(&self, post_id: DbId) -> CoreResult<i64> {
        Ok(self.list_reports_for_post(post_id).await?.len() as i64)
    }
}

#[async_trait]
impl ReviewStore for FakeStore {
    async fn create_review(&self, review: &KeeperReview) -> CoreResult<KeeperReview> {
        let mut t = self.tables();
        if !t.keepers.iter().any(|k| k.id == review.keeper_id && !k.is_deleted) {
            return Err(missing("Keeper", review.keeper_id));
        }
        if t.reviews.iter().any(|r| {
            r.keeper_id == review.keeper_id && r.author_id == review.author_id && !r.is_deleted
        }) {
            return Err(CoreError::Conflict(
                "You have already reviewed this keeper".to_string(),
            ));
        }
        let mut created = review.clone();
        created.id = t.next_id();
        t.reviews.push(created.clone());
        Ok(created)
    }

    async fn find_review(&self, id: DbId) -> CoreResult<KeeperReview> {
        find_live!(self, reviews, id, "Review")
    }

    async fn find_review_include_deleted(&self, id: DbId) -> CoreResult<KeeperReview> {
        self.tables()
            .reviews
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| missing("Review", id))
    }

    async fn list_reviews_for_keeper(
        &self,
        keeper_id: DbId,
        _: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<KeeperReview>> {
        let t = self.tables();
        let rows = t
            .reviews
            .iter()
            .filter(|r| r.keeper_id == keeper_id && !r.is_deleted)
            .collect();
        Ok(paged(rows, page))
    }

    async fn update_review(&self, review: &KeeperReview) -> CoreResult<KeeperReview> {
        replace_live!(self, reviews, review, "Review")
    }

    async fn soft_delete_review(&self, id: DbId) -> CoreResult<()> {
        soft_delete!(self, reviews, id, "Review")
    }
}

#[async_trait]
impl ChatStore for FakeStore {
    async fn create_chat(&self, chat: &Chat, member_ids: &[DbId]) -> CoreResult<ChatWithMembers> {
        let mut t = self.tables();
        let all_exist = member_ids
            .iter()
            .all(|id| t.users.iter().any(|u| u.id == *id && !u.is_deleted));
        if !all_exist {
            return Err(CoreError::Validation(
                "One or more chat members do not exist".to_string(),
            ));
        }
        let mut created = chat.clone();
        created.id = t.next_id();
        let with_members = ChatWithMembers {
            chat: created,
            member_ids: member_ids.to_vec(),
        };
        t.chats.push(with_members.clone());
        Ok(with_members)
    }

    async fn find_chat(&self, id: DbId) -> CoreResult<ChatWithMembers> {
        self.tables()
            .chats
            .iter()
            .find(|c| c.chat.id == id && !c.chat.is_deleted)
            .cloned()
            .ok_or_else(|| missing("Chat", id))
    }

    async fn find_chat_include_deleted(&self, id: DbId) -> CoreResult<ChatWithMembers> {
        self.tables()
            .chats
            .iter()
            .find(|c| c.chat.id == id)
            .cloned()
            .ok_or_else(|| missing("Chat", id))
    }

    async fn list_chats_for_user(
        &self,
        user_id: DbId,
        page: Page,
    ) -> CoreResult<Vec<ChatWithMembers>> {
        let t = self.tables();
        let rows = t
            .chats
            .iter()
            .filter(|c| !c.chat.is_deleted && c.has_member(user_id))
            .collect();
        Ok(paged(rows, page))
    }

    async fn is_chat_member(&self, chat_id: DbId, user_id: DbId) -> CoreResult<bool> {
        Ok(self
            .tables()
            .chats
            .iter()
            .any(|c| c.chat.id == chat_id && c.has_member(user_id)))
    }

    async fn remove_chat_member(&self, chat_id: DbId, user_id: DbId) -> CoreResult<()> {
        let mut t = self.tables();
        let chat = t
            .chats
            .iter_mut()
            .find(|c| c.chat.id == chat_id && !c.chat.is_deleted && c.has_member(user_id))
            .ok_or_else(|| missing("Chat", chat_id))?;
        chat.member_ids.retain(|id| *id != user_id);
        if chat.member_ids.is_empty() {
            chat.chat.is_deleted = true;
            chat.chat.deleted_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[async_trait]
impl MessageStore for FakeStore {
    async fn create_message(&self, message: &Message) -> CoreResult<Message> {
        let mut t = self.tables();
        let mut created = message.clone();
        created.id = t.next_id();
        t.messages.push(created.clone());
        Ok(created)
    }

    async fn find_message(&self, id: DbId) -> CoreResult<Message> {
        find_live!(self, messages, id, "Message")
    }

    async fn find_message_include_deleted(&self, id: DbId) -> CoreResult<Message> {
        self.tables()
            .messages
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| missing("Message", id))
    }

    async fn list_messages(
        &self,
        chat_id: DbId,
        _: &SortSpec,
        page: Page,
    ) -> CoreResult<Vec<Message>> {
        let t = self.tables();
        let rows = t
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id && !m.is_deleted)
            .collect();
        Ok(paged(rows, page))
    }

    async fn update_message(&self, message: &Message) -> CoreResult<Message> {
        replace_live!(self, messages, message, "Message")
    }

    async fn soft_delete_message(&self, id: DbId) -> CoreResult<()> {
        soft_delete!(self, messages, id, "Message")
    }
}

#[async_trait]
impl SessionStore for FakeStore {
    async fn upsert_session(&self, session: &RefreshSession) -> CoreResult<RefreshSession> {
        let mut t = self.tables();
        let existing = t
            .sessions
            .iter()
            .position(|s| s.user_id == session.user_id && s.fingerprint == session.fingerprint);
        let mut stored = session.clone();
        stored.created_at = Utc::now();
        match existing {
            Some(i) => {
                stored.id = t.sessions[i].id;
                t.sessions[i] = stored.clone();
            }
            None => {
                stored.id = t.next_id();
                t.sessions.push(stored.clone());
            }
        }
        Ok(stored)
    }

    async fn find_session_by_token_hash(&self, hash: &str) -> CoreResult<Option<RefreshSession>> {
        let now = Utc::now();
        Ok(self
            .tables()
            .sessions
            .iter()
            .find(|s| s.refresh_token_hash == hash && s.expires_at > now)
            .cloned())
    }

    async fn take_session_by_token_hash(&self, hash: &str) -> CoreResult<Option<RefreshSession>> {
        let now = Utc::now();
        let mut t = self.tables();
        let found = t
            .sessions
            .iter()
            .position(|s| s.refresh_token_hash == hash && s.expires_at > now);
        Ok(found.map(|i| t.sessions.remove(i)))
    }

    async fn delete_session_for_fingerprint(
        &self,
        user_id: DbId,
        fingerprint: &str,
    ) -> CoreResult<bool> {
        let mut t = self.tables();
        let before = t.sessions.len();
        t.sessions
            .retain(|s| !(s.user_id == user_id && s.fingerprint == fingerprint));
        Ok(t.sessions.len() < before)
    }
}
