//! Integration tests for soft-delete behaviour.
//!
//! Verifies against a real database that:
//! - soft-deleted entities are hidden from `find_*` and `list_*` queries
//! - `find_*_include_deleted` still returns them with `is_deleted = true`
//! - a second soft delete reports `NotFound`
//! - a deleted profile frees the one-profile-per-user slot

use assert_matches::assert_matches;
use chrono::Utc;
use pethaven_core::error::CoreError;
use pethaven_core::pagination::Page;
use pethaven_core::sorting::{resolve_sort, SortDefaults};
use pethaven_db::models::chat::CreateChat;
use pethaven_db::models::keeper::{CreateKeeper, KeeperFilter, KEEPER_SORT_FIELDS};
use pethaven_db::models::message::{SendMessage, MESSAGE_SORT_FIELDS};
use pethaven_db::models::post::{CreatePost, PostFilter, POST_SORT_FIELDS};
use pethaven_db::models::seeker::{CreateSeeker, SeekerFilter, SEEKER_SORT_FIELDS};
use pethaven_db::models::user::{RegisterUser, User};
use pethaven_db::models::vet::{CreateVet, VetFilter, VET_SORT_FIELDS};
use pethaven_db::stores::{
    ChatStore, KeeperStore, MessageStore, PostStore, SeekerStore, UserStore, VetStore,
};
use pethaven_db::PgStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(store: &PgStore, username: &str) -> User {
    let input = RegisterUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: "unused-in-store-tests".to_string(),
        ..RegisterUser::default()
    };
    let mut user = input.to_domain("hash".to_string());
    user.created_at = Utc::now();
    user.updated_at = user.created_at;
    store.create_user(&user).await.unwrap()
}

// ---------------------------------------------------------------------------
// Test: soft delete hides a keeper from find and list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_hides_keeper(pool: PgPool) {
    let store = PgStore::new(pool);
    let user = new_user(&store, "alice").await;
    let keeper = store
        .create_keeper(&CreateKeeper::default().to_domain(user.id))
        .await
        .unwrap();

    let sort = resolve_sort(None, KEEPER_SORT_FIELDS, &SortDefaults::default()).unwrap();
    let before = store
        .list_keepers(&KeeperFilter::default(), &sort, Page::default())
        .await
        .unwrap();
    assert!(before.iter().any(|k| k.id == keeper.id));

    store.soft_delete_keeper(keeper.id).await.unwrap();

    assert_matches!(
        store.find_keeper(keeper.id).await,
        Err(CoreError::NotFound { entity: "Keeper", .. })
    );
    let after = store
        .list_keepers(&KeeperFilter::default(), &sort, Page::default())
        .await
        .unwrap();
    assert!(!after.iter().any(|k| k.id == keeper.id));

    let deleted = store.find_keeper_include_deleted(keeper.id).await.unwrap();
    assert!(deleted.is_deleted);
    assert!(deleted.deleted_at.is_some());
}

// ---------------------------------------------------------------------------
// Test: soft delete is not repeatable
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_soft_delete_is_not_found(pool: PgPool) {
    let store = PgStore::new(pool);
    let user = new_user(&store, "bob").await;

    store.soft_delete_user(user.id).await.unwrap();
    assert_matches!(
        store.soft_delete_user(user.id).await,
        Err(CoreError::NotFound { entity: "User", .. })
    );
}

// ---------------------------------------------------------------------------
// Test: deleted posts disappear from lists but stay addressable by id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_hides_post(pool: PgPool) {
    let store = PgStore::new(pool);
    let author = new_user(&store, "carol").await;
    let input = CreatePost {
        title: "Kitten needs a home".to_string(),
        body: "Two months old, litter trained.".to_string(),
        status: Some("published".to_string()),
        ..CreatePost::default()
    };
    let post = store.create_post(&input.to_domain(author.id)).await.unwrap();

    store.soft_delete_post(post.id).await.unwrap();

    let sort = resolve_sort(None, POST_SORT_FIELDS, &SortDefaults::default()).unwrap();
    let listed = store
        .list_posts(&PostFilter::default(), &sort, Page::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
    assert_matches!(store.find_post(post.id).await, Err(CoreError::NotFound { .. }));
    assert!(store.find_post_include_deleted(post.id).await.unwrap().is_deleted);
}

// ---------------------------------------------------------------------------
// Test: soft delete hides seeker and vet profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_hides_seeker(pool: PgPool) {
    let store = PgStore::new(pool);
    let user = new_user(&store, "erin").await;
    let input = CreateSeeker {
        city: Some("Kazan".to_string()),
        ..CreateSeeker::default()
    };
    let seeker = store.create_seeker(&input.to_domain(user.id)).await.unwrap();

    store.soft_delete_seeker(seeker.id).await.unwrap();

    let sort = resolve_sort(None, SEEKER_SORT_FIELDS, &SortDefaults::default()).unwrap();
    let listed = store
        .list_seekers(&SeekerFilter::default(), &sort, Page::default())
        .await
        .unwrap();
    assert!(!listed.iter().any(|s| s.id == seeker.id));
    assert_matches!(
        store.find_seeker(seeker.id).await,
        Err(CoreError::NotFound { entity: "Seeker", .. })
    );
    assert_eq!(store.find_seeker_by_user(user.id).await.unwrap(), None);

    let deleted = store.find_seeker_include_deleted(seeker.id).await.unwrap();
    assert!(deleted.is_deleted);
    assert!(deleted.deleted_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_hides_vet(pool: PgPool) {
    let store = PgStore::new(pool);
    let user = new_user(&store, "frank").await;
    let input = CreateVet {
        clinic_name: "Paws & Claws".to_string(),
        specialization: Some("exotic".to_string()),
        ..CreateVet::default()
    };
    let vet = store.create_vet(&input.to_domain(user.id)).await.unwrap();

    store.soft_delete_vet(vet.id).await.unwrap();

    let sort = resolve_sort(None, VET_SORT_FIELDS, &SortDefaults::default()).unwrap();
    let listed = store
        .list_vets(&VetFilter::default(), &sort, Page::default())
        .await
        .unwrap();
    assert!(!listed.iter().any(|v| v.id == vet.id));
    assert_matches!(
        store.find_vet(vet.id).await,
        Err(CoreError::NotFound { entity: "Vet", .. })
    );

    let deleted = store.find_vet_include_deleted(vet.id).await.unwrap();
    assert!(deleted.is_deleted);
    assert_eq!(deleted.clinic_name, "Paws & Claws");
}

// ---------------------------------------------------------------------------
// Test: deleted messages leave the chat history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_hides_message(pool: PgPool) {
    let store = PgStore::new(pool);
    let owner = new_user(&store, "grace").await;
    let guest = new_user(&store, "heidi").await;
    let input = CreateChat {
        title: None,
        member_ids: vec![guest.id],
    };
    let chat = store
        .create_chat(&input.to_domain(owner.id), &input.member_ids_with(owner.id))
        .await
        .unwrap();
    let message = store
        .create_message(
            &SendMessage {
                content: "Is the puppy still available?".to_string(),
            }
            .to_domain(chat.chat.id, guest.id),
        )
        .await
        .unwrap();

    store.soft_delete_message(message.id).await.unwrap();

    let sort = resolve_sort(None, MESSAGE_SORT_FIELDS, &SortDefaults::default()).unwrap();
    let history = store
        .list_messages(chat.chat.id, &sort, Page::default())
        .await
        .unwrap();
    assert!(history.is_empty());
    assert_matches!(
        store.find_message(message.id).await,
        Err(CoreError::NotFound { entity: "Message", .. })
    );

    let deleted = store.find_message_include_deleted(message.id).await.unwrap();
    assert!(deleted.is_deleted);
    assert_eq!(deleted.content, "Is the puppy still available?");
}

// ---------------------------------------------------------------------------
// Test: a deleted profile can be recreated
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_unique_only_among_live_rows(pool: PgPool) {
    let store = PgStore::new(pool);
    let user = new_user(&store, "dave").await;
    let first = store
        .create_keeper(&CreateKeeper::default().to_domain(user.id))
        .await
        .unwrap();

    assert_matches!(
        store
            .create_keeper(&CreateKeeper::default().to_domain(user.id))
            .await,
        Err(CoreError::Conflict(_))
    );

    store.soft_delete_keeper(first.id).await.unwrap();
    let second = store
        .create_keeper(&CreateKeeper::default().to_domain(user.id))
        .await
        .unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(
        store.find_keeper_by_user(user.id).await.unwrap().map(|k| k.id),
        Some(second.id)
    );
}
