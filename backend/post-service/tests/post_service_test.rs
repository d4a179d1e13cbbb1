//! Integration Tests: PostService against an in-memory store
//!
//! Store-level properties that hold independently of the HTTP layer.

mod common;

use common::setup_test_db;
use post_service::models::{CreatePostRequest, UpdatePostRequest};
use post_service::services::PostService;
use post_service::AppError;

fn new_post(title: &str, content: &str) -> CreatePostRequest {
    CreatePostRequest {
        title: title.to_string(),
        content: content.to_string(),
    }
}

#[tokio::test]
async fn insert_then_get_returns_equal_post() {
    let service = PostService::new(setup_test_db().await);

    let created = service
        .create_post(&new_post("Hello", "World"))
        .await
        .expect("create");
    assert_eq!(created.id, 1);

    let fetched = service.get_post(created.id).await.expect("get");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn ids_increase_across_inserts() {
    let service = PostService::new(setup_test_db().await);

    let first = service.create_post(&new_post("a", "1")).await.expect("first");
    let second = service.create_post(&new_post("b", "2")).await.expect("second");
    assert!(second.id > first.id);
}

#[tokio::test]
async fn update_keeps_id_and_applies_fields() {
    let service = PostService::new(setup_test_db().await);
    let created = service.create_post(&new_post("old", "body")).await.expect("create");

    let updated = service
        .update_post(
            created.id,
            &UpdatePostRequest {
                title: Some("new".to_string()),
                content: None,
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "new");
    assert_eq!(updated.content, "body");
    assert_eq!(service.get_post(created.id).await.expect("get"), updated);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let service = PostService::new(setup_test_db().await);
    let created = service.create_post(&new_post("gone", "soon")).await.expect("create");

    service.delete_post(created.id).await.expect("delete");

    let err = service.get_post(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.to_string(), format!("Post with id {} not found", created.id));

    let err = service.delete_post(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn filtered_listing_is_ordered_subsequence() {
    let service = PostService::new(setup_test_db().await);
    for title in ["Rust one", "Go", "Rust two", "rust three", "Rust four"] {
        service.create_post(&new_post(title, "x")).await.expect("create");
    }

    let all = service.list_posts(None, 0, -1).await.expect("list all");
    let filtered = service.list_posts(Some("Rust"), 0, -1).await.expect("filter");

    let titles: Vec<&str> = filtered.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Rust one", "Rust two", "Rust four"]);

    // Every filtered post appears in the full listing, in the same relative order
    let mut cursor = all.iter();
    for post in &filtered {
        assert!(cursor.any(|p| p == post), "post {} out of order", post.id);
    }

    // Empty keyword behaves like no filter
    let unfiltered = service.list_posts(Some(""), 0, -1).await.expect("empty keyword");
    assert_eq!(unfiltered, all);
}

#[tokio::test]
async fn pagination_windows_the_full_listing() {
    let service = PostService::new(setup_test_db().await);
    for i in 0..6 {
        service
            .create_post(&new_post(&format!("post {i}"), "x"))
            .await
            .expect("create");
    }

    let all = service.list_posts(None, 0, -1).await.expect("list all");
    assert_eq!(all.len(), 6);

    let page = service.list_posts(None, 2, 3).await.expect("page");
    assert_eq!(page, all[2..5].to_vec());

    assert!(service.list_posts(None, 10, 3).await.expect("past end").is_empty());
    assert!(service.list_posts(None, 0, 0).await.expect("zero limit").is_empty());

    // Negative skip is treated as zero
    let from_start = service.list_posts(None, -5, 2).await.expect("negative skip");
    assert_eq!(from_start, all[..2].to_vec());
}

#[tokio::test]
async fn count_matches_unbounded_listing() {
    let service = PostService::new(setup_test_db().await);
    assert_eq!(service.count_posts().await.expect("empty count"), 0);

    for title in ["a", "b", "c", "d"] {
        service.create_post(&new_post(title, "x")).await.expect("create");
    }
    service.delete_post(2).await.expect("delete");

    let count = service.count_posts().await.expect("count");
    let listed = service.list_posts(None, 0, -1).await.expect("list");
    assert_eq!(count, 3);
    assert_eq!(count as usize, listed.len());
}

#[tokio::test]
async fn validation_failures_leave_store_untouched() {
    let service = PostService::new(setup_test_db().await);
    let created = service.create_post(&new_post("keep", "me")).await.expect("create");

    let err = service.create_post(&new_post("  ", "x")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = service.create_post(&new_post("ok", "")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = service
        .update_post(
            created.id,
            &UpdatePostRequest {
                title: Some("t".repeat(101)),
                content: Some("new".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(service.count_posts().await.expect("count"), 1);
    assert_eq!(service.get_post(created.id).await.expect("get"), created);
}

#[tokio::test]
async fn update_missing_post_creates_nothing() {
    let service = PostService::new(setup_test_db().await);

    let err = service
        .update_post(
            7,
            &UpdatePostRequest {
                title: Some("ghost".to_string()),
                content: Some("none".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(service.count_posts().await.expect("count"), 0);
}

#[tokio::test]
async fn store_failure_surfaces_as_database_error() {
    let pool = setup_test_db().await;
    let service = PostService::new(pool.clone());

    sqlx::query("DROP TABLE posts")
        .execute(&pool)
        .await
        .expect("drop posts table");

    let err = service.create_post(&new_post("x", "y")).await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));

    let err = service.get_post(1).await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
}
