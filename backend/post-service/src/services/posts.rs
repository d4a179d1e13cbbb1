/// Post service - validation, store sessions and transactions for posts
///
/// Each operation acquires its own pooled connection for the duration of the
/// call. The guard is returned to the pool when it drops, whether the
/// operation succeeded or not. Inserts and deletes run in a
/// transaction; updates are a single statement. Both commit before returning.
use crate::config::SERVICE_NAME;
use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::metrics::record_store_operation;
use crate::models::{CreatePostRequest, Post, UpdatePostRequest};
use db_pool::{open_session, Session};
use sqlx::{Connection, SqlitePool};

#[derive(Clone)]
pub struct PostService {
    pool: SqlitePool,
}

impl PostService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn session(&self) -> Result<Session> {
        Ok(open_session(&self.pool, SERVICE_NAME).await?)
    }

    /// Validate and insert a new post
    pub async fn create_post(&self, req: &CreatePostRequest) -> Result<Post> {
        req.validate_payload()?;

        let post = observe("insert", self.insert(&req.title, &req.content).await)?;
        tracing::info!(post_id = post.id, "post created");
        Ok(post)
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: i64) -> Result<Post> {
        observe("get", self.fetch(post_id).await)
    }

    /// List posts in insertion order with an optional title keyword
    pub async fn list_posts(
        &self,
        keyword: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Post>> {
        let keyword = keyword.filter(|k| !k.is_empty());
        observe("list", self.list(keyword, skip, limit).await)
    }

    /// Validate and apply a partial update
    ///
    /// Validation runs before the store is touched, so an invalid payload is
    /// rejected even when the post does not exist.
    pub async fn update_post(&self, post_id: i64, req: &UpdatePostRequest) -> Result<Post> {
        req.validate_payload()?;

        let post = observe("update", self.update(post_id, req).await)?;
        tracing::info!(post_id, "post updated");
        Ok(post)
    }

    /// Hard delete a post
    pub async fn delete_post(&self, post_id: i64) -> Result<()> {
        observe("delete", self.delete(post_id).await)?;
        tracing::info!(post_id, "post deleted");
        Ok(())
    }

    /// Total number of stored posts
    pub async fn count_posts(&self) -> Result<i64> {
        observe("count", self.count().await)
    }

    /// A failed insert is rolled back explicitly before the error surfaces.
    async fn insert(&self, title: &str, content: &str) -> Result<Post> {
        let mut conn = self.session().await?;
        let mut tx = conn.begin().await?;

        match post_repo::insert_post(&mut tx, title, content).await {
            Ok(post) => {
                tx.commit().await?;
                Ok(post)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "post insert rollback failed");
                }
                Err(AppError::from(err))
            }
        }
    }

    async fn fetch(&self, post_id: i64) -> Result<Post> {
        let mut conn = self.session().await?;
        post_repo::find_post_by_id(&mut conn, post_id)
            .await?
            .ok_or_else(|| AppError::post_not_found(post_id))
    }

    async fn list(&self, keyword: Option<&str>, skip: i64, limit: i64) -> Result<Vec<Post>> {
        let mut conn = self.session().await?;
        Ok(post_repo::list_posts(&mut conn, keyword, skip, limit).await?)
    }

    /// A single statement, so concurrent writers to the same row are
    /// serialized by the store without a read snapshot to go stale.
    async fn update(&self, post_id: i64, req: &UpdatePostRequest) -> Result<Post> {
        let mut conn = self.session().await?;
        post_repo::update_post(
            &mut conn,
            post_id,
            req.title.as_deref(),
            req.content.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::post_not_found(post_id))
    }

    async fn delete(&self, post_id: i64) -> Result<()> {
        let mut conn = self.session().await?;
        let mut tx = conn.begin().await?;

        if !post_repo::delete_post(&mut tx, post_id).await? {
            return Err(AppError::post_not_found(post_id));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let mut conn = self.session().await?;
        Ok(post_repo::count_posts(&mut conn).await?)
    }
}

/// Record the outcome of a store operation and pass the result through
fn observe<T>(operation: &str, result: Result<T>) -> Result<T> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(AppError::NotFound(_)) => "not_found",
        Err(err) => {
            tracing::warn!(operation, error = %err, "post store operation failed");
            "error"
        }
    };
    record_store_operation(operation, outcome);
    result
}
