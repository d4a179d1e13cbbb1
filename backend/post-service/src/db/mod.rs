/// Database access layer
///
/// - `ensure_schema`: creates the `posts` table at startup when absent
/// - `post_repo`: row-level CRUD on `posts`
pub mod post_repo;

use sqlx::SqlitePool;

/// Create the `posts` table if it does not exist yet.
///
/// `AUTOINCREMENT` keeps ids from being reused after a delete.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title VARCHAR(100) NOT NULL,
            content TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("posts table ready");
    Ok(())
}
