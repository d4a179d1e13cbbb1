use crate::models::Post;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

/// Map a `posts` row onto the `Post` value type
fn map_post_row(row: SqliteRow) -> Result<Post, sqlx::Error> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
    })
}

/// Insert a post and return it with the id assigned by the store
pub async fn insert_post(
    conn: &mut SqliteConnection,
    title: &str,
    content: &str,
) -> Result<Post, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO posts (title, content)
        VALUES (?1, ?2)
        RETURNING id, title, content
        "#,
    )
    .bind(title)
    .bind(content)
    .try_map(map_post_row)
    .fetch_one(&mut *conn)
    .await
}

/// Find a post by ID
pub async fn find_post_by_id(
    conn: &mut SqliteConnection,
    post_id: i64,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT id, title, content
        FROM posts
        WHERE id = ?1
        "#,
    )
    .bind(post_id)
    .try_map(map_post_row)
    .fetch_optional(&mut *conn)
    .await
}

/// List posts in insertion order, optionally restricted to titles containing
/// `keyword` (case-sensitive).
///
/// A negative `offset` is treated as 0 and a negative `limit` means no limit.
pub async fn list_posts(
    conn: &mut SqliteConnection,
    keyword: Option<&str>,
    offset: i64,
    limit: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    // instr() is case-sensitive, unlike LIKE on ASCII text
    sqlx::query(
        r#"
        SELECT id, title, content
        FROM posts
        WHERE ?1 IS NULL OR instr(title, ?1) > 0
        ORDER BY id ASC
        LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(keyword)
    .bind(limit.max(-1))
    .bind(offset.max(0))
    .try_map(map_post_row)
    .fetch_all(&mut *conn)
    .await
}

/// Overwrite the supplied fields of an existing post in one statement;
/// `None` leaves the stored value. Returns `None` when the post is absent.
pub async fn update_post(
    conn: &mut SqliteConnection,
    post_id: i64,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE posts
        SET title = COALESCE(?1, title),
            content = COALESCE(?2, content)
        WHERE id = ?3
        RETURNING id, title, content
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(post_id)
    .try_map(map_post_row)
    .fetch_optional(&mut *conn)
    .await
}

/// Hard delete a post. Returns whether a row was removed.
pub async fn delete_post(conn: &mut SqliteConnection, post_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?1")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Count all stored posts
pub async fn count_posts(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts")
        .fetch_one(&mut *conn)
        .await?;

    row.try_get::<i64, _>("count")
}
