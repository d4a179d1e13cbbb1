/// Post handlers - HTTP endpoints for post operations
///
/// The same handlers serve `/posts`, `/api/posts` and `/api/safe/posts`;
/// the scope's [`ErrorPolicy`] decides how failures are reported.
use crate::error::{AppError, Result};
use crate::models::{
    CreatePostRequest, MessageResponse, PaginationParams, SearchPostsQuery, StatsResponse,
    UpdatePostRequest, API_VERSION,
};
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

/// Error strictness of a route scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Store failures surface as a generic 500
    Standard,
    /// Ids are sanity checked; store failures carry their cause
    /// (500 on reads, 400 on writes)
    Guarded,
}

impl ErrorPolicy {
    fn check_post_id(self, post_id: i64) -> Result<()> {
        if self == ErrorPolicy::Guarded && post_id <= 0 {
            return Err(AppError::BadRequest(
                "Post ID must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    fn read_error(self, err: AppError) -> AppError {
        match (self, err) {
            (ErrorPolicy::Guarded, AppError::Database(e)) => {
                AppError::Internal(format!("Internal server error: {}", e))
            }
            (_, err) => err,
        }
    }

    fn write_error(self, err: AppError) -> AppError {
        match (self, err) {
            (ErrorPolicy::Guarded, AppError::Database(e)) => {
                AppError::BadRequest(format!("Failed to create post: {}", e))
            }
            (_, err) => err,
        }
    }
}

/// API root
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "Welcome to Community API".to_string(),
    })
}

/// Get a post by ID
/// GET /posts/{post_id}, /api/posts/{post_id}, /api/safe/posts/{post_id}
pub async fn get_post(
    pool: web::Data<SqlitePool>,
    policy: web::Data<ErrorPolicy>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();
    policy.check_post_id(post_id)?;

    let service = PostService::new((**pool).clone());
    let post = service
        .get_post(post_id)
        .await
        .map_err(|e| policy.read_error(e))?;

    Ok(HttpResponse::Ok().json(post))
}

/// Search posts by title keyword
/// GET /posts?keyword=&skip=&limit=
pub async fn search_posts(
    pool: web::Data<SqlitePool>,
    query: web::Query<SearchPostsQuery>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service
        .list_posts(query.keyword.as_deref(), query.skip, query.limit)
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// List posts without filtering
/// GET /api/posts?skip=&limit=
pub async fn list_posts(
    pool: web::Data<SqlitePool>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts(None, query.skip, query.limit).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Create a new post
/// POST /posts, /api/safe/posts
pub async fn create_post(
    pool: web::Data<SqlitePool>,
    policy: web::Data<ErrorPolicy>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(&req)
        .await
        .map_err(|e| policy.write_error(e))?;

    Ok(HttpResponse::Created().json(post))
}

/// Update a post; omitted fields are left unchanged
/// PUT /api/posts/{post_id}
pub async fn update_post(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<i64>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.update_post(post_id.into_inner(), &req).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post
/// DELETE /api/posts/{post_id}
pub async fn delete_post(
    pool: web::Data<SqlitePool>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();
    let service = PostService::new((**pool).clone());
    service.delete_post(post_id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("Post with id {} successfully deleted", post_id),
    }))
}

/// Board statistics
/// GET /api/stats
pub async fn get_stats(pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let total_posts = service.count_posts().await?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        total_posts,
        api_version: API_VERSION.to_string(),
        status: "active".to_string(),
    }))
}
