/// Data models for post-service
///
/// - `Post`: the stored entity
/// - request DTOs with their validation rules
/// - query parameters and small response envelopes
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_LIST_LIMIT: i64 = 10;
pub const API_VERSION: &str = "1.0.0";

/// A stored post. `id` is assigned by the store on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content must be at least 1 character"))]
    pub content: String,
}

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content must be at least 1 character"))]
    pub content: Option<String>,
}

impl CreatePostRequest {
    /// Field bounds first, then the blank-title rule.
    pub fn validate_payload(&self) -> Result<()> {
        self.validate()?;
        ensure_title_not_blank(&self.title)
    }
}

impl UpdatePostRequest {
    pub fn validate_payload(&self) -> Result<()> {
        self.validate()?;
        match &self.title {
            Some(title) => ensure_title_not_blank(title),
            None => Ok(()),
        }
    }
}

fn ensure_title_not_blank(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation(
            "Title cannot be empty or whitespace only".to_string(),
        ));
    }
    Ok(())
}

/// `GET /posts` query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPostsQuery {
    pub keyword: Option<String>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// `GET /api/posts` query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub total_posts: i64,
    pub api_version: String,
    pub status: String,
}
