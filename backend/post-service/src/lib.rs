/// Post Service Library
///
/// Serves the Community API: CRUD over a single `posts` table.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and the route table
/// - `models`: Post entity, request DTOs and their validation rules
/// - `services`: Store sessions, transactions and error mapping
/// - `db`: Schema bootstrap and the posts repository
/// - `middleware`: Request metrics
/// - `error`: Error types and HTTP error bodies
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
/// - `openapi`: API documentation
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
