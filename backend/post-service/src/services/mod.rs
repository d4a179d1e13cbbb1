/// Business logic layer for post-service
///
/// - Post service: validation, scoped store sessions and transactions
pub mod posts;

pub use posts::PostService;
