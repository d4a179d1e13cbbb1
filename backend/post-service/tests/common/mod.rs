//! Shared fixtures for post-service integration tests
#![allow(dead_code)]

use db_pool::{close_pool, create_pool, DbConfig};
use post_service::db::ensure_schema;
use sqlx::SqlitePool;
use std::path::PathBuf;

/// Fresh in-memory store with the posts table created
pub async fn setup_test_db() -> SqlitePool {
    let pool = create_pool(DbConfig::in_memory("post-service-test"))
        .await
        .expect("create in-memory pool");
    ensure_schema(&pool).await.expect("create posts table");
    pool
}

/// File-backed store (WAL, several connections) under the temp dir
pub struct FileDb {
    pub pool: SqlitePool,
    path: PathBuf,
}

impl FileDb {
    pub async fn new(name: &str, max_connections: u32) -> Self {
        let path = std::env::temp_dir().join(format!(
            "post-service-{}-{}.db",
            name,
            std::process::id()
        ));
        remove_db_files(&path);

        let config = DbConfig {
            service_name: "post-service-test".to_string(),
            database_url: format!("sqlite://{}", path.display()),
            max_connections,
            ..DbConfig::default()
        };
        let pool = create_pool(config).await.expect("create file pool");
        ensure_schema(&pool).await.expect("create posts table");

        Self { pool, path }
    }

    pub async fn teardown(self) {
        close_pool(&self.pool, "post-service-test").await;
        remove_db_files(&self.path);
    }
}

fn remove_db_files(path: &PathBuf) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}

/// Build the full application around `pool`
#[allow(unused_macros)]
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .wrap(post_service::middleware::MetricsMiddleware)
                .wrap(actix_web::middleware::NormalizePath::trim())
                .configure(post_service::handlers::configure),
        )
        .await
    };
}
