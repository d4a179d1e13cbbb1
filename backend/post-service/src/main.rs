use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use db_pool::{close_pool, create_pool};
use post_service::config::SERVICE_NAME;
use post_service::db::ensure_schema;
use post_service::handlers;
use post_service::middleware::MetricsMiddleware;
use post_service::openapi::ApiDoc;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn flatten_join(joined: Result<io::Result<()>, tokio::task::JoinError>) -> io::Result<()> {
    match joined {
        Ok(res) => res,
        Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Post Service
///
/// Serves the Community API over plain HTTP.
///
/// # Routes
///
/// - `/posts/*` - Lookup, keyword search and creation
/// - `/api/posts/*` - List, read, update, delete
/// - `/api/safe/posts/*` - Read and create with strict error reporting
/// - `/api/stats` - Post count
/// - `/health`, `/metrics`, `/docs/index.html` - Operations
#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();

    init_tracing();

    // Load configuration
    let config = match post_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting {} v{}", ApiDoc::title(), ApiDoc::version());
    tracing::info!("Environment: {}", config.app.env);

    let db_cfg = config.db_pool_config();
    db_cfg.log_config();
    let db_pool = match create_pool(db_cfg).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {:#}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = ensure_schema(&db_pool).await {
        tracing::error!("Schema bootstrap failed: {:#}", e);
        close_pool(&db_pool, SERVICE_NAME).await;
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to create posts table: {e}"),
        ));
    }

    let http_bind_address = config.bind_address();
    tracing::info!("Starting HTTP server at {}", http_bind_address);

    let db_pool_http = db_pool.clone();
    let allowed_origins = config.cors.allowed_origins.clone();

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool_http.clone()))
            .wrap(MetricsMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&http_bind_address)?
    .workers(config.app.workers)
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    let result = tokio::select! {
        joined = &mut server_task => flatten_join(joined),
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
            flatten_join(server_task.await)
        }
    };

    close_pool(&db_pool, SERVICE_NAME).await;
    tracing::info!("Post-service shut down");

    result
}
