/// HTTP handlers and route table for post-service
///
/// - `posts`: CRUD over posts, shared by the plain, `/api` and `/api/safe` scopes
/// - `health`: liveness and store connectivity probes
pub mod health;
pub mod posts;

pub use posts::ErrorPolicy;

use crate::error::AppError;
use crate::metrics::serve_metrics;
use crate::openapi::ApiDoc;
use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Register every route. Expects a `web::Data<SqlitePool>` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::Data::new(ErrorPolicy::Standard))
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .route("/", web::get().to(posts::root))
        .route("/health", web::get().to(health::health_summary))
        .route("/health/live", web::get().to(health::liveness_check))
        .route("/metrics", web::get().to(serve_metrics))
        .service(
            SwaggerUi::new("/docs/{_:.*}").url(ApiDoc::openapi_json_path(), ApiDoc::openapi()),
        )
        .service(
            web::scope("/posts")
                .service(
                    web::resource("")
                        .route(web::get().to(posts::search_posts))
                        .route(web::post().to(posts::create_post)),
                )
                .service(web::resource("/{post_id}").route(web::get().to(posts::get_post))),
        )
        .service(
            web::scope("/api")
                .route("/stats", web::get().to(posts::get_stats))
                .service(
                    web::scope("/safe")
                        .app_data(web::Data::new(ErrorPolicy::Guarded))
                        .service(
                            web::resource("/posts").route(web::post().to(posts::create_post)),
                        )
                        .service(
                            web::resource("/posts/{post_id}")
                                .route(web::get().to(posts::get_post)),
                        ),
                )
                .service(
                    web::scope("/posts")
                        .service(web::resource("").route(web::get().to(posts::list_posts)))
                        .service(
                            web::resource("/{post_id}")
                                .route(web::get().to(posts::get_post))
                                .route(web::put().to(posts::update_post))
                                .route(web::delete().to(posts::delete_post)),
                        ),
                ),
        );
}

/// Malformed bodies and parameters are validation failures (422), like field violations.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}
