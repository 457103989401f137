//! Axum router construction.
//!
//! Builds the application router with all routes, middleware layers, and
//! static file serving for the frontend.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use imagebin_core::MAX_IMAGE_BYTES;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

/// Slack on top of the payload cap for multipart framing (boundaries,
/// part headers). The exact 3 MiB boundary is enforced by the upload
/// handler, not the transport limit.
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/upload", post(routes::images::upload_image))
        .route("/images", get(routes::images::list_images))
        .route(
            "/images/{id}",
            get(routes::images::get_image).delete(routes::images::delete_image),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + BODY_LIMIT_SLACK))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // Static file serving for the gallery UI.
    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {:?}", dir);
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                tower_http::services::ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(tower_http::services::ServeFile::new(index_path)),
            );
        }
    }

    app
}
