//! Router assembly and the serve loop.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use axum::Router;
use rescat_config::ServerConfig;
use rescat_db::service::RecordService;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, records, reports, transfer};

/// Handler state: the one service built at startup.
pub type AppState = Arc<RecordService>;

/// Prefixes the record routes are mounted under.
pub const MOUNT_POINTS: [&str; 2] = ["/research_data", "/api/v1/research_data"];

fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(records::list).post(records::create))
        .route("/analytics", get(reports::analytics))
        .route("/categories", get(reports::categories))
        .route("/export", get(transfer::export))
        .route("/import", post(transfer::import))
        .route(
            "/:id",
            get(records::show)
                .put(records::update)
                .patch(records::update)
                .delete(records::destroy),
        )
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_DISPOSITION])
}

/// Build the full application router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let mut app = Router::new().route("/healthz", get(health::healthz));
    for mount in MOUNT_POINTS {
        app = app.nest(mount, record_routes());
    }
    app.layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}

/// Serve `app` on an already-bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "rescat API listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
