use std::future::Future;
use std::path::Path;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use dealerdesk_common::{not_found, DealerDeskError};
use dealerdesk_config::CorsConfig;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::app_state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The full application: health check, form API under `/api`, optional
/// Swagger UI and the client bundle when one is present.
pub fn build_router(state: &AppState) -> Router {
    let api = dealerdesk_forms::routes(state.submissions.clone()).fallback(api_not_found);

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = dealerdesk_common::routes().nest("/api", api);

    #[cfg(feature = "openapi")]
    {
        use dealerdesk_forms::doc::FormsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "DealerDesk API",
                version = "0.1.0",
                description = "Form submission audit trail for the DealerDesk CRM"
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(FormsApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    let app = match client_bundle(state.config.static_dir.as_deref()) {
        Some(bundle) => app.fallback_service(bundle),
        None => app,
    };

    app.layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(&state.config.cors))
        .layer(TraceLayer::new_for_http())
}

async fn api_not_found() -> DealerDeskError {
    not_found("Not found")
}

/// Static files from `dir`, with unknown paths answered by `index.html`.
fn client_bundle(dir: Option<&str>) -> Option<ServeDir<ServeFile>> {
    let Some(dir) = dir else {
        debug!("No static_dir configured; serving the API only");
        return None;
    };

    let index = Path::new(dir).join("index.html");
    if !index.is_file() {
        warn!(
            "Client bundle not found at {}; serving the API only",
            index.display()
        );
        return None;
    }

    info!("Serving client bundle from {}", dir);
    Some(ServeDir::new(dir).fallback(ServeFile::new(index)))
}

/// An empty allow-list admits any origin.
pub fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if cors.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), DealerDeskError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(DealerDeskError::from)
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, shutting down"),
        _ = terminate => info!("SIGTERM received, shutting down"),
    }
}
