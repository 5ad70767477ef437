use std::sync::Arc;

use dealerdesk_backend::{build_router, serve, shutdown_signal, AppState};
use dealerdesk_common::{config_error, logging, DealerDeskError};
use dealerdesk_config::{load_config, AppConfig};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        error!("Server stopped with an error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), DealerDeskError> {
    let config: Arc<AppConfig> = Arc::new(load_config().map_err(config_error)?);
    let state = AppState::new(config.clone()).await?;
    let app = build_router(&state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    let result = serve(listener, app, shutdown_signal()).await;
    state.close().await;
    info!("Server stopped");
    result
}
