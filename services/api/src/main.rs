use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use linx_api::config::ApiConfig;
use linx_api::router::build_router;
use linx_api::state::AppState;

#[tokio::main]
async fn main() {
    linx_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        config: Arc::new(config),
    };

    let http_addr = format!("0.0.0.0:{}", state.config.api_port);
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
