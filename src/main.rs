use library_catalog::{
    adapters::SystemClock,
    api::{handlers::AppState, router::create_router},
    application::catalog::Catalog,
    config::{DEFAULT_LOG_FILTER, ServerConfig},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // カタログはプロセスメモリ上にのみ存在する（再起動で消える）
    let catalog = Catalog::new(Arc::new(SystemClock::new()));
    let app_state = Arc::new(AppState::new(catalog));

    // Create router
    let app = create_router(app_state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
