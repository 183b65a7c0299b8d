use axum::extract::DefaultBodyLimit;
use candidate_intake::{
    config::{get_config, init_config},
    middleware::cors::intake_cors,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    init_config()?;
    let config = get_config();

    let app = routes::create_router(AppState::new())
        .layer(intake_cors(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.upload_limit_bytes));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("HR Candidate Intake API listening on {}", addr);
    info!(origins = ?config.allowed_origins, "CORS enabled for intake UI");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
