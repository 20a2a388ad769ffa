//! banter relay server
//!
//! Stateless HTTP endpoint forwarding conversation transcripts to the
//! upstream completion API.

use banter::api::{create_router, AppState};
use banter::config::Config;
use banter::relay::RelayService;
use banter::upstream::{CompletionService, LoggingService, OpenAiService};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banter=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration: a missing credential aborts startup here, before the
    // listener binds.
    let config = Config::from_env()?;

    let upstream = Arc::new(LoggingService::new(Arc::new(OpenAiService::new(
        config.api_key.clone(),
        config.base_url.as_deref(),
    ))));
    tracing::info!(model = %upstream.model_id(), "Upstream completion service initialized");

    let state = AppState::new(RelayService::new(upstream));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Relay server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
