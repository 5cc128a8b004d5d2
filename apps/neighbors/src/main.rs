use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;

use neighbors::advisor::Advisor;
use neighbors::config::Config;
use neighbors::llm_client::GeminiClient;
use neighbors::logging::{self, LogOutput};
use neighbors::routes::build_router;
use neighbors::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing GEMINI_API_KEY)
    let config = Config::from_env()?;

    logging::init(&config.rust_log, LogOutput::Stdout);

    info!("Starting New Neighbors AI v{}", env!("CARGO_PKG_VERSION"));

    let llm = GeminiClient::new(config.gemini())?;
    info!("Gemini client initialized (model: {})", llm.model());

    let state = AppState {
        advisor: Advisor::new(Arc::new(llm)),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
