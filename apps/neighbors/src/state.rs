use crate::advisor::Advisor;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub advisor: Advisor,
    pub config: Config,
}
