pub mod advisor;
pub mod cli;
pub mod config;
pub mod documents;
pub mod errors;
pub mod llm_client;
pub mod logging;
pub mod routes;
pub mod state;
pub mod storage;
