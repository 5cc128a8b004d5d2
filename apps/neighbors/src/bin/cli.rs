use std::io;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use neighbors::advisor::Advisor;
use neighbors::cli::{Console, Session};
use neighbors::config::Config;
use neighbors::llm_client::GeminiClient;
use neighbors::logging::{self, LogOutput};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    logging::init(&config.rust_log, LogOutput::Stderr);

    let llm = GeminiClient::new(config.gemini())?;
    info!("Gemini client initialized (model: {})", llm.model());

    let session = Session::new(Advisor::new(Arc::new(llm)), &config.output_dir);
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    session.run(&mut console).await
}
