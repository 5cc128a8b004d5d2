use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines go. The console front end keeps stdout for the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

/// Initializes structured logging. `RUST_LOG` wins when it parses as a filter;
/// otherwise the crate logs at `default_level`.
pub fn init(default_level: &str, output: LogOutput) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), default_level))
    });
    let registry = tracing_subscriber::registry().with(filter);

    match output {
        LogOutput::Stdout => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogOutput::Stderr => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
