use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{GeminiConfig, DEFAULT_API_BASE, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Startup fails if `GEMINI_API_KEY` is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub gemini_timeout: Option<Duration>,
    /// Directory the CLI writes result files into.
    pub output_dir: PathBuf,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_timeout = lookup("GEMINI_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .context("GEMINI_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        let max_upload_mb = lookup("MAX_UPLOAD_MB")
            .unwrap_or_else(|| "25".to_string())
            .parse::<usize>()
            .context("MAX_UPLOAD_MB must be a whole number")?;

        Ok(Config {
            gemini_api_key: require(&lookup, "GEMINI_API_KEY")?,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            gemini_timeout,
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            port: lookup("PORT")
                .unwrap_or_else(|| "8501".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini_api_key.clone(),
            model: self.gemini_model.clone(),
            api_base: self.gemini_api_base.clone(),
            timeout: self.gemini_timeout,
        }
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(
            config.gemini_api_base,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.gemini_timeout, None);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.port, 8501);
        assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        let err = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_overrides_flow_into_gemini_config() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "abc"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("GEMINI_API_BASE", "http://localhost:9000"),
            ("GEMINI_TIMEOUT_SECS", "30"),
            ("OUTPUT_DIR", "/tmp/out"),
            ("PORT", "9090"),
        ]))
        .unwrap();

        let gemini = config.gemini();
        assert_eq!(gemini.api_key, "abc");
        assert_eq!(gemini.model, "gemini-1.5-pro");
        assert_eq!(gemini.api_base, "http://localhost:9000");
        assert_eq!(gemini.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "k"),
            ("PORT", "not-a-port")
        ]))
        .is_err());
        assert!(Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_TIMEOUT_SECS", "soon")
        ]))
        .is_err());
    }
}
