//! Configuration for the paper-synth server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Outbound API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the Crossref REST API.
    pub const CROSSREF_API: &str = "https://api.crossref.org";

    /// Default model backend exposing OpenAI-compatible completion routes.
    pub const GENERATOR_API: &str = "http://127.0.0.1:8080";

    /// Model served by the backend.
    pub const DEFAULT_MODEL: &str = "gpt2-medium";

    /// Crossref request timeout.
    pub const REFERENCE_TIMEOUT: Duration = Duration::from_secs(30);

    /// Generation request timeout (long outputs on CPU backends are slow).
    pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(300);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Paper composition defaults.
pub mod paper {
    /// Token ceiling for each generated section.
    pub const MAX_LENGTH: u32 = 600;

    /// Number of references attached to a paper.
    pub const REFERENCE_COUNT: usize = 15;
}

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3006;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub host: IpAddr,

    /// Port the HTTP server binds to.
    pub port: u16,

    /// Development mode: verbose logs and detailed error pages.
    pub debug: bool,

    /// Base URL of the model backend.
    pub generator_url: String,

    /// Model name requested from the backend.
    pub model: String,

    /// Token ceiling per generated section.
    pub max_length: u32,

    /// Base URL for the Crossref API (for testing with mock servers).
    pub crossref_api_url: String,

    /// Contact address sent to Crossref for the polite pool.
    pub crossref_mailto: Option<String>,

    /// References requested per paper.
    pub reference_count: usize,

    /// Retries for transient outbound failures. Zero disables retrying.
    pub max_retries: u32,

    /// Crossref request timeout.
    pub reference_timeout: Duration,

    /// Generation request timeout.
    pub generation_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a configuration with the default endpoints and limits.
    #[must_use]
    pub fn new(debug: bool) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            debug,
            generator_url: api::GENERATOR_API.to_string(),
            model: api::DEFAULT_MODEL.to_string(),
            max_length: paper::MAX_LENGTH,
            crossref_api_url: api::CROSSREF_API.to_string(),
            crossref_mailto: None,
            reference_count: paper::REFERENCE_COUNT,
            max_retries: 0,
            reference_timeout: api::REFERENCE_TIMEOUT,
            generation_timeout: api::GENERATION_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointing both backends at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            debug: true,
            generator_url: base_url.to_string(),
            model: "test-model".to_string(),
            max_length: paper::MAX_LENGTH,
            crossref_api_url: base_url.to_string(),
            crossref_mailto: None,
            reference_count: paper::REFERENCE_COUNT,
            max_retries: 0,
            reference_timeout: Duration::from_secs(5),
            generation_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let debug = std::env::var("PAPER_SYNTH_DEBUG")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let mut config = Self::new(debug);

        if let Ok(host) = std::env::var("HOST") {
            config.host = host.parse()?;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.port = port.parse()?;
        }
        if let Ok(url) = std::env::var("GENERATOR_URL") {
            config.generator_url = url;
        }
        if let Ok(model) = std::env::var("GENERATOR_MODEL") {
            config.model = model;
        }
        if let Ok(url) = std::env::var("CROSSREF_API_URL") {
            config.crossref_api_url = url;
        }
        config.crossref_mailto = std::env::var("CROSSREF_MAILTO").ok();

        config.validate()?;
        Ok(config)
    }

    /// Check that both backend URLs parse.
    ///
    /// # Errors
    ///
    /// Returns error naming the offending URL.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in
            [("generator_url", &self.generator_url), ("crossref_api_url", &self.crossref_api_url)]
        {
            url::Url::parse(value)
                .map_err(|e| anyhow::anyhow!("invalid {name} '{value}': {e}"))?;
        }
        if self.reference_count == 0 {
            anyhow::bail!("reference_count must be positive");
        }
        Ok(())
    }

    /// Socket address to listen on.
    #[must_use]
    pub const fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.debug);
        assert_eq!(config.port, 3006);
        assert_eq!(config.max_length, 600);
        assert_eq!(config.reference_count, 15);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:3006");
    }

    #[test]
    fn test_for_testing_points_at_mock() {
        let config = Config::for_testing("http://127.0.0.1:9999");
        assert_eq!(config.generator_url, "http://127.0.0.1:9999");
        assert_eq!(config.crossref_api_url, "http://127.0.0.1:9999");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = Config::default();
        config.generator_url = "not a url".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("generator_url"));
    }

    #[test]
    fn test_validate_rejects_zero_references() {
        let mut config = Config::default();
        config.reference_count = 0;
        assert!(config.validate().is_err());
    }
}
