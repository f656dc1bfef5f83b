//! CRPT endpoint configuration
//!
//! Transport-level settings for the documents API. Rate limiting is
//! configured separately on the gate, see [`crate::limiter::RateLimit`].

use std::collections::HashMap;
use std::env;

use url::Url;

use crate::error::{CrptError, Result};

/// Path of the document creation endpoint, relative to the base URL
pub const CREATE_DOCUMENT_PATH: &str = "/api/v3/lk/documents/create";

/// Configuration for the CRPT API client
#[derive(Debug, Clone)]
pub struct CrptConfig {
    /// Base URL of the CRPT API
    pub base_url: String,
    /// Bearer token for the API (optional, the sandbox accepts none)
    pub auth_token: Option<String>,
    /// Request timeout in seconds
    pub request_timeout: u64,
    /// Connection timeout in seconds
    pub connect_timeout: u64,
    /// Proxy URL (optional)
    pub proxy_url: Option<String>,
    /// Extra headers sent with every request
    pub custom_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for CrptConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ismp.crpt.ru".to_string(),
            auth_token: None,
            request_timeout: 60,
            connect_timeout: 10,
            proxy_url: None,
            custom_headers: HashMap::new(),
            user_agent: "crpt-api-rust/0.1".to_string(),
        }
    }
}

impl CrptConfig {
    /// Create a configuration with an explicit token
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: Some(auth_token.into()),
            ..Default::default()
        }
    }

    /// Build configuration from environment variables
    ///
    /// Recognized variables: `CRPT_API_TOKEN`, `CRPT_BASE_URL`,
    /// `CRPT_REQUEST_TIMEOUT`, `CRPT_CONNECT_TIMEOUT`, `CRPT_PROXY_URL`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(token) = env::var("CRPT_API_TOKEN") {
            config.auth_token = Some(token);
        }

        if let Ok(base_url) = env::var("CRPT_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(timeout) = env::var("CRPT_REQUEST_TIMEOUT") {
            config.request_timeout = timeout
                .parse()
                .map_err(|_| CrptError::config("CRPT_REQUEST_TIMEOUT must be an integer"))?;
        }

        if let Ok(timeout) = env::var("CRPT_CONNECT_TIMEOUT") {
            config.connect_timeout = timeout
                .parse()
                .map_err(|_| CrptError::config("CRPT_CONNECT_TIMEOUT must be an integer"))?;
        }

        if let Ok(proxy) = env::var("CRPT_PROXY_URL") {
            config.proxy_url = Some(proxy);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)
            .map_err(|e| CrptError::config(format!("Invalid base URL '{}': {}", self.base_url, e)))?;

        if self.request_timeout == 0 {
            return Err(CrptError::config("Request timeout must be positive"));
        }

        if self.connect_timeout == 0 {
            return Err(CrptError::config("Connect timeout must be positive"));
        }

        if let Some(proxy) = &self.proxy_url {
            Url::parse(proxy)
                .map_err(|e| CrptError::config(format!("Invalid proxy URL '{}': {}", proxy, e)))?;
        }

        Ok(())
    }

    /// Full URL of the document creation endpoint
    pub fn create_document_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CREATE_DOCUMENT_PATH
        )
    }
}
