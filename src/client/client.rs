//! CRPT API client
//!
//! One best-effort POST per send: no retries, no connection-level
//! serialization. reqwest's client is internally pooled and safe for
//! concurrent invocation, which is what the gate assumes of its sender.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use serde_json::Value;
use tracing::debug;

use crate::config::CrptConfig;
use crate::error::{CrptError, Result};
use crate::sender::{DocumentSender, SendOutcome};

use super::types::SignedDocument;

/// Client for the CRPT documents API
#[derive(Debug, Clone)]
pub struct CrptClient {
    config: CrptConfig,
    http_client: Client,
}

impl CrptClient {
    /// Create a client from the given configuration
    pub fn new(config: CrptConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| CrptError::config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let http_client = builder.build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// The configuration this client was built from
    pub fn config(&self) -> &CrptConfig {
        &self.config
    }

    fn build_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();

        if let Some(ref token) = self.config.auth_token {
            if let Ok(value) = format!("Bearer {}", token).parse() {
                headers.insert(reqwest::header::AUTHORIZATION, value);
            }
        }

        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        if let Ok(agent) = self.config.user_agent.parse() {
            headers.insert(reqwest::header::USER_AGENT, agent);
        }

        for (key, value) in &self.config.custom_headers {
            if let (Ok(name), Ok(value)) = (
                key.parse::<reqwest::header::HeaderName>(),
                value.parse::<reqwest::header::HeaderValue>(),
            ) {
                headers.insert(name, value);
            }
        }

        headers
    }

    async fn handle_response(&self, response: Response) -> Result<SendOutcome> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| CrptError::api(status, format!("Failed to read response: {}", e)))?;

        if !(200..300).contains(&status) {
            return Err(Self::map_http_error(status, &text));
        }

        let body: Value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(SendOutcome { status, body })
    }

    fn map_http_error(status: u16, body: &str) -> CrptError {
        match status {
            401 => CrptError::auth("Invalid or missing API token"),
            403 => CrptError::auth("Forbidden: insufficient permissions"),
            408 => CrptError::timeout("Endpoint reported a request timeout"),
            _ => CrptError::api(status, body),
        }
    }
}

#[async_trait]
impl DocumentSender for CrptClient {
    async fn send(&self, payload: &SignedDocument) -> Result<SendOutcome> {
        let url = self.config.create_document_url();
        debug!(%url, "posting document");

        let response = self
            .http_client
            .post(&url)
            .headers(self.build_headers())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CrptError::timeout(format!("Request to {} timed out", url))
                } else {
                    CrptError::from(e)
                }
            })?;

        self.handle_response(response).await
    }
}
