//! The seam between the rate-limiting gate and the transport
//!
//! The gate depends only on [`DocumentSender`]; any transport that can
//! perform one POST of a signed document satisfies it. Implementations
//! must be safe for concurrent invocation, the gate does not serialize
//! sends against each other.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::SignedDocument;
use crate::error::Result;

/// Outcome of a single successful send
#[derive(Debug, Clone)]
pub struct SendOutcome {
    /// HTTP status code returned by the endpoint
    pub status: u16,
    /// Parsed response body
    pub body: Value,
}

impl SendOutcome {
    /// Identifier of the created document, if the endpoint returned one
    pub fn document_id(&self) -> Option<&str> {
        self.body.get("value").and_then(|v| v.as_str())
    }
}

/// Capability to deliver one signed document to the marking API
#[async_trait]
pub trait DocumentSender: Send + Sync {
    /// Perform one network call for the given payload
    ///
    /// The payload is passed through unmodified; the sender owns
    /// serialization and transport. One invocation performs exactly one
    /// network call, no retries.
    async fn send(&self, payload: &SignedDocument) -> Result<SendOutcome>;
}

#[async_trait]
impl<T: DocumentSender + ?Sized> DocumentSender for std::sync::Arc<T> {
    async fn send(&self, payload: &SignedDocument) -> Result<SendOutcome> {
        (**self).send(payload).await
    }
}
