//! # crpt-api
//!
//! Async client for the CRPT product marking API (Chestny ZNAK) with a
//! built-in rolling-window rate limiter.
//!
//! The crate guarantees that no more than a configured number of outbound
//! calls leave the process within any window of the configured duration,
//! no matter how many tasks submit documents concurrently. Callers that
//! arrive while the window is full suspend cooperatively until capacity
//! frees up.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use crpt_api::{CrptClient, CrptConfig, Document, RateLimit, RateLimitedGate, SignedDocument};
//!
//! #[tokio::main]
//! async fn main() -> crpt_api::Result<()> {
//!     let client = CrptClient::new(CrptConfig::from_env()?)?;
//!     let gate = RateLimitedGate::new(RateLimit::per_second(3), client)?;
//!
//!     let document = Document::from_json(r#"{"doc_id": "42"}"#)?;
//!     let payload = SignedDocument::new(document, "signature");
//!
//!     let outcome = gate.submit(&payload).await?;
//!     println!("created: {:?}", outcome.document_id());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`RateLimitedGate`] owns the capacity accounting: a single mutex
//!   guards the `{window start, count}` pair, held only for the O(1)
//!   admission decision and never across a wait or a network call.
//! - [`DocumentSender`] is the narrow seam between the gate and the
//!   transport; [`CrptClient`] is the reqwest-backed implementation that
//!   performs one POST per admitted submission.
//! - The gate performs no retries; retry policy belongs to the caller.

pub mod client;
pub mod config;
pub mod error;
pub mod limiter;
pub mod sender;

pub use client::{CrptClient, Description, Document, Product, SignedDocument};
pub use config::CrptConfig;
pub use error::{CrptError, Result};
pub use limiter::{RateLimit, RateLimitedGate};
pub use sender::{DocumentSender, SendOutcome};
