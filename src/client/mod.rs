//! CRPT documents API transport
//!
//! Schema types for the introduce-goods document and the reqwest-backed
//! [`CrptClient`] that delivers signed documents to the creation endpoint.

mod client;
mod types;


pub use client::CrptClient;
pub use types::{Description, Document, Product, SignedDocument};
