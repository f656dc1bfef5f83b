//! crpt-submit - demo submitter for the CRPT documents API
//!
//! Loads a document (from a path argument or the embedded sample), builds
//! the client from the environment and pushes a batch of submissions
//! through a rate-limited gate.

use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{Level, error, info};

use crpt_api::{
    CrptClient, CrptConfig, CrptError, Document, RateLimit, RateLimitedGate, Result,
    SignedDocument,
};

const SAMPLE_DOCUMENT: &str = r#"{
  "description": {
    "participantInn": "string"
  },
  "doc_id": "string",
  "doc_status": "string",
  "doc_type": "LP_INTRODUCE_GOODS",
  "importRequest": true,
  "owner_inn": "string",
  "participant_inn": "string",
  "producer_inn": "string",
  "production_date": "2020-01-23",
  "production_type": "string",
  "products": [
    {
      "certificate_document": "string",
      "certificate_document_date": "2020-01-23",
      "certificate_document_number": "string",
      "owner_inn": "string",
      "producer_inn": "string",
      "production_date": "2020-01-23",
      "tnved_code": "string",
      "uit_code": "string",
      "uitu_code": "string"
    }
  ],
  "reg_date": "2020-01-23",
  "reg_number": "string"
}"#;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging system
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let document = load_document()?;

    let config = CrptConfig::from_env()?;
    let max_requests = env_or("CRPT_MAX_REQUESTS", 3u32)?;
    let window_secs = env_or("CRPT_WINDOW_SECS", 1u64)?;
    let batch_size = env_or("CRPT_BATCH_SIZE", 10u32)?;

    let client = CrptClient::new(config)?;
    let limit = RateLimit::new(max_requests, Duration::from_secs(window_secs));
    let gate = Arc::new(RateLimitedGate::new(limit, client)?);

    let signature = std::env::var("CRPT_SIGNATURE").unwrap_or_else(|_| "sample_signature".into());
    let payload = SignedDocument::new(document, signature);

    info!(batch_size, max_requests, window_secs, "submitting batch");

    let handles: Vec<_> = (0..batch_size)
        .map(|request| {
            let gate = Arc::clone(&gate);
            let payload = payload.clone();
            tokio::spawn(async move {
                match gate.submit(&payload).await {
                    Ok(outcome) => info!(
                        request,
                        status = outcome.status,
                        document_id = outcome.document_id(),
                        "submitted"
                    ),
                    Err(e) => error!(request, error = %e, "submission failed"),
                }
            })
        })
        .collect();

    for handle in handles {
        if let Err(e) = handle.await {
            error!(error = %e, "submission task failed");
        }
    }

    Ok(())
}

fn load_document() -> Result<Document> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| CrptError::config(format!("Failed to read '{}': {}", path, e)))?;
            Document::from_json(&json)
        }
        None => Document::from_json(SAMPLE_DOCUMENT),
    }
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| CrptError::config(format!("{} must be an integer", name))),
        Err(_) => Ok(default),
    }
}
