//! Advanced mode: free-form text/image queries forwarded to a remote
//! multimodal completion service.
//!
//! The calculator core never depends on this module; outcomes come back
//! as ordinary history records. Failures are mapped to user-facing
//! messages here and never crash the process.

mod client;
mod image;

pub use client::{CompletionClient, NO_INPUT_MESSAGE, NO_RESPONSE_MESSAGE};
pub use image::{ImagePayload, data_url_from_file, parse_data_url};

use std::thread;

use thiserror::Error;
use tracing::warn;

/// Shown when the worker itself is unreachable.
pub const CONNECTION_FAILED_MESSAGE: &str =
    "Failed to connect to the intelligent engine. Please check your network or API configuration.";

#[derive(Error, Debug)]
pub enum AdvancedError {
    #[error("API key not found")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read image file: {0}")]
    ImageRead(#[from] std::io::Error),
}

impl AdvancedError {
    /// User-facing message recorded in the history log.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingApiKey => {
                "Configuration Error: API Key is missing. Set GEMINI_API_KEY or add it to the config file."
                    .to_string()
            }
            Self::Http(_) | Self::ImageRead(_) => {
                "Error processing request. Please try again later.".to_string()
            }
        }
    }
}

/// A free-form query submitted from the advanced prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvancedRequest {
    pub text: String,
    /// Optional image as a data-URL.
    pub image: Option<String>,
}

impl AdvancedRequest {
    /// Label recorded as the history input.
    pub fn input_label(&self) -> String {
        if self.text.is_empty() {
            "[Image Input]".to_string()
        } else {
            self.text.clone()
        }
    }
}

/// A settled request, ready to append to the history log. Failures have
/// already been mapped to user-facing text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvancedOutcome {
    pub input: String,
    pub output: String,
}

/// Handle to the background worker that owns the remote calls.
///
/// One dedicated thread runs a current-thread runtime; requests and
/// outcomes travel over channels, so the UI thread never blocks.
pub struct AdvancedWorker {
    requests: flume::Sender<AdvancedRequest>,
    outcomes: flume::Receiver<AdvancedOutcome>,
}

impl AdvancedWorker {
    pub fn spawn(model: String, api_key: Option<String>) -> anyhow::Result<Self> {
        let (request_tx, request_rx) = flume::unbounded::<AdvancedRequest>();
        let (outcome_tx, outcome_rx) = flume::unbounded::<AdvancedOutcome>();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("advanced-worker".to_string())
            .spawn(move || {
                let client = CompletionClient::new(model, api_key);
                runtime.block_on(async move {
                    while let Ok(request) = request_rx.recv_async().await {
                        let input = request.input_label();
                        let output = match client
                            .generate(&request.text, request.image.as_deref())
                            .await
                        {
                            Ok(text) => text,
                            Err(err) => {
                                warn!(error = %err, "advanced request failed");
                                err.user_message()
                            }
                        };
                        if outcome_tx.send(AdvancedOutcome { input, output }).is_err() {
                            break;
                        }
                    }
                });
            })?;

        Ok(Self {
            requests: request_tx,
            outcomes: outcome_rx,
        })
    }

    /// Queue a request. Returns false when the worker has shut down.
    pub fn submit(&self, request: AdvancedRequest) -> bool {
        self.requests.send(request).is_ok()
    }

    /// Non-blocking poll for a settled request.
    pub fn try_recv(&self) -> Option<AdvancedOutcome> {
        self.outcomes.try_recv().ok()
    }
}
