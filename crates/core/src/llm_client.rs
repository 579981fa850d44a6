use crate::{
    codec::{self, GenerationParams},
    prompt::Prompt,
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use std::{error::Error as _, time::Duration};
use tracing::{debug, warn};

/// The chat-completion endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Upper bound on a single request, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Any condition that prevents usable remote feedback from being obtained.
///
/// The `Display` text is the one-line summary shown to the user in front of
/// the fallback feedback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteFailure {
    /// Connection refused, timeout, TLS failure, or a body that could not be read.
    #[error("transport error: {0}")]
    Transport(String),
    /// Non-success status and nothing decodable in the body.
    #[error("service returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// Success status but no assistant content in the body.
    #[error("no assistant content found; status={status}")]
    Decode { status: u16 },
}

/// A client that turns a prompt into remote feedback text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackClient: Send + Sync {
    /// Makes exactly one request for feedback on `prompt`. Never retries.
    ///
    /// `credential` is assumed to be non-blank; the orchestrator checks this
    /// before calling.
    async fn call(&self, credential: &SecretString, prompt: &Prompt)
    -> Result<String, RemoteFailure>;
}

/// An implementation of `FeedbackClient` for any OpenAI-compatible chat-completion API.
pub struct OpenAiFeedbackClient {
    http: Client,
    endpoint: String,
    params: GenerationParams,
}

impl OpenAiFeedbackClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Full URL of the chat-completion endpoint.
    /// * `params` - Generation parameters sent with every request.
    /// * `timeout` - Upper bound for each request.
    pub fn new(
        endpoint: impl Into<String>,
        params: GenerationParams,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            params,
        })
    }
}

#[async_trait]
impl FeedbackClient for OpenAiFeedbackClient {
    async fn call(
        &self,
        credential: &SecretString,
        prompt: &Prompt,
    ) -> Result<String, RemoteFailure> {
        let request = codec::encode(prompt, &self.params, &self.endpoint, credential);
        debug!(
            endpoint = %request.endpoint,
            model = %self.params.model,
            body_len = request.body.len(),
            "Sending feedback request"
        );

        let response = self
            .http
            .post(request.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(request.credential.expose_secret())
            .body(request.body)
            .send()
            .await
            .map_err(|e| RemoteFailure::Transport(error_chain(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteFailure::Transport(error_chain(&e)))?;
        debug!(%status, body_len = body.len(), "Received feedback response");

        match codec::decode(&body) {
            Some(text) => {
                if !status.is_success() {
                    warn!(%status, "Using assistant content from a non-success response");
                }
                Ok(text)
            }
            None if !status.is_success() => Err(RemoteFailure::Status {
                status: status.as_u16(),
                message: error_message(&body),
            }),
            None => Err(RemoteFailure::Decode {
                status: status.as_u16(),
            }),
        }
    }
}

/// Pulls the service's own error message out of an error body, if it has one.
fn error_message(body: &str) -> String {
    codec::extract_string_field(body, "message")
        .map(codec::unescape)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| "no usable content".to_string())
}

/// Flattens an error and its sources into one line.
fn error_chain(err: &reqwest::Error) -> String {
    let mut summary = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !summary.contains(&text) {
            summary.push_str(": ");
            summary.push_str(&text);
        }
        source = cause.source();
    }
    summary
}
