//! LLM client: the single point of entry for all AI gateway calls.
//!
//! No other module talks to the generation backend directly; handlers depend on
//! the `TextGenerator` trait so tests can swap in a fake.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::{BoxStream, Stream, StreamExt};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const MAX_RETRIES: u32 = 3;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Upper bound for a whole streamed completion.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited by the AI gateway")]
    RateLimited,

    #[error("AI gateway credits exhausted")]
    QuotaExhausted,

    #[error("AI gateway API key is not configured")]
    NotConfigured,
}

/// System/user prompt pair sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Raw server-sent-event bytes from the backend.
pub type TokenStream = BoxStream<'static, Result<Bytes, LlmError>>;

/// An opaque streaming text generator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn stream_completion(&self, prompts: &PromptPair) -> Result<TokenStream, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// OpenAI-compatible chat-completions client for the AI gateway.
#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
}

impl GatewayClient {
    pub fn new(url: String, api_key: Option<String>, model: String) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GatewayClient {
    /// Opens a streamed completion.
    /// 429 and 402 are returned immediately; 5xx and transport errors are retried
    /// with exponential backoff before any byte is relayed.
    async fn stream_completion(&self, prompts: &PromptPair) -> Result<TokenStream, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompts.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompts.user,
                },
            ],
            stream: true,
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "AI gateway attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.url)
                .bearer_auth(api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            match status {
                StatusCode::TOO_MANY_REQUESTS => return Err(LlmError::RateLimited),
                StatusCode::PAYMENT_REQUIRED => return Err(LlmError::QuotaExhausted),
                _ => {}
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                warn!("AI gateway returned {}: {}", status, body);
                let error = LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                };
                if status.is_server_error() {
                    last_error = Some(error);
                    continue;
                }
                return Err(error);
            }

            debug!(model = %self.model, "AI gateway stream opened");
            return Ok(response.bytes_stream().map(|r| r.map_err(LlmError::Http)).boxed());
        }

        Err(last_error.unwrap_or(LlmError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
            message: format!("no response after {MAX_RETRIES} attempts"),
        }))
    }
}

/// Re-chunks a byte stream into whole `\n`-terminated lines.
///
/// At most one partial line is buffered; an unterminated tail is flushed when the
/// upstream ends. Dropping the relay drops the upstream.
pub struct LineRelay<S> {
    inner: S,
    buffer: BytesMut,
    finished: bool,
}

pub fn relay_lines<S>(inner: S) -> LineRelay<S>
where
    S: Stream<Item = Result<Bytes, LlmError>> + Unpin,
{
    LineRelay {
        inner,
        buffer: BytesMut::new(),
        finished: false,
    }
}

impl<S> LineRelay<S> {
    fn take_line(&mut self) -> Option<Bytes> {
        let newline = self.buffer.iter().position(|&b| b == b'\n')?;
        Some(self.buffer.split_to(newline + 1).freeze())
    }
}

impl<S> Stream for LineRelay<S>
where
    S: Stream<Item = Result<Bytes, LlmError>> + Unpin,
{
    type Item = Result<Bytes, LlmError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(line) = this.take_line() {
                return Poll::Ready(Some(Ok(line)));
            }

            if this.finished {
                if this.buffer.is_empty() {
                    return Poll::Ready(None);
                }
                let rest = this.buffer.split().freeze();
                return Poll::Ready(Some(Ok(rest)));
            }

            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => this.buffer.extend_from_slice(&chunk),
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => this.finished = true,
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
