use futures_util::Stream;
use reqwest::Client;
use serde::Serialize;
use std::pin::Pin;
use std::time::Duration;

use super::error::TranslateError;
use super::format::Format;
use super::model::Model;
use super::prompt::build_prompt;
use super::transcoder::{TranslationFragment, transcode};

/// Endpoint used when neither the CLI nor the config file names one.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

/// Ordered fragments of one translation, ending in at most one error.
pub type FragmentStream =
    Pin<Box<dyn Stream<Item = Result<TranslationFragment, TranslateError>> + Send>>;

/// A validated translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_language: String,
    pub target_language: String,
    pub source_text: String,
    pub model: Model,
    pub format: Format,
}

impl TranslationRequest {
    /// Builds the instruction text for this request. Only `format` picks the template.
    pub fn prompt(&self) -> String {
        build_prompt(
            &self.source_language,
            &self.target_language,
            &self.source_text,
            self.format,
        )
    }
}

/// Unvalidated scalar inputs as supplied by a caller.
#[derive(Debug, Clone, Default)]
pub struct TranslateInput {
    pub source_language: String,
    pub target_language: String,
    pub source_text: String,
    pub model: String,
    pub format: String,
    /// Caller-supplied credential; an empty key falls back to the process-wide one.
    pub api_key: Option<String>,
}

impl TryFrom<&TranslateInput> for TranslationRequest {
    type Error = TranslateError;

    fn try_from(input: &TranslateInput) -> Result<Self, Self::Error> {
        Ok(Self {
            source_language: input.source_language.clone(),
            target_language: input.target_language.clone(),
            source_text: input.source_text.clone(),
            model: input.model.parse()?,
            format: input.format.parse()?,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

/// Issues streaming completion requests and exposes their fragment streams.
pub struct Translator {
    client: Client,
    endpoint: String,
    fallback_api_key: Option<String>,
    idle_timeout: Option<Duration>,
}

impl Translator {
    /// Creates a translator. `fallback_api_key` is used for every call that
    /// does not bring its own credential.
    pub fn new(endpoint: impl Into<String>, fallback_api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            fallback_api_key: fallback_api_key.filter(|key| !key.is_empty()),
            idle_timeout: None,
        }
    }

    /// Fails a stream with [`TranslateError::Timeout`] when no chunk arrives
    /// within `timeout`.
    #[must_use]
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }

    /// Awaits `future`, failing with [`TranslateError::Timeout`] when an idle
    /// timeout is set and it does not resolve in time.
    async fn within_idle_timeout<F: Future>(
        &self,
        future: F,
    ) -> Result<F::Output, TranslateError> {
        match self.idle_timeout {
            Some(limit) => tokio::time::timeout(limit, future)
                .await
                .map_err(|_| TranslateError::Timeout(limit)),
            None => Ok(future.await),
        }
    }

    fn resolve_api_key<'a>(&'a self, api_key: Option<&'a str>) -> Option<&'a str> {
        api_key
            .filter(|key| !key.is_empty())
            .or(self.fallback_api_key.as_deref())
    }

    /// Validates caller input and starts a translation.
    ///
    /// Unsupported formats and models are rejected before any network call.
    pub async fn submit(&self, input: &TranslateInput) -> Result<FragmentStream, TranslateError> {
        let request = TranslationRequest::try_from(input)?;
        self.translate(&request, input.api_key.as_deref()).await
    }

    /// Starts a streaming translation.
    ///
    /// Returns once the response headers arrive. A non-success status fails
    /// here with [`TranslateError::Upstream`] and no stream is created; an
    /// error body that is not UTF-8 is replaced by the status line. The idle
    /// timeout also bounds the wait for headers and for the error body.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
        api_key: Option<&str>,
    ) -> Result<FragmentStream, TranslateError> {
        let url = self.completions_url();
        let prompt = request.prompt();

        tracing::debug!(
            model = %request.model,
            format = %request.format,
            prompt_len = prompt.len(),
            "starting translation"
        );

        let chat_request = ChatCompletionRequest {
            model: request.model.id(),
            messages: vec![Message {
                role: "system",
                content: prompt,
            }],
            temperature: 0.0,
            stream: true,
        };

        let mut http_request = self.client.post(&url).json(&chat_request);

        if let Some(api_key) = self.resolve_api_key(api_key) {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = self
            .within_idle_timeout(http_request.send())
            .await?
            .map_err(|e| TranslateError::Transport(format!("failed to connect to {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = self
                .within_idle_timeout(response.bytes())
                .await?
                .ok()
                .and_then(|bytes| String::from_utf8(bytes.to_vec()).ok())
                .unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            };
            tracing::warn!(%status, "API request failed");
            return Err(TranslateError::Upstream(message));
        }

        Ok(Box::pin(transcode(
            response.bytes_stream(),
            self.idle_timeout,
        )))
    }
}
