//! HTTP client for the Upstage API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use solar::constants::{context, endpoints, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_MS};
use solar::types::ApiErrorBody;
use solar::{
    normalize, ChatCompletionResponse, ChatRequestBody, DocumentParseRequest,
    DocumentParseResponse, EmbeddingRequestBody, EmbeddingResponse, ErrorCode,
    InformationExtractRequest, InformationExtractResponse, ModelListResponse, RawFailure,
    SolarApi, UpstageError,
};

use crate::proxy::proxy_url_from_env;

/// Client for the Upstage API.
///
/// Holds the bearer token, the base URL, and the per-call timeout. One
/// instance serves any number of sequential calls; the mutators affect only
/// calls issued after they run, never calls already in flight (each request
/// snapshots the timeout and URL when it is built).
pub struct UpstageClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl UpstageClient {
    /// Creates a client against the default base URL.
    ///
    /// The outbound transport is decorated with a proxy when one of
    /// `HTTPS_PROXY`, `https_proxy`, `HTTP_PROXY`, `http_proxy` is set
    /// (first non-empty wins).
    pub fn new(api_key: impl Into<String>) -> Result<Self, UpstageError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (e.g. a test server).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, UpstageError> {
        let mut builder = reqwest::Client::builder();
        if let Some(url) = proxy_url_from_env() {
            tracing::debug!(proxy = %url, "using outbound proxy");
            let proxy = reqwest::Proxy::all(&url).map_err(|e| {
                UpstageError::new(
                    ErrorCode::ApiRequestFailed,
                    format!("invalid proxy URL '{url}': {e}"),
                    "ClientConfiguration",
                )
            })?;
            builder = builder.proxy(proxy);
        }
        let http = builder.build().map_err(|e| {
            UpstageError::new(
                ErrorCode::ApiRequestFailed,
                format!("failed to build HTTP client: {e}"),
                "ClientConfiguration",
            )
        })?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            http,
        })
    }

    /// Sets the per-call timeout for subsequent requests.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Sets the base URL for subsequent requests.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    /// Returns the current base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        context: &'static str,
    ) -> Result<T, UpstageError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(body);
        self.dispatch(request, context).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &'static str,
    ) -> Result<T, UpstageError> {
        let request = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout);
        self.dispatch(request, context).await
    }

    /// Sends one request and decodes the response, routing every failure
    /// (connect error, non-2xx status, undecodable body) through the error
    /// normaliser.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &'static str,
    ) -> Result<T, UpstageError> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let failure = RawFailure::ApiReported {
                    message: e.to_string(),
                    code: None,
                    status_code: e.status().map(|s| s.as_u16()),
                };
                return Err(normalize(failure, context));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let failure = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(parsed) => RawFailure::ApiReported {
                    message: parsed.error.message,
                    code: parsed.error.code,
                    status_code: Some(status.as_u16()),
                },
                Err(_) => RawFailure::ApiReported {
                    message: error_snippet(&body, status.as_u16()),
                    code: None,
                    status_code: Some(status.as_u16()),
                },
            };
            return Err(normalize(failure, context));
        }

        match response.json::<T>().await {
            Ok(decoded) => Ok(decoded),
            Err(e) => {
                let failure = RawFailure::ApiReported {
                    message: format!("failed to decode response body: {e}"),
                    code: None,
                    status_code: Some(status.as_u16()),
                };
                Err(normalize(failure, context))
            }
        }
    }
}

/// Builds a message from a non-JSON error body, capped so a large HTML error
/// page cannot flood logs or failure records.
fn error_snippet(body: &str, status: u16) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("request failed with status {status}");
    }
    let snippet: String = trimmed.chars().take(200).collect();
    format!("request failed with status {status}: {snippet}")
}

#[async_trait]
impl SolarApi for UpstageClient {
    async fn chat_completions(
        &self,
        body: &ChatRequestBody,
    ) -> Result<ChatCompletionResponse, UpstageError> {
        self.post_json(endpoints::CHAT_COMPLETIONS, body, context::CHAT_COMPLETIONS)
            .await
    }

    async fn stream_chat_completions(
        &self,
        _body: &ChatRequestBody,
    ) -> Result<(), UpstageError> {
        Err(UpstageError::new(
            ErrorCode::ApiRequestFailed,
            "streaming chat completions is not yet implemented",
            context::STREAM_CHAT_COMPLETIONS,
        ))
    }

    async fn embeddings(
        &self,
        body: &EmbeddingRequestBody,
    ) -> Result<EmbeddingResponse, UpstageError> {
        self.post_json(endpoints::EMBEDDINGS, body, context::EMBEDDINGS)
            .await
    }

    async fn models(&self) -> Result<ModelListResponse, UpstageError> {
        self.get_json(endpoints::MODELS, context::GET_MODELS).await
    }

    async fn document_parse(
        &self,
        body: &DocumentParseRequest,
    ) -> Result<DocumentParseResponse, UpstageError> {
        self.post_json(endpoints::DOCUMENT_PARSING, body, context::DOCUMENT_PARSING)
            .await
    }

    async fn information_extract(
        &self,
        body: &InformationExtractRequest,
    ) -> Result<InformationExtractResponse, UpstageError> {
        self.post_json(
            endpoints::INFORMATION_EXTRACTION,
            body,
            context::INFORMATION_EXTRACTION,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solar::{ChatOptions, Message, ModelId, Role};

    fn chat_body() -> ChatRequestBody {
        solar::build_chat_request(
            ModelId::new("solar-mini").unwrap(),
            vec![Message::new(Role::User, "hi").unwrap()],
            &ChatOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn default_base_url_points_at_upstage() {
        let client = UpstageClient::new("test-key").unwrap();
        assert_eq!(client.base_url(), "https://api.upstage.ai/v1");
    }

    #[test]
    fn base_url_mutator_affects_subsequent_calls() {
        let mut client = UpstageClient::new("test-key").unwrap();
        client.set_base_url("http://localhost:8080/v1");
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
        assert_eq!(
            client.url(endpoints::CHAT_COMPLETIONS),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn streaming_always_fails_with_the_fixed_error() {
        let client = UpstageClient::new("test-key").unwrap();
        let err = client.stream_chat_completions(&chat_body()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ApiRequestFailed);
        assert_eq!(err.context, "StreamChatCompletions");
        assert_eq!(err.message, "streaming chat completions is not yet implemented");
        assert_eq!(err.status_code, None);
    }

    #[test]
    fn error_snippet_caps_large_bodies() {
        let body = "x".repeat(1000);
        let snippet = error_snippet(&body, 502);
        assert!(snippet.len() < 300);
        assert!(snippet.starts_with("request failed with status 502"));
    }

    #[test]
    fn error_snippet_handles_empty_bodies() {
        assert_eq!(error_snippet("  ", 500), "request failed with status 500");
    }
}
