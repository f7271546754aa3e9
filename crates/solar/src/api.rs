//! The transport port.
//!
//! [`SolarApi`] is the interface the orchestration layer drives and the
//! `upstage` infrastructure crate implements. Keeping the port here lets the
//! per-item loop be tested against an in-memory double with no HTTP stack
//! present.

use async_trait::async_trait;

use crate::errors::UpstageError;
use crate::types::{
    ChatCompletionResponse, ChatRequestBody, DocumentParseRequest, DocumentParseResponse,
    EmbeddingRequestBody, EmbeddingResponse, InformationExtractRequest,
    InformationExtractResponse, ModelListResponse,
};

/// One method per Upstage endpoint. Every method performs (at most) a single
/// HTTP exchange and resolves to either the decoded success shape or a
/// canonical [`UpstageError`]; no other error type crosses this boundary.
#[async_trait]
pub trait SolarApi: Send + Sync {
    /// POST `/chat/completions`.
    async fn chat_completions(
        &self,
        body: &ChatRequestBody,
    ) -> Result<ChatCompletionResponse, UpstageError>;

    /// Streaming chat completions. Declared but intentionally unimplemented:
    /// every invocation fails with a fixed "not yet implemented" error. The
    /// signature will grow a chunk stream once upstream support lands.
    async fn stream_chat_completions(&self, body: &ChatRequestBody)
        -> Result<(), UpstageError>;

    /// POST `/embeddings`.
    async fn embeddings(
        &self,
        body: &EmbeddingRequestBody,
    ) -> Result<EmbeddingResponse, UpstageError>;

    /// GET `/models`.
    async fn models(&self) -> Result<ModelListResponse, UpstageError>;

    /// POST `/parse`.
    async fn document_parse(
        &self,
        body: &DocumentParseRequest,
    ) -> Result<DocumentParseResponse, UpstageError>;

    /// POST `/extract`.
    async fn information_extract(
        &self,
        body: &InformationExtractRequest,
    ) -> Result<InformationExtractResponse, UpstageError>;
}
