//! Shared value types for the Upstage adapter domain.
//!
//! All types here are transient, per-call value objects: built for one
//! request, consumed once, and never persisted. Wire shapes follow the
//! Upstage API exactly; optional members are omitted from serialised bodies
//! rather than sent as `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifiers::ModelId;

// ---------------------------------------------------------------------------
// Enumerated option domains
// ---------------------------------------------------------------------------

/// The author of a chat message. Closed set; anything else is rejected with
/// `invalid_message_role` during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Parses a host-supplied role string, returning `None` when the value is
    /// outside the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "system" => Some(Self::System),
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }

    /// Returns the wire form of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------

/// Reasoning effort level. Only applicable to reasoning-capable models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    /// Disable reasoning for faster responses.
    Low,
    /// Enable reasoning for complex tasks (may increase token usage).
    High,
}

// ---------------------------------------------------------------------------

/// Requested shape of model output, as selected by the host.
///
/// This is the *option* form. The builder converts it into the structured
/// [`ResponseFormatSpec`] wire object; the raw string form never reaches the
/// payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Standard text response (the default; omitted from the payload).
    Text,
    /// Unconstrained JSON output (requires "JSON" in the prompt).
    JsonObject,
    /// JSON output validated against a caller-supplied schema.
    JsonSchema,
}

/// The structured `response_format` member of a chat payload.
///
/// `text` has no wire form: when the host selects it (or selects nothing) the
/// member is absent entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormatSpec {
    /// Serialises as `{"type": "json_object"}`.
    JsonObject,
    /// Serialises as `{"type": "json_schema", "json_schema": {...}}` with the
    /// parsed schema inlined.
    JsonSchema { json_schema: serde_json::Value },
}

// ---------------------------------------------------------------------------
// Chat request types
// ---------------------------------------------------------------------------

/// A chat message as supplied by the host, prior to validation.
///
/// The role arrives as a free-form string; [`crate::validation`] converts it
/// into a typed [`Message`] or rejects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageParam {
    pub role: String,
    pub content: String,
}

/// A validated chat message. Content is guaranteed non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Creates a message, returning `None` if `content` is empty or
    /// whitespace-only.
    pub fn new(role: Role, content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { role, content })
        }
    }
}

// ---------------------------------------------------------------------------

/// Optional tuning parameters for a chat completion, as supplied by the host.
///
/// All fields default to absent; absent fields are never serialised into the
/// request payload. Bounds are enforced by
/// [`crate::validation::validate_chat_options`]:
///
/// - `temperature` ∈ [0, 2]
/// - `top_p` ∈ [0, 1]
/// - `frequency_penalty` / `presence_penalty` ∈ [-2, 2]
/// - `max_tokens` ∈ [1, 4000]
///
/// `json_schema` carries the raw schema text; it is required (and parsed)
/// only when `response_format` is [`ResponseFormat::JsonSchema`] and never
/// appears on the built payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatOptions {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f64>,
    /// Streaming is declared but not supported downstream; see
    /// `SolarApi::stream_chat_completions`.
    pub stream: Option<bool>,
    pub reasoning_effort: Option<ReasoningEffort>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
    pub response_format: Option<ResponseFormat>,
    pub json_schema: Option<String>,
}

// ---------------------------------------------------------------------------

/// The fully assembled chat payload. Built once per call by
/// [`crate::request::build_chat_request`], consumed exactly once by the
/// transport, then discarded.
///
/// Note there is no raw `json_schema` member: once built, the schema lives
/// only inside [`ResponseFormatSpec::JsonSchema`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequestBody {
    pub model: ModelId,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormatSpec>,
}

// ---------------------------------------------------------------------------
// Chat response types
// ---------------------------------------------------------------------------

/// Number of tokens consumed in an API call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenCount(u64);

impl TokenCount {
    /// Creates a [`TokenCount`] from a raw integer.
    pub fn new(count: u64) -> Self {
        Self(count)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TokenCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add for TokenCount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

// ---------------------------------------------------------------------------

/// Token usage accounting attached to a chat completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: TokenCount,
    pub completion_tokens: TokenCount,
    pub total_tokens: TokenCount,
}

/// The assistant message inside a choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    pub role: String,
    /// Absent for some finish reasons; the mapper substitutes an empty string.
    #[serde(default)]
    pub content: Option<String>,
}

/// One completion alternative returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The upstream chat completion success shape. Read-only once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    #[serde(default)]
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

// ---------------------------------------------------------------------------
// Embedding types
// ---------------------------------------------------------------------------

/// Input to the embeddings endpoint: a single text or a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Single(String),
    Batch(Vec<String>),
}

/// The assembled embeddings payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddingRequestBody {
    pub model: ModelId,
    pub input: EmbeddingInput,
}

/// One embedding vector in an [`EmbeddingResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingData {
    pub embedding: Vec<f32>,
    pub index: u32,
    #[serde(default)]
    pub object: String,
}

/// Token usage accounting for an embeddings call (no completion tokens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    pub prompt_tokens: TokenCount,
    pub total_tokens: TokenCount,
}

/// The upstream embeddings success shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub data: Vec<EmbeddingData>,
    pub model: String,
    #[serde(default)]
    pub object: String,
    pub usage: EmbeddingUsage,
}

// ---------------------------------------------------------------------------
// Model listing
// ---------------------------------------------------------------------------

/// Metadata for one available model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,
}

/// Response of the model-listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelListResponse {
    #[serde(default)]
    pub data: Vec<ModelInfo>,
}

// ---------------------------------------------------------------------------
// Document parsing
// ---------------------------------------------------------------------------

/// Output format for document parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Text,
    Markdown,
    Html,
}

/// Feature switches for a parse call. Wire names are camelCase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentParseOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_tables: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_images: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Payload for the document parsing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentParseRequest {
    /// Document content or reference, as supplied by the host.
    pub document: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<DocumentFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<DocumentParseOptions>,
}

/// Parsed document content plus any extracted artefacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentParseResponse {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Information extraction
// ---------------------------------------------------------------------------

/// Tuning knobs for an extraction call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InformationExtractOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Payload for the information extraction endpoint. The schema may be
/// structured JSON or a raw string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationExtractRequest {
    pub text: String,
    pub schema: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<InformationExtractOptions>,
}

/// Structured extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationExtractResponse {
    pub extracted_data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_scores: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Upstream error body
// ---------------------------------------------------------------------------

/// The error envelope the API returns on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

/// The inner error object of an [`ApiErrorBody`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly. Recorded on per-item failure records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_the_closed_set_only() {
        assert_eq!(Role::parse("system"), Some(Role::System));
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("assistant"), Some(Role::Assistant));
        assert_eq!(Role::parse("tool"), None);
        assert_eq!(Role::parse("User"), None);
    }

    #[test]
    fn message_rejects_whitespace_content() {
        assert!(Message::new(Role::User, "   ").is_none());
        assert!(Message::new(Role::User, "hi").is_some());
    }

    #[test]
    fn response_format_spec_wire_shapes() {
        let json_object = serde_json::to_value(ResponseFormatSpec::JsonObject).unwrap();
        assert_eq!(json_object, serde_json::json!({"type": "json_object"}));

        let schema = serde_json::json!({"type": "object"});
        let json_schema =
            serde_json::to_value(ResponseFormatSpec::JsonSchema { json_schema: schema.clone() })
                .unwrap();
        assert_eq!(
            json_schema,
            serde_json::json!({"type": "json_schema", "json_schema": {"type": "object"}})
        );
    }

    #[test]
    fn embedding_input_accepts_single_and_batch() {
        let single: EmbeddingInput = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(single, EmbeddingInput::Single("hello".into()));

        let batch: EmbeddingInput = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert_eq!(batch, EmbeddingInput::Batch(vec!["a".into(), "b".into()]));
    }
}
