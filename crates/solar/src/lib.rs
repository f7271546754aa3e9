//! Core adapter domain for the Upstage Solar API.
//!
//! This crate contains every domain concept used by the Solarflow workflow
//! node: enumerated option domains, request/response value types, the pure
//! validation layer, the request builder, the response mapper, and the
//! canonical error taxonomy. Infrastructure crates implement the [`SolarApi`]
//! port defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is sent and received; the `upstage` crate defines *how*
//! the HTTP transport supplies it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ModelId`, `RunId`) |
//! | [`types`] | Request/response value types and enumerated domains |
//! | [`constants`] | Endpoint paths, supported models, defaults, bounds |
//! | [`errors`] | Canonical error type, error codes, error normalisation |
//! | [`validation`] | Pure pre-flight checks (no network I/O) |
//! | [`request`] | Payload assembly from validated inputs |
//! | [`response`] | Shaping of successful responses into node records |
//! | [`api`] | The [`SolarApi`] port trait |

pub mod api;
pub mod constants;
pub mod errors;
pub mod identifiers;
pub mod request;
pub mod response;
pub mod types;
pub mod validation;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use api::SolarApi;
pub use errors::{normalize, ErrorCode, ErrorRecord, RawFailure, UpstageError};
pub use identifiers::{ModelId, RunId};
pub use request::{build_chat_request, build_embedding_request};
pub use response::{map_chat_response, ChatOutput};
pub use types::{
    ChatChoice, ChatCompletionResponse, ChatOptions, ChatRequestBody, ChoiceMessage,
    DocumentParseRequest, DocumentParseResponse, EmbeddingInput, EmbeddingRequestBody,
    EmbeddingResponse, InformationExtractRequest, InformationExtractResponse, Message,
    MessageParam, ModelInfo, ModelListResponse, ReasoningEffort, ResponseFormat,
    ResponseFormatSpec, Role, Timestamp, TokenCount, Usage,
};
pub use validation::{
    validate_chat_messages, validate_chat_options, validate_embedding_input,
    validate_model_support,
};
