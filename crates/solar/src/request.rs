//! Request payload assembly.
//!
//! Builders take validated inputs and produce the exact wire shape, applying
//! the response-format transformation and dropping fields that are not valid
//! for the chosen variant. Building is deterministic: the same inputs always
//! produce the same payload.

use crate::constants::{context, defaults, SUPPORTED_EMBEDDING_MODELS};
use crate::errors::{ErrorCode, UpstageError};
use crate::identifiers::ModelId;
use crate::types::{
    ChatOptions, ChatRequestBody, EmbeddingInput, EmbeddingRequestBody, Message, ResponseFormat,
    ResponseFormatSpec,
};
use crate::validation::{validate_embedding_input, validate_model_support};

/// Assembles a chat completion payload from a model, validated messages, and
/// an options bag.
///
/// Option fields are flattened onto the top level. The `response_format`
/// option is converted into its structured wire object:
///
/// - absent or `text` → no `response_format` member
/// - `json_object` → `{"type": "json_object"}`
/// - `json_schema` → the schema text is parsed (failing with
///   `invalid_json_schema`) and inlined as
///   `{"type": "json_schema", "json_schema": ...}`
///
/// The raw schema text never appears on the built payload in any branch.
pub fn build_chat_request(
    model: ModelId,
    messages: Vec<Message>,
    options: &ChatOptions,
) -> Result<ChatRequestBody, UpstageError> {
    let response_format = match options.response_format {
        None | Some(ResponseFormat::Text) => None,
        Some(ResponseFormat::JsonObject) => Some(ResponseFormatSpec::JsonObject),
        Some(ResponseFormat::JsonSchema) => {
            let raw = options.json_schema.as_deref().ok_or_else(|| {
                UpstageError::new(
                    ErrorCode::MissingRequiredField,
                    "json_schema is required when response_format is json_schema",
                    context::CHAT_COMPLETIONS,
                )
            })?;
            let json_schema = serde_json::from_str(raw).map_err(|_| {
                UpstageError::new(
                    ErrorCode::InvalidJsonSchema,
                    "invalid JSON schema provided",
                    context::CHAT_COMPLETIONS,
                )
            })?;
            Some(ResponseFormatSpec::JsonSchema { json_schema })
        }
    };

    Ok(ChatRequestBody {
        model,
        messages,
        temperature: options.temperature,
        max_tokens: options.max_tokens,
        top_p: options.top_p,
        stream: options.stream,
        reasoning_effort: options.reasoning_effort,
        frequency_penalty: options.frequency_penalty,
        presence_penalty: options.presence_penalty,
        response_format,
    })
}

/// Assembles an embeddings payload, applying the input validations and the
/// default embedding model when none is given.
///
/// The model here is a free-form string, so it is checked against the
/// supported embedding set (`model_not_supported` on mismatch).
pub fn build_embedding_request(
    model: Option<&str>,
    input: EmbeddingInput,
) -> Result<EmbeddingRequestBody, UpstageError> {
    validate_embedding_input(&input, context::EMBEDDINGS)?;

    let model = model.unwrap_or(defaults::EMBEDDING_MODEL);
    validate_model_support(model, &SUPPORTED_EMBEDDING_MODELS, context::EMBEDDINGS)?;
    let model = ModelId::new(model).ok_or_else(|| {
        UpstageError::new(
            ErrorCode::MissingRequiredField,
            "model is required",
            context::EMBEDDINGS,
        )
    })?;

    Ok(EmbeddingRequestBody { model, input })
}
