//! Pure pre-flight validation.
//!
//! Every check here runs before any network I/O and fails with a specific
//! [`ErrorCode`]. No side effects; each function is a pure function of its
//! inputs.

use crate::constants::bounds;
use crate::errors::{ErrorCode, UpstageError};
use crate::types::{ChatOptions, EmbeddingInput, Message, MessageParam, ResponseFormat, Role};

/// Validates host-supplied chat messages and converts them into typed
/// [`Message`] values.
///
/// - Empty list → `missing_required_field`
/// - Empty/whitespace-only content → `empty_string`
/// - Role outside {system, user, assistant} → `invalid_message_role`
pub fn validate_chat_messages(
    messages: &[MessageParam],
    context: &str,
) -> Result<Vec<Message>, UpstageError> {
    if messages.is_empty() {
        return Err(UpstageError::new(
            ErrorCode::MissingRequiredField,
            "at least one message is required for chat completion",
            context,
        ));
    }

    messages
        .iter()
        .map(|param| {
            let role = Role::parse(&param.role).ok_or_else(|| {
                UpstageError::new(
                    ErrorCode::InvalidMessageRole,
                    format!(
                        "invalid message role: '{}'. Must be one of: system, user, assistant",
                        param.role
                    ),
                    context,
                )
            })?;
            Message::new(role, param.content.clone()).ok_or_else(|| {
                UpstageError::new(
                    ErrorCode::EmptyString,
                    "all messages must have non-empty content",
                    context,
                )
            })
        })
        .collect()
}

/// Validates the numeric bounds and response-format prerequisites of a
/// [`ChatOptions`] bag.
///
/// Out-of-range numerics fail with `value_out_of_range`. When
/// `response_format` is `json_schema`, the schema text must be present
/// (`missing_required_field`) and parse as JSON (`invalid_json_schema`).
pub fn validate_chat_options(options: &ChatOptions, context: &str) -> Result<(), UpstageError> {
    check_range(
        options.temperature,
        bounds::TEMPERATURE_MIN,
        bounds::TEMPERATURE_MAX,
        "temperature",
        context,
    )?;
    check_range(options.top_p, bounds::TOP_P_MIN, bounds::TOP_P_MAX, "top_p", context)?;
    check_range(
        options.frequency_penalty,
        bounds::PENALTY_MIN,
        bounds::PENALTY_MAX,
        "frequency_penalty",
        context,
    )?;
    check_range(
        options.presence_penalty,
        bounds::PENALTY_MIN,
        bounds::PENALTY_MAX,
        "presence_penalty",
        context,
    )?;

    if let Some(max_tokens) = options.max_tokens {
        if !(bounds::MAX_TOKENS_MIN..=bounds::MAX_TOKENS_MAX).contains(&max_tokens) {
            return Err(UpstageError::new(
                ErrorCode::ValueOutOfRange,
                format!(
                    "max_tokens must be between {} and {}, got {max_tokens}",
                    bounds::MAX_TOKENS_MIN,
                    bounds::MAX_TOKENS_MAX
                ),
                context,
            ));
        }
    }

    if options.response_format == Some(ResponseFormat::JsonSchema) {
        let raw = options.json_schema.as_deref().unwrap_or("");
        if raw.trim().is_empty() {
            return Err(UpstageError::new(
                ErrorCode::MissingRequiredField,
                "json_schema is required when response_format is json_schema",
                context,
            ));
        }
        if serde_json::from_str::<serde_json::Value>(raw).is_err() {
            return Err(UpstageError::new(
                ErrorCode::InvalidJsonSchema,
                "invalid JSON schema provided",
                context,
            ));
        }
    }

    Ok(())
}

/// Checks a free-form model string against a supported set.
///
/// Not invoked on the primary chat path (the host constrains that model via
/// an enumerated selector); used wherever callers supply an arbitrary string,
/// e.g. the embeddings path.
pub fn validate_model_support(
    model: &str,
    supported: &[&str],
    context: &str,
) -> Result<(), UpstageError> {
    if supported.contains(&model) {
        Ok(())
    } else {
        Err(UpstageError::new(
            ErrorCode::ModelNotSupported,
            format!(
                "model '{model}' is not supported. Supported models: {}",
                supported.join(", ")
            ),
            context,
        ))
    }
}

/// Validates an embeddings input: a batch must be non-empty (`empty_array`)
/// and every text non-blank (`empty_string`).
pub fn validate_embedding_input(
    input: &EmbeddingInput,
    context: &str,
) -> Result<(), UpstageError> {
    match input {
        EmbeddingInput::Single(text) => check_non_blank(text, context),
        EmbeddingInput::Batch(texts) => {
            if texts.is_empty() {
                return Err(UpstageError::new(
                    ErrorCode::EmptyArray,
                    "embedding input must contain at least one text",
                    context,
                ));
            }
            texts.iter().try_for_each(|text| check_non_blank(text, context))
        }
    }
}

fn check_non_blank(text: &str, context: &str) -> Result<(), UpstageError> {
    if text.trim().is_empty() {
        Err(UpstageError::new(
            ErrorCode::EmptyString,
            "embedding input texts must be non-empty",
            context,
        ))
    } else {
        Ok(())
    }
}

fn check_range(
    value: Option<f64>,
    min: f64,
    max: f64,
    field: &str,
    context: &str,
) -> Result<(), UpstageError> {
    match value {
        Some(v) if !v.is_finite() || v < min || v > max => Err(UpstageError::new(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be between {min} and {max}, got {v}"),
            context,
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{context, SUPPORTED_EMBEDDING_MODELS};

    fn param(role: &str, content: &str) -> MessageParam {
        MessageParam {
            role: role.into(),
            content: content.into(),
        }
    }

    #[test]
    fn empty_message_list_is_a_missing_required_field() {
        let err = validate_chat_messages(&[], context::CHAT_COMPLETIONS).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert_eq!(err.context, "ChatCompletions");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = validate_chat_messages(&[param("tool", "hi")], context::CHAT_COMPLETIONS)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMessageRole);
    }

    #[test]
    fn whitespace_only_content_is_rejected() {
        let err = validate_chat_messages(
            &[param("user", "hi"), param("assistant", "  \t")],
            context::CHAT_COMPLETIONS,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyString);
    }

    #[test]
    fn valid_messages_become_typed() {
        let messages = validate_chat_messages(
            &[param("system", "be brief"), param("user", "hi")],
            context::CHAT_COMPLETIONS,
        )
        .unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].content, "hi");
    }

    #[test]
    fn out_of_range_options_are_rejected() {
        let cases = [
            ChatOptions { temperature: Some(2.5), ..Default::default() },
            ChatOptions { temperature: Some(-0.1), ..Default::default() },
            ChatOptions { top_p: Some(1.01), ..Default::default() },
            ChatOptions { frequency_penalty: Some(-2.5), ..Default::default() },
            ChatOptions { presence_penalty: Some(3.0), ..Default::default() },
            ChatOptions { max_tokens: Some(0), ..Default::default() },
            ChatOptions { max_tokens: Some(4001), ..Default::default() },
            ChatOptions { temperature: Some(f64::NAN), ..Default::default() },
        ];
        for options in cases {
            let err = validate_chat_options(&options, context::CHAT_COMPLETIONS).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValueOutOfRange, "options: {options:?}");
        }
    }

    #[test]
    fn in_range_options_pass() {
        let options = ChatOptions {
            temperature: Some(0.7),
            max_tokens: Some(1000),
            top_p: Some(0.9),
            frequency_penalty: Some(-2.0),
            presence_penalty: Some(2.0),
            ..Default::default()
        };
        assert!(validate_chat_options(&options, context::CHAT_COMPLETIONS).is_ok());
    }

    #[test]
    fn json_schema_format_requires_a_schema() {
        let options = ChatOptions {
            response_format: Some(ResponseFormat::JsonSchema),
            ..Default::default()
        };
        let err = validate_chat_options(&options, context::CHAT_COMPLETIONS).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
    }

    #[test]
    fn malformed_schema_text_is_rejected() {
        let options = ChatOptions {
            response_format: Some(ResponseFormat::JsonSchema),
            json_schema: Some("{bad".into()),
            ..Default::default()
        };
        let err = validate_chat_options(&options, context::CHAT_COMPLETIONS).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidJsonSchema);
    }

    #[test]
    fn model_support_check_is_reusable() {
        assert!(validate_model_support(
            "embedding-query",
            &SUPPORTED_EMBEDDING_MODELS,
            context::EMBEDDINGS
        )
        .is_ok());
        let err = validate_model_support(
            "solar-mini",
            &SUPPORTED_EMBEDDING_MODELS,
            context::EMBEDDINGS,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ModelNotSupported);
        assert_eq!(err.context, "Embeddings");
    }

    #[test]
    fn embedding_inputs_are_checked() {
        let err = validate_embedding_input(&EmbeddingInput::Batch(vec![]), context::EMBEDDINGS)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyArray);

        let err = validate_embedding_input(
            &EmbeddingInput::Batch(vec!["ok".into(), " ".into()]),
            context::EMBEDDINGS,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyString);

        let err =
            validate_embedding_input(&EmbeddingInput::Single("".into()), context::EMBEDDINGS)
                .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyString);

        assert!(validate_embedding_input(
            &EmbeddingInput::Single("hello".into()),
            context::EMBEDDINGS
        )
        .is_ok());
    }
}
