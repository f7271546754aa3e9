//! The per-item chat driver loop.

use serde::{Deserialize, Serialize};
use tracing::Instrument;

use solar::constants::context;
use solar::{
    build_chat_request, map_chat_response, validate_chat_messages, validate_chat_options,
    ChatCompletionResponse, ChatOptions, ChatOutput, ErrorCode, ErrorRecord, MessageParam,
    ModelId, RunId, SolarApi, UpstageError,
};

/// What to do with the remaining items when one fails.
///
/// This is the host's decision, passed in as a strategy parameter; the loop
/// itself holds no failure-handling state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first canonical error aborts the whole run.
    Abort,
    /// Failures are recorded per item and processing continues.
    ContinueOnFailure,
}

/// One chat work item as supplied by the host.
///
/// `model` and `messages` are deliberately loose here (`Option` / raw role
/// strings): their absence or emptiness must surface as domain validation
/// errors, not as deserialisation failures.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatItem {
    pub model: Option<String>,
    pub messages: Vec<MessageParam>,
    pub options: ChatOptions,
}

/// The success body of one item: shaped for non-streaming requests, the raw
/// decoded response for streaming ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatItemOutput {
    Shaped(ChatOutput),
    Passthrough(ChatCompletionResponse),
}

/// Outcome of one item under [`FailurePolicy::ContinueOnFailure`]: either the
/// success body or a failure record carrying the canonical error fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemOutcome {
    Success(ChatItemOutput),
    Failure(ErrorRecord),
}

/// Deserialises one host item, mapping shape mismatches (wrong JSON types) to
/// `invalid_field_type`.
pub fn parse_chat_item(value: &serde_json::Value) -> Result<ChatItem, UpstageError> {
    serde_json::from_value(value.clone()).map_err(|e| {
        UpstageError::new(
            ErrorCode::InvalidFieldType,
            format!("invalid item parameters: {e}"),
            context::CHAT_COMPLETIONS,
        )
    })
}

/// Processes a batch of host items strictly sequentially.
///
/// Each item's pipeline (validate → build → send → map) runs to completion
/// before the next item begins. Under [`FailurePolicy::Abort`] the first
/// failure is returned and the remaining items are not attempted; under
/// [`FailurePolicy::ContinueOnFailure`] every item yields an [`ItemOutcome`].
pub async fn run_chat_items(
    api: &dyn SolarApi,
    items: &[serde_json::Value],
    policy: FailurePolicy,
) -> Result<Vec<ItemOutcome>, UpstageError> {
    let run_id = RunId::new_random();
    let span = tracing::info_span!("chat_node_run", run_id = %run_id, item_count = items.len());

    async move {
        let mut outcomes = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match process_chat_item(api, item).await {
                Ok(output) => outcomes.push(ItemOutcome::Success(output)),
                Err(error) => {
                    tracing::error!(
                        item_index = index,
                        error_code = %error.code,
                        context = %error.context,
                        "item failed: {}", error.message,
                    );
                    match policy {
                        FailurePolicy::Abort => return Err(error),
                        FailurePolicy::ContinueOnFailure => {
                            outcomes.push(ItemOutcome::Failure(ErrorRecord::from(error)));
                        }
                    }
                }
            }
        }
        Ok(outcomes)
    }
    .instrument(span)
    .await
}

/// One item, end to end. Validation failures return before any network call.
async fn process_chat_item(
    api: &dyn SolarApi,
    item: &serde_json::Value,
) -> Result<ChatItemOutput, UpstageError> {
    let item = parse_chat_item(item)?;

    let messages = validate_chat_messages(&item.messages, context::CHAT_COMPLETIONS)?;
    validate_chat_options(&item.options, context::CHAT_COMPLETIONS)?;
    let model = item
        .model
        .as_deref()
        .and_then(ModelId::new)
        .ok_or_else(|| {
            UpstageError::new(
                ErrorCode::MissingRequiredField,
                "model is required",
                context::CHAT_COMPLETIONS,
            )
        })?;

    let streaming = item.options.stream.unwrap_or(false);
    let body = build_chat_request(model, messages, &item.options)?;
    let response = api.chat_completions(&body).await?;

    // Streaming responses pass through unshaped; extraction applies to
    // non-streaming responses only.
    Ok(if streaming {
        ChatItemOutput::Passthrough(response)
    } else {
        ChatItemOutput::Shaped(map_chat_response(response))
    })
}
