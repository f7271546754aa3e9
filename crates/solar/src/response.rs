//! Shaping of successful chat responses into the record the host consumes.

use serde::{Deserialize, Serialize};

use crate::types::{ChatCompletionResponse, Usage};

/// The host-consumable subset of a chat completion: first message content,
/// usage accounting, model identifier, creation timestamp, plus the full raw
/// response for completeness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOutput {
    pub content: String,
    pub usage: Usage,
    pub model: String,
    pub created: u64,
    pub full_response: ChatCompletionResponse,
}

/// Extracts the host-relevant subset of a successful response.
///
/// The first choice's message content is used; an empty string is substituted
/// when the response carries no choices. Applied only to non-streaming
/// responses — streaming responses pass through without this extraction.
pub fn map_chat_response(response: ChatCompletionResponse) -> ChatOutput {
    let content = response
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
        .unwrap_or_default();

    ChatOutput {
        content,
        usage: response.usage,
        model: response.model.clone(),
        created: response.created,
        full_response: response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatChoice, ChoiceMessage, TokenCount};

    fn response(choices: Vec<ChatChoice>) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: "chatcmpl-1".into(),
            object: "chat.completion".into(),
            created: 1_700_000_000,
            model: "solar-mini".into(),
            choices,
            usage: Usage {
                prompt_tokens: TokenCount::new(4),
                completion_tokens: TokenCount::new(7),
                total_tokens: TokenCount::new(11),
            },
        }
    }

    #[test]
    fn extracts_the_first_choice() {
        let output = map_chat_response(response(vec![
            ChatChoice {
                index: 0,
                message: ChoiceMessage {
                    role: "assistant".into(),
                    content: Some("hello".into()),
                },
                finish_reason: Some("stop".into()),
            },
            ChatChoice {
                index: 1,
                message: ChoiceMessage {
                    role: "assistant".into(),
                    content: Some("ignored".into()),
                },
                finish_reason: Some("stop".into()),
            },
        ]));
        assert_eq!(output.content, "hello");
        assert_eq!(output.model, "solar-mini");
        assert_eq!(output.created, 1_700_000_000);
        assert_eq!(output.usage.total_tokens.as_u64(), 11);
        assert_eq!(output.full_response.choices.len(), 2);
    }

    #[test]
    fn missing_choices_yield_an_empty_string() {
        let output = map_chat_response(response(vec![]));
        assert_eq!(output.content, "");
    }

    #[test]
    fn null_content_yields_an_empty_string() {
        let output = map_chat_response(response(vec![ChatChoice {
            index: 0,
            message: ChoiceMessage {
                role: "assistant".into(),
                content: None,
            },
            finish_reason: Some("length".into()),
        }]));
        assert_eq!(output.content, "");
    }
}
