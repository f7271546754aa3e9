//! Canonical error type and error normalisation.
//!
//! Every failure in the adapter — local validation, transport problems,
//! API-reported errors — is converted into a single [`UpstageError`] before
//! it crosses the crate boundary. [`normalize`] performs that conversion from
//! an explicitly tagged [`RawFailure`]; callers never see any other error
//! shape.
//!
//! The taxonomy has two tiers: validation errors (detected before any network
//! call, always carrying one of the local [`ErrorCode`] tokens) and
//! transport/API errors (detected after a network attempt, carrying whatever
//! the upstream reported, or `api_request_failed` when unrecognised). Both
//! tiers share the same canonical shape; the code alone distinguishes them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Stable error code tokens.
///
/// The named variants cover every code the adapter produces locally and the
/// tokens the Upstage API is known to report. Codes reported by the API that
/// match none of them are preserved verbatim in [`ErrorCode::Upstream`]
/// rather than being flattened away.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MissingRequiredField,
    InvalidMessageRole,
    InvalidJsonSchema,
    ApiRequestFailed,
    ModelNotSupported,
    InvalidFieldType,
    EmptyArray,
    EmptyString,
    ValueOutOfRange,
    /// A code reported by the API that is not one of the known tokens.
    Upstream(String),
}

impl ErrorCode {
    /// Returns the snake_case token for this code.
    pub fn as_str(&self) -> &str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::InvalidMessageRole => "invalid_message_role",
            Self::InvalidJsonSchema => "invalid_json_schema",
            Self::ApiRequestFailed => "api_request_failed",
            Self::ModelNotSupported => "model_not_supported",
            Self::InvalidFieldType => "invalid_field_type",
            Self::EmptyArray => "empty_array",
            Self::EmptyString => "empty_string",
            Self::ValueOutOfRange => "value_out_of_range",
            Self::Upstream(code) => code,
        }
    }

    /// Maps an upstream-reported code string onto a known token, preserving
    /// unrecognised codes verbatim.
    pub fn from_upstream(code: &str) -> Self {
        match code {
            "missing_required_field" => Self::MissingRequiredField,
            "invalid_message_role" => Self::InvalidMessageRole,
            "invalid_json_schema" => Self::InvalidJsonSchema,
            "api_request_failed" => Self::ApiRequestFailed,
            "model_not_supported" => Self::ModelNotSupported,
            "invalid_field_type" => Self::InvalidFieldType,
            "empty_array" => Self::EmptyArray,
            "empty_string" => Self::EmptyString,
            "value_out_of_range" => Self::ValueOutOfRange,
            other => Self::Upstream(other.to_string()),
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_upstream(&code))
    }
}

// ---------------------------------------------------------------------------
// Canonical error
// ---------------------------------------------------------------------------

/// The single error currency of the adapter.
///
/// Carries a human-readable message, a stable [`ErrorCode`], the HTTP status
/// when one was observed, and a context label identifying which operation
/// failed (e.g. `"ChatCompletions"`).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{context}: {message}")]
pub struct UpstageError {
    pub message: String,
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub context: String,
}

impl UpstageError {
    /// Creates a canonical error with no HTTP status.
    pub fn new(code: ErrorCode, message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            status_code: None,
            context: context.into(),
        }
    }

    /// Attaches the observed HTTP status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }
}

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// A failure as observed at the transport or host boundary, before
/// normalisation. Explicitly tagged so every conversion path is covered by
/// `match` rather than duck-typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFailure {
    /// Already canonical; passes through [`normalize`] unchanged.
    Canonical(UpstageError),
    /// An error the API (or transport) reported with a message and possibly a
    /// code and HTTP status.
    ApiReported {
        message: String,
        code: Option<String>,
        status_code: Option<u16>,
    },
    /// A failure with no recognisable shape.
    Unknown,
}

/// Converts a raw failure into the canonical error, stamping the operation's
/// context label.
///
/// Idempotent over already-canonical input: the error is returned unchanged,
/// including its original context. The `tracing` event emitted here is
/// best-effort; with no subscriber installed it is a no-op and can never mask
/// the error being normalised.
pub fn normalize(failure: RawFailure, context: &str) -> UpstageError {
    let error = match failure {
        RawFailure::Canonical(error) => error,
        RawFailure::ApiReported {
            message,
            code,
            status_code,
        } => UpstageError {
            message,
            code: code
                .as_deref()
                .map(ErrorCode::from_upstream)
                .unwrap_or(ErrorCode::ApiRequestFailed),
            status_code,
            context: context.to_string(),
        },
        RawFailure::Unknown => UpstageError::new(
            ErrorCode::ApiRequestFailed,
            "unknown error occurred",
            context,
        ),
    };
    tracing::error!(
        context = %error.context,
        error_code = %error.code,
        status_code = error.status_code,
        "{}", error.message,
    );
    error
}

// ---------------------------------------------------------------------------
// Per-item failure records
// ---------------------------------------------------------------------------

/// A per-item failure in the form the host records when its
/// continue-on-failure policy is active.
///
/// Carries the same fields a raised [`UpstageError`] would, so both
/// propagation modes share one error vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
    pub error_code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub timestamp: Timestamp,
    pub context: String,
}

impl From<UpstageError> for ErrorRecord {
    fn from(error: UpstageError) -> Self {
        Self {
            error: error.message,
            error_code: error.code,
            status_code: error.status_code,
            timestamp: Timestamp::now(),
            context: error.context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizing_a_canonical_error_is_the_identity() {
        let error = UpstageError::new(
            ErrorCode::InvalidJsonSchema,
            "invalid JSON schema provided",
            "ChatCompletions",
        )
        .with_status(400);
        let normalized = normalize(RawFailure::Canonical(error.clone()), "Embeddings");
        assert_eq!(normalized, error);
    }

    #[test]
    fn api_reported_failure_keeps_code_and_status() {
        let normalized = normalize(
            RawFailure::ApiReported {
                message: "rate limited".into(),
                code: Some("too_many_requests".into()),
                status_code: Some(429),
            },
            "ChatCompletions",
        );
        assert_eq!(normalized.code, ErrorCode::Upstream("too_many_requests".into()));
        assert_eq!(normalized.status_code, Some(429));
        assert_eq!(normalized.context, "ChatCompletions");
        assert_eq!(normalized.message, "rate limited");
    }

    #[test]
    fn api_reported_failure_without_code_falls_back() {
        let normalized = normalize(
            RawFailure::ApiReported {
                message: "rate limited".into(),
                code: None,
                status_code: Some(429),
            },
            "ChatCompletions",
        );
        assert_eq!(normalized.code, ErrorCode::ApiRequestFailed);
        assert_eq!(normalized.status_code, Some(429));
    }

    #[test]
    fn unknown_failure_becomes_generic_api_error() {
        let normalized = normalize(RawFailure::Unknown, "GetModels");
        assert_eq!(normalized.code, ErrorCode::ApiRequestFailed);
        assert_eq!(normalized.status_code, None);
        assert_eq!(normalized.context, "GetModels");
    }

    #[test]
    fn known_upstream_codes_map_to_named_variants() {
        assert_eq!(
            ErrorCode::from_upstream("model_not_supported"),
            ErrorCode::ModelNotSupported
        );
        assert_eq!(
            ErrorCode::from_upstream("quota_exceeded"),
            ErrorCode::Upstream("quota_exceeded".into())
        );
    }

    #[test]
    fn error_code_serializes_as_its_token() {
        let json = serde_json::to_value(ErrorCode::ValueOutOfRange).unwrap();
        assert_eq!(json, serde_json::json!("value_out_of_range"));
        let json = serde_json::to_value(ErrorCode::Upstream("quota_exceeded".into())).unwrap();
        assert_eq!(json, serde_json::json!("quota_exceeded"));
    }

    #[test]
    fn error_record_carries_the_same_fields() {
        let error = UpstageError::new(ErrorCode::EmptyString, "empty content", "ChatCompletions")
            .with_status(422);
        let record = ErrorRecord::from(error);
        assert_eq!(record.error, "empty content");
        assert_eq!(record.error_code, ErrorCode::EmptyString);
        assert_eq!(record.status_code, Some(422));
        assert_eq!(record.context, "ChatCompletions");
    }
}
