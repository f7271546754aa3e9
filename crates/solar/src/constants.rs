//! Fixed values of the Upstage API surface: endpoint paths, supported model
//! sets, default tuning values, numeric option bounds, and the context labels
//! stamped onto errors.

/// Base URL of the Upstage API. Overridable per client via
/// `UpstageClient::set_base_url` (e.g. for a regional gateway or a test
/// server).
pub const DEFAULT_BASE_URL: &str = "https://api.upstage.ai/v1";

/// Outbound request timeout applied to every call, in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Endpoint paths, relative to the base URL. All are POST with a JSON body
/// except [`endpoints::MODELS`], which is GET.
pub mod endpoints {
    pub const CHAT_COMPLETIONS: &str = "/chat/completions";
    pub const EMBEDDINGS: &str = "/embeddings";
    pub const MODELS: &str = "/models";
    pub const DOCUMENT_PARSING: &str = "/parse";
    pub const INFORMATION_EXTRACTION: &str = "/extract";
}

/// Context labels identifying which logical operation produced an error.
pub mod context {
    pub const CHAT_COMPLETIONS: &str = "ChatCompletions";
    pub const STREAM_CHAT_COMPLETIONS: &str = "StreamChatCompletions";
    pub const EMBEDDINGS: &str = "Embeddings";
    pub const GET_MODELS: &str = "GetModels";
    pub const DOCUMENT_PARSING: &str = "DocumentParsing";
    pub const INFORMATION_EXTRACTION: &str = "InformationExtraction";
}

/// Chat models selectable in the node UI.
pub const SUPPORTED_CHAT_MODELS: [&str; 3] = ["solar-mini", "solar-pro", "solar-pro2"];

/// Models accepted by the embeddings endpoint.
pub const SUPPORTED_EMBEDDING_MODELS: [&str; 2] = ["embedding-query", "embedding-passage"];

/// Default tuning values applied when the host supplies none.
pub mod defaults {
    pub const TEMPERATURE: f64 = 0.7;
    pub const MAX_TOKENS: u32 = 1000;
    pub const TOP_P: f64 = 1.0;
    pub const EMBEDDING_MODEL: &str = "embedding-query";
}

/// Bounds for numeric tuning options. The host UI enforces the same ranges;
/// these guard values passed programmatically.
pub mod bounds {
    pub const TEMPERATURE_MIN: f64 = 0.0;
    pub const TEMPERATURE_MAX: f64 = 2.0;
    pub const TOP_P_MIN: f64 = 0.0;
    pub const TOP_P_MAX: f64 = 1.0;
    pub const PENALTY_MIN: f64 = -2.0;
    pub const PENALTY_MAX: f64 = 2.0;
    pub const MAX_TOKENS_MIN: u32 = 1;
    pub const MAX_TOKENS_MAX: u32 = 4000;
}

/// Host-level size limits, mirrored from the node UI configuration.
pub mod limits {
    pub const MAX_MESSAGES: usize = 100;
    pub const MAX_CONTENT_LENGTH: usize = 4000;
    pub const MAX_EMBEDDING_INPUTS: usize = 100;
    pub const MAX_TOTAL_TOKENS: u64 = 204_800;
}
