//! Solarflow chat node.
//!
//! Drives the per-item pipeline — validate, build, send, map — strictly
//! sequentially over a batch of host items. Each item runs to completion
//! (success or canonical error) before the next begins; the one suspension
//! point per item is the outbound HTTP call.
//!
//! ## Architectural Layer
//!
//! **Orchestration.** This crate sequences calls between the [`solar`] domain
//! crate and the [`solar::SolarApi`] port; it contains no domain rules and no
//! transport details of its own.

mod chat;

pub use chat::{parse_chat_item, run_chat_items, ChatItem, ChatItemOutput, FailurePolicy, ItemOutcome};
