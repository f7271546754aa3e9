//! Solarflow CLI entry point.
//!
//! This binary is the composition root: it wires observability, reads the
//! client configuration from the environment, constructs the concrete
//! [`upstage::UpstageClient`], and runs one batch of chat items through the
//! per-item driver loop.
//!
//! Usage:
//!
//! ```text
//! UPSTAGE_API_KEY=... solarflow [--continue-on-fail] [items.json]
//! ```
//!
//! The positional argument is a JSON file containing an array of chat items;
//! when absent, the array is read from stdin. Optional environment:
//! `UPSTAGE_BASE_URL` (override the API base), `UPSTAGE_TIMEOUT_MS` (per-call
//! timeout), `LOG_FORMAT=json` (structured log output), `RUST_LOG` (filter).

use std::io::Read;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use nodes::FailurePolicy;
use upstage::UpstageClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let continue_on_fail = args.iter().any(|arg| arg == "--continue-on-fail");
    let input_path = args.iter().find(|arg| !arg.starts_with("--"));

    let raw = match input_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read items from '{path}'"))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read items from stdin")?;
            buffer
        }
    };
    let items: Vec<serde_json::Value> =
        serde_json::from_str(&raw).context("input must be a JSON array of chat items")?;

    let api_key =
        std::env::var("UPSTAGE_API_KEY").context("UPSTAGE_API_KEY must be set")?;
    let mut client = UpstageClient::new(api_key)?;
    if let Ok(base_url) = std::env::var("UPSTAGE_BASE_URL") {
        client.set_base_url(base_url);
    }
    if let Ok(timeout_ms) = std::env::var("UPSTAGE_TIMEOUT_MS") {
        let timeout_ms: u64 = timeout_ms
            .parse()
            .context("UPSTAGE_TIMEOUT_MS must be an integer number of milliseconds")?;
        client.set_timeout(Duration::from_millis(timeout_ms));
    }

    let policy = if continue_on_fail {
        FailurePolicy::ContinueOnFailure
    } else {
        FailurePolicy::Abort
    };

    tracing::info!(
        item_count = items.len(),
        base_url = client.base_url(),
        continue_on_fail,
        "processing chat items",
    );
    let outcomes = nodes::run_chat_items(&client, &items, policy).await?;
    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    Ok(())
}

/// Wires `tracing-subscriber` for the whole process. Defaults to `info`;
/// `RUST_LOG` overrides the filter and `LOG_FORMAT=json` switches to
/// structured output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
