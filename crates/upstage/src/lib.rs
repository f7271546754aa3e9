//! Solarflow Upstage API infrastructure adapter.
//!
//! Implements the [`solar::SolarApi`] port over HTTP: bearer-token
//! authentication, JSON bodies, a per-call timeout, and proxy decoration from
//! the conventional environment variables. Every transport or API failure is
//! normalised into [`solar::UpstageError`] before leaving this crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** All HTTP details (endpoint paths, status handling,
//! error-body parsing, proxy selection) live here. The [`solar`] crate sees
//! only the [`solar::SolarApi`] port.

mod client;
mod proxy;

pub use client::UpstageClient;
