//! An async client for the AnkiConnect HTTP API.
//!
//! AnkiConnect exposes Anki's collection over a local HTTP endpoint that
//! accepts `{action, version, params}` requests and replies with a fixed
//! `{error, result}` envelope. This crate provides the single invocation
//! primitive for that protocol: build a request, POST it, validate the
//! envelope, and hand back either the raw result or a typed error.
//!
//! Results are returned as [`serde_json::Value`] on purpose — the shape of
//! each result belongs to the action that produced it, and callers that
//! need structure deserialize it themselves.
//!
//! # Quick Start
//!
//! ```no_run
//! use ankiconnect::AnkiConnectClient;
//!
//! # async fn example() -> ankiconnect::Result<()> {
//! let client = AnkiConnectClient::new();
//!
//! let version = client.invoke_without_params("version").await?;
//! println!("AnkiConnect version: {version}");
//!
//! let decks = client.invoke_without_params("deckNames").await?;
//! println!("decks: {decks}");
//! # Ok(())
//! # }
//! ```
//!
//! # Client Configuration
//!
//! ```no_run
//! use std::time::Duration;
//! use ankiconnect::AnkiConnectClient;
//!
//! let client = AnkiConnectClient::builder()
//!     .url("http://localhost:8765")
//!     .api_key("your-api-key")
//!     .timeout(Duration::from_secs(60))
//!     .build();
//! ```
//!
//! # Requirements
//!
//! - Anki must be running with the [AnkiConnect](https://ankiweb.net/shared/info/2055492159) add-on installed
//! - By default, the client connects to `http://127.0.0.1:8765`

pub mod client;
pub mod error;
mod request;

pub use client::{AnkiConnectClient, ClientBuilder};
pub use error::{Error, Result};
