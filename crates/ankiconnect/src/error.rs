//! Error types for the ankiconnect crate.
//!
//! Failures fall into three families that callers usually want to treat
//! differently:
//!
//! - [`Error::ConnectionRefused`] / [`Error::Http`]: the endpoint could not
//!   be reached, or the exchange itself failed
//! - [`Error::MalformedResponse`]: the endpoint replied but broke the
//!   `{error, result}` envelope contract
//! - [`Error::AnkiConnect`]: the endpoint executed the action and reported
//!   a failure of its own (e.g. "deck was not found")

use thiserror::Error;

/// The error type for AnkiConnect invocations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP/network failure, including non-success status codes.
    ///
    /// For the common "Anki is not running" case, see
    /// [`Error::ConnectionRefused`].
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection refused - Anki is likely not running.
    #[error("could not connect to AnkiConnect. Is Anki running with the add-on installed?")]
    ConnectionRefused,

    /// The endpoint replied but violated the envelope contract.
    ///
    /// Every AnkiConnect reply must be a JSON object carrying both an
    /// `error` and a `result` key. A reply missing either one indicates an
    /// incompatible or misbehaving endpoint, not a failed action.
    #[error("AnkiConnect returned a malformed response: {0}")]
    MalformedResponse(String),

    /// AnkiConnect executed the action and reported an error.
    ///
    /// The message is the endpoint's own text, passed through verbatim.
    /// Common messages include:
    /// - "cannot create note because it is a duplicate"
    /// - "deck was not found"
    /// - "model was not found"
    #[error("AnkiConnect error: {0}")]
    AnkiConnect(String),

    /// JSON serialization error while building a request.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for AnkiConnect invocations.
pub type Result<T> = std::result::Result<T, Error>;
