//! The AnkiConnect client and builder.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::request::{AnkiConnectRequest, unwrap_envelope};

/// Default URL for AnkiConnect.
const DEFAULT_URL: &str = "http://127.0.0.1:8765";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default AnkiConnect protocol version.
const DEFAULT_VERSION: u8 = 6;

/// The invocation primitive for the AnkiConnect protocol.
///
/// One instance talks to one fixed endpoint for its whole lifetime; the
/// URL, API key, and protocol version are set at construction and never
/// change afterwards. The client is stateless per call — concurrent
/// invocations are independent and carry no ordering guarantee.
///
/// # Example
///
/// ```no_run
/// use ankiconnect::AnkiConnectClient;
/// use serde_json::json;
///
/// # async fn example() -> ankiconnect::Result<()> {
/// let client = AnkiConnectClient::new();
///
/// let deck_id = client.invoke("createDeck", json!({"deck": "Spanish"})).await?;
/// println!("created deck {deck_id}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AnkiConnectClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    version: u8,
}

impl AnkiConnectClient {
    /// Create a new client with default settings.
    ///
    /// Connects to `http://127.0.0.1:8765` with a 30 second timeout.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for custom client configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The endpoint URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Invoke an action with parameters and return its raw result.
    ///
    /// The result is handed back exactly as the endpoint produced it — no
    /// coercion, no narrowing. `null` is a valid result for actions that
    /// return nothing on success.
    pub async fn invoke<P>(&self, action: &str, params: P) -> Result<Value>
    where
        P: Serialize,
    {
        let request =
            AnkiConnectRequest::new(action, self.version, self.api_key.as_deref(), params);
        self.send(&request).await
    }

    /// Invoke an action that takes no parameters.
    ///
    /// The `params` key is omitted from the request body entirely.
    pub async fn invoke_without_params(&self, action: &str) -> Result<Value> {
        let request = AnkiConnectRequest::<()>::without_params(
            action,
            self.version,
            self.api_key.as_deref(),
        );
        self.send(&request).await
    }

    /// Send a request to AnkiConnect and unwrap the response envelope.
    async fn send<P>(&self, request: &AnkiConnectRequest<'_, P>) -> Result<Value>
    where
        P: Serialize,
    {
        debug!(action = request.action, "Invoking AnkiConnect action");

        let response = self
            .http_client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    Error::ConnectionRefused
                } else {
                    Error::Http(e)
                }
            })?;
        let response = response.error_for_status()?;

        let body = response.text().await?;
        let body: Value = serde_json::from_str(&body).map_err(|_| {
            Error::MalformedResponse("response body is not valid JSON".into())
        })?;

        let outcome = unwrap_envelope(body);
        if let Err(err) = &outcome {
            debug!(action = request.action, error = %err, "AnkiConnect action failed");
        }
        outcome
    }
}

impl Default for AnkiConnectClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating a customized [`AnkiConnectClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use ankiconnect::AnkiConnectClient;
///
/// let client = AnkiConnectClient::builder()
///     .url("http://localhost:8765")
///     .api_key("my-secret-key")
///     .timeout(Duration::from_secs(60))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    version: u8,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            version: DEFAULT_VERSION,
        }
    }

    /// Set the AnkiConnect URL.
    ///
    /// Defaults to `http://127.0.0.1:8765`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key for authentication.
    ///
    /// Only required if AnkiConnect is configured to require an API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Set the AnkiConnect protocol version stamped into every request.
    ///
    /// Defaults to 6.
    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Build the client.
    pub fn build(self) -> AnkiConnectClient {
        let http_client = Client::builder()
            .timeout(self.timeout)
            .build()
            .expect("Failed to build HTTP client");

        AnkiConnectClient {
            http_client,
            base_url: self.base_url,
            api_key: self.api_key,
            version: self.version,
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
