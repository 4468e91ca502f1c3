//! Request construction and response-envelope handling for the AnkiConnect
//! protocol.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// The request format expected by AnkiConnect.
#[derive(Debug, Serialize)]
pub(crate) struct AnkiConnectRequest<'a, P> {
    /// The action to perform.
    pub action: &'a str,
    /// The API protocol version.
    pub version: u8,
    /// Optional API key for authentication.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'a str>,
    /// Optional parameters for the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<P>,
}

impl<'a, P> AnkiConnectRequest<'a, P> {
    /// Create a new request with parameters.
    pub fn new(action: &'a str, version: u8, key: Option<&'a str>, params: P) -> Self {
        Self {
            action,
            version,
            key,
            params: Some(params),
        }
    }

    /// Create a new request without parameters.
    pub fn without_params(
        action: &'a str,
        version: u8,
        key: Option<&'a str>,
    ) -> AnkiConnectRequest<'a, ()> {
        AnkiConnectRequest {
            action,
            version,
            key,
            params: None,
        }
    }
}

/// Unwrap the fixed `{error, result}` response envelope.
///
/// Both keys must be present before the `error` value is even looked at: a
/// reply missing either one is a contract violation regardless of whether
/// the action succeeded.
pub(crate) fn unwrap_envelope(body: Value) -> Result<Value> {
    let Value::Object(mut reply) = body else {
        return Err(Error::MalformedResponse(
            "response is not a JSON object".into(),
        ));
    };

    let result = reply.remove("result").ok_or_else(|| {
        Error::MalformedResponse("response is missing the 'result' key".into())
    })?;
    let error = reply.remove("error").ok_or_else(|| {
        Error::MalformedResponse("response is missing the 'error' key".into())
    })?;

    match error {
        Value::Null => Ok(result),
        Value::String(message) => Err(Error::AnkiConnect(message)),
        other => Err(Error::MalformedResponse(format!(
            "'error' is neither null nor a string: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_with_params_serializes_action_and_version() {
        let request =
            AnkiConnectRequest::new("createDeck", 6, None, json!({"deck": "Spanish"}));
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({"action": "createDeck", "version": 6, "params": {"deck": "Spanish"}})
        );
    }

    #[test]
    fn request_without_params_omits_params_key() {
        let request = AnkiConnectRequest::<()>::without_params("deckNames", 6, None);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body, json!({"action": "deckNames", "version": 6}));
    }

    #[test]
    fn request_includes_api_key_when_set() {
        let request = AnkiConnectRequest::<()>::without_params("version", 6, Some("secret"));
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["key"], json!("secret"));
    }

    #[test]
    fn unwrap_returns_result_when_error_is_null() {
        let result = unwrap_envelope(json!({"result": [1, 2, 3], "error": null})).unwrap();
        assert_eq!(result, json!([1, 2, 3]));
    }

    #[test]
    fn unwrap_accepts_null_result_for_void_actions() {
        let result = unwrap_envelope(json!({"result": null, "error": null})).unwrap();
        assert!(result.is_null());
    }

    #[test]
    fn unwrap_passes_error_message_through_verbatim() {
        let err = unwrap_envelope(json!({"result": null, "error": "deck was not found"}))
            .unwrap_err();
        match err {
            Error::AnkiConnect(message) => assert_eq!(message, "deck was not found"),
            other => panic!("expected AnkiConnect error, got {other:?}"),
        }
    }

    #[test]
    fn unwrap_rejects_missing_result_key() {
        let err = unwrap_envelope(json!({"error": null})).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn unwrap_rejects_missing_error_key() {
        let err = unwrap_envelope(json!({"result": 6})).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn unwrap_rejects_missing_result_even_when_error_is_set() {
        // Missing keys win over the error value: this is a broken endpoint,
        // not a failed action.
        let err = unwrap_envelope(json!({"error": "deck was not found"})).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn unwrap_rejects_non_object_body() {
        let err = unwrap_envelope(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn unwrap_rejects_non_string_error() {
        let err = unwrap_envelope(json!({"result": null, "error": {"code": 1}})).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}
