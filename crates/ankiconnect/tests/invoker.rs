//! Tests for the AnkiConnect invocation primitive.

mod common;

use ankiconnect::{AnkiConnectClient, Error};
use common::{mock_action, mock_anki_error, mock_anki_response, setup_mock_server};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn invoke_forwards_action_params_and_version() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "createDeck",
            "version": 6,
            "params": {"deck": "Spanish"}
        })))
        .respond_with(mock_anki_response(1694938000000_i64))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnkiConnectClient::builder().url(server.uri()).build();
    let result = client
        .invoke("createDeck", json!({"deck": "Spanish"}))
        .await
        .unwrap();

    assert_eq!(result, json!(1694938000000_i64));
}

#[tokio::test]
async fn invoke_without_params_omits_params_key() {
    let server = setup_mock_server().await;
    mock_action(&server, "deckNames", mock_anki_response(vec!["Default"])).await;

    let client = AnkiConnectClient::builder().url(server.uri()).build();
    let result = client.invoke_without_params("deckNames").await.unwrap();

    assert_eq!(result, json!(["Default"]));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("params").is_none());
}

#[tokio::test]
async fn invoke_includes_api_key_when_configured() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "version",
            "key": "secret"
        })))
        .respond_with(mock_anki_response(6))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnkiConnectClient::builder()
        .url(server.uri())
        .api_key("secret")
        .build();
    let result = client.invoke_without_params("version").await.unwrap();

    assert_eq!(result, json!(6));
}

#[tokio::test]
async fn invoke_stamps_configured_protocol_version() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"action": "version", "version": 5})))
        .respond_with(mock_anki_response(5))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnkiConnectClient::builder()
        .url(server.uri())
        .version(5)
        .build();
    client.invoke_without_params("version").await.unwrap();
}

#[tokio::test]
async fn invoke_returns_null_result_for_void_actions() {
    let server = setup_mock_server().await;
    mock_action(&server, "sync", mock_anki_response(())).await;

    let client = AnkiConnectClient::builder().url(server.uri()).build();
    let result = client.invoke_without_params("sync").await.unwrap();

    assert!(result.is_null());
}

#[tokio::test]
async fn remote_error_message_is_passed_through_verbatim() {
    let server = setup_mock_server().await;
    mock_action(&server, "createDeck", mock_anki_error("deck was not found")).await;

    let client = AnkiConnectClient::builder().url(server.uri()).build();
    let err = client
        .invoke("createDeck", json!({"deck": "Missing"}))
        .await
        .unwrap_err();

    match err {
        Error::AnkiConnect(message) => assert_eq!(message, "deck was not found"),
        other => panic!("expected AnkiConnect error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_result_key_is_a_malformed_response() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "version",
        ResponseTemplate::new(200).set_body_json(json!({"error": null})),
    )
    .await;

    let client = AnkiConnectClient::builder().url(server.uri()).build();
    let err = client.invoke_without_params("version").await.unwrap_err();

    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_error_key_is_a_malformed_response() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "version",
        ResponseTemplate::new(200).set_body_json(json!({"result": 6})),
    )
    .await;

    let client = AnkiConnectClient::builder().url(server.uri()).build();
    let err = client.invoke_without_params("version").await.unwrap_err();

    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn non_json_body_is_a_malformed_response() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "version",
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let client = AnkiConnectClient::builder().url(server.uri()).build();
    let err = client.invoke_without_params("version").await.unwrap_err();

    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let server = setup_mock_server().await;
    mock_action(&server, "version", ResponseTemplate::new(500)).await;

    let client = AnkiConnectClient::builder().url(server.uri()).build();
    let err = client.invoke_without_params("version").await.unwrap_err();

    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_connection_refused() {
    // Nothing listens on this port.
    let client = AnkiConnectClient::builder()
        .url("http://127.0.0.1:1")
        .build();
    let err = client.invoke_without_params("version").await.unwrap_err();

    assert!(matches!(err, Error::ConnectionRefused));
}
