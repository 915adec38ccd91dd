//! Malformed input, error envelopes and control frames

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio_tungstenite::tungstenite::Message;

use entity_stream::RuleTagger;

use crate::common::test_server::{local_config, REPLY_TIMEOUT};
use crate::common::*;

#[tokio::test]
async fn test_frames_without_id_are_dropped() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client.send_raw("this is not json").await;
    client.send_raw("[\"an\", \"array\"]").await;
    client.send_json(json!({"message": "no id here"})).await;

    // The only reply is the one for the well-formed request
    let reply = client.request("still alive", json!(5)).await;
    assert_entities_envelope(&reply);
    assert_eq!(reply["id"], json!(5));
}

#[tokio::test]
async fn test_malformed_request_with_id_gets_error() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client.send_json(json!({"id": "m1"})).await;
    let reply = client.recv_json().await;
    assert_error_envelope(&reply, &json!("m1"));

    client.send_json(json!({"id": "m2", "message": ["not", "a", "string"]})).await;
    let reply = client.recv_json().await;
    assert_error_envelope(&reply, &json!("m2"));

    let reply = client.request("recovered", json!("m3")).await;
    assert_entities_envelope(&reply);
}

#[tokio::test]
async fn test_tagging_error_is_reported_per_message() {
    let config = local_config().with_max_message_chars(10);
    let tagger = RuleTagger::new().with_max_chars(config.max_message_chars);
    let server = TestServer::start_with(config, Arc::new(tagger)).await;
    let mut client = server.connect().await;

    let reply = client.request("this message is far too long", json!(1)).await;
    assert_error_envelope(&reply, &json!(1));
    assert!(reply["error"].as_str().unwrap().contains("too long"));

    let reply = client.request("short", json!(2)).await;
    assert_entities_envelope(&reply);
    assert_eq!(reply["id"], json!(2));
}

#[tokio::test]
async fn test_binary_frames_are_accepted() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client
        .ws
        .send(Message::Binary(br#"{"message":"Binary works","id":"bin"}"#.to_vec()))
        .await
        .unwrap();
    let reply = client.recv_json().await;
    assert_entities_envelope(&reply);
    assert_eq!(reply["id"], json!("bin"));
}

#[tokio::test]
async fn test_ping_is_answered() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    client.ws.send(Message::Ping(b"hb".to_vec())).await.unwrap();
    let pong = tokio::time::timeout(REPLY_TIMEOUT, async {
        loop {
            if let Some(Ok(Message::Pong(data))) = client.ws.next().await {
                return data;
            }
        }
    })
    .await
    .unwrap();
    assert_eq!(pong, b"hb".to_vec());
}
