//! Categorization results as seen by a websocket client

use std::sync::Arc;

use serde_json::{json, Value};

use crate::common::*;

#[tokio::test]
async fn test_cat_sat_scenario_with_fixed_tagger() {
    let tagger = FixedTagger {
        tokens: vec![
            ("The", "DET"),
            ("cat", "NOUN"),
            ("sat", "VERB"),
            ("on", "ADP"),
            ("3", "NUM"),
            ("mats", "NOUN"),
            (".", "PUNCT"),
        ],
    };
    let server = TestServer::with_tagger(Arc::new(tagger)).await;
    let mut client = server.connect().await;

    let reply = client.request("The cat sat on 3 mats.", json!(1)).await;

    assert_entities_envelope(&reply);
    assert_eq!(reply["id"], json!(1));
    assert_eq!(bucket_values(&reply, "noun"), ["cat", "mats"]);
    assert_eq!(bucket_values(&reply, "verb"), ["sat"]);
    assert_eq!(bucket_values(&reply, "number"), ["3"]);
    assert!(bucket_values(&reply, "proper_noun").is_empty());
    assert!(bucket_values(&reply, "symbol").is_empty());
    assert_eq!(bucket_values(&reply, "misc"), ["The", "on", "."]);
}

#[tokio::test]
async fn test_cat_sat_scenario_with_rule_tagger() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let reply = client.request("The cat sat on 3 mats.", json!("abc")).await;

    assert_eq!(
        reply,
        json!({
            "entities": {
                "noun": [
                    {"value": "cat", "type": "NOUN", "offset": 4, "length": 3},
                    {"value": "mats", "type": "NOUN", "offset": 17, "length": 4}
                ],
                "proper_noun": [],
                "verb": [{"value": "sat", "type": "VERB", "offset": 8, "length": 3}],
                "number": [{"value": "3", "type": "NUM", "offset": 15, "length": 1}],
                "symbol": [],
                "misc": [
                    {"value": "The", "type": "DET", "offset": 0, "length": 3},
                    {"value": "on", "type": "ADP", "offset": 12, "length": 2},
                    {"value": ".", "type": "PUNCT", "offset": 21, "length": 1}
                ]
            },
            "id": "abc"
        })
    );
}

#[tokio::test]
async fn test_empty_message_yields_empty_buckets() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let reply = client.request("", json!(42)).await;

    assert_entities_envelope(&reply);
    assert_eq!(reply["id"], json!(42));
    for bucket in BUCKETS {
        assert_eq!(reply["entities"][bucket], json!([]), "bucket {}", bucket);
    }
}

#[tokio::test]
async fn test_unknown_tags_land_in_misc() {
    let tagger = FixedTagger {
        tokens: vec![("alpha", "NOUN"), ("beta", "TOTALLY_NEW"), ("gamma", "")],
    };
    let server = TestServer::with_tagger(Arc::new(tagger)).await;
    let mut client = server.connect().await;

    let reply = client.request("ignored", json!(1)).await;
    assert_eq!(bucket_values(&reply, "noun"), ["alpha"]);
    assert_eq!(bucket_values(&reply, "misc"), ["beta", "gamma"]);
}

#[tokio::test]
async fn test_ids_are_echoed_unchanged() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let ids = [
        json!(0),
        json!(-17),
        json!(3.25),
        json!("uuid-like-7f3a"),
        json!(null),
        json!(true),
        json!([1, "two", {"three": 3}]),
        json!({"session": "x", "seq": 9}),
    ];
    for id in ids {
        let reply = client.request("Hello there", id.clone()).await;
        assert_eq!(reply["id"], id);
    }
}

#[tokio::test]
async fn test_large_numeric_ids_are_echoed_verbatim() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    for id in ["123456789012345678901234567890", "1e400", "18446744073709551616"] {
        client
            .send_raw(&format!(r#"{{"message":"hi","id":{}}}"#, id))
            .await;
        let reply = client.recv_text().await;
        assert!(
            reply.ends_with(&format!(r#","id":{}}}"#, id)),
            "id {} came back as {}",
            id,
            reply
        );
    }
}

#[tokio::test]
async fn test_messages_on_one_connection_are_isolated() {
    let server = TestServer::start().await;

    let mut fresh = server.connect().await;
    let alone = fresh.request("Bob bought 2 apples in Paris!", json!("b")).await;

    let mut reused = server.connect().await;
    reused
        .request("Completely unrelated text about NASA & $5 fees", json!("a"))
        .await;
    let after = reused.request("Bob bought 2 apples in Paris!", json!("b")).await;

    assert_eq!(after, alone);
}

#[tokio::test]
async fn test_unicode_offsets_are_in_characters() {
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    let text = "Zoë paid €30 for crème brûlée";
    let reply = client.request(text, json!(1)).await;
    assert_tokens_consistent(&reply);

    let chars: Vec<char> = text.chars().collect();
    for bucket in BUCKETS {
        for token in reply["entities"][bucket].as_array().unwrap() {
            let offset = token["offset"].as_u64().unwrap() as usize;
            let length = token["length"].as_u64().unwrap() as usize;
            let slice: String = chars[offset..offset + length].iter().collect();
            assert_eq!(Value::String(slice), token["value"]);
        }
    }
    assert_eq!(bucket_values(&reply, "symbol"), ["€"]);
    assert_eq!(bucket_values(&reply, "number"), ["30"]);
}
