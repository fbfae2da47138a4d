//! Keys embedded as string fields in structured config documents

use std::collections::BTreeMap;

use common::crypto::{PrivateKey, PublicKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct PeerConfig {
    private_key: PrivateKey,
    #[serde(default)]
    peers: BTreeMap<String, PublicKey>,
}

fn sample() -> PeerConfig {
    let mut peers = BTreeMap::new();
    peers.insert(
        "alice".to_string(),
        PrivateKey::generate().unwrap().public_key(),
    );
    peers.insert("bob".to_string(), PrivateKey::generate().unwrap().public_key());
    PeerConfig {
        private_key: PrivateKey::generate().unwrap(),
        peers,
    }
}

#[test]
fn toml_round_trip() {
    let config = sample();

    let text = toml::to_string_pretty(&config).unwrap();
    assert!(text.contains(&format!("private_key = \"{}\"", config.private_key.to_text())));
    assert!(text.contains(&config.peers["alice"].to_text()));

    let loaded: PeerConfig = toml::from_str(&text).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn json_round_trip() {
    let config = sample();

    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(
        value["private_key"],
        serde_json::Value::String(config.private_key.to_text())
    );

    let loaded: PeerConfig = serde_json::from_value(value).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn invalid_key_text_fails_deserialization() {
    let err = toml::from_str::<PeerConfig>("private_key = \"not-valid-base58!!\"").unwrap_err();
    assert!(err.to_string().contains("invalid key encoding"));

    let short = bs58::encode([1u8; 10]).into_string();
    let err = serde_json::from_str::<PublicKey>(&format!("\"{}\"", short)).unwrap_err();
    assert!(err.to_string().contains("invalid key length"));
}

#[test]
fn non_string_key_fails_deserialization() {
    assert!(serde_json::from_str::<PublicKey>("[1, 2, 3]").is_err());
    assert!(toml::from_str::<PeerConfig>("private_key = 42").is_err());
}
