//! Input/output plumbing shared by the message commands

use std::path::Path;

use tokio::io::AsyncReadExt;

/// Read all bytes from `path`, or from stdin when no path is given
pub async fn read_input(path: Option<&Path>) -> std::io::Result<Vec<u8>> {
    match path {
        Some(path) => tokio::fs::read(path).await,
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin().read_to_end(&mut buf).await?;
            Ok(buf)
        }
    }
}

/// Decode base58 text as read from a terminal or pipe, ignoring surrounding whitespace
pub fn decode_text(input: &[u8]) -> Result<Vec<u8>, bs58::decode::Error> {
    let text = String::from_utf8_lossy(input);
    bs58::decode(text.trim()).into_vec()
}

pub fn encode_text(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}
