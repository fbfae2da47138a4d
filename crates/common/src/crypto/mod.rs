//! Cryptographic primitives for SealBox peers
//!
//! - **Identity**: X25519 key pairs (`PrivateKey`/`PublicKey`). The private key carries
//!   its public half inline so it never has to be recomputed.
//! - **Text form**: keys are shared and configured as base58 strings. The serde
//!   impls go through the same text form, so keys embed as plain string fields in
//!   TOML or JSON documents.
//! - **Messages**: NaCl `crypto_box` (X25519, XSalsa20, Poly1305) between a sender's
//!   private key and a peer's public key.
//!
//! # Wire Format
//!
//! ```text
//! [ sender_pubkey: 32 bytes ][ nonce: 24 bytes ][ sealed box: plaintext + 16 byte tag ]
//! ```
//!
//! The sender's public key travels with the message so the receiver knows which key
//! to open the box against, and can check who sent it once it opens.

mod keys;
mod message;

pub use keys::{KeyError, PrivateKey, PublicKey, KEY_SIZE, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};
pub use message::{
    generate_nonce, sender_of, MessageError, MissingField, Nonce, HEADER_SIZE, NONCE_SIZE,
    TAG_SIZE,
};
