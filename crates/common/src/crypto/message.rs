//! Authenticated peer-to-peer messages using NaCl `crypto_box`
//!
//! A message is sealed with the sender's secret key and the recipient's public key,
//! so a successful open proves both that the content is intact and that it came from
//! the holder of the embedded sender key.

use std::fmt;

use crypto_box::aead::generic_array::GenericArray;
use crypto_box::aead::Aead;
use crypto_box::SalsaBox;

use super::keys::{PrivateKey, PublicKey, PUBLIC_KEY_SIZE};

/// Size of an XSalsa20 nonce in bytes
pub const NONCE_SIZE: usize = 24;
/// Size of the Poly1305 authentication tag in bytes
pub const TAG_SIZE: usize = 16;
/// Size of the cleartext header: sender public key followed by the nonce
pub const HEADER_SIZE: usize = PUBLIC_KEY_SIZE + NONCE_SIZE;

/// A number used once per encryption
pub type Nonce = [u8; NONCE_SIZE];

/// Header field a truncated message ran out of bytes in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    PublicKey,
    Nonce,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingField::PublicKey => f.write_str("public key"),
            MissingField::Nonce => f.write_str("nonce"),
        }
    }
}

/// Errors that can occur while sealing or opening a message
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("secure random source unavailable: {0}")]
    RandomSource(getrandom::Error),
    #[error("invalid message: expected {0}")]
    Truncated(MissingField),
    #[error("invalid message: authentication failed")]
    AuthenticationFailed,
    #[error("failed to seal message")]
    SealFailed,
}

/// Draw a fresh nonce from the OS random source
pub fn generate_nonce() -> Result<Nonce, MessageError> {
    let mut nonce = [0; NONCE_SIZE];
    getrandom::getrandom(&mut nonce).map_err(MessageError::RandomSource)?;
    Ok(nonce)
}

/// Read the sender's public key from a message header without opening it
///
/// The key is unauthenticated until [`PrivateKey::decrypt`] succeeds; use it to
/// pick a policy or identity, never to trust the content.
pub fn sender_of(data: &[u8]) -> Result<PublicKey, MessageError> {
    if data.len() < PUBLIC_KEY_SIZE {
        return Err(MessageError::Truncated(MissingField::PublicKey));
    }
    PublicKey::try_from(&data[..PUBLIC_KEY_SIZE])
        .map_err(|_| MessageError::Truncated(MissingField::PublicKey))
}

impl PrivateKey {
    /// Encrypt `data` for the holder of `peer`
    ///
    /// Output is `own_pubkey (32) || nonce (24) || sealed box`. A new random nonce is
    /// drawn on every call, so encrypting the same input twice never yields the same
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::RandomSource`] if no nonce could be drawn.
    pub fn encrypt(&self, peer: &PublicKey, data: &[u8]) -> Result<Vec<u8>, MessageError> {
        let nonce = generate_nonce()?;

        let sealed = SalsaBox::new(&peer.to_box(), &self.to_box())
            .encrypt(GenericArray::from_slice(&nonce[..]), data)
            .map_err(|_| MessageError::SealFailed)?;

        let mut out = Vec::with_capacity(HEADER_SIZE + sealed.len());
        out.extend_from_slice(self.public_key().as_bytes());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);

        tracing::trace!(plaintext = data.len(), sealed = out.len(), "sealed message");
        Ok(out)
    }

    /// Decrypt a message produced by [`PrivateKey::encrypt`]
    ///
    /// Returns the sender's public key alongside the plaintext so the caller can check
    /// who the message came from.
    ///
    /// # Errors
    ///
    /// - [`MessageError::Truncated`] if the header is cut short, naming the missing field
    /// - [`MessageError::AuthenticationFailed`] if the box does not open: wrong
    ///   recipient, wrong sender key, or tampered nonce or ciphertext
    pub fn decrypt(&self, data: &[u8]) -> Result<(PublicKey, Vec<u8>), MessageError> {
        let sender = sender_of(data)?;
        let data = &data[PUBLIC_KEY_SIZE..];

        if data.len() < NONCE_SIZE {
            return Err(MessageError::Truncated(MissingField::Nonce));
        }
        let (nonce, sealed) = data.split_at(NONCE_SIZE);

        let opened = SalsaBox::new(&sender.to_box(), &self.to_box())
            .decrypt(GenericArray::from_slice(nonce), sealed)
            .map_err(|_| MessageError::AuthenticationFailed)?;

        tracing::trace!(sealed = sealed.len(), "opened message");
        Ok((sender, opened))
    }
}
