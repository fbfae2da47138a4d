/**
 * Cryptographic types and operations.
 *  - Private and public key pairs, base58 text form
 *  - One-shot authenticated encryption between peers
 */
pub mod crypto;

pub mod prelude {
    pub use crate::crypto::{
        sender_of, KeyError, MessageError, MissingField, PrivateKey, PublicKey,
    };
}
