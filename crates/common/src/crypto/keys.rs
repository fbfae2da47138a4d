use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use crypto_box::{PublicKey as BoxPublicKey, SecretKey as BoxSecretKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;

/// Size of an X25519 scalar or point in bytes
pub const KEY_SIZE: usize = 32;
/// Size of a public key in bytes
pub const PUBLIC_KEY_SIZE: usize = KEY_SIZE;
/// Size of a private key in bytes: secret scalar followed by the cached public key
pub const PRIVATE_KEY_SIZE: usize = KEY_SIZE * 2;

/// Errors that can occur while generating or parsing keys
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("secure random source unavailable: {0}")]
    RandomSource(getrandom::Error),
    #[error("invalid key encoding: {0}")]
    InvalidEncoding(#[from] bs58::decode::Error),
    #[error("invalid key length, expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
    #[error("stored public key does not match the secret key")]
    MismatchedPublicKey,
}

/// Public key of a peer
///
/// 32 raw bytes of an X25519 point. Nothing about the point is validated up front;
/// a bad key simply fails to open any box.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl From<[u8; PUBLIC_KEY_SIZE]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        PublicKey(bytes)
    }
}

impl From<PublicKey> for [u8; PUBLIC_KEY_SIZE] {
    fn from(key: PublicKey) -> Self {
        key.0
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = KeyError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(KeyError::InvalidKeyLength {
                expected: PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut buff = [0; PUBLIC_KEY_SIZE];
        buff.copy_from_slice(bytes);
        Ok(buff.into())
    }
}

impl PublicKey {
    /// Parse a public key from its base58 text form
    pub fn from_text(text: &str) -> Result<Self, KeyError> {
        let bytes = bs58::decode(text).into_vec()?;
        Self::try_from(bytes.as_slice())
    }

    /// Encode the public key as base58
    pub fn to_text(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0
    }

    pub(crate) fn to_box(self) -> BoxPublicKey {
        BoxPublicKey::from(self.0)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_text())
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

/// Private key of the local peer
///
/// Laid out as 64 bytes: the secret scalar (`0..32`) followed by its public key
/// (`32..64`). The public half is only ever derived from the secret half, either at
/// generation or when parsing, so `public_key()` is a plain copy.
///
/// # Examples
///
/// ```ignore
/// let alice = PrivateKey::generate()?;
/// let bob = PrivateKey::generate()?;
///
/// let sealed = alice.encrypt(&bob.public_key(), b"hello")?;
/// let (sender, plaintext) = bob.decrypt(&sealed)?;
/// assert_eq!(sender, alice.public_key());
///
/// // Persist and restore through the text form
/// let restored: PrivateKey = alice.to_text().parse()?;
/// assert_eq!(restored, alice);
/// ```
#[derive(Clone, Copy)]
pub struct PrivateKey([u8; PRIVATE_KEY_SIZE]);

// Constant time over all 64 bytes; never short-circuits on the secret half.
impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for PrivateKey {}

/// Build a private key from the secret scalar alone, deriving the public half
impl From<[u8; KEY_SIZE]> for PrivateKey {
    fn from(secret: [u8; KEY_SIZE]) -> Self {
        let public = BoxSecretKey::from(secret).public_key();
        let mut key = [0; PRIVATE_KEY_SIZE];
        key[..KEY_SIZE].copy_from_slice(&secret);
        key[KEY_SIZE..].copy_from_slice(public.as_bytes());
        PrivateKey(key)
    }
}

/// Accepts the full 64-byte layout (public half verified) or a bare 32-byte secret
impl TryFrom<&[u8]> for PrivateKey {
    type Error = KeyError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match bytes.len() {
            PRIVATE_KEY_SIZE => {
                let mut secret = [0; KEY_SIZE];
                secret.copy_from_slice(&bytes[..KEY_SIZE]);
                let key = PrivateKey::from(secret);
                if key.0[KEY_SIZE..] != bytes[KEY_SIZE..] {
                    return Err(KeyError::MismatchedPublicKey);
                }
                Ok(key)
            }
            KEY_SIZE => {
                let mut secret = [0; KEY_SIZE];
                secret.copy_from_slice(bytes);
                Ok(PrivateKey::from(secret))
            }
            actual => Err(KeyError::InvalidKeyLength {
                expected: PRIVATE_KEY_SIZE,
                actual,
            }),
        }
    }
}

impl PrivateKey {
    /// Generate a new key pair from the OS random source
    pub fn generate() -> Result<Self, KeyError> {
        let mut secret = [0; KEY_SIZE];
        getrandom::getrandom(&mut secret).map_err(KeyError::RandomSource)?;
        Ok(Self::from(secret))
    }

    /// Parse a private key from its base58 text form
    pub fn from_text(text: &str) -> Result<Self, KeyError> {
        let bytes = bs58::decode(text).into_vec()?;
        Self::try_from(bytes.as_slice())
    }

    /// Encode all 64 bytes of the key as base58
    pub fn to_text(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    /// The cached public half of the key pair
    pub fn public_key(&self) -> PublicKey {
        let mut public = [0; PUBLIC_KEY_SIZE];
        public.copy_from_slice(&self.0[KEY_SIZE..]);
        PublicKey(public)
    }

    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        self.0
    }

    pub(crate) fn to_box(self) -> BoxSecretKey {
        let mut secret = [0; KEY_SIZE];
        secret.copy_from_slice(&self.0[..KEY_SIZE]);
        BoxSecretKey::from(secret)
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

// Secret bytes stay out of logs and panic messages.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public_key())
            .finish_non_exhaustive()
    }
}

impl FromStr for PrivateKey {
    type Err = KeyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(KeyTextVisitor::<PublicKey>(PhantomData))
    }
}

impl Serialize for PrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(KeyTextVisitor::<PrivateKey>(PhantomData))
    }
}

struct KeyTextVisitor<K>(PhantomData<K>);

impl<'de, K> serde::de::Visitor<'de> for KeyTextVisitor<K>
where
    K: FromStr<Err = KeyError>,
{
    type Value = K;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a base58 encoded key")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        v.parse().map_err(E::custom)
    }
}
