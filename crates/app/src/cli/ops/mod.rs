pub mod decrypt;
pub mod encrypt;
pub mod generate;
pub mod public_key;
pub mod version;

pub use decrypt::Decrypt;
pub use encrypt::Encrypt;
pub use generate::Generate;
pub use public_key::PublicKey;
pub use version::Version;
