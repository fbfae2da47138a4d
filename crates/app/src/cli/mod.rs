pub mod args;
pub mod io;
pub mod op;
pub mod ops;

pub use ops::{Decrypt, Encrypt, Generate, PublicKey, Version};

#[cfg(test)]
pub mod testkit;
