//! Crypto module.

mod digest;
mod errors;
mod sig;

pub use rand;

pub use self::{
    digest::{random_hex, sha256_hex},
    errors::{CryptoError, Result},
    sig::Signature,
};
