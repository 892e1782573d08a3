//! Server middlewares.

mod request_id;
mod signature;

pub use request_id::{RequestIdentifier, RequestIdentifierMiddleware};
pub use signature::{VerifySignature, VerifySignatureMiddleware};
