//! GitHub types.

mod common;
mod issues;
mod pulls;
mod statuses;

pub use common::*;
pub use issues::*;
pub use pulls::*;
pub use statuses::*;
