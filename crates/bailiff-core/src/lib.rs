//! Logic module.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
pub mod membership;
pub mod mirror;
mod request_id;
mod trigger;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DomainError, MembershipError, MirrorError, Result};
pub use request_id::RequestId;
use shaku::module;
pub use trigger::TriggerPattern;
use use_cases::{
    authorization::authorize_comment::AuthorizeComment,
    status::publish_mirror_status::PublishMirrorStatus,
};

module! {
    pub CoreModule {
        components = [AuthorizeComment, PublishMirrorStatus],
        providers = []
    }
}
