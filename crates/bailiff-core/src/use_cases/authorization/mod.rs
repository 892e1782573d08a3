pub(crate) mod authorize_comment;
mod rejection;

pub use authorize_comment::{AuthorizeCommentInterface, MAX_COMMENT_LENGTH};
#[cfg(any(test, feature = "testkit"))]
pub use authorize_comment::MockAuthorizeCommentInterface;
pub use rejection::{AuthorizationOutcome, Rejection};
