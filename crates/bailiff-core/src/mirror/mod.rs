//! Mirroring of fork commits into the trusted repository.

mod git;
mod runner;
mod target;

use async_trait::async_trait;
pub use git::GitMirror;
#[cfg(any(test, feature = "testkit"))]
pub use runner::MockCommandRunner;
pub use runner::{CommandRunner, ProcessRunner};
pub use target::{dest_branch_name, RepushTarget, EXTERNAL_FORK_BRANCH_PREFIX};

use crate::MirrorError;

/// Exclusive mirror of fork branches into the trusted repository.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MirrorService: Send + Sync {
    /// Clone the trusted repository. Must succeed before any `mirror` call.
    async fn initialize(&self, repo_url: &str) -> Result<(), MirrorError>;
    /// Fetch, verify then push one fork commit.
    async fn mirror(&self, target: &RepushTarget) -> Result<(), MirrorError>;
}
