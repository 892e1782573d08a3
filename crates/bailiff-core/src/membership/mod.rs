//! Privileged team membership.

mod cache;

use async_trait::async_trait;
pub use cache::TeamMembershipCache;

/// Answers whether a login belongs to a privileged team.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MembershipService: Send + Sync {
    async fn is_member(&self, login: &str) -> bool;
}
