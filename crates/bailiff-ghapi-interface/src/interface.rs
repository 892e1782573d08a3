use async_trait::async_trait;

use crate::{
    types::{GhCommitStatusState, GhPullRequest, GhUser},
    Result,
};

/// GitHub API Adapter interface
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Get a pull request by number.
    async fn pulls_get(&self, owner: &str, name: &str, issue_number: u64)
        -> Result<GhPullRequest>;
    /// List every member of an organization team.
    async fn team_members_list(&self, org: &str, team_slug: &str) -> Result<Vec<GhUser>>;
    /// Create a commit status on a commit.
    async fn commit_statuses_update(
        &self,
        owner: &str,
        name: &str,
        git_ref: &str,
        status: GhCommitStatusState,
        title: &str,
        body: &str,
    ) -> Result<()>;
}
