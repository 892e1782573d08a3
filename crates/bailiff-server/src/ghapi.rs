//! GitHub Api wrappers.

use async_trait::async_trait;
use bailiff_ghapi_interface::{
    types::{GhCommitStatusState, GhPullRequest, GhUser},
    ApiService, Result,
};
use prometheus::IntCounter;

/// Api service counting outgoing calls.
pub struct MetricsApiService<T> {
    inner: T,
    calls: IntCounter,
}

impl<T: ApiService> MetricsApiService<T> {
    /// Wrap a service.
    pub fn new(inner: T, calls: IntCounter) -> Self {
        Self { inner, calls }
    }
}

#[async_trait]
impl<T: ApiService> ApiService for MetricsApiService<T> {
    async fn pulls_get(&self, owner: &str, name: &str, issue_number: u64) -> Result<GhPullRequest> {
        self.calls.inc();
        self.inner.pulls_get(owner, name, issue_number).await
    }

    async fn team_members_list(&self, org: &str, team_slug: &str) -> Result<Vec<GhUser>> {
        self.calls.inc();
        self.inner.team_members_list(org, team_slug).await
    }

    async fn commit_statuses_update(
        &self,
        owner: &str,
        name: &str,
        git_ref: &str,
        status: GhCommitStatusState,
        title: &str,
        body: &str,
    ) -> Result<()> {
        self.calls.inc();
        self.inner
            .commit_statuses_update(owner, name, git_ref, status, title, body)
            .await
    }
}
