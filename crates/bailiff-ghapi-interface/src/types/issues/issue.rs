use serde::{Deserialize, Serialize};

/// GitHub Issue.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhIssue {
    /// Number.
    pub number: u64,
    /// Pull request linkage, present when the issue is a pull request.
    pub pull_request: Option<GhIssuePullRequest>,
}

/// GitHub Issue pull request linkage.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhIssuePullRequest {
    /// API URL.
    #[serde(default)]
    pub url: String,
}
