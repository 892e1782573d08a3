use serde::{Deserialize, Serialize};

use super::GhPullRequestState;
use crate::types::common::GhBranch;

/// GitHub Pull request.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhPullRequest {
    /// Number.
    pub number: u64,
    /// State.
    pub state: GhPullRequestState,
    /// Head branch.
    pub head: GhBranch,
}
