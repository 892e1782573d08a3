use serde::{Deserialize, Serialize};

use crate::types::GhUser;

/// GitHub Issue comment.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhIssueComment {
    /// ID.
    pub id: u64,
    /// Body.
    pub body: String,
    /// Author.
    pub user: GhUser,
}
