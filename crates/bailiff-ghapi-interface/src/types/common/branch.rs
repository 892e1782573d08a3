use serde::{Deserialize, Serialize};

use super::GhRepository;

/// GitHub Branch.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhBranch {
    #[serde(rename = "ref")]
    /// Reference.
    pub reference: String,
    /// SHA.
    pub sha: String,
    /// Repository holding the branch, absent when it was deleted.
    pub repo: Option<GhRepository>,
}
