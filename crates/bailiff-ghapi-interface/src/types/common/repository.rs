use serde::{Deserialize, Serialize};

/// GitHub Repository.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GhRepository {
    /// Name.
    pub name: String,
    /// Full name, as `owner/name`.
    pub full_name: String,
}
