use std::path::Path;

use serde::Deserialize;
use smart_default::SmartDefault;

use crate::ConfigError;

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
/// Default trigger pattern.
pub const DEFAULT_TRIGGER_PATTERN: &str = r"(?m)^/ci authorize (?P<sha>[a-f0-9]+)$";
/// Default commit status context.
pub const DEFAULT_STATUS_NAME: &str = "bailiff";
/// Default greeting posted to external contributors.
pub const DEFAULT_GREETING_TEMPLATE: &str = "Hello! Thanks for your contribution. Someone on our team will be with you shortly to review your changes and authorize them to run in CI.\n\nAdditional changes will need to be authorized again.";

/// Configuration file contents.
#[derive(Debug, Clone, Deserialize, SmartDefault, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Listen address.
    #[default(DEFAULT_LISTEN_ADDR.to_string())]
    pub listen_addr: String,
    /// Teams whose members may authorize pull requests.
    pub admin_teams: Vec<String>,
    /// Trusted organization.
    pub org: String,
    /// Trusted repository.
    pub repo: String,
    /// Trigger pattern, with a `sha` capture group.
    #[default(DEFAULT_TRIGGER_PATTERN.to_string())]
    pub trigger_pattern: String,
    /// Greeting template.
    #[default(DEFAULT_GREETING_TEMPLATE.to_string())]
    pub greeting_template: String,
    /// Commit status context.
    #[default(DEFAULT_STATUS_NAME.to_string())]
    pub status_name: String,
}

impl FileConfig {
    /// Parse configuration from YAML contents.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(contents).map_err(|e| ConfigError::InvalidFile { source: e })
    }

    /// Read configuration from a YAML file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_yaml(&contents)
    }
}
