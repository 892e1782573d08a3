//! Config module.

mod file;

use std::{env, path::Path};

use thiserror::Error;

pub use file::{
    FileConfig, DEFAULT_GREETING_TEMPLATE, DEFAULT_LISTEN_ADDR, DEFAULT_STATUS_NAME,
    DEFAULT_TRIGGER_PATTERN,
};

/// Config error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error opening config file '{path}': {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
    #[error("Error decoding config file: {source}")]
    InvalidFile { source: serde_yaml::Error },
}

#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Trusted organization.
    pub org: String,
    /// Trusted repository.
    pub repo: String,
    /// Teams allowed to authorize pull requests.
    pub admin_teams: Vec<String>,
    /// Trigger pattern.
    pub trigger_pattern: String,
    /// Commit status context.
    pub status_name: String,
    /// Greeting template.
    pub greeting_template: String,
}

impl RepositoryConfig {
    /// Full name of the trusted repository, as `org/repo`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// GitHub API connect timeout (in milliseconds).
    pub connect_timeout: u64,
    /// GitHub API request timeout (in milliseconds).
    pub request_timeout: u64,
    /// GitHub API root URL.
    pub root_url: String,
    /// GitHub API token.
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Git host used for SSH remotes.
    pub git_host: String,
    /// Private key used by git over SSH.
    pub private_key_file: String,
}

#[derive(Debug, Clone)]
pub struct MembershipConfig {
    /// Membership refresh interval (in seconds).
    pub refresh_interval: u64,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address.
    pub bind_address: String,
    /// Server workers count.
    pub workers_count: Option<u16>,
    /// Server webhook secret.
    pub webhook_secret: String,
    /// Disable webhook signature verification.
    pub disable_webhook_signature: bool,
}

/// Bailiff configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Trusted repository options.
    pub repository: RepositoryConfig,
    /// API options.
    pub api: ApiConfig,
    /// Mirror options.
    pub mirror: MirrorConfig,
    /// Membership options.
    pub membership: MembershipConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Server options.
    pub server: ServerConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment, with file defaults.
    pub fn from_env(version: String) -> Config {
        Self::from_file_config(FileConfig::default(), version)
    }

    pub fn from_env_no_version() -> Self {
        Self::from_env("0.0.0".into())
    }

    /// Create configuration from a YAML file, completed by environment.
    pub fn from_file(path: &Path, version: String) -> Result<Config, ConfigError> {
        FileConfig::read(path).map(|file| Self::from_file_config(file, version))
    }

    /// Create configuration from parsed file contents, completed by environment.
    pub fn from_file_config(file: FileConfig, version: String) -> Config {
        Config {
            repository: RepositoryConfig {
                org: file.org,
                repo: file.repo,
                admin_teams: file.admin_teams,
                trigger_pattern: file.trigger_pattern,
                status_name: file.status_name,
                greeting_template: file.greeting_template,
            },
            api: ApiConfig {
                connect_timeout: env_to_u64("BAILIFF_API_GITHUB_CONNECT_TIMEOUT", 5000),
                request_timeout: env_to_u64("BAILIFF_API_GITHUB_REQUEST_TIMEOUT", 30000),
                root_url: env_to_str("BAILIFF_API_GITHUB_ROOT_URL", "https://api.github.com"),
                token: String::new(),
            },
            mirror: MirrorConfig {
                git_host: env_to_str("BAILIFF_GIT_HOST", "github.com"),
                private_key_file: String::new(),
            },
            membership: MembershipConfig {
                refresh_interval: env_to_u64("BAILIFF_MEMBERSHIP_REFRESH_INTERVAL", 60),
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("BAILIFF_LOGGING_USE_BUNYAN", false),
            },
            server: ServerConfig {
                bind_address: file.listen_addr,
                workers_count: env_to_optional_u16("BAILIFF_SERVER_WORKERS_COUNT", None),
                webhook_secret: String::new(),
                disable_webhook_signature: env_to_bool(
                    "BAILIFF_SERVER_DISABLE_WEBHOOK_SIGNATURE",
                    false,
                ),
            },
            version,
        }
    }

    /// SSH URL of the trusted repository.
    pub fn clone_url(&self) -> String {
        format!(
            "git@{}:{}.git",
            self.mirror.git_host,
            self.repository.full_name()
        )
    }
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_e| default.to_string())
}
