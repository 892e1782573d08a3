//! Logic errors.

use std::process::ExitStatus;

use thiserror::Error;

/// Logic error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    /// Wraps [`regex::Error`].
    #[error("Error while compiling regex: {source}")]
    RegexError { source: regex::Error },

    #[error("Trigger pattern '{pattern}' has no 'sha' capture group")]
    MissingShaGroup { pattern: String },

    /// Wraps [`bailiff_ghapi_interface::ApiError`].
    #[error("API error: {source}")]
    ApiError {
        source: bailiff_ghapi_interface::ApiError,
    },

    #[error("Mirror error: {source}")]
    MirrorError { source: MirrorError },

    #[error("Membership error: {source}")]
    MembershipError { source: MembershipError },
}

/// Membership cache error.
#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("Could not list members of team '{team}': {source}")]
    TeamSyncFailed {
        team: String,
        source: bailiff_ghapi_interface::ApiError,
    },

    #[error("Membership refresh cancelled")]
    Cancelled,

    #[error("Membership refresh interval must be non-zero")]
    InvalidPeriod,
}

/// Mirror error.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Mirror is not initialized")]
    NotInitialized,

    #[error("Could not start command '{command}': {source}")]
    SpawnFailed {
        command: String,
        source: std::io::Error,
    },

    #[error("Command '{command}' failed: {status}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("Fetched commit '{actual}' does not match expected commit '{expected}'")]
    ShaMismatch { expected: String, actual: String },

    #[error("I/O error while running command '{command}': {source}")]
    Io {
        command: String,
        source: std::io::Error,
    },
}

impl From<regex::Error> for DomainError {
    fn from(e: regex::Error) -> Self {
        Self::RegexError { source: e }
    }
}

impl From<bailiff_ghapi_interface::ApiError> for DomainError {
    fn from(e: bailiff_ghapi_interface::ApiError) -> Self {
        Self::ApiError { source: e }
    }
}

impl From<MirrorError> for DomainError {
    fn from(e: MirrorError) -> Self {
        Self::MirrorError { source: e }
    }
}

impl From<MembershipError> for DomainError {
    fn from(e: MembershipError) -> Self {
        Self::MembershipError { source: e }
    }
}

/// Result alias for `DomainError`.
pub type Result<T, E = DomainError> = core::result::Result<T, E>;
