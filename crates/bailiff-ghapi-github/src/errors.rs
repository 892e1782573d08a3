use bailiff_ghapi_interface::ApiError;

/// GitHub client error.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names, missing_docs)]
pub enum GitHubError {
    #[error(transparent)]
    HttpError { source: reqwest::Error },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        GitHubError::HttpError { source: e }
    }
}

impl From<GitHubError> for ApiError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::NotFound { resource } => ApiError::NotFound { resource },
            e => ApiError::ImplementationError { source: e.into() },
        }
    }
}
