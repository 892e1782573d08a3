//! Auth.

use std::time::Duration;

use bailiff_config::Config;
use http::{header, HeaderMap};
use reqwest::ClientBuilder;

use crate::errors::GitHubError;

const GITHUB_ACCEPT_HEADER: &str = "application/vnd.github+json";
const GITHUB_API_VERSION_HEADER: &str = "x-github-api-version";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Get an authenticated GitHub client builder.
pub fn get_authenticated_client_builder(config: &Config) -> Result<ClientBuilder, GitHubError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(GITHUB_ACCEPT_HEADER),
    );
    headers.insert(
        GITHUB_API_VERSION_HEADER,
        header::HeaderValue::from_static(GITHUB_API_VERSION),
    );

    let mut authorization = header::HeaderValue::from_str(&format!("Bearer {}", config.api.token))
        .map_err(|e| GitHubError::ImplementationError { source: e.into() })?;
    authorization.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, authorization);

    Ok(ClientBuilder::new()
        .connect_timeout(Duration::from_millis(config.api.connect_timeout))
        .timeout(Duration::from_millis(config.api.request_timeout))
        .user_agent(format!("bailiff/{}", config.version))
        .default_headers(headers))
}

/// Build a GitHub URL.
pub fn build_github_url<T: Into<String>>(config: &Config, path: T) -> String {
    format!(
        "{}{}",
        config.api.root_url.trim_end_matches('/'),
        path.into()
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_build_github_url() {
        let mut config = Config::from_env_no_version();
        config.api.root_url = "http://localhost:1234/".into();

        assert_eq!(
            build_github_url(&config, "/repos/me/test/pulls/1"),
            "http://localhost:1234/repos/me/test/pulls/1"
        );
    }

    #[test]
    fn test_get_authenticated_client_builder() {
        let mut config = Config::from_env_no_version();
        config.api.token = "abcdef".into();

        get_authenticated_client_builder(&config)
            .unwrap()
            .build()
            .unwrap();
    }

    #[test]
    fn test_get_authenticated_client_builder_invalid_token() {
        let mut config = Config::from_env_no_version();
        config.api.token = "abc\ndef".into();

        assert!(matches!(
            get_authenticated_client_builder(&config),
            Err(GitHubError::ImplementationError { .. })
        ));
    }
}
