//! GitHub adapter

use async_trait::async_trait;
use bailiff_config::Config;
use bailiff_ghapi_interface::{
    types::{GhCommitStatusState, GhPullRequest, GhUser},
    ApiService, Result,
};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;

use crate::{
    auth::{build_github_url, get_authenticated_client_builder},
    errors::GitHubError,
};

const MAX_STATUS_DESCRIPTION_LEN: usize = 139;
const TEAM_MEMBERS_PAGE_SIZE: usize = 100;

/// GitHub API adapter implementation.
#[derive(Clone)]
pub struct GithubApiService {
    config: Config,
    client: Client,
}

impl GithubApiService {
    /// Creates new GitHub API adapter.
    pub fn new(config: Config) -> Result<Self, GitHubError> {
        let client = get_authenticated_client_builder(&config)?.build()?;
        Ok(Self { config, client })
    }

    fn build_url(&self, path: String) -> String {
        build_github_url(&self.config, path)
    }

    /// Map a 404 to `NotFound`, and any other failure status to an HTTP error.
    fn check_status(response: Response, resource: &str) -> Result<Response, GitHubError> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound {
                resource: resource.to_string(),
            });
        }

        Ok(response.error_for_status()?)
    }

    async fn get_pull_request(
        &self,
        owner: &str,
        name: &str,
        issue_number: u64,
    ) -> Result<GhPullRequest, GitHubError> {
        let response = self
            .client
            .get(&self.build_url(format!("/repos/{owner}/{name}/pulls/{issue_number}")))
            .send()
            .await?;

        Ok(
            Self::check_status(response, &format!("pull request {owner}/{name}#{issue_number}"))?
                .json()
                .await?,
        )
    }

    async fn list_team_members(
        &self,
        org: &str,
        team_slug: &str,
    ) -> Result<Vec<GhUser>, GitHubError> {
        let mut members = Vec::new();
        let mut page = 1;

        loop {
            let response = self
                .client
                .get(&self.build_url(format!("/orgs/{org}/teams/{team_slug}/members")))
                .query(&[
                    ("per_page", TEAM_MEMBERS_PAGE_SIZE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .await?;

            let batch: Vec<GhUser> =
                Self::check_status(response, &format!("team {org}/{team_slug}"))?
                    .json()
                    .await?;
            let batch_len = batch.len();
            members.extend(batch);

            if batch_len < TEAM_MEMBERS_PAGE_SIZE {
                return Ok(members);
            }

            page += 1;
        }
    }

    async fn create_commit_status(
        &self,
        owner: &str,
        name: &str,
        git_ref: &str,
        status: GhCommitStatusState,
        title: &str,
        body: &str,
    ) -> Result<(), GitHubError> {
        #[derive(Serialize)]
        struct Request<'a> {
            state: &'a str,
            description: String,
            context: &'a str,
        }

        self.client
            .post(&self.build_url(format!("/repos/{owner}/{name}/statuses/{git_ref}")))
            .json(&Request {
                state: status.to_str(),
                context: title,
                description: body
                    .chars()
                    .take(MAX_STATUS_DESCRIPTION_LEN)
                    .collect::<String>(),
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[async_trait]
impl ApiService for GithubApiService {
    #[tracing::instrument(skip(self), ret)]
    async fn pulls_get(
        &self,
        owner: &str,
        name: &str,
        issue_number: u64,
    ) -> Result<GhPullRequest> {
        self.get_pull_request(owner, name, issue_number)
            .await
            .map_err(Into::into)
    }

    #[tracing::instrument(skip(self))]
    async fn team_members_list(&self, org: &str, team_slug: &str) -> Result<Vec<GhUser>> {
        self.list_team_members(org, team_slug)
            .await
            .map_err(Into::into)
    }

    #[tracing::instrument(skip(self))]
    async fn commit_statuses_update(
        &self,
        owner: &str,
        name: &str,
        git_ref: &str,
        status: GhCommitStatusState,
        title: &str,
        body: &str,
    ) -> Result<()> {
        self.create_commit_status(owner, name, git_ref, status, title, body)
            .await
            .map_err(Into::into)
    }
}
