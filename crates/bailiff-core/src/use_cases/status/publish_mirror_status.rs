use async_trait::async_trait;
use bailiff_ghapi_interface::types::GhCommitStatusState;
use shaku::{Component, Interface};

use crate::{mirror::RepushTarget, CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait PublishMirrorStatusInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, target: &RepushTarget) -> Result<()>;
}

#[derive(Component)]
#[shaku(interface = PublishMirrorStatusInterface)]
pub(crate) struct PublishMirrorStatus;

#[async_trait]
impl PublishMirrorStatusInterface for PublishMirrorStatus {
    #[tracing::instrument(skip_all, fields(sha = target.expected_sha()))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, target: &RepushTarget) -> Result<()> {
        let repository = &ctx.config.repository;
        ctx.api_service
            .commit_statuses_update(
                &repository.org,
                &repository.repo,
                target.expected_sha(),
                GhCommitStatusState::Success,
                &repository.status_name,
                &format!(
                    "Successfully repushed {} at {}.",
                    target.source_branch(),
                    target.expected_sha()
                ),
            )
            .await?;

        Ok(())
    }
}
