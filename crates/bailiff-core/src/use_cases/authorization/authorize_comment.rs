use async_trait::async_trait;
use bailiff_ghapi_interface::{
    types::{GhIssueCommentAction, GhIssueCommentEvent, GhPullRequestState},
    ApiError,
};
use shaku::{Component, HasComponent, Interface};
use tracing::info;

use super::{AuthorizationOutcome, Rejection};
use crate::{
    mirror::RepushTarget, use_cases::status::PublishMirrorStatusInterface, CoreContext,
    RequestId, Result,
};

/// Maximum comment length, in characters.
pub const MAX_COMMENT_LENGTH: usize = 1024;

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait AuthorizeCommentInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        request_id: &RequestId,
        event: &GhIssueCommentEvent,
    ) -> Result<AuthorizationOutcome>;
}

#[derive(Component)]
#[shaku(interface = AuthorizeCommentInterface)]
pub(crate) struct AuthorizeComment;

#[async_trait]
impl AuthorizeCommentInterface for AuthorizeComment {
    #[tracing::instrument(skip_all, fields(
        request_id = %request_id,
        action = ?event.action,
        sender = event.sender.login,
        number = event.issue.as_ref().map(|issue| issue.number)
    ))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        request_id: &RequestId,
        event: &GhIssueCommentEvent,
    ) -> Result<AuthorizationOutcome> {
        let outcome = self.authorize(ctx, event).await?;

        match &outcome {
            AuthorizationOutcome::Rejected(rejection) => {
                info!(
                    request_id = %request_id,
                    reason = rejection.label(),
                    message = "Dropped authorization request"
                );
            }
            AuthorizationOutcome::Authorized(target) => {
                info!(
                    request_id = %request_id,
                    fork_repo = target.fork_repo(),
                    source_branch = target.source_branch(),
                    dest_branch = target.dest_branch(),
                    sha = target.expected_sha(),
                    message = "Authorized fork pull request"
                );
            }
        }

        Ok(outcome)
    }
}

impl AuthorizeComment {
    async fn authorize(
        &self,
        ctx: &CoreContext<'_>,
        event: &GhIssueCommentEvent,
    ) -> Result<AuthorizationOutcome> {
        use AuthorizationOutcome::Rejected;

        let Some(issue) = &event.issue else {
            return Ok(Rejected(Rejection::NoIssue));
        };
        if issue.pull_request.is_none() {
            return Ok(Rejected(Rejection::NotPullRequest));
        }
        if event.action != GhIssueCommentAction::Created {
            return Ok(Rejected(Rejection::NotCreation));
        }

        let repository = &ctx.config.repository;
        let upstream_pr = match ctx
            .api_service
            .pulls_get(&repository.org, &repository.repo, issue.number)
            .await
        {
            Ok(pr) => pr,
            Err(ApiError::NotFound { .. }) => return Ok(Rejected(Rejection::PullRequestNotFound)),
            Err(e) => return Err(e.into()),
        };

        if upstream_pr.state != GhPullRequestState::Open {
            return Ok(Rejected(Rejection::PullRequestNotOpen));
        }

        let head_repo = upstream_pr
            .head
            .repo
            .as_ref()
            .map(|repo| repo.full_name.as_str())
            .unwrap_or_default();
        if head_repo == repository.full_name() {
            return Ok(Rejected(Rejection::PullRequestFromUpstream));
        }

        if !ctx.membership_service.is_member(&event.sender.login).await {
            return Ok(Rejected(Rejection::NonWhitelisted));
        }

        let body = &event.comment.body;
        if body.chars().count() > MAX_COMMENT_LENGTH {
            return Ok(Rejected(Rejection::CommentTooLong));
        }

        let Some(requested_sha) = ctx.trigger_pattern.find_sha(body) else {
            return Ok(Rejected(Rejection::NoTriggerPattern));
        };
        if requested_sha != upstream_pr.head.sha {
            return Ok(Rejected(Rejection::MismatchedSha));
        }

        let target = RepushTarget::new(
            head_repo.to_string(),
            upstream_pr.head.reference.clone(),
            upstream_pr.head.sha.clone(),
        );
        ctx.mirror_service.mirror(&target).await?;

        let publish_mirror_status: &dyn PublishMirrorStatusInterface =
            ctx.core_module.resolve_ref();
        publish_mirror_status.run(ctx, &target).await?;

        Ok(AuthorizationOutcome::Authorized(target))
    }
}
