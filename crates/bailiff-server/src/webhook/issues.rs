//! Issue webhook handlers.

use actix_web::HttpResponse;
use bailiff_core::{
    use_cases::authorization::{AuthorizationOutcome, AuthorizeCommentInterface},
    RequestId,
};
use bailiff_ghapi_interface::types::GhIssueCommentEvent;
use shaku::HasComponent;
use tracing::error;

use super::ok_response;
use crate::{
    constants::REQUEST_TIMEOUT,
    metrics::{SUCCESS_RESULT, UNKNOWN_RESULT},
    server::AppContext,
    Result, ServerError,
};

pub(crate) async fn issue_comment_event(
    ctx: &AppContext,
    request_id: &RequestId,
    event: &GhIssueCommentEvent,
) -> Result<HttpResponse> {
    let core_ctx = ctx.as_core_context();
    let authorize_comment: &dyn AuthorizeCommentInterface = ctx.core_module.resolve_ref();

    let result = tokio::time::timeout(
        REQUEST_TIMEOUT,
        authorize_comment.run(&core_ctx, request_id, event),
    )
    .await;

    match result {
        Ok(Ok(AuthorizationOutcome::Authorized(_))) => {
            ctx.metrics.record_processed_pr(SUCCESS_RESULT);
            Ok(ok_response())
        }
        Ok(Ok(AuthorizationOutcome::Rejected(rejection))) => {
            ctx.metrics.record_processed_pr(rejection.label());
            Ok(ok_response())
        }
        Ok(Err(e)) => {
            ctx.metrics.record_processed_pr(UNKNOWN_RESULT);
            error!(
                request_id = %request_id,
                error = %e,
                message = "Failed to process issue comment"
            );
            Err(e.into())
        }
        Err(_) => {
            ctx.metrics.record_processed_pr(UNKNOWN_RESULT);
            error!(
                request_id = %request_id,
                timeout_secs = REQUEST_TIMEOUT.as_secs(),
                message = "Issue comment processing timed out"
            );
            Err(ServerError::Timeout)
        }
    }
}
