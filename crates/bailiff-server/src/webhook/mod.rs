//! Webhook handlers.

mod issues;

#[cfg(test)]
mod tests;

use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use bailiff_core::RequestId;
use tracing::info;

use crate::{
    constants::GITHUB_EVENT_HEADER,
    event_type::{EventType, WebhookEvent},
    server::AppContext,
    Result, ServerError,
};

fn extract_event_from_request(req: &HttpRequest) -> Option<EventType> {
    req.headers()
        .get(GITHUB_EVENT_HEADER)
        .and_then(|x| x.to_str().ok())
        .filter(|x| !x.is_empty())
        .map(EventType::from)
}

pub(crate) fn ok_response() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("ok")
}

#[tracing::instrument(skip_all, fields(event_type))]
pub(crate) async fn event_handler(
    req: HttpRequest,
    body: web::Bytes,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse> {
    let event_type = extract_event_from_request(&req).ok_or(ServerError::MissingEventType)?;
    tracing::Span::current().record("event_type", event_type.as_str());

    let event = WebhookEvent::parse(&event_type, &body)?;
    ctx.metrics.record_received_webhook(event_type.as_str());

    let request_id = req
        .extensions()
        .get::<RequestId>()
        .cloned()
        .unwrap_or_else(RequestId::generate);

    match event {
        WebhookEvent::IssueComment(event) => {
            issues::issue_comment_event(&ctx, &request_id, &event).await
        }
        WebhookEvent::Ping => {
            info!(request_id = %request_id, message = "Received ping");
            Ok(ok_response())
        }
        WebhookEvent::Unhandled(name) => {
            info!(
                request_id = %request_id,
                event_type = %name,
                message = "Ignoring unhandled event"
            );
            Ok(ok_response())
        }
    }
}
