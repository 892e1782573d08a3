
use std::sync::Arc;

use actix_web::{
    dev::Service,
    http::StatusCode,
    test::{self, TestRequest},
    web::Data,
};
use bailiff_config::{Config, DEFAULT_TRIGGER_PATTERN};
use bailiff_core::{
    membership::MockMembershipService,
    mirror::{MockMirrorService, RepushTarget},
    use_cases::authorization::{
        AuthorizationOutcome, AuthorizeCommentInterface, MockAuthorizeCommentInterface, Rejection,
    },
    CoreModule, DomainError, MirrorError, TriggerPattern,
};
use bailiff_crypto::Signature;
use bailiff_ghapi_interface::MockApiService;
use pretty_assertions::assert_eq;

use self::fixtures::{ISSUE_COMMENT_CREATED_DATA, PING_EVENT_DATA};
use crate::{
    constants::{GITHUB_EVENT_HEADER, GITHUB_SIGNATURE_HEADER},
    metrics::{build_metrics_handler, ServerMetrics},
    server::{build_actix_app, AppContext},
};

const SECRET: &str = "iAmAsEcReTkEy";

fn arrange_context(authorize_comment: MockAuthorizeCommentInterface) -> AppContext {
    let mut config = Config::from_env_no_version();
    config.repository.org = "ethereum-optimism".into();
    config.repository.repo = "optimism".into();
    config.repository.admin_teams = vec!["editors".into()];
    config.server.webhook_secret = SECRET.into();
    config.server.disable_webhook_signature = false;

    AppContext::new_with_adapters(
        config,
        CoreModule::builder()
            .with_component_override::<dyn AuthorizeCommentInterface>(Box::new(authorize_comment))
            .build(),
        TriggerPattern::new(DEFAULT_TRIGGER_PATTERN).unwrap(),
        Arc::new(MockApiService::new()),
        Arc::new(MockMembershipService::new()),
        Arc::new(MockMirrorService::new()),
        ServerMetrics::new().unwrap(),
    )
}

fn never_called() -> MockAuthorizeCommentInterface {
    let mut mock = MockAuthorizeCommentInterface::new();
    mock.expect_run().never();
    mock
}

fn returning(outcome: AuthorizationOutcome) -> MockAuthorizeCommentInterface {
    let mut mock = MockAuthorizeCommentInterface::new();
    mock.expect_run()
        .once()
        .withf(|_, _, event| event.comment.user.login == "jenny")
        .return_once(move |_, _, _| Ok(outcome));
    mock
}

fn signed_request(event_type: &str, body: &str) -> TestRequest {
    let signature = Signature::sign(body.as_bytes(), SECRET).unwrap();

    TestRequest::post()
        .uri("/")
        .insert_header((GITHUB_EVENT_HEADER, event_type))
        .insert_header((GITHUB_SIGNATURE_HEADER, format!("sha256={signature}")))
        .set_payload(body.to_owned())
}

async fn send(ctx: AppContext, request: TestRequest) -> (StatusCode, String) {
    let prometheus = build_metrics_handler(&ctx.metrics).unwrap();
    let app = test::init_service(build_actix_app(Data::new(ctx), prometheus)).await;

    match app.call(request.to_request()).await {
        Ok(response) => {
            let status = response.status();
            let body = test::read_body(response).await;
            (status, String::from_utf8(body.to_vec()).unwrap())
        }
        Err(e) => {
            let response = e.error_response();
            let status = response.status();
            let body = actix_web::body::to_bytes(response.into_body())
                .await
                .unwrap();
            (status, String::from_utf8(body.to_vec()).unwrap())
        }
    }
}

#[actix_web::test]
async fn health_check() {
    let ctx = arrange_context(never_called());

    assert_eq!(
        send(ctx, TestRequest::get().uri("/healthz")).await,
        (StatusCode::OK, "ok".into())
    );
}

#[actix_web::test]
async fn health_path_accepts_signed_webhooks() {
    let ctx = arrange_context(never_called());
    let metrics = ctx.metrics.clone();
    let request = signed_request("ping", PING_EVENT_DATA).uri("/healthz");

    assert_eq!(send(ctx, request).await, (StatusCode::OK, "ok".into()));
    assert_eq!(
        metrics.received_webhooks.with_label_values(&["ping"]).get(),
        1
    );
}

#[actix_web::test]
async fn health_path_requires_signature_for_webhooks() {
    let ctx = arrange_context(never_called());
    let request = TestRequest::post()
        .uri("/healthz")
        .insert_header((GITHUB_EVENT_HEADER, "ping"))
        .set_payload(PING_EVENT_DATA);

    assert_eq!(
        send(ctx, request).await,
        (StatusCode::BAD_REQUEST, "invalid request".into())
    );
}

#[actix_web::test]
async fn missing_signature() {
    let ctx = arrange_context(never_called());
    let request = TestRequest::post()
        .uri("/")
        .insert_header((GITHUB_EVENT_HEADER, "issue_comment"))
        .set_payload(ISSUE_COMMENT_CREATED_DATA);

    assert_eq!(
        send(ctx, request).await,
        (StatusCode::BAD_REQUEST, "invalid request".into())
    );
}

#[actix_web::test]
async fn invalid_signature() {
    let ctx = arrange_context(never_called());
    let request = TestRequest::post()
        .uri("/")
        .insert_header((GITHUB_EVENT_HEADER, "issue_comment"))
        .insert_header((GITHUB_SIGNATURE_HEADER, "sha256=abcdef"))
        .set_payload(ISSUE_COMMENT_CREATED_DATA);

    assert_eq!(
        send(ctx, request).await,
        (StatusCode::BAD_REQUEST, "invalid request".into())
    );
}

#[actix_web::test]
async fn signature_is_checked_on_every_method() {
    let ctx = arrange_context(never_called());
    let request = TestRequest::put()
        .uri("/anything")
        .insert_header((GITHUB_EVENT_HEADER, "issue_comment"))
        .set_payload(ISSUE_COMMENT_CREATED_DATA);

    assert_eq!(
        send(ctx, request).await,
        (StatusCode::BAD_REQUEST, "invalid request".into())
    );
}

#[actix_web::test]
async fn missing_event_type() {
    let ctx = arrange_context(never_called());
    let signature = Signature::sign(ISSUE_COMMENT_CREATED_DATA.as_bytes(), SECRET).unwrap();
    let request = TestRequest::post()
        .uri("/")
        .insert_header((GITHUB_SIGNATURE_HEADER, format!("sha256={signature}")))
        .set_payload(ISSUE_COMMENT_CREATED_DATA);

    assert_eq!(
        send(ctx, request).await,
        (StatusCode::BAD_REQUEST, "invalid request".into())
    );
}

#[actix_web::test]
async fn invalid_payload() {
    let ctx = arrange_context(never_called());
    let metrics = ctx.metrics.clone();

    assert_eq!(
        send(ctx, signed_request("issue_comment", "{not json")).await,
        (StatusCode::BAD_REQUEST, "invalid request".into())
    );
    assert_eq!(
        metrics
            .received_webhooks
            .with_label_values(&["issue_comment"])
            .get(),
        0
    );
}

#[actix_web::test]
async fn ping_event() {
    let ctx = arrange_context(never_called());
    let metrics = ctx.metrics.clone();

    assert_eq!(
        send(ctx, signed_request("ping", PING_EVENT_DATA)).await,
        (StatusCode::OK, "ok".into())
    );
    assert_eq!(
        metrics.received_webhooks.with_label_values(&["ping"]).get(),
        1
    );
}

#[actix_web::test]
async fn unhandled_event() {
    let ctx = arrange_context(never_called());
    let metrics = ctx.metrics.clone();

    assert_eq!(
        send(ctx, signed_request("label", r#"{"action": "created"}"#)).await,
        (StatusCode::OK, "ok".into())
    );
    assert_eq!(
        metrics.received_webhooks.with_label_values(&["label"]).get(),
        1
    );
}

#[actix_web::test]
async fn issue_comment_rejected() {
    let ctx = arrange_context(returning(AuthorizationOutcome::Rejected(
        Rejection::NonWhitelisted,
    )));
    let metrics = ctx.metrics.clone();

    assert_eq!(
        send(ctx, signed_request("issue_comment", ISSUE_COMMENT_CREATED_DATA)).await,
        (StatusCode::OK, "ok".into())
    );
    assert_eq!(
        metrics
            .received_webhooks
            .with_label_values(&["issue_comment"])
            .get(),
        1
    );
    assert_eq!(
        metrics
            .processed_prs
            .with_label_values(&[Rejection::NonWhitelisted.label()])
            .get(),
        1
    );
}

#[actix_web::test]
async fn issue_comment_authorized() {
    let ctx = arrange_context(returning(AuthorizationOutcome::Authorized(
        RepushTarget::new(
            "jenny/optimism".into(),
            "feature".into(),
            "0aeca8c3".into(),
        ),
    )));
    let metrics = ctx.metrics.clone();

    assert_eq!(
        send(ctx, signed_request("issue_comment", ISSUE_COMMENT_CREATED_DATA)).await,
        (StatusCode::OK, "ok".into())
    );
    assert_eq!(
        metrics.processed_prs.with_label_values(&["success"]).get(),
        1
    );
}

#[actix_web::test]
async fn issue_comment_failure() {
    let mut authorize_comment = MockAuthorizeCommentInterface::new();
    authorize_comment.expect_run().once().return_once(|_, _, _| {
        Err(DomainError::MirrorError {
            source: MirrorError::NotInitialized,
        })
    });
    let ctx = arrange_context(authorize_comment);
    let metrics = ctx.metrics.clone();

    assert_eq!(
        send(ctx, signed_request("issue_comment", ISSUE_COMMENT_CREATED_DATA)).await,
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to process issue comment".into()
        )
    );
    assert_eq!(
        metrics.processed_prs.with_label_values(&["unknown"]).get(),
        1
    );
}

#[actix_web::test]
async fn disabled_signature_verification() {
    let mut ctx = arrange_context(never_called());
    ctx.config.server.disable_webhook_signature = true;
    let request = TestRequest::post()
        .uri("/")
        .insert_header((GITHUB_EVENT_HEADER, "ping"))
        .set_payload(PING_EVENT_DATA);

    assert_eq!(send(ctx, request).await, (StatusCode::OK, "ok".into()));
}

#[actix_web::test]
async fn metrics_endpoint() {
    let ctx = arrange_context(never_called());
    ctx.metrics.record_received_webhook("ping");

    let (status, body) = send(ctx, TestRequest::get().uri("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("bailiff_received_webhooks_total{event=\"ping\"} 1"));
}
