//! Health check.

use actix_web::HttpResponse;

pub(crate) async fn health_check_route() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("ok")
}
