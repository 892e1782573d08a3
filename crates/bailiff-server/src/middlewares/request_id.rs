#![allow(clippy::type_complexity)]

use std::{pin::Pin, rc::Rc, time::Instant};

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::USER_AGENT,
    Error, HttpMessage,
};
use bailiff_core::RequestId;
use futures::{
    future::{ok, Ready},
    Future,
};
use tracing::{info, info_span, Instrument};

/// Assigns a [`RequestId`] to every request and logs served requests.
///
/// The identifier is stored in the request extensions, so handlers can
/// forward it to the core pipeline.
pub struct RequestIdentifier;

impl<S, B> Transform<S, ServiceRequest> for RequestIdentifier
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = RequestIdentifierMiddleware<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RequestIdentifierMiddleware {
            service: Rc::new(service),
        })
    }
}

/// Request identifier middleware.
pub struct RequestIdentifierMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestIdentifierMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    type Response = ServiceResponse<B>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let request_id = RequestId::generate();
        let span = info_span!("request", request_id = %request_id);

        let url = req.uri().to_string();
        let method = req.method().to_string();
        let user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        let remote_ip = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or_default()
            .to_owned();

        req.extensions_mut().insert(request_id);

        Box::pin(
            async move {
                let start = Instant::now();
                let result = svc.call(req).await;
                let status = match &result {
                    Ok(response) => response.status(),
                    Err(e) => e.as_response_error().status_code(),
                };

                info!(
                    url = %url,
                    method = %method,
                    status = status.as_u16(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    user_agent = %user_agent,
                    remote_ip = %remote_ip,
                    message = "served HTTP request"
                );

                result
            }
            .instrument(span),
        )
    }
}
