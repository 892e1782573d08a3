#![allow(clippy::type_complexity)]

use std::{pin::Pin, rc::Rc};

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web::BytesMut,
    Error, HttpMessage,
};
use bailiff_config::ServerConfig;
use bailiff_crypto::Signature;
use futures::{
    future::{ok, Ready},
    stream::StreamExt,
    Future,
};
use tracing::warn;

use crate::{
    constants::{
        GITHUB_SIGNATURE_HEADER, HEALTH_CHECK_PATH, MAX_PAYLOAD_SIZE, SIGNATURE_PREFIX,
    },
    ServerError,
};

/// Signature verification configuration.
pub struct VerifySignature {
    secret: Option<String>,
}

impl VerifySignature {
    /// Create a new configuration.
    pub fn new(config: &ServerConfig) -> Self {
        let secret = if config.disable_webhook_signature {
            warn!("Signature verification is disabled. This can be a security concern.");
            None
        } else if config.webhook_secret.is_empty() {
            warn!("Webhook secret is empty. Disabling signature verification.");
            None
        } else {
            Some(config.webhook_secret.clone())
        };

        Self { secret }
    }
}

impl<S, B> Transform<S, ServiceRequest> for VerifySignature
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = VerifySignatureMiddleware<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(VerifySignatureMiddleware {
            secret: self.secret.clone(),
            service: Rc::new(service),
        })
    }
}

/// Signature verification middleware.
pub struct VerifySignatureMiddleware<S> {
    secret: Option<String>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for VerifySignatureMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    type Response = ServiceResponse<B>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        // Liveness checks are never signed.
        let secret = if req.method() == Method::GET && req.path() == HEALTH_CHECK_PATH {
            None
        } else {
            self.secret.clone()
        };

        Box::pin(async move {
            if let Some(secret) = secret {
                let signature = req
                    .headers()
                    .get(GITHUB_SIGNATURE_HEADER)
                    .ok_or(ServerError::MissingWebhookSignature)?
                    .to_str()
                    .map_err(|_| ServerError::InvalidWebhookSignature)?
                    .strip_prefix(SIGNATURE_PREFIX)
                    .ok_or(ServerError::InvalidWebhookSignature)?
                    .to_owned();

                let mut body = BytesMut::new();
                let mut stream = req.take_payload();

                while let Some(chunk) = stream.next().await {
                    let chunk = chunk.map_err(|e| ServerError::InvalidPayload {
                        reason: e.to_string(),
                    })?;

                    if body.len() + chunk.len() > MAX_PAYLOAD_SIZE {
                        return Err(ServerError::PayloadTooLarge.into());
                    }

                    body.extend_from_slice(&chunk);
                }

                match Signature(&signature).is_valid(&body, &secret) {
                    Ok(true) => (),
                    Ok(false) | Err(_) => return Err(ServerError::InvalidWebhookSignature.into()),
                }

                let (_, mut payload) = actix_http::h1::Payload::create(true);
                payload.unread_data(body.freeze());
                req.set_payload(payload.into());
            }

            svc.call(req).await
        })
    }
}
