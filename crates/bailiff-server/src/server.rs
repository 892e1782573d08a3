//! Server module.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web::{self, Data},
    App, HttpServer,
};
use actix_web_prom::PrometheusMetrics;
use bailiff_config::Config;
use bailiff_core::{
    membership::MembershipService, mirror::MirrorService, CoreContext, CoreModule, TriggerPattern,
};
use bailiff_ghapi_interface::ApiService;
use tracing::info;

use crate::{
    constants::{HEALTH_CHECK_PATH, MAX_PAYLOAD_SIZE, REQUEST_TIMEOUT},
    health::health_check_route,
    metrics::{build_metrics_handler, ServerMetrics},
    middlewares::{RequestIdentifier, VerifySignature},
    webhook::event_handler,
    Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// Compiled trigger pattern.
    pub trigger_pattern: TriggerPattern,
    /// API adapter.
    pub api_service: Arc<dyn ApiService>,
    /// Team membership cache.
    pub membership_service: Arc<dyn MembershipService>,
    /// Repository mirror.
    pub mirror_service: Arc<dyn MirrorService>,
    /// Application counters.
    pub metrics: ServerMetrics,
}

impl AppContext {
    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        core_module: CoreModule,
        trigger_pattern: TriggerPattern,
        api_service: Arc<dyn ApiService>,
        membership_service: Arc<dyn MembershipService>,
        mirror_service: Arc<dyn MirrorService>,
        metrics: ServerMetrics,
    ) -> Self {
        Self {
            config,
            core_module,
            trigger_pattern,
            api_service,
            membership_service,
            mirror_service,
            metrics,
        }
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            trigger_pattern: &self.trigger_pattern,
            api_service: self.api_service.as_ref(),
            membership_service: self.membership_service.as_ref(),
            mirror_service: self.mirror_service.as_ref(),
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
    prometheus: PrometheusMetrics,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(context.clone())
        .app_data(web::PayloadConfig::new(MAX_PAYLOAD_SIZE))
        .wrap(RequestIdentifier)
        .wrap(prometheus)
        .service(
            web::scope("")
                .wrap(VerifySignature::new(&context.config.server))
                .service(
                    web::resource(HEALTH_CHECK_PATH)
                        .route(web::get().to(health_check_route))
                        .default_service(web::to(event_handler)),
                )
                .default_service(web::to(event_handler)),
        )
}

/// Run bot server.
///
/// Returns once the server stopped, after in-flight requests were given
/// the processing timeout to complete.
pub async fn run_bot_server(context: AppContext) -> Result<()> {
    let address = context.config.server.bind_address.clone();

    info!(
        version = context.config.version,
        address = %address,
        repository = context.config.repository.full_name(),
        message = "Starting bot server",
    );

    let prometheus = build_metrics_handler(&context.metrics)?;
    let workers_count = context.config.server.workers_count;
    let context = Data::new(context);

    let mut server = HttpServer::new(move || build_actix_app(context.clone(), prometheus.clone()))
        .shutdown_timeout(REQUEST_TIMEOUT.as_secs());

    if let Some(workers) = workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(address)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })?;

    info!(message = "Bot server stopped");
    Ok(())
}
