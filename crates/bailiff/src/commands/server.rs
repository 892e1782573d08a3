use std::{path::PathBuf, sync::Arc, time::Duration};

use async_trait::async_trait;
use bailiff_config::Config;
use bailiff_core::{
    membership::TeamMembershipCache,
    mirror::{GitMirror, MirrorService, ProcessRunner},
    CoreModule, TriggerPattern,
};
use bailiff_ghapi_github::GithubApiService;
use bailiff_ghapi_interface::ApiService;
use bailiff_server::{
    ghapi::MetricsApiService,
    metrics::ServerMetrics,
    server::{run_bot_server, AppContext},
};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::{Command, CommandContext};
use crate::{config_validator::validate_configuration, Result};

/// Start server
#[derive(Parser)]
pub(crate) struct ServerCommand {
    /// Configuration file
    #[arg(long, env = "BAILIFF_CONFIG_PATH", default_value = "config.yaml")]
    config_path: PathBuf,

    /// Webhook secret shared with GitHub
    #[arg(long, env = "BAILIFF_WEBHOOK_SECRET", hide_env_values = true, default_value = "")]
    webhook_secret: String,

    /// GitHub API token
    #[arg(long, env = "BAILIFF_GITHUB_TOKEN", hide_env_values = true, default_value = "")]
    github_token: String,

    /// SSH private key used to fetch forks and push mirrored branches
    #[arg(long, env = "BAILIFF_PRIVATE_KEY_FILE", default_value = "")]
    private_key_file: String,
}

impl ServerCommand {
    fn load_config(&self, env_config: &Config) -> Result<Config> {
        let mut config = Config::from_file(&self.config_path, env_config.version.clone())?;
        config.server.webhook_secret = self.webhook_secret.clone();
        config.api.token = self.github_token.clone();
        config.mirror.private_key_file = self.private_key_file.clone();

        validate_configuration(&config)?;
        Ok(config)
    }
}

#[async_trait]
impl Command for ServerCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let config = self.load_config(&ctx.config)?;
        let trigger_pattern = TriggerPattern::new(&config.repository.trigger_pattern)?;
        let metrics = ServerMetrics::new()?;

        let api_service: Arc<dyn ApiService> = Arc::new(MetricsApiService::new(
            GithubApiService::new(config.clone())?,
            metrics.github_api_calls.clone(),
        ));

        let working_dir = tempfile::Builder::new().prefix("bailiff-").tempdir()?;
        let mirror_service = Arc::new(GitMirror::new(
            ProcessRunner::git(&config.mirror.private_key_file),
            working_dir.path().to_path_buf(),
            config.mirror.git_host.clone(),
        ));

        info!(
            working_dir = %working_dir.path().display(),
            repository = config.repository.full_name(),
            message = "Cloning trusted repository"
        );
        mirror_service.initialize(&config.clone_url()).await?;

        let membership_service = Arc::new(TeamMembershipCache::new(
            config.repository.org.clone(),
            config.repository.admin_teams.clone(),
        ));

        let cancellation_token = CancellationToken::new();
        let refresh_loop = {
            let membership_service = membership_service.clone();
            let api_service = api_service.clone();
            let cancellation_token = cancellation_token.clone();
            let period = Duration::from_secs(config.membership.refresh_interval);

            tokio::spawn(async move {
                membership_service
                    .run_periodic(api_service.as_ref(), period, cancellation_token)
                    .await
            })
        };

        let context = AppContext::new_with_adapters(
            config,
            CoreModule::builder().build(),
            trigger_pattern,
            api_service,
            membership_service,
            mirror_service,
            metrics,
        );

        let server_result = run_bot_server(context).await;

        cancellation_token.cancel();
        if let Err(e) = refresh_loop.await? {
            warn!(error = %e, message = "Team membership refresh ended");
        }

        server_result?;
        Ok(())
    }
}
