//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use bailiff_config::Config;
use clap::Subcommand;
use tokio::sync::RwLock;

use self::{server::ServerCommand, utils::UtilsCommand};
use crate::Result;

mod server;
mod utils;

pub(crate) struct CommandContext {
    /// Environment configuration, completed by each command.
    pub config: Config,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    Utils(UtilsCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::Utils(sub) => sub.execute(ctx).await,
        }
    }
}
