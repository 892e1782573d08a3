//! Utils commands.

mod branch_name;

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use self::branch_name::BranchNameCommand;
use super::{Command, CommandContext};
use crate::Result;

/// Utils related commands
#[derive(Parser)]
pub(crate) struct UtilsCommand {
    #[clap(subcommand)]
    inner: UtilsSubCommand,
}

#[async_trait]
impl Command for UtilsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum UtilsSubCommand {
    BranchName(BranchNameCommand),
}

#[async_trait]
impl Command for UtilsSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::BranchName(sub) => sub.execute(ctx).await,
        }
    }
}
