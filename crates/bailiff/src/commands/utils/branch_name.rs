use async_trait::async_trait;
use bailiff_core::mirror::dest_branch_name;
use clap::Parser;

use super::{Command, CommandContext};
use crate::Result;

/// Show the trusted repository branch a fork branch is mirrored to
#[derive(Parser)]
pub(crate) struct BranchNameCommand {
    /// Fork repository, as "owner/name"
    fork_repo: String,
    /// Fork branch
    source_branch: String,
}

#[async_trait]
impl Command for BranchNameCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        writeln!(
            ctx.writer.write().await,
            "{}",
            dest_branch_name(&self.fork_repo, &self.source_branch)
        )?;

        Ok(())
    }
}
