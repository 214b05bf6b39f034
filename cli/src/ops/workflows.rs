use anyhow::Context;
use clap::Subcommand;
use serde_json::Value;
use sortha_core::routes::{ExecuteWorkflow, GetAllWorkflows, GetStatus};

use super::OpContext;

#[derive(Subcommand, Debug, Clone)]
pub enum Workflows {
    /// List registered workflows
    List,
    /// Start a workflow run
    Run {
        id: u64,
        /// Workflow inputs as JSON, e.g. '{"inputs":{"transcript_file":{"type":"text","file_id":14}}}'
        #[arg(long)]
        input: String,
    },
    /// Show the status and result of a run
    Status { request_id: String },
}

impl Workflows {
    pub async fn execute(&self, ctx: &OpContext) -> anyhow::Result<String> {
        let decoded = match self {
            Workflows::List => ctx.call(&GetAllWorkflows).await?,
            Workflows::Run { id, input } => {
                let input_data: Value =
                    serde_json::from_str(input).context("--input must be valid JSON")?;
                ctx.call(&ExecuteWorkflow::with_inputs(*id, input_data)?)
                    .await?
            }
            Workflows::Status { request_id } => ctx.call(&GetStatus::new(request_id)).await?,
        };
        Ok(decoded.to_string())
    }
}
