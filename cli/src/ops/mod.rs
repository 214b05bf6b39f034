pub mod files;
pub mod folders;
pub mod workflows;

pub use files::Files;
pub use folders::Folders;
pub use workflows::Workflows;

use sortha_core::{Client, Decoded, Route};

use crate::args::Command;

/// Everything a command needs. Built once in `main` and passed down.
pub struct OpContext {
    pub client: Client,
}

impl OpContext {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a request for `route`, send it and return the decoded body.
    pub async fn call<R: Route>(&self, route: &R) -> anyhow::Result<Decoded> {
        let request = self.client.create_request(route).await?;
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
        Ok(request.invoke().await?)
    }

    /// Like [`OpContext::call`], returning the raw response body.
    pub async fn call_bytes<R: Route>(&self, route: &R) -> anyhow::Result<Vec<u8>> {
        let request = self.client.create_request(route).await?;
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
        Ok(request.invoke_bytes().await?)
    }
}

impl Command {
    pub async fn execute(&self, ctx: &OpContext) -> anyhow::Result<String> {
        match self {
            Command::Folders(op) => op.execute(ctx).await,
            Command::Files(op) => op.execute(ctx).await,
            Command::Workflows(op) => op.execute(ctx).await,
        }
    }
}
