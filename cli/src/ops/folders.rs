use clap::Subcommand;
use serde_json::{json, Value};
use sortha_core::Decoded;
use sortha_core::routes::{
    CreateFolder, DeleteFolder, GetFilesInFolder, GetFolder, GetRootFolder, GetSubFolder,
};

use super::OpContext;

#[derive(Subcommand, Debug, Clone)]
pub enum Folders {
    /// List root folders
    Root,
    /// Show one folder
    Get { id: String },
    /// List the sub-folders of a folder
    Sub { id: String },
    /// List sub-folders and files of a folder in one go
    Browse { id: String },
    /// Create a folder
    Create {
        name: String,
        /// Parent folder id (omit for a root folder)
        #[arg(long)]
        parent: Option<u64>,
    },
    /// Delete a folder with everything inside it
    Delete { id: String },
}

impl Folders {
    pub async fn execute(&self, ctx: &OpContext) -> anyhow::Result<String> {
        let decoded = match self {
            Folders::Root => ctx.call(&GetRootFolder).await?,
            Folders::Get { id } => ctx.call(&GetFolder::new(id)).await?,
            Folders::Sub { id } => ctx.call(&GetSubFolder::new(id)).await?,
            Folders::Browse { id } => {
                let sub_req = GetSubFolder::new(id);
                let files_req = GetFilesInFolder::new(id);
                let (folders, files) =
                    tokio::try_join!(ctx.call(&sub_req), ctx.call(&files_req),)?;
                let listing = json!({
                    "folders": json_listing(folders, "sub-folder")?,
                    "files": json_listing(files, "file")?,
                });
                return Ok(serde_json::to_string_pretty(&listing)?);
            }
            Folders::Create { name, parent } => {
                ctx.call(&CreateFolder::new(name.clone(), *parent)).await?
            }
            Folders::Delete { id } => ctx.call(&DeleteFolder::new(id)).await?,
        };
        Ok(decoded.to_string())
    }
}

fn json_listing(decoded: Decoded, what: &str) -> anyhow::Result<Value> {
    match decoded {
        Decoded::Json(value) => Ok(value),
        Decoded::Text(text) => anyhow::bail!("expected a JSON {what} listing, got: {text:?}"),
    }
}
