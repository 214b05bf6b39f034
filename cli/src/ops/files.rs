use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use sortha_core::routes::{CreateFile, DeleteFile, DownloadFile, GetFilesInFolder};

use super::OpContext;

#[derive(Subcommand, Debug, Clone)]
pub enum Files {
    /// List the files in a folder
    List { folder: String },
    /// Upload a local file into a folder
    Upload {
        path: PathBuf,
        /// Target folder id
        #[arg(long)]
        folder: String,
        /// Name to store the file under (defaults to the local file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Download a file, to stdout or to --out
    Download {
        id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete a file
    Delete { id: String },
}

impl Files {
    pub async fn execute(&self, ctx: &OpContext) -> anyhow::Result<String> {
        let decoded = match self {
            Files::List { folder } => ctx.call(&GetFilesInFolder::new(folder)).await?,
            Files::Upload { path, folder, name } => {
                let contents = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let local_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .context("upload path has no file name")?;
                let stored_name = name.clone().unwrap_or_else(|| local_name.clone());
                let route = CreateFile::new(contents, stored_name, folder).upload_name(local_name);
                ctx.call(&route).await?
            }
            Files::Download { id, out } => {
                let contents = ctx.call_bytes(&DownloadFile::new(id)).await?;
                return match out {
                    Some(out) => {
                        tokio::fs::write(out, &contents)
                            .await
                            .with_context(|| format!("failed to write {}", out.display()))?;
                        Ok(format!("wrote {} bytes to {}", contents.len(), out.display()))
                    }
                    None => Ok(String::from_utf8_lossy(&contents).into_owned()),
                };
            }
            Files::Delete { id } => ctx.call(&DeleteFile::new(id)).await?,
        };
        Ok(decoded.to_string())
    }
}
