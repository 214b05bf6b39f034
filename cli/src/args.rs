pub use clap::Parser;

use clap::Subcommand;

use crate::ops::{Files, Folders, Workflows};

#[derive(Parser, Debug)]
#[command(name = "sortha")]
#[command(about = "Command-line client for the Sortha files and workflows API")]
pub struct Args {
    /// Base URL of the Sortha backend
    #[arg(
        long,
        global = true,
        env = "SORTHA_API_URL",
        default_value = "http://localhost:8000"
    )]
    pub base_url: String,

    /// Bearer token for routes that require authentication
    #[arg(long, global = true, env = "SORTHA_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Browse and manage folders
    #[command(subcommand)]
    Folders(Folders),
    /// Upload, download and delete files
    #[command(subcommand)]
    Files(Files),
    /// List and run workflows
    #[command(subcommand)]
    Workflows(Workflows),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_to_local_backend() {
        let args = Args::try_parse_from(["sortha", "folders", "root"]).unwrap();
        assert_eq!(args.base_url, "http://localhost:8000");
        assert!(matches!(args.command, Command::Folders(Folders::Root)));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "sortha",
            "files",
            "delete",
            "42",
            "--base-url",
            "http://example.com",
            "--token",
            "abc",
        ])
        .unwrap();
        assert_eq!(args.base_url, "http://example.com");
        assert_eq!(args.token.as_deref(), Some("abc"));
        assert!(matches!(args.command, Command::Files(Files::Delete { ref id }) if id == "42"));
    }

    #[test]
    fn create_folder_parent_is_optional() {
        let args = Args::try_parse_from(["sortha", "folders", "create", "Docs"]).unwrap();
        match args.command {
            Command::Folders(Folders::Create { name, parent }) => {
                assert_eq!(name, "Docs");
                assert_eq!(parent, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
