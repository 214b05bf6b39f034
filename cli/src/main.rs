mod args;
mod ops;

use args::{Args, Parser};
use ops::OpContext;
use sortha_core::{Anonymous, ApiError, Client, StaticToken};
use tracing_subscriber::EnvFilter;

/// Build the one client for this process. A token selects bearer auth.
fn build_client(base_url: &str, token: Option<String>) -> Result<Client, ApiError> {
    match token {
        Some(token) => Client::new(base_url, StaticToken::new(token)),
        None => Client::new(base_url, Anonymous),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // One client for the whole process, handed to every command.
    let ctx = match build_client(&args.base_url, args.token) {
        Ok(client) => OpContext::new(client),
        Err(e) => {
            eprintln!("Error: failed to create API client: {e}");
            std::process::exit(1);
        }
    };

    match args.command.execute(&ctx).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
