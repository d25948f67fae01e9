//! Demonstrates structured API error inspection by fetching an issue that
//! does not exist.
//!
//! ```sh
//! BACKLOG_API_KEY=... cargo run --example error -- --space your-space
//! ```

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use backlog::Error;

#[derive(Parser)]
struct Args {
    /// Backlog space (the tenant subdomain, e.g. `abc-inc`).
    #[arg(short, long)]
    space: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let api_key =
        std::env::var("BACKLOG_API_KEY").context("BACKLOG_API_KEY must be set")?;
    let client = backlog::Client::new(&args.space, &api_key)?;

    match client.issues().get("INVALID-ISSUE-KEY").await {
        Ok((issue, _)) => println!("unexpectedly found {}", issue.issue_key),
        Err(err) => {
            eprintln!("Error: {err}");
            if let Error::Api { errors, .. } = &err {
                eprintln!("Details:");
                for detail in errors.details() {
                    eprintln!(
                        "  code:{}, message:{}, info:{}",
                        detail.code, detail.message, detail.more_info
                    );
                }
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
