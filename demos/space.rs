//! Prints the space-wide priorities, resolutions, and statuses.
//!
//! ```sh
//! BACKLOG_API_KEY=... cargo run --example space -- --space your-space
//! ```

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

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

    let (priorities, _) = client.space().list_priorities().await?;
    println!("Priorities:");
    for priority in priorities {
        println!("  {}: {}", priority.id, priority.name);
    }

    let (resolutions, _) = client.space().list_resolutions().await?;
    println!("Resolutions:");
    for resolution in resolutions {
        println!("  {}: {}", resolution.id, resolution.name);
    }

    let (statuses, _) = client.space().list_statuses().await?;
    println!("Statuses:");
    for status in statuses {
        println!("  {}: {}", status.id, status.name);
    }

    Ok(())
}
