//! Searches issues with a sparse filter and prints the results.
//!
//! ```sh
//! BACKLOG_API_KEY=... cargo run --example search -- --space your-space
//! ```

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use backlog::IssueSearchRequest;

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

    let request = IssueSearchRequest {
        status_ids: vec![2],
        parent_child: Some(4),
        sort: Some("created".to_string()),
        order: Some("asc".to_string()),
        count: Some(10),
        ..Default::default()
    };

    let (issues, _) = client.issues().search(&request).await?;
    println!("Results: {}", issues.len());
    for issue in issues {
        let author = issue
            .created_user
            .map(|u| u.name)
            .unwrap_or_else(|| "unknown".to_string());
        println!("{}: {} ({})", issue.issue_key, issue.summary, author);
    }

    Ok(())
}
