//! Walks every visible project and prints its issue types, categories, and
//! members.
//!
//! ```sh
//! BACKLOG_API_KEY=... cargo run --example simple -- --space your-space
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

    let (projects, _) = client.projects().list_all().await?;
    for (i, project) in projects.iter().enumerate() {
        println!("{}. {} ({})", i + 1, project.name, project.project_key);

        let (issue_types, _) = client.projects().list_issue_types(&project.project_key).await?;
        println!("IssueTypes:");
        for issue_type in issue_types {
            println!("  {} ({})", issue_type.name, issue_type.color);
        }

        let (categories, _) = client.projects().list_categories(&project.project_key).await?;
        println!("Categories:");
        for category in categories {
            println!("  {}", category.name);
        }

        let (users, _) = client.projects().list_users(&project.project_key).await?;
        println!("Users:");
        for user in users {
            println!("  {}", user.name);
        }
    }

    Ok(())
}
