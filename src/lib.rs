//! A client library for the Backlog project-management REST API.
//!
//! Every call goes through a shared request/response envelope
//! ([`Client::build_request`] and [`Client::execute`]) that injects the API
//! key, negotiates JSON, classifies non-2xx responses into structured
//! [`Error::Api`] values, and redacts the credential from any URL surfaced in
//! an error. Resource endpoints ([`IssuesService`], [`ProjectsService`],
//! [`SpaceService`]) declare a path, a verb, and a target shape, and delegate
//! everything else to the envelope.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> backlog::Result<()> {
//! let client = backlog::Client::new("demo", "YOUR_API_KEY")?;
//!
//! let (issue, _) = client.issues().get("DEMO-1").await?;
//! println!("{}: {}", issue.issue_key, issue.summary);
//!
//! let (projects, _) = client.projects().list_all().await?;
//! for project in projects {
//!     println!("{} ({})", project.name, project.project_key);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod comments;
mod error;
mod issues;
mod params;
mod projects;
mod space;

pub use client::{Client, Response};
pub use comments::{ChangeLog, CommentListRequest, IssueComment};
pub use error::{ApiErrorDetail, ApiErrors, Error, Result};
pub use issues::{Issue, IssueRequest, IssueSearchRequest, IssuesService};
pub use params::Params;
pub use projects::{Category, IssueType, Project, ProjectsService, User};
pub use space::{Priority, Resolution, SpaceService, Status};
