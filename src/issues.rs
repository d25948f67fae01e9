//! Issue records and endpoints.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::client::{required, Client, Response};
use crate::error::Result;
use crate::params::Params;
use crate::projects::{Category, IssueType, User};
use crate::space::{Priority, Status};

/// A Backlog issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: u32,
    pub project_id: u32,
    /// The human-readable key, e.g. `DEMO-42`.
    pub issue_key: String,
    pub key_id: u32,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub issue_type: Option<IssueType>,
    #[serde(default, rename = "category")]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub created_user: Option<User>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Fields for creating or editing an issue.
///
/// Every field is optional; only present fields are sent, so an edit touches
/// exactly the fields set here. Dates use the `yyyy-MM-dd` form the API
/// expects.
#[derive(Debug, Clone, Default)]
pub struct IssueRequest {
    pub project_id: Option<u32>,
    pub issue_type_id: Option<u32>,
    pub status_id: Option<u32>,
    pub priority_id: Option<u32>,
    pub category_id: Option<u32>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parent_issue_id: Option<u32>,
    pub assignee_id: Option<u32>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
}

impl IssueRequest {
    pub(crate) fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.push_opt("projectId", self.project_id.as_ref());
        p.push_opt("issueTypeId", self.issue_type_id.as_ref());
        p.push_opt("statusId", self.status_id.as_ref());
        p.push_opt("priorityId", self.priority_id.as_ref());
        p.push_opt("categoryId[]", self.category_id.as_ref());
        p.push_opt("summary", self.summary.as_ref());
        p.push_opt("description", self.description.as_ref());
        p.push_opt("parentIssueId", self.parent_issue_id.as_ref());
        p.push_opt("assigneeId", self.assignee_id.as_ref());
        p.push_opt("startDate", self.start_date.as_ref());
        p.push_opt("dueDate", self.due_date.as_ref());
        p
    }
}

/// Filters for the issue search endpoint.
///
/// Repeated identifier fields serialize as multiple `name[]` entries in the
/// order given.
#[derive(Debug, Clone, Default)]
pub struct IssueSearchRequest {
    pub ids: Vec<u32>,
    pub project_ids: Vec<u32>,
    pub status_ids: Vec<u32>,
    pub assignee_ids: Vec<u32>,
    pub keyword: Option<String>,
    /// Subtask filter: 0 all, 1 exclude children, 2 children only,
    /// 3 neither, 4 parents only.
    pub parent_child: Option<u32>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub offset: Option<u32>,
    pub count: Option<u32>,
}

impl IssueSearchRequest {
    pub(crate) fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.push_all("id[]", &self.ids);
        p.push_all("projectId[]", &self.project_ids);
        p.push_all("statusId[]", &self.status_ids);
        p.push_all("assigneeId[]", &self.assignee_ids);
        p.push_opt("keyword", self.keyword.as_ref());
        p.push_opt("parentChild", self.parent_child.as_ref());
        p.push_opt("sort", self.sort.as_ref());
        p.push_opt("order", self.order.as_ref());
        p.push_opt("offset", self.offset.as_ref());
        p.push_opt("count", self.count.as_ref());
        p
    }
}

/// Issue endpoints.
pub struct IssuesService<'a> {
    pub(crate) client: &'a Client,
}

impl Client {
    pub fn issues(&self) -> IssuesService<'_> {
        IssuesService { client: self }
    }
}

impl IssuesService<'_> {
    /// Get an issue by key or numeric id.
    ///
    /// `GET /api/v2/issues/:issueIdOrKey`
    pub async fn get(&self, issue_key: &str) -> Result<(Issue, Response)> {
        let req = self
            .client
            .build_request(Method::GET, &format!("issues/{issue_key}"), None)?;
        let (issue, resp) = self.client.execute(req).await?;
        Ok((required(issue)?, resp))
    }

    /// Create an issue.
    ///
    /// `POST /api/v2/issues`
    pub async fn create(&self, request: &IssueRequest) -> Result<(Issue, Response)> {
        let params = request.to_params();
        let req = self
            .client
            .build_request(Method::POST, "issues", Some(&params))?;
        let (issue, resp) = self.client.execute(req).await?;
        Ok((required(issue)?, resp))
    }

    /// Edit the fields present in `request`.
    ///
    /// `PATCH /api/v2/issues/:issueIdOrKey`
    pub async fn edit(&self, issue_key: &str, request: &IssueRequest) -> Result<(Issue, Response)> {
        let params = request.to_params();
        let req = self.client.build_request(
            Method::PATCH,
            &format!("issues/{issue_key}"),
            Some(&params),
        )?;
        let (issue, resp) = self.client.execute(req).await?;
        Ok((required(issue)?, resp))
    }

    /// Delete an issue.
    ///
    /// `DELETE /api/v2/issues/:issueIdOrKey`
    pub async fn delete(&self, issue_key: &str) -> Result<Response> {
        let req = self
            .client
            .build_request(Method::DELETE, &format!("issues/{issue_key}"), None)?;
        let (_, resp) = self.client.execute::<IgnoredAny>(req).await?;
        Ok(resp)
    }

    /// Search issues with the given filters.
    ///
    /// `GET /api/v2/issues`
    pub async fn search(&self, request: &IssueSearchRequest) -> Result<(Vec<Issue>, Response)> {
        let params = request.to_params();
        let req = self
            .client
            .build_request(Method::GET, "issues", Some(&params))?;
        let (issues, resp) = self.client.execute(req).await?;
        Ok((issues.unwrap_or_default(), resp))
    }
}
