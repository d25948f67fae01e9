//! Issue comment records and endpoints.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{required, Response};
use crate::error::Result;
use crate::issues::IssuesService;
use crate::params::Params;
use crate::projects::User;

/// A comment on a Backlog issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueComment {
    pub id: u32,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_user: Option<User>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    /// Field changes recorded alongside the comment.
    #[serde(default, rename = "changeLog")]
    pub change_logs: Vec<ChangeLog>,
}

/// One field change attached to a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLog {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub new_value: String,
    #[serde(default)]
    pub original_value: String,
}

/// Filters for the comment list endpoint.
#[derive(Debug, Clone, Default)]
pub struct CommentListRequest {
    /// Return comments with an id greater than this.
    pub min_id: Option<u32>,
    /// Return comments with an id less than this.
    pub max_id: Option<u32>,
    pub count: Option<u32>,
    /// `"asc"` or `"desc"` (the API default is `"desc"`).
    pub order: Option<String>,
}

impl CommentListRequest {
    pub(crate) fn to_params(&self) -> Params {
        let mut p = Params::new();
        p.push_opt("minId", self.min_id.as_ref());
        p.push_opt("maxId", self.max_id.as_ref());
        p.push_opt("count", self.count.as_ref());
        p.push_opt("order", self.order.as_ref());
        p
    }
}

impl IssuesService<'_> {
    /// List comments on an issue.
    ///
    /// `GET /api/v2/issues/:issueIdOrKey/comments`
    pub async fn list_comments(
        &self,
        issue_key: &str,
        request: &CommentListRequest,
    ) -> Result<(Vec<IssueComment>, Response)> {
        let params = request.to_params();
        let req = self.client.build_request(
            Method::GET,
            &format!("issues/{issue_key}/comments"),
            Some(&params),
        )?;
        let (comments, resp) = self.client.execute(req).await?;
        Ok((comments.unwrap_or_default(), resp))
    }

    /// Add a comment to an issue.
    ///
    /// `POST /api/v2/issues/:issueIdOrKey/comments`
    pub async fn create_comment(
        &self,
        issue_key: &str,
        content: &str,
    ) -> Result<(IssueComment, Response)> {
        let mut params = Params::new();
        params.push("content", content);
        let req = self.client.build_request(
            Method::POST,
            &format!("issues/{issue_key}/comments"),
            Some(&params),
        )?;
        let (comment, resp) = self.client.execute(req).await?;
        Ok((required(comment)?, resp))
    }
}
