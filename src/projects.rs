//! Project records and endpoints.

use reqwest::Method;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::client::{required, Client, Response};
use crate::error::Result;
use crate::params::Params;

/// A Backlog project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    /// The human-readable key, e.g. `DEMO`.
    pub project_key: String,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
}

/// An issue type within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueType {
    pub id: u32,
    #[serde(default)]
    pub project_id: u32,
    pub name: String,
    /// Display color, e.g. `#990000`.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub display_order: i32,
}

/// An issue category within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub display_order: i32,
}

/// A Backlog user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    /// The login name; may be absent for some account types.
    #[serde(default)]
    pub user_id: String,
    pub name: String,
}

/// Project endpoints.
pub struct ProjectsService<'a> {
    client: &'a Client,
}

impl Client {
    pub fn projects(&self) -> ProjectsService<'_> {
        ProjectsService { client: self }
    }
}

impl ProjectsService<'_> {
    /// List every project visible to the caller.
    ///
    /// `GET /api/v2/projects`
    pub async fn list_all(&self) -> Result<(Vec<Project>, Response)> {
        let req = self.client.build_request(Method::GET, "projects", None)?;
        let (projects, resp) = self.client.execute(req).await?;
        Ok((projects.unwrap_or_default(), resp))
    }

    /// Get a single project by key or numeric id.
    ///
    /// `GET /api/v2/projects/:projectIdOrKey`
    pub async fn get(&self, project_key: &str) -> Result<(Project, Response)> {
        let req = self
            .client
            .build_request(Method::GET, &format!("projects/{project_key}"), None)?;
        let (project, resp) = self.client.execute(req).await?;
        Ok((required(project)?, resp))
    }

    /// List the issue types of a project.
    ///
    /// `GET /api/v2/projects/:projectIdOrKey/issueTypes`
    pub async fn list_issue_types(&self, project_key: &str) -> Result<(Vec<IssueType>, Response)> {
        let req = self.client.build_request(
            Method::GET,
            &format!("projects/{project_key}/issueTypes"),
            None,
        )?;
        let (types, resp) = self.client.execute(req).await?;
        Ok((types.unwrap_or_default(), resp))
    }

    /// Add an issue type to a project.
    ///
    /// `POST /api/v2/projects/:projectIdOrKey/issueTypes`
    pub async fn create_issue_type(
        &self,
        project_key: &str,
        name: &str,
        color: &str,
    ) -> Result<(IssueType, Response)> {
        let mut params = Params::new();
        params.push("name", name);
        params.push("color", color);
        let req = self.client.build_request(
            Method::POST,
            &format!("projects/{project_key}/issueTypes"),
            Some(&params),
        )?;
        let (issue_type, resp) = self.client.execute(req).await?;
        Ok((required(issue_type)?, resp))
    }

    /// Delete an issue type, moving its issues to a substitute type.
    ///
    /// `DELETE /api/v2/projects/:projectIdOrKey/issueTypes/:id`
    ///
    /// The API requires a substitute because a project must keep at least one
    /// issue type.
    pub async fn delete_issue_type(
        &self,
        project_key: &str,
        issue_type_id: u32,
        substitute_issue_type_id: u32,
    ) -> Result<Response> {
        let mut params = Params::new();
        params.push("substituteIssueTypeId", substitute_issue_type_id);
        let req = self.client.build_request(
            Method::DELETE,
            &format!("projects/{project_key}/issueTypes/{issue_type_id}"),
            Some(&params),
        )?;
        let (_, resp) = self.client.execute::<IgnoredAny>(req).await?;
        Ok(resp)
    }

    /// List the categories of a project.
    ///
    /// `GET /api/v2/projects/:projectIdOrKey/categories`
    pub async fn list_categories(&self, project_key: &str) -> Result<(Vec<Category>, Response)> {
        let req = self.client.build_request(
            Method::GET,
            &format!("projects/{project_key}/categories"),
            None,
        )?;
        let (categories, resp) = self.client.execute(req).await?;
        Ok((categories.unwrap_or_default(), resp))
    }

    /// Add a category to a project.
    ///
    /// `POST /api/v2/projects/:projectIdOrKey/categories`
    pub async fn create_category(
        &self,
        project_key: &str,
        name: &str,
    ) -> Result<(Category, Response)> {
        let mut params = Params::new();
        params.push("name", name);
        let req = self.client.build_request(
            Method::POST,
            &format!("projects/{project_key}/categories"),
            Some(&params),
        )?;
        let (category, resp) = self.client.execute(req).await?;
        Ok((required(category)?, resp))
    }

    /// Delete a category.
    ///
    /// `DELETE /api/v2/projects/:projectIdOrKey/categories/:id`
    pub async fn delete_category(&self, project_key: &str, category_id: u32) -> Result<Response> {
        let req = self.client.build_request(
            Method::DELETE,
            &format!("projects/{project_key}/categories/{category_id}"),
            None,
        )?;
        let (_, resp) = self.client.execute::<IgnoredAny>(req).await?;
        Ok(resp)
    }

    /// List the members of a project.
    ///
    /// `GET /api/v2/projects/:projectIdOrKey/users`
    pub async fn list_users(&self, project_key: &str) -> Result<(Vec<User>, Response)> {
        let req = self.client.build_request(
            Method::GET,
            &format!("projects/{project_key}/users"),
            None,
        )?;
        let (users, resp) = self.client.execute(req).await?;
        Ok((users.unwrap_or_default(), resp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_list_deserializes() {
        let body = r#"[
            {"id": 1, "projectKey": "DEMO", "name": "Demo Project"},
            {"id": 2, "projectKey": "OPS", "name": "Operations", "archived": true}
        ]"#;
        let projects: Vec<Project> = serde_json::from_str(body).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].project_key, "DEMO");
        assert!(!projects[0].archived);
        assert!(projects[1].archived);
    }

    #[test]
    fn issue_type_deserializes() {
        let body =
            r##"{"id": 2, "projectId": 1, "name": "Bug", "color": "#990000", "displayOrder": 0}"##;
        let issue_type: IssueType = serde_json::from_str(body).unwrap();
        assert_eq!(issue_type.name, "Bug");
        assert_eq!(issue_type.color, "#990000");
    }

    #[test]
    fn user_tolerates_missing_login_name() {
        let user: User = serde_json::from_str(r#"{"id": 5, "name": "guest"}"#).unwrap();
        assert_eq!(user.user_id, "");
        assert_eq!(user.name, "guest");
    }
}
