//! Space-wide metadata records and endpoints.
//!
//! Priorities, resolutions, and statuses are defined per space and shared by
//! every project in it.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Client, Response};
use crate::error::Result;

/// An issue priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Priority {
    pub id: u32,
    pub name: String,
}

/// An issue resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub id: u32,
    pub name: String,
}

/// An issue status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: u32,
    pub name: String,
}

/// Space-wide metadata endpoints.
pub struct SpaceService<'a> {
    client: &'a Client,
}

impl Client {
    pub fn space(&self) -> SpaceService<'_> {
        SpaceService { client: self }
    }
}

impl SpaceService<'_> {
    /// List the priorities usable in the space.
    ///
    /// `GET /api/v2/priorities`
    pub async fn list_priorities(&self) -> Result<(Vec<Priority>, Response)> {
        let req = self.client.build_request(Method::GET, "priorities", None)?;
        let (priorities, resp) = self.client.execute(req).await?;
        Ok((priorities.unwrap_or_default(), resp))
    }

    /// List the resolutions usable in the space.
    ///
    /// `GET /api/v2/resolutions`
    pub async fn list_resolutions(&self) -> Result<(Vec<Resolution>, Response)> {
        let req = self.client.build_request(Method::GET, "resolutions", None)?;
        let (resolutions, resp) = self.client.execute(req).await?;
        Ok((resolutions.unwrap_or_default(), resp))
    }

    /// List the statuses usable in the space.
    ///
    /// `GET /api/v2/statuses`
    pub async fn list_statuses(&self) -> Result<(Vec<Status>, Response)> {
        let req = self.client.build_request(Method::GET, "statuses", None)?;
        let (statuses, resp) = self.client.execute(req).await?;
        Ok((statuses.unwrap_or_default(), resp))
    }
}
