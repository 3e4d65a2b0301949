//! Daily supervision log endpoints (`/sup/logs`).
//!
//! Logs use opaque text ids and a four-state workflow
//! ([`LogStatus`]); status transitions go through a dedicated PATCH
//! endpoint rather than a full update.

use buildsense_core::status::LogStatus;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::error::{check_status, parse_response, ApiResult};
use crate::issues::urlencode;

/// A daily supervision log row as stored by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupervisionLog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub project_id: String,
    pub supervisor_name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morning_management: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morning_skilled_workers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morning_laborers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afternoon_management: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afternoon_skilled_workers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afternoon_laborers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub construction_activities: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervision_activities: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_issues: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_issues: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_issues: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_issues: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_matters: Option<String>,
    pub status: LogStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Paginated log list response.
#[derive(Debug, Clone, Deserialize)]
pub struct LogListResponse {
    pub total: u64,
    pub logs: Vec<SupervisionLog>,
}

/// Optional server-side list filters.
#[derive(Debug, Clone, Default)]
pub struct LogListFilters {
    pub project_id: Option<String>,
    pub supervisor_name: Option<String>,
    pub status: Option<LogStatus>,
    /// Inclusive `YYYY-MM-DD` bounds.
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl LogListFilters {
    fn append_query(&self, url: &mut String) {
        if let Some(project_id) = &self.project_id {
            url.push_str("&project_id=");
            url.push_str(&urlencode(project_id));
        }
        if let Some(name) = &self.supervisor_name {
            url.push_str("&supervisor_name=");
            url.push_str(&urlencode(name));
        }
        if let Some(status) = self.status {
            url.push_str("&status=");
            url.push_str(status.as_str());
        }
        if let Some(from) = &self.date_from {
            url.push_str("&date_from=");
            url.push_str(from);
        }
        if let Some(to) = &self.date_to {
            url.push_str("&date_to=");
            url.push_str(to);
        }
    }
}

/// Summary statistics for the dashboard header.
#[derive(Debug, Clone, Deserialize)]
pub struct LogStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub by_status: serde_json::Value,
}

/// HTTP client for the daily supervision log endpoints.
pub struct LogsApi {
    client: reqwest::Client,
    base_url: String,
}

impl LogsApi {
    /// Create an API client reusing a shared [`reqwest::Client`].
    pub fn new(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Create a new log entry.
    pub async fn create(&self, log: &SupervisionLog) -> ApiResult<SupervisionLog> {
        let response = self
            .client
            .post(format!("{}/sup/logs/", self.base_url))
            .json(log)
            .send()
            .await?;
        parse_response(response).await
    }

    /// List logs with optional server-side filters.
    pub async fn list(
        &self,
        skip: u32,
        limit: u32,
        filters: Option<&LogListFilters>,
    ) -> ApiResult<LogListResponse> {
        let mut url = format!("{}/sup/logs/?skip={skip}&limit={limit}", self.base_url);
        if let Some(filters) = filters {
            filters.append_query(&mut url);
        }
        let response = self.client.get(url).send().await?;
        parse_response(response).await
    }

    /// Fetch one log by id.
    pub async fn get(&self, log_id: &str) -> ApiResult<SupervisionLog> {
        let response = self
            .client
            .get(format!("{}/sup/logs/{log_id}", self.base_url))
            .send()
            .await?;
        parse_response(response).await
    }

    /// Update a log's content.
    pub async fn update(&self, log_id: &str, log: &SupervisionLog) -> ApiResult<SupervisionLog> {
        let response = self
            .client
            .put(format!("{}/sup/logs/{log_id}", self.base_url))
            .json(log)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Transition a log's workflow status.
    pub async fn update_status(&self, log_id: &str, status: LogStatus) -> ApiResult<SupervisionLog> {
        let body = serde_json::json!({ "status": status.as_str() });
        let response = self
            .client
            .patch(format!("{}/sup/logs/{log_id}/status", self.base_url))
            .json(&body)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Delete a log by id.
    pub async fn delete(&self, log_id: &str) -> ApiResult<()> {
        let response = self
            .client
            .delete(format!("{}/sup/logs/{log_id}", self.base_url))
            .send()
            .await?;
        check_status(response).await
    }

    /// List logs for one project.
    pub async fn list_by_project(
        &self,
        project_id: &str,
        skip: u32,
        limit: u32,
    ) -> ApiResult<LogListResponse> {
        let response = self
            .client
            .get(format!(
                "{}/sup/logs/by_project/{}?skip={skip}&limit={limit}",
                self.base_url,
                urlencode(project_id)
            ))
            .send()
            .await?;
        parse_response(response).await
    }

    /// List logs written by one supervisor.
    pub async fn list_by_supervisor(
        &self,
        supervisor_name: &str,
        skip: u32,
        limit: u32,
    ) -> ApiResult<LogListResponse> {
        let response = self
            .client
            .get(format!(
                "{}/sup/logs/by_supervisor/{}?skip={skip}&limit={limit}",
                self.base_url,
                urlencode(supervisor_name)
            ))
            .send()
            .await?;
        parse_response(response).await
    }

    /// Summary statistics, optionally narrowed by project and date range.
    pub async fn stats_summary(&self, filters: Option<&LogListFilters>) -> ApiResult<LogStats> {
        let mut url = format!("{}/sup/stats/summary", self.base_url);
        if let Some(filters) = filters {
            let mut query = String::new();
            filters.append_query(&mut query);
            if !query.is_empty() {
                url.push('?');
                // append_query always leads with '&'.
                url.push_str(&query[1..]);
            }
        }
        let response = self.client.get(url).send().await?;
        parse_response(response).await
    }
}
