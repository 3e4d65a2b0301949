//! Issue record endpoints.
//!
//! The read side returns [`IssueRecord`] rows; the write side speaks the
//! backend's Chinese-keyed payload ([`IssueWrite`]). Status filtering on
//! the list endpoint is done server-side with the localized label.

use buildsense_core::record::IssueRecord;
use buildsense_core::status::IssueStatus;
use buildsense_core::types::DbId;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::ApiConfig;
use crate::error::{check_status, ensure_success, parse_response, ApiResult};

/// Write payload for issue create/update. The backend model is keyed with
/// Chinese field names; this struct is the only place that spelling lives.
#[derive(Debug, Clone, Serialize)]
pub struct IssueWrite {
    #[serde(rename = "问题发生地点")]
    pub location: String,
    #[serde(rename = "问题描述")]
    pub description: String,
    /// Comma-joined hosted image URLs.
    #[serde(rename = "相关图片", skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    #[serde(
        rename = "状态",
        serialize_with = "serialize_status_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<IssueStatus>,
    /// RFC 3339 record timestamp; the backend fills "now" when omitted.
    #[serde(rename = "记录时间", skip_serializing_if = "Option::is_none")]
    pub record_time: Option<String>,
}

fn serialize_status_label<S: Serializer>(
    status: &Option<IssueStatus>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match status {
        Some(status) => serializer.serialize_str(status.backend_label()),
        None => serializer.serialize_none(),
    }
}

/// Optional client-side narrowing applied after the list fetch.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Response of the merge endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MergedIssueResponse {
    pub merged_issue: MergedIssue,
}

/// The merged row the backend creates from the source issues.
#[derive(Debug, Clone, Deserialize)]
pub struct MergedIssue {
    pub id: DbId,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub record_time: String,
    pub update_time: String,
    pub status: String,
    pub is_merged: bool,
    #[serde(default)]
    pub merged_from_ids: Vec<DbId>,
}

/// Response of backend-side issue document generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateIssueDocResponse {
    pub issue_id: DbId,
    /// Id of the generated document row.
    pub id: DbId,
    pub location: String,
    /// Hosted URL of the generated DOCX, ready for download.
    pub doc_url: String,
}

/// HTTP client for the issue record endpoints.
pub struct IssuesApi {
    client: reqwest::Client,
    base_url: String,
}

impl IssuesApi {
    /// Create an API client reusing a shared [`reqwest::Client`].
    pub fn new(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// List issues, optionally filtered server-side by status.
    ///
    /// Any additional [`IssueFilter`] narrowing is applied client-side
    /// after the fetch. A non-array response body reads as an empty list.
    pub async fn list(
        &self,
        skip: u32,
        limit: u32,
        status: Option<IssueStatus>,
        filter: Option<&IssueFilter>,
    ) -> ApiResult<Vec<IssueRecord>> {
        let mut url = format!("{}/issues?skip={skip}&limit={limit}", self.base_url);
        if let Some(status) = status {
            url.push_str("&status=");
            url.push_str(&urlencode(status.backend_label()));
        }

        let response = self.client.get(url).send().await?;
        let value: serde_json::Value = parse_response(response).await?;
        let mut records: Vec<IssueRecord> = match value {
            serde_json::Value::Array(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Vec::new(),
        };

        if let Some(filter) = filter {
            records.retain(|rec| {
                if let Some(location) = &filter.location {
                    if rec.location.as_deref() != Some(location.as_str()) {
                        return false;
                    }
                }
                if let Some(description) = &filter.description {
                    if rec.description.as_deref() != Some(description.as_str()) {
                        return false;
                    }
                }
                true
            });
        }
        Ok(records)
    }

    /// Fetch one issue by backend id.
    pub async fn get(&self, id: DbId) -> ApiResult<IssueRecord> {
        let response = self
            .client
            .get(format!("{}/issues/{id}", self.base_url))
            .send()
            .await?;
        parse_response(response).await
    }

    /// Create a new issue.
    pub async fn create(&self, payload: &IssueWrite) -> ApiResult<IssueRecord> {
        let response = self
            .client
            .post(format!("{}/issues", self.base_url))
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Update an existing issue.
    pub async fn update(&self, id: DbId, payload: &IssueWrite) -> ApiResult<IssueRecord> {
        let response = self
            .client
            .put(format!("{}/issues/{id}", self.base_url))
            .json(payload)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Delete an issue by backend id.
    pub async fn delete(&self, id: DbId) -> ApiResult<()> {
        let response = self
            .client
            .delete(format!("{}/issues/{id}", self.base_url))
            .send()
            .await?;
        check_status(response).await
    }

    /// Upsert through the legacy `/put_issues` endpoint.
    ///
    /// The backend matches on location + description and answers with a
    /// plain-text message stating whether a row was created or updated.
    pub async fn create_or_update(&self, payload: &IssueWrite) -> ApiResult<String> {
        let response = self
            .client
            .post(format!("{}/put_issues", self.base_url))
            .json(payload)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.text().await?)
    }

    /// Merge several issues into one backend row.
    pub async fn merge(&self, issue_ids: &[DbId]) -> ApiResult<MergedIssueResponse> {
        let body = serde_json::json!({ "issue_ids": issue_ids });
        let response = self
            .client
            .post(format!("{}/merge-issues", self.base_url))
            .json(&body)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Ask the backend to generate the issue DOCX; returns its hosted URL.
    pub async fn generate_document(&self, issue_id: DbId) -> ApiResult<GenerateIssueDocResponse> {
        let response = self
            .client
            .get(format!("{}/generate_issue_doc/{issue_id}", self.base_url))
            .send()
            .await?;
        parse_response(response).await
    }
}

/// Minimal percent-encoding for query values (non-ASCII and reserved bytes).
pub(crate) fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
