//! Stand-by (witness) supervision record endpoints.
//!
//! The pangzhan API is split across two route prefixes on the backend
//! (`/pangzhan` and `/docx_utils/pangzhan`); the exact pairing per
//! operation is a wire contract and preserved here as-is.

use buildsense_core::record::SupervisionRecord;
use buildsense_core::types::DbId;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::{check_status, parse_response, ApiError, ApiResult};
use crate::issues::urlencode;

/// Response of the attached-document upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    pub project_id: DbId,
    pub doc_url: String,
    #[serde(default)]
    pub message: String,
}

/// Response of backend-side stand-by document generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateDocumentResponse {
    pub document_url: Option<String>,
}

/// HTTP client for the stand-by record endpoints.
pub struct SupervisionApi {
    client: reqwest::Client,
    base_url: String,
    upload_base_url: String,
}

impl SupervisionApi {
    /// Create an API client reusing a shared [`reqwest::Client`].
    pub fn new(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            upload_base_url: config.upload_base_url.clone(),
        }
    }

    /// List stand-by records (paginated). A non-array body reads as empty.
    pub async fn list(&self, skip: u32, limit: u32) -> ApiResult<Vec<SupervisionRecord>> {
        let response = self
            .client
            .get(format!(
                "{}/docx_utils/pangzhan/?skip={skip}&limit={limit}",
                self.base_url
            ))
            .send()
            .await?;
        let value: serde_json::Value = parse_response(response).await?;
        Ok(match value {
            serde_json::Value::Array(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Vec::new(),
        })
    }

    /// Fetch one stand-by record by backend id.
    pub async fn get(&self, id: DbId) -> ApiResult<SupervisionRecord> {
        let response = self
            .client
            .get(format!("{}/pangzhan/{id}", self.base_url))
            .send()
            .await?;
        parse_response(response).await
    }

    /// Create a new stand-by record.
    pub async fn create(&self, record: &SupervisionRecord) -> ApiResult<SupervisionRecord> {
        let response = self
            .client
            .post(format!("{}/pangzhan/", self.base_url))
            .json(record)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Update an existing stand-by record.
    pub async fn update(&self, id: DbId, record: &SupervisionRecord) -> ApiResult<SupervisionRecord> {
        let response = self
            .client
            .put(format!("{}/docx_utils/pangzhan/{id}", self.base_url))
            .json(record)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Delete a stand-by record by backend id.
    pub async fn delete(&self, id: DbId) -> ApiResult<()> {
        let response = self
            .client
            .delete(format!("{}/pangzhan/{id}", self.base_url))
            .send()
            .await?;
        check_status(response).await
    }

    /// Upload a document file and attach it to a stand-by record.
    ///
    /// The endpoint answers 200 with an application-level `status` field;
    /// anything but `"success"` is treated as a rejection.
    pub async fn upload_document(
        &self,
        standby_id: DbId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!(
                "{}/upload_doc_standBy?panzhan_id={standby_id}",
                self.upload_base_url
            ))
            .multipart(form)
            .send()
            .await?;
        let upload: UploadResponse = parse_response(response).await?;
        if upload.status != "success" {
            let reason = if upload.message.is_empty() {
                "上传失败".to_string()
            } else {
                upload.message.clone()
            };
            return Err(ApiError::Validation(reason));
        }
        Ok(upload)
    }

    /// Detach and delete a previously uploaded document by its hosted URL.
    pub async fn delete_document(&self, standby_id: DbId, file_url: &str) -> ApiResult<()> {
        let response = self
            .client
            .post(format!(
                "{}/delete_doc_by_url?panzhan_id={standby_id}&file_url={}",
                self.upload_base_url,
                urlencode(file_url)
            ))
            .body("")
            .send()
            .await?;
        check_status(response).await
    }

    /// Ask the backend to generate the stand-by DOCX for a record.
    ///
    /// Returns the hosted document URL when the backend produced one.
    pub async fn generate_document(&self, id: DbId) -> ApiResult<Option<String>> {
        let response = self
            .client
            .post(format!("{}/pangzhan/{id}/document", self.base_url))
            .send()
            .await?;
        let body: GenerateDocumentResponse = parse_response(response).await?;
        Ok(body.document_url)
    }
}
