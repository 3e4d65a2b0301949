//! Image upload endpoint.

use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::{parse_response, ApiResult};

#[derive(Debug, Clone, Deserialize)]
struct ImageUploadResponse {
    url: String,
}

/// HTTP client for the image upload endpoint.
pub struct UploadApi {
    client: reqwest::Client,
    upload_base_url: String,
}

impl UploadApi {
    /// Create an API client reusing a shared [`reqwest::Client`].
    pub fn new(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            client,
            upload_base_url: config.upload_base_url.clone(),
        }
    }

    /// Upload an image and return its hosted URL.
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<String> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/upload_image", self.upload_base_url))
            .multipart(form)
            .send()
            .await?;
        let body: ImageUploadResponse = parse_response(response).await?;
        Ok(body.url)
    }
}
