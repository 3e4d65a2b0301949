//! Error taxonomy for the backend boundary.
//!
//! Every HTTP response is classified once, centrally: gateway errors get
//! their own "temporarily unavailable" class, 404 becomes [`ApiError::NotFound`]
//! (callers refresh their list to drop the stale entry), and validation
//! rejections carry the backend's structured `detail` best-effort parsed
//! into a readable message.

use thiserror::Error;

/// Errors from the BuildSense REST API layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("请求失败: {0}")]
    Request(#[from] reqwest::Error),

    /// Gateway error (HTTP 502): the backend is temporarily unreachable.
    #[error("服务器暂时不可用，请稍后再试")]
    Unavailable,

    /// The referenced record no longer exists server-side (HTTP 404).
    #[error("找不到该记录")]
    NotFound,

    /// The backend rejected a write (HTTP 422/400) with a structured reason.
    #[error("数据验证失败: {0}")]
    Validation(String),

    /// Any other non-2xx status.
    #[error("请求失败 ({status}): {body}")]
    Status { status: u16, body: String },
}

/// Convenience alias for client call results.
pub type ApiResult<T> = Result<T, ApiError>;

/// Classify a non-success response into an [`ApiError`].
///
/// `body` is the raw response text; for validation failures the JSON
/// `detail` field is extracted when present, otherwise the raw text is
/// passed through.
pub(crate) fn classify_status(status: u16, body: String) -> ApiError {
    match status {
        502 => ApiError::Unavailable,
        404 => ApiError::NotFound,
        400 | 422 => ApiError::Validation(extract_detail(&body)),
        _ => ApiError::Status { status, body },
    }
}

/// Best-effort extraction of the backend's `detail` field.
fn extract_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

/// Ensure the response has a success status, or classify it.
pub(crate) async fn ensure_success(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(classify_status(status.as_u16(), body));
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> ApiResult<T> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}

/// Assert the response has a success status, discarding the body.
pub(crate) async fn check_status(response: reqwest::Response) -> ApiResult<()> {
    ensure_success(response).await?;
    Ok(())
}
