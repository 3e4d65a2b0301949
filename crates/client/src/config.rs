use std::time::Duration;

/// Backend endpoint configuration loaded from environment variables.
///
/// All fields default to the production endpoints; override via env vars
/// for staging or local backends.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the record API (default: `https://www.buildsense.asia`).
    pub base_url: String,
    /// Base URL of the upload endpoints (default: same as `base_url`).
    pub upload_base_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "https://www.buildsense.asia".into(),
            upload_base_url: "https://www.buildsense.asia".into(),
            request_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                        |
    /// |----------------------------|--------------------------------|
    /// | `BUILDSENSE_API_URL`       | `https://www.buildsense.asia`  |
    /// | `BUILDSENSE_UPLOAD_URL`    | value of `BUILDSENSE_API_URL`  |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                           |
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = ApiConfig::default();
        let base_url = std::env::var("BUILDSENSE_API_URL")
            .unwrap_or(defaults.base_url)
            .trim_end_matches('/')
            .to_string();
        let upload_base_url = std::env::var("BUILDSENSE_UPLOAD_URL")
            .unwrap_or_else(|_| base_url.clone())
            .trim_end_matches('/')
            .to_string();
        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);

        ApiConfig {
            base_url,
            upload_base_url,
            request_timeout_secs,
        }
    }

    /// Build the shared HTTP client for this configuration.
    pub fn build_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()
            .expect("Failed to build reqwest HTTP client")
    }
}
