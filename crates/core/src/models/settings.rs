use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Client configuration: where the API lives and how lists are paged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the finance API, without a trailing slash (e.g. "http://127.0.0.1:8000").
    pub api_base_url: String,

    /// Rows per page on the expense and investment screens.
    pub page_size: usize,

    /// Per-request timeout (native targets only; the browser manages its own).
    pub request_timeout_secs: u64,

    /// Months shown by the quarterly trend on the analysis screen.
    pub trend_months: u32,

    /// Bearer token obtained by the login screen. Opaque to the core.
    pub auth_token: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            page_size: 10,
            request_timeout_secs: 30,
            trend_months: 3,
            auth_token: None,
        }
    }
}

impl ClientSettings {
    /// Parse settings from JSON. Missing keys fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Attach the session token (builder style).
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Base URL with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.base_url();
        if url.is_empty() {
            return Err(CoreError::Config("api_base_url must not be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "api_base_url '{url}' must start with http:// or https://"
            )));
        }
        if self.page_size == 0 {
            return Err(CoreError::Config("page_size must be at least 1".into()));
        }
        if self.trend_months == 0 {
            return Err(CoreError::Config("trend_months must be at least 1".into()));
        }
        Ok(())
    }
}
