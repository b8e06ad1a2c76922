use std::fmt;

use serde::Deserialize;

use crate::errors::CloudError;

pub const DEFAULT_BASE_URL: &str = "https://api.vultr.com/v2";

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// API root, without trailing slash.
    pub base_url: String,
    /// Bearer credential for the control service.
    pub api_key: String,
    pub timeout_ms: u64,
    /// Instances requested per listing page.
    pub page_size: u32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_ms: 30_000,
            page_size: 100,
        }
    }
}

impl CloudConfig {
    pub fn validate(&self) -> Result<(), CloudError> {
        if self.api_key.trim().is_empty() {
            return Err(CloudError::MissingCredential);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CloudError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.page_size == 0 {
            return Err(CloudError::InvalidConfig("page_size must be positive".into()));
        }
        Ok(())
    }
}

// api_key stays out of logs
impl fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .field("page_size", &self.page_size)
            .finish()
    }
}
