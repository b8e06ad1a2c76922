use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, trace, warn};

use rbt_core::{CoreError, InstanceControl, InstanceDirectory};
use rbt_model::{Instance, InstanceId};

use crate::config::CloudConfig;
use crate::errors::CloudError;
use crate::wire::{InstanceEnvelope, InstancePage};

/// HTTP client for the instance control service.
///
/// Credentials are bound at construction and sent as a bearer header on every request.
#[derive(Debug, Clone)]
pub struct CloudClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl CloudClient {
    pub fn new(cfg: &CloudConfig) -> Result<Self, CloudError> {
        cfg.validate()?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", cfg.api_key.trim()))
            .map_err(|_| CloudError::InvalidCredential)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            page_size: cfg.page_size,
        })
    }

    /// List every instance, following the pagination cursor to the last page.
    ///
    /// A cursor handed out twice is an invalid response.
    pub async fn fetch_instances(&self) -> Result<Vec<Instance>, CloudError> {
        let url = format!("{}/instances", self.base_url);
        let per_page = self.page_size.to_string();
        let mut cursor = String::new();
        let mut seen = HashSet::new();
        let mut instances = Vec::new();

        loop {
            let mut request = self.http.get(&url).query(&[("per_page", per_page.as_str())]);
            if !cursor.is_empty() {
                request = request.query(&[("cursor", cursor.as_str())]);
            }

            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            if status != StatusCode::OK {
                return Err(CloudError::UnexpectedStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            let page: InstancePage = serde_json::from_str(&body).map_err(|e| {
                CloudError::InvalidResponse(format!("failed to parse instance list: {e}, body: {body}"))
            })?;
            trace!(page_len = page.instances.len(), "instance page received");
            instances.extend(page.instances);

            let next = page.meta.links.next;
            if next.is_empty() {
                break;
            }
            if !seen.insert(next.clone()) {
                return Err(CloudError::InvalidResponse(format!(
                    "pagination cursor repeated after {} pages: {next}",
                    seen.len()
                )));
            }
            cursor = next;
        }

        debug!(instances = instances.len(), "instance list fetched");
        Ok(instances)
    }

    /// Send the reboot command. Only `204 No Content` counts as accepted.
    pub async fn reboot(&self, id: &InstanceId) -> Result<(), CloudError> {
        let response = self
            .http
            .post(format!("{}/instances/{}/reboot", self.base_url, id))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(CloudError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }

    /// Current status string of one instance; `Unknown` when the body carries none.
    ///
    /// The HTTP status is not checked: an error answer with a JSON body (`404`, `401`,
    /// `500`, ...) reads as `Unknown`. Only a body that is not JSON is an error.
    pub async fn fetch_status(&self, id: &InstanceId) -> Result<String, CloudError> {
        let response = self
            .http
            .get(format!("{}/instances/{}", self.base_url, id))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let envelope: InstanceEnvelope = serde_json::from_str(&body).map_err(|e| {
            CloudError::InvalidResponse(format!(
                "failed to parse instance ({status}): {e}, body: {body}"
            ))
        })?;
        if !status.is_success() {
            debug!(%id, status = status.as_u16(), "status query answered with an error body");
        }
        Ok(envelope.into_status())
    }
}

#[async_trait]
impl InstanceDirectory for CloudClient {
    async fn list_instances(&self) -> Result<Vec<Instance>, CoreError> {
        self.fetch_instances().await.map_err(|e| {
            warn!(error = %e, "failed to retrieve instance list");
            CoreError::DirectoryUnavailable(e.to_string())
        })
    }
}

#[async_trait]
impl InstanceControl for CloudClient {
    async fn restart(&self, id: &InstanceId) -> Result<(), CoreError> {
        self.reboot(id)
            .await
            .map_err(|e| CoreError::RestartRejected(e.to_string()))
    }

    async fn status(&self, id: &InstanceId) -> Result<String, CoreError> {
        self.fetch_status(id)
            .await
            .map_err(|e| CoreError::StatusQueryFailed(e.to_string()))
    }
}
