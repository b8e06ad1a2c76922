use rbt_model::Instance;
use serde::Deserialize;

/// One page of `GET /instances`.
#[derive(Debug, Deserialize)]
pub(crate) struct InstancePage {
    #[serde(default)]
    pub instances: Vec<Instance>,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Meta {
    #[serde(default)]
    pub links: Links,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Links {
    /// Cursor for the next page; empty on the last page.
    #[serde(default)]
    pub next: String,
}

/// Body of `GET /instances/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct InstanceEnvelope {
    #[serde(default)]
    pub instance: InstanceDetail,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InstanceDetail {
    pub status: Option<String>,
}

/// Reported when the body parses but carries no status.
pub(crate) const UNKNOWN_STATUS: &str = "Unknown";

impl InstanceEnvelope {
    pub fn into_status(self) -> String {
        self.instance
            .status
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string())
    }
}
