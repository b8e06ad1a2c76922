use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque instance identifier issued by the control service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Compute instance as listed by the control service.
///
/// Only the fields needed for label resolution are kept; anything else in the listing is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    #[serde(default)]
    pub label: String,
}

impl Instance {
    pub fn new(label: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: InstanceId::new(id),
            label: label.into(),
        }
    }
}
