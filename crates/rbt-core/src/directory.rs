use std::collections::HashMap;

use rbt_model::{Instance, InstanceId, Label};
use tracing::{debug, warn};

use crate::control::InstanceDirectory;

/// Label → instance id lookup built from one listing.
///
/// Read-only once built. Duplicate labels resolve to the last listed instance.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    by_label: HashMap<Label, InstanceId>,
}

impl Directory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_instances(instances: impl IntoIterator<Item = Instance>) -> Self {
        let mut by_label = HashMap::new();
        for inst in instances {
            if let Some(prev) = by_label.insert(inst.label.clone(), inst.id) {
                debug!(label = %inst.label, replaced = %prev, "duplicate label in listing");
            }
        }
        Self { by_label }
    }

    /// Take a fresh snapshot from `source`.
    ///
    /// A failed listing yields an empty directory so every label in the batch is unresolved.
    pub async fn snapshot(source: &dyn InstanceDirectory) -> Self {
        match source.list_instances().await {
            Ok(instances) => {
                let dir = Self::from_instances(instances);
                debug!(instances = dir.len(), "directory snapshot taken");
                dir
            }
            Err(e) => {
                warn!(error = %e, "instance listing failed; no label will resolve");
                Self::empty()
            }
        }
    }

    pub fn resolve(&self, label: &str) -> Option<&InstanceId> {
        self.by_label.get(label)
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}
