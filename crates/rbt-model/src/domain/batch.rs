use crate::{Label, Outcome};

/// Named, ordered list of server labels restarted together.
///
/// Loaded once at the start of a batch run and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    name: String,
    servers: Vec<Label>,
}

impl Batch {
    pub fn new(name: impl Into<String>, servers: Vec<Label>) -> Self {
        Self {
            name: name.into(),
            servers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn servers(&self) -> &[Label] {
        &self.servers
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

/// Result set of one batch run, handed to reporting.
///
/// Outcomes are kept in the order the servers appear in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub batch: String,
    pub outcomes: Vec<Outcome>,
}

impl BatchReport {
    pub fn new(batch: impl Into<String>, outcomes: Vec<Outcome>) -> Self {
        Self {
            batch: batch.into(),
            outcomes,
        }
    }
}
