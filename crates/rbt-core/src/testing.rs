use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use rbt_model::{Batch, BatchReport, Instance, InstanceId};

use crate::{BatchSource, CoreError, InstanceControl, InstanceDirectory, Reporter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Restart(String),
    Status(String),
}

/// Scripted control service: fixed listing, per-id queue of status replies.
pub struct FakeCloud {
    listing: Option<Vec<Instance>>,
    reject_restart: bool,
    statuses: Mutex<HashMap<String, VecDeque<Option<String>>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeCloud {
    pub fn with_instances(instances: Vec<Instance>) -> Self {
        Self {
            listing: Some(instances),
            reject_restart: false,
            statuses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            listing: None,
            ..Self::with_instances(Vec::new())
        }
    }

    pub fn rejecting_restarts(mut self) -> Self {
        self.reject_restart = true;
        self
    }

    /// Queue status replies for `id`; `None` simulates a failed query.
    pub fn script(self, id: &str, replies: &[Option<&str>]) -> Self {
        self.statuses.lock().unwrap().insert(
            id.to_string(),
            replies.iter().map(|r| r.map(str::to_string)).collect(),
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn listings(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::List).count()
    }

    pub fn calls_for(&self, id: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Restart(x) | Call::Status(x) if x == id))
            .collect()
    }

    pub fn status_queries(&self, id: &str) -> usize {
        self.calls_for(id)
            .iter()
            .filter(|c| matches!(c, Call::Status(_)))
            .count()
    }
}

#[async_trait]
impl InstanceDirectory for FakeCloud {
    async fn list_instances(&self) -> Result<Vec<Instance>, CoreError> {
        self.calls.lock().unwrap().push(Call::List);
        self.listing
            .clone()
            .ok_or_else(|| CoreError::DirectoryUnavailable("503 Service Unavailable".into()))
    }
}

#[async_trait]
impl InstanceControl for FakeCloud {
    async fn restart(&self, id: &InstanceId) -> Result<(), CoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Restart(id.to_string()));
        if self.reject_restart {
            return Err(CoreError::RestartRejected("409 Conflict".into()));
        }
        Ok(())
    }

    async fn status(&self, id: &InstanceId) -> Result<String, CoreError> {
        self.calls.lock().unwrap().push(Call::Status(id.to_string()));
        let reply = self
            .statuses
            .lock()
            .unwrap()
            .get_mut(id.as_str())
            .and_then(|q| q.pop_front())
            .unwrap_or(Some("active".to_string()));
        reply.ok_or_else(|| CoreError::StatusQueryFailed("connection reset".into()))
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<BatchReport>>,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<BatchReport> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl Reporter for RecordingReporter {
    async fn report(&self, report: &BatchReport) {
        self.reports.lock().unwrap().push(report.clone());
    }
}

#[derive(Default)]
pub struct MapSource {
    batches: HashMap<String, Vec<String>>,
}

impl MapSource {
    pub fn with(mut self, name: &str, servers: &[&str]) -> Self {
        self.batches.insert(
            name.to_string(),
            servers.iter().map(|s| s.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl BatchSource for MapSource {
    async fn load(&self, name: &str) -> Result<Batch, CoreError> {
        self.batches
            .get(name)
            .map(|servers| Batch::new(name, servers.clone()))
            .ok_or_else(|| CoreError::BatchConfigMissing {
                batch: name.to_string(),
                reason: "no such batch".into(),
            })
    }
}
