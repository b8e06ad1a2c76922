use std::sync::Arc;

use async_trait::async_trait;
use rbt_core::Reporter;
use rbt_model::BatchReport;
use tracing::{error, info, instrument, warn};

use crate::console::ConsoleChannel;
use crate::logfile::LogFileChannel;
use crate::notify::NotificationSink;
use crate::render;

/// Fans a finished batch out to console, log file and chat, in that order.
///
/// Chat delivery always runs last.
pub struct ReportDispatcher {
    console: ConsoleChannel,
    logfile: LogFileChannel,
    notifier: Option<Arc<dyn NotificationSink>>,
    recipients: Vec<String>,
}

impl ReportDispatcher {
    pub fn new(console: ConsoleChannel, logfile: LogFileChannel) -> Self {
        Self {
            console,
            logfile,
            notifier: None,
            recipients: Vec::new(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>, recipients: Vec<String>) -> Self {
        self.notifier = Some(notifier);
        self.recipients = recipients;
        self
    }

    async fn notify(&self, report: &BatchReport) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        let message = render::chat(report);
        for recipient in &self.recipients {
            match notifier.deliver(recipient, &message).await {
                Ok(sid) => info!(recipient = %recipient, sid = %sid, "chat summary sent"),
                Err(e) => warn!(recipient = %recipient, error = %e, "chat summary not delivered"),
            }
        }
    }
}

#[async_trait]
impl Reporter for ReportDispatcher {
    #[instrument(level = "debug", skip_all, fields(batch = %report.batch))]
    async fn report(&self, report: &BatchReport) {
        if let Err(e) = self.console.emit(&render::console(report)) {
            error!(error = %e, "console summary failed");
        }

        match self.logfile.write(&report.batch, &render::log(report)).await {
            Ok(path) => info!(path = %path.display(), "batch log saved"),
            Err(e) => error!(error = %e, "batch log not saved"),
        }

        self.notify(report).await;
    }
}
