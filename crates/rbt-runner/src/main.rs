use std::sync::Arc;

use tracing::{info, warn};

use rbt_cloud::CloudClient;
use rbt_core::{BatchOrchestrator, JsonDirSource};
use rbt_model::Clock;
use rbt_observe::logger_init;
use rbt_report::{ConsoleChannel, LogFileChannel, ReportDispatcher, TwilioSink};

mod config;
use config::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) Clock, config + logger; the local offset is only readable while single-threaded
    let clock = Clock::local();
    let cfg = AppConfig::load()?;
    logger_init(&cfg.logger, clock.offset())?;
    info!(batches = ?cfg.batches, batch_dir = %cfg.batch_dir.display(), "configuration loaded");

    // 2) Control service
    let cloud = Arc::new(CloudClient::new(&cfg.cloud)?);

    // 3) Reporting
    let mut dispatcher = ReportDispatcher::new(ConsoleChannel::stdout(), LogFileChannel::new(&cfg.log_dir));
    match cfg.notify.missing_field() {
        None => {
            let sink = Arc::new(TwilioSink::new(&cfg.notify)?);
            dispatcher = dispatcher.with_notifier(sink, cfg.notify.recipients.clone());
            info!(recipients = cfg.notify.recipients.len(), "chat notifications enabled");
        }
        Some(field) => warn!(missing = field, "chat notifications disabled"),
    }

    // 4) Run every batch, one after another
    let policy = cfg.policy.retry_policy();
    info!(
        first_check_secs = policy.first_check_delay.as_secs(),
        max_wait_secs = policy.max_wait().as_secs(),
        "verification policy"
    );
    let orchestrator =
        BatchOrchestrator::new(cloud.clone(), cloud, policy, Arc::new(dispatcher)).with_clock(clock);
    let source = JsonDirSource::new(&cfg.batch_dir);

    let reports = orchestrator.run_all(&source, &cfg.batches).await;
    info!(
        completed = reports.len(),
        configured = cfg.batches.len(),
        "all batches processed"
    );

    Ok(())
}
