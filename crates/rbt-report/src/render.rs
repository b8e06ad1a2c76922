//! Text renderings of a batch report.
//!
//! Every outcome appears exactly once per rendering, in batch order.

use std::fmt::Write;

use rbt_model::{BatchReport, OutcomeStatus};

const BADGES: &[(&str, &str)] = &[
    ("active", "✅"),
    ("Restart Completed & Active", "✅"),
    ("Status Not Active", "⚠️"),
    (OutcomeStatus::FAILED, "❌"),
];

const UNKNOWN_BADGE: &str = "❓";

/// Chat badge for a status.
pub fn badge(status: &OutcomeStatus) -> &'static str {
    BADGES
        .iter()
        .find(|(s, _)| *s == status.as_str())
        .map(|(_, b)| *b)
        .unwrap_or(UNKNOWN_BADGE)
}

/// Human-readable summary for the terminal.
pub fn console(report: &BatchReport) -> String {
    let name = &report.batch;
    let mut out = format!("--{name}--\n\n");
    for o in &report.outcomes {
        let _ = writeln!(out, "{name} - {}", o.timestamp_display());
        let _ = writeln!(out, "Restarting server: `{}`", o.server);
        let _ = write!(out, "Status: {}\n\n", o.status);
    }
    let _ = writeln!(out, "End of {name}.");
    out
}

/// Summary persisted to the batch log file.
pub fn log(report: &BatchReport) -> String {
    let name = &report.batch;
    let mut out = format!("--{name}--\n\n");
    for o in &report.outcomes {
        let _ = writeln!(out, "{}: Restarting `{}`", o.timestamp_display(), o.server);
        let _ = write!(out, "Status: {}\n\n", o.status);
    }
    let _ = writeln!(out, "End of {name}.");
    out
}

/// Chat message body.
pub fn chat(report: &BatchReport) -> String {
    let name = &report.batch;
    let mut out = format!("{name} 🕒\n\n");
    for o in &report.outcomes {
        let _ = writeln!(out, "{}: Restarting `{}`", o.timestamp_display(), o.server);
        let _ = write!(out, "{} *{}*\n\n", badge(&o.status), o.status);
    }
    let _ = writeln!(out, "End of {name}.");
    out
}
