//! Reporting for finished batches.
//!
//! A [`ReportDispatcher`] renders each [`BatchReport`](rbt_model::BatchReport) three ways and
//! writes it to the console, to a per-batch log file, and to every chat recipient.

mod error;
pub use error::ReportError;

pub mod render;

mod console;
pub use console::ConsoleChannel;

mod logfile;
pub use logfile::LogFileChannel;

pub mod notify;
pub use notify::{NotificationSink, NotifyConfig, TwilioSink};

mod dispatcher;
pub use dispatcher::ReportDispatcher;
