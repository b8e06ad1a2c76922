use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

use crate::{Clock, Label, OutcomeStatus};

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Recorded result of restarting and verifying one server within one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Wall-clock time at which verification completed.
    pub timestamp: OffsetDateTime,
    pub server: Label,
    pub status: OutcomeStatus,
}

impl Outcome {
    pub fn new(timestamp: OffsetDateTime, server: impl Into<Label>, status: OutcomeStatus) -> Self {
        Self {
            timestamp,
            server: server.into(),
            status,
        }
    }

    /// Create an outcome stamped with the current time of `clock`.
    pub fn stamped(clock: &Clock, server: impl Into<Label>, status: OutcomeStatus) -> Self {
        Self::new(clock.now(), server, status)
    }

    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS`.
    pub fn timestamp_display(&self) -> String {
        self.timestamp
            .format(TIMESTAMP_FORMAT)
            .unwrap_or_else(|_| self.timestamp.to_string())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn timestamp_display_has_no_offset() {
        let o = Outcome::new(
            datetime!(2024-03-05 07:08:09 UTC),
            "web-1",
            OutcomeStatus::reported("active"),
        );
        assert_eq!(o.timestamp_display(), "2024-03-05 07:08:09");
    }

    #[test]
    fn stamped_outcome_renders_in_clock_offset() {
        let o = Outcome::stamped(
            &Clock::fixed(time::macros::offset!(+2)),
            "web-1",
            OutcomeStatus::Failed,
        );
        assert_eq!(o.timestamp.offset(), time::macros::offset!(+2));
        assert_eq!(o.server, "web-1");
    }
}
