use time::{OffsetDateTime, UtcOffset};

/// Wall clock with the local offset fixed at construction.
///
/// `time` only reads the local offset while the process is single-threaded, so the
/// offset is resolved once at startup and every later stamp reuses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    offset: UtcOffset,
}

impl Clock {
    /// Resolve the local offset now, falling back to UTC when it cannot be determined.
    pub fn local() -> Self {
        Self::fixed(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
    }

    pub fn fixed(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::fixed(UtcOffset::UTC)
    }
}
