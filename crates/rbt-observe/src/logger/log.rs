use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, fmt::time::OffsetTime, layer::Layered,
    layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::logger::{config::LoggerConfig, error::LoggerError, format::LoggerFormat};

type Filtered = Layered<EnvFilter, Registry>;
type Output = Box<dyn Layer<Filtered> + Send + Sync + 'static>;

/// Build the output layer for `cfg.format` and install it behind the level filter.
pub(crate) fn install(cfg: &LoggerConfig, offset: UtcOffset) -> Result<(), LoggerError> {
    let filter = mk_filter(&cfg.level)?;
    let output = match cfg.format {
        LoggerFormat::Text => text_layer(cfg, offset),
        LoggerFormat::Json => json_layer(cfg, offset),
        LoggerFormat::Journald => journald_layer(cfg)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
        .map_err(as_error)
}

// Text lines already carry `batch{..}:server{..}` as the span prefix.
fn text_layer(cfg: &LoggerConfig, offset: UtcOffset) -> Output {
    fmt::layer()
        .with_ansi(cfg.use_color)
        .with_target(cfg.with_targets)
        .with_timer(OffsetTime::new(offset, Rfc3339))
        .boxed()
}

// `span` holds the innermost span (`server` or `batch`); `spans` the whole chain,
// so a server line still carries its batch name and run id.
fn json_layer(cfg: &LoggerConfig, offset: UtcOffset) -> Output {
    fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(cfg.span_list)
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_timer(OffsetTime::new(offset, Rfc3339))
        .boxed()
}

fn mk_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(level).map_err(|_| LoggerError::InvalidLogLevel(level.to_string()))
}

fn as_error(e: impl std::fmt::Display) -> LoggerError {
    let s = e.to_string();
    if s.contains("SetGlobalDefaultError") || s.contains("global default trace dispatcher") {
        LoggerError::AlreadyInitialized
    } else {
        LoggerError::InitializationFailed(s)
    }
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald_layer(cfg: &LoggerConfig) -> Result<Output, LoggerError> {
    let layer = tracing_journald::layer()
        .map_err(|e| LoggerError::InitializationFailed(format!("journald: {e}")))?
        .with_syslog_identifier(cfg.syslog_identifier.clone());
    Ok(layer.boxed())
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald_layer(_cfg: &LoggerConfig) -> Result<Output, LoggerError> {
    Err(LoggerError::JournaldNotSupported)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::info_span;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl Capture {
        fn lines(&self) -> Vec<serde_json::Value> {
            let raw = String::from_utf8(self.0.lock().unwrap().clone()).unwrap();
            raw.lines().map(|l| serde_json::from_str(l).unwrap()).collect()
        }
    }

    #[test]
    fn bad_level_is_typed_error() {
        assert!(matches!(
            mk_filter("rbt=loud"),
            Err(LoggerError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn json_lines_carry_batch_and_server_spans() {
        let capture = Capture::default();
        let layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(capture.clone());
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            let batch = info_span!("batch", batch = "batch1", run_id = "r-1");
            let _b = batch.enter();
            let server = info_span!("server", server = "web-1");
            let _s = server.enter();
            tracing::info!("restart accepted");
        });

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["span"]["server"], "web-1");
        assert_eq!(lines[0]["spans"][0]["batch"], "batch1");
        assert_eq!(lines[0]["spans"][0]["run_id"], "r-1");
    }

    #[cfg(not(feature = "journald"))]
    #[test]
    fn journald_without_feature_is_rejected() {
        assert!(matches!(
            journald_layer(&LoggerConfig::default()),
            Err(LoggerError::JournaldNotSupported)
        ));
    }

    #[test]
    fn second_install_is_rejected() {
        let cfg = LoggerConfig {
            level: "warn".into(),
            use_color: false,
            ..Default::default()
        };
        // first call may lose to another test in this binary
        let _ = install(&cfg, UtcOffset::UTC);
        let json = LoggerConfig {
            format: LoggerFormat::Json,
            ..cfg
        };
        assert!(matches!(
            install(&json, UtcOffset::UTC),
            Err(LoggerError::AlreadyInitialized)
        ));
    }
}
