use std::io::Write;
use std::sync::Mutex;

use crate::error::ReportError;

/// Human-facing output stream, stdout unless told otherwise.
pub struct ConsoleChannel {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleChannel {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    pub fn emit(&self, text: &str) -> Result<(), ReportError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| ReportError::Console(std::io::Error::other("console lock poisoned")))?;
        out.write_all(text.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self::stdout()
    }
}
