use std::io::Write;

/// Abstraction of the process environment, so commands can be driven from
/// tests without touching real stdout/stderr.
///
/// Exit codes are not part of the contract: fatal errors propagate as
/// `Result` all the way out of `main`.
pub trait Host: Send + Sync {
    /// Where scored records go (stdout in the real host).
    fn output(&mut self) -> impl Write;

    /// Where diagnostics go (stderr in the real host).
    fn error(&mut self) -> impl Write;
}

/// Host that captures output in memory. Used by both unit and integration
/// tests, hence not gated on `cfg(test)` alone.
#[cfg(any(debug_assertions, test))]
#[derive(Debug, Default)]
pub struct CapturingHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
}

#[cfg(any(debug_assertions, test))]
impl CapturingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written to the output channel so far, as UTF-8.
    #[must_use]
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

#[cfg(any(debug_assertions, test))]
impl Host for CapturingHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }
}
