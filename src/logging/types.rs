//! The [`Log`] trait shared by the production logger and test doubles.

/// Abstraction over logging backends.
///
/// Operations log through this trait so they can be driven by a recording
/// implementation in tests; [`Logger`](super::logger::Logger) is the
/// production backend.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
}
