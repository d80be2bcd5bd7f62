//! Reporting side channel for non-fatal problems
//!
//! The composer and the token resolver never fail; they report what went wrong and
//! degrade. Production code reports through `tracing`, tests plug in their own
//! implementation and assert on what was reported.

use tracing::{error, warn};

/// Sink for problems that do not abort the invocation
pub trait Reporter: Send + Sync {
    /// Something was wrong with the input or a resource and has been skipped
    fn error(&self, message: &str);

    /// Something looked odd but was handled
    fn warn(&self, message: &str);
}

/// Reporter that forwards to the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn error(&self, message: &str) {
        error!("{}", message);
    }

    fn warn(&self, message: &str) {
        warn!("{}", message);
    }
}
