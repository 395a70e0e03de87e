//! Parse run metrics.
//!
//! Collected only by `HdateParser::parse_verbose`; the plain `parse` path
//! does not read the clock.

use serde::Serialize;
use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

/// Wall-clock time spent in each stage of one parse.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageMetrics {
    /// Trigger scan plus grammar matching.
    pub capture: Duration,
    pub canonicalize: Duration,
    pub resolve: Duration,
    /// Whole run, including the stages above.
    pub total: Duration,
}

impl StageMetrics {
    /// Time not attributed to any stage.
    pub fn overhead(&self) -> Duration {
        self.total.saturating_sub(self.capture + self.canonicalize + self.resolve)
    }
}
