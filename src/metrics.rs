use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::AlignError;

/// Metrics observer for pair alignments.
///
/// Called once for every pair the engine actually computes, including pairs
/// that fail. Pairs skipped because a batch was cancelled are not reported.
pub trait AlignMetrics: Send + Sync {
    fn record_alignment(&self, latency: Duration, result: Result<(), AlignError>);
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn AlignMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start(recorder: Option<&Arc<dyn AlignMetrics>>) -> Option<Self> {
        recorder.map(|recorder| Self {
            recorder: Arc::clone(recorder),
            start: Instant::now(),
        })
    }

    pub(crate) fn record(self, result: Result<(), AlignError>) {
        self.recorder.record_alignment(self.start.elapsed(), result);
    }
}
