use crate::chain::StepProgress;

/// Observer for per-step progress. Implementations must be cheap; the
/// executor calls this between every progress increment.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, update: &StepProgress);
}

/// Sink that discards everything, for callers that do not watch progress.
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn on_progress(&self, _update: &StepProgress) {}
}
