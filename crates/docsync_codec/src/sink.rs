//! Observability sink for dropped documents.
//!
//! Batch decoding never fails as a whole: a malformed item is dropped and
//! handed to a [`ReportSink`] instead. What a report means is up to the
//! host; the shipped sinks log or collect.

use crate::error::DecodeError;
use crate::id::DocumentId;
use parking_lot::Mutex;

/// Receives one report per document dropped during batch decoding.
///
/// Implementations must be cheap and must not fail; a report is a
/// notification, not a recovery point.
pub trait ReportSink: Send + Sync {
    /// Reports one dropped document.
    fn report(&self, error: DecodeError);
}

/// A sink that logs every dropped document at `warn` level.
///
/// This is the default sink of the typed collection front-end.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&self, error: DecodeError) {
        tracing::warn!(id = %error.id, error = %error.source, "dropping undecodable document");
    }
}

/// A sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn report(&self, _error: DecodeError) {}
}

/// A sink that collects reports in memory, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<DecodeError>>,
}

impl MemorySink {
    /// Creates an empty collecting sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of reports received so far.
    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    /// Returns true if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }

    /// Drains and returns all collected reports, oldest first.
    pub fn take(&self) -> Vec<DecodeError> {
        std::mem::take(&mut *self.reports.lock())
    }

    /// Returns the identities of all reported documents, oldest first.
    pub fn reported_ids(&self) -> Vec<DocumentId> {
        self.reports.lock().iter().map(|e| e.id.clone()).collect()
    }
}

impl ReportSink for MemorySink {
    fn report(&self, error: DecodeError) {
        self.reports.lock().push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentId;

    fn sample_error(id: &str) -> DecodeError {
        DecodeError::new(
            DocumentId::new(id),
            serde_json::from_str::<u32>("\"x\"").unwrap_err(),
        )
    }

    #[test]
    fn memory_sink_collects_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.report(sample_error("a"));
        sink.report(sample_error("b"));

        assert_eq!(sink.len(), 2);
        let ids = sink.reported_ids();
        assert_eq!(ids[0].as_str(), "a");
        assert_eq!(ids[1].as_str(), "b");
    }

    #[test]
    fn memory_sink_take_drains() {
        let sink = MemorySink::new();
        sink.report(sample_error("a"));

        let drained = sink.take();
        assert_eq!(drained.len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn null_sink_discards() {
        NullSink.report(sample_error("a"));
    }
}
