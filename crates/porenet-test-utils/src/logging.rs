//! A minimal `tracing` subscriber that counts warnings.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Metadata, Subscriber};

/// Counts `WARN` events seen while installed.
///
/// Install for a closure with `tracing::subscriber::with_default`.
/// Clones share the count.
///
/// ```
/// use porenet_test_utils::WarnCounter;
///
/// let counter = WarnCounter::new();
/// tracing::subscriber::with_default(counter.clone(), || {
///     tracing::warn!("first");
///     tracing::info!("ignored");
/// });
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct WarnCounter {
    warnings: Arc<AtomicUsize>,
    next_span: Arc<AtomicU64>,
}

impl WarnCounter {
    pub fn new() -> Self {
        Self {
            warnings: Arc::new(AtomicUsize::new(0)),
            next_span: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Warnings recorded so far.
    pub fn count(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }
}

impl Default for WarnCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscriber for WarnCounter {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(self.next_span.fetch_add(1, Ordering::Relaxed))
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        if *event.metadata().level() == Level::WARN {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}
