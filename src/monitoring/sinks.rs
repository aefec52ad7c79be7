/*!
 * Event Sinks
 * Destinations for execution events: tracing, in-memory log, fan-out
 */

use super::events::{ExecutionEvent, Severity};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Receiver of execution events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ExecutionEvent);
}

/// Writes each event through `tracing` at its severity
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: ExecutionEvent) {
        let subject = event.subject();
        match event.severity() {
            Severity::Debug => debug!(unit = %subject, "{}", event),
            Severity::Info => info!(unit = %subject, "{}", event),
            Severity::Warn => warn!(unit = %subject, "{}", event),
            Severity::Error => error!(unit = %subject, "{}", event),
        }
    }
}

/// Records events in memory
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<ExecutionEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event recorded so far
    pub fn events(&self) -> Vec<ExecutionEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Events matching a predicate
    pub fn filter<F>(&self, predicate: F) -> Vec<ExecutionEvent>
    where
        F: Fn(&ExecutionEvent) -> bool,
    {
        self.events
            .lock()
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    /// Events at or above a severity
    pub fn at_least(&self, severity: Severity) -> Vec<ExecutionEvent> {
        self.filter(|e| e.severity() >= severity)
    }

    /// Export as a JSON array
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.events.lock())
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: ExecutionEvent) {
        self.events.lock().push(event);
    }
}

/// Forwards every event to several sinks, in order
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanoutSink {
    fn emit(&self, event: ExecutionEvent) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.emit(event.clone());
            }
            last.emit(event);
        }
    }
}
