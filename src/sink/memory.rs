//! In-memory capture sink. Tests assert on exactly what a stream delivered;
//! embedders can use it to route log text into their own machinery.

use super::{Channel, LogId, Sink};
use std::sync::Mutex;

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub channel: Channel,
    pub text: String,
    pub id: LogId,
}

/// Mutex-backed so concurrent streams can share one capture buffer.
#[derive(Debug, Default)]
pub struct MemorySink {
    deliveries: Mutex<Vec<Delivery>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every call so far, in call order.
    ///
    /// # Panics
    /// Panics if a previous holder of the lock panicked.
    #[must_use]
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    /// Only the calls that went through the given channel.
    #[must_use]
    pub fn on_channel(&self, channel: Channel) -> Vec<Delivery> {
        self.deliveries()
            .into_iter()
            .filter(|d| d.channel == channel)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reusing one sink across test cases needs a reset between them.
    pub fn clear(&self) {
        self.deliveries.lock().unwrap().clear();
    }

    fn record(&self, channel: Channel, text: &str, id: &LogId) {
        self.deliveries.lock().unwrap().push(Delivery {
            channel,
            text: text.to_string(),
            id: id.clone(),
        });
    }
}

impl Sink for MemorySink {
    fn accept_message(&self, text: &str, id: &LogId) {
        self.record(Channel::Message, text, id);
    }

    fn accept_diagnostic(&self, text: &str, id: &LogId) {
        self.record(Channel::Diagnostic, text, id);
    }

    fn report_error(&self, text: &str, id: &LogId) {
        self.record(Channel::Report, text, id);
    }
}
