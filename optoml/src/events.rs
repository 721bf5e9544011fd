//! Exchange observability events.
//!
//! The client owns explicit observer lists and invokes them synchronously as
//! side channels: once when the compiled prompt is sent, once when the raw
//! reply arrives, and once per token-usage report. Observers never affect
//! control flow or the result of an exchange.

use optoml_core::TokenUsage;
use optoml_drivers::TokenUsageCallback;
use parking_lot::RwLock;
use std::sync::Arc;

/// An observability event emitted during a text-mode exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeEvent {
    /// The compiled instruction block was appended and sent.
    PromptSent(String),
    /// The backend's raw reply was received, before decoding.
    ResponseReceived(String),
}

/// Callback invoked with each exchange event.
pub type EventCallback = Arc<dyn Fn(&ExchangeEvent) + Send + Sync>;

/// Observer lists owned by the client.
#[derive(Default)]
pub(crate) struct EventRegistry {
    events: RwLock<Vec<EventCallback>>,
    usage: RwLock<Vec<TokenUsageCallback>>,
}

impl EventRegistry {
    pub(crate) fn on_event(&self, callback: EventCallback) {
        self.events.write().push(callback);
    }

    pub(crate) fn on_token_use(&self, callback: TokenUsageCallback) {
        self.usage.write().push(callback);
    }

    pub(crate) fn emit(&self, event: &ExchangeEvent) {
        for callback in self.events.read().iter() {
            callback(event);
        }
    }

    pub(crate) fn emit_usage(&self, usage: TokenUsage) {
        for callback in self.usage.read().iter() {
            callback(usage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_emit_reaches_all_observers() {
        let registry = EventRegistry::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for _ in 0..2 {
            let sink = seen.clone();
            registry.on_event(Arc::new(move |event: &ExchangeEvent| {
                sink.lock().push(event.clone());
            }));
        }

        registry.emit(&ExchangeEvent::PromptSent("p".into()));
        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn test_emit_usage() {
        let registry = EventRegistry::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        registry.on_token_use(Arc::new(move |usage| sink.lock().push(usage)));

        registry.emit_usage(TokenUsage::new(3, 4));
        assert_eq!(seen.lock().as_slice(), &[TokenUsage::new(3, 4)]);
    }

    #[test]
    fn test_emit_with_no_observers_is_fine() {
        let registry = EventRegistry::default();
        registry.emit(&ExchangeEvent::ResponseReceived("r".into()));
        registry.emit_usage(TokenUsage::default());
    }
}
