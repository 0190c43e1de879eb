use super::listener::{FnListener, PathEvent, PathListener};
use std::sync::Arc;

/// Ordered listeners for the path event
/// Returns the result of the first listener that sets one
#[derive(Clone, Default)]
pub struct EventManager {
    listeners: Vec<Arc<dyn PathListener>>,
}

impl EventManager {
    /// Create a new manager with the given listeners
    /// Listeners are tried in the order they are provided
    pub fn new(listeners: Vec<Arc<dyn PathListener>>) -> Self {
        EventManager { listeners }
    }

    /// Add a listener to the end of the chain
    pub fn add_listener(mut self, listener: Arc<dyn PathListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Add a closure listener to the end of the chain
    pub fn on_fn<F>(self, handler: F) -> Self
    where
        F: Fn(&PathEvent<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.add_listener(Arc::new(FnListener::new(handler)))
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn dispatch(&self, event: &PathEvent<'_>) -> Option<String> {
        for (index, listener) in self.listeners.iter().enumerate() {
            if !listener.supports(event) {
                tracing::debug!(
                    "Listener {} does not handle {} for file {}, skipping",
                    index,
                    event.name(),
                    event.record().id
                );
                continue;
            }

            if let Some(result) = listener.handle(event) {
                tracing::debug!(
                    "Listener {} resolved {} for file {}",
                    index,
                    event.method,
                    event.record().id
                );
                return Some(result);
            }
        }

        tracing::debug!(
            "No listener resolved {} for file {}",
            event.method,
            event.record().id
        );

        None
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
