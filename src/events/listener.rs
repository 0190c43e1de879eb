use crate::file_storage::FileStorage;
use crate::models::{FileRecord, Method, PathOptions};

/// Name of the event dispatched for every path or URL resolution
pub const PATH_EVENT: &str = "FileStorage.path";

/// Payload of a path resolution
///
/// `options` still contains the `method` key along with whatever the caller
/// passed; `entity` gives listeners the full record and its bound builder.
pub struct PathEvent<'a> {
    pub method: Method,
    pub options: &'a PathOptions,
    pub entity: &'a FileStorage,
}

impl<'a> PathEvent<'a> {
    pub fn name(&self) -> &'static str {
        PATH_EVENT
    }

    pub fn record(&self) -> &'a FileRecord {
        self.entity.record()
    }
}

/// Trait defining the interface for path event listeners
pub trait PathListener: Send + Sync {
    /// Return a result to stop propagation, `None` to let the next listener try
    fn handle(&self, event: &PathEvent<'_>) -> Option<String>;

    /// Check if this listener wants to see the event at all
    fn supports(&self, _event: &PathEvent<'_>) -> bool {
        true
    }
}

/// Listener backed by a closure
pub struct FnListener<F> {
    handler: F,
}

impl<F> FnListener<F>
where
    F: Fn(&PathEvent<'_>) -> Option<String> + Send + Sync,
{
    pub fn new(handler: F) -> Self {
        FnListener { handler }
    }
}

impl<F> PathListener for FnListener<F>
where
    F: Fn(&PathEvent<'_>) -> Option<String> + Send + Sync,
{
    fn handle(&self, event: &PathEvent<'_>) -> Option<String> {
        (self.handler)(event)
    }
}
