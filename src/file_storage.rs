use crate::events::{EventManager, PathEvent};
use crate::models::{FileRecord, Method, PathBuilderSettings, PathOptions, METHOD_KEY};
use crate::path_builder::{PathBuilder, PathBuilderError, PathBuilderRegistry};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No listener resolved {method} for file {id}")]
    Unresolved { id: String, method: String },
}

/// A stored file together with the strategy that locates it
///
/// `full_path` and `url` are computed on every read. The path builder and
/// its options are fixed at construction.
pub struct FileStorage {
    record: FileRecord,
    path_builder: Option<Arc<dyn PathBuilder>>,
    path_builder_options: PathOptions,
    events: Arc<EventManager>,
}

impl FileStorage {
    /// Wrap a record, binding the named path builder right away if one is given
    pub fn new(
        record: FileRecord,
        settings: PathBuilderSettings,
        events: Arc<EventManager>,
        registry: &PathBuilderRegistry,
    ) -> Result<Self, PathBuilderError> {
        let path_builder = match settings.strategy_name() {
            Some(name) => {
                let builder = registry.create(name, settings.path_builder_options.clone())?;
                tracing::debug!("Bound path builder {} to file {}", builder.name(), record.id);
                Some(builder)
            }
            None => None,
        };

        Ok(FileStorage {
            record,
            path_builder,
            path_builder_options: settings.path_builder_options,
            events,
        })
    }

    /// Wrap a record without a path builder; resolution relies on listeners
    pub fn unbound(record: FileRecord, events: Arc<EventManager>) -> Self {
        FileStorage {
            record,
            path_builder: None,
            path_builder_options: PathOptions::new(),
            events,
        }
    }

    pub fn record(&self) -> &FileRecord {
        &self.record
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn path_builder(&self) -> Option<&Arc<dyn PathBuilder>> {
        self.path_builder.as_ref()
    }

    pub fn path_builder_options(&self) -> &PathOptions {
        &self.path_builder_options
    }

    /// Location of the file on its backend
    pub fn full_path(&self) -> Option<String> {
        self.path_with(PathOptions::new())
    }

    /// Public URL of the file
    pub fn url(&self) -> Option<String> {
        self.url_with(PathOptions::new())
    }

    /// Resolve a path, `fullPath` unless the options name another method
    pub fn path_with(&self, mut options: PathOptions) -> Option<String> {
        if Method::from_options(&options).is_none() {
            set_method(&mut options, &Method::FullPath);
        }
        self.resolve(options)
    }

    /// Resolve the URL; any `method` in the options is replaced
    pub fn url_with(&self, mut options: PathOptions) -> Option<String> {
        set_method(&mut options, &Method::Url);
        self.resolve(options)
    }

    /// Dispatch the path event and return the first listener result
    pub fn resolve(&self, mut options: PathOptions) -> Option<String> {
        let method = match Method::from_options(&options) {
            Some(method) => method,
            None => {
                set_method(&mut options, &Method::Path);
                Method::Path
            }
        };

        let event = PathEvent {
            method,
            options: &options,
            entity: self,
        };

        let result = self.events.dispatch(&event);
        if result.is_none() {
            tracing::warn!(
                "Unresolved {} for file {}: no listener set a result",
                event.method,
                self.record.id
            );
        }
        result
    }

    pub fn require_path(&self, options: PathOptions) -> Result<String, ResolveError> {
        let method = Method::from_options(&options).unwrap_or(Method::FullPath);
        self.path_with(options).ok_or_else(|| self.unresolved(&method))
    }

    pub fn require_url(&self, options: PathOptions) -> Result<String, ResolveError> {
        self.url_with(options).ok_or_else(|| self.unresolved(&Method::Url))
    }

    fn unresolved(&self, method: &Method) -> ResolveError {
        ResolveError::Unresolved {
            id: self.record.id.clone(),
            method: method.to_string(),
        }
    }
}

fn set_method(options: &mut PathOptions, method: &Method) {
    options.insert(METHOD_KEY.to_string(), Value::String(method.to_string()));
}

impl fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStorage")
            .field("record", &self.record)
            .field("path_builder", &self.path_builder.as_ref().map(|b| b.name()))
            .field("path_builder_options", &self.path_builder_options)
            .finish()
    }
}
