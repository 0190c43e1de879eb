use crate::config::Config;
use crate::events::{BuilderListener, EventManager, FnListener, PathEvent, PathListener};
use crate::file_storage::FileStorage;
use crate::models::{FileRecord, PathBuilderSettings, PathOptions};
use crate::path_builder::{BasePathBuilder, PathBuilder, PathBuilderError, PathBuilderRegistry};
use std::sync::Arc;

/// Shared registry and event manager used to create file entities
#[derive(Debug, Clone)]
pub struct PathResolver {
    registry: Arc<PathBuilderRegistry>,
    events: Arc<EventManager>,
}

impl PathResolver {
    pub fn builder() -> PathResolverBuilder {
        PathResolverBuilder::default()
    }

    /// Resolver whose default path builder comes from configuration
    pub fn from_config(config: &Config) -> Result<Self, PathBuilderError> {
        Self::builder()
            .default_builder(config.path_builder.name(), config.default_builder_options())
            .build()
    }

    pub fn registry(&self) -> &PathBuilderRegistry {
        &self.registry
    }

    pub fn events(&self) -> &Arc<EventManager> {
        &self.events
    }

    /// Wrap a record; the named path builder, if any, is bound immediately
    pub fn entity(
        &self,
        record: FileRecord,
        settings: PathBuilderSettings,
    ) -> Result<FileStorage, PathBuilderError> {
        FileStorage::new(record, settings, self.events.clone(), &self.registry)
    }

    /// Wrap a record that uses the default path builder
    pub fn default_entity(&self, record: FileRecord) -> FileStorage {
        FileStorage::unbound(record, self.events.clone())
    }
}

/// Collects strategies and listeners before they are frozen into a resolver
pub struct PathResolverBuilder {
    registry: PathBuilderRegistry,
    listeners: Vec<Arc<dyn PathListener>>,
    default_builder: Option<(String, PathOptions)>,
    adapters: Vec<String>,
}

impl Default for PathResolverBuilder {
    fn default() -> Self {
        PathResolverBuilder {
            registry: PathBuilderRegistry::default(),
            listeners: Vec::new(),
            default_builder: None,
            adapters: Vec::new(),
        }
    }
}

impl PathResolverBuilder {
    /// Register a custom strategy by name
    pub fn register<F>(mut self, name: &str, constructor: F) -> Self
    where
        F: Fn(PathOptions) -> Result<Arc<dyn PathBuilder>, PathBuilderError> + Send + Sync + 'static,
    {
        self.registry.register(name, constructor);
        self
    }

    /// Add a listener that runs before the builder listener
    pub fn listener(mut self, listener: Arc<dyn PathListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Add a closure listener that runs before the builder listener
    pub fn on_fn<F>(self, handler: F) -> Self
    where
        F: Fn(&PathEvent<'_>) -> Option<String> + Send + Sync + 'static,
    {
        self.listener(Arc::new(FnListener::new(handler)))
    }

    /// Strategy used for entities constructed without one
    pub fn default_builder(mut self, name: &str, options: PathOptions) -> Self {
        self.default_builder = Some((name.to_string(), options));
        self
    }

    /// Only let the builder listener answer for these adapters
    pub fn adapters<I, S>(mut self, adapters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.adapters = adapters.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<PathResolver, PathBuilderError> {
        let (name, options) = self
            .default_builder
            .unwrap_or_else(|| (BasePathBuilder::NAME.to_string(), PathOptions::new()));
        let default_builder = self.registry.create(&name, options)?;

        tracing::info!(
            "Path resolver ready: default path builder {}, {} override listener(s), strategies {:?}",
            default_builder.name(),
            self.listeners.len(),
            self.registry.names()
        );

        let builder_listener = BuilderListener::new(default_builder).for_adapters(self.adapters);
        let events = EventManager::new(self.listeners).add_listener(Arc::new(builder_listener));

        Ok(PathResolver {
            registry: Arc::new(self.registry),
            events: Arc::new(events),
        })
    }
}
