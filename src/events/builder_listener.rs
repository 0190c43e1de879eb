use super::listener::{PathEvent, PathListener};
use crate::path_builder::PathBuilder;
use std::sync::Arc;

/// Answers path events with the entity's bound path builder,
/// or with the default one when the entity has none
pub struct BuilderListener {
    default_builder: Arc<dyn PathBuilder>,
    adapters: Vec<String>,
}

impl BuilderListener {
    pub fn new(default_builder: Arc<dyn PathBuilder>) -> Self {
        BuilderListener {
            default_builder,
            adapters: Vec::new(),
        }
    }

    /// Only answer for records stored on one of these adapters
    pub fn for_adapters<I, S>(mut self, adapters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.adapters = adapters.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_builder(&self) -> &Arc<dyn PathBuilder> {
        &self.default_builder
    }
}

impl PathListener for BuilderListener {
    fn handle(&self, event: &PathEvent<'_>) -> Option<String> {
        let builder = event
            .entity
            .path_builder()
            .unwrap_or(&self.default_builder);

        tracing::debug!(
            "Building {} for file {} with path builder {}",
            event.method,
            event.record().id,
            builder.name()
        );

        builder.build(&event.method, event.record(), event.options)
    }

    fn supports(&self, event: &PathEvent<'_>) -> bool {
        if self.adapters.is_empty() {
            return true;
        }
        match event.record().adapter.as_deref() {
            Some(adapter) => self.adapters.iter().any(|a| a.eq_ignore_ascii_case(adapter)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventManager;
    use crate::file_storage::FileStorage;
    use crate::models::{FileRecord, PathBuilderSettings, PathOptions};
    use crate::path_builder::PathBuilderRegistry;
    use crate::test_support::options;
    use serde_json::json;

    fn flat_default() -> Arc<dyn PathBuilder> {
        PathBuilderRegistry::default()
            .create(
                "local",
                options(json!({
                    "baseUrl": "http://default",
                    "randomPath": false,
                    "uuidFolder": false
                })),
            )
            .unwrap()
    }

    #[test]
    fn test_falls_back_to_default_builder() {
        let events = Arc::new(
            EventManager::default().add_listener(Arc::new(BuilderListener::new(flat_default()))),
        );
        let entity = FileStorage::unbound(FileRecord::new("abc123"), events);

        assert_eq!(entity.url(), Some("http://default/abc123".to_string()));
    }

    #[test]
    fn test_prefers_bound_builder() {
        let events = Arc::new(
            EventManager::default().add_listener(Arc::new(BuilderListener::new(flat_default()))),
        );
        let settings = PathBuilderSettings::new(
            "s3",
            options(json!({ "bucket": "uploads", "randomPath": false, "uuidFolder": false })),
        );
        let entity = FileStorage::new(
            FileRecord::new("abc123"),
            settings,
            events,
            &PathBuilderRegistry::default(),
        )
        .unwrap();

        assert_eq!(
            entity.url(),
            Some("https://uploads.s3.us-east-1.amazonaws.com/abc123".to_string())
        );
    }

    #[test]
    fn test_adapter_filter() {
        let listener = BuilderListener::new(flat_default()).for_adapters(["Local"]);
        let events = Arc::new(EventManager::default().add_listener(Arc::new(listener)));

        let local = FileStorage::unbound(FileRecord::new("a").with_adapter("local"), events.clone());
        let s3 = FileStorage::unbound(FileRecord::new("b").with_adapter("S3"), events.clone());
        let unknown = FileStorage::unbound(FileRecord::new("c"), events);

        assert_eq!(local.full_path(), Some("a".to_string()));
        assert_eq!(s3.full_path(), None);
        assert_eq!(unknown.full_path(), None);
    }
}
