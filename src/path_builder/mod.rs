pub mod backend;
pub mod base;
pub mod local;
pub mod s3;

pub use backend::{PathBuilder, PathBuilderError};
pub use base::{BaseConfig, BasePathBuilder, RandomPath};
pub use local::LocalPathBuilder;
pub use s3::S3PathBuilder;

use crate::models::PathOptions;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Constructor stored in the registry for one strategy name
pub type BuilderConstructor =
    Arc<dyn Fn(PathOptions) -> Result<Arc<dyn PathBuilder>, PathBuilderError> + Send + Sync>;

/// Lookup table from strategy name to constructor.
/// Names are matched case-insensitively.
#[derive(Clone)]
pub struct PathBuilderRegistry {
    constructors: HashMap<String, BuilderConstructor>,
}

impl PathBuilderRegistry {
    /// Registry without any strategies
    pub fn empty() -> Self {
        PathBuilderRegistry {
            constructors: HashMap::new(),
        }
    }

    /// Add a strategy, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: &str, constructor: F) -> &mut Self
    where
        F: Fn(PathOptions) -> Result<Arc<dyn PathBuilder>, PathBuilderError> + Send + Sync + 'static,
    {
        let key = name.trim().to_lowercase();
        if self.constructors.contains_key(&key) {
            tracing::debug!("Replacing path builder {}", key);
        }
        self.constructors.insert(key, Arc::new(constructor));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&name.trim().to_lowercase())
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.keys().cloned().collect();
        names.sort();
        names
    }

    /// Build the named strategy bound to `options`
    pub fn create(
        &self,
        name: &str,
        options: PathOptions,
    ) -> Result<Arc<dyn PathBuilder>, PathBuilderError> {
        let key = name.trim().to_lowercase();
        let constructor = self
            .constructors
            .get(&key)
            .ok_or_else(|| PathBuilderError::UnknownStrategy(name.to_string()))?;

        tracing::debug!("Creating path builder {}", key);
        constructor(options)
    }
}

impl Default for PathBuilderRegistry {
    /// Registry with the built-in `base`, `local` and `s3` strategies
    fn default() -> Self {
        let mut registry = PathBuilderRegistry::empty();
        registry
            .register(BasePathBuilder::NAME, |options| {
                Ok(Arc::new(BasePathBuilder::new(options)?) as Arc<dyn PathBuilder>)
            })
            .register(LocalPathBuilder::NAME, |options| {
                Ok(Arc::new(LocalPathBuilder::new(options)?) as Arc<dyn PathBuilder>)
            })
            .register(S3PathBuilder::NAME, |options| {
                Ok(Arc::new(S3PathBuilder::new(options)?) as Arc<dyn PathBuilder>)
            });
        registry
    }
}

impl fmt::Debug for PathBuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathBuilderRegistry")
            .field("names", &self.names())
            .finish()
    }
}
