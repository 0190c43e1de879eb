//! Storage paths and public URLs for uploaded files.
//!
//! A [`FileStorage`] entity wraps a [`FileRecord`] and computes its location
//! on demand. Each resolution dispatches the `FileStorage.path` event through
//! an ordered [`EventManager`]: override listeners run first, and the
//! [`BuilderListener`] answers last with the entity's bound [`PathBuilder`] or
//! the resolver's default one.

pub mod config;
pub mod events;
pub mod file_storage;
pub mod models;
pub mod path_builder;
pub mod resolver;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use config::{Config, PathBuilderType};
pub use events::{BuilderListener, EventManager, PathEvent, PathListener, PATH_EVENT};
pub use file_storage::{FileStorage, ResolveError};
pub use models::{FileRecord, Method, PathBuilderSettings, PathOptions};
pub use path_builder::{PathBuilder, PathBuilderError, PathBuilderRegistry};
pub use resolver::{PathResolver, PathResolverBuilder};
