use crate::models::{FileRecord, Method, PathOptions};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while binding a path builder
#[derive(Debug, Error)]
pub enum PathBuilderError {
    #[error("Unknown path builder: {0}")]
    UnknownStrategy(String),

    #[error("Invalid options for path builder {strategy}: {source}")]
    InvalidOptions {
        strategy: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid options for path builder {strategy}: {reason}")]
    MissingOption { strategy: String, reason: String },
}

/// Trait defining the interface for path construction strategies
///
/// Every method is a pure function of the record and options so the
/// derived attributes of an entity can be read any number of times.
pub trait PathBuilder: Send + Sync {
    /// Name the strategy was registered under
    fn name(&self) -> &str;

    /// Directory part of the location, with a trailing slash
    fn path(&self, record: &FileRecord, options: &PathOptions) -> String;

    /// File name part of the location
    fn filename(&self, record: &FileRecord, options: &PathOptions) -> String;

    /// Location on the backend, directory plus file name
    fn full_path(&self, record: &FileRecord, options: &PathOptions) -> String {
        format!("{}{}", self.path(record, options), self.filename(record, options))
    }

    /// Publicly addressable location
    fn url(&self, record: &FileRecord, options: &PathOptions) -> String;

    /// Dispatch by method. Custom methods are not answered by default.
    fn build(&self, method: &Method, record: &FileRecord, options: &PathOptions) -> Option<String> {
        match method {
            Method::Path => Some(self.path(record, options)),
            Method::FullPath => Some(self.full_path(record, options)),
            Method::Filename => Some(self.filename(record, options)),
            Method::Url => Some(self.url(record, options)),
            Method::Custom(_) => None,
        }
    }
}

/// Merge per-call options over the bound ones and read them into a config.
///
/// Keys the config does not know about are ignored.
pub(crate) fn merge_config<T: DeserializeOwned>(
    strategy: &str,
    bound: &PathOptions,
    call: &PathOptions,
) -> Result<T, PathBuilderError> {
    let mut merged = bound.clone();
    for (key, value) in call {
        merged.insert(key.clone(), value.clone());
    }
    serde_json::from_value(Value::Object(merged)).map_err(|source| {
        PathBuilderError::InvalidOptions {
            strategy: strategy.to_string(),
            source,
        }
    })
}

/// Config for a single call: the bound config when no options were passed,
/// otherwise the merged one. Falls back to the bound config if the per-call
/// options do not fit.
pub(crate) fn call_config<T: DeserializeOwned + Clone>(
    strategy: &str,
    bound_options: &PathOptions,
    bound_config: &T,
    call: &PathOptions,
) -> T {
    if call.is_empty() {
        return bound_config.clone();
    }
    match merge_config(strategy, bound_options, call) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring per-call path options: {}", e);
            bound_config.clone()
        }
    }
}
