use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Options passed through to path builders and listeners
pub type PathOptions = Map<String, Value>;

/// Key under which the requested method travels in [`PathOptions`]
pub const METHOD_KEY: &str = "method";

/// Operation requested from a path builder
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Path,
    FullPath,
    Filename,
    Url,
    /// Method only known to custom listeners
    Custom(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Path => "path",
            Method::FullPath => "fullPath",
            Method::Filename => "filename",
            Method::Url => "url",
            Method::Custom(name) => name,
        }
    }

    /// Read the method out of an options map.
    ///
    /// `null`, `false`, `0`, `""`, `"0"` and empty arrays or objects count as
    /// absent. Any other non-string value is kept as a custom method named
    /// after its JSON text.
    pub fn from_options(options: &PathOptions) -> Option<Method> {
        let value = options.get(METHOD_KEY)?;
        if is_blank(value) {
            return None;
        }
        match value {
            Value::String(s) => Some(Method::from(s.as_str())),
            other => Some(Method::Custom(other.to_string())),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

impl From<&str> for Method {
    fn from(s: &str) -> Self {
        match s {
            "path" => Method::Path,
            "fullPath" => Method::FullPath,
            "filename" => Method::Filename,
            "url" => Method::Url,
            other => Method::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata of an uploaded file as stored by the owning repository
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl FileRecord {
    pub fn new(id: impl Into<String>) -> Self {
        FileRecord {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Create a record with a freshly generated UUID and current timestamps
    pub fn generate() -> Self {
        let now = Utc::now();
        FileRecord {
            id: Uuid::new_v4().to_string(),
            created: Some(now),
            modified: Some(now),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_adapter(mut self, adapter: impl Into<String>) -> Self {
        self.adapter = Some(adapter.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
}

/// Path builder selection bound to an entity at construction
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathBuilderSettings {
    #[serde(default, rename = "pathBuilder")]
    pub path_builder: Option<String>,
    #[serde(default, rename = "pathBuilderOptions")]
    pub path_builder_options: PathOptions,
}

impl PathBuilderSettings {
    pub fn new(name: impl Into<String>, options: PathOptions) -> Self {
        PathBuilderSettings {
            path_builder: Some(name.into()),
            path_builder_options: options,
        }
    }

    /// Strategy name if one was given and is not blank
    pub fn strategy_name(&self) -> Option<&str> {
        self.path_builder
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
