use crate::models::PathOptions;
use crate::path_builder::{BasePathBuilder, LocalPathBuilder, S3PathBuilder};
use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub path_builder: PathBuilderType,
    pub path_builder_options: PathOptions,
    pub base_url: String,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PathBuilderType {
    Base,
    Local,
    S3,
}

impl PathBuilderType {
    /// Name the built-in strategy is registered under
    pub fn name(&self) -> &'static str {
        match self {
            PathBuilderType::Base => BasePathBuilder::NAME,
            PathBuilderType::Local => LocalPathBuilder::NAME,
            PathBuilderType::S3 => S3PathBuilder::NAME,
        }
    }
}

impl std::str::FromStr for PathBuilderType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" => Ok(PathBuilderType::Base),
            "local" => Ok(PathBuilderType::Local),
            "s3" => Ok(PathBuilderType::S3),
            _ => Err(anyhow::anyhow!("Invalid path builder: {}", s)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            path_builder: PathBuilderType::Base,
            path_builder_options: PathOptions::new(),
            base_url: "http://localhost:3000".to_string(),
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
        }
    }
}

impl Config {
    /// Read a `.env` file if present, then the environment
    pub fn load() -> Result<Self, anyhow::Error> {
        tolerate_missing(dotenvy::dotenv().map(|_| ()))?;
        Self::from_env()
    }

    /// Same as [`Config::load`] with an explicit env file.
    /// Variables already set in the environment are not overridden.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        tolerate_missing(dotenvy::from_path(path.as_ref()))?;
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path_builder_options = match lookup("PATH_BUILDER_OPTIONS") {
            Some(raw) => match serde_json::from_str::<Value>(&raw)
                .map_err(|e| anyhow::anyhow!("Invalid PATH_BUILDER_OPTIONS: {}", e))?
            {
                Value::Object(map) => map,
                _ => {
                    return Err(anyhow::anyhow!(
                        "PATH_BUILDER_OPTIONS must be a JSON object"
                    ))
                }
            },
            None => PathOptions::new(),
        };

        Ok(Config {
            path_builder: lookup("PATH_BUILDER")
                .unwrap_or_else(|| "base".to_string())
                .parse()?,
            path_builder_options,
            base_url: lookup("BASE_URL").unwrap_or_else(|| "http://localhost:3000".to_string()),
            s3_bucket: lookup("S3_BUCKET"),
            s3_region: lookup("S3_REGION"),
            s3_endpoint: lookup("S3_ENDPOINT"),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.path_builder == PathBuilderType::S3 && self.s3_bucket.is_none() {
            return Err(anyhow::anyhow!("S3_BUCKET must be set for the s3 path builder"));
        }
        Ok(())
    }

    /// Options for the default path builder.
    /// Values from `PATH_BUILDER_OPTIONS` win over the individual settings.
    pub fn default_builder_options(&self) -> PathOptions {
        let mut options = PathOptions::new();
        match self.path_builder {
            PathBuilderType::Base => {}
            PathBuilderType::Local => {
                options.insert("baseUrl".to_string(), Value::String(self.base_url.clone()));
            }
            PathBuilderType::S3 => {
                if let Some(bucket) = &self.s3_bucket {
                    options.insert("bucket".to_string(), Value::String(bucket.clone()));
                }
                if let Some(region) = &self.s3_region {
                    options.insert("region".to_string(), Value::String(region.clone()));
                }
                if let Some(endpoint) = &self.s3_endpoint {
                    options.insert("endpoint".to_string(), Value::String(endpoint.clone()));
                }
            }
        }

        for (key, value) in &self.path_builder_options {
            options.insert(key.clone(), value.clone());
        }
        options
    }
}

fn tolerate_missing(result: Result<(), dotenvy::Error>) -> Result<(), anyhow::Error> {
    match result {
        Err(e) if !e.not_found() => Err(anyhow::anyhow!("Failed to read .env file: {}", e)),
        _ => Ok(()),
    }
}
