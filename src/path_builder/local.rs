use super::backend::{call_config, merge_config, PathBuilder, PathBuilderError};
use super::base::BasePathBuilder;
use crate::models::{FileRecord, PathOptions};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LocalConfig {
    base_url: String,
}

/// Files served from a local directory behind `baseUrl`
pub struct LocalPathBuilder {
    base: BasePathBuilder,
    config: LocalConfig,
}

impl LocalPathBuilder {
    pub const NAME: &'static str = "local";

    pub fn new(options: PathOptions) -> Result<Self, PathBuilderError> {
        let config = merge_config(Self::NAME, &options, &PathOptions::new())?;
        Ok(LocalPathBuilder {
            base: BasePathBuilder::named(Self::NAME, options)?,
            config,
        })
    }

    fn generate_url(&self, base_url: &str, full_path: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), full_path)
    }
}

impl PathBuilder for LocalPathBuilder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn path(&self, record: &FileRecord, options: &PathOptions) -> String {
        self.base.path(record, options)
    }

    fn filename(&self, record: &FileRecord, options: &PathOptions) -> String {
        self.base.filename(record, options)
    }

    fn full_path(&self, record: &FileRecord, options: &PathOptions) -> String {
        self.base.full_path(record, options)
    }

    fn url(&self, record: &FileRecord, options: &PathOptions) -> String {
        let config: LocalConfig = call_config(Self::NAME, self.base.options(), &self.config, options);
        self.generate_url(&config.base_url, &self.full_path(record, options))
    }
}
