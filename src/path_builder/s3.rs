use super::backend::{call_config, merge_config, PathBuilder, PathBuilderError};
use super::base::BasePathBuilder;
use crate::models::{FileRecord, PathOptions};
use serde::Deserialize;

const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct S3Config {
    bucket: Option<String>,
    region: String,
    endpoint: Option<String>,
}

impl Default for S3Config {
    fn default() -> Self {
        S3Config {
            bucket: None,
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
        }
    }
}

/// Objects in an S3 bucket, addressed through AWS or a custom endpoint
pub struct S3PathBuilder {
    base: BasePathBuilder,
    config: S3Config,
    bucket: String,
}

impl S3PathBuilder {
    pub const NAME: &'static str = "s3";

    pub fn new(options: PathOptions) -> Result<Self, PathBuilderError> {
        let config: S3Config = merge_config(Self::NAME, &options, &PathOptions::new())?;
        let bucket = config
            .bucket
            .clone()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| PathBuilderError::MissingOption {
                strategy: Self::NAME.to_string(),
                reason: "bucket must be set".to_string(),
            })?;

        Ok(S3PathBuilder {
            base: BasePathBuilder::named(Self::NAME, options)?,
            config,
            bucket,
        })
    }

    /// Generate S3 URL
    fn generate_s3_url(&self, config: &S3Config, path: &str) -> String {
        if let Some(endpoint) = &config.endpoint {
            // Custom S3 endpoint
            format!("{}/{}", endpoint.trim_end_matches('/'), path)
        } else {
            let bucket = config
                .bucket
                .as_deref()
                .filter(|b| !b.is_empty())
                .unwrap_or(self.bucket.as_str());
            format!("https://{}.s3.{}.amazonaws.com/{}", bucket, config.region, path)
        }
    }
}

impl PathBuilder for S3PathBuilder {
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
        let config: S3Config = call_config(Self::NAME, self.base.options(), &self.config, options);
        self.generate_s3_url(&config, &self.full_path(record, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::options;
    use serde_json::json;

    #[test]
    fn test_aws_url() {
        let builder = S3PathBuilder::new(options(json!({
            "bucket": "uploads",
            "region": "eu-west-1",
            "randomPath": false,
            "uuidFolder": false
        })))
        .unwrap();

        let record = FileRecord::new("abc123").with_extension("png");
        assert_eq!(
            builder.url(&record, &PathOptions::new()),
            "https://uploads.s3.eu-west-1.amazonaws.com/abc123.png"
        );
    }

    #[test]
    fn test_default_region() {
        let builder = S3PathBuilder::new(options(json!({
            "bucket": "uploads",
            "randomPath": false,
            "uuidFolder": false
        })))
        .unwrap();

        let record = FileRecord::new("abc123");
        assert_eq!(
            builder.url(&record, &PathOptions::new()),
            "https://uploads.s3.us-east-1.amazonaws.com/abc123"
        );
    }

    #[test]
    fn test_custom_endpoint() {
        let builder = S3PathBuilder::new(options(json!({
            "bucket": "uploads",
            "endpoint": "http://minio:9000/uploads/",
            "randomPath": false
        })))
        .unwrap();

        let record = FileRecord::new("abc123");
        assert_eq!(
            builder.url(&record, &PathOptions::new()),
            "http://minio:9000/uploads/abc123/abc123"
        );
    }

    #[test]
    fn test_missing_bucket_is_rejected() {
        let result = S3PathBuilder::new(PathOptions::new());
        assert!(matches!(result, Err(PathBuilderError::MissingOption { .. })));
    }
}
