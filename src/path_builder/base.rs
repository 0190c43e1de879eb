use super::backend::{call_config, merge_config, PathBuilder, PathBuilderError};
use crate::models::{FileRecord, PathOptions};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Number of hashed directory levels inserted by `randomPath`
const RANDOM_PATH_LEVELS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomPath {
    Sha256,
}

/// Layout options shared by all built-in path builders
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseConfig {
    pub strip_uuid: bool,
    pub path_prefix: String,
    pub path_suffix: String,
    pub file_prefix: String,
    pub file_suffix: String,
    pub preserve_filename: bool,
    pub preserve_extension: bool,
    pub uuid_folder: bool,
    #[serde(deserialize_with = "deserialize_random_path")]
    pub random_path: Option<RandomPath>,
    pub model_folder: bool,
}

impl Default for BaseConfig {
    fn default() -> Self {
        BaseConfig {
            strip_uuid: true,
            path_prefix: String::new(),
            path_suffix: String::new(),
            file_prefix: String::new(),
            file_suffix: String::new(),
            preserve_filename: false,
            preserve_extension: true,
            uuid_folder: true,
            random_path: Some(RandomPath::Sha256),
            model_folder: false,
        }
    }
}

/// Accepts `"sha256"`, `true`, `false` or `null`
fn deserialize_random_path<'de, D>(deserializer: D) -> Result<Option<RandomPath>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some(RandomPath::Sha256)),
        Value::String(s) if s.eq_ignore_ascii_case("sha256") => Ok(Some(RandomPath::Sha256)),
        other => Err(serde::de::Error::custom(format!(
            "unsupported randomPath value: {}",
            other
        ))),
    }
}

impl BaseConfig {
    fn file_id(&self, record: &FileRecord) -> String {
        if self.strip_uuid {
            record.id.replace('-', "")
        } else {
            record.id.clone()
        }
    }

    pub(crate) fn path(&self, record: &FileRecord) -> String {
        let mut segments: Vec<String> = Vec::new();
        push_segments(&mut segments, &self.path_prefix);

        if self.model_folder {
            if let Some(model) = &record.model {
                push_segments(&mut segments, model);
            }
        }

        if let Some(RandomPath::Sha256) = self.random_path {
            segments.extend(random_path_levels(&record.id, RANDOM_PATH_LEVELS));
        }

        if self.uuid_folder {
            push_segments(&mut segments, &self.file_id(record));
        }

        push_segments(&mut segments, &self.path_suffix);

        if segments.is_empty() {
            String::new()
        } else {
            format!("{}/", segments.join("/"))
        }
    }

    pub(crate) fn filename(&self, record: &FileRecord) -> String {
        let preserved = record
            .filename
            .as_deref()
            .and_then(last_component)
            .filter(|_| self.preserve_filename);
        let name = match preserved {
            Some(name) => format!("{}{}{}", self.file_prefix, name, self.file_suffix),
            None => self.generated_filename(record),
        };
        name.replace('\\', "/")
    }

    fn generated_filename(&self, record: &FileRecord) -> String {
        let mut name = format!("{}{}{}", self.file_prefix, self.file_id(record), self.file_suffix);
        if self.preserve_extension {
            let extension = record
                .extension
                .as_deref()
                .map(|ext| ext.trim_start_matches('.'))
                .unwrap_or_default();
            if !extension.is_empty() {
                name.push('.');
                name.push_str(extension);
            }
        }
        name
    }

    pub(crate) fn full_path(&self, record: &FileRecord) -> String {
        format!("{}{}", self.path(record), self.filename(record))
    }
}

/// Final component of a stored file name; `.` and `..` do not count
fn last_component(raw: &str) -> Option<&str> {
    raw.rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
}

/// Split on either separator and keep the non-empty parts
fn push_segments(segments: &mut Vec<String>, raw: &str) {
    segments.extend(
        raw.split(|c: char| c == '/' || c == '\\')
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    );
}

/// Two hex characters of the SHA-256 of `id` per level
fn random_path_levels(id: &str, levels: usize) -> Vec<String> {
    let digest = hex::encode(Sha256::digest(id.as_bytes()));
    digest
        .as_bytes()
        .chunks(2)
        .take(levels)
        .map(|pair| String::from_utf8_lossy(pair).into_owned())
        .collect()
}

/// Default strategy: backend-relative locations, URL equal to the full path
pub struct BasePathBuilder {
    name: String,
    options: PathOptions,
    config: BaseConfig,
}

impl BasePathBuilder {
    pub const NAME: &'static str = "base";

    pub fn new(options: PathOptions) -> Result<Self, PathBuilderError> {
        Self::named(Self::NAME, options)
    }

    pub(crate) fn named(name: &str, options: PathOptions) -> Result<Self, PathBuilderError> {
        let config = merge_config(name, &options, &PathOptions::new())?;
        Ok(BasePathBuilder {
            name: name.to_string(),
            options,
            config,
        })
    }

    pub(crate) fn options(&self) -> &PathOptions {
        &self.options
    }

    pub(crate) fn config(&self, call: &PathOptions) -> BaseConfig {
        call_config(&self.name, &self.options, &self.config, call)
    }
}

impl PathBuilder for BasePathBuilder {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self, record: &FileRecord, options: &PathOptions) -> String {
        self.config(options).path(record)
    }

    fn filename(&self, record: &FileRecord, options: &PathOptions) -> String {
        self.config(options).filename(record)
    }

    fn full_path(&self, record: &FileRecord, options: &PathOptions) -> String {
        self.config(options).full_path(record)
    }

    fn url(&self, record: &FileRecord, options: &PathOptions) -> String {
        self.full_path(record, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::options;
    use serde_json::json;

    const ID: &str = "914e1512-9153-4253-a81e-7ee2edc1d973";

    fn record() -> FileRecord {
        FileRecord::new(ID)
            .with_model("Avatars")
            .with_filename("photo.jpg")
            .with_extension("jpg")
    }

    #[test]
    fn test_default_layout() {
        let builder = BasePathBuilder::new(PathOptions::new()).unwrap();
        let record = record();
        let empty = PathOptions::new();

        let levels = random_path_levels(ID, 3).join("/");
        let expected_path = format!("{}/914e151291534253a81e7ee2edc1d973/", levels);

        assert_eq!(builder.path(&record, &empty), expected_path);
        assert_eq!(
            builder.filename(&record, &empty),
            "914e151291534253a81e7ee2edc1d973.jpg"
        );
        assert_eq!(
            builder.full_path(&record, &empty),
            format!("{}914e151291534253a81e7ee2edc1d973.jpg", expected_path)
        );
        assert_eq!(builder.url(&record, &empty), builder.full_path(&record, &empty));
    }

    #[test]
    fn test_random_path_levels_are_hex_pairs() {
        let levels = random_path_levels(ID, 3);
        assert_eq!(levels.len(), 3);
        for level in &levels {
            assert_eq!(level.len(), 2);
            assert!(level.chars().all(|c| c.is_ascii_hexdigit()));
        }
        assert_eq!(levels, random_path_levels(ID, 3));
    }

    #[test]
    fn test_flat_layout_with_prefix_and_model_folder() {
        let builder = BasePathBuilder::new(options(json!({
            "randomPath": false,
            "uuidFolder": false,
            "modelFolder": true,
            "pathPrefix": "/files/",
            "stripUuid": false
        })))
        .unwrap();

        let record = record();
        let empty = PathOptions::new();
        assert_eq!(builder.path(&record, &empty), "files/Avatars/");
        assert_eq!(
            builder.full_path(&record, &empty),
            format!("files/Avatars/{}.jpg", ID)
        );
    }

    #[test]
    fn test_preserve_filename() {
        let builder = BasePathBuilder::new(options(json!({
            "randomPath": null,
            "uuidFolder": false,
            "preserveFilename": true
        })))
        .unwrap();

        assert_eq!(builder.full_path(&record(), &PathOptions::new()), "photo.jpg");
    }

    #[test]
    fn test_preserved_filename_stays_inside_id_folder() {
        let builder = BasePathBuilder::new(options(json!({
            "randomPath": false,
            "stripUuid": false,
            "preserveFilename": true
        })))
        .unwrap();
        let empty = PathOptions::new();

        for raw in ["..\\..\\etc\\passwd", "../../etc/passwd", "uploads\\passwd"] {
            let record = FileRecord::new("abc").with_filename(raw);
            let filename = builder.filename(&record, &empty);
            let full_path = builder.full_path(&record, &empty);

            assert_eq!(filename, "passwd");
            assert_eq!(full_path, "abc/passwd");
            assert_eq!(full_path, format!("{}{}", builder.path(&record, &empty), filename));
        }
    }

    #[test]
    fn test_unusable_preserved_filename_falls_back_to_id() {
        let builder = BasePathBuilder::new(options(json!({
            "randomPath": false,
            "uuidFolder": false,
            "preserveFilename": true
        })))
        .unwrap();

        for raw in ["..", "photos/", ""] {
            let record = FileRecord::new("abc").with_filename(raw).with_extension("jpg");
            assert_eq!(builder.full_path(&record, &PathOptions::new()), "abc.jpg");
        }
    }

    #[test]
    fn test_missing_extension_is_not_appended() {
        let builder = BasePathBuilder::new(options(json!({ "randomPath": false }))).unwrap();
        let record = FileRecord::new("abc123");
        assert_eq!(builder.filename(&record, &PathOptions::new()), "abc123");
        assert_eq!(builder.path(&record, &PathOptions::new()), "abc123/");
    }

    #[test]
    fn test_call_options_override_bound_options() {
        let builder = BasePathBuilder::new(options(json!({ "randomPath": false }))).unwrap();
        let record = FileRecord::new("abc123");

        let call = options(json!({ "method": "fullPath", "uuidFolder": false, "fileSuffix": "-thumb" }));
        assert_eq!(builder.full_path(&record, &call), "abc123-thumb");
    }

    #[test]
    fn test_bad_call_options_fall_back_to_bound_config() {
        let builder = BasePathBuilder::new(options(json!({ "randomPath": false }))).unwrap();
        let record = FileRecord::new("abc123");

        let call = options(json!({ "uuidFolder": "nope" }));
        assert_eq!(builder.path(&record, &call), "abc123/");
    }

    #[test]
    fn test_invalid_bound_options_fail() {
        let result = BasePathBuilder::new(options(json!({ "randomPath": "md5" })));
        assert!(matches!(result, Err(PathBuilderError::InvalidOptions { .. })));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let result = BasePathBuilder::new(options(json!({ "somethingElse": [1, 2, 3] })));
        assert!(result.is_ok());
    }
}
