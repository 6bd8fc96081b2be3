use std::{borrow::Cow, fs, path::Path};

use serde::Deserialize;

use crate::{
    SplitError,
    loader::TestLoader,
    test::{LoadedTest, TestOrigin, TestRecord},
};

pub const DEFAULT_MANIFEST_NAME: &str = "tests.json";

/// A [`TestLoader`] reading tests from a JSON manifest.
///
/// The location is either the manifest file itself or a directory containing
/// a manifest named [`DEFAULT_MANIFEST_NAME`] (configurable with
/// [`with_file_name`](Self::with_file_name)).
///
/// The manifest is an array. Every entry is either a test record or a data
/// provider wrapping several records:
///
/// ```json
/// [
///   { "name": "UserCest:create", "unit": "UserCest", "method": "create" },
///   { "name": "UserCest:update", "unit": "UserCest", "method": "update", "depends": ["create"] },
///   { "provider": [
///     { "name": "MathTest::add with data set #0", "signature": "MathTest:add" },
///     { "name": "MathTest::add with data set #1", "signature": "MathTest:add" }
///   ] }
/// ]
/// ```
///
/// Without an explicit `signature`, a record with `unit` and `method` uses
/// `unit:method`, any other record uses its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLoader {
    file_name: Cow<'static, str>,
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self {
            file_name: Cow::Borrowed(DEFAULT_MANIFEST_NAME),
        }
    }
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_name(self, file_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl TestLoader for ManifestLoader {
    fn load(&self, location: &Path) -> Result<Vec<LoadedTest>, SplitError> {
        let path = match location.is_dir() {
            true => location.join(self.file_name.as_ref()),
            false => location.to_path_buf(),
        };

        let content = fs::read_to_string(&path).map_err(|source| SplitError::Discovery {
            location: path.clone(),
            source,
        })?;
        let entries: Vec<ManifestEntry> = serde_json::from_str(&content)
            .map_err(|source| SplitError::Manifest { path, source })?;

        Ok(entries.into_iter().map(LoadedTest::from).collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManifestEntry {
    Provider { provider: Vec<ManifestRecord> },
    Record(ManifestRecord),
}

#[derive(Debug, Deserialize)]
struct ManifestRecord {
    name: String,
    #[serde(default)]
    signature: Option<String>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    depends: Vec<String>,
}

impl From<ManifestRecord> for TestRecord {
    fn from(value: ManifestRecord) -> Self {
        let origin = match (value.unit, value.method) {
            (Some(unit), Some(method)) => Some(TestOrigin::new(unit, method)),
            _ => None,
        };
        let signature = match (value.signature, &origin) {
            (Some(signature), _) => signature,
            (None, Some(origin)) => format!("{}:{}", origin.unit, origin.method),
            (None, None) => value.name.clone(),
        };

        let record = TestRecord::new(value.name, signature).with_depends(value.depends);
        match origin {
            Some(origin) => record.with_origin(origin),
            None => record,
        }
    }
}

impl From<ManifestEntry> for LoadedTest {
    fn from(value: ManifestEntry) -> Self {
        match value {
            ManifestEntry::Provider { provider } => {
                LoadedTest::DataProvider(provider.into_iter().map(TestRecord::from).collect())
            }
            ManifestEntry::Record(record) => LoadedTest::Single(record.into()),
        }
    }
}
