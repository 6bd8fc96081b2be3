//! Configuration of a single split.
//!
//! A [`SplitConfig`] is built once with the consuming `with_*` methods and is
//! then only read. Every partitioner gets the same value passed in, so the
//! outcome of a split never depends on the order configuration was applied.

use std::{env, path::PathBuf};

use crate::SplitError;

/// File name patterns of test files picked up by file discovery.
pub const DEFAULT_NAME_PATTERNS: &[&str] = &["*Cept.php", "*Cest.php", "*Test.php", "*.feature"];

pub const DEFAULT_LOCATION: &str = "tests";
pub const DEFAULT_OUTPUT_PATTERN: &str = "tests/_data/paracept_";
pub const DEFAULT_EXCLUDE: &str = "vendor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    groups: usize,
    project_root: PathBuf,
    locations: Vec<String>,
    output_pattern: String,
    exclude: String,
    name_patterns: Vec<String>,
}

impl SplitConfig {
    /// Create a config requesting `groups` groups.
    ///
    /// The project root defaults to the current working directory.
    pub fn new(groups: usize) -> Self {
        Self {
            groups,
            project_root: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            locations: vec![DEFAULT_LOCATION.to_string()],
            output_pattern: DEFAULT_OUTPUT_PATTERN.to_string(),
            exclude: DEFAULT_EXCLUDE.to_string(),
            name_patterns: DEFAULT_NAME_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn with_project_root(self, project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..self
        }
    }

    /// Read tests from a single location.
    pub fn with_tests_from(self, location: impl Into<String>) -> Self {
        Self {
            locations: vec![location.into()],
            ..self
        }
    }

    /// Read tests from `base/<suite>` for every suite in the comma separated
    /// `suites` list.
    ///
    /// An empty `suites` string reads from `base` itself. A list made only of
    /// separators (like `","`) leaves the locations untouched.
    pub fn with_suites(self, base: impl AsRef<str>, suites: impl AsRef<str>) -> Self {
        let base = base.as_ref();
        let suites = suites.as_ref();
        if suites.is_empty() {
            return self.with_tests_from(base);
        }

        let locations: Vec<String> = suites
            .split(',')
            .filter(|suite| !suite.is_empty())
            .map(|suite| format!("{base}/{suite}"))
            .collect();
        match locations.is_empty() {
            true => self,
            false => Self { locations, ..self },
        }
    }

    /// Prefix of every written group file.
    ///
    /// This is a plain string prefix, not a directory: `tests/_data/group_`
    /// produces `tests/_data/group_1`, `tests/_data/group_2` and so on.
    pub fn with_output_pattern(self, output_pattern: impl Into<String>) -> Self {
        Self {
            output_pattern: output_pattern.into(),
            ..self
        }
    }

    pub fn with_exclude(self, exclude: impl Into<String>) -> Self {
        Self {
            exclude: exclude.into(),
            ..self
        }
    }

    pub fn with_name_patterns<I, S>(self, name_patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name_patterns: name_patterns.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn groups(&self) -> usize {
        self.groups
    }

    pub fn project_root(&self) -> &PathBuf {
        &self.project_root
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn output_pattern(&self) -> &str {
        &self.output_pattern
    }

    pub fn exclude(&self) -> &str {
        &self.exclude
    }

    pub fn name_patterns(&self) -> &[String] {
        &self.name_patterns
    }

    /// Path of the group file for `index`, with an optional suite label.
    pub fn artifact_path(&self, suite: Option<&str>, index: usize) -> PathBuf {
        match suite {
            Some(suite) => PathBuf::from(format!("{}{suite}_{index}", self.output_pattern)),
            None => PathBuf::from(format!("{}{index}", self.output_pattern)),
        }
    }

    pub fn validate(&self) -> Result<(), SplitError> {
        if self.groups == 0 {
            return Err(SplitError::config("group count must be at least 1"));
        }
        if self.locations.is_empty() {
            return Err(SplitError::config("no test locations configured"));
        }
        Ok(())
    }
}
