//! File discovery for kisplit.
//!
//! The file partitioners do not load tests, they only look at file paths. A
//! discovery enumerates the test files of one location, relative to the
//! project root, and hands them over in the order it found them.
//!
//! What counts as a test file is described by a [`FileFilter`]: the file name
//! must match one of the configured name patterns, and no directory on the way
//! may be excluded.
//!
//! Implement [`FileDiscovery`] to enumerate files in a different way. Closures
//! of the shape `Fn(&Path, &str, &FileFilter) -> Result<Vec<PathBuf>, SplitError>`
//! are discoveries as well, and so is a map from location to its files.

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
    path::{Component, Path, PathBuf},
};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{SplitError, config::SplitConfig};

mod walk;
pub use walk::*;

/// A strategy for finding the test files of one location.
pub trait FileDiscovery {
    /// Return all files below `location` accepted by `filter`.
    ///
    /// Returned paths are relative to `root`.
    fn discover(
        &self,
        root: &Path,
        location: &str,
        filter: &FileFilter,
    ) -> Result<Vec<PathBuf>, SplitError>;
}

impl<F> FileDiscovery for F
where
    F: Fn(&Path, &str, &FileFilter) -> Result<Vec<PathBuf>, SplitError>,
{
    fn discover(
        &self,
        root: &Path,
        location: &str,
        filter: &FileFilter,
    ) -> Result<Vec<PathBuf>, SplitError> {
        self(root, location, filter)
    }
}

/// Already discovered files, keyed by location.
///
/// Files are returned as stored, the filter is not applied. Unknown locations
/// have no files.
impl FileDiscovery for BTreeMap<String, Vec<PathBuf>> {
    fn discover(&self, _: &Path, location: &str, _: &FileFilter) -> Result<Vec<PathBuf>, SplitError> {
        Ok(self.get(location).cloned().unwrap_or_default())
    }
}

impl<RandomState: BuildHasher> FileDiscovery for HashMap<String, Vec<PathBuf>, RandomState> {
    fn discover(&self, _: &Path, location: &str, _: &FileFilter) -> Result<Vec<PathBuf>, SplitError> {
        Ok(self.get(location).cloned().unwrap_or_default())
    }
}

/// Decides which paths are test files.
#[derive(Debug, Clone)]
pub struct FileFilter {
    names: GlobSet,
    exclude: Option<PathBuf>,
}

impl FileFilter {
    /// Compile the name patterns and the exclusion of `config`.
    pub fn new(config: &SplitConfig) -> Result<Self, SplitError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in config.name_patterns() {
            let glob = Glob::new(pattern).map_err(|err| {
                SplitError::config(format!("invalid file name pattern '{pattern}': {err}"))
            })?;
            builder.add(glob);
        }
        let names = builder
            .build()
            .map_err(|err| SplitError::config(format!("invalid file name patterns: {err}")))?;

        let exclude = match config.exclude().trim_matches('/') {
            "" => None,
            exclude => Some(PathBuf::from(exclude)),
        };

        Ok(Self { names, exclude })
    }

    /// Whether the file name of `path` matches one of the name patterns.
    pub fn matches_name(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.names.is_match(Path::new(name)))
            .unwrap_or(false)
    }

    /// Whether the directory at `relative` (relative to the project root) is
    /// excluded.
    ///
    /// The exclusion matches on whole path components at any depth: `vendor`
    /// excludes `vendor` and `lib/vendor`, `tests/_support` excludes
    /// `tests/_support` and `other/tests/_support`, but `tests/vendors` is
    /// kept.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let Some(exclude) = &self.exclude else {
            return false;
        };

        let exclude: Vec<Component<'_>> = exclude.components().collect();
        let relative: Vec<Component<'_>> = relative.components().collect();
        relative
            .windows(exclude.len())
            .any(|window| window == exclude.as_slice())
    }
}
