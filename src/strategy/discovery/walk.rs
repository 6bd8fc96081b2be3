use std::{
    io,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{
    SplitError,
    discovery::{FileDiscovery, FileFilter},
};

/// A [`FileDiscovery`] walking the file system below the project root.
///
/// Directories matching the exclusion are not descended into. Files come back
/// in walk order, which depends on the file system unless
/// [`with_sorted_walk`](Self::with_sorted_walk) is set.
#[derive(Debug, Default, Clone)]
pub struct WalkDiscovery {
    sorted: bool,
    follow_links: bool,
}

impl WalkDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit directory entries sorted by file name.
    pub fn with_sorted_walk(self, sorted: bool) -> Self {
        Self { sorted, ..self }
    }

    pub fn with_follow_links(self, follow_links: bool) -> Self {
        Self {
            follow_links,
            ..self
        }
    }
}

impl FileDiscovery for WalkDiscovery {
    fn discover(
        &self,
        root: &Path,
        location: &str,
        filter: &FileFilter,
    ) -> Result<Vec<PathBuf>, SplitError> {
        if !root.is_dir() {
            return Err(SplitError::Discovery {
                location: root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "project root is not a directory"),
            });
        }

        let base = root.join(location);
        if !base.exists() {
            warn!(location, "test location does not exist below {}", root.display());
            return Ok(Vec::new());
        }

        let mut walker = WalkDir::new(&base).follow_links(self.follow_links);
        if self.sorted {
            walker = walker.sort_by_file_name();
        }

        let relative = |path: &Path| path.strip_prefix(root).unwrap_or(path).to_path_buf();

        let mut files = Vec::new();
        let entries = walker.into_iter().filter_entry(|entry| {
            !(entry.file_type().is_dir() && filter.is_excluded(&relative(entry.path())))
        });
        for entry in entries {
            let entry = entry.map_err(|err| SplitError::Discovery {
                location: base.clone(),
                source: io::Error::from(err),
            })?;
            if !entry.file_type().is_file() || !filter.matches_name(entry.path()) {
                continue;
            }
            files.push(relative(entry.path()));
        }

        debug!(location, files = files.len(), "discovered test files");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::SplitConfig;

    fn touch(root: &Path, file: &str) {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn finds_test_files_below_location() {
        let root = tempfile::tempdir().unwrap();
        for file in [
            "tests/unit/BTest.php",
            "tests/unit/ATest.php",
            "tests/unit/helper.php",
            "tests/unit/vendor/LibTest.php",
            "tests/acceptance/LoginCept.php",
            "vendor/pkg/tests/unit/OtherTest.php",
        ] {
            touch(root.path(), file);
        }

        let config = SplitConfig::new(2).with_project_root(root.path());
        let filter = FileFilter::new(&config).unwrap();
        let mut files = WalkDiscovery::new()
            .discover(root.path(), "tests/unit", &filter)
            .unwrap();
        files.sort();

        assert_eq!(
            files,
            vec![
                PathBuf::from("tests/unit/ATest.php"),
                PathBuf::from("tests/unit/BTest.php"),
            ]
        );
    }

    #[test]
    fn sorted_walk_returns_name_order() {
        let root = tempfile::tempdir().unwrap();
        for file in ["tests/c.feature", "tests/a.feature", "tests/b.feature"] {
            touch(root.path(), file);
        }

        let filter = FileFilter::new(&SplitConfig::new(2)).unwrap();
        let files = WalkDiscovery::new()
            .with_sorted_walk(true)
            .discover(root.path(), "tests", &filter)
            .unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("tests/a.feature"),
                PathBuf::from("tests/b.feature"),
                PathBuf::from("tests/c.feature"),
            ]
        );
    }

    #[test]
    fn missing_location_has_no_files() {
        let root = tempfile::tempdir().unwrap();
        let filter = FileFilter::new(&SplitConfig::new(2)).unwrap();
        let files = WalkDiscovery::new()
            .discover(root.path(), "tests/nowhere", &filter)
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_root_is_a_discovery_error() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("gone");
        let filter = FileFilter::new(&SplitConfig::new(2)).unwrap();
        let err = WalkDiscovery::new()
            .discover(&missing, "tests", &filter)
            .unwrap_err();
        assert!(matches!(err, SplitError::Discovery { .. }));
    }
}
