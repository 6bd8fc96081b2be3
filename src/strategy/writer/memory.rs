use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::{
    SplitError,
    writer::{GroupWriter, parse_group},
};

/// A [`GroupWriter`] keeping group files in memory.
///
/// Clones share the same storage, so a handle can be kept while another clone
/// is moved into a [`Splitter`](crate::Splitter).
#[derive(Debug, Default, Clone)]
pub struct MemoryGroupWriter(Arc<Mutex<BTreeMap<PathBuf, String>>>);

impl MemoryGroupWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw content written to `path`, if any.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let files = self.0.lock().ok()?;
        files.get(path.as_ref()).cloned()
    }

    /// The identifiers written to `path`, if any.
    pub fn group(&self, path: impl AsRef<Path>) -> Option<Vec<String>> {
        self.contents(path).as_deref().map(parse_group)
    }

    /// All written paths in sorted order.
    pub fn paths(&self) -> Vec<PathBuf> {
        match self.0.lock() {
            Ok(files) => files.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl GroupWriter for MemoryGroupWriter {
    fn write(&mut self, path: &Path, contents: &str) -> Result<(), SplitError> {
        let mut files = self.0.lock().map_err(|_| SplitError::Write {
            path: path.to_path_buf(),
            source: io::Error::other("poison error"),
        })?;
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
