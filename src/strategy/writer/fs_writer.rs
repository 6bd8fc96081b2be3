use std::{fs, path::Path};

use crate::{SplitError, writer::GroupWriter};

/// A [`GroupWriter`] writing group files to disk.
///
/// Missing parent directories of the output pattern are created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsGroupWriter {
    create_dirs: bool,
}

impl Default for FsGroupWriter {
    fn default() -> Self {
        Self { create_dirs: true }
    }
}

impl FsGroupWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create_dirs(self, create_dirs: bool) -> Self {
        Self { create_dirs }
    }
}

impl GroupWriter for FsGroupWriter {
    fn write(&mut self, path: &Path, contents: &str) -> Result<(), SplitError> {
        let write_err = |source| SplitError::Write {
            path: path.to_path_buf(),
            source,
        };

        if self.create_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        fs::write(path, contents).map_err(write_err)
    }
}
