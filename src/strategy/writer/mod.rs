//! Group file writing for kisplit.
//!
//! Every partitioner ends in the same step: each populated group becomes one
//! plain text file. Its path is the configured output pattern followed by the
//! optional suite label and `_`, then the group index. The content is the
//! group's identifiers, one per line, in assignment order, without a trailing
//! newline or any other metadata. Existing files are overwritten.
//!
//! Writes are not atomic and take no locks. Two splits writing to the same
//! pattern at the same time must be serialized by the caller.
//!
//! Implement [`GroupWriter`] to store group files somewhere else.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    SplitError,
    config::SplitConfig,
    group::Partition,
};

mod fs_writer;
pub use fs_writer::*;

mod memory;
pub use memory::*;

/// A strategy for persisting one group file.
pub trait GroupWriter {
    /// Write the rendered group file `contents` to `path`, replacing any
    /// previous content.
    fn write(&mut self, path: &Path, contents: &str) -> Result<(), SplitError>;
}

/// A group file that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenGroup {
    pub path: PathBuf,
    pub suite: Option<String>,
    pub index: usize,
    pub items: usize,
}

/// Render the content of a group file.
pub fn render_group(items: &[String]) -> String {
    items.join("\n")
}

/// Split the content of a group file back into its identifiers.
pub fn parse_group(contents: &str) -> Vec<String> {
    match contents.is_empty() {
        true => Vec::new(),
        false => contents.split('\n').map(str::to_string).collect(),
    }
}

/// Read a group file back from disk.
pub fn read_group(path: impl AsRef<Path>) -> Result<Vec<String>, SplitError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source: io::Error| SplitError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_group(&contents))
}

/// Write every group of `partition` in ascending index order.
pub fn write_partition<W>(
    writer: &mut W,
    config: &SplitConfig,
    partition: &Partition,
) -> Result<Vec<WrittenGroup>, SplitError>
where
    W: GroupWriter + ?Sized,
{
    let suite = partition.suite.as_deref();
    let mut written = Vec::with_capacity(partition.groups.len());
    for group in partition.groups.iter() {
        let path = config.artifact_path(suite, group.index);
        info!("Writing {}", path.display());
        writer.write(&path, &render_group(group.items))?;
        written.push(WrittenGroup {
            path,
            suite: partition.suite.clone(),
            index: group.index,
            items: group.items.len(),
        });
    }
    Ok(written)
}
