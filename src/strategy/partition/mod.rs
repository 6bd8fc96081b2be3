//! Partitioning strategies for kisplit.
//!
//! A partitioner turns the inputs named by a [`SplitConfig`] into one or more
//! [`Partition`]s. Partitioners never write anything themselves, the
//! [`Splitter`](crate::Splitter) hands their output to a
//! [`GroupWriter`](crate::writer::GroupWriter) once every partition was
//! computed. A failing partitioner therefore leaves no group files behind.
//!
//! Three strategies are provided:
//! - [`RecordPartitioner`] loads test records and keeps dependent tests
//!   together in one reserved group
//! - [`ModuloFilePartitioner`] deals discovered files round-robin
//! - [`ChunkedFilePartitioner`] cuts sorted files into contiguous chunks of
//!   bounded size, one partition per location

use crate::{SplitError, config::SplitConfig, group::Partition};

mod record;
pub use record::*;

mod modulo;
pub use modulo::*;

mod chunked;
pub use chunked::*;

/// A strategy for assigning inputs to groups.
pub trait Partitioner {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Compute the partitions for `config`.
    ///
    /// Group indices of every returned partition lie in `1..=config.groups()`.
    fn partition(&self, config: &SplitConfig) -> Result<Vec<Partition>, SplitError>;
}

/// The 1-based group of the `counter`-th input in a round-robin over `groups`.
pub(crate) fn round_robin(counter: usize, groups: usize) -> usize {
    (counter % groups) + 1
}

/// Render a discovered file path as group file identifier.
pub(crate) fn file_identifier(path: &std::path::Path) -> String {
    path.to_string_lossy().into_owned()
}
