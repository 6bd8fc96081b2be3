mod split;
pub use split::Splitter;

use crate::{config::SplitConfig, partition::RecordPartitioner, writer::FsGroupWriter};

/// Start a split with the default strategies.
///
/// The defaults are a [`RecordPartitioner`] without a loader and a
/// [`FsGroupWriter`]. A record split needs a loader, so either plug one in
/// with [`RecordPartitioner::with_loader`] or pick a file partitioner with
/// [`Splitter::with_partitioner`].
pub fn splitter(config: SplitConfig) -> Splitter<RecordPartitioner, FsGroupWriter> {
    Splitter {
        config,
        partitioner: RecordPartitioner::default(),
        writer: FsGroupWriter::default(),
    }
}
