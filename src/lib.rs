//! Split a test suite into groups for parallel runners.
//!
//! kisplit computes which tests (or test files) each of `n` workers should
//! run and writes one plain text group file per worker. Tests that depend on
//! each other are kept in the same group so no worker runs a test before the
//! tests it depends on.
//!
//! ```no_run
//! use kisplit::{config::SplitConfig, loader::ManifestLoader, partition::RecordPartitioner};
//!
//! let report = kisplit::splitter(SplitConfig::new(4).with_output_pattern("tests/_data/group_"))
//!     .with_partitioner(RecordPartitioner::new().with_loader(ManifestLoader::new()))
//!     .run()?;
//! println!("wrote {} group files", report.written.len());
//! # Ok::<(), kisplit::SplitError>(())
//! ```

pub mod config;
pub mod group;

mod error;
pub use error::*;

mod strategy;
pub use strategy::*;

mod harness;
pub use harness::*;

mod report;
pub use report::*;

pub mod prelude {
    pub use crate::{
        SplitError, SplitReport, Splitter,
        config::SplitConfig,
        discovery::{FileDiscovery, FileFilter, WalkDiscovery},
        group::{Group, GroupCollection, Partition},
        loader::{ManifestLoader, NoLoader, TestLoader},
        partition::{ChunkedFilePartitioner, ModuloFilePartitioner, Partitioner, RecordPartitioner},
        splitter,
        test::{LoadedTest, TestOrigin, TestRecord},
        writer::{FsGroupWriter, GroupWriter, MemoryGroupWriter},
    };
}

#[cfg(test)]
mod test_support;
