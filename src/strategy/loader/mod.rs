//! Test loading for kisplit.
//!
//! The record partitioner does not parse test sources itself. A loader turns a
//! location (a directory or file below the project root) into an ordered list
//! of [`LoadedTest`] values. The order matters: it decides the round-robin
//! assignment and therefore must be stable between runs.
//!
//! Without a loader, record based splitting cannot work at all. The default
//! [`NoLoader`] fails with a configuration error instead of producing an empty
//! split.
//!
//! Implement [`TestLoader`] to plug in a test discovery of your own. Closures
//! of the shape `Fn(&Path) -> Result<Vec<LoadedTest>, SplitError>` are loaders
//! as well.

use std::path::Path;

use crate::{SplitError, test::LoadedTest};

mod no;
pub use no::*;

mod manifest;
pub use manifest::*;

/// A strategy for loading the tests of one location.
pub trait TestLoader {
    /// Load all tests below `location`, in a stable order.
    ///
    /// `location` is already resolved against the project root.
    fn load(&self, location: &Path) -> Result<Vec<LoadedTest>, SplitError>;
}

impl<F> TestLoader for F
where
    F: Fn(&Path) -> Result<Vec<LoadedTest>, SplitError>,
{
    fn load(&self, location: &Path) -> Result<Vec<LoadedTest>, SplitError> {
        self(location)
    }
}
