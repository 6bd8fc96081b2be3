use std::path::Path;

use crate::{SplitError, loader::TestLoader, test::LoadedTest};

/// A [`TestLoader`] standing in for a missing test discovery.
///
/// Every call fails with [`SplitError::Configuration`].
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct NoLoader;

impl NoLoader {
    pub fn new() -> Self {
        Self
    }
}

impl TestLoader for NoLoader {
    fn load(&self, _: &Path) -> Result<Vec<LoadedTest>, SplitError> {
        Err(SplitError::config(
            "splitting tests by records requires a test loader, but none is configured",
        ))
    }
}
