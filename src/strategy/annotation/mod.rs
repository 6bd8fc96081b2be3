//! Dependency annotations for kisplit.
//!
//! Some test frameworks declare dependencies next to the test method (for
//! example a `@depends create` doc annotation) instead of on the loaded test
//! object. An annotation reader fetches those raw references for a test
//! origin. The record partitioner appends them to the dependencies the loader
//! already reported and resolves all of them by signature.
//!
//! Raw references may be bare method names. They are qualified with the
//! declaring unit before resolution, see [`TestOrigin::qualify`].

use std::{collections::HashMap, hash::BuildHasher};

use crate::{SplitError, test::TestOrigin};

mod no;
pub use no::*;

/// A strategy for reading raw dependency annotations of a test method.
pub trait AnnotationReader {
    fn depends(&self, origin: &TestOrigin) -> Result<Vec<String>, SplitError>;
}

impl<F> AnnotationReader for F
where
    F: Fn(&TestOrigin) -> Result<Vec<String>, SplitError>,
{
    fn depends(&self, origin: &TestOrigin) -> Result<Vec<String>, SplitError> {
        self(origin)
    }
}

impl<RandomState: BuildHasher> AnnotationReader for HashMap<TestOrigin, Vec<String>, RandomState> {
    fn depends(&self, origin: &TestOrigin) -> Result<Vec<String>, SplitError> {
        Ok(self.get(origin).cloned().unwrap_or_default())
    }
}
