use crate::{SplitError, annotation::AnnotationReader, test::TestOrigin};

/// An [`AnnotationReader`] that never finds annotations.
///
/// Only the dependencies reported by the loader are used.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct NoAnnotations;

impl NoAnnotations {
    pub fn new() -> Self {
        Self
    }
}

impl AnnotationReader for NoAnnotations {
    fn depends(&self, _: &TestOrigin) -> Result<Vec<String>, SplitError> {
        Ok(Vec::new())
    }
}
