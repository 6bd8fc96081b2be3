use std::time::Duration;

use crate::writer::WrittenGroup;

#[derive(Debug)]
#[non_exhaustive]
pub struct SplitReport {
    pub written: Vec<WrittenGroup>,
    pub duration: Duration,
}

impl SplitReport {
    /// Number of identifiers over all written group files.
    pub fn identifier_count(&self) -> usize {
        self.written.iter().map(|group| group.items).sum()
    }
}
