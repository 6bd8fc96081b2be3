use std::{io, path::PathBuf};

/// Errors that stop a split before any group file is written.
///
/// Splitting is a single deterministic pass, so nothing here is retried.
/// Callers are expected to fix the input or configuration and run again.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SplitError {
    /// The split is misconfigured, for example a group count of zero or a
    /// missing test loader.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A test declares a dependency that no loaded test has as signature.
    #[error("test '{test}' depends on '{dependency}', which matches no loaded test")]
    UnresolvedDependency { test: String, dependency: String },

    /// Enumerating tests or files below a location failed.
    #[error("failed to discover tests in '{}'", location.display())]
    Discovery {
        location: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A test manifest could not be parsed.
    #[error("invalid test manifest '{}'", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading a written group file back failed.
    #[error("failed to read group file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a group file failed.
    #[error("failed to write group file '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SplitError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
