/// Resolver and scheduler error types
use std::path::PathBuf;
use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    #[error(
        "Manifest at {path} provides '{found}' but was referenced as '{expected}'"
    )]
    ProvidesMismatch {
        expected: String,
        found: String,
        path: PathBuf,
    },

    #[error("Download failed for dependency '{name}' ({uri})")]
    DownloadFailed { name: String, uri: String },

    #[error("Cache path {path} exists but is not a directory")]
    CachePathConflict { path: PathBuf },

    #[error("Circular dependency detected: no buildable leaves among {0}")]
    CircularDependency(String),

    #[error("Dependency '{name}' has {count} conflicting declarations and use_first_dependency is disabled")]
    AmbiguousDependency { name: String, count: usize },

    #[error("Expected exactly one root in the dependency graph, found {count}")]
    MultipleRoots { count: usize },

    #[error("Package error: {0}")]
    Package(#[from] glean_package::PackageError),

    #[error("IO error at {path}: {error}")]
    IoAt {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::IoAt {
            path: path.into(),
            error,
        }
    }
}
