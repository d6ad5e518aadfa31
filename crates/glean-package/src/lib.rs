//! Glean package layer
//!
//! Manifest parsing for glean.json files, the dependency-options overlay
//! file, and the arena dependency graph the resolver populates.

pub mod dep_opts;
pub mod graph;
pub mod manifest;

pub use dep_opts::{DependencyOption, DependencyOptions, MergeKind, OptionName};
pub use graph::{DepGraph, NodeId};
pub use manifest::{BuildKind, DependencyItem, DownloadKind, GleanManifest, MANIFEST_FILE_NAME};

/// Package layer errors
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("Failed to parse manifest: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Manifest not found: {0}")]
    ManifestNotFound(std::path::PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PackageError>;
