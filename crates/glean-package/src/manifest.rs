//! Manifest parsing and types (glean.json)

use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name a manifest is looked up under, both at the invocation root and
/// inside a downloaded dependency's source tree.
pub const MANIFEST_FILE_NAME: &str = "glean.json";

/// Project manifest (glean.json)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GleanManifest {
    /// Logical name this manifest satisfies
    pub provides: String,
    /// How the project described by this manifest is built
    pub build_type: BuildKind,
    #[serde(default)]
    pub dependencies: Vec<DependencyItem>,
}

impl GleanManifest {
    /// Parse manifest from a JSON string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Load manifest from file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        if !path.is_file() {
            return Err(crate::PackageError::ManifestNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_str(&content)?)
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// One dependency declaration inside a manifest.
///
/// Immutable once parsed. Structural equality decides whether a second
/// declaration of the same `provides` name is the same dependency or a
/// conflicting alternative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencyItem {
    pub provides: String,
    pub download_type: DownloadKind,
    pub build_type: BuildKind,
    pub uri: String,
    /// Empty means the backend default (latest / default branch / trunk)
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub custom_options: String,
    #[serde(default)]
    pub cmake_args: Vec<String>,
    #[serde(default)]
    pub is_optional: bool,
}

/// Supported download methods. Closed set; unknown tags fail at parse time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DownloadKind {
    None,
    Git,
    Svn,
    Uri,
    #[serde(rename = "github")]
    GitHub,
}

impl DownloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Git => "git",
            Self::Svn => "svn",
            Self::Uri => "uri",
            Self::GitHub => "github",
        }
    }

    /// Whether the backend ultimately fetches via git
    pub fn is_git_sourced(&self) -> bool {
        matches!(self, Self::Git | Self::GitHub)
    }
}

/// Supported build methods. Closed set; unknown tags fail at parse time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BuildKind {
    None,
    Cmake,
}

impl BuildKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Cmake => "cmake",
        }
    }
}

impl std::fmt::Display for DownloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for BuildKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
