//! Invocation options shared by the resolver, scheduler, and emitter

use glean_package::DependencyOptions;
use std::path::PathBuf;

/// A single build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Release,
    Debug,
}

impl BuildMode {
    /// Directory name for the per-mode build tree
    pub fn name(&self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Debug => "debug",
        }
    }

    /// Value passed as CMAKE_BUILD_TYPE
    pub fn cmake_name(&self) -> &'static str {
        match self {
            Self::Release => "Release",
            Self::Debug => "Debug",
        }
    }
}

/// Which build configurations a run covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModeSelection {
    #[default]
    Release,
    Debug,
    All,
}

impl ModeSelection {
    pub fn modes(&self) -> &'static [BuildMode] {
        match self {
            Self::Release => &[BuildMode::Release],
            Self::Debug => &[BuildMode::Debug],
            Self::All => &[BuildMode::Release, BuildMode::Debug],
        }
    }
}

/// Whether the graph is executed directly or rendered for a host build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputKind {
    #[default]
    Process,
    Cmake,
}

/// External tool locations, normally supplied by the user config file
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub cmake: String,
    pub git: String,
    pub svn: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            cmake: "cmake".to_string(),
            git: "git".to_string(),
            svn: "svn".to_string(),
        }
    }
}

/// Options for one glean invocation
#[derive(Debug, Clone)]
pub struct GleanOptions {
    /// Root of the shared dependency cache
    pub cache_root: PathBuf,
    /// Install prefix dependencies install into
    pub install_prefix: PathBuf,
    pub build_modes: ModeSelection,
    pub output: OutputKind,
    /// Extra cmake arguments applied to every dependency
    pub cmake_args: Vec<String>,
    /// Parallel build jobs passed to the build tool
    pub jobs: Option<u32>,
    /// When a name has conflicting declarations, use the first registered one
    pub use_first_dependency: bool,
    /// Per-dependency option overrides
    pub dep_opts: DependencyOptions,
    pub tools: ToolPaths,
}

impl GleanOptions {
    pub fn new(cache_root: impl Into<PathBuf>, install_prefix: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            install_prefix: install_prefix.into(),
            build_modes: ModeSelection::default(),
            output: OutputKind::default(),
            cmake_args: Vec::new(),
            jobs: None,
            use_first_dependency: true,
            dep_opts: DependencyOptions::default(),
            tools: ToolPaths::default(),
        }
    }
}
