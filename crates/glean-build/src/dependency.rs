//! Dependency graph node payload

use crate::backend::BuildBackend;
use crate::error::{BuildError, BuildResult};
use glean_package::DependencyItem;

/// One declaration registered against a name: the build capability bound to
/// the cache slot, and the manifest item it came from. The root sentinel has
/// no item.
#[derive(Debug, Clone)]
pub struct Alternative {
    pub build: BuildBackend,
    pub item: Option<DependencyItem>,
}

/// A resolved dependency.
///
/// Normally one alternative; re-discovery of the same name with a
/// structurally different item appends another. Which alternative is used at
/// build time is the scheduler's policy call, not the node's.
#[derive(Debug, Clone)]
pub struct Dependency {
    name: String,
    alternatives: Vec<Alternative>,
}

impl Dependency {
    /// Sentinel node for the top-level manifest; carries no build target
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alternatives: vec![Alternative {
                build: BuildBackend::None,
                item: None,
            }],
        }
    }

    pub fn new(name: impl Into<String>, build: BuildBackend, item: DependencyItem) -> Self {
        Self {
            name: name.into(),
            alternatives: vec![Alternative {
                build,
                item: Some(item),
            }],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    pub fn add_alternative(&mut self, build: BuildBackend, item: DependencyItem) {
        self.alternatives.push(Alternative {
            build,
            item: Some(item),
        });
    }

    /// Whether any registered declaration structurally equals `item`
    pub fn matches(&self, item: &DependencyItem) -> bool {
        self.alternatives
            .iter()
            .any(|alt| alt.item.as_ref() == Some(item))
    }

    /// Whether this node has anything to build (false only for the root and
    /// aggregate-only sentinels)
    pub fn has_build_target(&self) -> bool {
        self.alternatives.iter().any(|alt| alt.item.is_some())
    }

    /// The alternative scheduling acts on.
    ///
    /// First registered wins when `use_first` is set; otherwise more than one
    /// alternative is an error the caller surfaces.
    pub fn active(&self, use_first: bool) -> BuildResult<&Alternative> {
        if self.alternatives.len() > 1 && !use_first {
            return Err(BuildError::AmbiguousDependency {
                name: self.name.clone(),
                count: self.alternatives.len(),
            });
        }
        // construction guarantees at least one alternative
        Ok(&self.alternatives[0])
    }
}
