//! Manifest resolution
//!
//! Walks the root manifest and every nested manifest found inside downloaded
//! sources, producing one shared dependency graph. A name seen twice becomes
//! one node with an extra inbound edge; a name seen twice with different
//! content becomes one node with an extra alternative.

use crate::backend::{BuildBackend, DownloadBackend};
use crate::cache::cache_paths;
use crate::dependency::Dependency;
use crate::error::{BuildError, BuildResult};
use crate::options::GleanOptions;
use crate::report::Reporter;
use glean_package::{DepGraph, DependencyItem, GleanManifest, NodeId, MANIFEST_FILE_NAME};
use std::collections::HashMap;
use std::path::Path;

/// Resolve a manifest into a completed dependency graph.
///
/// Fatal on a missing manifest, on a nested manifest whose `provides` does
/// not match the name it was reached by, and on any download failure for a
/// non-optional dependency.
pub fn resolve(
    manifest_path: &Path,
    opts: &GleanOptions,
    reporter: &dyn Reporter,
) -> BuildResult<DepGraph<Dependency>> {
    if !manifest_path.is_file() {
        return Err(BuildError::ManifestNotFound {
            path: manifest_path.to_path_buf(),
        });
    }
    let manifest = GleanManifest::from_file(manifest_path)?;

    let mut resolver = Resolver {
        opts,
        reporter,
        graph: DepGraph::new(),
        seen: HashMap::new(),
    };
    let root = resolver.graph.add_node(Dependency::root(&manifest.provides));
    resolver.seen.insert(manifest.provides.clone(), root);
    resolver.resolve_manifest(&manifest, root)?;
    Ok(resolver.graph)
}

struct Resolver<'a> {
    opts: &'a GleanOptions,
    reporter: &'a dyn Reporter,
    graph: DepGraph<Dependency>,
    seen: HashMap<String, NodeId>,
}

impl Resolver<'_> {
    fn resolve_manifest(&mut self, manifest: &GleanManifest, parent: NodeId) -> BuildResult<()> {
        for item in &manifest.dependencies {
            self.process_item(item, parent)?;
        }
        Ok(())
    }

    fn process_item(&mut self, item: &DependencyItem, parent: NodeId) -> BuildResult<()> {
        let paths = cache_paths(&self.opts.cache_root, item.build_type, &item.provides);
        paths.ensure()?;

        if let Some(&existing) = self.seen.get(&item.provides) {
            if let Some(node) = self.graph.get_mut(existing) {
                if !node.matches(item) {
                    // same name, different content: register an alternative
                    self.reporter.info(&format!(
                        "Dependency '{}' redeclared with different content; keeping both",
                        item.provides
                    ));
                    let has_nested = paths.source.join(MANIFEST_FILE_NAME).is_file();
                    let build = BuildBackend::for_item(item, &paths, self.opts, has_nested);
                    node.add_alternative(build, item.clone());
                }
            }
            self.graph.add_edge(parent, existing);
            return Ok(());
        }

        // first discovery: fetch the source before anything else
        let download = DownloadBackend::for_item(item, &paths.source, &self.opts.tools);
        self.reporter.info(&format!(
            "Downloading '{}' ({}) -> {}",
            item.provides,
            item.download_type,
            paths.source.display()
        ));
        if !download.download(self.reporter).is_success() {
            if item.is_optional {
                // the whole subtree this item would have introduced is dropped
                self.reporter.info(&format!(
                    "Optional dependency '{}' unavailable, skipping",
                    item.provides
                ));
                return Ok(());
            }
            return Err(BuildError::DownloadFailed {
                name: item.provides.clone(),
                uri: item.uri.clone(),
            });
        }

        let nested_path = paths.source.join(MANIFEST_FILE_NAME);
        let has_nested = nested_path.is_file();

        let build = BuildBackend::for_item(item, &paths, self.opts, has_nested);
        let id = self
            .graph
            .add_node(Dependency::new(&item.provides, build, item.clone()));
        self.seen.insert(item.provides.clone(), id);
        self.graph.add_edge(parent, id);

        if has_nested {
            let nested = GleanManifest::from_file(&nested_path)?;
            if nested.provides != item.provides {
                return Err(BuildError::ProvidesMismatch {
                    expected: item.provides.clone(),
                    found: nested.provides,
                    path: nested_path,
                });
            }
            self.resolve_manifest(&nested, id)?;
        }
        Ok(())
    }
}
