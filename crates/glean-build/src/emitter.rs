//! CMake ExternalProject emission
//!
//! Renders the resolved graph as a declarative build description a host
//! CMake build can execute instead of glean driving the tools itself.
//! Projects appear in leaves-first order so every DEPENDS entry names an
//! already-declared project.

use crate::dependency::Dependency;
use crate::error::{BuildError, BuildResult};
use crate::options::GleanOptions;
use crate::report::Reporter;
use glean_package::{DepGraph, DependencyItem, DownloadKind, NodeId};
use std::collections::HashMap;

/// Render the graph as CMake ExternalProject declarations.
///
/// Only git-sourced dependencies can be expressed; anything else is warned
/// about and left out. More than one root is a hard error.
pub fn emit(
    mut graph: DepGraph<Dependency>,
    opts: &GleanOptions,
    reporter: &dyn Reporter,
) -> BuildResult<String> {
    let roots = graph.roots();
    if roots.len() != 1 {
        return Err(BuildError::MultipleRoots { count: roots.len() });
    }

    // capture each node's dependency names before leaf removal erases edges
    let children_of: HashMap<NodeId, Vec<String>> = graph
        .node_ids()
        .map(|id| {
            let names = graph
                .children(id)
                .iter()
                .filter_map(|&child| graph.get(child))
                .filter(|dep| emittable(dep, opts).is_some())
                .map(|dep| dep.name().to_string())
                .collect();
            (id, names)
        })
        .collect();

    let mut out = String::new();
    out.push_str("# Generated by glean. Dependency projects in build order.\n");
    out.push_str("include(ExternalProject)\n\n");
    out.push_str("if(NOT DEFINED GLEAN_INSTALL_PREFIX)\n");
    out.push_str("  set(GLEAN_INSTALL_PREFIX ${CMAKE_BINARY_DIR}/glean_prefix)\n");
    out.push_str("endif()\n");
    let mut emitted: Vec<String> = Vec::new();

    while !graph.is_empty() {
        let leaves = graph.leaves();
        if leaves.is_empty() {
            let remaining: Vec<&str> = graph
                .node_ids()
                .filter_map(|id| graph.get(id).map(Dependency::name))
                .collect();
            return Err(BuildError::CircularDependency(remaining.join(", ")));
        }

        for leaf in leaves {
            if let Some(node) = graph.get(leaf) {
                match emittable_checked(node, opts)? {
                    Some(item) => {
                        let depends = children_of.get(&leaf).map(Vec::as_slice).unwrap_or(&[]);
                        emit_project(&mut out, node.name(), item, depends, opts);
                        emitted.push(node.name().to_string());
                    }
                    None if node.has_build_target() => {
                        reporter.info(&format!(
                            "'{}' is not git-sourced, leaving it out of the cmake output",
                            node.name()
                        ));
                    }
                    None => {} // root
                }
            }
            graph.remove_node(leaf);
        }
    }

    out.push_str("\nset(GLEAN_DEPENDENCIES");
    for name in &emitted {
        out.push(' ');
        out.push_str(name);
    }
    out.push_str(")\n");
    Ok(out)
}

/// The item to emit for a node, if its active declaration is git-sourced
fn emittable<'a>(node: &'a Dependency, opts: &GleanOptions) -> Option<&'a DependencyItem> {
    let alternative = node.active(opts.use_first_dependency).ok()?;
    let item = alternative.item.as_ref()?;
    item.download_type.is_git_sourced().then_some(item)
}

/// Like [`emittable`], but an ambiguity error propagates instead of hiding
fn emittable_checked<'a>(
    node: &'a Dependency,
    opts: &GleanOptions,
) -> BuildResult<Option<&'a DependencyItem>> {
    let alternative = node.active(opts.use_first_dependency)?;
    Ok(alternative
        .item
        .as_ref()
        .filter(|item| item.download_type.is_git_sourced()))
}

fn emit_project(
    out: &mut String,
    name: &str,
    item: &DependencyItem,
    depends: &[String],
    opts: &GleanOptions,
) {
    let uri = match item.download_type {
        DownloadKind::GitHub => crate::backend::github_to_git_uri(&item.uri),
        _ => item.uri.clone(),
    };
    let tag = if item.version.is_empty() {
        "master"
    } else {
        item.version.as_str()
    };

    out.push_str("\nExternalProject_Add(\n");
    out.push_str(&format!("  {name}\n"));
    out.push_str(&format!("  GIT_REPOSITORY {uri}\n"));
    out.push_str(&format!("  GIT_TAG {tag}\n"));
    if !depends.is_empty() {
        out.push_str(&format!("  DEPENDS {}\n", depends.join(" ")));
    }
    out.push_str("  CMAKE_ARGS -DCMAKE_INSTALL_PREFIX=${GLEAN_INSTALL_PREFIX}");
    for arg in opts
        .dep_opts
        .cmake_args_for(&item.provides, &item.cmake_args)
    {
        out.push(' ');
        out.push_str(&arg);
    }
    out.push('\n');
    out.push_str(")\n");
}
