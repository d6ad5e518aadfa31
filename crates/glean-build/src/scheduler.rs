//! Leaves-first build scheduling
//!
//! Repeatedly takes the current leaf set (nodes whose dependencies have all
//! been processed and removed), acts on each leaf, and removes it. Every node
//! is therefore acted on strictly after everything it depends on. A round
//! that produces no leaves while nodes remain means a cycle, which resolution
//! should have made impossible.

use crate::dependency::Dependency;
use crate::error::{BuildError, BuildResult};
use crate::options::GleanOptions;
use crate::report::Reporter;
use glean_package::{DepGraph, NodeId};
use std::collections::HashSet;

/// What happened to each node during a run
#[derive(Debug, Default)]
pub struct BuildReport {
    pub built: Vec<String>,
    pub failed: Vec<String>,
    /// Nodes not attempted because something they depend on failed
    pub skipped: Vec<String>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Build and install every node in dependency order.
///
/// A failed build or install does not abort the run: the node is recorded as
/// failed and everything that depends on it is skipped, so independent
/// subtrees still complete. The caller turns a non-success report into a
/// nonzero exit.
pub fn execute(
    mut graph: DepGraph<Dependency>,
    opts: &GleanOptions,
    reporter: &dyn Reporter,
) -> BuildResult<BuildReport> {
    let mut report = BuildReport::default();
    let mut blocked: HashSet<NodeId> = HashSet::new();

    while !graph.is_empty() {
        let leaves = graph.leaves();
        if leaves.is_empty() {
            return Err(cycle_error(&graph));
        }

        for leaf in leaves {
            process_leaf(&mut graph, leaf, &mut blocked, opts, reporter, &mut report)?;
            graph.remove_node(leaf);
        }
    }

    Ok(report)
}

fn process_leaf(
    graph: &mut DepGraph<Dependency>,
    leaf: NodeId,
    blocked: &mut HashSet<NodeId>,
    opts: &GleanOptions,
    reporter: &dyn Reporter,
    report: &mut BuildReport,
) -> BuildResult<()> {
    let Some(node) = graph.get(leaf) else {
        return Ok(());
    };
    let name = node.name().to_string();

    if !node.has_build_target() {
        // root or pure aggregator
        return Ok(());
    }
    if blocked.contains(&leaf) {
        reporter.info(&format!("Skipping '{name}': a dependency failed"));
        report.skipped.push(name);
        return Ok(());
    }

    let alternative = node.active(opts.use_first_dependency)?;
    let mut ok = true;
    for &mode in opts.build_modes.modes() {
        reporter.info(&format!("Building '{name}' [{}]", mode.name()));
        if !alternative.build.build(mode, reporter).is_success() {
            reporter.error(&format!("Build of '{name}' [{}] failed", mode.name()));
            ok = false;
            break;
        }
        if !alternative.build.install(mode, reporter).is_success() {
            reporter.error(&format!("Install of '{name}' [{}] failed", mode.name()));
            ok = false;
            break;
        }
    }

    if ok {
        report.built.push(name);
    } else {
        block_ancestors(graph, leaf, blocked);
        report.failed.push(name);
    }
    Ok(())
}

/// Mark everything that can reach `id` so it is skipped once it becomes a leaf
fn block_ancestors(graph: &DepGraph<Dependency>, id: NodeId, blocked: &mut HashSet<NodeId>) {
    let mut pending = vec![id];
    while let Some(current) = pending.pop() {
        for parent in graph.parents(current) {
            if blocked.insert(parent) {
                pending.push(parent);
            }
        }
    }
}

fn cycle_error(graph: &DepGraph<Dependency>) -> BuildError {
    let remaining: Vec<&str> = graph
        .node_ids()
        .filter_map(|id| graph.get(id).map(Dependency::name))
        .collect();
    BuildError::CircularDependency(remaining.join(", "))
}
