//! Arena dependency graph
//!
//! Nodes are addressed by opaque ids and edges are adjacency lists of ids,
//! never references, so nodes can be removed mid-iteration without any
//! dangling-reference risk.

/// Opaque handle to a node in a [`DepGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Directed graph of dependency nodes.
///
/// An edge `parent -> child` means "parent depends on child". The graph
/// exclusively owns its nodes; removed slots are never reused within a run.
#[derive(Debug, Clone)]
pub struct DepGraph<T> {
    nodes: Vec<Option<T>>,
    children: Vec<Vec<NodeId>>,
}

impl<T> DepGraph<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Insert a node, returning its id
    pub fn add_node(&mut self, value: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(value));
        self.children.push(Vec::new());
        id
    }

    /// Add edge `parent -> child`. Duplicate edges are ignored.
    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.contains(parent) && self.contains(child));
        let edges = &mut self.children[parent.0];
        if !edges.contains(&child) {
            edges.push(child);
        }
    }

    /// Remove a node and every edge that references it
    pub fn remove_node(&mut self, id: NodeId) -> Option<T> {
        let value = self.nodes.get_mut(id.0)?.take()?;
        self.children[id.0].clear();
        for edges in &mut self.children {
            edges.retain(|&c| c != id);
        }
        Some(value)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(|n| n.is_some())
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.0)?.as_mut()
    }

    /// Ids of all live nodes
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|_| NodeId(i)))
    }

    /// First node satisfying the predicate
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<NodeId> {
        self.node_ids().find(|&id| {
            self.get(id).map(&mut predicate).unwrap_or(false)
        })
    }

    /// Direct dependencies of a node
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.children[id.0]
    }

    /// Nodes holding an edge toward `id`
    pub fn parents(&self, id: NodeId) -> Vec<NodeId> {
        self.node_ids()
            .filter(|&p| self.children[p.0].contains(&id))
            .collect()
    }

    /// Nodes with no remaining outgoing edges
    pub fn leaves(&self) -> Vec<NodeId> {
        self.node_ids()
            .filter(|&id| self.children[id.0].is_empty())
            .collect()
    }

    /// Nodes with no inbound edges
    pub fn roots(&self) -> Vec<NodeId> {
        let mut has_parent = vec![false; self.nodes.len()];
        for id in self.node_ids() {
            for child in &self.children[id.0] {
                has_parent[child.0] = true;
            }
        }
        self.node_ids().filter(|&id| !has_parent[id.0]).collect()
    }

    /// Count of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for DepGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}
