//! QueryGraph: the typed, referentially-checked container for a client query.
//!
//! Nodes and edges are stored in a `StableGraph`, so an edge can only exist
//! between two nodes that are actually present. Two `IndexMap`s map the
//! client's string keys to graph indices and remember document order, which
//! keeps iteration (and therefore diagnostics) deterministic.
//!
//! All mutations go through [`QueryGraph`] methods; the underlying graph is
//! private.

use indexmap::IndexMap;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableGraph;
use petgraph::Directed;

use crate::edge::{EdgeRef, QueryEdge};
use crate::error::CoreError;
use crate::id::{EdgeKey, NodeKey};
use crate::node::QueryNode;

/// A query graph: entity nodes connected by typed relation edges.
#[derive(Debug, Clone, Default)]
pub struct QueryGraph {
    graph: StableGraph<QueryNode, QueryEdge, Directed, u32>,
    /// Node key -> graph index, in document order.
    nodes: IndexMap<NodeKey, NodeIndex<u32>>,
    /// Edge key -> graph index, in document order.
    edges: IndexMap<EdgeKey, EdgeIndex<u32>>,
}

impl QueryGraph {
    /// Creates an empty query graph.
    pub fn new() -> Self {
        QueryGraph::default()
    }

    /// Adds a node. Fails if a node with the same key already exists.
    pub fn add_node(&mut self, node: QueryNode) -> Result<(), CoreError> {
        if self.nodes.contains_key(&node.key) {
            return Err(CoreError::DuplicateNode { node: node.key });
        }
        let key = node.key.clone();
        let idx = self.graph.add_node(node);
        self.nodes.insert(key, idx);
        Ok(())
    }

    /// Adds an edge from `subject` to `object`.
    ///
    /// Fails if the edge key is taken or either endpoint is not a node of
    /// this graph.
    pub fn add_edge(
        &mut self,
        edge: QueryEdge,
        subject: &NodeKey,
        object: &NodeKey,
    ) -> Result<(), CoreError> {
        if self.edges.contains_key(&edge.key) {
            return Err(CoreError::DuplicateEdge { edge: edge.key });
        }
        let from = self.index_of(&edge.key, subject)?;
        let to = self.index_of(&edge.key, object)?;
        let key = edge.key.clone();
        let idx = self.graph.add_edge(from, to, edge);
        self.edges.insert(key, idx);
        Ok(())
    }

    fn index_of(&self, edge: &EdgeKey, node: &NodeKey) -> Result<NodeIndex<u32>, CoreError> {
        self.nodes
            .get(node)
            .copied()
            .ok_or_else(|| CoreError::DanglingReference {
                edge: edge.clone(),
                node: node.clone(),
            })
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// Looks up a node by key.
    pub fn node(&self, key: &str) -> Option<&QueryNode> {
        self.nodes.get(key).map(|&idx| &self.graph[idx])
    }

    /// Looks up an edge by key, together with its endpoints.
    pub fn edge(&self, key: &str) -> Option<EdgeRef<'_>> {
        self.edges.get(key).and_then(|&idx| self.edge_ref(idx))
    }

    /// Nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = &QueryNode> + '_ {
        self.nodes.values().map(move |&idx| &self.graph[idx])
    }

    /// Edges in document order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.edges.values().filter_map(move |&idx| self.edge_ref(idx))
    }

    fn edge_ref(&self, idx: EdgeIndex<u32>) -> Option<EdgeRef<'_>> {
        let (from, to) = self.graph.edge_endpoints(idx)?;
        Some(EdgeRef {
            edge: &self.graph[idx],
            subject: &self.graph[from].key,
            object: &self.graph[to].key,
        })
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Mutable access to a node. The key itself must not be changed.
    pub fn node_mut(&mut self, key: &str) -> Option<&mut QueryNode> {
        let idx = *self.nodes.get(key)?;
        Some(&mut self.graph[idx])
    }

    /// Visits every node mutably in document order, stopping at the first
    /// error. Node keys must not be changed by `f`.
    pub fn try_update_nodes<E>(
        &mut self,
        mut f: impl FnMut(&mut QueryNode) -> Result<(), E>,
    ) -> Result<(), E> {
        for &idx in self.nodes.values() {
            f(&mut self.graph[idx])?;
        }
        Ok(())
    }
}
