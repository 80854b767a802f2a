//! Concrete node/edge structure produced by the builders.

use std::collections::HashSet;

use serde::Serialize;

/// Node identifier; indexes into the graph's node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Host,
    Switch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub name: String,
    pub kind: NodeKind,
}

/// Built topology graph. Append-only during construction; handed to the
/// session by value and never mutated afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<(NodeId, NodeId)>,
    edge_set: HashSet<(NodeId, NodeId)>,
}

impl Graph {
    pub fn add_host(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node(name.into(), NodeKind::Host)
    }

    pub fn add_switch(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node(name.into(), NodeKind::Switch)
    }

    fn add_node(&mut self, name: String, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(GraphNode { name, kind });
        id
    }

    /// Add an unordered edge. Self-loops and duplicate edges are builder
    /// bugs, not user errors.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        assert!(a != b, "self-loop on node {a:?}");
        assert!(
            self.edge_set.insert(normalize(a, b)),
            "duplicate edge {a:?} - {b:?}"
        );
        self.edges.push((a, b));
    }

    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_set.contains(&normalize(a, b))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn host_count(&self) -> usize {
        self.count_kind(NodeKind::Host)
    }

    pub fn switch_count(&self) -> usize {
        self.count_kind(NodeKind::Switch)
    }

    fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Host names in creation order. The tree verifier addresses hosts
    /// positionally through this ordering.
    pub fn host_names(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Host)
            .map(|n| n.name.clone())
            .collect()
    }
}

fn normalize(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a.0 <= b.0 { (a, b) } else { (b, a) }
}
