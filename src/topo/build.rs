//! Family-specific graph construction.

use tracing::debug;

use super::descriptor::TopoDescriptor;
use super::graph::{Graph, NodeId};
use crate::error::TopoError;

/// Safety ceiling on total node count, guarding against degenerate
/// depth/fanout combinations before anything is instantiated downstream.
pub const MAX_GRAPH_NODES: u64 = 10_000;

/// Build the concrete graph for a validated descriptor.
///
/// Deterministic: identical descriptors yield identical node names and edge
/// sets. No side effects beyond the returned graph.
pub fn build(desc: &TopoDescriptor) -> Result<Graph, TopoError> {
    let nodes = node_count(desc);
    if nodes > MAX_GRAPH_NODES {
        return Err(TopoError::ConstructionOverflow {
            nodes,
            ceiling: MAX_GRAPH_NODES,
        });
    }

    let graph = match *desc {
        TopoDescriptor::Star { host_count } => build_star(host_count),
        TopoDescriptor::Chain { length } => build_chain(length),
        TopoDescriptor::Tree { depth, fanout } => build_tree(depth, fanout),
    };
    debug!(
        family = %desc.family(),
        switches = graph.switch_count(),
        hosts = graph.host_count(),
        links = graph.edges().len(),
        "graph built"
    );
    Ok(graph)
}

/// Total node count the descriptor expands to, saturating on overflow so the
/// ceiling check still trips.
fn node_count(desc: &TopoDescriptor) -> u64 {
    match *desc {
        TopoDescriptor::Star { host_count } => u64::from(host_count).saturating_add(1),
        TopoDescriptor::Chain { length } => u64::from(length).saturating_mul(2),
        TopoDescriptor::Tree { depth, fanout } => {
            let fanout = u64::from(fanout);
            let mut switches: u64 = 0;
            let mut level_width: u64 = 1;
            for _ in 0..=depth {
                switches = switches.saturating_add(level_width);
                level_width = level_width.saturating_mul(fanout);
            }
            // One host per leaf switch.
            let leaves = fanout.saturating_pow(depth);
            switches.saturating_add(leaves)
        }
    }
}

fn build_star(host_count: u32) -> Graph {
    let mut g = Graph::default();
    let switch = g.add_switch("s1");
    for i in 1..=host_count {
        let host = g.add_host(format!("h{i}"));
        g.connect(host, switch);
    }
    g
}

fn build_chain(length: u32) -> Graph {
    let mut g = Graph::default();
    let mut previous: Option<NodeId> = None;
    for i in 1..=length {
        let switch = g.add_switch(format!("s{i}"));
        let host = g.add_host(format!("h{i}"));
        g.connect(host, switch);
        if let Some(prev) = previous {
            g.connect(prev, switch);
        }
        previous = Some(switch);
    }
    g
}

struct TreeBuilder {
    graph: Graph,
    fanout: u32,
    next_switch: u64,
    next_host: u64,
}

impl TreeBuilder {
    /// Grow one switch and its subtree, preorder. Switches are numbered in
    /// creation order, hosts in left-to-right leaf order, so naming is
    /// reproducible for any (depth, fanout).
    fn grow(&mut self, remaining_depth: u32) -> NodeId {
        let switch = self.graph.add_switch(format!("s{}", self.next_switch));
        self.next_switch += 1;

        if remaining_depth == 0 {
            let host = self.graph.add_host(format!("h{}", self.next_host));
            self.next_host += 1;
            self.graph.connect(host, switch);
        } else {
            for _ in 0..self.fanout {
                let child = self.grow(remaining_depth - 1);
                self.graph.connect(switch, child);
            }
        }
        switch
    }
}

fn build_tree(depth: u32, fanout: u32) -> Graph {
    let mut builder = TreeBuilder {
        graph: Graph::default(),
        fanout,
        next_switch: 1,
        next_host: 1,
    };
    builder.grow(depth);
    builder.graph
}
