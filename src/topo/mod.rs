//! Topology descriptors, graphs, and the family builders.

mod build;
mod descriptor;
mod graph;

pub use build::{MAX_GRAPH_NODES, build};
pub use descriptor::{Family, TopoDescriptor};
pub use graph::{Graph, GraphNode, NodeId, NodeKind};
