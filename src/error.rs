//! Error taxonomy for topology construction, session lifecycle, and verification.

use thiserror::Error;

/// Fatal errors a run can surface. Per-probe failures are recorded as data
/// in the verification results, never raised through this type.
#[derive(Debug, Error)]
pub enum TopoError {
    /// Unrecognized family name or a non-positive shape parameter.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// The descriptor would expand into more nodes than the safety ceiling.
    #[error("topology too large: {nodes} nodes exceeds the {ceiling}-node ceiling")]
    ConstructionOverflow { nodes: u64, ceiling: u64 },

    /// The controller endpoint refused the control connection at start.
    #[error("controller unreachable at {endpoint}")]
    ControllerUnavailable { endpoint: String },

    /// An exhaustive reachability sweep was requested over too many hosts.
    #[error(
        "verification scope too large: {hosts} hosts exceeds the {ceiling}-host full-sweep ceiling"
    )]
    VerificationScopeTooLarge { hosts: usize, ceiling: usize },
}
