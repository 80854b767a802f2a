//! Reachability verification: family-specific probe plans and execution.

use tracing::{debug, info, warn};

use crate::error::TopoError;
use crate::session::{Runtime, Session};
use crate::topo::{Family, TopoDescriptor};

/// Largest host count the exhaustive star/chain sweep will accept; beyond it
/// planning fails fast instead of silently degrading into an O(n^2) sweep.
pub const FULL_SWEEP_HOST_CEILING: usize = 128;

pub type HostPair = (String, String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub src: String,
    pub dst: String,
    pub ok: bool,
}

/// Derive the probe plan for a descriptor from the live host set.
pub fn plan(desc: &TopoDescriptor, hosts: &[String]) -> Result<Vec<HostPair>, TopoError> {
    plan_with_ceiling(desc, hosts, FULL_SWEEP_HOST_CEILING)
}

pub fn plan_with_ceiling(
    desc: &TopoDescriptor,
    hosts: &[String],
    ceiling: usize,
) -> Result<Vec<HostPair>, TopoError> {
    match desc.family() {
        Family::Star | Family::Chain => {
            if hosts.len() > ceiling {
                return Err(TopoError::VerificationScopeTooLarge {
                    hosts: hosts.len(),
                    ceiling,
                });
            }
            Ok(full_mesh(hosts))
        }
        Family::Tree => Ok(tree_sample(hosts)),
    }
}

/// All distinct unordered host pairs, in host order.
fn full_mesh(hosts: &[String]) -> Vec<HostPair> {
    let mut pairs = Vec::with_capacity(hosts.len() * hosts.len().saturating_sub(1) / 2);
    for (i, a) in hosts.iter().enumerate() {
        for b in &hosts[i + 1..] {
            pairs.push((a.clone(), b.clone()));
        }
    }
    pairs
}

/// Fixed-size smoke sample for trees, whose host count grows exponentially
/// with depth: the first leaf, the leaf at the midpoint, and the last leaf.
/// In a balanced tree with fanout >= 3 the three picks land under three
/// distinct top-level subtrees (first, middle, last); with fanout 2 the
/// midpoint and the last leaf still sit in different second-level branches.
fn tree_sample(hosts: &[String]) -> Vec<HostPair> {
    let n = hosts.len();
    if n < 2 {
        return Vec::new();
    }
    let mut picks = vec![0, n / 2, n - 1];
    picks.dedup();
    let mut pairs = Vec::new();
    for (i, &a) in picks.iter().enumerate() {
        for &b in &picks[i + 1..] {
            pairs.push((hosts[a].clone(), hosts[b].clone()));
        }
    }
    pairs
}

/// Probe every planned pair, strictly in plan order, one at a time. Failures
/// are recorded and never abort the batch.
pub fn run<R: Runtime>(session: &mut Session<R>, plan: &[HostPair]) -> Vec<ProbeOutcome> {
    info!(pairs = plan.len(), "testing connectivity");
    let mut outcomes = Vec::with_capacity(plan.len());
    for (src, dst) in plan {
        let ok = session.probe(src, dst);
        if ok {
            debug!(%src, %dst, "probe ok");
        } else {
            warn!(%src, %dst, "probe failed");
        }
        outcomes.push(ProbeOutcome {
            src: src.clone(),
            dst: dst.clone(),
            ok,
        });
    }
    outcomes
}
