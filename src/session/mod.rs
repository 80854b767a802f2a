//! Session lifecycle over the external emulation runtime.
//!
//! The runtime itself (Mininet/OVS or an in-process stand-in) sits behind the
//! [`Runtime`] trait; the session only sequences its narrow interface and
//! guarantees teardown on every exit path.

mod sim;

pub use sim::SimRuntime;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::TopoError;
use crate::topo::{Graph, NodeKind};

/// Remote controller endpoint switches attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerEndpoint {
    pub host: String,
    pub port: u16,
}

impl ControllerEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for ControllerEndpoint {
    fn default() -> Self {
        Self::new("127.0.0.1", 6653)
    }
}

impl fmt::Display for ControllerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for ControllerEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected host:port, got {s:?}"))?;
        // A bracketed IPv6 literal keeps its brackets through rsplit_once;
        // strip them so the host resolves when dialed.
        let host = match host.strip_prefix('[') {
            Some(rest) => rest
                .strip_suffix(']')
                .ok_or_else(|| format!("unbalanced brackets in {s:?}"))?,
            None => host,
        };
        if host.is_empty() {
            return Err(format!("expected host:port, got {s:?}"));
        }
        let port = port.parse().map_err(|_| format!("bad port in {s:?}"))?;
        Ok(Self::new(host, port))
    }
}

/// Control-protocol version applied uniformly to every switch after start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolVersion {
    OpenFlow10,
    #[default]
    OpenFlow13,
    OpenFlow14,
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVersion::OpenFlow10 => write!(f, "OpenFlow10"),
            ProtocolVersion::OpenFlow13 => write!(f, "OpenFlow13"),
            ProtocolVersion::OpenFlow14 => write!(f, "OpenFlow14"),
        }
    }
}

impl FromStr for ProtocolVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openflow10" => Ok(ProtocolVersion::OpenFlow10),
            "openflow13" => Ok(ProtocolVersion::OpenFlow13),
            "openflow14" => Ok(ProtocolVersion::OpenFlow14),
            other => Err(format!(
                "unknown protocol {other:?}, expected OpenFlow10 | OpenFlow13 | OpenFlow14"
            )),
        }
    }
}

/// The emulation runtime's consumed interface.
pub trait Runtime {
    fn create_switch(&mut self, name: &str);
    fn create_host(&mut self, name: &str);
    fn create_link(&mut self, a: &str, b: &str);
    fn attach_controller(&mut self, endpoint: &ControllerEndpoint);

    /// Bring controller attachment and data-plane elements up. A dead
    /// control endpoint surfaces [`TopoError::ControllerUnavailable`].
    fn start(&mut self) -> Result<(), TopoError>;

    fn apply_protocol_version(&mut self, switch: &str, version: ProtocolVersion);

    /// Bounded-timeout reachability probe between two named hosts.
    fn probe_reachability(&mut self, a: &str, b: &str) -> bool;

    fn stop(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Built,
    Started,
    Stopped,
}

/// A live instantiation of a graph inside the runtime, with the controller
/// attached. Owned by the orchestrator for the run's duration; `stop` is
/// idempotent and also runs on drop, so teardown happens exactly once even
/// when the run unwinds.
pub struct Session<R: Runtime> {
    runtime: R,
    hosts: Vec<String>,
    switches: Vec<String>,
    links: usize,
    phase: Phase,
}

impl<R: Runtime> Session<R> {
    /// Instantiate the runtime's model from the graph and attach the
    /// controller. Starts nothing.
    pub fn build(mut runtime: R, graph: Graph, controller: &ControllerEndpoint) -> Self {
        let mut hosts = Vec::new();
        let mut switches = Vec::new();
        for (_, node) in graph.nodes() {
            match node.kind {
                NodeKind::Switch => {
                    runtime.create_switch(&node.name);
                    switches.push(node.name.clone());
                }
                NodeKind::Host => {
                    runtime.create_host(&node.name);
                    hosts.push(node.name.clone());
                }
            }
        }
        for &(a, b) in graph.edges() {
            runtime.create_link(&graph.node(a).name, &graph.node(b).name);
        }
        info!(%controller, "attaching remote controller");
        runtime.attach_controller(controller);

        Self {
            runtime,
            hosts,
            switches,
            links: graph.edges().len(),
            phase: Phase::Built,
        }
    }

    /// Controller first, then data plane; switches cannot establish their
    /// control channel against a dead endpoint.
    pub fn start(&mut self) -> Result<(), TopoError> {
        assert!(self.phase == Phase::Built, "start on a {:?} session", self.phase);
        info!("starting controller and switches");
        self.runtime.start()?;
        self.phase = Phase::Started;
        Ok(())
    }

    /// Apply one protocol version to every switch. Only valid after
    /// `start`; bridge objects do not exist beforehand.
    pub fn configure_protocol(&mut self, version: ProtocolVersion) {
        assert!(
            self.phase == Phase::Started,
            "configure_protocol on a {:?} session",
            self.phase
        );
        info!(%version, switches = self.switches.len(), "configuring switch protocol");
        for switch in &self.switches {
            self.runtime.apply_protocol_version(switch, version);
        }
    }

    pub fn probe(&mut self, a: &str, b: &str) -> bool {
        self.runtime.probe_reachability(a, b)
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn link_count(&self) -> usize {
        self.links
    }

    /// Tear down in reverse order. Idempotent; later calls are no-ops.
    pub fn stop(&mut self) {
        if self.phase != Phase::Stopped {
            info!("stopping the network");
            self.runtime.stop();
            self.phase = Phase::Stopped;
        }
    }
}

impl<R: Runtime> Drop for Session<R> {
    fn drop(&mut self) {
        self.stop();
    }
}
