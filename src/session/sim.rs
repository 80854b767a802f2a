//! In-process runtime used when no real emulation backend is wired in.
//!
//! Answers reachability probes by walking the instantiated link model, and
//! can optionally dial the controller endpoint for real before reporting the
//! network as started.

use std::collections::{HashMap, HashSet, VecDeque};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, warn};

use super::{ControllerEndpoint, ProtocolVersion, Runtime};
use crate::error::TopoError;

const CONTROLLER_DIAL_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
pub struct SimRuntime {
    hosts: HashSet<String>,
    adjacency: HashMap<String, Vec<String>>,
    controller: Option<ControllerEndpoint>,
    check_controller: bool,
    started: bool,
}

impl SimRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dial the controller endpoint at `start` and fail with
    /// `ControllerUnavailable` when it refuses.
    pub fn with_controller_check() -> Self {
        Self {
            check_controller: true,
            ..Self::default()
        }
    }
}

impl Runtime for SimRuntime {
    fn create_switch(&mut self, name: &str) {
        self.adjacency.entry(name.to_string()).or_default();
    }

    fn create_host(&mut self, name: &str) {
        self.hosts.insert(name.to_string());
        self.adjacency.entry(name.to_string()).or_default();
    }

    fn create_link(&mut self, a: &str, b: &str) {
        self.adjacency
            .entry(a.to_string())
            .or_default()
            .push(b.to_string());
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .push(a.to_string());
    }

    fn attach_controller(&mut self, endpoint: &ControllerEndpoint) {
        self.controller = Some(endpoint.clone());
    }

    fn start(&mut self) -> Result<(), TopoError> {
        if self.check_controller {
            let endpoint = self.controller.clone().unwrap_or_default();
            dial(&endpoint)?;
        }
        self.started = true;
        Ok(())
    }

    fn apply_protocol_version(&mut self, switch: &str, version: ProtocolVersion) {
        debug!(switch, %version, "set bridge protocol");
    }

    fn probe_reachability(&mut self, a: &str, b: &str) -> bool {
        if !self.started || !self.hosts.contains(a) || !self.hosts.contains(b) {
            return false;
        }
        reachable(&self.adjacency, a, b)
    }

    fn stop(&mut self) {
        self.started = false;
    }
}

fn dial(endpoint: &ControllerEndpoint) -> Result<(), TopoError> {
    let unavailable = || TopoError::ControllerUnavailable {
        endpoint: endpoint.to_string(),
    };
    let addrs = (endpoint.host.as_str(), endpoint.port)
        .to_socket_addrs()
        .map_err(|err| {
            warn!(%endpoint, %err, "controller address did not resolve");
            unavailable()
        })?;
    for addr in addrs {
        if TcpStream::connect_timeout(&addr, CONTROLLER_DIAL_TIMEOUT).is_ok() {
            debug!(%endpoint, "controller endpoint accepted the dial");
            return Ok(());
        }
    }
    Err(unavailable())
}

fn reachable(adjacency: &HashMap<String, Vec<String>>, from: &str, to: &str) -> bool {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(from);
    queue.push_back(from);
    while let Some(node) = queue.pop_front() {
        if node == to {
            return true;
        }
        if let Some(next) = adjacency.get(node) {
            for neighbor in next {
                if seen.insert(neighbor.as_str()) {
                    queue.push_back(neighbor.as_str());
                }
            }
        }
    }
    false
}
