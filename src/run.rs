//! Run orchestration: build, start, verify, hand off, tear down.

use tracing::info;

use crate::error::TopoError;
use crate::session::{ControllerEndpoint, ProtocolVersion, Runtime, Session};
use crate::topo::{self, TopoDescriptor};
use crate::verify::{self, ProbeOutcome};

/// Interactive handoff seam. The shell is the only point in a run allowed to
/// block indefinitely; leaving it is exclusively operator-driven.
pub trait Shell<R: Runtime> {
    fn interact(&mut self, session: &mut Session<R>);
}

/// No-op handoff for unattended runs.
pub struct NoShell;

impl<R: Runtime> Shell<R> for NoShell {
    fn interact(&mut self, _session: &mut Session<R>) {}
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub descriptor: TopoDescriptor,
    pub controller: ControllerEndpoint,
    pub protocol: ProtocolVersion,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub switches: usize,
    pub hosts: usize,
    pub links: usize,
    pub probes: Vec<ProbeOutcome>,
}

impl RunReport {
    pub fn failed_probes(&self) -> usize {
        self.probes.iter().filter(|p| !p.ok).count()
    }
}

/// Sequence one full run. Descriptor and construction errors abort before
/// any runtime resource exists; once the session is built, `stop` runs on
/// every exit path, verification and shell failures included.
pub fn run<R: Runtime, S: Shell<R>>(
    options: &RunOptions,
    runtime: R,
    shell: &mut S,
) -> Result<RunReport, TopoError> {
    let graph = topo::build(&options.descriptor)?;
    info!(
        family = %options.descriptor.family(),
        switches = graph.switch_count(),
        hosts = graph.host_count(),
        links = graph.edges().len(),
        "creating topology"
    );

    let mut session = Session::build(runtime, graph, &options.controller);
    let outcome = drive(&mut session, options, shell);
    session.stop();
    outcome
}

fn drive<R: Runtime, S: Shell<R>>(
    session: &mut Session<R>,
    options: &RunOptions,
    shell: &mut S,
) -> Result<RunReport, TopoError> {
    session.start()?;
    session.configure_protocol(options.protocol);

    let hosts = session.hosts().to_vec();
    let plan = verify::plan(&options.descriptor, &hosts)?;
    let probes = verify::run(session, &plan);
    info!(
        ok = probes.iter().filter(|p| p.ok).count(),
        total = probes.len(),
        "connectivity verified"
    );

    shell.interact(session);

    Ok(RunReport {
        switches: session.switch_count(),
        hosts: session.host_count(),
        links: session.link_count(),
        probes,
    })
}
