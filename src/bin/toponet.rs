use std::io::{self, BufRead, Write};

use clap::Parser;
use toponet_rs::error::TopoError;
use toponet_rs::run::{self, NoShell, RunOptions, RunReport, Shell};
use toponet_rs::session::{ControllerEndpoint, ProtocolVersion, Session, SimRuntime};
use toponet_rs::topo::{self, Family, TopoDescriptor};
use toponet_rs::verify;

#[derive(Debug, Parser)]
#[command(
    name = "toponet",
    about = "Provision an emulated SDN topology and verify host reachability"
)]
struct Args {
    /// Topology family: star | chain | tree
    #[arg(long)]
    family: Family,

    /// Host count for the star family
    #[arg(long, default_value_t = 13)]
    hosts: i64,

    /// Switch/host pair count for the chain family
    #[arg(long, default_value_t = 10)]
    length: i64,

    /// Switch-tree depth for the tree family
    #[arg(long, default_value_t = 4)]
    depth: i64,

    /// Switch-tree fanout for the tree family
    #[arg(long, default_value_t = 5)]
    fanout: i64,

    /// Remote controller endpoint switches attach to
    #[arg(long, default_value = "127.0.0.1:6653")]
    controller: ControllerEndpoint,

    /// Control-protocol version applied to every switch after start
    #[arg(long, default_value = "OpenFlow13")]
    protocol: ProtocolVersion,

    /// Dial the controller endpoint at start and fail if it refuses
    #[arg(long)]
    check_controller: bool,

    /// Print the built graph and verification plan as JSON, touch no runtime
    #[arg(long)]
    plan_only: bool,

    /// Drop into an interactive prompt after verification
    #[arg(long)]
    cli: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(err) = run_cli(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run_cli(args: Args) -> Result<(), TopoError> {
    let descriptor = match args.family {
        Family::Star => TopoDescriptor::star(args.hosts)?,
        Family::Chain => TopoDescriptor::chain(args.length)?,
        Family::Tree => TopoDescriptor::tree(args.depth, args.fanout)?,
    };

    if args.plan_only {
        return print_plan(&descriptor, &args.controller);
    }

    let options = RunOptions {
        descriptor,
        controller: args.controller,
        protocol: args.protocol,
    };
    let runtime = if args.check_controller {
        SimRuntime::with_controller_check()
    } else {
        SimRuntime::new()
    };

    let report = if args.cli {
        run::run(&options, runtime, &mut StdinShell)
    } else {
        run::run(&options, runtime, &mut NoShell)
    }?;
    print_report(&report);
    Ok(())
}

fn print_plan(descriptor: &TopoDescriptor, controller: &ControllerEndpoint) -> Result<(), TopoError> {
    let graph = topo::build(descriptor)?;
    let plan = verify::plan(descriptor, &graph.host_names())?;
    let doc = serde_json::json!({
        "descriptor": descriptor,
        "controller": controller,
        "switches": graph.switch_count(),
        "hosts": graph.host_count(),
        "links": graph.edges().len(),
        "nodes": graph.nodes().map(|(_, node)| node).collect::<Vec<_>>(),
        "edges": graph
            .edges()
            .iter()
            .map(|&(a, b)| [graph.node(a).name.as_str(), graph.node(b).name.as_str()])
            .collect::<Vec<_>>(),
        "plan": plan,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&doc).expect("serialize plan")
    );
    Ok(())
}

fn print_report(report: &RunReport) {
    for probe in &report.probes {
        println!(
            "probe {} -> {}: {}",
            probe.src,
            probe.dst,
            if probe.ok { "ok" } else { "FAIL" }
        );
    }
    println!(
        "verified {}/{} pairs reachable ({} switches, {} hosts, {} links)",
        report.probes.len() - report.failed_probes(),
        report.probes.len(),
        report.switches,
        report.hosts,
        report.links
    );
}

/// Minimal post-verification prompt, in place of the full emulator CLI.
struct StdinShell;

impl Shell<SimRuntime> for StdinShell {
    fn interact(&mut self, session: &mut Session<SimRuntime>) {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("toponet> ");
            let _ = io::stdout().flush();
            let Some(Ok(line)) = lines.next() else {
                break;
            };
            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                [] => {}
                ["exit"] | ["quit"] => break,
                ["hosts"] => println!("{}", session.hosts().join(" ")),
                ["ping", a, b] => {
                    let ok = session.probe(a, b);
                    println!("{a} -> {b}: {}", if ok { "ok" } else { "unreachable" });
                }
                _ => println!("commands: hosts | ping <a> <b> | exit"),
            }
        }
    }
}
