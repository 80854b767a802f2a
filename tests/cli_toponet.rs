use serde_json::Value;
use std::process::{Command, Output};

fn toponet(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_toponet"))
        .args(args)
        .output()
        .expect("run toponet")
}

fn plan_json(args: &[&str]) -> Value {
    let output = toponet(args);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("plan output is JSON")
}

#[test]
fn star_plan_matches_scenario_a() {
    let plan = plan_json(&["--family", "star", "--hosts", "13", "--plan-only"]);
    assert_eq!(plan["descriptor"]["family"], "star");
    assert_eq!(plan["switches"], 1);
    assert_eq!(plan["hosts"], 13);
    assert_eq!(plan["links"], 13);
    assert_eq!(plan["plan"].as_array().unwrap().len(), 78);
}

#[test]
fn chain_plan_matches_scenario_b() {
    let plan = plan_json(&["--family", "chain", "--length", "10", "--plan-only"]);
    assert_eq!(plan["switches"], 10);
    assert_eq!(plan["hosts"], 10);
    assert_eq!(plan["links"], 19);
    assert_eq!(plan["plan"].as_array().unwrap().len(), 45);
}

#[test]
fn tree_plan_matches_scenario_c() {
    let plan = plan_json(&[
        "--family", "tree", "--depth", "4", "--fanout", "5", "--plan-only",
    ]);
    assert_eq!(plan["switches"], 781);
    assert_eq!(plan["hosts"], 625);
    assert_eq!(plan["links"], 780 + 625);
    assert_eq!(plan["plan"].as_array().unwrap().len(), 3);
}

#[test]
fn defaults_follow_the_documented_surface() {
    // No explicit --hosts: star defaults to 13.
    let plan = plan_json(&["--family", "star", "--plan-only"]);
    assert_eq!(plan["hosts"], 13);
    assert_eq!(plan["controller"]["host"], "127.0.0.1");
    assert_eq!(plan["controller"]["port"], 6653);
}

#[test]
fn unknown_family_exits_non_zero_with_a_usage_message() {
    let output = toponet(&["--family", "ring", "--plan-only"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ring"), "stderr: {stderr}");
}

#[test]
fn non_positive_parameters_exit_non_zero_naming_the_input() {
    let output = toponet(&["--family", "star", "--hosts", "0", "--plan-only"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("host_count"), "stderr: {stderr}");

    let output = toponet(&["--family", "tree", "--depth=-1", "--plan-only"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("depth"), "stderr: {stderr}");
}

#[test]
fn oversized_sweep_exits_non_zero() {
    let output = toponet(&["--family", "star", "--hosts", "200", "--plan-only"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("verification scope too large"), "stderr: {stderr}");
}

#[test]
fn full_run_over_the_inprocess_runtime_verifies_every_pair() {
    let output = toponet(&["--family", "star", "--hosts", "4"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("probe h1 -> h2: ok"), "stdout: {stdout}");
    assert!(
        stdout.contains("verified 6/6 pairs reachable"),
        "stdout: {stdout}"
    );
}
