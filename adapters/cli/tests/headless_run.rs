use std::process::Command;

fn headless(args: &[&str]) -> serde_json::Value {
    let output = Command::new(env!("CARGO_BIN_EXE_snake-arena"))
        .arg("--headless")
        .args(args)
        .output()
        .expect("failed to launch snake-arena");

    assert!(
        output.status.success(),
        "snake-arena exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should hold a JSON summary")
}

#[test]
fn default_heading_runs_into_the_top_border() {
    let summary = headless(&[]);

    assert_eq!(summary["ended"], true);
    assert_eq!(summary["end_cause"], "OutOfBounds");
    assert_eq!(summary["heading"], "North");
    assert_eq!(summary["ticks"], 81);
}

#[test]
fn tick_limit_and_seed_are_honoured() {
    let summary = headless(&["--seed", "11", "--ticks", "20", "--heading", "east"]);

    assert_eq!(summary["seed"], 11);
    assert_eq!(summary["ticks"], 20);
    assert_eq!(summary["ended"], false);
    assert_eq!(summary["tiles_crossed"], 1);
}
