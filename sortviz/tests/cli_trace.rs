//! CLI tests for the `sortviz` binary.
//!
//! Spawns the binary and checks exit codes and output for trace, run, and
//! invalid input.

use std::fs;
use std::process::Command;

use serde_json::Value;
use sortviz::exit_codes;
use sortviz::io::config::{PacingConfig, VisualizerConfig, write_config};

#[test]
fn trace_prints_merge_steps_as_json() {
    let output = Command::new(env!("CARGO_BIN_EXE_sortviz"))
        .args(["trace", "mergeSort", "--values", "3,1"])
        .output()
        .expect("sortviz trace");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let run: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(run["algorithm"], "mergeSort");
    assert_eq!(run["output"], serde_json::json!([1, 3]));
    let kinds: Vec<&str> = run["steps"]
        .as_array()
        .expect("steps")
        .iter()
        .map(|step| step["kind"].as_str().expect("kind"))
        .collect();
    assert_eq!(kinds, vec!["compare", "overwrite", "overwrite"]);
    assert_eq!(run["steps"][0]["label"], "3 <= 1");
    assert_eq!(run["steps"][0]["held"], true);
}

#[test]
fn unknown_algorithm_exits_invalid() {
    let output = Command::new(env!("CARGO_BIN_EXE_sortviz"))
        .args(["trace", "bogoSort", "--values", "1,2"])
        .output()
        .expect("sortviz trace");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown algorithm 'bogoSort'"));
}

#[test]
fn run_plays_to_completion_with_instant_pacing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config_path = temp.path().join("sortviz.toml");
    write_config(
        &config_path,
        &VisualizerConfig {
            element_count: 5,
            seed: Some(9),
            pacing: PacingConfig {
                compare_delay_ms: 0,
                swap_settle_delay_ms: 0,
                swap_frame_delay_ms: 0,
                insert_settle_delay_ms: 0,
                overwrite_delay_ms: 0,
                ..PacingConfig::default()
            },
        },
    )
    .expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_sortviz"))
        .current_dir(temp.path())
        .args(["run", "insertionSort"])
        .output()
        .expect("sortviz run");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let last = stdout.lines().last().expect("frames");
    assert!(last.ends_with("| Sorting completed"), "{last}");
    assert!(fs::metadata(&config_path).is_ok());
}

#[test]
fn list_prints_identifiers() {
    let output = Command::new(env!("CARGO_BIN_EXE_sortviz"))
        .arg("list")
        .output()
        .expect("sortviz list");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "bubbleSort",
            "selectionSort",
            "insertionSort",
            "quickSort",
            "mergeSort"
        ]
    );
}

#[test]
fn init_writes_defaults_once() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config_path = temp.path().join("sortviz.toml");

    let first = Command::new(env!("CARGO_BIN_EXE_sortviz"))
        .current_dir(temp.path())
        .arg("init")
        .output()
        .expect("sortviz init");
    assert_eq!(first.status.code(), Some(exit_codes::OK));
    assert_eq!(
        sortviz::io::config::load_config(&config_path).expect("load"),
        VisualizerConfig::default()
    );

    let second = Command::new(env!("CARGO_BIN_EXE_sortviz"))
        .current_dir(temp.path())
        .arg("init")
        .output()
        .expect("sortviz init");
    assert_eq!(second.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&second.stderr).contains("already exists"));
}
