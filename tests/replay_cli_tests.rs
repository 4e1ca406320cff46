// Replay statistics: end-to-end tests of the `evalstats replay` subcommand

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Ten deterministic trials, replay times 100..=180 step 10 plus one 200
fn write_deterministic_results(dir: &TempDir) -> PathBuf {
    let mut content = String::new();
    for i in 0..9 {
        content.push_str(&format!(
            "{{\"sra_score\": 1.0, \"replay_time_ms\": {}, \"im_hash\": \"abc123\"}}\n",
            100 + 10 * i
        ));
    }
    content.push_str("{\"sra_score\": 1.0, \"replay_time_ms\": 200, \"im_hash\": \"abc123\"}\n");

    let path = dir.path().join("results.jsonl");
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Text report
// ============================================================================

#[test]
fn test_replay_text_report_validates_h3() {
    let tmp_dir = TempDir::new().unwrap();
    let results = write_deterministic_results(&tmp_dir);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("evalstats");
    cmd.arg("replay").arg(&results);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Replay Experiment Statistics (H3)"))
        .stdout(predicate::str::contains("Trials: 10"))
        .stdout(predicate::str::contains("Mean:       1.0000"))
        .stdout(predicate::str::contains("95% CI:     [1.0000, 1.0000]"))
        .stdout(predicate::str::contains("Median Time: 145 ms"))
        .stdout(predicate::str::contains("P95 Time:    209 ms"))
        .stdout(predicate::str::contains("Unique Hashes: 1 (expected: 1)"))
        .stdout(predicate::str::contains("H3 VALIDATED"))
        .stdout(predicate::str::contains("Statistics saved to:"));
}

#[test]
fn test_replay_divergent_hashes_not_validated() {
    let tmp_dir = TempDir::new().unwrap();
    let results = tmp_dir.path().join("results.jsonl");
    fs::write(
        &results,
        concat!(
            "{\"sra_score\": 1.0, \"replay_time_ms\": 100, \"im_hash\": \"abc\"}\n",
            "{\"sra_score\": 1.0, \"replay_time_ms\": 110, \"im_hash\": \"def\"}\n",
        ),
    )
    .unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("evalstats");
    cmd.arg("replay").arg(&results).arg("--no-save");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Unique Hashes: 2 (expected: 1)"))
        .stdout(predicate::str::contains("Deterministic: ❌ NO"))
        .stdout(predicate::str::contains("H3 NOT VALIDATED"))
        .stdout(predicate::str::contains("Statistics saved to:").not());

    assert!(!tmp_dir.path().join("replay_statistics.json").exists());
}

// ============================================================================
// Persisted JSON
// ============================================================================

#[test]
fn test_replay_saves_statistics_next_to_input() {
    let tmp_dir = TempDir::new().unwrap();
    let results = write_deterministic_results(&tmp_dir);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("evalstats");
    cmd.arg("replay").arg(&results);
    cmd.assert().success();

    let saved = fs::read_to_string(tmp_dir.path().join("replay_statistics.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();

    assert_eq!(json["hypothesis"], "H3: Replayability & Determinism");
    assert_eq!(json["trials"], 10);
    assert_eq!(json["sra"]["mean"], 1.0);
    assert_eq!(json["replay_time_ms"]["median"], 145);
    assert_eq!(json["replay_time_ms"]["p95"], 209);
    assert_eq!(json["hash_analysis"]["unique_hashes"], 1);
    assert_eq!(json["hash_analysis"]["is_deterministic"], true);
    assert_eq!(json["conclusion"]["hypothesis_supported"], true);
}

#[test]
fn test_replay_json_format_on_stdout() {
    let tmp_dir = TempDir::new().unwrap();
    let results = write_deterministic_results(&tmp_dir);
    let output = tmp_dir.path().join("custom.json");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("evalstats");
    cmd.arg("replay")
        .arg(&results)
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&output);

    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["trials"], 10);

    assert!(output.exists());
    assert!(!tmp_dir.path().join("replay_statistics.json").exists());
}

#[test]
fn test_replay_config_sentinel_and_output_name() {
    let tmp_dir = TempDir::new().unwrap();
    let results = tmp_dir.path().join("results.jsonl");
    fs::write(
        &results,
        concat!(
            "{\"sra_score\": 1.0, \"replay_time_ms\": 100, \"im_hash\": \"abc\"}\n",
            "{\"sra_score\": 1.0, \"replay_time_ms\": 110, \"im_hash\": null}\n",
            "{\"sra_score\": 1.0, \"replay_time_ms\": 120, \"im_hash\": \"n/a\"}\n",
        ),
    )
    .unwrap();
    let config = tmp_dir.path().join("replay.toml");
    fs::write(
        &config,
        "unknown_hash = \"n/a\"\noutput_file_name = \"h3_stats.json\"\n",
    )
    .unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("evalstats");
    cmd.arg("replay").arg(&results).arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Unique Hashes: 1 (expected: 1)"))
        .stdout(predicate::str::contains("H3 VALIDATED"));

    assert!(tmp_dir.path().join("h3_stats.json").exists());
    assert!(!tmp_dir.path().join("replay_statistics.json").exists());
}

#[test]
fn test_replay_invalid_config_fails() {
    let tmp_dir = TempDir::new().unwrap();
    let results = write_deterministic_results(&tmp_dir);
    let config = tmp_dir.path().join("replay.toml");
    fs::write(&config, "percentile = 100\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("evalstats");
    cmd.arg("replay").arg(&results).arg("--config").arg(&config);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("percentile must be in 1..=99"));
}

// ============================================================================
// Input errors
// ============================================================================

#[test]
fn test_replay_missing_file_fails() {
    let tmp_dir = TempDir::new().unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("evalstats");
    cmd.arg("replay").arg(tmp_dir.path().join("missing.jsonl"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("File not found"))
        .stderr(predicate::str::contains("missing.jsonl"));
}

#[test]
fn test_replay_empty_file_fails() {
    let tmp_dir = TempDir::new().unwrap();
    let results = tmp_dir.path().join("results.jsonl");
    fs::write(&results, "\n\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("evalstats");
    cmd.arg("replay").arg(&results);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No results to analyze"));
}

#[test]
fn test_replay_malformed_line_fails() {
    let tmp_dir = TempDir::new().unwrap();
    let results = tmp_dir.path().join("results.jsonl");
    fs::write(
        &results,
        "{\"sra_score\": 1.0, \"replay_time_ms\": 100, \"im_hash\": \"abc\"}\nnot json\n",
    )
    .unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("evalstats");
    cmd.arg("replay").arg(&results);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}
