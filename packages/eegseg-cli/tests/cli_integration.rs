use assert_cmd::Command;
use eegseg_rs::writers::{MatArray, MatWriter};
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn eegseg() -> Command {
    let mut cmd = Command::cargo_bin("eegseg").unwrap();
    cmd.env_remove("EEGSEG_BASE_DIR").env_remove("EEGSEG_CONFIG");
    cmd
}

/// Write a single-file EEGLAB dataset: `channels` × `samples` µV at `srate` Hz.
fn write_set(path: &Path, srate: f64, channels: usize, samples: usize) {
    let data = (0..channels * samples).map(|i| i as f64 * 0.5).collect();
    MatWriter::new()
        .write_file(
            path,
            &[
                MatArray::scalar("srate", srate),
                MatArray::scalar("nbchan", channels as f64),
                MatArray::scalar("pnts", samples as f64),
                MatArray {
                    name: "data".to_string(),
                    dims: vec![channels, samples],
                    data,
                },
            ],
        )
        .unwrap();
}

fn make_subject(base: &Path, subject: &str) {
    let input = base.join(subject).join("re");
    fs::create_dir_all(&input).unwrap();
    write_set(&input.join("re1.set"), 50.0, 2, 450);
    write_set(&input.join("re2.set"), 50.0, 2, 250);
}

// =============================================================================
// GENERAL
// =============================================================================

#[test]
fn test_no_args_shows_help() {
    eegseg()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    eegseg()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("eegseg"));
}

#[test]
fn test_help_lists_subcommands() {
    eegseg()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("segment"))
        .stdout(predicate::str::contains("rename"))
        .stdout(predicate::str::contains("inspect"));
}

// =============================================================================
// SEGMENT SUBCOMMAND
// =============================================================================

#[test]
fn test_segment_requires_subjects() {
    let tmp = tempfile::tempdir().unwrap();
    eegseg()
        .arg("segment")
        .arg("--base-dir")
        .arg(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No subjects"));
}

#[test]
fn test_segment_writes_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    make_subject(tmp.path(), "LY");

    let output = eegseg()
        .arg("segment")
        .arg("--base-dir")
        .arg(tmp.path())
        .arg("--subjects")
        .arg("LY")
        .arg("--max-samples")
        .arg("400")
        .arg("--json")
        .arg("--quiet")
        .assert()
        .success()
        .code(0);

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let subject = &parsed.as_array().unwrap()[0];
    assert_eq!(subject["subject"], "LY");
    let exported = subject["exported"].as_array().unwrap();
    assert_eq!(exported.len(), 2);
    // 50 Hz × 2 s = 100 samples; re1 truncated to 400 -> 4, re2 has 250 -> 2
    assert_eq!(exported[0]["num_segments"], 4);
    assert_eq!(exported[1]["num_segments"], 2);

    let subject_dir = tmp.path().join("LY");
    assert!(subject_dir.join("re_mat/re1_1000.mat").is_file());
    assert!(subject_dir.join("file5/1/4.csv").is_file());
    assert!(subject_dir.join("file5/2/2.csv").is_file());

    let first = fs::read_to_string(subject_dir.join("file5/1/1.csv")).unwrap();
    let first_row = first.lines().next().unwrap();
    assert_eq!(first_row.split(',').count(), 100);
    assert!(first_row.starts_with("0.0000,1.0000,2.0000"));
}

#[test]
fn test_segment_reports_existing_folder() {
    let tmp = tempfile::tempdir().unwrap();
    make_subject(tmp.path(), "LY");
    fs::create_dir_all(tmp.path().join("LY/file5/2")).unwrap();

    eegseg()
        .arg("segment")
        .arg("--base-dir")
        .arg(tmp.path())
        .arg("--subjects")
        .arg("LY")
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping CSV export"))
        .stderr(predicate::str::contains("1 CSV folder(s) left untouched"));

    assert!(!tmp.path().join("LY/file5/2/1.csv").exists());
    assert!(tmp.path().join("LY/re_mat/re2_1000.mat").is_file());
}

#[test]
fn test_segment_partial_failure_with_continue() {
    let tmp = tempfile::tempdir().unwrap();
    make_subject(tmp.path(), "LY");
    let report_path = tmp.path().join("report.json");

    eegseg()
        .arg("segment")
        .arg("--base-dir")
        .arg(tmp.path())
        .arg("--subjects")
        .arg("MISSING")
        .arg("LY")
        .arg("--continue-on-error")
        .arg("--output")
        .arg(&report_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Folder not found"));

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert!(tmp.path().join("LY/file5/1/1.csv").is_file());
}

#[test]
fn test_segment_stops_at_first_failure() {
    let tmp = tempfile::tempdir().unwrap();
    make_subject(tmp.path(), "LY");

    eegseg()
        .arg("segment")
        .arg("--base-dir")
        .arg(tmp.path())
        .arg("--subjects")
        .arg("MISSING")
        .arg("LY")
        .assert()
        .code(3);

    assert!(!tmp.path().join("LY/re_mat").exists());
}

#[test]
fn test_segment_with_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    make_subject(tmp.path(), "WL");
    let config_path = tmp.path().join("eegseg.json");
    fs::write(
        &config_path,
        format!(
            r#"{{"base_dir": {:?}, "subjects": ["WL"], "mat_tag": "seg", "layout": {{"csv_dir": "csv"}}}}"#,
            tmp.path().to_str().unwrap()
        ),
    )
    .unwrap();

    eegseg()
        .arg("segment")
        .arg("--config")
        .arg(&config_path)
        .arg("--quiet")
        .assert()
        .success();

    assert!(tmp.path().join("WL/re_mat/re1_seg.mat").is_file());
    assert!(tmp.path().join("WL/csv/1/1.csv").is_file());
}

// =============================================================================
// RENAME SUBCOMMAND
// =============================================================================

#[test]
fn test_rename_folder() {
    let tmp = tempfile::tempdir().unwrap();
    for name in ["Acquisition 7.dat", "Acquisition 2.dat", "Acquisition 9.rs3"] {
        fs::write(tmp.path().join(name), "").unwrap();
    }

    eegseg()
        .arg("rename")
        .arg("--folder")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed: Acquisition 2.dat -> 1.dat"))
        .stdout(predicate::str::contains("Renamed: Acquisition 7.dat -> 2.dat"))
        .stdout(predicate::str::contains("Renamed: Acquisition 9.rs3 -> 3.rs3"));

    assert!(tmp.path().join("1.dat").exists());
    assert!(tmp.path().join("2.dat").exists());
    assert!(tmp.path().join("3.rs3").exists());
}

#[test]
fn test_rename_dry_run_json() {
    let tmp = tempfile::tempdir().unwrap();
    let eeg_dir = tmp.path().join("LY").join("EEG");
    fs::create_dir_all(&eeg_dir).unwrap();
    for name in ["Acquisition 4.dap", "Acquisition 4.dat", "1.dap"] {
        fs::write(eeg_dir.join(name), "").unwrap();
    }

    let output = eegseg()
        .arg("rename")
        .arg("--base-dir")
        .arg(tmp.path())
        .arg("--subjects")
        .arg("LY")
        .arg("--dry-run")
        .arg("--json")
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let report = &parsed.as_array().unwrap()[0];
    assert_eq!(report["groups"], 1);
    assert_eq!(report["renamed"].as_array().unwrap().len(), 1);
    assert_eq!(report["skipped"][0]["to"], "1.dap");

    assert!(eeg_dir.join("Acquisition 4.dat").exists());
    assert!(!eeg_dir.join("1.dat").exists());
}

#[test]
fn test_rename_missing_folder() {
    eegseg()
        .arg("rename")
        .arg("--folder")
        .arg("/nonexistent_dir_12345")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Folder not found"));
}

// =============================================================================
// INSPECT / CONFIG SUBCOMMANDS
// =============================================================================

#[test]
fn test_inspect_json() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("re1.set");
    write_set(&path, 250.0, 3, 500);

    let output = eegseg()
        .arg("inspect")
        .arg("--file")
        .arg(&path)
        .arg("--json")
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["format"], "EEGLAB");
    assert_eq!(parsed["sample_rate"], 250.0);
    assert_eq!(parsed["num_channels"], 3);
    assert_eq!(parsed["num_samples"], 500);
}

#[test]
fn test_inspect_unsupported_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("recording.edf");
    fs::write(&path, "").unwrap();

    eegseg()
        .arg("inspect")
        .arg("--file")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported"));
}

#[test]
fn test_config_shows_defaults() {
    let output = eegseg()
        .arg("config")
        .arg("--subjects")
        .arg("LY")
        .arg("LZ")
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["subjects"], serde_json::json!(["LY", "LZ"]));
    assert_eq!(parsed["segment"]["segment_seconds"], 2.0);
    assert_eq!(parsed["segment"]["max_samples"], 90000);
    assert_eq!(parsed["layout"]["input_dir"], "re");
    assert_eq!(parsed["mat_tag"], "1000");
}
