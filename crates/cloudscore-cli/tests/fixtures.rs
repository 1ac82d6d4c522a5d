//! End-to-end CLI tests over `tests/fixtures`.
//!
//! Each fixture contains `catalog.json`, `assets.json`, `cloudscore.toml` and an
//! `expected.report.json` whose timestamps and tool version use placeholders.

use assert_cmd::Command;
use cloudscore_test_util::{fixtures_dir, normalize_nondeterministic};
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn cloudscore_cmd() -> Command {
    Command::cargo_bin("cloudscore").expect("cloudscore binary not found - run `cargo build` first")
}

fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Run `assess` against a fixture; returns the exit code and the written report.
fn assess_fixture(name: &str, extra: &[&str]) -> (i32, Value) {
    let dir = fixture(name);
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");

    let output = cloudscore_cmd()
        .arg("--config")
        .arg(dir.join("cloudscore.toml"))
        .args(extra)
        .arg("assess")
        .arg("--catalog")
        .arg(dir.join("catalog.json"))
        .arg("--assets")
        .arg(dir.join("assets.json"))
        .arg("--report-out")
        .arg(&report_path)
        .output()
        .expect("run cloudscore");

    let exit_code = output.status.code().unwrap_or(-1);
    let report_text = std::fs::read_to_string(&report_path).expect("read report");
    let report: Value = serde_json::from_str(&report_text).expect("parse report json");
    (exit_code, report)
}

fn load_expected_report(name: &str) -> Value {
    let text = std::fs::read_to_string(fixture(name).join("expected.report.json"))
        .expect("read expected report");
    serde_json::from_str(&text).expect("parse expected report")
}

fn assert_reports_match(actual: Value, name: &str) {
    let actual = normalize_nondeterministic(actual);
    let expected = normalize_nondeterministic(load_expected_report(name));
    assert_eq!(
        actual,
        expected,
        "Report mismatch for fixture '{}'.\n\nActual:\n{}",
        name,
        serde_json::to_string_pretty(&actual).unwrap()
    );
}

#[test]
fn fixture_mixed_matches_expected_report() {
    let (exit_code, report) = assess_fixture("mixed", &[]);
    assert_eq!(exit_code, 0);
    assert_reports_match(report, "mixed");
}

#[test]
fn fixture_floored_clamps_score() {
    let (exit_code, report) = assess_fixture("floored", &[]);
    assert_eq!(exit_code, 0);
    assert_eq!(report["assets"][0]["score"], 0);
    assert_reports_match(report, "floored");
}

#[test]
fn fixture_legacy_catalog_matches_expected_report() {
    let (exit_code, report) = assess_fixture("legacy_catalog", &[]);
    assert_eq!(exit_code, 0);
    assert_reports_match(report, "legacy_catalog");
}

#[test]
fn parallel_workers_produce_the_same_report() {
    let (_, sequential) = assess_fixture("mixed", &[]);
    let (_, parallel) = assess_fixture("mixed", &["--workers", "3"]);
    assert_eq!(
        normalize_nondeterministic(sequential),
        normalize_nondeterministic(parallel)
    );
}

#[test]
fn baseline_override_and_negative_scores() {
    let (_, report) = assess_fixture("floored", &["--profile", "default"]);
    assert_eq!(report["data"]["profile"], "default");
    assert!(report["data"].get("score_floor").is_none());
    assert_eq!(report["assets"][0]["score"], -20);

    let (_, report) = assess_fixture("mixed", &["--baseline", "50"]);
    assert_eq!(report["data"]["baseline"], 50);
    assert_eq!(report["assets"][0]["score"], 45);
}

#[test]
fn fail_below_exits_two() {
    let dir = fixture("mixed");
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("out").join("report.json");

    cloudscore_cmd()
        .arg("--config")
        .arg(dir.join("cloudscore.toml"))
        .arg("assess")
        .arg("--catalog")
        .arg(dir.join("catalog.json"))
        .arg("--assets")
        .arg(dir.join("assets.json"))
        .arg("--report-out")
        .arg(&report_path)
        .arg("--fail-below")
        .arg("106")
        .assert()
        .code(2);

    assert!(report_path.exists(), "report is written even when failing");
}

#[test]
fn invalid_catalog_is_a_runtime_error() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let catalog = temp_dir.path().join("catalog.json");
    std::fs::write(
        &catalog,
        r#"{"controls": [{"id": "a", "criteria": []}, {"id": "a", "criteria": []}]}"#,
    )
    .expect("write catalog");

    cloudscore_cmd()
        .arg("--config")
        .arg(temp_dir.path().join("missing.toml"))
        .arg("assess")
        .arg("--catalog")
        .arg(&catalog)
        .arg("--assets")
        .arg(fixture("mixed").join("assets.json"))
        .arg("--report-out")
        .arg(temp_dir.path().join("report.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("duplicate control id: a"));
}

#[test]
fn markdown_and_text_render_from_report() {
    let dir = fixture("mixed");
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");
    let md_path = temp_dir.path().join("report.md");

    cloudscore_cmd()
        .arg("--config")
        .arg(dir.join("cloudscore.toml"))
        .arg("assess")
        .arg("--catalog")
        .arg(dir.join("catalog.json"))
        .arg("--assets")
        .arg(dir.join("assets.json"))
        .arg("--report-out")
        .arg(&report_path)
        .arg("--write-markdown")
        .arg("--markdown-out")
        .arg(&md_path)
        .assert()
        .success();

    let md = std::fs::read_to_string(&md_path).expect("read markdown");
    assert!(md.contains("| root | aws | identity | 105 |"));
    assert!(md.contains("### 03.13.11"));

    cloudscore_cmd()
        .arg("text")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Compliance Report\n\n"))
        .stdout(predicate::str::contains("Asset: i-0abc123\nScore: 107\n"));

    cloudscore_cmd()
        .arg("md")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Baseline: **110**"));

    cloudscore_cmd()
        .arg("annotations")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "::error title=aws/root::[03.01.01:CheckRootMFA]",
        ));
}

#[test]
fn checks_lists_catalog_coverage() {
    let dir = fixture("mixed");
    cloudscore_cmd()
        .arg("--config")
        .arg(dir.join("cloudscore.toml"))
        .arg("checks")
        .arg("--catalog")
        .arg(dir.join("catalog.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("CheckBucketEncryption\tregistered\t1"))
        .stdout(predicate::str::contains("CheckFlowLogs\tmissing\t1"))
        .stdout(predicate::str::contains("TBI\tmarker\t1"));
}
