//! Integration tests for the DPT CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a dpt command
fn dpt() -> Command {
    Command::cargo_bin("dpt").unwrap()
}

/// Helper to create a test project in a temp directory
fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    dpt().current_dir(tmp.path()).arg("init").assert().success();
    tmp
}

/// Helper to drop a hand-written catalog entry into the project
fn write_catalog_entry(tmp: &TempDir, relative: &str, yaml: &str) {
    let path = tmp.path().join("catalog").join(relative);
    fs::write(path, yaml).unwrap();
}

fn mccb_yaml(id_suffix: char, rated: f64, price: f64) -> String {
    format!(
        r#"id: CAT-01ARZ3NDEKTSV4RRFFQ69G5FA{id_suffix}
brand: Siemens
order_number: 3VA2-{rated}
specs:
  category: mccb
  rated_current: {rated}
  breaking_capacity_ka: 36
prices:
  - price: {price}
    currency: EUR
    supplier: Alpha Electric
    effective_date: 2026-02-01
created: 2026-01-15T09:30:00Z
author: tester
"#
    )
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    dpt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dust Panel Toolkit"));
}

#[test]
fn test_version_displays() {
    dpt()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dpt"));
}

#[test]
fn test_unknown_command_fails() {
    dpt().arg("unknown-command").assert().failure();
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_creates_project_structure() {
    let tmp = setup_test_project();
    assert!(tmp.path().join(".dpt/config.yaml").exists());
    assert!(tmp.path().join("catalog/mccbs").is_dir());
    assert!(tmp.path().join("spec.yaml").exists());
}

#[test]
fn test_init_twice_without_force_warns() {
    let tmp = setup_test_project();
    dpt()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

// ============================================================================
// Spec Tests
// ============================================================================

#[test]
fn test_spec_check_accepts_template() {
    let tmp = setup_test_project();
    dpt()
        .current_dir(tmp.path())
        .args(["spec", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("buildable"));
}

#[test]
fn test_spec_check_fails_on_zero_voltage() {
    let tmp = setup_test_project();
    let spec = fs::read_to_string(tmp.path().join("spec.yaml")).unwrap();
    fs::write(
        tmp.path().join("spec.yaml"),
        spec.replace("l_voltage: 400", "l_voltage: 0"),
    )
    .unwrap();

    dpt()
        .current_dir(tmp.path())
        .args(["spec", "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("l_voltage"));
}

#[test]
fn test_spec_show_summarizes_sections() {
    let tmp = setup_test_project();
    dpt()
        .current_dir(tmp.path())
        .args(["spec", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bagfilter"))
        .stdout(predicate::str::contains("enabled"))
        .stdout(predicate::str::contains("disabled"));
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[test]
fn test_catalog_list_shows_entries() {
    let tmp = setup_test_project();
    write_catalog_entry(&tmp, "mccbs/mccb-63.yaml", &mccb_yaml('0', 63.0, 90.0));

    dpt()
        .current_dir(tmp.path())
        .args(["catalog", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Siemens"))
        .stdout(predicate::str::contains("3VA2-63"));
}

#[test]
fn test_catalog_list_count() {
    let tmp = setup_test_project();
    write_catalog_entry(&tmp, "mccbs/mccb-63.yaml", &mccb_yaml('0', 63.0, 90.0));
    write_catalog_entry(&tmp, "mccbs/mccb-100.yaml", &mccb_yaml('1', 100.0, 140.0));

    dpt()
        .current_dir(tmp.path())
        .args(["catalog", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));
}

#[test]
fn test_catalog_show_prints_yaml() {
    let tmp = setup_test_project();
    write_catalog_entry(&tmp, "mccbs/mccb-63.yaml", &mccb_yaml('0', 63.0, 90.0));

    dpt()
        .current_dir(tmp.path())
        .args(["catalog", "show", "mccb-63"])
        .assert()
        .success()
        .stdout(predicate::str::contains("category: mccb"));
}

// ============================================================================
// Panel / Price Tests
// ============================================================================

#[test]
fn test_panel_prices_found_components() {
    let tmp = setup_test_project();
    // 22 kW fan → 40.17 A → ×1.25 = 50.21 A: the 63 A frame covers it
    write_catalog_entry(&tmp, "mccbs/mccb-63.yaml", &mccb_yaml('0', 63.0, 90.0));
    write_catalog_entry(&tmp, "mccbs/mccb-100.yaml", &mccb_yaml('1', 100.0, 140.0));

    dpt()
        .current_dir(tmp.path())
        .args(["panel", "fan-damper"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MCCB"))
        .stdout(predicate::str::contains("3VA2-63"))
        .stdout(predicate::str::contains("Total"));
}

#[test]
fn test_panel_flags_missing_components() {
    // Empty catalog: every row is a zero-price placeholder, but the build
    // still succeeds
    let tmp = setup_test_project();
    dpt()
        .current_dir(tmp.path())
        .args(["panel", "fan-damper"])
        .assert()
        .success()
        .stdout(predicate::str::contains("❌"))
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_panel_csv_format() {
    let tmp = setup_test_project();
    dpt()
        .current_dir(tmp.path())
        .args(["panel", "fan-damper", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "type,brand,order_number,specification,quantity,price,total_price",
        ));
}

#[test]
fn test_panel_json_format() {
    let tmp = setup_test_project();
    dpt()
        .current_dir(tmp.path())
        .args(["panel", "fan-damper", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\""))
        .stdout(predicate::str::contains("\"subsystem\""));
}

#[test]
fn test_panel_disabled_subsystem_fails() {
    let tmp = setup_test_project();
    dpt()
        .current_dir(tmp.path())
        .args(["panel", "transport"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("disabled"));
}

#[test]
fn test_panel_invalid_subsystem_rejected_by_clap() {
    let tmp = setup_test_project();
    dpt()
        .current_dir(tmp.path())
        .args(["panel", "warp-drive"])
        .assert()
        .failure();
}

#[test]
fn test_price_prints_grand_total() {
    let tmp = setup_test_project();
    write_catalog_entry(&tmp, "mccbs/mccb-63.yaml", &mccb_yaml('0', 63.0, 90.0));

    dpt()
        .current_dir(tmp.path())
        .arg("price")
        .assert()
        .success()
        .stdout(predicate::str::contains("Grand total:"))
        .stdout(predicate::str::contains("missing catalog coverage"));
}

#[test]
fn test_price_outside_project_fails() {
    let tmp = TempDir::new().unwrap();
    dpt()
        .current_dir(tmp.path())
        .arg("price")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a DPT project"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    dpt()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dpt"));
}
