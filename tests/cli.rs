#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("gardeplan-cli").unwrap()
}

#[test]
fn init_import_and_solve_full_flow() {
    let dir = tempdir().unwrap();
    let dept = dir.path().join("department.json");
    let dept_arg = dept.to_str().unwrap();

    cli()
        .args(["--department", dept_arg, "init", "--name", "Urgences"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    cli()
        .args([
            "--department",
            dept_arg,
            "add-shift",
            "--name",
            "jour",
            "--start",
            "08:00",
            "--end",
            "16:00",
            "--nurses",
            "1",
            "--assistants",
            "0",
        ])
        .assert()
        .success();

    let staff_csv = dir.path().join("staff.csv");
    fs::write(&staff_csv, "name,position\nAnna,nurse\nBadia,nurse\nChloé,nurse\n").unwrap();
    cli()
        .args([
            "--department",
            dept_arg,
            "import-staff",
            "--csv",
            staff_csv.to_str().unwrap(),
        ])
        .assert()
        .success();

    cli()
        .args(["--department", dept_arg, "solve", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Planning 2025-09"))
        .stdout(predicate::str::contains("30/30"));
}

#[test]
fn solve_with_understaffing_exits_with_warning_code() {
    let dir = tempdir().unwrap();
    let dept = dir.path().join("department.json");
    let dept_arg = dept.to_str().unwrap();

    cli()
        .args(["--department", dept_arg, "init", "--name", "Urgences"])
        .assert()
        .success();
    cli()
        .args([
            "--department",
            dept_arg,
            "add-shift",
            "--name",
            "jour",
            "--start",
            "08:00",
            "--end",
            "16:00",
            "--nurses",
            "2",
            "--assistants",
            "0",
        ])
        .assert()
        .success();
    let staff_csv = dir.path().join("staff.csv");
    fs::write(&staff_csv, "name,position\nAnna,nurse\n").unwrap();
    cli()
        .args([
            "--department",
            dept_arg,
            "import-staff",
            "--csv",
            staff_csv.to_str().unwrap(),
        ])
        .assert()
        .success();

    // sous-effectif : bilan affiché, code 2 (avertissement, pas une erreur)
    cli()
        .args(["--department", dept_arg, "solve", "--month", "2025-09"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("manque"));
}

#[test]
fn solve_rejects_malformed_month() {
    let dir = tempdir().unwrap();
    let dept = dir.path().join("department.json");
    let dept_arg = dept.to_str().unwrap();

    cli()
        .args(["--department", dept_arg, "init", "--name", "Urgences"])
        .assert()
        .success();

    cli()
        .args(["--department", dept_arg, "solve", "--month", "2025-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid month"));
}
