#![forbid(unsafe_code)]
#![cfg(feature = "serde")]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli(project: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("shiftkan-cli").unwrap();
    cmd.arg("--project").arg(project);
    cmd
}

#[test]
fn import_generate_and_check() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("p.json");
    let csv = dir.path().join("requests.csv");
    fs::write(
        &csv,
        "ID,Name,Date,Priority\na,Aiko,2025-06-03,TRUE\nb,Ben,2025-06-10,FALSE\nc,Chika,2025-06-20,FALSE\n",
    )
    .unwrap();

    cli(&project)
        .args(["import", "--csv"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 worker(s), 3 request(s)"));

    cli(&project)
        .args([
            "policy",
            "--weekday-day",
            "1",
            "--weekday-night",
            "1",
            "--weekend-day",
            "1",
            "--weekend-night",
            "1",
            "--holidays",
            "2025-06-16",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("holidays: 2025-06-16"));

    cli(&project)
        .args(["priority", "--add", "b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b"));

    let tsv = dir.path().join("out.tsv");
    let json = dir.path().join("out.json");
    cli(&project)
        .args(["generate", "--month", "2025-06", "--out-tsv"])
        .arg(&tsv)
        .arg("--out-json")
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::contains("Aiko"));

    let exported = fs::read(&tsv).unwrap();
    assert!(exported.starts_with("\u{feff}".as_bytes()));

    cli(&project)
        .args(["check", "--schedule"])
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));
}

#[test]
fn shortfall_exits_with_warning_code() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("p.json");
    let csv = dir.path().join("requests.csv");
    fs::write(&csv, "ID,Name,Date\nsolo,Solo,2025-06-02\n").unwrap();

    cli(&project).args(["import", "--csv"]).arg(&csv).assert().success();
    cli(&project)
        .args(["generate", "--month", "2025-06"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("staffing warning(s)"));
}

#[test]
fn refuses_empty_roster_and_unknown_priority() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("p.json");

    cli(&project)
        .args(["generate", "--month", "2025-06"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("roster is empty"));

    cli(&project)
        .args(["priority", "--add", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown worker id"));
}

#[test]
fn grid_columns_line_up_with_short_names() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("p.json");
    let csv = dir.path().join("requests.csv");
    fs::write(&csv, "ID,Name,Date\na,Al,2025-06-02\nb,Bo,2025-06-03\n").unwrap();

    cli(&project).args(["import", "--csv"]).arg(&csv).assert().success();
    let output = cli(&project)
        .args(["generate", "--month", "2025-06"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("2025-06 | "));
    for line in &lines {
        assert_eq!(line.find(" | "), Some("2025-06".len()), "{line}");
    }
}
