//! End-to-end tests of the `staffline` binary

use assert_cmd::Command;
use predicates::prelude::*;
use staffline_io::{ImageFormat, write_image};
use staffline_test::synth::{PageBuilder, StaffSpec};
use std::path::{Path, PathBuf};

fn write_score(dir: &Path) -> PathBuf {
    let page = PageBuilder::new(400, 400)
        .expect("page")
        .staff(&StaffSpec::new(60, 12).with_thickness(3).with_columns(30, 369))
        .staff(&StaffSpec::new(240, 12).with_thickness(3).with_columns(30, 369))
        .build();
    let path = dir.join("score.png");
    write_image(&page, &path, ImageFormat::Png).expect("write score");
    path
}

fn staffline() -> Command {
    Command::cargo_bin("staffline").expect("binary built")
}

#[test]
fn prints_summary() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_score(dir.path());

    staffline()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("interline 12"))
        .stdout(predicate::str::contains("2 staves, 2 traced"))
        .stdout(predicate::str::contains("staff  0: center row 85, columns 30..=369, traced"));
}

#[test]
fn prints_json() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_score(dir.path());

    let output = staffline().arg(&input).arg("--json").output().expect("run");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["interline"], 12);
    assert_eq!(json["staves"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["staves"][1]["lines"][2]["rows"][0], 265 - 151);
}

#[test]
fn writes_line_and_erased_images() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_score(dir.path());
    let lines_dir = dir.path().join("lines");
    let erased_dir = dir.path().join("erased");

    staffline()
        .arg(&input)
        .arg("--print-lines")
        .arg(&lines_dir)
        .arg("--erase")
        .arg(&erased_dir)
        .assert()
        .success();

    for id in 0..2 {
        assert!(lines_dir.join(format!("staff_{:02}_lines.png", id)).exists());
        let erased = erased_dir.join(format!("staff_{:02}_erased.png", id));
        let cleaned = staffline_io::read_image(&erased).expect("read erased staff");
        assert!(cleaned.data().iter().all(|&v| v == 255));
    }
}

#[test]
fn config_file_and_overrides() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_score(dir.path());
    let config = dir.path().join("options.json");
    std::fs::write(&config, r#"{"alpha": 0.9, "parallel": false}"#).expect("write config");

    staffline()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--threshold")
        .arg("128")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 traced"));

    std::fs::write(&config, r#"{"alpha": 2.0}"#).expect("write config");
    staffline()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("alpha"));
}

#[test]
fn half_scale_halves_the_interline() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_score(dir.path());

    staffline()
        .arg(&input)
        .arg("--half-scale")
        .assert()
        .success()
        .stdout(predicate::str::contains("page 200x200"))
        .stdout(predicate::str::contains("interline 6"));
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().expect("temp dir");

    staffline()
        .arg(dir.path().join("missing.png"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn blank_page_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let page = PageBuilder::new(100, 100).expect("page").build();
    let path = dir.path().join("blank.png");
    write_image(&page, &path, ImageFormat::Png).expect("write page");

    staffline()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("undetermined geometry"));
}
