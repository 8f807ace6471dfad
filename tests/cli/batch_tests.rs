use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn commenter(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_commenter"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn project() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src/db")).unwrap();
    fs::write(root.join("src/index.ts"), "// header\nexport const a = 1; // one\n").unwrap();
    fs::write(root.join("src/db/schema.sql"), "-- table\nSELECT '--' FROM t; /* x */\n").unwrap();
    fs::write(root.join("package.json"), "{\n  \"name\": \"demo\"\n}\n").unwrap();
    fs::write(root.join("README.md"), "// not touched\n").unwrap();
    dir
}

#[test]
fn batch_preview_reports_totals() {
    let dir = project();
    commenter(dir.path())
        .arg(".")
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch Processing Summary:"))
        .stdout(predicate::str::contains("Files processed: 3"))
        .stdout(predicate::str::contains("Total comments removed: 4"))
        .stdout(predicate::str::contains("Total lines processed: 7"))
        .stdout(predicate::str::contains("Run with --write to apply changes to all files."));

    assert_eq!(fs::read_to_string(dir.path().join("src/index.ts")).unwrap(), "// header\nexport const a = 1; // one\n");
}

#[test]
fn batch_write_rewrites_changed_files() {
    let dir = project();
    commenter(dir.path())
        .args(["--write", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files written successfully: 2"));

    assert_eq!(fs::read_to_string(dir.path().join("src/index.ts")).unwrap(), "\nexport const a = 1; \n");
    assert_eq!(fs::read_to_string(dir.path().join("src/db/schema.sql")).unwrap(), "\nSELECT '--' FROM t; \n");
    assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), "// not touched\n");
}

#[test]
fn non_recursive_batch_of_two_files() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("nested")).unwrap();
    fs::write(root.join("file1.go"), "package main // c1\n").unwrap();
    fs::write(root.join("file2.js"), "const a = 1; /* c2 */\n").unwrap();
    fs::write(root.join("nested/file3.go"), "// c3\n").unwrap();

    commenter(root)
        .args(["--no-recursive", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch Processing Summary:"))
        .stdout(predicate::str::contains("Files processed: 2"))
        .stdout(predicate::str::contains("Total comments removed: 2"));
}

#[test]
fn hidden_config_files_are_included() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join(".vscode")).unwrap();
    fs::write(root.join(".eslintrc.json"), "{\n  // c\n}\n").unwrap();
    fs::write(root.join(".vscode/settings.json"), "{ /* c */ }\n").unwrap();
    fs::write(root.join("a.go"), "// c\n").unwrap();

    commenter(root).arg(".").assert().success().stdout(predicate::str::contains("Files processed: 3"));
    commenter(root).args(["--no-hidden", "."]).assert().success().stdout(predicate::str::contains("Files processed: 1"));
}

#[test]
fn glob_target_selects_matching_files() {
    let dir = project();
    commenter(dir.path())
        .arg("src/*.ts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files processed: 1"))
        .stdout(predicate::str::contains("Total comments removed: 2"));

    commenter(dir.path())
        .arg("**/*.sql")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files processed: 1"));
}

#[test]
fn glob_without_matches_fails() {
    let dir = project();
    commenter(dir.path())
        .arg("src/*.go")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no files match pattern: src/*.go"));
}

#[test]
fn empty_directory_has_nothing_to_process() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "// text\n").unwrap();

    commenter(dir.path())
        .arg(".")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No supported files found in '.'"));
}

#[test]
fn exclude_and_non_recursive() {
    let dir = project();
    commenter(dir.path())
        .args(["--no-recursive", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files processed: 1"));

    commenter(dir.path())
        .args(["-e", "*.sql,*.json", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files processed: 1"));
}

#[test]
fn config_file_supplies_defaults() {
    let dir = project();
    fs::write(dir.path().join("commenter.config.json"), r#"{"excludePatterns": ["src/**"], "write": true}"#).unwrap();

    commenter(dir.path())
        .arg(".")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files processed: 2"))
        .stdout(predicate::str::contains("Files written successfully: 0"));

    assert_eq!(fs::read_to_string(dir.path().join("src/index.ts")).unwrap(), "// header\nexport const a = 1; // one\n");
}

#[test]
fn ignore_pattern_keeps_matching_comments() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.ts"), "// @ts-ignore\nfoo(); // drop\n").unwrap();

    commenter(dir.path()).args(["-w", "-i", "@ts-ignore", "a.ts"]).assert().success();

    assert_eq!(fs::read_to_string(dir.path().join("a.ts")).unwrap(), "// @ts-ignore\nfoo(); \n");
}

#[cfg(unix)]
#[test]
fn failing_file_makes_batch_exit_non_zero() {
    use std::os::unix::fs::PermissionsExt;

    let dir = project();
    let locked = dir.path().join("src/locked.js");
    fs::write(&locked, "// x\n").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // Permission bits do not restrict root.
    if fs::read(&locked).is_ok() {
        return;
    }

    commenter(dir.path())
        .arg(".")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Files processed: 3"))
        .stdout(predicate::str::contains("Failed: 1"));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}
