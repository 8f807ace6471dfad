use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn commenter(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_commenter"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn shows_help() {
    let dir = tempdir().unwrap();
    commenter(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Comment Remover"))
        .stdout(predicate::str::contains("USAGE:"))
        .stdout(predicate::str::contains("OPTIONS:"))
        .stdout(predicate::str::contains("--write"))
        .stdout(predicate::str::contains("--recursive"))
        .stdout(predicate::str::contains("--no-color"))
        .stdout(predicate::str::contains("--help"));
}

#[test]
fn go_line_comment_preview() {
    let dir = tempdir().unwrap();
    let src = "package main\n\nfunc main() {\n\tx := 1 // set x\n}\n";
    fs::write(dir.path().join("main.go"), src).unwrap();

    commenter(dir.path())
        .args(["--no-color", "main.go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File: main.go (Go)"))
        .stdout(predicate::str::contains("Original lines: 5"))
        .stdout(predicate::str::contains("Comments removed: 1"))
        .stdout(predicate::str::contains("Remaining lines: 5"))
        .stdout(predicate::str::contains("Line 4: // set x"))
        .stdout(predicate::str::contains("Run with --write"));

    assert_eq!(fs::read_to_string(dir.path().join("main.go")).unwrap(), src);
}

#[test]
fn go_line_and_block_comments_are_counted() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.go"), "package main\nfunc main(){}\n// c1\n/* c2\n// inner */\n").unwrap();

    commenter(dir.path())
        .arg("main.go")
        .assert()
        .success()
        .stdout(predicate::str::contains("Comments removed: 2"))
        .stdout(predicate::str::contains("Original lines: 5"));
}

#[test]
fn go_string_with_slashes_is_untouched() {
    let dir = tempdir().unwrap();
    let src = "package main\n\nfunc main() {\n\tmsg := \"String with // comment inside\"\n\t_ = msg\n}\n";
    fs::write(dir.path().join("main.go"), src).unwrap();

    commenter(dir.path())
        .args(["--write", "main.go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comments removed: 0"));

    assert_eq!(fs::read_to_string(dir.path().join("main.go")).unwrap(), src);
}

#[test]
fn default_write_keeps_code_bytes() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.go"), "x := 1    // c\n// only\ny := 2\n").unwrap();

    commenter(dir.path())
        .args(["--write", "a.go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining lines: 3"));

    assert_eq!(fs::read_to_string(dir.path().join("a.go")).unwrap(), "x := 1    \n\ny := 2\n");
}

#[test]
fn compact_flag_drops_comment_only_lines() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.go"), "x := 1    // c\n// only\ny := 2\n").unwrap();

    commenter(dir.path())
        .args(["--write", "--compact", "a.go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining lines: 2"));

    assert_eq!(fs::read_to_string(dir.path().join("a.go")).unwrap(), "x := 1\ny := 2\n");
}

#[test]
fn strings_are_immune() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.ts"), "const url = \"http://x/*y*/\";\n").unwrap();

    commenter(dir.path())
        .args(["--write", "a.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comments removed: 0"));

    assert_eq!(fs::read_to_string(dir.path().join("a.ts")).unwrap(), "const url = \"http://x/*y*/\";\n");
}

#[test]
fn block_comment_is_atomic() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.js"), "/* a // b */ c\n").unwrap();

    commenter(dir.path())
        .args(["-w", "a.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comments removed: 1"))
        .stdout(predicate::str::contains("File updated successfully!"));

    assert_eq!(fs::read_to_string(dir.path().join("a.js")).unwrap(), " c\n");
}

#[test]
fn jsx_embedded_comment_is_removed_whole() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("App.tsx"), "<div>\n  {/* multi\n  line */}\n  <p>hi</p>\n</div>\n").unwrap();

    commenter(dir.path())
        .args(["--write", "App.tsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comments removed: 1"));

    assert_eq!(fs::read_to_string(dir.path().join("App.tsx")).unwrap(), "<div>\n  \n  <p>hi</p>\n</div>\n");
}

#[test]
fn unsupported_single_file_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("tool.py"), "# comment\n").unwrap();

    commenter(dir.path())
        .arg("tool.py")
        .assert()
        .failure()
        .stdout(predicate::str::contains("UnsupportedLanguage"));
}

#[test]
fn missing_path_fails() {
    let dir = tempdir().unwrap();
    commenter(dir.path())
        .arg("does/not/exist.ts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn excluded_single_file_has_nothing_to_process() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("gen.ts"), "// x\n").unwrap();

    commenter(dir.path())
        .args(["-e", "gen.*", "gen.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No supported files found in 'gen.ts'"));
}

#[test]
fn explicit_missing_config_fails() {
    let dir = tempdir().unwrap();
    commenter(dir.path())
        .args(["--config", "nope.json", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading config"));
}
