//! Smoke tests against the built binary.

use cover_js::Cover;
use cover_js::DATA_FILE;
use cover_js::LCOV_FILE;
use std::fs;
use std::io::Write;
use std::process::Command;
use std::process::Stdio;

const BIN: &str = env!("CARGO_BIN_EXE_cover-js-cli");

#[test]
fn instrument_mirrors_files() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("app.js"), "let x = 1;\nf(x);\n").unwrap();
  let out_dir = dir.path().join("out");
  let status = Command::new(BIN)
    .current_dir(dir.path())
    .args(["instrument", "--out-dir"])
    .arg(&out_dir)
    .arg("app.js")
    .status()
    .unwrap();
  assert!(status.success());
  let written = fs::read_to_string(out_dir.join("app.js")).unwrap();
  assert!(written.contains("__$c.init('app.js',[1,2]);"));
  assert!(written.contains("(__$c.statement('app.js',2),f(x));"));
}

#[test]
fn follow_imports_reaches_local_modules() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("main.js"), "import './util.js';\nmain();\n").unwrap();
  fs::write(dir.path().join("util.js"), "util();\n").unwrap();
  let out_dir = dir.path().join("out");
  let status = Command::new(BIN)
    .current_dir(dir.path())
    .args(["instrument", "--follow-imports", "--out-dir"])
    .arg(&out_dir)
    .arg("main.js")
    .status()
    .unwrap();
  assert!(status.success());
  assert!(out_dir.join("main.js").is_file());
  assert!(out_dir.join("util.js").is_file());
}

#[test]
fn lcov_writes_beside_the_data() {
  let dir = tempfile::tempdir().unwrap();
  let mut cover = Cover::new(dir.path());
  cover.init("a.js", vec![1, 2]).unwrap();
  cover.statement("a.js", 1).unwrap();
  let status = Command::new(BIN)
    .args(["lcov", "--data"])
    .arg(dir.path().join(DATA_FILE))
    .status()
    .unwrap();
  assert!(status.success());
  let report = fs::read_to_string(dir.path().join(LCOV_FILE)).unwrap();
  assert!(report.starts_with("TN:\n"));
  assert!(report.contains("\nDA:1,1\nLF:2\nLH:1\nend_of_record\n"));
}

#[test]
fn lcov_without_data_fails() {
  let dir = tempfile::tempdir().unwrap();
  let output = Command::new(BIN)
    .args(["lcov", "--data"])
    .arg(dir.path().join(DATA_FILE))
    .output()
    .unwrap();
  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("no coverage data"));
}

#[test]
fn syntax_errors_fail_with_context() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("bad.js"), "let = ;").unwrap();
  let output = Command::new(BIN)
    .current_dir(dir.path())
    .args(["instrument", "bad.js"])
    .output()
    .unwrap();
  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("bad.js"));
}

#[test]
fn parse_dumps_the_tree_as_json() {
  let mut child = Command::new(BIN)
    .arg("parse")
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .spawn()
    .unwrap();
  child
    .stdin
    .take()
    .unwrap()
    .write_all(b"let a = 1;")
    .unwrap();
  let output = child.wait_with_output().unwrap();
  assert!(output.status.success());
  let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(tree["body"][0]["$t"], "VarDecl");
}
