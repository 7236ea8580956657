//! Instrumented output shape, import discovery, and the recorder round trip.

use cover_js::import_targets;
use cover_js::instrument;
use cover_js::write_instrumented;
use cover_js::write_lcov;
use cover_js::Cover;
use cover_js::CoverError;
use cover_js::InstrumentOptions;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

fn instrumented(source: &str) -> String {
  instrument(source, Path::new("t.js"), &InstrumentOptions::default()).unwrap()
}

#[test]
fn header_registers_the_manifest() {
  let out = instrumented("let a = 1; f(a);\ng();");
  assert!(out.starts_with(
    "import{cover as __$c}from'cover-js/runtime';\n__$c.init('t.js',[1,1,2]);\n"
  ));
}

#[test]
fn wraps_expression_statements() {
  assert_eq!(
    instrumented("f();"),
    "import{cover as __$c}from'cover-js/runtime';\n\
     __$c.init('t.js',[1]);\n\
     (__$c.statement('t.js',1),f());\n"
  );
}

#[test]
fn return_arguments_are_wrapped() {
  let out = instrumented("function g() {\n  return h();\n}");
  assert!(out.contains("return(__$c.statement('t.js',2),h());"));
}

#[test]
fn bare_returns_take_a_preceding_probe() {
  let out = instrumented("function g() {\n  return;\n}");
  assert!(out.contains("{__$c.statement('t.js',2);return;}"));
}

#[test]
fn declarations_take_a_preceding_probe() {
  assert_eq!(
    instrumented("let x = 1;"),
    "import{cover as __$c}from'cover-js/runtime';\n\
     __$c.init('t.js',[1]);\n\
     __$c.statement('t.js',1);\n\
     let x=1;\n"
  );
}

#[test]
fn loop_heads_redirect_the_probe() {
  let out = instrumented("for (let i = 0; i < 3; i++) f(i);");
  assert!(out.contains("\n__$c.statement('t.js',1);\nfor(let i=0;"));
  assert!(!out.contains("for(__$c"));
  assert!(out.contains("{(__$c.statement('t.js',1),f(i));}"));

  let out = instrumented("for (const x of xs) g(x);");
  assert!(out.contains("\n__$c.statement('t.js',1);\nfor(const x of xs)"));
}

#[test]
fn exported_declarations_redirect_the_probe() {
  let out = instrumented("export const x = 1;");
  assert!(out.contains("\n__$c.statement('t.js',1);\nexport const x=1;\n"));
}

#[test]
fn recorder_calls_survive_reinstrumentation() {
  let first = instrumented("f();\nlet x = 1;");
  let second = instrument(&first, Path::new("t.js"), &InstrumentOptions::default()).unwrap();
  // The registration call and the standalone probe from the first pass are
  // recognized and left alone; only a fresh header is added around them.
  assert!(second.contains("\n__$c.init('t.js',[1,2]);\n"));
  assert!(second.contains("\n__$c.statement('t.js',2);\n"));
}

#[test]
fn for_in_is_rejected() {
  let err = instrument(
    "for (a in b) f(a);",
    Path::new("t.js"),
    &InstrumentOptions::default(),
  )
  .unwrap_err();
  match err {
    CoverError::UnknownKind { kind } => assert_eq!(kind, "ForInStatement"),
    other => panic!("expected UnknownKind, got {}", other),
  }
}

#[test]
fn unbraced_bare_returns_cannot_take_a_probe() {
  let err = instrument(
    "function f() {\n  if (a) return;\n}",
    Path::new("t.js"),
    &InstrumentOptions::default(),
  )
  .unwrap_err();
  assert!(matches!(err, CoverError::UnsupportedEdit { .. }));

  // With an argument the probe rides inside the return instead.
  let out = instrumented("function f() {\n  if (a) return x;\n}");
  assert!(out.contains("if(a)return(__$c.statement('t.js',2),x);"));
}

#[test]
fn local_imports_resolve_against_the_file() {
  let source = "import './a.js';\nimport '../b';\nimport 'pkg';\nimport c from './sub/c.js';\nf();";
  let targets = import_targets(source, Path::new("src/main.js"), "js").unwrap();
  assert_eq!(targets, vec![
    PathBuf::from("src/a.js"),
    PathBuf::from("src/../b.js"),
    PathBuf::from("src/sub/c.js"),
  ]);
}

#[test]
fn mirrors_instrumented_files_under_the_output_directory() {
  let dir = tempfile::tempdir().unwrap();
  let src_dir = dir.path().join("src");
  fs::create_dir_all(&src_dir).unwrap();
  let src = src_dir.join("app.js");
  fs::write(&src, "let x = 1;\n").unwrap();

  let options = InstrumentOptions {
    out_dir: dir.path().join("coverage"),
    ..InstrumentOptions::default()
  };
  let dest = write_instrumented(&src, &options).unwrap();
  assert!(dest.starts_with(&options.out_dir));
  assert!(dest.ends_with("src/app.js"));
  let written = fs::read_to_string(&dest).unwrap();
  assert!(written.contains("__$c.init("));
  assert!(written.contains("let x=1;"));
}

#[test]
fn recorded_hits_reach_the_lcov_report() {
  let out = instrumented("function f() {\n  let x = 1;\n  return x;\n}");
  assert!(out.contains("__$c.init('t.js',[2,3]);"));

  // Drive the recorder the way the instrumented program would.
  let dir = tempfile::tempdir().unwrap();
  let mut cover = Cover::new(dir.path());
  cover.init("t.js", vec![2, 3]).unwrap();
  cover.statement("t.js", 2).unwrap();
  cover.statement("t.js", 3).unwrap();

  let raw = fs::read_to_string(dir.path().join(cover_js::DATA_FILE)).unwrap();
  let data: cover_js::CoverageData = serde_json::from_str(&raw).unwrap();
  assert_eq!(data["t.js"].statements, vec![2, 3]);
  assert_eq!(data["t.js"].lines.iter().copied().collect::<Vec<_>>(), vec![
    2, 3
  ]);

  let report_path = write_lcov(dir.path()).unwrap();
  let report = fs::read_to_string(report_path).unwrap();
  assert!(report.starts_with("TN:\n"));
  assert!(report.contains("\nDA:2,1\nDA:3,1\nLF:2\nLH:2\nend_of_record\n"));
}
