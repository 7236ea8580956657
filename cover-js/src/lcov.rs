//! LCOV report generation from recorded coverage data.

use crate::cover::CoverageData;
use crate::cover::DATA_FILE;
use crate::err::CoverError;
use crate::err::CoverResult;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// Report file name, written next to the data file.
pub const LCOV_FILE: &str = "lcov.info";

/// Renders an LCOV report from a recorded data file.
///
/// One `TN:` record opens the report. Each file contributes, in sorted
/// order: `SF:` with its absolute path, one `DA:<line>,1` per distinct hit
/// line, `LF:` counting coverable statements from the manifest, `LH:`
/// counting distinct hit lines, and `end_of_record`. Lines never hit get no
/// `DA:` record; consumers derive misses from `LF` versus `LH`.
pub fn render_lcov(data_path: &Path) -> CoverResult<String> {
  if !data_path.is_file() {
    return Err(CoverError::MissingCoverageData {
      path: data_path.to_path_buf(),
    });
  };
  let raw = fs::read_to_string(data_path)?;
  let data: CoverageData = serde_json::from_str(&raw)?;
  let mut out = String::from("TN:\n");
  for (file, coverage) in &data {
    let absolute = std::path::absolute(file)?;
    out.push_str(&format!("SF:{}\n", absolute.display()));
    for line in &coverage.lines {
      out.push_str(&format!("DA:{},1\n", line));
    }
    out.push_str(&format!("LF:{}\n", coverage.statements.len()));
    out.push_str(&format!("LH:{}\n", coverage.lines.len()));
    out.push_str("end_of_record\n");
  }
  Ok(out)
}

/// Renders the report for a coverage directory and writes it there as
/// `lcov.info`. Returns the path written.
pub fn write_lcov(coverage_dir: &Path) -> CoverResult<PathBuf> {
  let report = render_lcov(&coverage_dir.join(DATA_FILE))?;
  let dest = coverage_dir.join(LCOV_FILE);
  fs::write(&dest, report)?;
  Ok(dest)
}

#[cfg(test)]
mod tests {
  use super::{render_lcov, write_lcov};
  use crate::cover::Cover;
  use crate::cover::DATA_FILE;
  use crate::err::CoverError;

  #[test]
  fn counts_statements_and_distinct_lines() {
    let dir = tempfile::tempdir().unwrap();
    let mut cover = Cover::new(dir.path());
    cover.init("t.js", vec![2, 2, 6]).unwrap();
    cover.statement("t.js", 2).unwrap();
    cover.statement("t.js", 6).unwrap();

    let report = render_lcov(&dir.path().join(DATA_FILE)).unwrap();
    assert!(report.starts_with("TN:\n"));
    assert!(report.contains("DA:2,1\nDA:6,1\n"));
    assert!(report.contains("LF:3\n"));
    assert!(report.contains("LH:2\n"));
    assert!(report.ends_with("end_of_record\n"));
  }

  #[test]
  fn source_paths_are_absolute() {
    let dir = tempfile::tempdir().unwrap();
    let mut cover = Cover::new(dir.path());
    cover.init("rel/t.js", vec![1]).unwrap();

    let report = render_lcov(&dir.path().join(DATA_FILE)).unwrap();
    let sf = report
      .lines()
      .find_map(|l| l.strip_prefix("SF:"))
      .unwrap();
    assert!(std::path::Path::new(sf).is_absolute());
    assert!(sf.ends_with("t.js"));
  }

  #[test]
  fn uncovered_files_report_zero_hits() {
    let dir = tempfile::tempdir().unwrap();
    let mut cover = Cover::new(dir.path());
    cover.init("t.js", vec![1, 3]).unwrap();

    let report = render_lcov(&dir.path().join(DATA_FILE)).unwrap();
    assert!(!report.contains("DA:"));
    assert!(report.contains("LF:2\n"));
    assert!(report.contains("LH:0\n"));
  }

  #[test]
  fn missing_data_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = render_lcov(&dir.path().join(DATA_FILE)).unwrap_err();
    assert!(matches!(err, CoverError::MissingCoverageData { .. }));
  }

  #[test]
  fn report_lands_beside_the_data() {
    let dir = tempfile::tempdir().unwrap();
    let mut cover = Cover::new(dir.path());
    cover.init("t.js", vec![1]).unwrap();

    let written = write_lcov(dir.path()).unwrap();
    assert_eq!(written, dir.path().join("lcov.info"));
    assert!(written.is_file());
  }
}
