//! In-process coverage recorder.
//!
//! Instrumented files call [init] once and [statement] on every probe hit.
//! The recorder writes through to disk on every update, so however the
//! process ends, the data file reflects everything recorded up to that
//! moment. It assumes it is the only writer of its directory.

use crate::err::CoverResult;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::PoisonError;

/// File name the recorder writes inside its directory.
pub const DATA_FILE: &str = "data.json";

/// Coverage for one file: the manifest of coverable statement lines in
/// document order (duplicates kept), and the distinct lines actually hit.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FileCoverageData {
  pub statements: Vec<u32>,
  pub lines: BTreeSet<u32>,
}

pub type CoverageData = BTreeMap<String, FileCoverageData>;

pub struct Cover {
  dir: PathBuf,
  data: CoverageData,
}

impl Cover {
  pub fn new(dir: impl Into<PathBuf>) -> Cover {
    Cover {
      dir: dir.into(),
      data: CoverageData::new(),
    }
  }

  pub fn data(&self) -> &CoverageData {
    &self.data
  }

  /// Registers a file and its statement manifest, discarding any lines
  /// recorded for it earlier in this process.
  pub fn init(&mut self, file: &str, statements: Vec<u32>) -> CoverResult<()> {
    self.data.insert(file.to_string(), FileCoverageData {
      statements,
      lines: BTreeSet::new(),
    });
    self.flush()
  }

  /// Records a hit on one line of a file.
  pub fn statement(&mut self, file: &str, line: u32) -> CoverResult<()> {
    self
      .data
      .entry(file.to_string())
      .or_default()
      .lines
      .insert(line);
    self.flush()
  }

  fn flush(&self) -> CoverResult<()> {
    fs::create_dir_all(&self.dir)?;
    let json = serde_json::to_string(&self.data)?;
    fs::write(self.dir.join(DATA_FILE), json)?;
    Ok(())
  }
}

static COVER: Lazy<Mutex<Cover>> = Lazy::new(|| Mutex::new(Cover::new("coverage")));

/// Process-wide [Cover::init] against the default `coverage` directory.
pub fn init(file: &str, statements: Vec<u32>) -> CoverResult<()> {
  COVER
    .lock()
    .unwrap_or_else(PoisonError::into_inner)
    .init(file, statements)
}

/// Process-wide [Cover::statement] against the default `coverage` directory.
pub fn statement(file: &str, line: u32) -> CoverResult<()> {
  COVER
    .lock()
    .unwrap_or_else(PoisonError::into_inner)
    .statement(file, line)
}

#[cfg(test)]
mod tests {
  use super::{Cover, CoverageData, DATA_FILE};
  use std::collections::BTreeSet;
  use std::fs;

  fn read_back(dir: &std::path::Path) -> CoverageData {
    let raw = fs::read_to_string(dir.join(DATA_FILE)).unwrap();
    serde_json::from_str(&raw).unwrap()
  }

  #[test]
  fn records_manifest_and_hits() {
    let dir = tempfile::tempdir().unwrap();
    let mut cover = Cover::new(dir.path());
    cover.init("a.js", vec![1, 2, 2, 5]).unwrap();
    cover.statement("a.js", 2).unwrap();
    cover.statement("a.js", 2).unwrap();
    cover.statement("a.js", 5).unwrap();

    let data = read_back(dir.path());
    let file = &data["a.js"];
    assert_eq!(file.statements, vec![1, 2, 2, 5]);
    assert_eq!(file.lines, BTreeSet::from([2, 5]));
  }

  #[test]
  fn writes_through_on_every_update() {
    let dir = tempfile::tempdir().unwrap();
    let mut cover = Cover::new(dir.path());
    cover.init("a.js", vec![1]).unwrap();
    assert!(dir.path().join(DATA_FILE).is_file());
    assert!(read_back(dir.path())["a.js"].lines.is_empty());

    cover.statement("a.js", 1).unwrap();
    assert_eq!(read_back(dir.path())["a.js"].lines, BTreeSet::from([1]));
  }

  #[test]
  fn init_resets_recorded_lines() {
    let dir = tempfile::tempdir().unwrap();
    let mut cover = Cover::new(dir.path());
    cover.init("a.js", vec![1, 2]).unwrap();
    cover.statement("a.js", 1).unwrap();
    cover.init("a.js", vec![1, 2]).unwrap();
    assert!(read_back(dir.path())["a.js"].lines.is_empty());
  }

  #[test]
  fn hits_before_init_still_count() {
    let dir = tempfile::tempdir().unwrap();
    let mut cover = Cover::new(dir.path());
    cover.statement("b.js", 3).unwrap();

    let data = read_back(dir.path());
    assert!(data["b.js"].statements.is_empty());
    assert_eq!(data["b.js"].lines, BTreeSet::from([3]));
  }
}
