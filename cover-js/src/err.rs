use core::fmt;
use core::fmt::Display;
use core::fmt::Formatter;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use syntax_js::error::SyntaxError;

#[derive(Debug)]
pub enum CoverError {
  /// The coverage data file could not be parsed.
  DataFormat(serde_json::Error),
  Io(io::Error),
  /// An LCOV report was requested but no coverage data has been recorded.
  MissingCoverageData { path: PathBuf },
  /// The code generator reached a node it cannot express. Always a bug.
  Render(&'static str),
  Syntax(SyntaxError),
  /// A syntax construct with no corresponding node kind.
  UnknownKind { kind: &'static str },
  /// A mutation was requested at a position the grammar cannot splice.
  /// Always an instrumenter bug, never a property of the input program.
  UnsupportedEdit { kind: &'static str },
}

impl Display for CoverError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      CoverError::DataFormat(err) => write!(f, "malformed coverage data: {}", err),
      CoverError::Io(err) => write!(f, "{}", err),
      CoverError::MissingCoverageData { path } => write!(
        f,
        "no coverage data at {}; run the instrumented program first",
        path.display()
      ),
      CoverError::Render(what) => write!(f, "cannot render {}", what),
      CoverError::Syntax(err) => write!(f, "syntax error: {}", err),
      CoverError::UnknownKind { kind } => write!(f, "unknown node kind {}", kind),
      CoverError::UnsupportedEdit { kind } => write!(f, "cannot splice into {}", kind),
    }
  }
}

impl Error for CoverError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      CoverError::DataFormat(err) => Some(err),
      CoverError::Io(err) => Some(err),
      CoverError::Syntax(err) => Some(err),
      _ => None,
    }
  }
}

impl From<SyntaxError> for CoverError {
  fn from(err: SyntaxError) -> CoverError {
    CoverError::Syntax(err)
  }
}

impl From<io::Error> for CoverError {
  fn from(err: io::Error) -> CoverError {
    CoverError::Io(err)
  }
}

impl From<serde_json::Error> for CoverError {
  fn from(err: serde_json::Error) -> CoverError {
    CoverError::DataFormat(err)
  }
}

pub type CoverResult<T> = Result<T, CoverError>;
