use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;
use std::ops::AddAssign;

/// A location within the current source file expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1 - self.0
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn add_option(self, rhs: Option<Loc>) -> Loc {
    let mut new = self;
    if let Some(rhs) = rhs {
      new.extend(rhs);
    };
    new
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

/// Maps byte offsets to 1-based line numbers.
///
/// Only `\n` starts a new line; `\r\n` therefore counts once, and a lone `\r` does not
/// break a line (matching how editors and coverage tools number CRLF and LF sources alike).
pub struct LineIndex {
  // Byte offset of the first character of each line. line_starts[0] is always 0.
  line_starts: Vec<usize>,
}

impl LineIndex {
  pub fn new(source: &str) -> LineIndex {
    let mut line_starts = vec![0];
    for (i, b) in source.bytes().enumerate() {
      if b == b'\n' {
        line_starts.push(i + 1);
      }
    }
    LineIndex { line_starts }
  }

  /// The 1-based line number containing the given byte offset.
  pub fn line_of(&self, offset: usize) -> u32 {
    let line = match self.line_starts.binary_search(&offset) {
      Ok(i) => i,
      Err(i) => i - 1,
    };
    (line + 1) as u32
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extends_to_cover_both_ranges() {
    let mut loc = Loc(4, 10);
    loc.extend(Loc(2, 6));
    assert_eq!(loc, Loc(2, 10));
    assert_eq!((Loc(0, 1) + Loc(5, 9)), Loc(0, 9));
  }

  #[test]
  fn line_index_maps_offsets_to_lines() {
    let idx = LineIndex::new("ab\ncd\n\nef");
    assert_eq!(idx.line_of(0), 1);
    assert_eq!(idx.line_of(2), 1);
    assert_eq!(idx.line_of(3), 2);
    assert_eq!(idx.line_of(5), 2);
    assert_eq!(idx.line_of(6), 3);
    assert_eq!(idx.line_of(7), 4);
    assert_eq!(idx.line_of(8), 4);
  }

  #[test]
  fn line_index_counts_crlf_once() {
    let idx = LineIndex::new("a\r\nb");
    assert_eq!(idx.line_of(0), 1);
    assert_eq!(idx.line_of(3), 2);
  }
}
