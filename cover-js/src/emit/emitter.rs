//! Boundary-aware output buffer.
//!
//! Fragments are pushed as token-sized pieces of text and the buffer inserts
//! the minimal whitespace needed so that adjacent fragments cannot lex as a
//! different token: `return x` must not become `returnx`, and `a - -b` must
//! not become `a--b`. The check only needs the last character already written
//! and the first character of the incoming fragment, since every hazardous
//! pair is formed by two identical-class characters meeting.

#[derive(Clone, Copy, PartialEq, Eq)]
enum Boundary {
  Minus,
  None,
  Other,
  Plus,
  Slash,
  Word,
}

fn classify(c: char) -> Boundary {
  match c {
    '-' => Boundary::Minus,
    '+' => Boundary::Plus,
    '/' => Boundary::Slash,
    // Identifier and number characters, including Unicode identifiers.
    c if c.is_alphanumeric() || c == '_' || c == '$' || !c.is_ascii() => Boundary::Word,
    _ => Boundary::Other,
  }
}

fn needs_space(trailing: Boundary, leading: Boundary) -> bool {
  trailing == leading
    && matches!(
      trailing,
      Boundary::Minus | Boundary::Plus | Boundary::Slash | Boundary::Word
    )
}

pub struct Emitter {
  out: String,
  trailing: Boundary,
}

impl Emitter {
  pub fn new() -> Emitter {
    Emitter {
      out: String::new(),
      trailing: Boundary::None,
    }
  }

  pub fn push(&mut self, text: &str) {
    let Some(first) = text.chars().next() else {
      return;
    };
    if needs_space(self.trailing, classify(first)) {
      self.out.push(' ');
    };
    self.out.push_str(text);
    // text is non-empty, so next_back always yields.
    if let Some(last) = text.chars().next_back() {
      self.trailing = classify(last);
    };
  }

  /// Appends without the boundary check, for content between string or
  /// template delimiters where an inserted space would change the value.
  pub fn push_verbatim(&mut self, text: &str) {
    self.out.push_str(text);
    if let Some(last) = text.chars().next_back() {
      self.trailing = classify(last);
    };
  }

  pub fn newline(&mut self) {
    self.out.push('\n');
    self.trailing = Boundary::None;
  }

  pub fn finish(self) -> String {
    self.out
  }
}

#[cfg(test)]
mod tests {
  use super::Emitter;

  fn joined(parts: &[&str]) -> String {
    let mut out = Emitter::new();
    for part in parts {
      out.push(part);
    }
    out.finish()
  }

  #[test]
  fn separates_words() {
    assert_eq!(joined(&["return", "x"]), "return x");
    assert_eq!(joined(&["typeof", "a"]), "typeof a");
    assert_eq!(joined(&["a", "instanceof", "b"]), "a instanceof b");
  }

  #[test]
  fn separates_sign_runs() {
    assert_eq!(joined(&["a", "-", "-b"]), "a- -b");
    assert_eq!(joined(&["a", "+", "++", "b"]), "a+ ++b");
    assert_eq!(joined(&["a", "/", "/b/"]), "a/ /b/");
  }

  #[test]
  fn keeps_distinct_classes_tight() {
    assert_eq!(joined(&["a", "+", "b"]), "a+b");
    assert_eq!(joined(&["f", "(", "x", ")"]), "f(x)");
    assert_eq!(joined(&["typeof", "(", "a", ")"]), "typeof(a)");
    assert_eq!(joined(&["a", "-", "+b"]), "a-+b");
  }

  #[test]
  fn ignores_empty_fragments() {
    assert_eq!(joined(&["a", "", "b"]), "a b");
    assert_eq!(joined(&["", "x"]), "x");
  }

  #[test]
  fn newline_clears_the_boundary() {
    let mut out = Emitter::new();
    out.push("a");
    out.newline();
    out.push("b");
    assert_eq!(out.finish(), "a\nb");
  }

  #[test]
  fn verbatim_skips_the_space() {
    let mut out = Emitter::new();
    out.push("`");
    out.push_verbatim("a");
    out.push_verbatim("${");
    out.push("b");
    out.push_verbatim("}");
    out.push("`");
    assert_eq!(out.finish(), "`a${b}`");
  }
}
