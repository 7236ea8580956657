/// Renders a decoded string value as a single-quoted literal.
///
/// Only characters that would terminate or corrupt the literal are escaped;
/// everything else passes through verbatim, including double quotes and
/// backticks. U+2028 and U+2029 count as line terminators in string literals
/// so they must be escaped too.
pub fn single_quoted(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('\'');
  for c in value.chars() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\'' => out.push_str("\\'"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      c => out.push(c),
    }
  }
  out.push('\'');
  out
}

#[cfg(test)]
mod tests {
  use super::single_quoted;

  #[test]
  fn escapes_delimiters_and_terminators() {
    assert_eq!(single_quoted("it's"), r"'it\'s'");
    assert_eq!(single_quoted(r"a\b"), r"'a\\b'");
    assert_eq!(single_quoted("a\nb\rc"), r"'a\nb\rc'");
    assert_eq!(single_quoted("a\u{2028}b\u{2029}c"), r"'a\u2028b\u2029c'");
  }

  #[test]
  fn leaves_other_quotes_alone() {
    assert_eq!(single_quoted(r#"say "hi" in `style`"#), r#"'say "hi" in `style`'"#);
  }

  #[test]
  fn passes_unicode_through() {
    assert_eq!(single_quoted("héllo ✓"), "'héllo ✓'");
  }
}
