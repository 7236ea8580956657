use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::token::TT;
use crate::token::TT::*;

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lex_next(&mut lexer, LexMode::Standard);
    assert_eq!(t.typ, expected);
  }
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(EOF, t.typ);
}

#[test]
fn test_lex_keywords() {
  check("class", [KeywordClass]);
  check("instanceof", [KeywordInstanceof]);
  check("of", [KeywordOf]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", [Identifier]);
  check("classes", [Identifier]);
  check("returning", [Identifier]);
  check("$_", [Identifier]);
  check("\\u0061bc", [Identifier]);
  check("δ", [Identifier]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [LiteralNumber]);
  check("929", [LiteralNumber]);
  check(".929", [LiteralNumber]);
  check(". 929", [Dot, LiteralNumber]);
  check(". 929.2.", [Dot, LiteralNumber, Dot]);
  check(".929.2..", [LiteralNumber, LiteralNumber, Dot, Dot]);
  check(".929. 2..", [LiteralNumber, Dot, LiteralNumber, Dot]);
  check("1e3", [LiteralNumber]);
  check("1e+3", [LiteralNumber]);
  check("0x1f", [LiteralNumber]);
  check("0b101", [LiteralNumber]);
  check("0o17", [LiteralNumber]);
  check("0755", [LiteralNumber]);
  // A legacy octal cannot have a fraction; `.5` starts a new literal.
  check("0755.5", [LiteralNumber, LiteralNumber]);
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", [LiteralString]);
  check("\"hello world\"", [LiteralString]);
  check("'it\\'s'", [LiteralString]);
  check("'hello world\n'", [Invalid]);
  check("'line\\\ncontinuation'", [LiteralString]);
}

#[test]
fn test_lex_literal_regexes() {
  let mut lexer = Lexer::new("/ab+c/gi");
  let t = lex_next(&mut lexer, LexMode::SlashIsRegex);
  assert_eq!(t.typ, LiteralRegex);
  let t = lex_next(&mut lexer, LexMode::SlashIsRegex);
  assert_eq!(t.typ, EOF);

  // A slash in a character class does not end the regex.
  let mut lexer = Lexer::new("/[/]/");
  let t = lex_next(&mut lexer, LexMode::SlashIsRegex);
  assert_eq!(t.typ, LiteralRegex);

  // In standard mode a slash is division.
  check("/", [Slash]);
  check("/=", [SlashEquals]);
}

#[test]
fn test_lex_templates() {
  check("`hello`", [LiteralTemplatePartStringEnd]);
  let mut lexer = Lexer::new("`a${b}c`");
  assert_eq!(
    lex_next(&mut lexer, LexMode::Standard).typ,
    LiteralTemplatePartString
  );
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, Identifier);
  // After the interpolated expression, the lexer must be driven in template continuation mode.
  assert_eq!(
    lex_next(&mut lexer, LexMode::TemplateStrContinue).typ,
    LiteralTemplatePartStringEnd
  );
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, EOF);
}

#[test]
fn test_lex_comments() {
  check("a // comment\nb", [Identifier, Identifier]);
  check("a /* comment */ b", [Identifier, Identifier]);
  check("/* unterminated", []);
}

#[test]
fn test_lex_line_terminator_tracking() {
  let mut lexer = Lexer::new("a\nb /* x\ny */ c d");
  let a = lex_next(&mut lexer, LexMode::Standard);
  assert!(!a.preceded_by_line_terminator);
  let b = lex_next(&mut lexer, LexMode::Standard);
  assert!(b.preceded_by_line_terminator);
  // A multiline comment containing a newline counts as a line terminator.
  let c = lex_next(&mut lexer, LexMode::Standard);
  assert!(c.preceded_by_line_terminator);
  let d = lex_next(&mut lexer, LexMode::Standard);
  assert!(!d.preceded_by_line_terminator);
}

#[test]
fn test_lex_import_statement() {
  check("import * as a from \"./a\";", [
    KeywordImport,
    Asterisk,
    KeywordAs,
    Identifier,
    KeywordFrom,
    LiteralString,
    Semicolon,
  ]);
  check("import * as a from './a';", [
    KeywordImport,
    Asterisk,
    KeywordAs,
    Identifier,
    KeywordFrom,
    LiteralString,
    Semicolon,
  ]);
}
