mod expr;
mod stmt;

use super::Parser;
use crate::lex::{LexMode, Lexer};
use crate::token::TT;

#[test]
fn test_parser_token_buffer() {
  let lexer = Lexer::new("a = /b/g;");
  let mut p = Parser::new(lexer);
  // Initial state.
  let cp = p.checkpoint();
  assert_eq!(p.next_tok_i, 0);

  // Peeking buffers the token without advancing.
  let t = p.peek();
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::Identifier);

  // Consuming advances past the buffered token.
  let t = p.consume();
  assert_eq!(p.next_tok_i, 1);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::Identifier);
  let t = p.consume();
  assert_eq!(p.next_tok_i, 2);
  assert_eq!(p.buf.len(), 2);
  assert_eq!(t.typ, TT::Equals);

  // In standard mode the slash lexes as an operator.
  let t = p.peek();
  assert_eq!(p.buf.len(), 3);
  assert_eq!(t.typ, TT::Slash);

  // Peeking with a different mode truncates the buffer and re-lexes from that position.
  let t = p.peek_with_mode(LexMode::SlashIsRegex);
  assert_eq!(p.next_tok_i, 2);
  assert_eq!(p.buf.len(), 3);
  assert_eq!(t.typ, TT::LiteralRegex);

  // Restoring a checkpoint rewinds the cursor while keeping buffered tokens.
  p.restore_checkpoint(cp);
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 3);
  let t = p.peek();
  assert_eq!(t.typ, TT::Identifier);
}
