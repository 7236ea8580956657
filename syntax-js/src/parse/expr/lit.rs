use super::pat::is_valid_pattern_identifier;
use super::Asi;
use super::ParseCtx;
use super::Parser;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitBoolExpr;
use crate::ast::expr::lit::LitNullExpr;
use crate::ast::expr::lit::LitNumExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::lit::LitRegexExpr;
use crate::ast::expr::lit::LitStrExpr;
use crate::ast::expr::lit::LitTemplateExpr;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::IdExpr;
use crate::ast::node::Node;
use crate::char::is_line_terminator;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::num::JsNumber;
use crate::token::TT;

pub fn normalise_literal_number(raw: &str) -> Option<JsNumber> {
  JsNumber::from_literal(raw)
}

#[derive(Clone, Copy, Debug)]
enum LiteralErrorKind {
  InvalidEscape,
  UnexpectedEnd,
  LineTerminator,
}

#[derive(Clone, Copy, Debug)]
struct LiteralError {
  kind: LiteralErrorKind,
  offset: usize,
  len: usize,
}

// Decodes the escape sequence after a backslash, returning the consumed byte length and the
// decoded character (None for line continuations).
fn decode_escape_sequence(
  raw: &str,
  escape_start: usize,
) -> Result<(usize, Option<char>), LiteralError> {
  let mut chars = raw.chars();
  let Some(first) = chars.next() else {
    return Err(LiteralError {
      kind: LiteralErrorKind::UnexpectedEnd,
      offset: escape_start,
      len: 0,
    });
  };
  match first {
    '\r' => {
      let mut consumed = first.len_utf8();
      if raw[first.len_utf8()..].starts_with('\n') {
        consumed += '\n'.len_utf8();
      }
      Ok((consumed, None))
    }
    '\n' | '\u{2028}' | '\u{2029}' => Ok((first.len_utf8(), None)),
    'b' => Ok((1, Some('\x08'))),
    'f' => Ok((1, Some('\x0c'))),
    'n' => Ok((1, Some('\n'))),
    'r' => Ok((1, Some('\r'))),
    't' => Ok((1, Some('\t'))),
    'v' => Ok((1, Some('\x0b'))),
    '0'..='7' => {
      let mut consumed = first.len_utf8();
      let mut value = first.to_digit(8).unwrap();
      for ch in raw[consumed..].chars().take(2) {
        if ('0'..='7').contains(&ch) {
          consumed += ch.len_utf8();
          value = (value << 3) + ch.to_digit(8).unwrap();
        } else {
          break;
        }
      }
      let Some(c) = char::from_u32(value) else {
        return Err(LiteralError {
          kind: LiteralErrorKind::InvalidEscape,
          offset: escape_start,
          len: 1,
        });
      };
      Ok((consumed, Some(c)))
    }
    'x' => {
      let mut hex_iter = raw[first.len_utf8()..].chars();
      let Some(h1) = hex_iter.next() else {
        return Err(LiteralError {
          kind: LiteralErrorKind::UnexpectedEnd,
          offset: escape_start,
          len: 0,
        });
      };
      let Some(h2) = hex_iter.next() else {
        return Err(LiteralError {
          kind: LiteralErrorKind::UnexpectedEnd,
          offset: escape_start,
          len: 0,
        });
      };
      if !h1.is_ascii_hexdigit() || !h2.is_ascii_hexdigit() {
        return Err(LiteralError {
          kind: LiteralErrorKind::InvalidEscape,
          offset: escape_start,
          len: 1,
        });
      }
      let cp = (h1.to_digit(16).unwrap() << 4) + h2.to_digit(16).unwrap();
      let Some(c) = char::from_u32(cp) else {
        return Err(LiteralError {
          kind: LiteralErrorKind::InvalidEscape,
          offset: escape_start,
          len: 1,
        });
      };
      let consumed = first.len_utf8() + h1.len_utf8() + h2.len_utf8();
      Ok((consumed, Some(c)))
    }
    'u' => {
      let after_u = &raw[first.len_utf8()..];
      if after_u.starts_with('{') {
        let Some(end) = after_u.find('}') else {
          return Err(LiteralError {
            kind: LiteralErrorKind::UnexpectedEnd,
            offset: escape_start,
            len: 0,
          });
        };
        let hex = &after_u[1..end];
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
          return Err(LiteralError {
            kind: LiteralErrorKind::InvalidEscape,
            offset: escape_start,
            len: 1,
          });
        }
        let value = u32::from_str_radix(hex, 16).ok().ok_or(LiteralError {
          kind: LiteralErrorKind::InvalidEscape,
          offset: escape_start,
          len: 1,
        })?;
        if value > 0x10FFFF {
          return Err(LiteralError {
            kind: LiteralErrorKind::InvalidEscape,
            offset: escape_start,
            len: 1,
          });
        }
        // JavaScript strings are UTF-16; map lone surrogate code points to U+FFFD so we can
        // represent them in Rust strings.
        let cp = char::from_u32(value).unwrap_or('\u{FFFD}');
        let consumed = first.len_utf8() + end + 1;
        Ok((consumed, Some(cp)))
      } else {
        let mut hex = String::new();
        let mut consumed = first.len_utf8();
        for ch in after_u.chars().take(4) {
          hex.push(ch);
          consumed += ch.len_utf8();
        }
        if hex.len() < 4 {
          return Err(LiteralError {
            kind: LiteralErrorKind::UnexpectedEnd,
            offset: escape_start,
            len: 0,
          });
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
          return Err(LiteralError {
            kind: LiteralErrorKind::InvalidEscape,
            offset: escape_start,
            len: 1,
          });
        }
        let value = u32::from_str_radix(&hex, 16).ok().ok_or(LiteralError {
          kind: LiteralErrorKind::InvalidEscape,
          offset: escape_start,
          len: 1,
        })?;
        // Combine surrogate pairs when possible so sequences like `😀` decode to a
        // valid Unicode scalar.
        if (0xD800..=0xDBFF).contains(&value) {
          let rest = &after_u[4..];
          if rest.starts_with("\\u") {
            if let Some(low_hex) = rest.get(2..6) {
              if low_hex.chars().all(|c| c.is_ascii_hexdigit()) {
                let low = u32::from_str_radix(low_hex, 16).unwrap_or(0);
                if (0xDC00..=0xDFFF).contains(&low) {
                  let high_ten = (value - 0xD800) << 10;
                  let low_ten = low - 0xDC00;
                  let combined = 0x10000 + high_ten + low_ten;
                  if let Some(cp) = char::from_u32(combined) {
                    return Ok((consumed + 6, Some(cp)));
                  }
                }
              }
            }
          }
        }
        let cp = char::from_u32(value).unwrap_or('\u{FFFD}');
        Ok((consumed, Some(cp)))
      }
    }
    c => Ok((c.len_utf8(), Some(c))),
  }
}

fn decode_literal(raw: &str, allow_line_terminators: bool) -> Result<String, LiteralError> {
  let mut norm = String::new();
  let mut offset = 0;
  while offset < raw.len() {
    let mut iter = raw[offset..].chars();
    let ch = iter.next().unwrap();
    if ch == '\\' {
      let escape_start = offset;
      let after_backslash = offset + ch.len_utf8();
      let (consumed, addition) = decode_escape_sequence(&raw[after_backslash..], escape_start)?;
      if let Some(c) = addition {
        norm.push(c);
      }
      offset = after_backslash + consumed;
    } else {
      // ECMAScript 2019 permits U+2028/U+2029 (line/paragraph separators) in string literals;
      // only CR/LF terminate literal lines.
      if !allow_line_terminators && matches!(ch, '\n' | '\r') {
        return Err(LiteralError {
          kind: LiteralErrorKind::LineTerminator,
          offset,
          len: ch.len_utf8(),
        });
      }
      norm.push(ch);
      offset += ch.len_utf8();
    }
  }
  Ok(norm)
}

fn literal_error_to_syntax(
  err: LiteralError,
  base: usize,
  token: TT,
  line_error: SyntaxErrorType,
) -> SyntaxError {
  let typ = match err.kind {
    LiteralErrorKind::InvalidEscape => SyntaxErrorType::InvalidCharacterEscape,
    LiteralErrorKind::UnexpectedEnd => SyntaxErrorType::UnexpectedEnd,
    LiteralErrorKind::LineTerminator => line_error,
  };
  let start = base + err.offset;
  let end = start + err.len;
  Loc(start, end).error(typ, Some(token))
}

// Slices the raw quasi content out of a template part token, without the backtick/`${`/`}`
// delimiters.
fn template_content(raw: &str, is_end: bool) -> Option<(usize, &str)> {
  let mut start = 0;
  let mut end = raw.len();
  if raw.starts_with('`') && raw.len() > '`'.len_utf8() {
    start += '`'.len_utf8();
  }
  if is_end {
    if !raw.ends_with('`') {
      return None;
    }
    end = end.saturating_sub('`'.len_utf8());
  } else {
    if !raw.ends_with("${") {
      return None;
    }
    end = end.saturating_sub("${".len());
  }
  if end < start {
    return None;
  }
  raw.get(start..end).map(|body| (start, body))
}

#[derive(Debug)]
enum RegexErrorKind {
  LineTerminator,
  Unterminated,
  InvalidFlag,
  DuplicateFlag,
}

#[derive(Debug)]
struct RegexError {
  kind: RegexErrorKind,
  offset: usize,
  len: usize,
}

fn validate_regex_flags(raw: &str, start: usize) -> Result<(), RegexError> {
  let mut seen_flags: u16 = 0;
  for (offset, ch) in raw[start..].char_indices() {
    let bit = match ch {
      'd' => 1 << 0,
      'g' => 1 << 1,
      'i' => 1 << 2,
      'm' => 1 << 3,
      's' => 1 << 4,
      'u' => 1 << 5,
      'v' => 1 << 6,
      'y' => 1 << 7,
      _ => {
        return Err(RegexError {
          kind: RegexErrorKind::InvalidFlag,
          offset: start + offset,
          len: ch.len_utf8(),
        })
      }
    };
    if seen_flags & bit != 0 {
      return Err(RegexError {
        kind: RegexErrorKind::DuplicateFlag,
        offset: start + offset,
        len: ch.len_utf8(),
      });
    }
    seen_flags |= bit;
  }
  Ok(())
}

fn validate_regex_literal(raw: &str) -> Result<(), RegexError> {
  let mut offset = '/'.len_utf8();
  let mut in_charset = false;
  while offset < raw.len() {
    let mut iter = raw[offset..].chars();
    let ch = iter.next().unwrap();
    if ch == '\\' {
      let after_backslash = offset + ch.len_utf8();
      let Some(escaped) = raw[after_backslash..].chars().next() else {
        return Err(RegexError {
          kind: RegexErrorKind::Unterminated,
          offset: after_backslash,
          len: 0,
        });
      };
      offset = after_backslash + escaped.len_utf8();
      continue;
    }
    if !in_charset && ch == '/' {
      let flags_start = offset + ch.len_utf8();
      return validate_regex_flags(raw, flags_start);
    }
    if ch == '[' {
      in_charset = true;
    } else if ch == ']' && in_charset {
      in_charset = false;
    } else if is_line_terminator(ch) {
      return Err(RegexError {
        kind: RegexErrorKind::LineTerminator,
        offset,
        len: ch.len_utf8(),
      });
    }
    offset += ch.len_utf8();
  }
  Err(RegexError {
    kind: RegexErrorKind::Unterminated,
    offset: raw.len(),
    len: 0,
  })
}

fn regex_error_to_syntax(err: RegexError, token_start: usize) -> SyntaxError {
  let typ = match err.kind {
    RegexErrorKind::LineTerminator => SyntaxErrorType::LineTerminatorInRegex,
    RegexErrorKind::Unterminated => SyntaxErrorType::UnexpectedEnd,
    RegexErrorKind::InvalidFlag | RegexErrorKind::DuplicateFlag => {
      SyntaxErrorType::ExpectedSyntax("valid regex flags")
    }
  };
  let start = token_start + err.offset;
  let end = start + err.len;
  Loc(start, end).error(typ, Some(TT::LiteralRegex))
}

impl<'a> Parser<'a> {
  pub fn lit_arr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitArrExpr>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::<LitArrElem>::new();
      loop {
        if p.consume_if(TT::Comma).is_match() {
          elements.push(LitArrElem::Empty);
          continue;
        };
        if p.peek().typ == TT::BracketClose {
          break;
        };
        let rest = p.consume_if(TT::DotDotDot).is_match();
        let value = p.expr(ctx, [TT::Comma, TT::BracketClose])?;
        elements.push(if rest {
          LitArrElem::Rest(value)
        } else {
          LitArrElem::Single(value)
        });
        if p.peek().typ == TT::BracketClose {
          break;
        };
        p.require(TT::Comma)?;
      }
      p.require(TT::BracketClose)?;
      Ok(LitArrExpr { elements })
    })
  }

  pub fn lit_bool(&mut self) -> SyntaxResult<Node<LitBoolExpr>> {
    self.with_loc(|p| {
      if p.consume_if(TT::LiteralTrue).is_match() {
        Ok(LitBoolExpr { value: true })
      } else {
        p.require(TT::LiteralFalse)?;
        Ok(LitBoolExpr { value: false })
      }
    })
  }

  pub fn lit_null(&mut self) -> SyntaxResult<Node<LitNullExpr>> {
    self.with_loc(|p| {
      p.require(TT::LiteralNull)?;
      Ok(LitNullExpr {})
    })
  }

  pub fn lit_num(&mut self) -> SyntaxResult<Node<LitNumExpr>> {
    self.with_loc(|p| {
      let value = p.lit_num_val()?;
      Ok(LitNumExpr { value })
    })
  }

  pub fn lit_num_val(&mut self) -> SyntaxResult<JsNumber> {
    let t = self.require(TT::LiteralNumber)?;
    normalise_literal_number(self.str(t.loc))
      .ok_or_else(|| t.loc.error(SyntaxErrorType::MalformedLiteralNumber, None))
  }

  pub fn lit_obj(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitObjExpr>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut members = Vec::new();
      while p.peek().typ != TT::BraceClose && p.peek().typ != TT::EOF {
        let member_start = p.peek().loc;
        if p.consume_if(TT::DotDotDot).is_match() {
          let value = p.expr(ctx, [TT::Comma, TT::BraceClose])?;
          members.push(Node::new(member_start, ObjMember {
            typ: ObjMemberType::Rest { val: value },
          }));
        } else {
          let (key, value) = p.class_or_obj_member(ctx, TT::Colon, TT::Comma, &mut Asi::no())?;
          let typ = match value {
            ClassOrObjVal::Prop(None) => {
              // This property had no value, so it's a shorthand property. Therefore, check that
              // it's a valid identifier name.
              match key {
                ClassOrObjKey::Computed(expr) => {
                  return Err(expr.error(SyntaxErrorType::ExpectedSyntax("object literal value")));
                }
                ClassOrObjKey::Direct(direct_key) => {
                  if !is_valid_pattern_identifier(direct_key.stx.tt, ctx.rules) {
                    return Err(direct_key.error(SyntaxErrorType::ExpectedSyntax("identifier")));
                  }
                  ObjMemberType::Shorthand {
                    id: direct_key.map_stx(|n| IdExpr { name: n.key }),
                  }
                }
              }
            }
            _ => ObjMemberType::Valued { key, val: value },
          };
          members.push(Node::new(member_start, ObjMember { typ }));
        }
        if p.consume_if(TT::Comma).is_match() {
          continue;
        }
        if p.peek().typ == TT::BraceClose {
          break;
        }
        return Err(p.peek().error(SyntaxErrorType::ExpectedSyntax("`,`")));
      }
      p.require(TT::BraceClose)?;
      Ok(LitObjExpr { members })
    })
  }

  pub fn lit_regex(&mut self) -> SyntaxResult<Node<LitRegexExpr>> {
    self.with_loc(|p| {
      let t = match p.peek_with_mode(LexMode::SlashIsRegex).typ {
        TT::LiteralRegex | TT::Invalid => p.consume_with_mode(LexMode::SlashIsRegex),
        _ => p.require_with_mode(TT::LiteralRegex, LexMode::SlashIsRegex)?,
      };
      let value = p.string(t.loc);
      validate_regex_literal(&value).map_err(|err| regex_error_to_syntax(err, t.loc.0))?;
      Ok(LitRegexExpr { value })
    })
  }

  pub fn lit_str(&mut self) -> SyntaxResult<Node<LitStrExpr>> {
    self.with_loc(|p| {
      let value = p.lit_str_val()?;
      Ok(LitStrExpr { value })
    })
  }

  /// Parses a literal string and returns its value with escapes decoded.
  /// Does *not* return a node; use `lit_str` for that.
  pub fn lit_str_val(&mut self) -> SyntaxResult<String> {
    let peek = self.peek();
    let t = if matches!(peek.typ, TT::LiteralString | TT::Invalid)
      && self
        .str(peek.loc)
        .starts_with(|c: char| c == '"' || c == '\'')
    {
      self.consume()
    } else {
      self.require(TT::LiteralString)?
    };
    let raw = self.str(t.loc);
    let quote = raw
      .chars()
      .next()
      .ok_or_else(|| t.error(SyntaxErrorType::UnexpectedEnd))?;
    let has_closing = raw.len() > quote.len_utf8() && raw.ends_with(quote);
    let body_start = t.loc.0 + quote.len_utf8();
    let body_end = if has_closing {
      t.loc.1.saturating_sub(quote.len_utf8())
    } else {
      t.loc.1
    };
    let body = self.str(Loc(body_start, body_end));
    let decoded = decode_literal(body, false).map_err(|err| {
      literal_error_to_syntax(
        err,
        body_start,
        TT::LiteralString,
        SyntaxErrorType::LineTerminatorInString,
      )
    })?;
    if !has_closing {
      return Err(
        Loc(body_end, body_end).error(SyntaxErrorType::UnexpectedEnd, Some(TT::LiteralString)),
      );
    }
    Ok(decoded)
  }

  pub fn lit_template(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LitTemplateExpr>> {
    let start = self.checkpoint();
    let parts = self.lit_template_parts(ctx)?;
    let loc = self.since_checkpoint(&start);
    Ok(Node::new(loc, LitTemplateExpr { parts }))
  }

  // NOTE: The next token must definitely be LiteralTemplatePartString{,End}.
  // Quasis are kept as raw source text, escape sequences included.
  pub fn lit_template_parts(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<LitTemplatePart>> {
    let t = self.consume();
    let is_end = match t.typ {
      TT::LiteralTemplatePartString => false,
      TT::LiteralTemplatePartStringEnd => true,
      TT::Invalid => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("template string part"))),
    };

    let mut parts = Vec::new();
    let raw = self.str(t.loc);
    let (_, first_content) =
      template_content(raw, is_end).ok_or_else(|| t.error(SyntaxErrorType::UnexpectedEnd))?;
    parts.push(LitTemplatePart::String(first_content.to_string()));
    if !is_end {
      loop {
        let substitution = self.expr(ctx, [TT::BraceClose])?;
        self.require(TT::BraceClose)?;
        parts.push(LitTemplatePart::Substitution(substitution));
        let string = self.consume_with_mode(LexMode::TemplateStrContinue);
        let string_is_end = match string.typ {
          TT::LiteralTemplatePartString => false,
          TT::LiteralTemplatePartStringEnd => true,
          TT::Invalid => {
            return Err(Loc(string.loc.1, string.loc.1).error(
              SyntaxErrorType::UnexpectedEnd,
              Some(TT::LiteralTemplatePartString),
            ))
          }
          _ => {
            return Err(string.error(SyntaxErrorType::ExpectedSyntax("template string part")));
          }
        };
        let raw = self.str(string.loc);
        let (_, content) = template_content(raw, string_is_end)
          .ok_or_else(|| string.error(SyntaxErrorType::UnexpectedEnd))?;
        parts.push(LitTemplatePart::String(content.to_string()));
        if string_is_end {
          break;
        };
      }
    };

    Ok(parts)
  }
}
