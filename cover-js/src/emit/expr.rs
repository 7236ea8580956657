use super::emitter::Emitter;
use super::escape;
use crate::ast::kind::{LitValue, NodeKind, PropertyKind};
use crate::ast::{Ast, NodeId};
use crate::err::{CoverError, CoverResult};
use syntax_js::num::JsNumber;
use syntax_js::operator::{Associativity, OperatorName, OPERATORS};

/// Grammar restrictions on the first token of an expression, imposed by where
/// the expression sits.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Position {
  /// No restriction.
  Any,
  /// Start of an expression statement: a leading `{` or `function` would be
  /// parsed as a block or a declaration instead.
  Statement,
  /// Start of an arrow function's expression body: a leading `{` would be
  /// parsed as a block body.
  ArrowBody,
}

/// Writes one expression, parenthesizing when the expression binds looser
/// than its context requires, when the positional grammar demands it, or when
/// the source recorded explicit grouping. `position` travels down the leftmost
/// spine only; everything to the right of the first token is unrestricted.
pub fn emit_expr(
  out: &mut Emitter,
  ast: &Ast,
  id: NodeId,
  min_prec: u8,
  position: Position,
) -> CoverResult<()> {
  let wrap = is_parenthesized(ast, id)
    || precedence(ast, id) < min_prec
    || restricted_start(ast, id, position);
  if wrap {
    out.push("(");
    emit_operands(out, ast, id, Position::Any)?;
    out.push(")");
  } else {
    emit_operands(out, ast, id, position)?;
  };
  Ok(())
}

fn is_parenthesized(ast: &Ast, id: NodeId) -> bool {
  match ast.kind(id) {
    NodeKind::ArrowFunctionExpression { parenthesized, .. }
    | NodeKind::AssignmentExpression { parenthesized, .. }
    | NodeKind::BinaryExpression { parenthesized, .. }
    | NodeKind::FunctionExpression { parenthesized, .. }
    | NodeKind::LogicalExpression { parenthesized, .. }
    | NodeKind::SequenceExpression { parenthesized, .. } => *parenthesized,
    _ => false,
  }
}

fn restricted_start(ast: &Ast, id: NodeId, position: Position) -> bool {
  match position {
    Position::Any => false,
    Position::Statement => matches!(
      ast.kind(id),
      NodeKind::FunctionExpression { .. } | NodeKind::ObjectExpression { .. }
    ),
    Position::ArrowBody => matches!(ast.kind(id), NodeKind::ObjectExpression { .. }),
  }
}

fn precedence(ast: &Ast, id: NodeId) -> u8 {
  match ast.kind(id) {
    NodeKind::SequenceExpression { .. } => 1,
    NodeKind::ArrowFunctionExpression { .. }
    | NodeKind::AssignmentExpression { .. }
    | NodeKind::AssignmentPattern { .. }
    | NodeKind::RestElement { .. }
    | NodeKind::SpreadElement { .. } => 2,
    NodeKind::ConditionalExpression { .. } => 3,
    NodeKind::BinaryExpression { operator, .. }
    | NodeKind::LogicalExpression { operator, .. }
    | NodeKind::UpdateExpression { operator, .. } => OPERATORS[operator].precedence,
    NodeKind::AwaitExpression { .. } | NodeKind::UnaryExpression { .. } => 15,
    NodeKind::NewExpression { .. } => 17,
    NodeKind::CallExpression { .. }
    | NodeKind::ComputedMemberExpression { .. }
    | NodeKind::MemberExpression { .. } => 18,
    _ => 19,
  }
}

fn emit_operands(out: &mut Emitter, ast: &Ast, id: NodeId, position: Position) -> CoverResult<()> {
  match ast.kind(id) {
    NodeKind::ArrayExpression { elements } | NodeKind::ArrayPattern { elements } => {
      out.push("[");
      for (i, elem) in elements.iter().enumerate() {
        if i > 0 {
          out.push(",");
        };
        if let Some(elem) = elem {
          emit_expr(out, ast, *elem, 2, Position::Any)?;
        };
      }
      // A trailing hole only survives reparsing with its comma doubled:
      // `[a,]` is one element but `[a,,]` is two.
      if matches!(elements.last(), Some(None)) {
        out.push(",");
      };
      out.push("]");
      Ok(())
    }
    NodeKind::ArrowFunctionExpression {
      async_,
      params,
      body,
      ..
    } => {
      if *async_ {
        out.push("async");
      };
      out.push("(");
      emit_params(out, ast, params)?;
      out.push(")");
      out.push("=>");
      match ast.kind(*body) {
        NodeKind::BlockStatement { .. } => super::emit_stmt(out, ast, *body),
        _ => emit_expr(out, ast, *body, 2, Position::ArrowBody),
      }
    }
    NodeKind::AssignmentExpression {
      operator,
      left,
      right,
      ..
    } => {
      emit_expr(out, ast, *left, 3, position)?;
      out.push(binary_operator_text(*operator)?);
      emit_expr(out, ast, *right, 2, Position::Any)
    }
    NodeKind::AssignmentPattern { left, right } => {
      emit_expr(out, ast, *left, 3, position)?;
      out.push("=");
      emit_expr(out, ast, *right, 2, Position::Any)
    }
    NodeKind::AwaitExpression { argument } => {
      out.push("await");
      emit_expr(out, ast, *argument, 15, Position::Any)
    }
    NodeKind::BinaryExpression {
      operator,
      left,
      right,
      ..
    }
    | NodeKind::LogicalExpression {
      operator,
      left,
      right,
      ..
    } => {
      let op = &OPERATORS[operator];
      let (left_min, right_min) = match op.associativity {
        Associativity::Left => (op.precedence, op.precedence + 1),
        Associativity::Right => (op.precedence + 1, op.precedence),
      };
      // `(-a) ** b`: the grammar forbids a unary base, and grouping parens
      // are not recorded on unaries, so force them back on here.
      if *operator == OperatorName::Exponentiation && unary_like(ast, *left) {
        out.push("(");
        emit_operands(out, ast, *left, Position::Any)?;
        out.push(")");
      } else {
        emit_expr(out, ast, *left, left_min, position)?;
      };
      out.push(binary_operator_text(*operator)?);
      emit_expr(out, ast, *right, right_min, Position::Any)
    }
    NodeKind::CallExpression { callee, arguments } => {
      emit_expr(out, ast, *callee, 18, position)?;
      out.push("(");
      emit_arguments(out, ast, arguments)?;
      out.push(")");
      Ok(())
    }
    NodeKind::ComputedMemberExpression { object, property } => {
      emit_expr(out, ast, *object, 18, position)?;
      out.push("[");
      emit_expr(out, ast, *property, 1, Position::Any)?;
      out.push("]");
      Ok(())
    }
    NodeKind::ConditionalExpression {
      test,
      consequent,
      alternate,
    } => {
      emit_expr(out, ast, *test, 4, position)?;
      out.push("?");
      emit_expr(out, ast, *consequent, 2, Position::Any)?;
      out.push(":");
      emit_expr(out, ast, *alternate, 2, Position::Any)
    }
    NodeKind::FunctionExpression {
      name,
      async_,
      generator,
      params,
      body,
      ..
    } => {
      if *async_ {
        out.push("async");
      };
      out.push("function");
      if *generator {
        out.push("*");
      };
      if let Some(name) = name {
        out.push(name);
      };
      out.push("(");
      emit_params(out, ast, params)?;
      out.push(")");
      super::emit_stmt(out, ast, *body)
    }
    NodeKind::Identifier { name } => {
      out.push(name);
      Ok(())
    }
    NodeKind::Literal { value } => {
      match value {
        LitValue::Bool(true) => out.push("true"),
        LitValue::Bool(false) => out.push("false"),
        LitValue::Null => out.push("null"),
        LitValue::Num(n) => out.push(&number_text(*n)),
        LitValue::Regex(raw) => out.push(raw),
        LitValue::Str(value) => out.push(&escape::single_quoted(value)),
      };
      Ok(())
    }
    NodeKind::MemberExpression { object, property } => {
      emit_expr(out, ast, *object, 18, position)?;
      // `1.toFixed` would lex the dot into the number; `1..toFixed` parses.
      if int_literal(ast, *object) {
        out.push(".");
      };
      out.push(".");
      out.push(property);
      Ok(())
    }
    NodeKind::NewExpression { callee, arguments } => {
      out.push("new");
      emit_expr(out, ast, *callee, 18, Position::Any)?;
      if let Some(arguments) = arguments {
        out.push("(");
        emit_arguments(out, ast, arguments)?;
        out.push(")");
      };
      Ok(())
    }
    NodeKind::ObjectExpression { properties } | NodeKind::ObjectPattern { properties } => {
      out.push("{");
      for (i, prop) in properties.iter().enumerate() {
        if i > 0 {
          out.push(",");
        };
        emit_expr(out, ast, *prop, 0, Position::Any)?;
      }
      out.push("}");
      Ok(())
    }
    NodeKind::Property {
      key,
      computed,
      kind: PropertyKind::Init,
      value,
    } => {
      emit_property_key(out, ast, *key, *computed)?;
      if let Some(value) = value {
        out.push(":");
        emit_expr(out, ast, *value, 2, Position::Any)?;
      };
      Ok(())
    }
    NodeKind::Property {
      key,
      computed,
      kind,
      value: Some(value),
    } => emit_method(out, ast, *key, *computed, false, *kind, *value),
    NodeKind::RestElement { argument } | NodeKind::SpreadElement { argument } => {
      out.push("...");
      emit_expr(out, ast, *argument, 2, Position::Any)
    }
    NodeKind::SequenceExpression { expressions, .. } => {
      for (i, expr) in expressions.iter().enumerate() {
        if i > 0 {
          out.push(",");
        };
        let position = if i == 0 { position } else { Position::Any };
        emit_expr(out, ast, *expr, 2, position)?;
      }
      Ok(())
    }
    NodeKind::Super => {
      out.push("super");
      Ok(())
    }
    NodeKind::TemplateLiteral {
      quasis,
      expressions,
    } => {
      out.push("`");
      for (i, quasi) in quasis.iter().enumerate() {
        let NodeKind::TemplateElement { raw } = ast.kind(*quasi) else {
          return Err(CoverError::Render("template quasi"));
        };
        out.push_verbatim(raw);
        if let Some(expr) = expressions.get(i) {
          out.push_verbatim("${");
          emit_expr(out, ast, *expr, 1, Position::Any)?;
          out.push("}");
        };
      }
      out.push_verbatim("`");
      Ok(())
    }
    NodeKind::ThisExpression => {
      out.push("this");
      Ok(())
    }
    NodeKind::UnaryExpression { operator, argument } => {
      out.push(unary_operator_text(*operator)?);
      emit_expr(out, ast, *argument, 15, Position::Any)
    }
    NodeKind::UpdateExpression { operator, argument } => match operator {
      OperatorName::PrefixDecrement => {
        out.push("--");
        emit_expr(out, ast, *argument, 15, Position::Any)
      }
      OperatorName::PrefixIncrement => {
        out.push("++");
        emit_expr(out, ast, *argument, 15, Position::Any)
      }
      OperatorName::PostfixDecrement => {
        emit_expr(out, ast, *argument, 16, position)?;
        out.push("--");
        Ok(())
      }
      OperatorName::PostfixIncrement => {
        emit_expr(out, ast, *argument, 16, position)?;
        out.push("++");
        Ok(())
      }
      _ => Err(CoverError::Render("update operator")),
    },
    _ => Err(CoverError::Render(ast.kind(id).name())),
  }
}

pub(super) fn emit_params(out: &mut Emitter, ast: &Ast, params: &[NodeId]) -> CoverResult<()> {
  for (i, param) in params.iter().enumerate() {
    if i > 0 {
      out.push(",");
    };
    emit_expr(out, ast, *param, 2, Position::Any)?;
  }
  Ok(())
}

fn emit_arguments(out: &mut Emitter, ast: &Ast, arguments: &[NodeId]) -> CoverResult<()> {
  for (i, arg) in arguments.iter().enumerate() {
    if i > 0 {
      out.push(",");
    };
    emit_expr(out, ast, *arg, 2, Position::Any)?;
  }
  Ok(())
}

pub(super) fn emit_property_key(
  out: &mut Emitter,
  ast: &Ast,
  key: NodeId,
  computed: bool,
) -> CoverResult<()> {
  if computed {
    out.push("[");
    emit_expr(out, ast, key, 1, Position::Any)?;
    out.push("]");
  } else {
    match ast.kind(key) {
      NodeKind::Identifier { name } => out.push(name),
      NodeKind::Literal {
        value: LitValue::Str(value),
      } => out.push(&escape::single_quoted(value)),
      NodeKind::Literal {
        value: LitValue::Num(n),
      } => out.push(&number_text(*n)),
      _ => return Err(CoverError::Render("property key")),
    };
  };
  Ok(())
}

/// Writes a getter, setter, or method. `value` must hold the underlying
/// function expression; the `function` keyword itself is never written.
pub(super) fn emit_method(
  out: &mut Emitter,
  ast: &Ast,
  key: NodeId,
  computed: bool,
  static_: bool,
  kind: PropertyKind,
  value: NodeId,
) -> CoverResult<()> {
  let NodeKind::FunctionExpression {
    async_,
    generator,
    params,
    body,
    ..
  } = ast.kind(value)
  else {
    return Err(CoverError::Render("method value"));
  };
  if static_ {
    out.push("static");
  };
  match kind {
    PropertyKind::Get => out.push("get"),
    PropertyKind::Set => out.push("set"),
    PropertyKind::Method => {
      if *async_ {
        out.push("async");
      };
      if *generator {
        out.push("*");
      };
    }
    PropertyKind::Init => return Err(CoverError::Render("method kind")),
  };
  emit_property_key(out, ast, key, computed)?;
  out.push("(");
  emit_params(out, ast, params)?;
  out.push(")");
  super::emit_stmt(out, ast, *body)
}

fn unary_like(ast: &Ast, id: NodeId) -> bool {
  matches!(
    ast.kind(id),
    NodeKind::AwaitExpression { .. }
      | NodeKind::UnaryExpression { .. }
      | NodeKind::UpdateExpression { .. }
  )
}

// Whole numbers whose text would swallow a following member dot.
fn int_literal(ast: &Ast, id: NodeId) -> bool {
  match ast.kind(id) {
    NodeKind::Literal {
      value: LitValue::Num(n),
    } => number_text(*n).bytes().all(|b| b.is_ascii_digit()),
    _ => false,
  }
}

pub(super) fn number_text(n: JsNumber) -> String {
  if n.0.is_infinite() {
    // `1e999` overflows to infinity; no literal can spell it, but the
    // global names the same value.
    return if n.0 < 0.0 {
      "-Infinity".to_string()
    } else {
      "Infinity".to_string()
    };
  };
  n.0.to_string()
}

fn unary_operator_text(op: OperatorName) -> CoverResult<&'static str> {
  Ok(match op {
    OperatorName::BitwiseNot => "~",
    OperatorName::Delete => "delete",
    OperatorName::LogicalNot => "!",
    OperatorName::Typeof => "typeof",
    OperatorName::UnaryNegation => "-",
    OperatorName::UnaryPlus => "+",
    OperatorName::Void => "void",
    _ => return Err(CoverError::Render("unary operator")),
  })
}

fn binary_operator_text(op: OperatorName) -> CoverResult<&'static str> {
  Ok(match op {
    OperatorName::Addition => "+",
    OperatorName::Assignment => "=",
    OperatorName::AssignmentAddition => "+=",
    OperatorName::AssignmentBitwiseAnd => "&=",
    OperatorName::AssignmentBitwiseLeftShift => "<<=",
    OperatorName::AssignmentBitwiseOr => "|=",
    OperatorName::AssignmentBitwiseRightShift => ">>=",
    OperatorName::AssignmentBitwiseUnsignedRightShift => ">>>=",
    OperatorName::AssignmentBitwiseXor => "^=",
    OperatorName::AssignmentDivision => "/=",
    OperatorName::AssignmentExponentiation => "**=",
    OperatorName::AssignmentMultiplication => "*=",
    OperatorName::AssignmentRemainder => "%=",
    OperatorName::AssignmentSubtraction => "-=",
    OperatorName::BitwiseAnd => "&",
    OperatorName::BitwiseLeftShift => "<<",
    OperatorName::BitwiseOr => "|",
    OperatorName::BitwiseRightShift => ">>",
    OperatorName::BitwiseUnsignedRightShift => ">>>",
    OperatorName::BitwiseXor => "^",
    OperatorName::Division => "/",
    OperatorName::Equality => "==",
    OperatorName::Exponentiation => "**",
    OperatorName::GreaterThan => ">",
    OperatorName::GreaterThanOrEqual => ">=",
    OperatorName::In => "in",
    OperatorName::Inequality => "!=",
    OperatorName::Instanceof => "instanceof",
    OperatorName::LessThan => "<",
    OperatorName::LessThanOrEqual => "<=",
    OperatorName::LogicalAnd => "&&",
    OperatorName::LogicalOr => "||",
    OperatorName::Multiplication => "*",
    OperatorName::Remainder => "%",
    OperatorName::StrictEquality => "===",
    OperatorName::StrictInequality => "!==",
    OperatorName::Subtraction => "-",
    _ => return Err(CoverError::Render("binary operator")),
  })
}

#[cfg(test)]
mod tests {
  use super::number_text;
  use syntax_js::num::JsNumber;

  #[test]
  fn numbers_render_positionally() {
    assert_eq!(number_text(JsNumber(16.0)), "16");
    assert_eq!(number_text(JsNumber(0.5)), "0.5");
    assert_eq!(number_text(JsNumber(1e21)), "1000000000000000000000");
  }

  #[test]
  fn overflowed_literals_become_the_global() {
    assert_eq!(number_text(JsNumber(f64::INFINITY)), "Infinity");
  }
}
