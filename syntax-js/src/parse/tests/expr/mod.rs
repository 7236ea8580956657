use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::Expr;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::lex::Lexer;
use crate::operator::OperatorName;
use crate::parse::expr::pat::ParsePatternRules;
use crate::parse::ParseCtx;
use crate::parse::Parser;
use crate::token::TT;
use serde_json::json;

fn parse_expr_with_rules(input: &str, rules: ParsePatternRules) -> Node<Expr> {
  let mut parser = Parser::new(Lexer::new(input));
  let ctx = ParseCtx { rules };
  parser.expr(ctx, [TT::Semicolon]).unwrap()
}

fn parse_expr(input: &str) -> Node<Expr> {
  parse_expr_with_rules(input, ParsePatternRules {
    await_allowed: true,
    yield_allowed: true,
  })
}

#[test]
fn parses_binary_operators_by_precedence() {
  let expr = parse_expr("1 + 2 * 3;");
  match *expr.stx {
    Expr::Binary(ref add) => {
      assert_eq!(add.stx.operator, OperatorName::Addition);
      match *add.stx.right.stx {
        Expr::Binary(ref mul) => assert_eq!(mul.stx.operator, OperatorName::Multiplication),
        ref other => panic!("expected multiplication on the right, got {:?}", other),
      }
    }
    ref other => panic!("expected binary expression, got {:?}", other),
  }
}

#[test]
fn parses_exponentiation_right_associatively() {
  let expr = parse_expr("a ** b ** c;");
  match *expr.stx {
    Expr::Binary(ref outer) => {
      assert_eq!(outer.stx.operator, OperatorName::Exponentiation);
      match *outer.stx.right.stx {
        Expr::Binary(ref inner) => assert_eq!(inner.stx.operator, OperatorName::Exponentiation),
        ref other => panic!("expected exponentiation on the right, got {:?}", other),
      }
    }
    ref other => panic!("expected binary expression, got {:?}", other),
  }
}

#[test]
fn serializes_member_call() {
  let expr = parse_expr("a.b(c);");
  assert_eq!(
    serde_json::to_value(&expr).unwrap(),
    json!({
      "$t": "Call",
      "callee": {
        "$t": "Member",
        "left": { "$t": "Id", "name": "a" },
        "right": "b",
      },
      "arguments": [
        { "spread": false, "value": { "$t": "Id", "name": "c" } },
      ],
    })
  );
}

#[test]
fn parses_computed_member_access() {
  let expr = parse_expr("a[b + 1];");
  match *expr.stx {
    Expr::ComputedMember(ref member) => match *member.stx.member.stx {
      Expr::Binary(_) => {}
      ref other => panic!("expected binary member expression, got {:?}", other),
    },
    ref other => panic!("expected computed member access, got {:?}", other),
  }
}

#[test]
fn parses_conditional_with_assignment_alternate() {
  let expr = parse_expr("a ? b : c = d;");
  match *expr.stx {
    Expr::Cond(ref cond) => match *cond.stx.alternate.stx {
      Expr::Binary(ref assign) => assert_eq!(assign.stx.operator, OperatorName::Assignment),
      ref other => panic!("expected assignment alternate, got {:?}", other),
    },
    ref other => panic!("expected conditional, got {:?}", other),
  }
}

#[test]
fn converts_assignment_target_to_pattern() {
  let expr = parse_expr("[a, ...b] = c;");
  match *expr.stx {
    Expr::Binary(ref assign) => {
      assert_eq!(assign.stx.operator, OperatorName::Assignment);
      match *assign.stx.left.stx {
        Expr::ArrPat(ref pat) => {
          assert_eq!(pat.stx.elements.len(), 1);
          assert!(pat.stx.rest.is_some());
        }
        ref other => panic!("expected array pattern, got {:?}", other),
      }
    }
    ref other => panic!("expected assignment, got {:?}", other),
  }
}

#[test]
fn rejects_compound_assignment_to_pattern() {
  let mut parser = Parser::new(Lexer::new("[a] += b;"));
  let ctx = ParseCtx {
    rules: ParsePatternRules {
      await_allowed: true,
      yield_allowed: true,
    },
  };
  assert!(parser.expr(ctx, [TT::Semicolon]).is_err());
}

#[test]
fn parses_unparenthesised_arrow_function() {
  let expr = parse_expr("x => x + 1;");
  match *expr.stx {
    Expr::ArrowFunc(ref arrow) => {
      assert!(!arrow.stx.parenthesized);
      let func = &arrow.stx.func;
      assert!(func.stx.arrow);
      assert!(!func.stx.async_);
      assert_eq!(func.stx.parameters.len(), 1);
      match func.stx.body {
        FuncBody::Expression(_) => {}
        ref other => panic!("expected expression body, got {:?}", other),
      }
    }
    ref other => panic!("expected arrow function, got {:?}", other),
  }
}

#[test]
fn parses_async_arrow_function() {
  let expr = parse_expr("async x => x;");
  match *expr.stx {
    Expr::ArrowFunc(ref arrow) => assert!(arrow.stx.func.stx.async_),
    ref other => panic!("expected arrow function, got {:?}", other),
  }
}

#[test]
fn parses_async_as_parameter_name() {
  let expr = parse_expr("async => 1;");
  match *expr.stx {
    Expr::ArrowFunc(ref arrow) => {
      let func = &arrow.stx.func;
      assert!(!func.stx.async_);
      assert_eq!(func.stx.parameters.len(), 1);
    }
    ref other => panic!("expected arrow function, got {:?}", other),
  }
}

#[test]
fn parses_grouping_as_parenthesized() {
  let expr = parse_expr("(a = b);");
  match *expr.stx {
    Expr::Binary(ref assign) => assert!(assign.stx.parenthesized),
    ref other => panic!("expected assignment, got {:?}", other),
  }
}

#[test]
fn parses_regex_literal_operand() {
  let expr = parse_expr("/ab+c/gi;");
  match *expr.stx {
    Expr::LitRegex(ref regex) => assert_eq!(regex.stx.value, "/ab+c/gi"),
    ref other => panic!("expected regex literal, got {:?}", other),
  }
}

#[test]
fn decodes_string_literal_escapes() {
  let expr = parse_expr("'it\\'s\\n';");
  match *expr.stx {
    Expr::LitStr(ref s) => assert_eq!(s.stx.value, "it's\n"),
    ref other => panic!("expected string literal, got {:?}", other),
  }
}

#[test]
fn parses_template_literal_parts_in_order() {
  let expr = parse_expr("`a${b}c${d}e`;");
  match *expr.stx {
    Expr::LitTemplate(ref template) => {
      let parts = &template.stx.parts;
      assert_eq!(parts.len(), 5);
      assert!(matches!(&parts[0], LitTemplatePart::String(s) if s == "a"));
      assert!(matches!(&parts[1], LitTemplatePart::Substitution(_)));
      assert!(matches!(&parts[2], LitTemplatePart::String(s) if s == "c"));
      assert!(matches!(&parts[3], LitTemplatePart::Substitution(_)));
      assert!(matches!(&parts[4], LitTemplatePart::String(s) if s == "e"));
    }
    ref other => panic!("expected template literal, got {:?}", other),
  }
}

#[test]
fn parses_tagged_template() {
  let expr = parse_expr("tag`a${b}`;");
  match *expr.stx {
    Expr::TaggedTemplate(ref tagged) => {
      match *tagged.stx.function.stx {
        Expr::Id(ref id) => assert_eq!(id.stx.name, "tag"),
        ref other => panic!("expected identifier tag, got {:?}", other),
      }
      // The trailing quasi is always present, even when empty.
      assert_eq!(tagged.stx.parts.len(), 3);
      assert!(matches!(&tagged.stx.parts[2], LitTemplatePart::String(s) if s.is_empty()));
    }
    ref other => panic!("expected tagged template, got {:?}", other),
  }
}

#[test]
fn parses_postfix_and_prefix_updates() {
  match *parse_expr("i++;").stx {
    Expr::UnaryPostfix(ref postfix) => {
      assert_eq!(postfix.stx.operator, OperatorName::PostfixIncrement)
    }
    ref other => panic!("expected postfix increment, got {:?}", other),
  }
  match *parse_expr("--i;").stx {
    Expr::Unary(ref prefix) => assert_eq!(prefix.stx.operator, OperatorName::PrefixDecrement),
    ref other => panic!("expected prefix decrement, got {:?}", other),
  }
}

#[test]
fn parses_yield_as_operator_only_in_generator_context() {
  let rules = ParsePatternRules {
    await_allowed: true,
    yield_allowed: false,
  };
  match *parse_expr_with_rules("yield a;", rules).stx {
    Expr::Unary(ref unary) => assert_eq!(unary.stx.operator, OperatorName::Yield),
    ref other => panic!("expected yield expression, got {:?}", other),
  }
  // Outside a generator, `yield` is an ordinary identifier.
  match *parse_expr("yield;").stx {
    Expr::Id(ref id) => assert_eq!(id.stx.name, "yield"),
    ref other => panic!("expected identifier, got {:?}", other),
  }
}

#[test]
fn parses_bare_yield_without_operand() {
  let rules = ParsePatternRules {
    await_allowed: true,
    yield_allowed: false,
  };
  match *parse_expr_with_rules("yield;", rules).stx {
    Expr::Unary(ref unary) => {
      assert_eq!(unary.stx.operator, OperatorName::Yield);
      match *unary.stx.argument.stx {
        Expr::Id(ref id) => assert_eq!(id.stx.name, "undefined"),
        ref other => panic!("expected implicit undefined operand, got {:?}", other),
      }
    }
    ref other => panic!("expected yield expression, got {:?}", other),
  }
}

#[test]
fn parses_object_literal_member_forms() {
  use crate::ast::class_or_object::{ClassOrObjVal, ObjMemberType};
  let expr = parse_expr("{a, b: 1, [c]: 2, d() {}, get e() {}, ...f};");
  match *expr.stx {
    Expr::LitObj(ref obj) => {
      let members = &obj.stx.members;
      assert_eq!(members.len(), 6);
      assert!(matches!(members[0].stx.typ, ObjMemberType::Shorthand { .. }));
      assert!(matches!(
        members[1].stx.typ,
        ObjMemberType::Valued {
          val: ClassOrObjVal::Prop(Some(_)),
          ..
        }
      ));
      assert!(matches!(
        members[3].stx.typ,
        ObjMemberType::Valued {
          val: ClassOrObjVal::Method(_),
          ..
        }
      ));
      assert!(matches!(
        members[4].stx.typ,
        ObjMemberType::Valued {
          val: ClassOrObjVal::Getter(_),
          ..
        }
      ));
      assert!(matches!(members[5].stx.typ, ObjMemberType::Rest { .. }));
    }
    ref other => panic!("expected object literal, got {:?}", other),
  }
}
