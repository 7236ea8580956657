use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::import_export::{ExportNames, ImportNames};
use crate::ast::node::Node;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::{ForInOfLhs, ForTripleStmtInit, Stmt};
use crate::error::SyntaxErrorType;
use crate::lex::Lexer;
use crate::parse::expr::pat::ParsePatternRules;
use crate::parse::ParseCtx;
use crate::parse::Parser;
use serde_json::json;

fn try_parse_stmt(input: &str) -> crate::error::SyntaxResult<Node<Stmt>> {
  let mut parser = Parser::new(Lexer::new(input));
  let ctx = ParseCtx {
    rules: ParsePatternRules {
      await_allowed: true,
      yield_allowed: true,
    },
  };
  parser.stmt(ctx)
}

fn parse_stmt(input: &str) -> Node<Stmt> {
  try_parse_stmt(input).unwrap()
}

#[test]
fn serializes_variable_declaration() {
  let stmt = parse_stmt("let a = 1;");
  assert_eq!(
    serde_json::to_value(&stmt).unwrap(),
    json!({
      "$t": "VarDecl",
      "export": false,
      "mode": "Let",
      "declarators": [
        {
          "pattern": { "pat": { "$t": "Id", "name": "a" } },
          "initializer": { "$t": "LitNum", "value": 1.0 },
        },
      ],
    })
  );
}

#[test]
fn parses_destructuring_declaration() {
  let stmt = parse_stmt("const {a, b: [c]} = d;");
  match *stmt.stx {
    Stmt::VarDecl(ref decl) => {
      assert_eq!(decl.stx.mode, VarDeclMode::Const);
      assert_eq!(decl.stx.declarators.len(), 1);
      let declarator = &decl.stx.declarators[0];
      assert!(declarator.initializer.is_some());
      match *declarator.pattern.stx.pat.stx {
        Pat::Obj(ref obj) => assert_eq!(obj.stx.properties.len(), 2),
        ref other => panic!("expected object pattern, got {:?}", other),
      }
    }
    ref other => panic!("expected variable declaration, got {:?}", other),
  }
}

#[test]
fn parses_multiple_declarators() {
  let stmt = parse_stmt("var a = 1, b;");
  match *stmt.stx {
    Stmt::VarDecl(ref decl) => {
      assert_eq!(decl.stx.declarators.len(), 2);
      assert!(decl.stx.declarators[0].initializer.is_some());
      assert!(decl.stx.declarators[1].initializer.is_none());
    }
    ref other => panic!("expected variable declaration, got {:?}", other),
  }
}

#[test]
fn binds_else_to_nearest_if() {
  let stmt = parse_stmt("if (a) if (b) c; else d;");
  match *stmt.stx {
    Stmt::If(ref outer) => {
      assert!(outer.stx.alternate.is_none());
      match *outer.stx.consequent.stx {
        Stmt::If(ref inner) => assert!(inner.stx.alternate.is_some()),
        ref other => panic!("expected nested if, got {:?}", other),
      }
    }
    ref other => panic!("expected if statement, got {:?}", other),
  }
}

#[test]
fn parses_for_triple() {
  let stmt = parse_stmt("for (let i = 0; i < 3; i++) {}");
  match *stmt.stx {
    Stmt::ForTriple(ref f) => {
      assert!(matches!(f.stx.init, ForTripleStmtInit::Decl(_)));
      assert!(f.stx.cond.is_some());
      assert!(f.stx.post.is_some());
    }
    ref other => panic!("expected for statement, got {:?}", other),
  }
}

#[test]
fn parses_for_in_declaration() {
  let stmt = parse_stmt("for (const k in o) {}");
  match *stmt.stx {
    Stmt::ForIn(ref f) => match f.stx.lhs {
      ForInOfLhs::Decl((mode, _)) => assert_eq!(mode, VarDeclMode::Const),
      ref other => panic!("expected declaration lhs, got {:?}", other),
    },
    ref other => panic!("expected for-in statement, got {:?}", other),
  }
}

#[test]
fn parses_for_of_with_pattern_assignment() {
  let stmt = parse_stmt("for ([a, b] of c) {}");
  match *stmt.stx {
    Stmt::ForOf(ref f) => {
      assert!(!f.stx.await_);
      match f.stx.lhs {
        ForInOfLhs::Assign(ref pat) => assert!(matches!(*pat.stx, Pat::Arr(_))),
        ref other => panic!("expected assignment lhs, got {:?}", other),
      }
    }
    ref other => panic!("expected for-of statement, got {:?}", other),
  }
}

#[test]
fn parses_for_await_of() {
  let stmt = parse_stmt("for await (const x of xs) {}");
  match *stmt.stx {
    Stmt::ForOf(ref f) => assert!(f.stx.await_),
    ref other => panic!("expected for-of statement, got {:?}", other),
  }
}

#[test]
fn do_while_owns_its_trailing_semicolon() {
  let top = crate::parse("do a; while (b); c;").unwrap();
  assert_eq!(top.stx.body.len(), 2);
  assert!(matches!(*top.stx.body[0].stx, Stmt::DoWhile(_)));
  assert!(matches!(*top.stx.body[1].stx, Stmt::Expr(_)));
}

#[test]
fn debugger_owns_its_trailing_semicolon() {
  let top = crate::parse("debugger; a;").unwrap();
  assert_eq!(top.stx.body.len(), 2);
  assert!(matches!(*top.stx.body[0].stx, Stmt::Debugger(_)));
  assert!(matches!(*top.stx.body[1].stx, Stmt::Expr(_)));
}

#[test]
fn return_value_must_start_on_same_line() {
  match *parse_stmt("return a;").stx {
    Stmt::Return(ref ret) => assert!(ret.stx.value.is_some()),
    ref other => panic!("expected return statement, got {:?}", other),
  }
  match *parse_stmt("return\na;").stx {
    Stmt::Return(ref ret) => assert!(ret.stx.value.is_none()),
    ref other => panic!("expected return statement, got {:?}", other),
  }
}

#[test]
fn throw_requires_value_on_same_line() {
  let err = try_parse_stmt("throw\na;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorAfterThrow);
}

#[test]
fn parses_try_catch_finally() {
  let stmt = parse_stmt("try { a; } catch { b; } finally { c; }");
  match *stmt.stx {
    Stmt::Try(ref t) => {
      let catch = t.stx.catch.as_ref().unwrap();
      assert!(catch.stx.parameter.is_none());
      assert!(t.stx.finally.is_some());
    }
    ref other => panic!("expected try statement, got {:?}", other),
  }
}

#[test]
fn try_requires_catch_or_finally() {
  let err = try_parse_stmt("try { a; }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::TryStatementHasNoCatchOrFinally);
}

#[test]
fn parses_switch_branches() {
  let stmt = parse_stmt("switch (a) { case 1: b; break; default: c; }");
  match *stmt.stx {
    Stmt::Switch(ref switch) => {
      let branches = &switch.stx.branches;
      assert_eq!(branches.len(), 2);
      assert!(branches[0].stx.case.is_some());
      assert_eq!(branches[0].stx.body.len(), 2);
      assert!(branches[1].stx.case.is_none());
    }
    ref other => panic!("expected switch statement, got {:?}", other),
  }
}

#[test]
fn parses_labelled_loop_with_labelled_break() {
  let stmt = parse_stmt("outer: while (a) { break outer; }");
  match *stmt.stx {
    Stmt::Label(ref label) => {
      assert_eq!(label.stx.name, "outer");
      match *label.stx.statement.stx {
        Stmt::While(ref w) => match *w.stx.body.stx {
          Stmt::Block(ref block) => match *block.stx.body[0].stx {
            Stmt::Break(ref b) => assert_eq!(b.stx.label.as_deref(), Some("outer")),
            ref other => panic!("expected break statement, got {:?}", other),
          },
          ref other => panic!("expected block body, got {:?}", other),
        },
        ref other => panic!("expected while statement, got {:?}", other),
      }
    }
    ref other => panic!("expected labelled statement, got {:?}", other),
  }
}

#[test]
fn parses_side_effect_import() {
  let stmt = parse_stmt("import \"m\";");
  match *stmt.stx {
    Stmt::Import(ref import) => {
      assert!(import.stx.default.is_none());
      assert!(import.stx.names.is_none());
      assert_eq!(import.stx.module, "m");
    }
    ref other => panic!("expected import statement, got {:?}", other),
  }
}

#[test]
fn parses_default_and_named_imports() {
  let stmt = parse_stmt("import a, {b as c, default as d} from 'm';");
  match *stmt.stx {
    Stmt::Import(ref import) => {
      assert!(import.stx.default.is_some());
      match import.stx.names {
        Some(ImportNames::Specific(ref names)) => {
          assert_eq!(names.len(), 2);
          assert_eq!(names[0].stx.importable, "b");
          assert_eq!(names[1].stx.importable, "default");
        }
        ref other => panic!("expected named imports, got {:?}", other),
      }
    }
    ref other => panic!("expected import statement, got {:?}", other),
  }
}

#[test]
fn parses_namespace_import() {
  let stmt = parse_stmt("import * as ns from 'm';");
  match *stmt.stx {
    Stmt::Import(ref import) => {
      assert!(matches!(import.stx.names, Some(ImportNames::All(_))))
    }
    ref other => panic!("expected import statement, got {:?}", other),
  }
}

#[test]
fn import_of_reserved_word_requires_alias() {
  assert!(try_parse_stmt("import {default} from 'm';").is_err());
}

#[test]
fn parses_export_list_forms() {
  match *parse_stmt("export {a, b as default};").stx {
    Stmt::ExportList(ref export) => {
      match export.stx.names {
        ExportNames::Specific(ref names) => {
          assert_eq!(names.len(), 2);
          assert_eq!(names[0].stx.exportable, "a");
          assert_eq!(names[0].stx.alias.stx.name, "a");
          assert_eq!(names[1].stx.alias.stx.name, "default");
        }
        ref other => panic!("expected specific names, got {:?}", other),
      }
      assert!(export.stx.from.is_none());
    }
    ref other => panic!("expected export list, got {:?}", other),
  }
  match *parse_stmt("export {a} from 'm';").stx {
    Stmt::ExportList(ref export) => assert_eq!(export.stx.from.as_deref(), Some("m")),
    ref other => panic!("expected export list, got {:?}", other),
  }
  match *parse_stmt("export * as ns from 'm';").stx {
    Stmt::ExportList(ref export) => {
      assert!(matches!(export.stx.names, ExportNames::All(Some(_))));
      assert_eq!(export.stx.from.as_deref(), Some("m"));
    }
    ref other => panic!("expected export list, got {:?}", other),
  }
}

#[test]
fn parses_export_default_expression() {
  let stmt = parse_stmt("export default a + 1;");
  match *stmt.stx {
    Stmt::ExportDefaultExpr(ref export) => match *export.stx.expression.stx {
      Expr::Binary(_) => {}
      ref other => panic!("expected binary expression, got {:?}", other),
    },
    ref other => panic!("expected export default, got {:?}", other),
  }
}

#[test]
fn parses_exported_declarations() {
  match *parse_stmt("export const a = 1;").stx {
    Stmt::VarDecl(ref decl) => assert!(decl.stx.export),
    ref other => panic!("expected variable declaration, got {:?}", other),
  }
  match *parse_stmt("export default function f() {}").stx {
    Stmt::FunctionDecl(ref decl) => {
      assert!(decl.stx.export);
      assert!(decl.stx.export_default);
      assert!(decl.stx.name.is_some());
    }
    ref other => panic!("expected function declaration, got {:?}", other),
  }
  match *parse_stmt("export async function g() {}").stx {
    Stmt::FunctionDecl(ref decl) => {
      assert!(decl.stx.export);
      assert!(decl.stx.function.stx.async_);
    }
    ref other => panic!("expected function declaration, got {:?}", other),
  }
  match *parse_stmt("export class C {}").stx {
    Stmt::ClassDecl(ref decl) => assert!(decl.stx.export),
    ref other => panic!("expected class declaration, got {:?}", other),
  }
}

#[test]
fn automatic_semicolon_insertion_splits_statements() {
  let top = crate::parse("a\nb").unwrap();
  assert_eq!(top.stx.body.len(), 2);

  let top = crate::parse("a\n++b").unwrap();
  assert_eq!(top.stx.body.len(), 2);
  match *top.stx.body[1].stx {
    Stmt::Expr(ref stmt) => assert!(matches!(*stmt.stx.expr.stx, Expr::Unary(_))),
    ref other => panic!("expected expression statement, got {:?}", other),
  }

  assert!(crate::parse("a b").is_err());
}
