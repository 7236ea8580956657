use super::kind::{LitValue, NodeKind, PropertyKind};
use super::{Ast, NodeId};
use crate::err::{CoverError, CoverResult};
use syntax_js::ast::class_or_object::{ClassMember, ClassOrObjKey, ClassOrObjVal, ObjMember,
                                      ObjMemberType};
use syntax_js::ast::expr::lit::{LitArrElem, LitTemplatePart};
use syntax_js::ast::expr::pat::{ArrPat, ObjPat, Pat};
use syntax_js::ast::expr::{BinaryExpr, CallArg, Expr, UnaryExpr};
use syntax_js::ast::func::{Func, FuncBody};
use syntax_js::ast::import_export::{ExportNames, ImportNames};
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::decl::{ClassDecl, FuncDecl, ParamDecl, PatDecl, VarDecl, VarDeclarator};
use syntax_js::ast::stmt::{ExportListStmt, ForInOfLhs, ForTripleStmtInit, ImportStmt, Stmt};
use syntax_js::ast::stx::TopLevel;
use syntax_js::loc::{LineIndex, Loc};
use syntax_js::num::JsNumber;
use syntax_js::operator::OperatorName;
use syntax_js::token::TT;

/// Builds arena nodes from a parse, eagerly and bottom-up: children are
/// allocated first, then the parent, then the children's parent links are
/// fixed up. Conversion of a construct with no [NodeKind] fails the whole
/// program.
pub(crate) struct Converter<'a> {
  ast: &'a mut Ast,
  lines: LineIndex,
}

impl<'a> Converter<'a> {
  pub fn new(ast: &'a mut Ast, source: &str) -> Converter<'a> {
    Converter {
      ast,
      lines: LineIndex::new(source),
    }
  }

  fn alloc(&mut self, loc: Loc, kind: NodeKind) -> NodeId {
    let line = self.lines.line_of(loc.0);
    let id = self.ast.alloc(loc, line, kind);
    self.ast.adopt_children(id);
    id
  }

  pub fn top_level(&mut self, top: &Node<TopLevel>) -> CoverResult<NodeId> {
    let body = self.stmts(&top.stx.body)?;
    Ok(self.alloc(top.loc, NodeKind::Program { body }))
  }

  fn stmts(&mut self, stmts: &[Node<Stmt>]) -> CoverResult<Vec<NodeId>> {
    stmts.iter().map(|stmt| self.stmt(stmt)).collect()
  }

  fn block_from(&mut self, loc: Loc, stmts: &[Node<Stmt>]) -> CoverResult<NodeId> {
    let body = self.stmts(stmts)?;
    Ok(self.alloc(loc, NodeKind::BlockStatement { body }))
  }

  pub fn stmt(&mut self, stmt: &Node<Stmt>) -> CoverResult<NodeId> {
    let loc = stmt.loc;
    match stmt.stx.as_ref() {
      Stmt::Block(block) => self.block_from(block.loc, &block.stx.body),
      Stmt::Break(brk) => Ok(self.alloc(loc, NodeKind::BreakStatement {
        label: brk.stx.label.clone(),
      })),
      Stmt::Continue(cont) => Ok(self.alloc(loc, NodeKind::ContinueStatement {
        label: cont.stx.label.clone(),
      })),
      Stmt::Debugger(_) => Ok(self.alloc(loc, NodeKind::DebuggerStatement)),
      Stmt::DoWhile(dw) => {
        let body = self.stmt(&dw.stx.body)?;
        let test = self.expr(&dw.stx.condition)?;
        Ok(self.alloc(loc, NodeKind::DoWhileStatement { body, test }))
      }
      Stmt::Empty(_) => Ok(self.alloc(loc, NodeKind::EmptyStatement)),
      Stmt::ExportDefaultExpr(exp) => {
        let declaration = self.expr(&exp.stx.expression)?;
        Ok(self.alloc(loc, NodeKind::ExportDefaultDeclaration { declaration }))
      }
      Stmt::ExportList(exp) => self.export_list(loc, exp),
      Stmt::Expr(e) => {
        let expression = self.expr(&e.stx.expr)?;
        Ok(self.alloc(loc, NodeKind::ExpressionStatement { expression }))
      }
      Stmt::ForIn(_) => Err(CoverError::UnknownKind {
        kind: "ForInStatement",
      }),
      Stmt::ForOf(fo) => {
        let left = self.for_head(&fo.stx.lhs)?;
        let right = self.expr(&fo.stx.rhs)?;
        let body = self.block_from(fo.stx.body.loc, &fo.stx.body.stx.body)?;
        Ok(self.alloc(loc, NodeKind::ForOfStatement {
          await_: fo.stx.await_,
          left,
          right,
          body,
        }))
      }
      Stmt::ForTriple(ft) => {
        let init = match &ft.stx.init {
          ForTripleStmtInit::None => None,
          ForTripleStmtInit::Expr(e) => Some(self.expr(e)?),
          ForTripleStmtInit::Decl(decl) => Some(self.var_decl(decl)?),
        };
        let test = ft.stx.cond.as_ref().map(|e| self.expr(e)).transpose()?;
        let update = ft.stx.post.as_ref().map(|e| self.expr(e)).transpose()?;
        let body = self.block_from(ft.stx.body.loc, &ft.stx.body.stx.body)?;
        Ok(self.alloc(loc, NodeKind::ForStatement {
          init,
          test,
          update,
          body,
        }))
      }
      Stmt::If(i) => {
        let test = self.expr(&i.stx.test)?;
        let consequent = self.stmt(&i.stx.consequent)?;
        let alternate = i.stx.alternate.as_ref().map(|s| self.stmt(s)).transpose()?;
        Ok(self.alloc(loc, NodeKind::IfStatement {
          test,
          consequent,
          alternate,
        }))
      }
      Stmt::Import(imp) => self.import(loc, imp),
      Stmt::Label(l) => {
        let body = self.stmt(&l.stx.statement)?;
        Ok(self.alloc(loc, NodeKind::LabeledStatement {
          label: l.stx.name.clone(),
          body,
        }))
      }
      Stmt::Return(r) => {
        let argument = r.stx.value.as_ref().map(|e| self.expr(e)).transpose()?;
        Ok(self.alloc(loc, NodeKind::ReturnStatement { argument }))
      }
      Stmt::Switch(s) => {
        let discriminant = self.expr(&s.stx.test)?;
        let cases = s
          .stx
          .branches
          .iter()
          .map(|branch| {
            let test = branch.stx.case.as_ref().map(|e| self.expr(e)).transpose()?;
            let consequent = self.stmts(&branch.stx.body)?;
            Ok(self.alloc(branch.loc, NodeKind::SwitchCase { test, consequent }))
          })
          .collect::<CoverResult<Vec<_>>>()?;
        Ok(self.alloc(loc, NodeKind::SwitchStatement {
          discriminant,
          cases,
        }))
      }
      Stmt::Throw(t) => {
        let argument = self.expr(&t.stx.value)?;
        Ok(self.alloc(loc, NodeKind::ThrowStatement { argument }))
      }
      Stmt::Try(t) => {
        let block = self.block_from(t.stx.wrapped.loc, &t.stx.wrapped.stx.body)?;
        let handler = match &t.stx.catch {
          Some(catch) => {
            let param = catch
              .stx
              .parameter
              .as_ref()
              .map(|p| self.pat(&p.stx.pat))
              .transpose()?;
            let body = self.block_from(catch.loc, &catch.stx.body)?;
            Some(self.alloc(catch.loc, NodeKind::CatchClause { param, body }))
          }
          None => None,
        };
        let finalizer = match &t.stx.finally {
          Some(finally) => Some(self.block_from(finally.loc, &finally.stx.body)?),
          None => None,
        };
        Ok(self.alloc(loc, NodeKind::TryStatement {
          block,
          handler,
          finalizer,
        }))
      }
      Stmt::While(w) => {
        let test = self.expr(&w.stx.condition)?;
        let body = self.stmt(&w.stx.body)?;
        Ok(self.alloc(loc, NodeKind::WhileStatement { test, body }))
      }
      Stmt::ClassDecl(c) => self.class_decl(c),
      Stmt::FunctionDecl(f) => self.func_decl(f),
      Stmt::VarDecl(v) => self.var_decl(v),
    }
  }

  fn for_head(&mut self, lhs: &ForInOfLhs) -> CoverResult<NodeId> {
    match lhs {
      ForInOfLhs::Assign(pat) => self.pat(pat),
      ForInOfLhs::Decl((mode, decl)) => {
        let pattern = self.pat(&decl.stx.pat)?;
        let declarator = self.alloc(decl.loc, NodeKind::VariableDeclarator {
          pattern,
          init: None,
        });
        Ok(self.alloc(decl.loc, NodeKind::VariableDeclaration {
          mode: *mode,
          declarators: vec![declarator],
        }))
      }
    }
  }

  /// Also synthesizes the `export` wrapper when the declaration carried the
  /// keyword; the parser stores it as a flag, the arena as a parent node.
  fn var_decl(&mut self, v: &Node<VarDecl>) -> CoverResult<NodeId> {
    let declarators = v
      .stx
      .declarators
      .iter()
      .map(|d| self.var_declarator(d))
      .collect::<CoverResult<Vec<_>>>()?;
    let decl = self.alloc(v.loc, NodeKind::VariableDeclaration {
      mode: v.stx.mode,
      declarators,
    });
    Ok(if v.stx.export {
      self.alloc(v.loc, NodeKind::ExportNamedDeclaration {
        declaration: Some(decl),
        specifiers: Vec::new(),
        source: None,
      })
    } else {
      decl
    })
  }

  fn var_declarator(&mut self, d: &VarDeclarator) -> CoverResult<NodeId> {
    let pattern = self.pat(&d.pattern.stx.pat)?;
    let init = d.initializer.as_ref().map(|e| self.expr(e)).transpose()?;
    let loc = d
      .pattern
      .loc
      .add_option(d.initializer.as_ref().map(|e| e.loc));
    Ok(self.alloc(loc, NodeKind::VariableDeclarator { pattern, init }))
  }

  fn func_decl(&mut self, f: &Node<FuncDecl>) -> CoverResult<NodeId> {
    let loc = f.loc;
    let (params, body) = self.func_parts(&f.stx.function)?;
    let func = self.alloc(loc, NodeKind::FunctionDeclaration {
      name: f.stx.name.as_ref().map(|n| n.stx.name.clone()),
      async_: f.stx.function.stx.async_,
      generator: f.stx.function.stx.generator,
      params,
      body,
    });
    Ok(if f.stx.export_default {
      self.alloc(loc, NodeKind::ExportDefaultDeclaration { declaration: func })
    } else if f.stx.export {
      self.alloc(loc, NodeKind::ExportNamedDeclaration {
        declaration: Some(func),
        specifiers: Vec::new(),
        source: None,
      })
    } else {
      func
    })
  }

  fn class_decl(&mut self, c: &Node<ClassDecl>) -> CoverResult<NodeId> {
    let loc = c.loc;
    let superclass = c.stx.extends.as_ref().map(|e| self.expr(e)).transpose()?;
    let members = c
      .stx
      .members
      .iter()
      .map(|m| self.class_member(m))
      .collect::<CoverResult<Vec<_>>>()?;
    let class = self.alloc(loc, NodeKind::ClassDeclaration {
      name: c.stx.name.as_ref().map(|n| n.stx.name.clone()),
      superclass,
      members,
    });
    Ok(if c.stx.export_default {
      self.alloc(loc, NodeKind::ExportDefaultDeclaration { declaration: class })
    } else if c.stx.export {
      self.alloc(loc, NodeKind::ExportNamedDeclaration {
        declaration: Some(class),
        specifiers: Vec::new(),
        source: None,
      })
    } else {
      class
    })
  }

  fn class_member(&mut self, member: &Node<ClassMember>) -> CoverResult<NodeId> {
    let loc = member.loc;
    let (key, computed) = self.key(&member.stx.key)?;
    let static_ = member.stx.static_;
    Ok(match &member.stx.val {
      ClassOrObjVal::Getter(g) => {
        let value = self.method_value(&g.stx.func)?;
        self.alloc(loc, NodeKind::MethodDefinition {
          key,
          computed,
          static_,
          kind: PropertyKind::Get,
          value,
        })
      }
      ClassOrObjVal::Method(m) => {
        let value = self.method_value(&m.stx.func)?;
        self.alloc(loc, NodeKind::MethodDefinition {
          key,
          computed,
          static_,
          kind: PropertyKind::Method,
          value,
        })
      }
      ClassOrObjVal::Setter(s) => {
        let value = self.method_value(&s.stx.func)?;
        self.alloc(loc, NodeKind::MethodDefinition {
          key,
          computed,
          static_,
          kind: PropertyKind::Set,
          value,
        })
      }
      ClassOrObjVal::Prop(init) => {
        let value = init.as_ref().map(|e| self.expr(e)).transpose()?;
        self.alloc(loc, NodeKind::PropertyDefinition {
          key,
          computed,
          static_,
          value,
        })
      }
    })
  }

  fn import(&mut self, loc: Loc, imp: &Node<ImportStmt>) -> CoverResult<NodeId> {
    let mut specifiers = Vec::new();
    if let Some(default) = &imp.stx.default {
      let local = binding_name(default)?;
      specifiers.push(self.alloc(default.loc, NodeKind::ImportDefaultSpecifier { local }));
    };
    match &imp.stx.names {
      None => {}
      Some(ImportNames::All(alias)) => {
        let local = binding_name(alias)?;
        specifiers.push(self.alloc(alias.loc, NodeKind::ImportNamespaceSpecifier { local }));
      }
      Some(ImportNames::Specific(names)) => {
        for name in names {
          let local = binding_name(&name.stx.alias)?;
          specifiers.push(self.alloc(name.loc, NodeKind::ImportSpecifier {
            imported: name.stx.importable.clone(),
            local,
          }));
        }
      }
    };
    Ok(self.alloc(loc, NodeKind::ImportDeclaration {
      specifiers,
      source: imp.stx.module.clone(),
    }))
  }

  fn export_list(&mut self, loc: Loc, exp: &Node<ExportListStmt>) -> CoverResult<NodeId> {
    match &exp.stx.names {
      ExportNames::All(alias) => Ok(self.alloc(loc, NodeKind::ExportAllDeclaration {
        exported: alias.as_ref().map(|a| a.stx.name.clone()),
        source: exp.stx.from.clone(),
      })),
      ExportNames::Specific(names) => {
        let specifiers = names
          .iter()
          .map(|name| {
            self.alloc(name.loc, NodeKind::ExportSpecifier {
              local: name.stx.exportable.clone(),
              exported: name.stx.alias.stx.name.clone(),
            })
          })
          .collect();
        Ok(self.alloc(loc, NodeKind::ExportNamedDeclaration {
          declaration: None,
          specifiers,
          source: exp.stx.from.clone(),
        }))
      }
    }
  }

  pub fn expr(&mut self, expr: &Node<Expr>) -> CoverResult<NodeId> {
    let loc = expr.loc;
    match expr.stx.as_ref() {
      Expr::ArrowFunc(arrow) => {
        let (params, body) = self.func_parts(&arrow.stx.func)?;
        Ok(self.alloc(loc, NodeKind::ArrowFunctionExpression {
          parenthesized: arrow.stx.parenthesized,
          async_: arrow.stx.func.stx.async_,
          params,
          body,
        }))
      }
      Expr::Binary(b) => self.binary(loc, b),
      Expr::Call(c) => {
        let callee = self.expr(&c.stx.callee)?;
        let arguments = self.call_args(&c.stx.arguments)?;
        Ok(self.alloc(loc, NodeKind::CallExpression { callee, arguments }))
      }
      Expr::Class(_) => Err(CoverError::UnknownKind {
        kind: "ClassExpression",
      }),
      Expr::ComputedMember(m) => {
        let object = self.expr(&m.stx.object)?;
        let property = self.expr(&m.stx.member)?;
        Ok(self.alloc(loc, NodeKind::ComputedMemberExpression { object, property }))
      }
      Expr::Cond(c) => {
        let test = self.expr(&c.stx.test)?;
        let consequent = self.expr(&c.stx.consequent)?;
        let alternate = self.expr(&c.stx.alternate)?;
        Ok(self.alloc(loc, NodeKind::ConditionalExpression {
          test,
          consequent,
          alternate,
        }))
      }
      Expr::Func(func) => {
        let (params, body) = self.func_parts(&func.stx.func)?;
        Ok(self.alloc(loc, NodeKind::FunctionExpression {
          parenthesized: func.stx.parenthesized,
          name: func.stx.name.as_ref().map(|n| n.stx.name.clone()),
          async_: func.stx.func.stx.async_,
          generator: func.stx.func.stx.generator,
          params,
          body,
        }))
      }
      Expr::Id(id) => Ok(self.alloc(loc, NodeKind::Identifier {
        name: id.stx.name.clone(),
      })),
      Expr::Member(m) => {
        let object = self.expr(&m.stx.left)?;
        Ok(self.alloc(loc, NodeKind::MemberExpression {
          object,
          property: m.stx.right.clone(),
        }))
      }
      Expr::Super(_) => Ok(self.alloc(loc, NodeKind::Super)),
      Expr::TaggedTemplate(_) => Err(CoverError::UnknownKind {
        kind: "TaggedTemplateExpression",
      }),
      Expr::This(_) => Ok(self.alloc(loc, NodeKind::ThisExpression)),
      Expr::Unary(u) => self.unary(loc, u),
      Expr::UnaryPostfix(u) => {
        let argument = self.expr(&u.stx.argument)?;
        Ok(self.alloc(loc, NodeKind::UpdateExpression {
          operator: u.stx.operator,
          argument,
        }))
      }
      Expr::LitArr(arr) => {
        let mut elements = Vec::new();
        for elem in &arr.stx.elements {
          elements.push(match elem {
            LitArrElem::Single(e) => Some(self.expr(e)?),
            LitArrElem::Rest(e) => {
              let argument = self.expr(e)?;
              Some(self.alloc(e.loc, NodeKind::SpreadElement { argument }))
            }
            LitArrElem::Empty => None,
          });
        }
        Ok(self.alloc(loc, NodeKind::ArrayExpression { elements }))
      }
      Expr::LitBool(b) => Ok(self.alloc(loc, NodeKind::Literal {
        value: LitValue::Bool(b.stx.value),
      })),
      Expr::LitNull(_) => Ok(self.alloc(loc, NodeKind::Literal {
        value: LitValue::Null,
      })),
      Expr::LitNum(n) => Ok(self.alloc(loc, NodeKind::Literal {
        value: LitValue::Num(n.stx.value),
      })),
      Expr::LitObj(o) => {
        let properties = o
          .stx
          .members
          .iter()
          .map(|m| self.obj_member(m))
          .collect::<CoverResult<Vec<_>>>()?;
        Ok(self.alloc(loc, NodeKind::ObjectExpression { properties }))
      }
      Expr::LitRegex(r) => Ok(self.alloc(loc, NodeKind::Literal {
        value: LitValue::Regex(r.stx.value.clone()),
      })),
      Expr::LitStr(s) => Ok(self.alloc(loc, NodeKind::Literal {
        value: LitValue::Str(s.stx.value.clone()),
      })),
      Expr::LitTemplate(t) => self.template(loc, &t.stx.parts),
      Expr::ArrPat(p) => self.arr_pat(p),
      Expr::IdPat(p) => Ok(self.alloc(p.loc, NodeKind::Identifier {
        name: p.stx.name.clone(),
      })),
      Expr::ObjPat(p) => self.obj_pat(p),
    }
  }

  fn binary(&mut self, loc: Loc, b: &Node<BinaryExpr>) -> CoverResult<NodeId> {
    match b.stx.operator {
      OperatorName::Comma => self.sequence(loc, b),
      op if op.is_assignment() => {
        let left = self.expr(&b.stx.left)?;
        let right = self.expr(&b.stx.right)?;
        Ok(self.alloc(loc, NodeKind::AssignmentExpression {
          parenthesized: b.stx.parenthesized,
          operator: op,
          left,
          right,
        }))
      }
      op @ (OperatorName::LogicalAnd | OperatorName::LogicalOr) => {
        let left = self.expr(&b.stx.left)?;
        let right = self.expr(&b.stx.right)?;
        Ok(self.alloc(loc, NodeKind::LogicalExpression {
          parenthesized: b.stx.parenthesized,
          operator: op,
          left,
          right,
        }))
      }
      op => {
        let left = self.expr(&b.stx.left)?;
        let right = self.expr(&b.stx.right)?;
        Ok(self.alloc(loc, NodeKind::BinaryExpression {
          parenthesized: b.stx.parenthesized,
          operator: op,
          left,
          right,
        }))
      }
    }
  }

  fn sequence(&mut self, loc: Loc, b: &Node<BinaryExpr>) -> CoverResult<NodeId> {
    let mut expressions = Vec::new();
    self.sequence_operands(&b.stx.left, &mut expressions)?;
    self.sequence_operands(&b.stx.right, &mut expressions)?;
    Ok(self.alloc(loc, NodeKind::SequenceExpression {
      parenthesized: b.stx.parenthesized,
      expressions,
    }))
  }

  // Comma chains parse as left-nested binaries. Unparenthesized links flatten
  // into one sequence; a parenthesized inner chain stays its own node.
  fn sequence_operands(&mut self, e: &Node<Expr>, out: &mut Vec<NodeId>) -> CoverResult<()> {
    if let Expr::Binary(b) = e.stx.as_ref() {
      if b.stx.operator == OperatorName::Comma && !b.stx.parenthesized {
        self.sequence_operands(&b.stx.left, out)?;
        self.sequence_operands(&b.stx.right, out)?;
        return Ok(());
      };
    };
    out.push(self.expr(e)?);
    Ok(())
  }

  fn unary(&mut self, loc: Loc, u: &Node<UnaryExpr>) -> CoverResult<NodeId> {
    match u.stx.operator {
      OperatorName::Yield | OperatorName::YieldDelegated => Err(CoverError::UnknownKind {
        kind: "YieldExpression",
      }),
      OperatorName::Await => {
        let argument = self.expr(&u.stx.argument)?;
        Ok(self.alloc(loc, NodeKind::AwaitExpression { argument }))
      }
      op @ (OperatorName::PrefixIncrement | OperatorName::PrefixDecrement) => {
        let argument = self.expr(&u.stx.argument)?;
        Ok(self.alloc(loc, NodeKind::UpdateExpression {
          operator: op,
          argument,
        }))
      }
      OperatorName::New => self.new_expr(loc, &u.stx.argument),
      op => {
        let argument = self.expr(&u.stx.argument)?;
        Ok(self.alloc(loc, NodeKind::UnaryExpression {
          operator: op,
          argument,
        }))
      }
    }
  }

  // `new X(...)` parses as the prefix `new` operator applied to a call. Fold
  // the call's arguments into the node; `new X` with no argument list at all
  // keeps `arguments: None` so the generator reproduces it without parens.
  fn new_expr(&mut self, loc: Loc, operand: &Node<Expr>) -> CoverResult<NodeId> {
    match operand.stx.as_ref() {
      Expr::Call(call) => {
        let callee = self.expr(&call.stx.callee)?;
        let arguments = Some(self.call_args(&call.stx.arguments)?);
        Ok(self.alloc(loc, NodeKind::NewExpression { callee, arguments }))
      }
      _ => {
        let callee = self.expr(operand)?;
        Ok(self.alloc(loc, NodeKind::NewExpression {
          callee,
          arguments: None,
        }))
      }
    }
  }

  fn call_args(&mut self, args: &[Node<CallArg>]) -> CoverResult<Vec<NodeId>> {
    args
      .iter()
      .map(|arg| {
        let value = self.expr(&arg.stx.value)?;
        Ok(if arg.stx.spread {
          self.alloc(arg.loc, NodeKind::SpreadElement { argument: value })
        } else {
          value
        })
      })
      .collect()
  }

  fn template(&mut self, loc: Loc, parts: &[LitTemplatePart]) -> CoverResult<NodeId> {
    let mut quasis = Vec::new();
    let mut expressions = Vec::new();
    // Quasis have no parsed location; synthesize offsets between the known
    // substitution offsets so traversal can recover document order.
    let mut cursor = loc.0;
    for part in parts {
      match part {
        LitTemplatePart::String(raw) => {
          let quasi_loc = Loc(cursor + 1, cursor + 1 + raw.len());
          quasis.push(self.alloc(quasi_loc, NodeKind::TemplateElement { raw: raw.clone() }));
          cursor = quasi_loc.1;
        }
        LitTemplatePart::Substitution(e) => {
          let id = self.expr(e)?;
          cursor = e.loc.1;
          expressions.push(id);
        }
      }
    }
    Ok(self.alloc(loc, NodeKind::TemplateLiteral {
      quasis,
      expressions,
    }))
  }

  fn obj_member(&mut self, member: &Node<ObjMember>) -> CoverResult<NodeId> {
    let loc = member.loc;
    match &member.stx.typ {
      ObjMemberType::Rest { val } => {
        let argument = self.expr(val)?;
        Ok(self.alloc(loc, NodeKind::SpreadElement { argument }))
      }
      ObjMemberType::Shorthand { id } => {
        let key = self.alloc(id.loc, NodeKind::Identifier {
          name: id.stx.name.clone(),
        });
        Ok(self.alloc(loc, NodeKind::Property {
          key,
          computed: false,
          kind: PropertyKind::Init,
          value: None,
        }))
      }
      ObjMemberType::Valued { key, val } => {
        let (key, computed) = self.key(key)?;
        let (kind, value) = match val {
          ClassOrObjVal::Getter(g) => (PropertyKind::Get, Some(self.method_value(&g.stx.func)?)),
          ClassOrObjVal::Method(m) => {
            (PropertyKind::Method, Some(self.method_value(&m.stx.func)?))
          }
          ClassOrObjVal::Setter(s) => (PropertyKind::Set, Some(self.method_value(&s.stx.func)?)),
          ClassOrObjVal::Prop(Some(e)) => (PropertyKind::Init, Some(self.expr(e)?)),
          // Valueless non-shorthand members only appear in classes.
          ClassOrObjVal::Prop(None) => (PropertyKind::Init, None),
        };
        Ok(self.alloc(loc, NodeKind::Property {
          key,
          computed,
          kind,
          value,
        }))
      }
    }
  }

  fn key(&mut self, key: &ClassOrObjKey) -> CoverResult<(NodeId, bool)> {
    Ok(match key {
      ClassOrObjKey::Computed(e) => (self.expr(e)?, true),
      ClassOrObjKey::Direct(direct) => {
        let loc = direct.loc;
        let node = match direct.stx.tt {
          TT::LiteralString => self.alloc(loc, NodeKind::Literal {
            value: LitValue::Str(direct.stx.key.clone()),
          }),
          // Number keys arrive normalized to their evaluated decimal form.
          TT::LiteralNumber => match JsNumber::from_literal(&direct.stx.key) {
            Some(value) => self.alloc(loc, NodeKind::Literal {
              value: LitValue::Num(value),
            }),
            None => self.alloc(loc, NodeKind::Literal {
              value: LitValue::Str(direct.stx.key.clone()),
            }),
          },
          _ => self.alloc(loc, NodeKind::Identifier {
            name: direct.stx.key.clone(),
          }),
        };
        (node, false)
      }
    })
  }

  // A method's value is a function expression with no name of its own.
  fn method_value(&mut self, func: &Node<Func>) -> CoverResult<NodeId> {
    let (params, body) = self.func_parts(func)?;
    Ok(self.alloc(func.loc, NodeKind::FunctionExpression {
      parenthesized: false,
      name: None,
      async_: func.stx.async_,
      generator: func.stx.generator,
      params,
      body,
    }))
  }

  fn func_parts(&mut self, func: &Node<Func>) -> CoverResult<(Vec<NodeId>, NodeId)> {
    let params = func
      .stx
      .parameters
      .iter()
      .map(|p| self.param(p))
      .collect::<CoverResult<Vec<_>>>()?;
    let body = match &func.stx.body {
      FuncBody::Block(stmts) => self.block_from(func.loc, stmts)?,
      FuncBody::Expression(e) => self.expr(e)?,
    };
    Ok((params, body))
  }

  fn param(&mut self, param: &Node<ParamDecl>) -> CoverResult<NodeId> {
    let pattern = self.pat(&param.stx.pattern.stx.pat)?;
    let node = match &param.stx.default_value {
      Some(default) => {
        let right = self.expr(default)?;
        self.alloc(param.loc, NodeKind::AssignmentPattern {
          left: pattern,
          right,
        })
      }
      None => pattern,
    };
    Ok(if param.stx.rest {
      self.alloc(param.loc, NodeKind::RestElement { argument: node })
    } else {
      node
    })
  }

  fn pat(&mut self, pat: &Node<Pat>) -> CoverResult<NodeId> {
    match pat.stx.as_ref() {
      Pat::Arr(arr) => self.arr_pat(arr),
      Pat::Id(id) => Ok(self.alloc(id.loc, NodeKind::Identifier {
        name: id.stx.name.clone(),
      })),
      Pat::Obj(obj) => self.obj_pat(obj),
    }
  }

  fn arr_pat(&mut self, arr: &Node<ArrPat>) -> CoverResult<NodeId> {
    let mut elements = Vec::new();
    for elem in &arr.stx.elements {
      elements.push(match elem {
        None => None,
        Some(elem) => {
          let target = self.pat(&elem.target)?;
          Some(match &elem.default_value {
            Some(default) => {
              let right = self.expr(default)?;
              let loc = elem.target.loc + default.loc;
              self.alloc(loc, NodeKind::AssignmentPattern {
                left: target,
                right,
              })
            }
            None => target,
          })
        }
      });
    }
    if let Some(rest) = &arr.stx.rest {
      let argument = self.pat(rest)?;
      elements.push(Some(
        self.alloc(rest.loc, NodeKind::RestElement { argument }),
      ));
    };
    Ok(self.alloc(arr.loc, NodeKind::ArrayPattern { elements }))
  }

  fn obj_pat(&mut self, obj: &Node<ObjPat>) -> CoverResult<NodeId> {
    let mut properties = Vec::new();
    for prop in &obj.stx.properties {
      let (key, computed) = self.key(&prop.stx.key)?;
      let target = self.pat(&prop.stx.target)?;
      let value = match &prop.stx.default_value {
        Some(default) => {
          let right = self.expr(default)?;
          let loc = prop.stx.target.loc + default.loc;
          self.alloc(loc, NodeKind::AssignmentPattern {
            left: target,
            right,
          })
        }
        None => target,
      };
      properties.push(self.alloc(prop.loc, NodeKind::Property {
        key,
        computed,
        kind: PropertyKind::Init,
        value: Some(value),
      }));
    }
    if let Some(rest) = &obj.stx.rest {
      let argument = self.alloc(rest.loc, NodeKind::Identifier {
        name: rest.stx.name.clone(),
      });
      properties.push(self.alloc(rest.loc, NodeKind::RestElement { argument }));
    };
    Ok(self.alloc(obj.loc, NodeKind::ObjectPattern { properties }))
  }
}

// Import bindings always parse as plain identifier patterns.
fn binding_name(decl: &Node<PatDecl>) -> CoverResult<String> {
  match decl.stx.pat.stx.as_ref() {
    Pat::Id(id) => Ok(id.stx.name.clone()),
    _ => Err(CoverError::UnknownKind {
      kind: "ImportPattern",
    }),
  }
}

#[cfg(test)]
mod tests {
  use crate::ast::kind::{LitValue, NodeKind};
  use crate::ast::{Ast, NodeId};
  use crate::err::CoverError;

  fn find(ast: &Ast, name: &str) -> NodeId {
    let mut found = None;
    ast.visit(ast.root(), &mut |id| {
      if found.is_none() && ast.kind(id).name() == name {
        found = Some(id);
      }
    });
    found.unwrap_or_else(|| panic!("no {} in arena", name))
  }

  fn kinds(ast: &Ast) -> Vec<&'static str> {
    let mut names = Vec::new();
    ast.visit(ast.root(), &mut |id| names.push(ast.kind(id).name()));
    names
  }

  #[test]
  fn marks_coverable_statements() {
    let ast = Ast::parse("let a = 1;\nf();\nfunction g() {\n  return 1;\n}\nif (a) {}").unwrap();
    let mut covered = Vec::new();
    ast.visit(ast.root(), &mut |id| {
      if ast.instrumented(id) {
        covered.push((ast.kind(id).name(), ast.line(id)));
      }
    });
    assert_eq!(covered, vec![
      ("VariableDeclaration", 1),
      ("ExpressionStatement", 2),
      ("ReturnStatement", 4),
    ]);
  }

  #[test]
  fn rejects_for_in() {
    let err = Ast::parse("for (const k in o) {}").unwrap_err();
    assert!(matches!(err, CoverError::UnknownKind {
      kind: "ForInStatement"
    }));
  }

  #[test]
  fn rejects_class_expressions() {
    let err = Ast::parse("let a = class {};").unwrap_err();
    assert!(matches!(err, CoverError::UnknownKind {
      kind: "ClassExpression"
    }));
  }

  #[test]
  fn rejects_yield() {
    let err = Ast::parse("function* g() { yield 1; }").unwrap_err();
    assert!(matches!(err, CoverError::UnknownKind {
      kind: "YieldExpression"
    }));
  }

  #[test]
  fn rejects_tagged_templates() {
    let err = Ast::parse("tag`x`;").unwrap_err();
    assert!(matches!(err, CoverError::UnknownKind {
      kind: "TaggedTemplateExpression"
    }));
  }

  #[test]
  fn wraps_exported_declarations() {
    let ast = Ast::parse("export const x = 1;").unwrap();
    assert_eq!(
      kinds(&ast)[..3],
      ["Program", "ExportNamedDeclaration", "VariableDeclaration"]
    );
    let decl = find(&ast, "VariableDeclaration");
    assert!(ast.instrumented(decl));
    assert!(!ast.instrumented(ast.parent(decl).unwrap()));

    let ast = Ast::parse("export default function () {}").unwrap();
    assert_eq!(
      kinds(&ast)[..3],
      ["Program", "ExportDefaultDeclaration", "FunctionDeclaration"]
    );
  }

  #[test]
  fn splits_import_specifiers() {
    let ast = Ast::parse("import d, { a, b as c } from 'm';").unwrap();
    let import = find(&ast, "ImportDeclaration");
    let specifiers: Vec<_> = ast
      .children(import)
      .into_iter()
      .map(|id| ast.kind(id).name())
      .collect();
    assert_eq!(specifiers, vec![
      "ImportDefaultSpecifier",
      "ImportSpecifier",
      "ImportSpecifier",
    ]);
    let renamed = ast.children(import)[2];
    match ast.kind(renamed) {
      NodeKind::ImportSpecifier { imported, local } => {
        assert_eq!(imported, "b");
        assert_eq!(local, "c");
      }
      other => panic!("specifier became {}", other.name()),
    };
  }

  #[test]
  fn flattens_comma_chains() {
    let ast = Ast::parse("a, b, c;").unwrap();
    let seq = find(&ast, "SequenceExpression");
    assert_eq!(ast.children(seq).len(), 3);

    let ast = Ast::parse("(a, b), c;").unwrap();
    let outer = find(&ast, "SequenceExpression");
    let operands = ast.children(outer);
    assert_eq!(operands.len(), 2);
    match ast.kind(operands[0]) {
      NodeKind::SequenceExpression {
        parenthesized,
        expressions,
      } => {
        assert!(parenthesized);
        assert_eq!(expressions.len(), 2);
      }
      other => panic!("first operand became {}", other.name()),
    };
  }

  #[test]
  fn folds_new_calls() {
    let ast = Ast::parse("new Foo(1);").unwrap();
    match ast.kind(find(&ast, "NewExpression")) {
      NodeKind::NewExpression {
        arguments: Some(args),
        ..
      } => assert_eq!(args.len(), 1),
      other => panic!("got {:?}", other),
    };

    let ast = Ast::parse("new Foo;").unwrap();
    assert!(matches!(
      ast.kind(find(&ast, "NewExpression")),
      NodeKind::NewExpression {
        arguments: None,
        ..
      }
    ));
  }

  #[test]
  fn keeps_trailing_template_quasi() {
    let ast = Ast::parse("`a${b}`;").unwrap();
    match ast.kind(find(&ast, "TemplateLiteral")) {
      NodeKind::TemplateLiteral {
        quasis,
        expressions,
      } => {
        assert_eq!(quasis.len(), 2);
        assert_eq!(expressions.len(), 1);
      }
      other => panic!("got {}", other.name()),
    };
  }

  #[test]
  fn normalizes_number_keys() {
    let ast = Ast::parse("({ 0x10: 1 });").unwrap();
    let key = find(&ast, "Literal");
    match ast.kind(key) {
      NodeKind::Literal {
        value: LitValue::Num(n),
      } => assert_eq!(n.0, 16.0),
      other => panic!("got {:?}", other),
    };
  }

  #[test]
  fn loop_head_declarations_are_coverable() {
    let ast = Ast::parse("for (let i = 0; i < 3; i++) f(i);").unwrap();
    let decl = find(&ast, "VariableDeclaration");
    assert!(ast.instrumented(decl));
    assert_eq!(ast.kind(ast.parent(decl).unwrap()).name(), "ForStatement");
  }
}
