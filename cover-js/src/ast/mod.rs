pub mod convert;
pub mod kind;

use crate::err::CoverError;
use crate::err::CoverResult;
use convert::Converter;
use kind::NodeKind;
use syntax_js::loc::Loc;

/// Handle into an [Ast] arena. Cheap to copy; meaningless in any other arena.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
  pub(crate) fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Debug)]
pub struct NodeData {
  pub parent: Option<NodeId>,
  pub loc: Loc,
  /// 1-based line of the node's first character in its source.
  pub line: u32,
  /// Whether this statement takes a coverage probe. Fixed at construction.
  pub instrumented: bool,
  pub kind: NodeKind,
}

/// A whole program as a flat arena of nodes. Nodes refer to each other by
/// [NodeId]; replaced nodes are left in place unreferenced rather than freed.
#[derive(Debug)]
pub struct Ast {
  nodes: Vec<NodeData>,
  root: NodeId,
}

impl Ast {
  /// Parses a program and converts it eagerly. Any construct without a
  /// [NodeKind] fails the whole parse with [CoverError::UnknownKind].
  pub fn parse(source: &str) -> CoverResult<Ast> {
    let parsed = syntax_js::parse(source)?;
    let mut ast = Ast {
      nodes: Vec::new(),
      root: NodeId(0),
    };
    let root = Converter::new(&mut ast, source).top_level(&parsed)?;
    ast.root = root;
    Ok(ast)
  }

  /// Parses statements into this arena without attaching them anywhere,
  /// returning one id per top-level statement. Lines are numbered within
  /// `source` itself, so callers that care about line numbers should splice
  /// the result rather than read them.
  pub fn parse_fragment(&mut self, source: &str) -> CoverResult<Vec<NodeId>> {
    let parsed = syntax_js::parse(source)?;
    let mut converter = Converter::new(self, source);
    parsed
      .stx
      .body
      .iter()
      .map(|stmt| converter.stmt(stmt))
      .collect()
  }

  pub fn root(&self) -> NodeId {
    self.root
  }

  pub fn kind(&self, id: NodeId) -> &NodeKind {
    &self.nodes[id.index()].kind
  }

  pub fn loc(&self, id: NodeId) -> Loc {
    self.nodes[id.index()].loc
  }

  pub fn line(&self, id: NodeId) -> u32 {
    self.nodes[id.index()].line
  }

  pub fn parent(&self, id: NodeId) -> Option<NodeId> {
    self.nodes[id.index()].parent
  }

  pub fn instrumented(&self, id: NodeId) -> bool {
    self.nodes[id.index()].instrumented
  }

  pub(crate) fn alloc(&mut self, loc: Loc, line: u32, kind: NodeKind) -> NodeId {
    let id = NodeId(self.nodes.len() as u32);
    let instrumented = kind.instrumented();
    self.nodes.push(NodeData {
      parent: None,
      loc,
      line,
      instrumented,
      kind,
    });
    id
  }

  /// Points every direct child's parent link at `id`. Used after allocating a
  /// node whose children were allocated first, and after moving children into
  /// an existing node.
  pub(crate) fn adopt_children(&mut self, id: NodeId) {
    for child in self.children(id) {
      self.nodes[child.index()].parent = Some(id);
    }
  }

  /// Direct children in document order. Allocates; fine for traversal,
  /// not meant for hot loops.
  pub fn children(&self, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    match &self.nodes[id.index()].kind {
      NodeKind::ArrayExpression { elements } | NodeKind::ArrayPattern { elements } => {
        out.extend(elements.iter().flatten().copied())
      }
      NodeKind::ArrowFunctionExpression { params, body, .. } => {
        out.extend(params.iter().copied());
        out.push(*body);
      }
      NodeKind::AssignmentExpression { left, right, .. }
      | NodeKind::AssignmentPattern { left, right }
      | NodeKind::BinaryExpression { left, right, .. }
      | NodeKind::LogicalExpression { left, right, .. } => {
        out.push(*left);
        out.push(*right);
      }
      NodeKind::AwaitExpression { argument }
      | NodeKind::RestElement { argument }
      | NodeKind::SpreadElement { argument }
      | NodeKind::ThrowStatement { argument }
      | NodeKind::UnaryExpression { argument, .. }
      | NodeKind::UpdateExpression { argument, .. } => out.push(*argument),
      NodeKind::BlockStatement { body } | NodeKind::Program { body } => {
        out.extend(body.iter().copied())
      }
      NodeKind::BreakStatement { .. }
      | NodeKind::ContinueStatement { .. }
      | NodeKind::DebuggerStatement
      | NodeKind::EmptyStatement
      | NodeKind::ExportAllDeclaration { .. }
      | NodeKind::ExportSpecifier { .. }
      | NodeKind::Identifier { .. }
      | NodeKind::ImportDefaultSpecifier { .. }
      | NodeKind::ImportNamespaceSpecifier { .. }
      | NodeKind::ImportSpecifier { .. }
      | NodeKind::Literal { .. }
      | NodeKind::Super
      | NodeKind::TemplateElement { .. }
      | NodeKind::ThisExpression => {}
      NodeKind::CallExpression { callee, arguments } => {
        out.push(*callee);
        out.extend(arguments.iter().copied());
      }
      NodeKind::CatchClause { param, body } => {
        out.extend(*param);
        out.push(*body);
      }
      NodeKind::ClassDeclaration {
        superclass,
        members,
        ..
      } => {
        out.extend(*superclass);
        out.extend(members.iter().copied());
      }
      NodeKind::ComputedMemberExpression { object, property } => {
        out.push(*object);
        out.push(*property);
      }
      NodeKind::ConditionalExpression {
        test,
        consequent,
        alternate,
      } => {
        out.push(*test);
        out.push(*consequent);
        out.push(*alternate);
      }
      NodeKind::DoWhileStatement { body, test } => {
        out.push(*body);
        out.push(*test);
      }
      NodeKind::ExportDefaultDeclaration { declaration } => out.push(*declaration),
      NodeKind::ExportNamedDeclaration {
        declaration,
        specifiers,
        ..
      } => {
        out.extend(*declaration);
        out.extend(specifiers.iter().copied());
      }
      NodeKind::ExpressionStatement { expression } => out.push(*expression),
      NodeKind::ForOfStatement {
        left, right, body, ..
      } => {
        out.push(*left);
        out.push(*right);
        out.push(*body);
      }
      NodeKind::ForStatement {
        init,
        test,
        update,
        body,
      } => {
        out.extend(*init);
        out.extend(*test);
        out.extend(*update);
        out.push(*body);
      }
      NodeKind::FunctionDeclaration { params, body, .. }
      | NodeKind::FunctionExpression { params, body, .. } => {
        out.extend(params.iter().copied());
        out.push(*body);
      }
      NodeKind::IfStatement {
        test,
        consequent,
        alternate,
      } => {
        out.push(*test);
        out.push(*consequent);
        out.extend(*alternate);
      }
      NodeKind::ImportDeclaration { specifiers, .. } => out.extend(specifiers.iter().copied()),
      NodeKind::LabeledStatement { body, .. } => out.push(*body),
      NodeKind::MemberExpression { object, .. } => out.push(*object),
      NodeKind::MethodDefinition { key, value, .. } => {
        out.push(*key);
        out.push(*value);
      }
      NodeKind::NewExpression { callee, arguments } => {
        out.push(*callee);
        out.extend(arguments.iter().flatten().copied());
      }
      NodeKind::ObjectExpression { properties } | NodeKind::ObjectPattern { properties } => {
        out.extend(properties.iter().copied())
      }
      NodeKind::Property { key, value, .. } | NodeKind::PropertyDefinition { key, value, .. } => {
        out.push(*key);
        out.extend(*value);
      }
      NodeKind::ReturnStatement { argument } => out.extend(*argument),
      NodeKind::SequenceExpression { expressions, .. } => out.extend(expressions.iter().copied()),
      NodeKind::SwitchCase { test, consequent } => {
        out.extend(*test);
        out.extend(consequent.iter().copied());
      }
      NodeKind::SwitchStatement {
        discriminant,
        cases,
      } => {
        out.push(*discriminant);
        out.extend(cases.iter().copied());
      }
      NodeKind::TemplateLiteral {
        quasis,
        expressions,
      } => {
        // Stored as two arrays; document order is recovered from offsets.
        out.extend(quasis.iter().copied());
        out.extend(expressions.iter().copied());
        out.sort_by_key(|&id| self.nodes[id.index()].loc.0);
      }
      NodeKind::TryStatement {
        block,
        handler,
        finalizer,
      } => {
        out.push(*block);
        out.extend(*handler);
        out.extend(*finalizer);
      }
      NodeKind::VariableDeclaration { declarators, .. } => {
        out.extend(declarators.iter().copied())
      }
      NodeKind::VariableDeclarator { pattern, init } => {
        out.push(*pattern);
        out.extend(*init);
      }
      NodeKind::WhileStatement { test, body } => {
        out.push(*test);
        out.push(*body);
      }
    };
    out
  }

  /// Depth-first preorder walk from `start`.
  pub fn visit<F: FnMut(NodeId)>(&self, start: NodeId, f: &mut F) {
    f(start);
    for child in self.children(start) {
      self.visit(child, f);
    }
  }

  /// Swaps `target` for `nodes` in its parent. A spliced slot (program body,
  /// block body, sequence operands) accepts any number of nodes; a return's
  /// argument or an expression statement's expression accepts exactly one.
  /// Everything else is [CoverError::UnsupportedEdit].
  pub fn replace_with(&mut self, target: NodeId, nodes: Vec<NodeId>) -> CoverResult<()> {
    let Some(parent) = self.parent(target) else {
      return Err(CoverError::UnsupportedEdit {
        kind: self.kind(target).name(),
      });
    };
    let parent_kind = self.kind(parent).name();
    let single = match &mut self.nodes[parent.index()].kind {
      NodeKind::ExpressionStatement { expression } if *expression == target => Some(expression),
      NodeKind::ReturnStatement {
        argument: Some(argument),
      } if *argument == target => Some(argument),
      _ => None,
    };
    if let Some(slot) = single {
      let &[node] = nodes.as_slice() else {
        return Err(CoverError::UnsupportedEdit { kind: parent_kind });
      };
      *slot = node;
      self.nodes[node.index()].parent = Some(parent);
      return Ok(());
    };
    self.splice(target, nodes, 0, 1)
  }

  /// Inserts `nodes` immediately before `target` in its parent's spliced slot.
  pub fn insert_before(&mut self, target: NodeId, nodes: Vec<NodeId>) -> CoverResult<()> {
    self.splice(target, nodes, 0, 0)
  }

  /// Inserts `nodes` immediately after `target` in its parent's spliced slot.
  pub fn insert_after(&mut self, target: NodeId, nodes: Vec<NodeId>) -> CoverResult<()> {
    self.splice(target, nodes, 1, 0)
  }

  /// Inserts `nodes` at the front of `parent`'s spliced slot. Unlike the
  /// target-relative edits this works on an empty slot.
  pub fn prepend(&mut self, parent: NodeId, nodes: Vec<NodeId>) -> CoverResult<()> {
    let parent_kind = self.kind(parent).name();
    let Some(list) = self.list_slot_mut(parent) else {
      return Err(CoverError::UnsupportedEdit { kind: parent_kind });
    };
    list.splice(0..0, nodes.iter().copied());
    for &node in &nodes {
      self.nodes[node.index()].parent = Some(parent);
    }
    Ok(())
  }

  fn splice(
    &mut self,
    target: NodeId,
    nodes: Vec<NodeId>,
    offset: usize,
    delete: usize,
  ) -> CoverResult<()> {
    let Some(parent) = self.parent(target) else {
      return Err(CoverError::UnsupportedEdit {
        kind: self.kind(target).name(),
      });
    };
    let parent_kind = self.kind(parent).name();
    let Some(list) = self.list_slot_mut(parent) else {
      return Err(CoverError::UnsupportedEdit { kind: parent_kind });
    };
    let Some(index) = list.iter().position(|&id| id == target) else {
      return Err(CoverError::UnsupportedEdit { kind: parent_kind });
    };
    let at = index + offset;
    list.splice(at..at + delete, nodes.iter().copied());
    for &node in &nodes {
      self.nodes[node.index()].parent = Some(parent);
    }
    Ok(())
  }

  // The only slots that accept sibling insertion. Single-statement positions
  // (an if branch, a loop body, a switch case's consequent) deliberately
  // aren't here; wrapping, not insertion, is how those are grown.
  fn list_slot_mut(&mut self, id: NodeId) -> Option<&mut Vec<NodeId>> {
    match &mut self.nodes[id.index()].kind {
      NodeKind::BlockStatement { body } | NodeKind::Program { body } => Some(body),
      NodeKind::SequenceExpression { expressions, .. } => Some(expressions),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::kind::NodeKind;
  use super::Ast;
  use super::NodeId;
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

  fn preorder_names(ast: &Ast) -> Vec<&'static str> {
    let mut names = Vec::new();
    ast.visit(ast.root(), &mut |id| names.push(ast.kind(id).name()));
    names
  }

  #[test]
  fn children_follow_document_order() {
    let ast = Ast::parse("let a = 1, b = 2;").unwrap();
    assert_eq!(preorder_names(&ast), vec![
      "Program",
      "VariableDeclaration",
      "VariableDeclarator",
      "Identifier",
      "Literal",
      "VariableDeclarator",
      "Identifier",
      "Literal",
    ]);
  }

  #[test]
  fn template_children_interleave_quasis_and_expressions() {
    let ast = Ast::parse("`a${b}c${d}`;").unwrap();
    let template = find(&ast, "TemplateLiteral");
    let names: Vec<_> = ast
      .children(template)
      .into_iter()
      .map(|id| ast.kind(id).name())
      .collect();
    assert_eq!(names, vec![
      "TemplateElement",
      "Identifier",
      "TemplateElement",
      "Identifier",
      "TemplateElement",
    ]);
  }

  #[test]
  fn lines_are_one_based() {
    let ast = Ast::parse("a();\nb();\n\nc();").unwrap();
    let lines: Vec<_> = ast
      .children(ast.root())
      .into_iter()
      .map(|id| ast.line(id))
      .collect();
    assert_eq!(lines, vec![1, 2, 4]);
  }

  #[test]
  fn replaces_expression_statement_expression() {
    let mut ast = Ast::parse("a;").unwrap();
    let stmt = find(&ast, "ExpressionStatement");
    let expr = find(&ast, "Identifier");
    let replacement = {
      let ids = ast.parse_fragment("b;").unwrap();
      match ast.kind(ids[0]) {
        NodeKind::ExpressionStatement { expression } => *expression,
        other => panic!("fragment parsed as {}", other.name()),
      }
    };
    ast.replace_with(expr, vec![replacement]).unwrap();
    match ast.kind(stmt) {
      NodeKind::ExpressionStatement { expression } => assert_eq!(*expression, replacement),
      other => panic!("statement became {}", other.name()),
    };
    assert_eq!(ast.parent(replacement), Some(stmt));
  }

  #[test]
  fn replaces_return_argument() {
    let mut ast = Ast::parse("function f() { return x; }").unwrap();
    let ret = find(&ast, "ReturnStatement");
    let argument = match ast.kind(ret) {
      NodeKind::ReturnStatement {
        argument: Some(argument),
      } => *argument,
      _ => panic!("return lost its argument"),
    };
    let ids = ast.parse_fragment("y;").unwrap();
    let replacement = match ast.kind(ids[0]) {
      NodeKind::ExpressionStatement { expression } => *expression,
      other => panic!("fragment parsed as {}", other.name()),
    };
    ast.replace_with(argument, vec![replacement]).unwrap();
    match ast.kind(ret) {
      NodeKind::ReturnStatement { argument } => assert_eq!(*argument, Some(replacement)),
      other => panic!("return became {}", other.name()),
    };
  }

  #[test]
  fn single_slot_rejects_multiple_nodes() {
    let mut ast = Ast::parse("a;").unwrap();
    let expr = find(&ast, "Identifier");
    let ids = ast.parse_fragment("b; c;").unwrap();
    let replacements: Vec<_> = ids
      .iter()
      .map(|&id| match ast.kind(id) {
        NodeKind::ExpressionStatement { expression } => *expression,
        other => panic!("fragment parsed as {}", other.name()),
      })
      .collect();
    let err = ast.replace_with(expr, replacements).unwrap_err();
    assert!(matches!(err, CoverError::UnsupportedEdit {
      kind: "ExpressionStatement"
    }));
  }

  #[test]
  fn inserts_before_and_after_in_block() {
    let mut ast = Ast::parse("{ b(); }").unwrap();
    let stmt = find(&ast, "ExpressionStatement");
    let before = ast.parse_fragment("a();").unwrap();
    let after = ast.parse_fragment("c();").unwrap();
    ast.insert_before(stmt, before.clone()).unwrap();
    ast.insert_after(stmt, after.clone()).unwrap();
    let block = find(&ast, "BlockStatement");
    let body = ast.children(block);
    assert_eq!(body, vec![before[0], stmt, after[0]]);
    assert_eq!(ast.parent(before[0]), Some(block));
    assert_eq!(ast.parent(after[0]), Some(block));
  }

  #[test]
  fn prepends_into_empty_program() {
    let mut ast = Ast::parse("").unwrap();
    let stmts = ast.parse_fragment("a();").unwrap();
    ast.prepend(ast.root(), stmts.clone()).unwrap();
    assert_eq!(ast.children(ast.root()), stmts);
    assert_eq!(ast.parent(stmts[0]), Some(ast.root()));
  }

  #[test]
  fn root_has_no_splice_position() {
    let mut ast = Ast::parse("a;").unwrap();
    let root = ast.root();
    let err = ast.insert_before(root, vec![]).unwrap_err();
    assert!(matches!(err, CoverError::UnsupportedEdit { kind: "Program" }));
  }

  #[test]
  fn if_branch_is_not_splicable() {
    let mut ast = Ast::parse("if (a) b();").unwrap();
    let stmt = find(&ast, "ExpressionStatement");
    let probe = ast.parse_fragment("p();").unwrap();
    let err = ast.insert_before(stmt, probe).unwrap_err();
    assert!(matches!(err, CoverError::UnsupportedEdit {
      kind: "IfStatement"
    }));
  }

  #[test]
  fn sequence_operands_are_splicable() {
    let mut ast = Ast::parse("(a, b);").unwrap();
    let seq = find(&ast, "SequenceExpression");
    let first = ast.children(seq)[0];
    let ids = ast.parse_fragment("c;").unwrap();
    let operand = match ast.kind(ids[0]) {
      NodeKind::ExpressionStatement { expression } => *expression,
      other => panic!("fragment parsed as {}", other.name()),
    };
    ast.insert_before(first, vec![operand]).unwrap();
    assert_eq!(ast.children(seq).len(), 3);
    assert_eq!(ast.children(seq)[0], operand);
  }
}
