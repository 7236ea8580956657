use super::NodeId;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::num::JsNumber;
use syntax_js::operator::OperatorName;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PropertyKind {
  Get,
  Init,
  Method,
  Set,
}

#[derive(Clone, Debug)]
pub enum LitValue {
  Bool(bool),
  Null,
  Num(JsNumber),
  /// Raw regex text including slashes and flags.
  Regex(String),
  Str(String),
}

/// Every syntax construct the instrumenter understands. A construct outside
/// this set fails conversion; there is no passthrough representation.
///
/// Children are arena handles. Several kinds carry a `parenthesized` flag,
/// mirroring the parser: those nodes render wrapped in parentheses exactly
/// when the flag is set, and rely on it (not on precedence) to survive
/// reparsing.
#[derive(Debug)]
pub enum NodeKind {
  ArrayExpression {
    /// `None` is a hole, as in `[a, , b]`.
    elements: Vec<Option<NodeId>>,
  },
  ArrayPattern {
    /// A trailing RestElement represents `...rest`.
    elements: Vec<Option<NodeId>>,
  },
  ArrowFunctionExpression {
    parenthesized: bool,
    async_: bool,
    params: Vec<NodeId>,
    /// Either a BlockStatement or an expression.
    body: NodeId,
  },
  AssignmentExpression {
    parenthesized: bool,
    operator: OperatorName,
    left: NodeId,
    right: NodeId,
  },
  AssignmentPattern {
    left: NodeId,
    right: NodeId,
  },
  AwaitExpression {
    argument: NodeId,
  },
  BinaryExpression {
    parenthesized: bool,
    operator: OperatorName,
    left: NodeId,
    right: NodeId,
  },
  BlockStatement {
    body: Vec<NodeId>,
  },
  BreakStatement {
    label: Option<String>,
  },
  CallExpression {
    callee: NodeId,
    arguments: Vec<NodeId>,
  },
  CatchClause {
    param: Option<NodeId>,
    body: NodeId,
  },
  ClassDeclaration {
    /// Only absent in a default export.
    name: Option<String>,
    superclass: Option<NodeId>,
    members: Vec<NodeId>,
  },
  ComputedMemberExpression {
    object: NodeId,
    property: NodeId,
  },
  ConditionalExpression {
    test: NodeId,
    consequent: NodeId,
    alternate: NodeId,
  },
  ContinueStatement {
    label: Option<String>,
  },
  DebuggerStatement,
  DoWhileStatement {
    body: NodeId,
    test: NodeId,
  },
  EmptyStatement,
  ExportAllDeclaration {
    exported: Option<String>,
    source: Option<String>,
  },
  ExportDefaultDeclaration {
    declaration: NodeId,
  },
  ExportNamedDeclaration {
    declaration: Option<NodeId>,
    specifiers: Vec<NodeId>,
    source: Option<String>,
  },
  ExportSpecifier {
    local: String,
    exported: String,
  },
  ExpressionStatement {
    expression: NodeId,
  },
  ForOfStatement {
    await_: bool,
    /// VariableDeclaration or an assignment target.
    left: NodeId,
    right: NodeId,
    body: NodeId,
  },
  ForStatement {
    init: Option<NodeId>,
    test: Option<NodeId>,
    update: Option<NodeId>,
    body: NodeId,
  },
  FunctionDeclaration {
    /// Only absent in a default export.
    name: Option<String>,
    async_: bool,
    generator: bool,
    params: Vec<NodeId>,
    body: NodeId,
  },
  FunctionExpression {
    parenthesized: bool,
    name: Option<String>,
    async_: bool,
    generator: bool,
    params: Vec<NodeId>,
    body: NodeId,
  },
  Identifier {
    name: String,
  },
  IfStatement {
    test: NodeId,
    consequent: NodeId,
    alternate: Option<NodeId>,
  },
  ImportDeclaration {
    specifiers: Vec<NodeId>,
    source: String,
  },
  ImportDefaultSpecifier {
    local: String,
  },
  ImportNamespaceSpecifier {
    local: String,
  },
  ImportSpecifier {
    imported: String,
    local: String,
  },
  LabeledStatement {
    label: String,
    body: NodeId,
  },
  Literal {
    value: LitValue,
  },
  LogicalExpression {
    parenthesized: bool,
    operator: OperatorName,
    left: NodeId,
    right: NodeId,
  },
  MemberExpression {
    object: NodeId,
    property: String,
  },
  MethodDefinition {
    key: NodeId,
    computed: bool,
    static_: bool,
    kind: PropertyKind,
    /// Always a FunctionExpression.
    value: NodeId,
  },
  NewExpression {
    callee: NodeId,
    /// `None` for `new Foo` with no argument list at all.
    arguments: Option<Vec<NodeId>>,
  },
  ObjectExpression {
    properties: Vec<NodeId>,
  },
  ObjectPattern {
    /// A trailing RestElement represents `...rest`.
    properties: Vec<NodeId>,
  },
  Program {
    body: Vec<NodeId>,
  },
  Property {
    key: NodeId,
    computed: bool,
    kind: PropertyKind,
    /// `None` is shorthand, as in `{a}`.
    value: Option<NodeId>,
  },
  PropertyDefinition {
    key: NodeId,
    computed: bool,
    static_: bool,
    value: Option<NodeId>,
  },
  RestElement {
    argument: NodeId,
  },
  ReturnStatement {
    argument: Option<NodeId>,
  },
  SequenceExpression {
    parenthesized: bool,
    expressions: Vec<NodeId>,
  },
  SpreadElement {
    argument: NodeId,
  },
  Super,
  SwitchCase {
    /// `None` for `default:`.
    test: Option<NodeId>,
    consequent: Vec<NodeId>,
  },
  SwitchStatement {
    discriminant: NodeId,
    cases: Vec<NodeId>,
  },
  TemplateElement {
    /// Raw text between substitutions, escapes untouched.
    raw: String,
  },
  TemplateLiteral {
    quasis: Vec<NodeId>,
    expressions: Vec<NodeId>,
  },
  ThisExpression,
  ThrowStatement {
    argument: NodeId,
  },
  TryStatement {
    block: NodeId,
    handler: Option<NodeId>,
    finalizer: Option<NodeId>,
  },
  UnaryExpression {
    operator: OperatorName,
    argument: NodeId,
  },
  UpdateExpression {
    /// One of the four Prefix/Postfix increment/decrement operators.
    operator: OperatorName,
    argument: NodeId,
  },
  VariableDeclaration {
    mode: VarDeclMode,
    declarators: Vec<NodeId>,
  },
  VariableDeclarator {
    pattern: NodeId,
    init: Option<NodeId>,
  },
  WhileStatement {
    test: NodeId,
    body: NodeId,
  },
}

impl NodeKind {
  pub fn name(&self) -> &'static str {
    match self {
      NodeKind::ArrayExpression { .. } => "ArrayExpression",
      NodeKind::ArrayPattern { .. } => "ArrayPattern",
      NodeKind::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
      NodeKind::AssignmentExpression { .. } => "AssignmentExpression",
      NodeKind::AssignmentPattern { .. } => "AssignmentPattern",
      NodeKind::AwaitExpression { .. } => "AwaitExpression",
      NodeKind::BinaryExpression { .. } => "BinaryExpression",
      NodeKind::BlockStatement { .. } => "BlockStatement",
      NodeKind::BreakStatement { .. } => "BreakStatement",
      NodeKind::CallExpression { .. } => "CallExpression",
      NodeKind::CatchClause { .. } => "CatchClause",
      NodeKind::ClassDeclaration { .. } => "ClassDeclaration",
      NodeKind::ComputedMemberExpression { .. } => "ComputedMemberExpression",
      NodeKind::ConditionalExpression { .. } => "ConditionalExpression",
      NodeKind::ContinueStatement { .. } => "ContinueStatement",
      NodeKind::DebuggerStatement => "DebuggerStatement",
      NodeKind::DoWhileStatement { .. } => "DoWhileStatement",
      NodeKind::EmptyStatement => "EmptyStatement",
      NodeKind::ExportAllDeclaration { .. } => "ExportAllDeclaration",
      NodeKind::ExportDefaultDeclaration { .. } => "ExportDefaultDeclaration",
      NodeKind::ExportNamedDeclaration { .. } => "ExportNamedDeclaration",
      NodeKind::ExportSpecifier { .. } => "ExportSpecifier",
      NodeKind::ExpressionStatement { .. } => "ExpressionStatement",
      NodeKind::ForOfStatement { .. } => "ForOfStatement",
      NodeKind::ForStatement { .. } => "ForStatement",
      NodeKind::FunctionDeclaration { .. } => "FunctionDeclaration",
      NodeKind::FunctionExpression { .. } => "FunctionExpression",
      NodeKind::Identifier { .. } => "Identifier",
      NodeKind::IfStatement { .. } => "IfStatement",
      NodeKind::ImportDeclaration { .. } => "ImportDeclaration",
      NodeKind::ImportDefaultSpecifier { .. } => "ImportDefaultSpecifier",
      NodeKind::ImportNamespaceSpecifier { .. } => "ImportNamespaceSpecifier",
      NodeKind::ImportSpecifier { .. } => "ImportSpecifier",
      NodeKind::LabeledStatement { .. } => "LabeledStatement",
      NodeKind::Literal { .. } => "Literal",
      NodeKind::LogicalExpression { .. } => "LogicalExpression",
      NodeKind::MemberExpression { .. } => "MemberExpression",
      NodeKind::MethodDefinition { .. } => "MethodDefinition",
      NodeKind::NewExpression { .. } => "NewExpression",
      NodeKind::ObjectExpression { .. } => "ObjectExpression",
      NodeKind::ObjectPattern { .. } => "ObjectPattern",
      NodeKind::Program { .. } => "Program",
      NodeKind::Property { .. } => "Property",
      NodeKind::PropertyDefinition { .. } => "PropertyDefinition",
      NodeKind::RestElement { .. } => "RestElement",
      NodeKind::ReturnStatement { .. } => "ReturnStatement",
      NodeKind::SequenceExpression { .. } => "SequenceExpression",
      NodeKind::SpreadElement { .. } => "SpreadElement",
      NodeKind::Super => "Super",
      NodeKind::SwitchCase { .. } => "SwitchCase",
      NodeKind::SwitchStatement { .. } => "SwitchStatement",
      NodeKind::TemplateElement { .. } => "TemplateElement",
      NodeKind::TemplateLiteral { .. } => "TemplateLiteral",
      NodeKind::ThisExpression => "ThisExpression",
      NodeKind::ThrowStatement { .. } => "ThrowStatement",
      NodeKind::TryStatement { .. } => "TryStatement",
      NodeKind::UnaryExpression { .. } => "UnaryExpression",
      NodeKind::UpdateExpression { .. } => "UpdateExpression",
      NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
      NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
      NodeKind::WhileStatement { .. } => "WhileStatement",
    }
  }

  /// Whether a statement of this kind takes a coverage probe. Fixed at
  /// construction; the instrumenter never flips it.
  pub fn instrumented(&self) -> bool {
    matches!(
      self,
      NodeKind::ExpressionStatement { .. }
        | NodeKind::ReturnStatement { .. }
        | NodeKind::VariableDeclaration { .. }
    )
  }
}
