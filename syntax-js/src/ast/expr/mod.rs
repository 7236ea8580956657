pub mod lit;
pub mod pat;

use derive_more::derive::{From, TryInto};
use lit::{
  LitArrExpr, LitBoolExpr, LitNullExpr, LitNumExpr, LitObjExpr, LitRegexExpr, LitStrExpr,
  LitTemplateExpr, LitTemplatePart,
};
use pat::{ArrPat, ClassOrFuncName, IdPat, ObjPat};
use serde::Serialize;

use crate::operator::OperatorName;

use super::{func::Func, node::Node};

// We must wrap each variant with Node<T> so the variant syntax keeps its own location.
#[derive(Debug, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Expr {
  ArrowFunc(Node<ArrowFuncExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Class(Node<ClassExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  Member(Node<MemberExpr>),
  Super(Node<SuperExpr>),
  TaggedTemplate(Node<TaggedTemplateExpr>),
  This(Node<ThisExpr>),
  Unary(Node<UnaryExpr>),
  UnaryPostfix(Node<UnaryPostfixExpr>),

  // Literals.
  LitArr(Node<LitArrExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitRegex(Node<LitRegexExpr>),
  LitStr(Node<LitStrExpr>),
  LitTemplate(Node<LitTemplateExpr>),

  // Patterns, for assignment targets.
  ArrPat(Node<ArrPat>),
  IdPat(Node<IdPat>),
  ObjPat(Node<ObjPat>),
}

#[derive(Debug, Serialize)]
pub struct CallArg {
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct ArrowFuncExpr {
  // Set when the whole arrow function was wrapped in parentheses. The flag survives into
  // downstream representations so a generator can reproduce the grouping.
  pub parenthesized: bool,
  pub func: Node<Func>,
}

#[derive(Debug, Serialize)]
pub struct BinaryExpr {
  // See ArrowFuncExpr. Only meaningful for assignment and logical operators.
  pub parenthesized: bool,
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct CallExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug, Serialize)]
pub struct ClassExpr {
  pub name: Option<Node<ClassOrFuncName>>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<crate::ast::class_or_object::ClassMember>>,
}

#[derive(Debug, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct ComputedMemberExpr {
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct FuncExpr {
  // See ArrowFuncExpr.
  pub parenthesized: bool,
  pub name: Option<Node<ClassOrFuncName>>,
  pub func: Node<Func>,
}

#[derive(Debug, Serialize)]
pub struct IdExpr {
  pub name: String,
}

// Dedicated type to easily distinguish from IdExpr when analysing; the right side is not a
// variable usage.
#[derive(Debug, Serialize)]
pub struct MemberExpr {
  pub left: Node<Expr>,
  pub right: String,
}

#[derive(Debug, Serialize)]
pub struct SuperExpr {}

#[derive(Debug, Serialize)]
pub struct ThisExpr {}

#[derive(Debug, Serialize)]
pub struct TaggedTemplateExpr {
  pub function: Node<Expr>,
  pub parts: Vec<LitTemplatePart>,
}

#[derive(Debug, Serialize)]
pub struct UnaryExpr {
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct UnaryPostfixExpr {
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}
