use serde::Serialize;

use crate::ast::class_or_object::ObjMember;
use crate::ast::node::Node;
use crate::num::JsNumber;

use super::Expr;

#[derive(Debug, Serialize)]
pub enum LitArrElem {
  Single(Node<Expr>),
  Rest(Node<Expr>),
  Empty,
}

#[derive(Debug, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<LitArrElem>,
}

#[derive(Debug, Serialize)]
pub struct LitBoolExpr {
  pub value: bool,
}

#[derive(Debug, Serialize)]
pub struct LitNullExpr {}

#[derive(Debug, Serialize)]
pub struct LitNumExpr {
  pub value: JsNumber,
}

#[derive(Debug, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Debug, Serialize)]
pub struct LitRegexExpr {
  // Including delimiter slashes and any flags.
  pub value: String,
}

#[derive(Debug, Serialize)]
pub struct LitStrExpr {
  // The decoded value, not the raw source text.
  pub value: String,
}

#[derive(Debug, Serialize)]
pub struct LitTemplateExpr {
  pub parts: Vec<LitTemplatePart>,
}

#[derive(Debug, Serialize)]
pub enum LitTemplatePart {
  Substitution(Node<Expr>),
  // Raw source text of the quasi, escapes untouched.
  String(String),
}
