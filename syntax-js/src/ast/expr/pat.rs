use derive_more::derive::From;
use serde::Serialize;

use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::node::Node;

use super::Expr;

#[derive(Debug, From, Serialize)]
#[serde(tag = "$t")]
pub enum Pat {
  Arr(Node<ArrPat>),
  Id(Node<IdPat>),
  Obj(Node<ObjPat>),
}

impl From<Pat> for Expr {
  fn from(value: Pat) -> Self {
    match value {
      Pat::Arr(arr) => Expr::ArrPat(arr),
      Pat::Id(id) => Expr::IdPat(id),
      Pat::Obj(obj) => Expr::ObjPat(obj),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ArrPatElem {
  pub target: Node<Pat>,
  pub default_value: Option<Node<Expr>>,
}

#[derive(Debug, Serialize)]
pub struct ArrPat {
  // Unnamed elements can exist.
  pub elements: Vec<Option<ArrPatElem>>,
  pub rest: Option<Node<Pat>>,
}

// Not really a pattern but functions similarly so kept here in pat.rs.
#[derive(Debug, Serialize)]
pub struct ClassOrFuncName {
  pub name: String,
}

#[derive(Debug, Serialize)]
pub struct IdPat {
  pub name: String,
}

// For an object pattern, `...` must be followed by an identifier.
#[derive(Debug, Serialize)]
pub struct ObjPat {
  pub properties: Vec<Node<ObjPatProp>>,
  pub rest: Option<Node<IdPat>>,
}

#[derive(Debug, Serialize)]
pub struct ObjPatProp {
  pub key: ClassOrObjKey,
  // For a shorthand property, `key` is Direct and `target` is an IdPat of the same name.
  pub target: Node<Pat>,
  pub default_value: Option<Node<Expr>>,
}
