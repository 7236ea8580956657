use derive_more::derive::From;
use serde::Serialize;

use crate::token::TT;

use super::expr::{Expr, IdExpr};
use super::func::Func;
use super::node::Node;

/// This is a node as the key may not be the same as source[node.loc], due to decoding/normalization.
#[derive(Debug, Serialize)]
pub struct ClassOrObjMemberDirectKey {
  pub key: String,
  // The original token type is stored here to determine if it was a valid keyword/identifier, useful for shorthands.
  pub tt: TT,
}

// WARNING: This enum must exist, and the two variants cannot be merged by representing Direct with an IdExpr, as it's not a usage of a variable.
#[derive(Debug, Serialize)]
pub enum ClassOrObjKey {
  // Identifier, keyword, string, or number.
  // NOTE: This isn't used by ObjMemberType::Shorthand.
  Direct(Node<ClassOrObjMemberDirectKey>),
  Computed(Node<Expr>),
}

#[derive(Debug, Serialize)]
pub struct ClassOrObjMethod {
  pub func: Node<Func>,
}

#[derive(Debug, Serialize)]
pub struct ClassOrObjGetter {
  pub func: Node<Func>,
}

#[derive(Debug, Serialize)]
pub struct ClassOrObjSetter {
  pub func: Node<Func>,
}

#[derive(Debug, From, Serialize)]
pub enum ClassOrObjVal {
  Getter(Node<ClassOrObjGetter>),
  Method(Node<ClassOrObjMethod>),
  // Must be Some if object, as shorthands are covered by ObjMemberType::Shorthand.
  // Unlike Method, this is not its own struct as if None, there is no source range.
  Prop(Option<Node<Expr>>),
  Setter(Node<ClassOrObjSetter>),
}

#[derive(Debug, Serialize)]
pub enum ObjMemberType {
  Valued {
    key: ClassOrObjKey,
    val: ClassOrObjVal,
  },
  Shorthand {
    id: Node<IdExpr>,
  },
  Rest {
    val: Node<Expr>,
  },
}

#[derive(Debug, Serialize)]
pub struct ClassMember {
  pub key: ClassOrObjKey,
  pub static_: bool,
  pub val: ClassOrObjVal,
}

// This is a node instead of an enum so that its location covers the whole member.
#[derive(Debug, Serialize)]
pub struct ObjMember {
  pub typ: ObjMemberType,
}
