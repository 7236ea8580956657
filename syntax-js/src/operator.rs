use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentExponentiation,
  AssignmentMultiplication,
  AssignmentRemainder,
  AssignmentSubtraction,
  Await,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Call,
  Comma,
  ComputedMemberAccess,
  Conditional,
  // Pseudo-operator that represents the alternate branch of a `Conditional`. It exists to carry
  // the minimum precedence that branch must be parsed with, since assignments are legal there.
  ConditionalAlternate,
  Delete,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  MemberAccess,
  Multiplication,
  New,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
  Yield,
  YieldDelegated,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      OperatorName::Assignment
        | OperatorName::AssignmentAddition
        | OperatorName::AssignmentBitwiseAnd
        | OperatorName::AssignmentBitwiseLeftShift
        | OperatorName::AssignmentBitwiseOr
        | OperatorName::AssignmentBitwiseRightShift
        | OperatorName::AssignmentBitwiseUnsignedRightShift
        | OperatorName::AssignmentBitwiseXor
        | OperatorName::AssignmentDivision
        | OperatorName::AssignmentExponentiation
        | OperatorName::AssignmentMultiplication
        | OperatorName::AssignmentRemainder
        | OperatorName::AssignmentSubtraction
    )
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

pub struct Operator {
  pub name: OperatorName,
  pub precedence: u8,
  pub associativity: Associativity,
}

// Precedence values follow the standard JavaScript operator table, where a higher value binds
// more tightly. The Pratt parser computes the minimum precedence for an operand as
// `precedence + 1` for left-associative operators and `precedence` for right-associative ones.
#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  let mut map = HashMap::<OperatorName, Operator>::new();
  let mut add = |name: OperatorName, precedence: u8, associativity: Associativity| {
    map.insert(name, Operator { name, precedence, associativity });
  };
  add(OperatorName::MemberAccess,                        18, Associativity::Left);
  add(OperatorName::ComputedMemberAccess,                18, Associativity::Left);
  add(OperatorName::Call,                                18, Associativity::Left);
  add(OperatorName::New,                                 17, Associativity::Right);
  add(OperatorName::PostfixIncrement,                    16, Associativity::Left);
  add(OperatorName::PostfixDecrement,                    16, Associativity::Left);
  add(OperatorName::LogicalNot,                          15, Associativity::Right);
  add(OperatorName::BitwiseNot,                          15, Associativity::Right);
  add(OperatorName::UnaryPlus,                           15, Associativity::Right);
  add(OperatorName::UnaryNegation,                       15, Associativity::Right);
  add(OperatorName::PrefixIncrement,                     15, Associativity::Right);
  add(OperatorName::PrefixDecrement,                     15, Associativity::Right);
  add(OperatorName::Typeof,                              15, Associativity::Right);
  add(OperatorName::Void,                                15, Associativity::Right);
  add(OperatorName::Delete,                              15, Associativity::Right);
  add(OperatorName::Await,                               15, Associativity::Right);
  add(OperatorName::Exponentiation,                      14, Associativity::Right);
  add(OperatorName::Multiplication,                      13, Associativity::Left);
  add(OperatorName::Division,                            13, Associativity::Left);
  add(OperatorName::Remainder,                           13, Associativity::Left);
  add(OperatorName::Addition,                            12, Associativity::Left);
  add(OperatorName::Subtraction,                         12, Associativity::Left);
  add(OperatorName::BitwiseLeftShift,                    11, Associativity::Left);
  add(OperatorName::BitwiseRightShift,                   11, Associativity::Left);
  add(OperatorName::BitwiseUnsignedRightShift,           11, Associativity::Left);
  add(OperatorName::LessThan,                            10, Associativity::Left);
  add(OperatorName::LessThanOrEqual,                     10, Associativity::Left);
  add(OperatorName::GreaterThan,                         10, Associativity::Left);
  add(OperatorName::GreaterThanOrEqual,                  10, Associativity::Left);
  add(OperatorName::In,                                  10, Associativity::Left);
  add(OperatorName::Instanceof,                          10, Associativity::Left);
  add(OperatorName::Equality,                             9, Associativity::Left);
  add(OperatorName::Inequality,                           9, Associativity::Left);
  add(OperatorName::StrictEquality,                       9, Associativity::Left);
  add(OperatorName::StrictInequality,                     9, Associativity::Left);
  add(OperatorName::BitwiseAnd,                           8, Associativity::Left);
  add(OperatorName::BitwiseXor,                           7, Associativity::Left);
  add(OperatorName::BitwiseOr,                            6, Associativity::Left);
  add(OperatorName::LogicalAnd,                           5, Associativity::Left);
  add(OperatorName::LogicalOr,                            4, Associativity::Left);
  add(OperatorName::Conditional,                          3, Associativity::Right);
  add(OperatorName::ConditionalAlternate,                 2, Associativity::Right);
  add(OperatorName::Assignment,                           2, Associativity::Right);
  add(OperatorName::AssignmentAddition,                   2, Associativity::Right);
  add(OperatorName::AssignmentBitwiseAnd,                 2, Associativity::Right);
  add(OperatorName::AssignmentBitwiseLeftShift,           2, Associativity::Right);
  add(OperatorName::AssignmentBitwiseOr,                  2, Associativity::Right);
  add(OperatorName::AssignmentBitwiseRightShift,          2, Associativity::Right);
  add(OperatorName::AssignmentBitwiseUnsignedRightShift,  2, Associativity::Right);
  add(OperatorName::AssignmentBitwiseXor,                 2, Associativity::Right);
  add(OperatorName::AssignmentDivision,                   2, Associativity::Right);
  add(OperatorName::AssignmentExponentiation,             2, Associativity::Right);
  add(OperatorName::AssignmentMultiplication,             2, Associativity::Right);
  add(OperatorName::AssignmentRemainder,                  2, Associativity::Right);
  add(OperatorName::AssignmentSubtraction,                2, Associativity::Right);
  add(OperatorName::Yield,                                2, Associativity::Right);
  add(OperatorName::YieldDelegated,                       2, Associativity::Right);
  add(OperatorName::Comma,                                1, Associativity::Left);
  map
});
