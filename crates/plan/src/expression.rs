// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SiftDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::path::SchemaPath;

/// An output expression with an optional alias, as produced by projections
/// and aggregations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasExpression {
	pub alias: Option<String>,
	pub expression: Expression,
}

impl AliasExpression {
	pub fn unnamed(expression: Expression) -> Self {
		Self {
			alias: None,
			expression,
		}
	}

	pub fn named(alias: impl Into<String>, expression: Expression) -> Self {
		Self {
			alias: Some(alias.into()),
			expression,
		}
	}
}

impl Display for AliasExpression {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if let Some(alias) = &self.alias {
			write!(f, "{} as {}", self.expression, alias)
		} else {
			Display::fmt(&self.expression, f)
		}
	}
}

/// A scalar expression attached to a plan node.
///
/// The enum is closed: every variant either is the column reference leaf or
/// exposes its direct sub-expressions through [`Expression::operands`].
/// Adding a variant without extending `operands` is a compile error, which
/// keeps reference extraction in sync with the expression model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
	Constant(ConstantExpression),

	Column(ColumnExpression),

	Case(CaseExpression),

	Call(CallExpression),

	Prefix(PrefixExpression),

	Tuple(TupleExpression),

	Add(AddExpression),

	Subtract(SubtractExpression),

	Multiply(MultiplyExpression),

	Divide(DivideExpression),

	Modulo(ModuloExpression),

	Equal(EqualExpression),

	NotEqual(NotEqualExpression),

	GreaterThan(GreaterThanExpression),

	LessThan(LessThanExpression),

	And(AndExpression),

	Or(OrExpression),
}

impl Expression {
	/// Shorthand for a column reference leaf.
	pub fn column(path: impl Into<SchemaPath>) -> Self {
		Expression::Column(ColumnExpression(path.into()))
	}

	/// The direct sub-expressions of this node.
	///
	/// Leaves (constants, column references) have none. Composite variants
	/// return every operand, condition and result branches alike.
	pub fn operands(&self) -> Vec<&Expression> {
		match self {
			Expression::Constant(_) => vec![],
			Expression::Column(_) => vec![],
			Expression::Case(case) => {
				let mut operands = Vec::with_capacity(case.branches.len() * 2 + 1);
				for branch in &case.branches {
					operands.push(&branch.when);
					operands.push(&branch.then);
				}
				if let Some(otherwise) = &case.otherwise {
					operands.push(otherwise.as_ref());
				}
				operands
			}
			Expression::Call(call) => call.args.iter().collect(),
			Expression::Prefix(prefix) => vec![prefix.expression.as_ref()],
			Expression::Tuple(tuple) => tuple.expressions.iter().collect(),
			Expression::Add(AddExpression {
				left,
				right,
			})
			| Expression::Subtract(SubtractExpression {
				left,
				right,
			})
			| Expression::Multiply(MultiplyExpression {
				left,
				right,
			})
			| Expression::Divide(DivideExpression {
				left,
				right,
			})
			| Expression::Modulo(ModuloExpression {
				left,
				right,
			})
			| Expression::Equal(EqualExpression {
				left,
				right,
			})
			| Expression::NotEqual(NotEqualExpression {
				left,
				right,
			})
			| Expression::GreaterThan(GreaterThanExpression {
				left,
				right,
			})
			| Expression::LessThan(LessThanExpression {
				left,
				right,
			})
			| Expression::And(AndExpression {
				left,
				right,
			})
			| Expression::Or(OrExpression {
				left,
				right,
			}) => vec![left.as_ref(), right.as_ref()],
		}
	}
}

impl Display for Expression {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Expression::Constant(constant) => write!(f, "{}", constant),
			Expression::Column(ColumnExpression(path)) => write!(f, "{}", path),
			Expression::Case(case) => write!(f, "{}", case),
			Expression::Call(call) => write!(f, "{}", call),
			Expression::Prefix(prefix) => write!(f, "{}", prefix),
			Expression::Tuple(tuple) => write!(f, "{}", tuple),
			Expression::Add(e) => write!(f, "({} + {})", e.left, e.right),
			Expression::Subtract(e) => write!(f, "({} - {})", e.left, e.right),
			Expression::Multiply(e) => write!(f, "({} * {})", e.left, e.right),
			Expression::Divide(e) => write!(f, "({} / {})", e.left, e.right),
			Expression::Modulo(e) => write!(f, "({} % {})", e.left, e.right),
			Expression::Equal(e) => write!(f, "({} == {})", e.left, e.right),
			Expression::NotEqual(e) => write!(f, "({} != {})", e.left, e.right),
			Expression::GreaterThan(e) => write!(f, "({} > {})", e.left, e.right),
			Expression::LessThan(e) => write!(f, "({} < {})", e.left, e.right),
			Expression::And(e) => write!(f, "({} and {})", e.left, e.right),
			Expression::Or(e) => write!(f, "({} or {})", e.left, e.right),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstantExpression {
	Undefined,
	Bool(bool),
	// any number
	Number(f64),
	// any textual representation
	Text(String),
}

impl Display for ConstantExpression {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ConstantExpression::Undefined => write!(f, "undefined"),
			ConstantExpression::Bool(value) => write!(f, "{}", value),
			ConstantExpression::Number(value) => write!(f, "{}", value),
			ConstantExpression::Text(value) => write!(f, "\"{}\"", value),
		}
	}
}

/// The column reference leaf: names exactly one schema path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnExpression(pub SchemaPath);

/// Conditional expression with when/then branches and an optional else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseExpression {
	pub branches: Vec<CaseBranch>,
	pub otherwise: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseBranch {
	pub when: Expression,
	pub then: Expression,
}

impl Display for CaseExpression {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "case")?;
		for branch in &self.branches {
			write!(f, " when {} then {}", branch.when, branch.then)?;
		}
		if let Some(otherwise) = &self.otherwise {
			write!(f, " else {}", otherwise)?;
		}
		write!(f, " end")
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
	pub func: String,
	pub args: Vec<Expression>,
}

impl Display for CallExpression {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let args = self.args.iter().map(|arg| format!("{}", arg)).collect::<Vec<_>>().join(", ");
		write!(f, "{}({})", self.func, args)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefixExpression {
	pub operator: PrefixOperator,
	pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrefixOperator {
	Plus,
	Minus,
	Not,
}

impl Display for PrefixExpression {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.operator {
			PrefixOperator::Plus => write!(f, "+{}", self.expression),
			PrefixOperator::Minus => write!(f, "-{}", self.expression),
			PrefixOperator::Not => write!(f, "not {}", self.expression),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleExpression {
	pub expressions: Vec<Expression>,
}

impl Display for TupleExpression {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let inner = self.expressions.iter().map(|e| format!("{}", e)).collect::<Vec<_>>().join(", ");
		write!(f, "({})", inner)
	}
}

macro_rules! binary_expression {
	($($name:ident),* $(,)?) => {
		$(
			#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
			pub struct $name {
				pub left: Box<Expression>,
				pub right: Box<Expression>,
			}

			impl $name {
				pub fn new(left: Expression, right: Expression) -> Self {
					Self {
						left: Box::new(left),
						right: Box::new(right),
					}
				}
			}
		)*
	};
}

binary_expression!(
	AddExpression,
	SubtractExpression,
	MultiplyExpression,
	DivideExpression,
	ModuloExpression,
	EqualExpression,
	NotEqualExpression,
	GreaterThanExpression,
	LessThanExpression,
	AndExpression,
	OrExpression,
);

#[cfg(test)]
mod tests {
	use super::*;

	fn column(name: &str) -> Expression {
		Expression::column(name)
	}

	#[test]
	fn test_leaves_have_no_operands() {
		assert!(column("a").operands().is_empty());
		assert!(Expression::Constant(ConstantExpression::Number(1.0)).operands().is_empty());
	}

	#[test]
	fn test_case_operands_cover_all_branches() {
		let case = Expression::Case(CaseExpression {
			branches: vec![CaseBranch {
				when: column("p"),
				then: column("x"),
			}],
			otherwise: Some(Box::new(column("y"))),
		});

		let operands = case.operands();
		assert_eq!(operands.len(), 3);
	}

	#[test]
	fn test_call_operands_are_args() {
		let call = Expression::Call(CallExpression {
			func: "coalesce".to_string(),
			args: vec![column("a"), column("b")],
		});
		assert_eq!(call.operands().len(), 2);
	}

	#[test]
	fn test_binary_operands() {
		let add = Expression::Add(AddExpression::new(column("a"), column("b")));
		assert_eq!(add.operands().len(), 2);
	}

	#[test]
	fn test_display() {
		let expr = Expression::Equal(EqualExpression::new(
			column("orders.amount"),
			Expression::Constant(ConstantExpression::Number(100.0)),
		));
		assert_eq!(expr.to_string(), "(orders.amount == 100)");
	}
}
