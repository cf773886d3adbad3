// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SiftDB

use std::collections::HashSet;

use siftdb_plan::{ColumnExpression, Expression, SchemaPath};

/// Collects every schema path referenced anywhere inside an expression.
///
/// Pure and order-independent: the result is a set, so duplicate references
/// collapse and repeated calls over the same expression are identical. An
/// expression with no column leaves (e.g. a constant) yields the empty set.
pub fn collect_references(expression: &Expression) -> HashSet<SchemaPath> {
	let mut paths = HashSet::new();
	collect_into(expression, &mut paths);
	paths
}

fn collect_into(expression: &Expression, paths: &mut HashSet<SchemaPath>) {
	match expression {
		Expression::Column(ColumnExpression(path)) => {
			paths.insert(path.clone());
		}
		// Every composite variant, case expressions included, contributes
		// the union of its operands.
		other => {
			for operand in other.operands() {
				collect_into(operand, paths);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use siftdb_plan::{
		AddExpression, CallExpression, CaseBranch, CaseExpression, ConstantExpression, EqualExpression,
	};

	use super::*;

	fn column(name: &str) -> Expression {
		Expression::column(name)
	}

	fn paths(names: &[&str]) -> HashSet<SchemaPath> {
		names.iter().map(|name| SchemaPath::parse(name)).collect()
	}

	#[test]
	fn test_column_leaf_is_singleton() {
		assert_eq!(collect_references(&column("a.b")), paths(&["a.b"]));
	}

	#[test]
	fn test_constant_is_empty() {
		let constant = Expression::Constant(ConstantExpression::Number(42.0));
		assert!(collect_references(&constant).is_empty());
	}

	#[test]
	fn test_composite_unions_operands() {
		let expr = Expression::Equal(EqualExpression::new(
			Expression::Add(AddExpression::new(column("a"), column("b"))),
			column("c"),
		));
		assert_eq!(collect_references(&expr), paths(&["a", "b", "c"]));
	}

	#[test]
	fn test_call_arguments_collected() {
		let expr = Expression::Call(CallExpression {
			func: "coalesce".to_string(),
			args: vec![column("x"), Expression::Constant(ConstantExpression::Undefined), column("y")],
		});
		assert_eq!(collect_references(&expr), paths(&["x", "y"]));
	}

	#[test]
	fn test_case_collects_conditions_and_results() {
		let expr = Expression::Case(CaseExpression {
			branches: vec![CaseBranch {
				when: column("p"),
				then: column("x"),
			}],
			otherwise: Some(Box::new(column("y"))),
		});
		assert_eq!(collect_references(&expr), paths(&["p", "x", "y"]));
	}

	#[test]
	fn test_duplicate_references_collapse() {
		let expr = Expression::Add(AddExpression::new(column("a"), column("a")));
		assert_eq!(collect_references(&expr), paths(&["a"]));
	}
}
