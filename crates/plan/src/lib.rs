// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SiftDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use expression::{
	AddExpression, AliasExpression, AndExpression, CallExpression, CaseBranch, CaseExpression, ColumnExpression,
	ConstantExpression, DivideExpression, EqualExpression, Expression, GreaterThanExpression, LessThanExpression,
	ModuloExpression, MultiplyExpression, NotEqualExpression, OrExpression, PrefixExpression, PrefixOperator,
	SubtractExpression, TupleExpression,
};
pub use node::{
	AggregateNode, FilterNode, InlineDataNode, JoinCondition, JoinNode, JoinType, LogicalPlan, MapNode, OrderNode,
	PlanNode, ScanId, ScanNode, SinkNode, SortDirection, SortKey, StoreNode, TakeNode, UnionNode,
};
pub use path::SchemaPath;

mod expression;
mod node;
mod path;
