// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SiftDB

use serde::{Deserialize, Serialize};

use crate::expression::{AliasExpression, Expression};

/// Identity of a scan node.
///
/// Assigned by the plan construction layer, unique per scan and stable for
/// the lifetime of the plan. Two structurally identical scans of the same
/// source carry distinct ids, so analyses keyed by [`ScanId`] keep them
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanId(pub u32);

/// A logical query plan: a tree of operators hanging off its root(s).
///
/// A well-formed plan has exactly one root sink or store operator; analyses
/// that require this check it themselves rather than trusting the container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalPlan {
	roots: Vec<PlanNode>,
}

impl LogicalPlan {
	pub fn new(roots: Vec<PlanNode>) -> Self {
		Self {
			roots,
		}
	}

	pub fn roots(&self) -> &[PlanNode] {
		&self.roots
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanNode {
	Scan(ScanNode),
	Filter(FilterNode),
	Map(MapNode),
	Aggregate(AggregateNode),
	Join(JoinNode),
	Take(TakeNode),
	Order(OrderNode),
	Union(UnionNode),
	InlineData(InlineDataNode),
	Store(StoreNode),
	Sink(SinkNode),
}

impl PlanNode {
	/// The operator name, for diagnostics and tracing.
	pub fn kind(&self) -> &'static str {
		match self {
			PlanNode::Scan(_) => "scan",
			PlanNode::Filter(_) => "filter",
			PlanNode::Map(_) => "map",
			PlanNode::Aggregate(_) => "aggregate",
			PlanNode::Join(_) => "join",
			PlanNode::Take(_) => "take",
			PlanNode::Order(_) => "order",
			PlanNode::Union(_) => "union",
			PlanNode::InlineData(_) => "inline_data",
			PlanNode::Store(_) => "store",
			PlanNode::Sink(_) => "sink",
		}
	}
}

/// Leaf read from a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanNode {
	pub id: ScanId,
	pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterNode {
	pub condition: Expression,
	pub input: Box<PlanNode>,
}

/// Projection: computes the output expressions over its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
	pub expressions: Vec<AliasExpression>,
	pub input: Box<PlanNode>,
}

/// Grouping aggregation: `by` holds the grouping keys, `map` the aggregate
/// expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateNode {
	pub by: Vec<AliasExpression>,
	pub map: Vec<AliasExpression>,
	pub input: Box<PlanNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinNode {
	pub join_type: JoinType,
	pub conditions: Vec<JoinCondition>,
	pub left: Box<PlanNode>,
	pub right: Box<PlanNode>,
}

/// One equi-join condition; `left` evaluates against the left input's
/// columns, `right` against the right input's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinCondition {
	pub left: Expression,
	pub right: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
	Inner,
	Left,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeNode {
	pub limit: usize,
	pub input: Box<PlanNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderNode {
	pub by: Vec<SortKey>,
	pub input: Box<PlanNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortKey {
	pub expression: Expression,
	pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
	Asc,
	Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionNode {
	pub inputs: Vec<PlanNode>,
	pub distinct: bool,
}

/// Constant row source; has no upstream input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineDataNode {
	pub rows: Vec<Vec<Expression>>,
}

/// Writes its input to a named target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreNode {
	pub target: String,
	pub input: Box<PlanNode>,
}

/// Terminal output operator at the top of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkNode {
	pub input: Box<PlanNode>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_kind_names() {
		let scan = PlanNode::Scan(ScanNode {
			id: ScanId(0),
			source: "orders".to_string(),
		});
		assert_eq!(scan.kind(), "scan");

		let sink = PlanNode::Sink(SinkNode {
			input: Box::new(scan),
		});
		assert_eq!(sink.kind(), "sink");
	}

	#[test]
	fn test_plan_serde_round_trip() {
		let plan = LogicalPlan::new(vec![PlanNode::Sink(SinkNode {
			input: Box::new(PlanNode::Filter(FilterNode {
				condition: Expression::column("amount"),
				input: Box::new(PlanNode::Scan(ScanNode {
					id: ScanId(7),
					source: "orders".to_string(),
				})),
			})),
		})]);

		let json = serde_json::to_string(&plan).unwrap();
		let decoded: LogicalPlan = serde_json::from_str(&json).unwrap();
		assert_eq!(decoded, plan);
	}

	#[test]
	fn test_scan_ids_distinguish_identical_scans() {
		let a = ScanNode {
			id: ScanId(1),
			source: "orders".to_string(),
		};
		let b = ScanNode {
			id: ScanId(2),
			source: "orders".to_string(),
		};
		assert_ne!(a.id, b.id);
		assert_eq!(a.source, b.source);
	}
}
