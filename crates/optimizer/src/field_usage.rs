// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SiftDB

//! Scan field usage analysis.
//!
//! Walks a logical plan from its single root and records, for every scan
//! leaf, the columns that must be read from the underlying source to satisfy
//! the plan above it. Columns needed in the output (`projected`) are kept
//! apart from columns consumed only by predicates, join conditions and sort
//! keys (`referenced`); projection pushdown treats the two differently.
//!
//! The walk carries a [`FieldRequirement`] accumulator downward, owned by
//! exactly one recursive call at a time. Branching operators clone it once
//! per child, so sibling subtrees can never observe each other's columns.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use siftdb_plan::{LogicalPlan, PlanNode, ScanId, SchemaPath};
use tracing::{debug, trace};

use crate::{Error, references::collect_references};

/// The columns a point in the plan requires from everything beneath it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRequirement {
	projected: HashSet<SchemaPath>,
	referenced: HashSet<SchemaPath>,
}

impl FieldRequirement {
	pub fn new() -> Self {
		Self::default()
	}

	/// Columns that must appear in the subtree's output rows.
	pub fn projected(&self) -> &HashSet<SchemaPath> {
		&self.projected
	}

	/// Columns consumed by logic (predicates, keys) without necessarily
	/// being emitted.
	pub fn referenced(&self) -> &HashSet<SchemaPath> {
		&self.referenced
	}

	pub fn add_projected(&mut self, path: SchemaPath) {
		self.projected.insert(path);
	}

	pub fn add_all_projected(&mut self, paths: impl IntoIterator<Item = SchemaPath>) {
		self.projected.extend(paths);
	}

	pub fn add_referenced(&mut self, path: SchemaPath) {
		self.referenced.insert(path);
	}

	pub fn add_all_referenced(&mut self, paths: impl IntoIterator<Item = SchemaPath>) {
		self.referenced.extend(paths);
	}

	pub fn is_empty(&self) -> bool {
		self.projected.is_empty() && self.referenced.is_empty()
	}
}

/// Determines the field requirement of every scan reachable from the plan's
/// root.
///
/// Every reachable scan gets an entry, including scans no column is required
/// from (their requirement is empty). The plan is not mutated; repeated runs
/// over the same plan produce equal maps.
///
/// Fails with [`Error::RootCount`] unless the plan has exactly one root; no
/// partial map is returned in that case.
pub fn analyze_field_usage(plan: &LogicalPlan) -> crate::Result<HashMap<ScanId, FieldRequirement>> {
	let roots = plan.roots();
	let [root] = roots else {
		return Err(Error::RootCount {
			found: roots.len(),
		});
	};

	debug!(root = root.kind(), "analyzing scan field usage");
	let mut analyzer = FieldUsageAnalyzer::default();
	analyzer.visit(root, FieldRequirement::new());
	debug!(scans = analyzer.scan_fields.len(), "scan field usage analysis complete");
	Ok(analyzer.scan_fields)
}

#[derive(Default)]
struct FieldUsageAnalyzer {
	scan_fields: HashMap<ScanId, FieldRequirement>,
}

impl FieldUsageAnalyzer {
	fn visit(&mut self, node: &PlanNode, mut fields: FieldRequirement) {
		match node {
			PlanNode::Scan(scan) => {
				trace!(scan = scan.id.0, source = %scan.source, "recording scan fields");
				self.scan_fields.insert(scan.id, fields);
			}
			PlanNode::Sink(sink) => self.visit(&sink.input, fields),
			PlanNode::Store(store) => self.visit(&store.input, fields),
			PlanNode::Filter(filter) => {
				fields.add_all_referenced(collect_references(&filter.condition));
				self.visit(&filter.input, fields);
			}
			PlanNode::Map(map) => {
				for expression in &map.expressions {
					fields.add_all_projected(collect_references(&expression.expression));
				}
				self.visit(&map.input, fields);
			}
			PlanNode::Aggregate(aggregate) => {
				// Aggregation materializes all grouping keys and
				// aggregate operands no matter what is consumed
				// above it; the inherited requirement stops here.
				let mut fresh = FieldRequirement::new();
				for key in &aggregate.by {
					fresh.add_all_projected(collect_references(&key.expression));
				}
				for expression in &aggregate.map {
					fresh.add_all_projected(collect_references(&expression.expression));
				}
				self.visit(&aggregate.input, fresh);
			}
			PlanNode::Join(join) => {
				let mut left = fields.clone();
				for condition in &join.conditions {
					left.add_all_referenced(collect_references(&condition.left));
				}
				self.visit(&join.left, left);

				// The original requirement moves into the right
				// fork; the two sides share nothing mutable.
				let mut right = fields;
				for condition in &join.conditions {
					right.add_all_referenced(collect_references(&condition.right));
				}
				self.visit(&join.right, right);
			}
			PlanNode::Union(union) => {
				for input in &union.inputs {
					self.visit(input, fields.clone());
				}
			}
			PlanNode::Order(order) => {
				for key in &order.by {
					fields.add_all_referenced(collect_references(&key.expression));
				}
				self.visit(&order.input, fields);
			}
			PlanNode::Take(take) => self.visit(&take.input, fields),
			// A constant row source has no upstream columns to resolve.
			PlanNode::InlineData(_) => {}
		}
	}
}
