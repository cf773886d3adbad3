// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SiftDB

/// Failures of the plan analyses in this crate.
///
/// All variants are fatal to the analysis call: the analyses are pure and
/// deterministic, so retrying with the same input cannot succeed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	/// The plan graph does not have exactly one root operator. Unhandled
	/// node or expression variants are not represented here: the plan and
	/// expression enums are closed and matched exhaustively, so an
	/// out-of-sync traversal fails to compile instead.
	#[error("field usage analysis requires a plan with exactly one root, found {found}")]
	RootCount {
		found: usize,
	},
}
