// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SiftDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Identifier for a column, potentially nested (a field inside a struct),
/// e.g. `customer.address.zip`.
///
/// Equality and hashing are structural over the segment list and
/// case-sensitive. Consumers that need a different notion of column
/// equivalence must normalize before constructing the path; this type is the
/// single place where path identity is defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaPath {
	segments: Vec<String>,
}

impl SchemaPath {
	/// A single-segment path.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			segments: vec![name.into()],
		}
	}

	/// Parses a dotted path, one segment per `.`-separated part.
	pub fn parse(path: &str) -> Self {
		Self {
			segments: path.split('.').map(str::to_string).collect(),
		}
	}

	/// Extends this path by one nested segment.
	pub fn child(&self, name: impl Into<String>) -> Self {
		let mut segments = self.segments.clone();
		segments.push(name.into());
		Self {
			segments,
		}
	}

	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	/// The leading segment, typically the top-level column name.
	pub fn root(&self) -> &str {
		&self.segments[0]
	}
}

impl Display for SchemaPath {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.segments.join("."))
	}
}

impl From<&str> for SchemaPath {
	fn from(path: &str) -> Self {
		SchemaPath::parse(path)
	}
}

impl From<String> for SchemaPath {
	fn from(path: String) -> Self {
		SchemaPath::parse(&path)
	}
}
