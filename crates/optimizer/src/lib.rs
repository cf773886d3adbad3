// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SiftDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use error::Error;
pub use field_usage::{FieldRequirement, analyze_field_usage};
pub use references::collect_references;

mod error;
mod field_usage;
mod references;

pub type Result<T> = std::result::Result<T, Error>;
