//! Shared primitive types used across the generator and the query layer.

/// Full state name, e.g. "New York".
pub type StateName = String;

/// Canonical quarter tag, e.g. "2020-Q2", or the "all" sentinel.
pub type Quarter = String;

/// Head count of people moving along one flow.
pub type Magnitude = u64;

/// Master seed for a generation run.
pub type Seed = u64;
