//! Pipelines driven by the two binaries.

pub mod skills;
pub mod supports;
