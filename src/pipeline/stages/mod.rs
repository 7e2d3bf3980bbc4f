//! Classification stages, in the order they run.

pub mod filtering;
pub mod partition;
pub mod synthesis;

pub use filtering::{defer_entries, exclude_entries, ExclusionReason, ExclusionRules};
pub use partition::{namespaces_for, partition_by_namespace};
pub use synthesis::{synthesize, synthesize_overloads, Synthesis};
