//! Exclusion and deferral stages.
//!
//! Excluded entries are dropped for good. Deferred entries are declared
//! bindings whose argument types the renderer cannot express yet; they are
//! kept aside so they can be reported.

use std::collections::BTreeSet;

use crate::pipeline::ClassifierState;
use crate::schema::{ArgType, SchemaEntry};

/// Names starting with this are internal to the native library.
pub const INTERNAL_PREFIX: &str = "_";

/// Gradient kernels are never exposed.
pub const BACKWARD_SUFFIX: &str = "_backward";

/// Functions whose bindings are written by hand.
pub const DEFAULT_SKIP_BINDINGS: &[&str] = &["unique_dim_consecutive", "einsum", "normal"];

/// Why an entry was excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    InternalName,
    BackwardPass,
    HandWritten,
    NamedDimension,
}

/// Exclusion rules applied to every schema entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRules {
    skip_bindings: BTreeSet<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            skip_bindings: DEFAULT_SKIP_BINDINGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExclusionRules {
    /// Extend the deny-list with extra names.
    pub fn with_skip_bindings<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_bindings.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn skip_bindings(&self) -> impl Iterator<Item = &str> {
        self.skip_bindings.iter().map(String::as_str)
    }

    /// First rule that drops `entry`, if any.
    pub fn exclusion_reason(&self, entry: &SchemaEntry) -> Option<ExclusionReason> {
        let name = entry.base_name();
        if name.starts_with(INTERNAL_PREFIX) {
            Some(ExclusionReason::InternalName)
        } else if name.ends_with(BACKWARD_SUFFIX) {
            Some(ExclusionReason::BackwardPass)
        } else if self.skip_bindings.contains(name) {
            Some(ExclusionReason::HandWritten)
        } else if entry
            .arguments()
            .iter()
            .any(|a| matches!(a.ty, ArgType::DimnameRef(_)))
        {
            Some(ExclusionReason::NamedDimension)
        } else {
            None
        }
    }

    pub fn excludes(&self, entry: &SchemaEntry) -> bool {
        self.exclusion_reason(entry).is_some()
    }
}

/// Whether any argument type is outside what the renderer supports.
pub fn needs_deferral(entry: &SchemaEntry) -> bool {
    entry.arguments().iter().any(|a| a.ty.needs_deferral())
}

/// Move excluded candidates out of the candidate set (pure).
pub fn exclude_entries(state: ClassifierState, rules: &ExclusionRules) -> ClassifierState {
    let (excluded, candidates): (Vec<_>, Vec<_>) = state
        .candidates
        .into_iter()
        .partition(|entry| rules.excludes(entry));

    ClassifierState {
        candidates,
        excluded: state.excluded.into_iter().chain(excluded).collect(),
        ..state
    }
}

/// Move candidates with unsupported argument types into the deferred set (pure).
pub fn defer_entries(state: ClassifierState) -> ClassifierState {
    let (deferred, candidates): (Vec<_>, Vec<_>) =
        state.candidates.into_iter().partition(needs_deferral);

    for entry in &deferred {
        log::debug!("Deferring {}", entry.declared_signature());
    }

    ClassifierState {
        candidates,
        deferred: state.deferred.into_iter().chain(deferred).collect(),
        ..state
    }
}
