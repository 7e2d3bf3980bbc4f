//! Entry classification.
//!
//! Decides which schema entries become bindings and on which namespaces.
//! The work is an ordered sequence of pure stages over immutable entry
//! collections:
//!
//! 1. `exclude` drops internal, backward-pass, hand-written and named-dimension entries
//! 2. `defer` sets aside entries with argument types the renderer can't express
//! 3. `synthesize` splits single optional-integer entries into two overloads
//! 4. `partition` groups the survivors by namespace

pub mod stage;
pub mod stages;

use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::namespace::Namespace;
use crate::schema::SchemaEntry;
use stage::{run_infallible, PureStage, Stage};
use stages::{
    defer_entries, exclude_entries, partition_by_namespace, synthesize_overloads, ExclusionRules,
};

/// Working set threaded through the classification stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierState {
    /// Entries still eligible for generation.
    pub candidates: Vec<SchemaEntry>,
    pub excluded: Vec<SchemaEntry>,
    pub deferred: Vec<SchemaEntry>,
    /// Exempt from overload synthesis and not emitted.
    pub withheld: Vec<SchemaEntry>,
    /// Originals replaced by a synthesized overload pair.
    pub split: Vec<SchemaEntry>,
}

impl ClassifierState {
    pub fn new(candidates: Vec<SchemaEntry>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }
}

type StateStage<'a> =
    Box<dyn Stage<Input = ClassifierState, Output = ClassifierState, Error = Infallible> + 'a>;

/// Outcome of classifying a whole schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub namespaces: BTreeMap<Namespace, Vec<SchemaEntry>>,
    pub excluded: Vec<SchemaEntry>,
    pub deferred: Vec<SchemaEntry>,
    pub withheld: Vec<SchemaEntry>,
    pub split: Vec<SchemaEntry>,
}

impl Classification {
    /// Eligible entries for one namespace, in classification order.
    pub fn entries(&self, namespace: Namespace) -> &[SchemaEntry] {
        self.namespaces
            .get(&namespace)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Filtering and synthesis stages, in run order.
fn candidate_stages(rules: &ExclusionRules) -> Vec<StateStage<'_>> {
    vec![
        Box::new(PureStage::new("exclude", move |state: ClassifierState| {
            exclude_entries(state, rules)
        })),
        Box::new(PureStage::new("defer", defer_entries)),
        Box::new(PureStage::new("synthesize", synthesize_overloads)),
    ]
}

/// Run every filtering and synthesis stage over `entries` (pure).
pub fn filter_candidates(entries: &[SchemaEntry], rules: &ExclusionRules) -> ClassifierState {
    candidate_stages(rules)
        .iter()
        .fold(ClassifierState::new(entries.to_vec()), |state, stage| {
            let _span = tracing::debug_span!("classify", stage = stage.name()).entered();
            let before = state.candidates.len();
            let next = run_infallible(stage.as_ref(), state);
            tracing::debug!(before, after = next.candidates.len(), "stage complete");
            next
        })
}

/// Classify schema entries into per-namespace binding lists.
pub fn classify(entries: &[SchemaEntry], rules: &ExclusionRules) -> Classification {
    let state = filter_candidates(entries, rules);

    let partition = PureStage::new("partition", partition_by_namespace);
    let namespaces = run_infallible(&partition, state.candidates);

    Classification {
        namespaces,
        excluded: state.excluded,
        deferred: state.deferred,
        withheld: state.withheld,
        split: state.split,
    }
}
