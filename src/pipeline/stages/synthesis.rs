//! Overload synthesis for optional integer parameters.
//!
//! An entry with exactly one `int?` argument is replaced by two entries:
//! one that drops the parameter (and everything declared after it) so the
//! native default applies, and one that makes it required under a name
//! qualified by the parameter, `foo(Tensor x, int? dim)` becoming
//! `foo.dim(Tensor x, int dim)`.
//!
//! Entries with several `int?` arguments pass through unchanged.

use crate::pipeline::ClassifierState;
use crate::schema::{ArgType, SchemaEntry, Signature};

/// Pooling functions need their optional integer; they are not split.
pub const POOLING_PREFIX: &str = "avg_pool";

/// Names withheld from synthesis.
pub const SYNTHESIS_EXEMPT: &[&str] = &["cross"];

/// Result of synthesizing one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synthesis {
    /// No single optional integer to split on.
    Unchanged(SchemaEntry),
    /// Exempt from synthesis and dropped from this pass.
    Withheld(SchemaEntry),
    Split {
        original: SchemaEntry,
        defaulted: SchemaEntry,
        named: SchemaEntry,
    },
}

pub fn is_exempt(entry: &SchemaEntry) -> bool {
    let name = entry.base_name();
    name.starts_with(POOLING_PREFIX) || SYNTHESIS_EXEMPT.contains(&name)
}

fn optional_int_positions(entry: &SchemaEntry) -> Vec<usize> {
    entry
        .arguments()
        .iter()
        .enumerate()
        .filter(|(_, a)| a.ty == ArgType::OptionalInt)
        .map(|(i, _)| i)
        .collect()
}

/// Overload without the optional parameter or anything declared after it.
///
/// When the cut drops an output slot the overload no longer writes into a
/// caller buffer, so its return loses the mutable alias annotations.
pub fn defaulted_overload(entry: &SchemaEntry, position: usize) -> SchemaEntry {
    let (kept, dropped) = entry.arguments().split_at(position);
    let returns = if dropped.iter().any(|a| a.ty.is_output_slot()) {
        strip_output_aliases(&entry.signature.returns)
    } else {
        entry.signature.returns.clone()
    };

    let signature = Signature {
        arguments: kept.to_vec(),
        returns,
        ..entry.signature.clone()
    };
    entry.with_signature(signature)
}

/// `Tensor(a!)` becomes `Tensor`; read-only aliases are left alone.
fn strip_output_aliases(returns: &str) -> String {
    const TENSOR: &str = "Tensor";

    let mut out = String::with_capacity(returns.len());
    let mut rest = returns;
    while let Some(idx) = rest.find("Tensor(") {
        out.push_str(&rest[..idx + TENSOR.len()]);
        rest = &rest[idx + TENSOR.len()..];
        match rest.find(')') {
            Some(close) if rest[..close].ends_with('!') => rest = &rest[close + 1..],
            _ => {
                out.push('(');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Overload named after the optional parameter, which becomes required.
pub fn named_overload(entry: &SchemaEntry, position: usize) -> SchemaEntry {
    let mut signature = entry.signature.clone();
    let param = &mut signature.arguments[position];
    param.ty = ArgType::Int;

    let qualifier = param.name.clone();
    signature.overload = Some(match signature.overload.take() {
        Some(overload) => format!("{}_{}", overload, qualifier),
        None => qualifier,
    });

    entry.with_signature(signature)
}

pub fn synthesize(entry: SchemaEntry) -> Synthesis {
    let positions = optional_int_positions(&entry);
    if positions.is_empty() {
        return Synthesis::Unchanged(entry);
    }
    if is_exempt(&entry) {
        return Synthesis::Withheld(entry);
    }

    match positions.as_slice() {
        [position] => Synthesis::Split {
            defaulted: defaulted_overload(&entry, *position),
            named: named_overload(&entry, *position),
            original: entry,
        },
        _ => Synthesis::Unchanged(entry),
    }
}

/// Replace every single-`int?` candidate with its two overloads (pure).
///
/// Pass-through candidates keep their relative order; synthesized overloads
/// follow them.
pub fn synthesize_overloads(state: ClassifierState) -> ClassifierState {
    let mut candidates = Vec::with_capacity(state.candidates.len());
    let mut synthesized = Vec::new();
    let mut withheld = state.withheld;
    let mut split = state.split;

    for entry in state.candidates {
        match synthesize(entry) {
            Synthesis::Unchanged(entry) => candidates.push(entry),
            Synthesis::Withheld(entry) => withheld.push(entry),
            Synthesis::Split {
                original,
                defaulted,
                named,
            } => {
                log::trace!(
                    "Split {} into {} and {}",
                    original.declared_signature(),
                    named.declared_signature(),
                    defaulted.declared_signature()
                );
                synthesized.push(named);
                synthesized.push(defaulted);
                split.push(original);
            }
        }
    }
    candidates.extend(synthesized);

    ClassifierState {
        candidates,
        withheld,
        split,
        ..state
    }
}
