//! Namespace partitioning.

use std::collections::BTreeMap;

use crate::namespace::Namespace;
use crate::schema::SchemaEntry;

/// Namespaces an eligible entry is exposed on.
///
/// `nn` module entries go to the operator namespace only. Everything else is
/// a free function, a method, or both, depending on its declared variants.
pub fn namespaces_for(entry: &SchemaEntry) -> Vec<Namespace> {
    if entry.is_nn() {
        return vec![Namespace::Nn];
    }

    let mut namespaces = Vec::with_capacity(2);
    if entry.variants.function {
        namespaces.push(Namespace::Torch);
    }
    if entry.variants.method {
        namespaces.push(Namespace::Tensor);
    }
    namespaces
}

/// Group eligible entries by namespace (pure). Every namespace has a list, possibly empty.
pub fn partition_by_namespace(entries: Vec<SchemaEntry>) -> BTreeMap<Namespace, Vec<SchemaEntry>> {
    let mut grouped: BTreeMap<Namespace, Vec<SchemaEntry>> =
        Namespace::ALL.iter().map(|ns| (*ns, Vec::new())).collect();

    for entry in entries {
        for namespace in namespaces_for(&entry) {
            grouped.entry(namespace).or_default().push(entry.clone());
        }
    }

    grouped
}
