//! Node Affinity Rewriting
//!
//! Removes, adds and renames topology requirements in a PV's required node
//! affinity. The term list is edited in place; terms that do not mention the
//! key being rewritten are left exactly as they were.

use super::keys::NODE_SELECTOR_OP_IN;
use crate::error::{Error, Result};
use k8s_openapi::api::core::v1::{
    NodeSelector, NodeSelectorRequirement, NodeSelectorTerm, PersistentVolume,
};
use std::collections::BTreeSet;
use tracing::{debug, warn};

// =============================================================================
// Accessors
// =============================================================================

fn node_selector_mut(pv: &mut PersistentVolume) -> Option<&mut NodeSelector> {
    pv.spec
        .as_mut()
        .and_then(|spec| spec.node_affinity.as_mut())
        .and_then(|affinity| affinity.required.as_mut())
}

/// Required node selector of a PV, created empty if missing
fn ensure_node_selector(pv: &mut PersistentVolume) -> &mut NodeSelector {
    pv.spec
        .get_or_insert_with(Default::default)
        .node_affinity
        .get_or_insert_with(Default::default)
        .required
        .get_or_insert_with(Default::default)
}

fn term_has_key(term: &NodeSelectorTerm, key: &str) -> bool {
    term.match_expressions
        .as_ref()
        .is_some_and(|exprs| exprs.iter().any(|r| r.key == key))
}

fn term_has_fields(term: &NodeSelectorTerm) -> bool {
    term.match_fields.as_ref().is_some_and(|f| !f.is_empty())
}

// =============================================================================
// Operations
// =============================================================================

/// Trim, drop blanks, sort and deduplicate topology values
pub fn normalize_topology_values<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let unique: BTreeSet<&str> = values
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| !v.is_empty())
        .collect();
    unique.into_iter().map(String::from).collect()
}

/// Remove every requirement on `key` from the PV's node affinity
///
/// Terms left without any requirement are dropped. Returns true if at least
/// one requirement was removed; a PV without the key is left untouched.
pub fn remove_topology(pv: &mut PersistentVolume, key: &str) -> bool {
    let Some(selector) = node_selector_mut(pv) else {
        return false;
    };

    let mut removed = false;
    selector.node_selector_terms.retain_mut(|term| {
        let Some(expressions) = term.match_expressions.as_mut() else {
            return true;
        };

        let before = expressions.len();
        expressions.retain(|requirement| requirement.key != key);
        if expressions.len() == before {
            return true;
        }

        removed = true;
        let emptied = expressions.is_empty();
        !emptied || term_has_fields(term)
    });

    if removed {
        debug!(
            key,
            remaining_terms = selector.node_selector_terms.len(),
            "removed topology key from node affinity"
        );
    }
    removed
}

/// Add an `In` requirement on `key` with the given values
///
/// Values are trimmed, blanks dropped, then sorted and deduplicated. If no
/// value survives the PV is left untouched and `InvalidInput` is returned.
///
/// The requirement is AND-ed into the first term when that term has no
/// requirement on `key` yet. Otherwise, or when there are no terms, it goes
/// into a new term.
pub fn add_topology<S: AsRef<str>>(pv: &mut PersistentVolume, key: &str, values: &[S]) -> Result<()> {
    let values = normalize_topology_values(values);
    if values.is_empty() {
        warn!(key, "no valid topology values to add");
        return Err(Error::InvalidInput(format!(
            "there are no valid values to add to PV for topology key {}",
            key
        )));
    }

    let requirement = NodeSelectorRequirement {
        key: key.to_string(),
        operator: NODE_SELECTOR_OP_IN.to_string(),
        values: Some(values),
    };

    let terms = &mut ensure_node_selector(pv).node_selector_terms;
    let merge_into_first = terms.first().is_some_and(|term| !term_has_key(term, key));

    if merge_into_first {
        terms[0]
            .match_expressions
            .get_or_insert_with(Vec::new)
            .push(requirement);
    } else {
        terms.push(NodeSelectorTerm {
            match_expressions: Some(vec![requirement]),
            match_fields: None,
        });
    }

    debug!(key, merged = merge_into_first, "added topology to node affinity");
    Ok(())
}

/// Rename every requirement on `old_key` to `new_key`, keeping its values
///
/// A renamed requirement that lands in a term already holding an `In`
/// requirement on `new_key` is folded into it; see [`merge_in_requirements`].
/// Returns true if any requirement was renamed.
pub fn replace_topology(pv: &mut PersistentVolume, old_key: &str, new_key: &str) -> bool {
    let Some(selector) = node_selector_mut(pv) else {
        return false;
    };

    let mut replaced = 0usize;
    let mut merged = 0usize;
    for expressions in selector
        .node_selector_terms
        .iter_mut()
        .filter_map(|term| term.match_expressions.as_mut())
    {
        let mut renamed = 0usize;
        for requirement in expressions.iter_mut().filter(|r| r.key == old_key) {
            requirement.key = new_key.to_string();
            renamed += 1;
        }
        if renamed > 0 {
            replaced += renamed;
            merged += merge_in_requirements(expressions, new_key);
        }
    }

    if replaced > 0 {
        debug!(old_key, new_key, replaced, merged, "replaced topology key in node affinity");
    }
    replaced > 0
}

/// Fold the `In` requirements on `key` within one term into the first one
///
/// Requirements of a term are AND-ed, so the folded requirement holds the
/// intersection of their values. When the intersection is empty the term
/// cannot match any node either way, and the requirements are left as they
/// are. Returns the number of requirements removed.
fn merge_in_requirements(expressions: &mut Vec<NodeSelectorRequirement>, key: &str) -> usize {
    let is_in = |r: &NodeSelectorRequirement| r.key == key && r.operator == NODE_SELECTOR_OP_IN;
    if expressions.iter().filter(|&r| is_in(r)).count() < 2 {
        return 0;
    }

    let mut common: Option<BTreeSet<String>> = None;
    for requirement in expressions.iter().filter(|&r| is_in(r)) {
        let values: BTreeSet<String> = requirement.values.iter().flatten().cloned().collect();
        common = Some(match common {
            Some(common) => common.intersection(&values).cloned().collect(),
            None => values,
        });
    }
    let common = common.unwrap_or_default();
    if common.is_empty() {
        warn!(key, "requirements on the same key share no value, not merging");
        return 0;
    }

    let before = expressions.len();
    let mut kept = false;
    expressions.retain_mut(|requirement| {
        if !is_in(&*requirement) {
            return true;
        }
        if kept {
            return false;
        }
        kept = true;
        requirement.values = Some(common.iter().cloned().collect());
        true
    });
    before - expressions.len()
}
