//! Topology Value Extraction
//!
//! Reads topology values from a PV's node affinity or label map. Nothing here
//! mutates the PV; an empty result means "no value", never an error.

use super::keys::{TopologyLabelScheme, LABEL_FAILURE_DOMAIN_BETA_ZONE, LABEL_TOPOLOGY_ZONE};
use super::labels::LABEL_MULTI_ZONE_DELIMITER;
use k8s_openapi::api::core::v1::{NodeSelector, PersistentVolume, VolumeNodeAffinity};
use std::collections::BTreeSet;
use tracing::trace;

/// Required node selector of a PV, if any
fn node_selector(pv: &PersistentVolume) -> Option<&NodeSelector> {
    pv.spec
        .as_ref()
        .and_then(|spec| spec.node_affinity.as_ref())
        .and_then(|affinity| affinity.required.as_ref())
}

/// Node affinity of a PV, if any
pub(crate) fn node_affinity(pv: &PersistentVolume) -> Option<&VolumeNodeAffinity> {
    pv.spec.as_ref().and_then(|spec| spec.node_affinity.as_ref())
}

/// Check if any requirement in any term of `affinity` uses `key`
pub fn topology_key_exists(key: &str, affinity: Option<&VolumeNodeAffinity>) -> bool {
    let Some(selector) = affinity.and_then(|a| a.required.as_ref()) else {
        return false;
    };

    selector
        .node_selector_terms
        .iter()
        .filter_map(|term| term.match_expressions.as_ref())
        .flatten()
        .any(|requirement| requirement.key == key)
}

/// Collect every value of `key` across all node selector terms
///
/// Terms are OR-combined, so values from different terms are unioned. The
/// result is sorted and deduplicated.
pub fn topology_values(pv: &PersistentVolume, key: &str) -> Vec<String> {
    let Some(selector) = node_selector(pv) else {
        return Vec::new();
    };

    let values: BTreeSet<&String> = selector
        .node_selector_terms
        .iter()
        .filter_map(|term| term.match_expressions.as_ref())
        .flatten()
        .filter(|requirement| requirement.key == key)
        .filter_map(|requirement| requirement.values.as_ref())
        .flatten()
        .collect();

    trace!(key, count = values.len(), "collected topology values from node affinity");
    values.into_iter().cloned().collect()
}

/// Read the values encoded in the PV label `key`
///
/// Multi-zone labels are split on [`LABEL_MULTI_ZONE_DELIMITER`]. Returns
/// `None` when the label is missing or holds nothing but whitespace.
pub fn topology_label_values(pv: &PersistentVolume, key: &str) -> Option<Vec<String>> {
    let label = pv.metadata.labels.as_ref()?.get(key)?;

    let values: BTreeSet<&str> = label
        .split(LABEL_MULTI_ZONE_DELIMITER)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect();

    if values.is_empty() {
        return None;
    }
    Some(values.into_iter().map(String::from).collect())
}

/// Determine which label scheme a PV is written in
///
/// Node affinity wins over labels, and GA wins over beta. A PV with no
/// topology at all defaults to GA.
pub fn topology_label_scheme(pv: &PersistentVolume) -> TopologyLabelScheme {
    let affinity = node_affinity(pv);
    if topology_key_exists(LABEL_TOPOLOGY_ZONE, affinity) {
        return TopologyLabelScheme::Ga;
    }
    if topology_key_exists(LABEL_FAILURE_DOMAIN_BETA_ZONE, affinity) {
        return TopologyLabelScheme::Beta;
    }

    let labels = pv.metadata.labels.as_ref();
    if labels.is_some_and(|l| l.contains_key(LABEL_TOPOLOGY_ZONE)) {
        return TopologyLabelScheme::Ga;
    }
    if labels.is_some_and(|l| l.contains_key(LABEL_FAILURE_DOMAIN_BETA_ZONE)) {
        return TopologyLabelScheme::Beta;
    }

    TopologyLabelScheme::Ga
}
