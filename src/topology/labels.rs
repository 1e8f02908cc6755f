//! PV Topology Labels
//!
//! Writes zone/region labels without overwriting values that are already
//! populated.

use k8s_openapi::api::core::v1::PersistentVolume;
use std::collections::BTreeMap;
use tracing::debug;

/// Separator used when several zones are encoded into one label value
pub const LABEL_MULTI_ZONE_DELIMITER: &str = "__";

/// Encode `values` into a single label value
pub fn join_label_values(values: &[String]) -> String {
    values.join(LABEL_MULTI_ZONE_DELIMITER)
}

/// Set label `key` to the joined `values` unless it already holds a value
///
/// Returns true if the label was written. Empty `values` write nothing, and
/// a populated label is never replaced.
pub fn sync_topology_label(pv: &mut PersistentVolume, key: &str, values: &[String]) -> bool {
    if values.is_empty() {
        return false;
    }

    let labels = pv.metadata.labels.get_or_insert_with(BTreeMap::new);
    if labels.get(key).is_some_and(|existing| !existing.trim().is_empty()) {
        return false;
    }

    let value = join_label_values(values);
    debug!(key, value = %value, "setting PV topology label");
    labels.insert(key.to_string(), value);
    true
}
