//! Allowed Topology Translation
//!
//! Rewrites the `allowedTopologies` of a StorageClass from Kubernetes zone
//! keys to a CSI driver's topology key.

use crate::error::{Error, Result};
use crate::topology::is_zone_label;
use k8s_openapi::api::core::v1::{TopologySelectorLabelRequirement, TopologySelectorTerm};
use tracing::{debug, warn};

/// Translate allowed topologies to `csi_topology_key`
///
/// Requirements already on `csi_topology_key` are kept. Requirements on the
/// GA or beta zone key are rewritten to it with their values unchanged. Any
/// other key fails the whole call with `UnsupportedKey`; the input terms are
/// never modified.
pub fn translate_allowed_topologies(
    terms: &[TopologySelectorTerm],
    csi_topology_key: &str,
) -> Result<Vec<TopologySelectorTerm>> {
    let mut translated = Vec::with_capacity(terms.len());

    for term in terms {
        let expressions = term.match_label_expressions.as_deref().unwrap_or_default();

        let mut new_expressions = Vec::with_capacity(expressions.len());
        for expression in expressions {
            if expression.key != csi_topology_key && !is_zone_label(&expression.key) {
                warn!(key = %expression.key, "unsupported key in allowed topologies");
                return Err(Error::UnsupportedKey {
                    key: expression.key.clone(),
                });
            }

            new_expressions.push(TopologySelectorLabelRequirement {
                key: csi_topology_key.to_string(),
                values: expression.values.clone(),
            });
        }

        translated.push(TopologySelectorTerm {
            match_label_expressions: term.match_label_expressions.as_ref().map(|_| new_expressions),
        });
    }

    debug!(csi_topology_key, terms = translated.len(), "translated allowed topologies");
    Ok(translated)
}
