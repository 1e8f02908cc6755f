//! PV fixtures shared by the unit tests

use k8s_openapi::api::core::v1::{
    NodeSelector, NodeSelectorRequirement, NodeSelectorTerm, PersistentVolume,
    PersistentVolumeSpec, VolumeNodeAffinity,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use super::keys::NODE_SELECTOR_OP_IN;

/// `In` requirement for `key`
pub fn requirement(key: &str, values: &[&str]) -> NodeSelectorRequirement {
    NodeSelectorRequirement {
        key: key.to_string(),
        operator: NODE_SELECTOR_OP_IN.to_string(),
        values: Some(values.iter().map(|v| v.to_string()).collect()),
    }
}

/// Term AND-combining one `In` requirement per entry
pub fn term(requirements: &[(&str, &[&str])]) -> NodeSelectorTerm {
    NodeSelectorTerm {
        match_expressions: Some(
            requirements
                .iter()
                .map(|(key, values)| requirement(key, values))
                .collect(),
        ),
        match_fields: None,
    }
}

pub fn affinity(terms: Vec<NodeSelectorTerm>) -> VolumeNodeAffinity {
    VolumeNodeAffinity {
        required: Some(NodeSelector {
            node_selector_terms: terms,
        }),
    }
}

pub fn pv_with_terms(terms: Vec<NodeSelectorTerm>) -> PersistentVolume {
    PersistentVolume {
        spec: Some(PersistentVolumeSpec {
            node_affinity: Some(affinity(terms)),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn pv_with_labels(labels: &[(&str, &str)]) -> PersistentVolume {
    PersistentVolume {
        metadata: ObjectMeta {
            name: Some("gcepd".into()),
            labels: Some(
                labels
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Terms of the PV's required node selector, panicking if there are none
pub fn terms_of(pv: &PersistentVolume) -> &[NodeSelectorTerm] {
    &pv.spec
        .as_ref()
        .and_then(|s| s.node_affinity.as_ref())
        .and_then(|a| a.required.as_ref())
        .expect("PV has no required node affinity")
        .node_selector_terms
}
