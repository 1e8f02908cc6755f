//! Topology Module
//!
//! Building blocks for PV topology translation:
//! - keys: Kubernetes and CSI topology key vocabulary
//! - extract: reading topology values from node affinity and labels
//! - region: zone-to-region derivation
//! - affinity: rewriting node affinity requirements
//! - labels: writing topology labels

pub mod affinity;
pub mod extract;
pub mod keys;
pub mod labels;
pub mod region;

#[cfg(test)]
pub(crate) mod testing;

pub use affinity::*;
pub use extract::*;
pub use keys::*;
pub use labels::*;
pub use region::*;

pub(crate) use extract::node_affinity;
