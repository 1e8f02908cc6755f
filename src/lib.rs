//! CSI Topology Translation
//!
//! Translates PersistentVolume topology between in-tree volume plugins and
//! their CSI drivers during CSI migration. The PV has to stay schedulable
//! under both schemes, so the translation keeps its node affinity and
//! topology labels consistent.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                           Topology Translator                               │
//! │          (plugin topology key + optional region parser, per call)           │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────────┐  │
//! │  │    Extractor    │  │  Region Parser  │  │     Allowed Topologies      │  │
//! │  │ (affinity/label │  │  (zone→region,  │  │  (StorageClass zone keys    │  │
//! │  │     values)     │  │    optional)    │  │     → CSI topology key)     │  │
//! │  └────────┬────────┘  └────────┬────────┘  └─────────────────────────────┘  │
//! │           └────────────────────┤                                            │
//! │                    ┌───────────┴───────────┐                                │
//! │                    │   Affinity Rewriter   │                                │
//! │                    │   + Label Sync        │                                │
//! │                    └───────────┬───────────┘                                │
//! ├────────────────────────────────┼────────────────────────────────────────────┤
//! │                    &mut PersistentVolume (caller owned)                     │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`topology`]: Key vocabulary, value extraction, region parsing, affinity and label rewriting
//! - [`translation`]: PV and StorageClass translation entry points
//! - [`error`]: Error types and handling

pub mod error;
pub mod topology;
pub mod translation;

// Re-export commonly used types
pub use error::{Error, Result};

pub use topology::{
    InTreePlugin, RegionParser, RegionParserFn, TopologyLabelScheme,
    LABEL_FAILURE_DOMAIN_BETA_REGION, LABEL_FAILURE_DOMAIN_BETA_ZONE,
    LABEL_MULTI_ZONE_DELIMITER, LABEL_TOPOLOGY_REGION, LABEL_TOPOLOGY_ZONE,
};

pub use translation::{
    translate_allowed_topologies, translate_topology_from_csi_to_in_tree,
    translate_topology_from_in_tree_to_csi, TopologyTranslator, TranslatorConfig,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
