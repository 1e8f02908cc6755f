//! Topology Key Vocabulary
//!
//! Kubernetes well-known topology labels, the CSI topology key of every
//! supported in-tree plugin, and the label scheme a PV is written in.

use super::region::{aws_region_parser, azure_region_parser, gce_region_parser, RegionParser};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// Kubernetes Topology Labels
// =============================================================================

/// GA zone label
pub const LABEL_TOPOLOGY_ZONE: &str = "topology.kubernetes.io/zone";

/// GA region label
pub const LABEL_TOPOLOGY_REGION: &str = "topology.kubernetes.io/region";

/// Beta zone label, accepted as input only
pub const LABEL_FAILURE_DOMAIN_BETA_ZONE: &str = "failure-domain.beta.kubernetes.io/zone";

/// Beta region label, accepted as input only
pub const LABEL_FAILURE_DOMAIN_BETA_REGION: &str = "failure-domain.beta.kubernetes.io/region";

/// Node selector operator used for every requirement written by this crate
pub const NODE_SELECTOR_OP_IN: &str = "In";

// =============================================================================
// CSI Topology Keys
// =============================================================================

pub const GCE_PD_TOPOLOGY_KEY: &str = "topology.gke.io/zone";
pub const AWS_EBS_TOPOLOGY_KEY: &str = "topology.ebs.csi.aws.com/zone";
pub const AZURE_DISK_TOPOLOGY_KEY: &str = "topology.disk.csi.azure.com/zone";
pub const CINDER_TOPOLOGY_KEY: &str = "topology.cinder.csi.openstack.org/zone";

// =============================================================================
// Label Scheme
// =============================================================================

/// Which zone/region label pair a PV uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TopologyLabelScheme {
    #[default]
    Ga,
    Beta,
}

impl TopologyLabelScheme {
    pub fn zone_key(&self) -> &'static str {
        match self {
            TopologyLabelScheme::Ga => LABEL_TOPOLOGY_ZONE,
            TopologyLabelScheme::Beta => LABEL_FAILURE_DOMAIN_BETA_ZONE,
        }
    }

    pub fn region_key(&self) -> &'static str {
        match self {
            TopologyLabelScheme::Ga => LABEL_TOPOLOGY_REGION,
            TopologyLabelScheme::Beta => LABEL_FAILURE_DOMAIN_BETA_REGION,
        }
    }
}

impl std::fmt::Display for TopologyLabelScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyLabelScheme::Ga => write!(f, "ga"),
            TopologyLabelScheme::Beta => write!(f, "beta"),
        }
    }
}

/// Returns true if `key` is a Kubernetes zone label of either scheme
pub fn is_zone_label(key: &str) -> bool {
    key == LABEL_TOPOLOGY_ZONE || key == LABEL_FAILURE_DOMAIN_BETA_ZONE
}

// =============================================================================
// In-Tree Plugins
// =============================================================================

/// In-tree volume plugins with a CSI replacement whose topology is translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum InTreePlugin {
    GcePersistentDisk,
    AwsElasticBlockStore,
    AzureDisk,
    Cinder,
}

impl InTreePlugin {
    /// All supported plugins
    pub const ALL: [InTreePlugin; 4] = [
        InTreePlugin::GcePersistentDisk,
        InTreePlugin::AwsElasticBlockStore,
        InTreePlugin::AzureDisk,
        InTreePlugin::Cinder,
    ];

    /// The single CSI topology key this plugin's driver publishes
    pub fn topology_key(&self) -> &'static str {
        match self {
            InTreePlugin::GcePersistentDisk => GCE_PD_TOPOLOGY_KEY,
            InTreePlugin::AwsElasticBlockStore => AWS_EBS_TOPOLOGY_KEY,
            InTreePlugin::AzureDisk => AZURE_DISK_TOPOLOGY_KEY,
            InTreePlugin::Cinder => CINDER_TOPOLOGY_KEY,
        }
    }

    pub fn csi_driver_name(&self) -> &'static str {
        match self {
            InTreePlugin::GcePersistentDisk => "pd.csi.storage.gke.io",
            InTreePlugin::AwsElasticBlockStore => "ebs.csi.aws.com",
            InTreePlugin::AzureDisk => "disk.csi.azure.com",
            InTreePlugin::Cinder => "cinder.csi.openstack.org",
        }
    }

    pub fn in_tree_plugin_name(&self) -> &'static str {
        match self {
            InTreePlugin::GcePersistentDisk => "kubernetes.io/gce-pd",
            InTreePlugin::AwsElasticBlockStore => "kubernetes.io/aws-ebs",
            InTreePlugin::AzureDisk => "kubernetes.io/azure-disk",
            InTreePlugin::Cinder => "kubernetes.io/cinder",
        }
    }

    /// Default region parser for this plugin's zone naming
    ///
    /// Cinder availability zones carry no region, so region derivation is
    /// disabled for it.
    pub fn region_parser(&self) -> RegionParser {
        match self {
            InTreePlugin::GcePersistentDisk => RegionParser::Enabled(gce_region_parser),
            InTreePlugin::AwsElasticBlockStore => RegionParser::Enabled(aws_region_parser),
            InTreePlugin::AzureDisk => RegionParser::Enabled(azure_region_parser),
            InTreePlugin::Cinder => RegionParser::Disabled,
        }
    }

    /// Look up a plugin by its CSI driver name or in-tree plugin name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.csi_driver_name() == name || p.in_tree_plugin_name() == name)
    }
}

impl std::fmt::Display for InTreePlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.in_tree_plugin_name())
    }
}
