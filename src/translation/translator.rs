//! Topology Translator
//!
//! Binds one in-tree plugin's topology key and region parser so callers can
//! translate PVs and storage classes without passing them around.

use super::allowed::translate_allowed_topologies;
use super::config::TranslatorConfig;
use super::in_tree_volume::{
    translate_topology_from_csi_to_in_tree, translate_topology_from_in_tree_to_csi,
};
use crate::error::Result;
use crate::topology::{InTreePlugin, RegionParser};
use k8s_openapi::api::core::v1::{PersistentVolume, TopologySelectorTerm};
use tracing::instrument;

/// Topology translator for a single in-tree plugin
#[derive(Debug, Clone, Copy)]
pub struct TopologyTranslator {
    plugin: InTreePlugin,
    region_parser: RegionParser,
}

impl TopologyTranslator {
    /// Create a translator using the plugin's default region parser
    pub fn new(plugin: InTreePlugin) -> Self {
        Self {
            plugin,
            region_parser: plugin.region_parser(),
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Self {
        let translator = Self::new(config.plugin);
        if config.derive_region {
            translator
        } else {
            translator.with_region_parser(RegionParser::Disabled)
        }
    }

    /// Replace the region parser
    pub fn with_region_parser(mut self, region_parser: RegionParser) -> Self {
        self.region_parser = region_parser;
        self
    }

    pub fn plugin(&self) -> InTreePlugin {
        self.plugin
    }

    pub fn region_parser(&self) -> RegionParser {
        self.region_parser
    }

    pub fn topology_key(&self) -> &'static str {
        self.plugin.topology_key()
    }

    /// Translate CSI topology on `pv` to Kubernetes zone/region topology
    #[instrument(skip_all, fields(plugin = %self.plugin, pv = pv.metadata.name.as_deref().unwrap_or("")))]
    pub fn translate_csi_to_in_tree(&self, pv: &mut PersistentVolume) -> Result<()> {
        translate_topology_from_csi_to_in_tree(pv, self.topology_key(), self.region_parser)
    }

    /// Translate Kubernetes zone topology on `pv` to CSI topology
    #[instrument(skip_all, fields(plugin = %self.plugin, pv = pv.metadata.name.as_deref().unwrap_or("")))]
    pub fn translate_in_tree_to_csi(&self, pv: &mut PersistentVolume) -> Result<()> {
        translate_topology_from_in_tree_to_csi(pv, self.topology_key())
    }

    /// Translate StorageClass allowed topologies to CSI topology
    pub fn translate_allowed_topologies(
        &self,
        terms: &[TopologySelectorTerm],
    ) -> Result<Vec<TopologySelectorTerm>> {
        translate_allowed_topologies(terms, self.topology_key())
    }
}
