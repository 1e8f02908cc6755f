//! Translator Configuration

use crate::error::Result;
use crate::topology::InTreePlugin;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration for a [`TopologyTranslator`](super::TopologyTranslator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslatorConfig {
    /// In-tree plugin whose volumes are translated
    pub plugin: InTreePlugin,

    /// Derive region topology from zones with the plugin's region parser
    #[serde(default = "default_derive_region")]
    pub derive_region: bool,
}

fn default_derive_region() -> bool {
    true
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            plugin: InTreePlugin::GcePersistentDisk,
            derive_region: default_derive_region(),
        }
    }
}

impl TranslatorConfig {
    /// Create a config for `plugin` with region derivation enabled
    pub fn new(plugin: InTreePlugin) -> Self {
        Self {
            plugin,
            ..Default::default()
        }
    }

    /// Parse a config document
    pub fn from_yaml(document: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(document)?)
    }
}
