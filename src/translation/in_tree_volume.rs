//! PersistentVolume Topology Translation
//!
//! Converts the topology of a PV between a CSI driver's topology key and the
//! Kubernetes zone/region keys. Each step validates before it mutates, but
//! steps are not rolled back: on error the PV may hold the result of earlier
//! steps.

use crate::error::Result;
use crate::topology::{
    add_topology, node_affinity, normalize_topology_values, remove_topology, replace_topology,
    sync_topology_label, topology_key_exists, topology_label_scheme, topology_label_values,
    topology_values, RegionParser, TopologyLabelScheme, LABEL_FAILURE_DOMAIN_BETA_REGION,
    LABEL_TOPOLOGY_REGION,
};
use k8s_openapi::api::core::v1::PersistentVolume;
use tracing::debug;

/// Where the zones of a PV were found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoneSource {
    /// Kubernetes zone requirement already present in the node affinity
    Affinity,
    /// CSI topology requirement, now rewritten to the Kubernetes zone key
    CsiTopology,
    /// PV zone label
    Labels,
}

/// Translate CSI topology on `pv` to Kubernetes zone/region topology
///
/// Every requirement on `csi_topology_key` is removed. Zones come from the
/// first of these that has any:
///
/// 1. an existing Kubernetes zone requirement (left as is)
/// 2. the removed CSI requirements, unioned into one zone requirement
/// 3. the PV zone label
///
/// Zone values are trimmed, sorted and deduplicated before use, so a CSI
/// requirement holding only blank values counts as no zones at all.
///
/// The zone label is filled in if missing. When `region_parser` is enabled
/// the region requirement and label are filled in as well; a region label
/// is trusted only when the zones themselves came from labels.
pub fn translate_topology_from_csi_to_in_tree(
    pv: &mut PersistentVolume,
    csi_topology_key: &str,
    region_parser: RegionParser,
) -> Result<()> {
    let scheme = topology_label_scheme(pv);
    let zone_key = scheme.zone_key();
    let region_key = scheme.region_key();

    let csi_zones = normalize_topology_values(&topology_values(pv, csi_topology_key));
    remove_topology(pv, csi_topology_key);

    let (zones, source) = if topology_key_exists(zone_key, node_affinity(pv)) {
        let zones = normalize_topology_values(&topology_values(pv, zone_key));
        (zones, ZoneSource::Affinity)
    } else if !csi_zones.is_empty() {
        add_topology(pv, zone_key, &csi_zones)?;
        (csi_zones, ZoneSource::CsiTopology)
    } else if let Some(label_zones) = topology_label_values(pv, zone_key) {
        add_topology(pv, zone_key, &label_zones)?;
        (label_zones, ZoneSource::Labels)
    } else {
        debug!(csi_topology_key, "no zone topology found on PV");
        return Ok(());
    };

    debug!(
        csi_topology_key,
        %scheme,
        ?source,
        zones = zones.len(),
        "translating CSI topology to Kubernetes topology"
    );
    sync_topology_label(pv, zone_key, &zones);

    if !region_parser.is_enabled() {
        return Ok(());
    }

    let regions = if topology_key_exists(region_key, node_affinity(pv)) {
        normalize_topology_values(&topology_values(pv, region_key))
    } else {
        let regions = match topology_label_values(pv, region_key) {
            Some(label_regions) if source == ZoneSource::Labels => label_regions,
            _ => region_parser.regions_for_zones(&zones)?.unwrap_or_default(),
        };
        if !regions.is_empty() {
            add_topology(pv, region_key, &regions)?;
        }
        regions
    };
    sync_topology_label(pv, region_key, &regions);

    Ok(())
}

/// Translate Kubernetes zone topology on `pv` to the CSI topology key
///
/// Zone requirements are renamed to `csi_topology_key`. A PV carrying zones
/// only as a label gets a new CSI requirement. Beta region requirements are
/// renamed to the GA region key so the PV still schedules on nodes that no
/// longer carry beta labels. A beta PV with a region label but no region
/// requirement gets a GA region requirement from the label.
///
/// A term holding both a zone and a CSI requirement ends up with a single
/// CSI requirement on the values they share.
pub fn translate_topology_from_in_tree_to_csi(
    pv: &mut PersistentVolume,
    csi_topology_key: &str,
) -> Result<()> {
    let scheme = topology_label_scheme(pv);
    let zone_key = scheme.zone_key();

    if !topology_values(pv, zone_key).is_empty() {
        replace_topology(pv, zone_key, csi_topology_key);
    } else if let Some(label_zones) = topology_label_values(pv, zone_key) {
        add_topology(pv, csi_topology_key, &label_zones)?;
    }

    if scheme == TopologyLabelScheme::Beta {
        let affinity = node_affinity(pv);
        if topology_key_exists(LABEL_FAILURE_DOMAIN_BETA_REGION, affinity) {
            replace_topology(pv, LABEL_FAILURE_DOMAIN_BETA_REGION, LABEL_TOPOLOGY_REGION);
        } else if !topology_key_exists(LABEL_TOPOLOGY_REGION, affinity) {
            if let Some(label_regions) = topology_label_values(pv, LABEL_FAILURE_DOMAIN_BETA_REGION)
            {
                add_topology(pv, LABEL_TOPOLOGY_REGION, &label_regions)?;
            }
        }
    }

    debug!(csi_topology_key, %scheme, "translated Kubernetes topology to CSI topology");
    Ok(())
}
