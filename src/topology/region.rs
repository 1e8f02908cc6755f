//! Region Derivation
//!
//! Maps zone names to the region that contains them. A translator without a
//! region parser still translates zones; it only skips region requirements
//! and region labels.

use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// Zone-to-region function
pub type RegionParserFn = fn(&str) -> Result<String>;

/// Optional region derivation strategy
#[derive(Clone, Copy, Default)]
pub enum RegionParser {
    /// Region derivation is skipped
    #[default]
    Disabled,
    /// Regions are derived with the given function
    Enabled(RegionParserFn),
}

impl RegionParser {
    pub fn is_enabled(&self) -> bool {
        matches!(self, RegionParser::Enabled(_))
    }

    /// Derive the region of a single zone
    ///
    /// Returns `Ok(None)` when derivation is disabled.
    pub fn region_for_zone(&self, zone: &str) -> Result<Option<String>> {
        match self {
            RegionParser::Disabled => Ok(None),
            RegionParser::Enabled(parse) => parse(zone).map(Some),
        }
    }

    /// Derive the sorted, deduplicated set of regions for `zones`
    ///
    /// Returns `Ok(None)` when derivation is disabled. Any zone the parser
    /// rejects fails the whole call.
    pub fn regions_for_zones(&self, zones: &[String]) -> Result<Option<Vec<String>>> {
        let RegionParser::Enabled(parse) = self else {
            return Ok(None);
        };

        let mut regions = BTreeSet::new();
        for zone in zones {
            regions.insert(parse(zone)?);
        }
        Ok(Some(regions.into_iter().collect()))
    }
}

impl From<RegionParserFn> for RegionParser {
    fn from(parse: RegionParserFn) -> Self {
        RegionParser::Enabled(parse)
    }
}

impl std::fmt::Debug for RegionParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionParser::Disabled => write!(f, "RegionParser::Disabled"),
            RegionParser::Enabled(_) => write!(f, "RegionParser::Enabled(..)"),
        }
    }
}

// =============================================================================
// Built-in Parsers
// =============================================================================

/// GCE zones: `{locale}-{region}-{zone}`, e.g. `us-east1-a` -> `us-east1`
pub fn gce_region_parser(zone: &str) -> Result<String> {
    let parts: Vec<&str> = zone.split('-').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(Error::InvalidZone {
            zone: zone.to_string(),
            reason: "expected {locale}-{region}-{zone}".into(),
        });
    }
    Ok(parts[..2].join("-"))
}

/// AWS zones: region followed by a single zone letter, e.g. `us-east-1a` -> `us-east-1`
pub fn aws_region_parser(zone: &str) -> Result<String> {
    let mut chars = zone.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(digit))
            if letter.is_ascii_lowercase() && digit.is_ascii_digit() && zone.contains('-') =>
        {
            Ok(zone[..zone.len() - 1].to_string())
        }
        _ => Err(Error::InvalidZone {
            zone: zone.to_string(),
            reason: "expected {region}{zone-letter}".into(),
        }),
    }
}

/// Azure zones: `{region}-{n}`, e.g. `eastus-1` -> `eastus`
pub fn azure_region_parser(zone: &str) -> Result<String> {
    match zone.rsplit_once('-') {
        Some((region, index))
            if !region.is_empty()
                && !index.is_empty()
                && index.chars().all(|c| c.is_ascii_digit()) =>
        {
            Ok(region.to_string())
        }
        _ => Err(Error::InvalidZone {
            zone: zone.to_string(),
            reason: "expected {region}-{zone-number}".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_gce_region_parser() {
        assert_eq!(gce_region_parser("us-east1-a").unwrap(), "us-east1");
        assert_eq!(gce_region_parser("europe-west4-c").unwrap(), "europe-west4");
        assert_matches!(gce_region_parser("existingZone"), Err(Error::InvalidZone { .. }));
        assert_matches!(gce_region_parser("us-east1-"), Err(Error::InvalidZone { .. }));
    }

    #[test]
    fn test_aws_region_parser() {
        assert_eq!(aws_region_parser("us-east-1a").unwrap(), "us-east-1");
        assert_eq!(aws_region_parser("eu-central-1c").unwrap(), "eu-central-1");
        assert_matches!(aws_region_parser("us-east-1"), Err(Error::InvalidZone { .. }));
        assert_matches!(aws_region_parser(""), Err(Error::InvalidZone { .. }));
    }

    #[test]
    fn test_azure_region_parser() {
        assert_eq!(azure_region_parser("eastus-1").unwrap(), "eastus");
        assert_eq!(azure_region_parser("westeurope-3").unwrap(), "westeurope");
        assert_matches!(azure_region_parser("0"), Err(Error::InvalidZone { .. }));
        assert_matches!(azure_region_parser("eastus-a"), Err(Error::InvalidZone { .. }));
    }

    #[test]
    fn test_disabled_parser_skips_derivation() {
        let parser = RegionParser::Disabled;
        let zones = vec!["us-east1-a".to_string()];
        assert!(parser.regions_for_zones(&zones).unwrap().is_none());
        assert!(parser.region_for_zone("us-east1-a").unwrap().is_none());
    }

    #[test]
    fn test_regions_for_zones_union() {
        let parser = RegionParser::from(gce_region_parser as RegionParserFn);
        let zones = vec![
            "us-east1-c".to_string(),
            "us-central1-a".to_string(),
            "us-east1-b".to_string(),
        ];
        assert_eq!(
            parser.regions_for_zones(&zones).unwrap(),
            Some(vec!["us-central1".to_string(), "us-east1".to_string()])
        );
    }

    #[test]
    fn test_regions_for_zones_rejects_bad_zone() {
        let parser = RegionParser::Enabled(gce_region_parser);
        let zones = vec!["us-east1-a".to_string(), "bogus".to_string()];
        assert_matches!(
            parser.regions_for_zones(&zones),
            Err(Error::InvalidZone { zone, .. }) if zone == "bogus"
        );
    }
}
