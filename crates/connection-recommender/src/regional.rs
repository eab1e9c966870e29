//! Regional adjustment resolver
//!
//! Maps a candidate's jurisdiction to a signed point adjustment with a
//! human-readable rationale. The mapping is table-driven: country -> region
//! family -> policy, total over all supported jurisdictions with an explicit
//! zero-adjustment default for anything unmapped.

use crate::RegionalAdjustment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Jurisdiction bucket used for regional scoring policy
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RegionFamily {
    Nordic,
    Baltic,
    WesternEurope,
    CentralEurope,
    SouthernEurope,
    BritishIsles,
    Other,
}

impl RegionFamily {
    pub fn label(&self) -> &'static str {
        match self {
            RegionFamily::Nordic => "Nordic",
            RegionFamily::Baltic => "Baltic",
            RegionFamily::WesternEurope => "Western Europe",
            RegionFamily::CentralEurope => "Central Europe",
            RegionFamily::SouthernEurope => "Southern Europe",
            RegionFamily::BritishIsles => "British Isles",
            RegionFamily::Other => "Other",
        }
    }

    /// Classify a jurisdiction by country name or ISO 3166-1 alpha-2 code
    pub fn from_country(country: &str) -> Self {
        match country.trim().to_lowercase().as_str() {
            "finland" | "fi" | "sweden" | "se" | "norway" | "no" | "denmark" | "dk"
            | "iceland" | "is" => RegionFamily::Nordic,
            "estonia" | "ee" | "latvia" | "lv" | "lithuania" | "lt" => RegionFamily::Baltic,
            "netherlands" | "nl" | "belgium" | "be" | "france" | "fr" | "luxembourg" | "lu" => {
                RegionFamily::WesternEurope
            }
            "germany" | "de" | "poland" | "pl" | "czechia" | "czech republic" | "cz"
            | "slovakia" | "sk" | "hungary" | "hu" | "austria" | "at" | "switzerland" | "ch" => {
                RegionFamily::CentralEurope
            }
            "spain" | "es" | "portugal" | "pt" | "italy" | "it" | "greece" | "gr" => {
                RegionFamily::SouthernEurope
            }
            "united kingdom" | "uk" | "gb" | "great britain" | "ireland" | "ie" => {
                RegionFamily::BritishIsles
            }
            _ => RegionFamily::Other,
        }
    }
}

/// Adjustment policy for one region family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalPolicy {
    pub points: f64,
    pub rationale: String,
}

/// Region-family-keyed adjustment table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalAdjustmentTable {
    pub regions: BTreeMap<RegionFamily, RegionalPolicy>,
}

impl Default for RegionalAdjustmentTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RegionalAdjustmentTable {
    /// Table pre-loaded with the default European regional policies
    pub fn with_defaults() -> Self {
        let mut regions = BTreeMap::new();

        let mut set = |region: RegionFamily, points: f64, rationale: &str| {
            regions.insert(
                region,
                RegionalPolicy {
                    points,
                    rationale: rationale.to_string(),
                },
            );
        };

        set(
            RegionFamily::Nordic,
            5.0,
            "abundant hydro reserves, stable pricing, and mature TSO cooperation",
        );
        set(
            RegionFamily::Baltic,
            2.0,
            "grid investment accelerating under the synchronization programme",
        );
        set(
            RegionFamily::WesternEurope,
            1.0,
            "dense interconnection and liquid balancing markets",
        );
        set(
            RegionFamily::CentralEurope,
            -3.0,
            "congested transmission corridors and lengthy permitting queues",
        );
        set(
            RegionFamily::SouthernEurope,
            -1.0,
            "aging distribution assets and slower connection processing",
        );
        set(
            RegionFamily::BritishIsles,
            0.0,
            "connection queue reform in progress; positions move unpredictably",
        );
        set(
            RegionFamily::Other,
            0.0,
            "no regional adjustment applied",
        );

        Self { regions }
    }

    /// Override the point adjustment for a region, keeping its rationale
    pub fn set_points(&mut self, region: RegionFamily, points: f64) {
        self.regions
            .entry(region)
            .and_modify(|policy| policy.points = points)
            .or_insert_with(|| RegionalPolicy {
                points,
                rationale: "operator-supplied adjustment".to_string(),
            });
    }

    /// Resolve a jurisdiction to its adjustment and rendered description
    pub fn resolve(&self, country: &str) -> RegionalAdjustment {
        let region = RegionFamily::from_country(country);
        match self.regions.get(&region) {
            Some(policy) => RegionalAdjustment {
                region,
                points: policy.points,
                description: format!("{}: {}", region.label(), policy.rationale),
            },
            None => RegionalAdjustment {
                region,
                points: 0.0,
                description: format!("{}: no regional adjustment applied", region.label()),
            },
        }
    }
}
