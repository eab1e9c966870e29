//! Tier classification and recommendation narratives
//!
//! Maps a final score to one of four ordinal tiers using configurable
//! breakpoints, attaches the per-tier recommendation narrative, and derives
//! the key strengths, concerns, and next steps surfaced alongside a score.

use crate::{
    BonusBreakdown, ConnectionOpportunity, FactorScores, RegionalAdjustment, RiskRating,
};
use serde::{Deserialize, Serialize};

/// Factor score at or above which a factor is listed as a strength
const STRENGTH_MIN: f64 = 85.0;

/// Factor score below which a factor is listed as a concern
const CONCERN_MAX: f64 = 50.0;

/// Score breakpoints separating the four tiers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierBreakpoints {
    pub tier1_min: f64,
    pub tier2_min: f64,
    pub tier3_min: f64,
}

impl Default for TierBreakpoints {
    fn default() -> Self {
        Self {
            tier1_min: 80.0,
            tier2_min: 60.0,
            tier3_min: 40.0,
        }
    }
}

/// Ordinal recommendation tier (1 = best)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Tier1Proceed,
    Tier2Conditional,
    Tier3Review,
    Tier4NotRecommended,
}

impl Tier {
    /// Classify a final score against the configured breakpoints
    pub fn from_score(score: f64, breakpoints: &TierBreakpoints) -> Self {
        if score >= breakpoints.tier1_min {
            Tier::Tier1Proceed
        } else if score >= breakpoints.tier2_min {
            Tier::Tier2Conditional
        } else if score >= breakpoints.tier3_min {
            Tier::Tier3Review
        } else {
            Tier::Tier4NotRecommended
        }
    }

    /// Ordinal rank, 1 through 4
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Tier1Proceed => 1,
            Tier::Tier2Conditional => 2,
            Tier::Tier3Review => 3,
            Tier::Tier4NotRecommended => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Tier1Proceed => "Tier 1",
            Tier::Tier2Conditional => "Tier 2",
            Tier::Tier3Review => "Tier 3",
            Tier::Tier4NotRecommended => "Tier 4",
        }
    }
}

/// Templated recommendation narrative for the assigned tier
pub fn narrative(tier: Tier, opportunity: &ConnectionOpportunity) -> String {
    match tier {
        Tier::Tier1Proceed => format!(
            "Proceed with detailed feasibility study and initiate a connection application with {}.",
            opportunity.operator
        ),
        Tier::Tier2Conditional => format!(
            "Conditional proceed: secure a capacity reservation from {} and close open commercial terms before committing.",
            opportunity.operator
        ),
        Tier::Tier3Review => {
            "Detailed risk analysis required before this connection advances; revisit once the flagged concerns are resolved.".to_string()
        }
        Tier::Tier4NotRecommended => {
            "Not recommended under current conditions; pursue stronger alternatives.".to_string()
        }
    }
}

/// Key strengths: strong factors, active bonuses, and favorable regions
pub fn strengths(
    opportunity: &ConnectionOpportunity,
    scores: &FactorScores,
    regional: &RegionalAdjustment,
    bonuses: &BonusBreakdown,
) -> Vec<String> {
    let mut items = Vec::new();

    if scores.distance >= STRENGTH_MIN {
        items.push(format!(
            "Connection point only {:.1} km from the site",
            opportunity.distance_km
        ));
    }
    if scores.capacity >= STRENGTH_MIN {
        items.push(format!(
            "Ample spare capacity ({:.0} MW available)",
            opportunity.available_capacity_mw
        ));
    }
    if scores.timeline >= STRENGTH_MIN {
        items.push(format!(
            "Short delivery timeline ({} months)",
            opportunity.timeline_months
        ));
    }
    if scores.cost >= STRENGTH_MIN {
        items.push(format!(
            "Low connection cost estimate (EUR {:.1}M)",
            opportunity.estimated_cost_eur / 1_000_000.0
        ));
    }
    if scores.reliability >= STRENGTH_MIN {
        items.push("Strong reliability track record".to_string());
    }
    if scores.tso_quality >= STRENGTH_MIN {
        items.push(format!(
            "{} has a strong connection-delivery reputation",
            opportunity.operator
        ));
    }
    if scores.risk >= STRENGTH_MIN {
        items.push("Low execution risk across all assessed axes".to_string());
    }

    if regional.points > 0.0 {
        items.push(regional.description.clone());
    }
    if bonuses.expansion > 0.0 {
        if let Some(headroom) = opportunity.expansion_headroom_mw {
            items.push(format!(
                "Expansion headroom of {:.0} MW beyond the requested capacity",
                headroom
            ));
        }
    }
    if bonuses.renewable > 0.0 {
        items.push("Strong renewable-integration potential".to_string());
    }
    if bonuses.strategic > 0.0 {
        items.push("Strategically valuable location".to_string());
    }

    items
}

/// Key concerns: weak factors, elevated risk axes, unfavorable regions
pub fn concerns(
    opportunity: &ConnectionOpportunity,
    scores: &FactorScores,
    regional: &RegionalAdjustment,
) -> Vec<String> {
    let mut items = Vec::new();

    if scores.distance < CONCERN_MAX {
        items.push(format!(
            "Site is {:.1} km from the connection point",
            opportunity.distance_km
        ));
    }
    if scores.capacity < CONCERN_MAX {
        items.push("Limited capacity headroom relative to the site requirement".to_string());
    }
    if scores.timeline < CONCERN_MAX {
        items.push(format!(
            "Long delivery timeline ({} months)",
            opportunity.timeline_months
        ));
    }
    if scores.cost < CONCERN_MAX {
        items.push(format!(
            "High connection cost estimate (EUR {:.1}M)",
            opportunity.estimated_cost_eur / 1_000_000.0
        ));
    }
    if scores.reliability < CONCERN_MAX {
        items.push("Reliability record is weak or unproven".to_string());
    }
    if scores.tso_quality < CONCERN_MAX {
        items.push(format!(
            "{} has a below-average delivery record",
            opportunity.operator
        ));
    }
    if scores.risk < CONCERN_MAX {
        items.push("Elevated execution risk overall".to_string());
    }

    if let Some(risk) = &opportunity.risk {
        let axes = [
            (risk.permitting, "permitting"),
            (risk.technical, "technical"),
            (risk.environmental, "environmental"),
            (risk.commercial, "commercial"),
        ];
        for (rating, axis) in axes {
            if rating == RiskRating::High {
                items.push(format!("High {} risk", axis));
            }
        }
    }

    if regional.points < 0.0 {
        items.push(regional.description.clone());
    }

    items
}

/// Tier-specific next steps
pub fn next_steps(tier: Tier, opportunity: &ConnectionOpportunity) -> Vec<String> {
    match tier {
        Tier::Tier1Proceed => vec![
            format!(
                "Request a formal connection offer from {}",
                opportunity.operator
            ),
            "Commission the detailed grid feasibility study".to_string(),
            "Open land-use and permitting workstreams in parallel".to_string(),
        ],
        Tier::Tier2Conditional => vec![
            format!(
                "Confirm capacity reservation terms with {}",
                opportunity.operator
            ),
            "Validate the cost estimate against a reference connection design".to_string(),
            "Re-run the analysis once open commercial terms are settled".to_string(),
        ],
        Tier::Tier3Review => vec![
            "Commission a targeted review of the flagged risk areas".to_string(),
            "Benchmark against the stronger candidates before spending further".to_string(),
        ],
        Tier::Tier4NotRecommended => vec![
            "Deprioritize in favor of higher-tier candidates".to_string(),
            "Monitor for grid reinforcement announcements that change the picture".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TechnicalRequirements;

    fn make_opportunity() -> ConnectionOpportunity {
        ConnectionOpportunity::new(
            "opp-1",
            "Test Substation",
            "Fingrid",
            "Finland",
            3.0,
            120.0,
            110.0,
            18,
            2_500_000.0,
            TechnicalRequirements {
                min_capacity_mw: 50.0,
                preferred_voltage_kv: 110.0,
                redundancy_required: false,
            },
        )
    }

    #[test]
    fn test_tier_breakpoints() {
        let breakpoints = TierBreakpoints::default();
        assert_eq!(Tier::from_score(95.0, &breakpoints), Tier::Tier1Proceed);
        assert_eq!(Tier::from_score(80.0, &breakpoints), Tier::Tier1Proceed);
        assert_eq!(Tier::from_score(79.9, &breakpoints), Tier::Tier2Conditional);
        assert_eq!(Tier::from_score(60.0, &breakpoints), Tier::Tier2Conditional);
        assert_eq!(Tier::from_score(45.0, &breakpoints), Tier::Tier3Review);
        assert_eq!(Tier::from_score(10.0, &breakpoints), Tier::Tier4NotRecommended);
    }

    #[test]
    fn test_breakpoints_are_configurable() {
        let strict = TierBreakpoints {
            tier1_min: 90.0,
            tier2_min: 75.0,
            tier3_min: 55.0,
        };
        assert_eq!(Tier::from_score(85.0, &strict), Tier::Tier2Conditional);
        assert_eq!(Tier::from_score(85.0, &TierBreakpoints::default()), Tier::Tier1Proceed);
    }

    #[test]
    fn test_tier_ranks() {
        assert_eq!(Tier::Tier1Proceed.rank(), 1);
        assert_eq!(Tier::Tier4NotRecommended.rank(), 4);
    }

    #[test]
    fn test_narratives_match_tier() {
        let opp = make_opportunity();
        assert!(narrative(Tier::Tier1Proceed, &opp).contains("Proceed with detailed feasibility"));
        assert!(narrative(Tier::Tier2Conditional, &opp).contains("Conditional proceed"));
        assert!(narrative(Tier::Tier3Review, &opp).contains("Detailed risk analysis"));
        assert!(narrative(Tier::Tier4NotRecommended, &opp).contains("Not recommended"));
    }

    #[test]
    fn test_narrative_names_operator() {
        let opp = make_opportunity();
        assert!(narrative(Tier::Tier1Proceed, &opp).contains("Fingrid"));
    }

    #[test]
    fn test_high_risk_axes_surface_as_concerns() {
        let mut opp = make_opportunity();
        opp.risk = Some(crate::RiskAssessment {
            permitting: RiskRating::High,
            technical: RiskRating::Low,
            environmental: RiskRating::Medium,
            commercial: RiskRating::High,
        });

        let scores = FactorScores {
            distance: 75.0,
            capacity: 80.0,
            timeline: 60.0,
            cost: 65.0,
            reliability: 50.0,
            tso_quality: 95.0,
            risk: 55.0,
        };
        let regional = RegionalAdjustment {
            region: crate::RegionFamily::Nordic,
            points: 5.0,
            description: "Nordic: test".to_string(),
        };

        let concerns = concerns(&opp, &scores, &regional);
        assert!(concerns.iter().any(|c| c.contains("permitting")));
        assert!(concerns.iter().any(|c| c.contains("commercial")));
        assert!(!concerns.iter().any(|c| c.contains("technical")));
    }

    #[test]
    fn test_strengths_include_bonuses_and_region() {
        let mut opp = make_opportunity();
        opp.expansion_headroom_mw = Some(100.0);

        let scores = FactorScores {
            distance: 90.0,
            capacity: 90.0,
            timeline: 60.0,
            cost: 65.0,
            reliability: 50.0,
            tso_quality: 95.0,
            risk: 60.0,
        };
        let regional = RegionalAdjustment {
            region: crate::RegionFamily::Nordic,
            points: 5.0,
            description: "Nordic: favorable".to_string(),
        };
        let bonuses = BonusBreakdown {
            expansion: 4.0,
            renewable: 0.0,
            strategic: 0.0,
        };

        let strengths = strengths(&opp, &scores, &regional, &bonuses);
        assert!(strengths.iter().any(|s| s.contains("Nordic")));
        assert!(strengths.iter().any(|s| s.contains("Expansion headroom")));
        assert!(strengths.iter().any(|s| s.contains("km from the site")));
    }
}
