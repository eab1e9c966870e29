//! Per-factor scoring curves
//!
//! Each scorer is a pure function mapping one raw candidate attribute to a
//! normalized 0-100 score. Curves are monotone piecewise-linear tables: the
//! first band value applies below the table, the last above it, with linear
//! interpolation between breakpoints.

use crate::tso::TsoQualityMatrix;
use crate::{
    AnalysisContext, ConnectionOpportunity, FactorScores, ReliabilityRecord, RiskAssessment,
    RiskRating,
};

/// Distance bands (km -> score): excellent through poor
const DISTANCE_BANDS: &[(f64, f64)] = &[
    (0.5, 100.0),
    (2.0, 90.0),
    (5.0, 75.0),
    (10.0, 50.0),
    (20.0, 25.0),
];

/// Capacity bands on the available/required ratio
const CAPACITY_RATIO_BANDS: &[(f64, f64)] = &[
    (0.5, 20.0),
    (1.0, 55.0),
    (1.5, 80.0),
    (2.0, 90.0),
    (3.0, 100.0),
];

/// Timeline bands (months -> score)
const TIMELINE_BANDS: &[(f64, f64)] = &[
    (3.0, 100.0),
    (6.0, 90.0),
    (12.0, 75.0),
    (18.0, 60.0),
    (24.0, 45.0),
    (36.0, 25.0),
];

/// Cost bands (EUR -> score)
const COST_BANDS: &[(f64, f64)] = &[
    (500_000.0, 100.0),
    (1_000_000.0, 90.0),
    (2_000_000.0, 80.0),
    (4_000_000.0, 65.0),
    (6_000_000.0, 50.0),
    (10_000_000.0, 35.0),
    (15_000_000.0, 20.0),
];

/// Outage-hours bands (hours/year -> subscore)
const OUTAGE_BANDS: &[(f64, f64)] = &[
    (0.0, 100.0),
    (5.0, 90.0),
    (20.0, 70.0),
    (50.0, 45.0),
    (100.0, 25.0),
];

/// Emergency response bands (minutes -> subscore)
const RESPONSE_BANDS: &[(f64, f64)] = &[
    (15.0, 100.0),
    (30.0, 90.0),
    (60.0, 75.0),
    (120.0, 55.0),
    (240.0, 35.0),
];

/// Reliability sub-weights (outage history dominates)
const W_OUTAGE: f64 = 0.5;
const W_PATHS: f64 = 0.3;
const W_RESPONSE: f64 = 0.2;

/// Score used when no reliability record is available
pub const NEUTRAL_RELIABILITY_SCORE: f64 = 50.0;

/// Score used when no risk assessment is available (equals all-Medium)
pub const NEUTRAL_RISK_SCORE: f64 = 60.0;

/// Score used when the capacity requirement is unusable
const NEUTRAL_CAPACITY_SCORE: f64 = 50.0;

/// Interpolate a monotone piecewise-linear band table.
///
/// Breakpoints must be strictly increasing in x; y may ascend or descend.
fn interpolate(bands: &[(f64, f64)], x: f64) -> f64 {
    let (first_x, first_y) = bands[0];
    if x <= first_x {
        return first_y;
    }
    let (last_x, last_y) = bands[bands.len() - 1];
    if x >= last_x {
        return last_y;
    }

    for pair in bands.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            let t = (x - x0) / (x1 - x0);
            return y0 + t * (y1 - y0);
        }
    }

    last_y
}

/// Score distance to site; strictly non-increasing in km
pub fn score_distance(distance_km: f64) -> f64 {
    interpolate(DISTANCE_BANDS, distance_km)
}

/// Score available capacity against the site requirement.
///
/// A large buffer over the requirement (3x or more) scores near-maximal.
pub fn score_capacity(available_mw: f64, required_mw: f64) -> f64 {
    if required_mw <= 0.0 || !required_mw.is_finite() {
        return NEUTRAL_CAPACITY_SCORE;
    }
    interpolate(CAPACITY_RATIO_BANDS, available_mw / required_mw)
}

/// Score estimated delivery timeline; non-increasing in months
pub fn score_timeline(timeline_months: u32) -> f64 {
    interpolate(TIMELINE_BANDS, timeline_months as f64)
}

/// Score estimated connection cost; non-increasing in EUR
pub fn score_cost(estimated_cost_eur: f64) -> f64 {
    interpolate(COST_BANDS, estimated_cost_eur)
}

fn path_subscore(paths: u32) -> f64 {
    match paths {
        0 => 40.0,
        1 => 65.0,
        2 => 85.0,
        _ => 100.0,
    }
}

/// Score the reliability record.
///
/// Sub-weights are renormalized over the fields actually present, so a record
/// with only outage history still yields a meaningful score. A missing record
/// resolves to [`NEUTRAL_RELIABILITY_SCORE`].
pub fn score_reliability(reliability: Option<&ReliabilityRecord>) -> f64 {
    let record = match reliability {
        Some(r) => r,
        None => return NEUTRAL_RELIABILITY_SCORE,
    };

    let mut score = 0.0;
    let mut weight_sum = 0.0;

    if let Some(hours) = record.outage_hours_per_year {
        score += W_OUTAGE * interpolate(OUTAGE_BANDS, hours);
        weight_sum += W_OUTAGE;
    }
    if let Some(paths) = record.redundant_paths {
        score += W_PATHS * path_subscore(paths);
        weight_sum += W_PATHS;
    }
    if let Some(minutes) = record.response_time_min {
        score += W_RESPONSE * interpolate(RESPONSE_BANDS, minutes);
        weight_sum += W_RESPONSE;
    }

    if weight_sum > 0.0 {
        score / weight_sum
    } else {
        NEUTRAL_RELIABILITY_SCORE
    }
}

fn rating_points(rating: RiskRating) -> f64 {
    match rating {
        RiskRating::Low => 90.0,
        RiskRating::Medium => 60.0,
        RiskRating::High => 25.0,
    }
}

/// Score the four-axis risk assessment.
///
/// Each axis contributes equally; a missing assessment resolves to
/// [`NEUTRAL_RISK_SCORE`].
pub fn score_risk(risk: Option<&RiskAssessment>) -> f64 {
    let assessment = match risk {
        Some(r) => r,
        None => return NEUTRAL_RISK_SCORE,
    };

    (rating_points(assessment.permitting)
        + rating_points(assessment.technical)
        + rating_points(assessment.environmental)
        + rating_points(assessment.commercial))
        / 4.0
}

/// Compute all seven factor scores for one candidate
pub fn compute_factor_scores(
    opportunity: &ConnectionOpportunity,
    context: &AnalysisContext,
    tso: &TsoQualityMatrix,
) -> FactorScores {
    FactorScores {
        distance: score_distance(opportunity.distance_km),
        capacity: score_capacity(
            opportunity.available_capacity_mw,
            context.requirements.required_capacity_mw,
        ),
        timeline: score_timeline(opportunity.timeline_months),
        cost: score_cost(opportunity.estimated_cost_eur),
        reliability: score_reliability(opportunity.reliability.as_ref()),
        tso_quality: tso.quality_score(&opportunity.operator),
        risk: score_risk(opportunity.risk.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_band_boundaries() {
        // Excellent band: ~1.5 km scores at least 90
        assert!(score_distance(1.5) >= 90.0, "1.5km: {}", score_distance(1.5));
        // Poor band: ~12 km scores below 50
        assert!(score_distance(12.0) < 50.0, "12km: {}", score_distance(12.0));
        // Extremes
        assert_eq!(score_distance(0.0), 100.0);
        assert_eq!(score_distance(500.0), 25.0);
    }

    #[test]
    fn test_distance_monotone_non_increasing() {
        let samples = [0.0, 0.5, 1.0, 1.9, 2.0, 3.7, 5.0, 8.2, 10.0, 12.0, 19.0, 20.0, 45.0];
        for pair in samples.windows(2) {
            assert!(
                score_distance(pair[0]) >= score_distance(pair[1]),
                "distance score increased between {} and {} km",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_capacity_monotone_in_ratio() {
        let required = 80.0;
        let samples = [40.0, 80.0, 100.0, 120.0, 160.0, 240.0, 400.0];
        for pair in samples.windows(2) {
            assert!(
                score_capacity(pair[0], required) <= score_capacity(pair[1], required),
                "capacity score decreased between {} and {} MW",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_capacity_large_buffer_near_maximal() {
        assert!(score_capacity(300.0, 100.0) >= 99.0);
        assert_eq!(score_capacity(100.0, 0.0), 50.0);
    }

    #[test]
    fn test_timeline_monotone_non_increasing() {
        for months in [0u32, 3, 6, 9, 12, 18, 24, 30, 36, 48] {
            let later = months + 6;
            assert!(
                score_timeline(months) >= score_timeline(later),
                "timeline score increased between {} and {} months",
                months,
                later
            );
        }
    }

    #[test]
    fn test_cost_monotone_non_increasing() {
        let samples = [
            200_000.0,
            500_000.0,
            1_500_000.0,
            3_000_000.0,
            5_500_000.0,
            9_000_000.0,
            14_000_000.0,
            25_000_000.0,
        ];
        for pair in samples.windows(2) {
            assert!(
                score_cost(pair[0]) >= score_cost(pair[1]),
                "cost score increased between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_reliability_missing_record_is_neutral() {
        assert_eq!(score_reliability(None), NEUTRAL_RELIABILITY_SCORE);
        assert_eq!(
            score_reliability(Some(&ReliabilityRecord::default())),
            NEUTRAL_RELIABILITY_SCORE
        );
    }

    #[test]
    fn test_reliability_renormalizes_partial_record() {
        // Only outage history present: score equals the outage subscore
        let partial = ReliabilityRecord {
            outage_hours_per_year: Some(0.0),
            redundant_paths: None,
            response_time_min: None,
        };
        assert_eq!(score_reliability(Some(&partial)), 100.0);

        let full = ReliabilityRecord {
            outage_hours_per_year: Some(0.0),
            redundant_paths: Some(3),
            response_time_min: Some(10.0),
        };
        assert_eq!(score_reliability(Some(&full)), 100.0);
    }

    #[test]
    fn test_reliability_degrades_with_outages() {
        let clean = ReliabilityRecord {
            outage_hours_per_year: Some(2.0),
            redundant_paths: Some(2),
            response_time_min: Some(30.0),
        };
        let flaky = ReliabilityRecord {
            outage_hours_per_year: Some(80.0),
            redundant_paths: Some(2),
            response_time_min: Some(30.0),
        };
        assert!(score_reliability(Some(&clean)) > score_reliability(Some(&flaky)));
    }

    #[test]
    fn test_risk_missing_record_is_neutral() {
        assert_eq!(score_risk(None), NEUTRAL_RISK_SCORE);
    }

    #[test]
    fn test_risk_axes_ordering() {
        let low = RiskAssessment {
            permitting: RiskRating::Low,
            technical: RiskRating::Low,
            environmental: RiskRating::Low,
            commercial: RiskRating::Low,
        };
        let medium = RiskAssessment {
            permitting: RiskRating::Medium,
            technical: RiskRating::Medium,
            environmental: RiskRating::Medium,
            commercial: RiskRating::Medium,
        };
        let high = RiskAssessment {
            permitting: RiskRating::High,
            technical: RiskRating::High,
            environmental: RiskRating::High,
            commercial: RiskRating::High,
        };

        assert!(score_risk(Some(&low)) > score_risk(Some(&medium)));
        assert!(score_risk(Some(&medium)) > score_risk(Some(&high)));
        // All-Medium matches the neutral default
        assert_eq!(score_risk(Some(&medium)), NEUTRAL_RISK_SCORE);
    }
}
