//! Recommendation engine orchestrator
//!
//! Owns the mutable configuration (weights, thresholds, regional table, TSO
//! matrix, tier breakpoints) and drives the pipeline over a candidate batch:
//! filter -> score -> adjust -> bonus -> aggregate -> classify -> sort.
//!
//! Scoring takes `&self` and mutation takes `&mut self`, so a shared instance
//! cannot interleave an update with a scoring run within safe Rust. Hosts
//! that want per-request isolation construct one engine per caller from a
//! [`RecommendationEngine::config`] snapshot.

use crate::regional::RegionalAdjustmentTable;
use crate::tiers::{self, Tier, TierBreakpoints};
use crate::tso::TsoQualityMatrix;
use crate::{
    bonus, scorer, AnalysisContext, ConnectionOpportunity, Factor, RegionFamily,
    ScoredRecommendation, MAX_QUALIFYING_DISTANCE_KM, MAX_QUALIFYING_TIMELINE_MONTHS,
    MIN_QUALIFYING_CAPACITY_MW,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Hard qualifying limits applied before any scoring
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EligibilityThresholds {
    pub min_capacity_mw: f64,
    pub max_distance_km: f64,
    pub max_timeline_months: u32,
}

impl Default for EligibilityThresholds {
    fn default() -> Self {
        Self {
            min_capacity_mw: MIN_QUALIFYING_CAPACITY_MW,
            max_distance_km: MAX_QUALIFYING_DISTANCE_KM,
            max_timeline_months: MAX_QUALIFYING_TIMELINE_MONTHS,
        }
    }
}

/// Named weight presets tuned to a specific objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightPreset {
    Balanced,
    Aggressive,
    Conservative,
    CostOptimized,
}

impl WeightPreset {
    pub fn name(&self) -> &'static str {
        match self {
            WeightPreset::Balanced => "Balanced",
            WeightPreset::Aggressive => "Aggressive",
            WeightPreset::Conservative => "Conservative",
            WeightPreset::CostOptimized => "Cost-Optimized",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "balanced" => Some(WeightPreset::Balanced),
            "aggressive" => Some(WeightPreset::Aggressive),
            "conservative" => Some(WeightPreset::Conservative),
            "cost-optimized" | "cost_optimized" | "cost" => Some(WeightPreset::CostOptimized),
            _ => None,
        }
    }

    /// The full weight map this preset installs
    pub fn weights(&self) -> BTreeMap<Factor, f64> {
        let table: &[(Factor, f64)] = match self {
            WeightPreset::Balanced => &[
                (Factor::Distance, 0.20),
                (Factor::Capacity, 0.25),
                (Factor::Timeline, 0.15),
                (Factor::Cost, 0.15),
                (Factor::Reliability, 0.10),
                (Factor::TsoQuality, 0.05),
                (Factor::Risk, 0.10),
            ],
            WeightPreset::Aggressive => &[
                (Factor::Distance, 0.15),
                (Factor::Capacity, 0.30),
                (Factor::Timeline, 0.25),
                (Factor::Cost, 0.05),
                (Factor::Reliability, 0.10),
                (Factor::TsoQuality, 0.05),
                (Factor::Risk, 0.10),
            ],
            WeightPreset::Conservative => &[
                (Factor::Distance, 0.10),
                (Factor::Capacity, 0.15),
                (Factor::Timeline, 0.05),
                (Factor::Cost, 0.10),
                (Factor::Reliability, 0.25),
                (Factor::TsoQuality, 0.10),
                (Factor::Risk, 0.25),
            ],
            WeightPreset::CostOptimized => &[
                (Factor::Distance, 0.15),
                (Factor::Capacity, 0.15),
                (Factor::Timeline, 0.10),
                (Factor::Cost, 0.40),
                (Factor::Reliability, 0.08),
                (Factor::TsoQuality, 0.04),
                (Factor::Risk, 0.08),
            ],
        };
        table.iter().copied().collect()
    }
}

/// Active engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Weight per factor; the aggregate sums over exactly these entries.
    /// Intended to sum to 1.0 but never enforced at mutation time.
    pub weights: BTreeMap<Factor, f64>,
    pub thresholds: EligibilityThresholds,
    pub regional: RegionalAdjustmentTable,
    pub tso: TsoQualityMatrix,
    pub tier_breakpoints: TierBreakpoints,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            weights: WeightPreset::Balanced.weights(),
            thresholds: EligibilityThresholds::default(),
            regional: RegionalAdjustmentTable::with_defaults(),
            tso: TsoQualityMatrix::with_defaults(),
            tier_breakpoints: TierBreakpoints::default(),
        }
    }
}

/// Partial configuration update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    /// Weight entries to merge in (each clamped to [0, 1])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<Factor, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_capacity_mw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_timeline_months: Option<u32>,
    /// Regional point overrides; rationales are preserved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regional_points: Option<BTreeMap<RegionFamily, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_breakpoints: Option<TierBreakpoints>,
}

/// Pass/fail qualification against the hard thresholds.
///
/// Failures are dropped before scoring with no diagnostic in the output.
pub fn is_eligible(
    opportunity: &ConnectionOpportunity,
    thresholds: &EligibilityThresholds,
) -> bool {
    if opportunity.available_capacity_mw < thresholds.min_capacity_mw {
        debug!(
            "{} below qualifying capacity ({:.1} < {:.1} MW)",
            opportunity.id, opportunity.available_capacity_mw, thresholds.min_capacity_mw
        );
        return false;
    }
    if opportunity.distance_km > thresholds.max_distance_km {
        debug!(
            "{} beyond qualifying distance ({:.1} > {:.1} km)",
            opportunity.id, opportunity.distance_km, thresholds.max_distance_km
        );
        return false;
    }
    if opportunity.timeline_months > thresholds.max_timeline_months {
        debug!(
            "{} past qualifying timeline ({} > {} months)",
            opportunity.id, opportunity.timeline_months, thresholds.max_timeline_months
        );
        return false;
    }
    true
}

/// Multi-criteria recommendation engine over connection opportunities
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// Read-only view of the active configuration; clone for a snapshot
    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Merge a partial update into the active configuration.
    ///
    /// Weight entries are clamped to [0, 1] individually; the map sum is not
    /// validated — callers opt into [`Self::normalize_weights`].
    pub fn apply_update(&mut self, update: ConfigUpdate) {
        if let Some(weights) = update.weights {
            for (factor, weight) in weights {
                self.config.weights.insert(factor, weight.clamp(0.0, 1.0));
            }
        }
        if let Some(min_capacity) = update.min_capacity_mw {
            self.config.thresholds.min_capacity_mw = min_capacity;
        }
        if let Some(max_distance) = update.max_distance_km {
            self.config.thresholds.max_distance_km = max_distance;
        }
        if let Some(max_timeline) = update.max_timeline_months {
            self.config.thresholds.max_timeline_months = max_timeline;
        }
        if let Some(regional_points) = update.regional_points {
            for (region, points) in regional_points {
                self.config.regional.set_points(region, points);
            }
        }
        if let Some(breakpoints) = update.tier_breakpoints {
            self.config.tier_breakpoints = breakpoints;
        }
        debug!("Configuration updated");
    }

    /// Replace the weight map wholesale with a named preset
    pub fn apply_preset(&mut self, preset: WeightPreset) {
        self.config.weights = preset.weights();
        info!("Applied weight preset: {}", preset.name());
    }

    /// Rescale weights to sum to 1.0, preserving proportions.
    ///
    /// No-op when the current sum is zero.
    pub fn normalize_weights(&mut self) {
        let sum: f64 = self.config.weights.values().sum();
        if sum <= 0.0 {
            return;
        }
        for weight in self.config.weights.values_mut() {
            *weight /= sum;
        }
    }

    /// Run the full pipeline and return recommendations sorted by final
    /// score, descending. The sort is stable: ties keep input order.
    pub fn generate_recommendations(
        &self,
        candidates: &[ConnectionOpportunity],
        context: &AnalysisContext,
    ) -> Vec<ScoredRecommendation> {
        let config = &self.config;

        let mut scored: Vec<ScoredRecommendation> = candidates
            .iter()
            .filter(|opportunity| is_eligible(opportunity, &config.thresholds))
            .map(|opportunity| score_opportunity(config, opportunity, context))
            .collect();

        scored.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        info!(
            "Scored {} of {} candidates for {}",
            scored.len(),
            candidates.len(),
            context.site_name
        );

        scored
    }
}

/// Score one eligible candidate through every stage
fn score_opportunity(
    config: &RecommendationConfig,
    opportunity: &ConnectionOpportunity,
    context: &AnalysisContext,
) -> ScoredRecommendation {
    let factor_scores = scorer::compute_factor_scores(opportunity, context, &config.tso);

    // Sum over exactly the factors present in the weight map
    let weighted: f64 = config
        .weights
        .iter()
        .map(|(factor, weight)| weight * factor_scores.get(*factor))
        .sum();

    let regional = config.regional.resolve(&opportunity.country);
    let bonuses = bonus::compute(opportunity);

    // Clamping is the only mechanism guaranteeing the [0, 100] bound
    let final_score = (weighted + regional.points + bonuses.total()).clamp(0.0, 100.0);

    let tier = Tier::from_score(final_score, &config.tier_breakpoints);

    debug!(
        "Scored {}: {:.1} ({:?}, region {:+.1}, bonus {:+.1})",
        opportunity.id,
        final_score,
        tier,
        regional.points,
        bonuses.total()
    );

    ScoredRecommendation {
        recommendation: tiers::narrative(tier, opportunity),
        strengths: tiers::strengths(opportunity, &factor_scores, &regional, &bonuses),
        concerns: tiers::concerns(opportunity, &factor_scores, &regional),
        next_steps: tiers::next_steps(tier, opportunity),
        opportunity: opportunity.clone(),
        factor_scores,
        regional,
        bonuses,
        final_score,
        tier,
    }
}
