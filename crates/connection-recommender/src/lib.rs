//! Grid Connection Recommendation Engine
//!
//! Scores candidate grid-connection opportunities for a prospective facility,
//! filters out non-qualifying candidates, and ranks the survivors into a
//! tiered recommendation list.
//!
//! # Scoring Model (7-Factor with Regional Adjustment + Bonuses)
//!
//! ```text
//! Final(opp) = clamp(0, 100, Σ w_f·S_f + R + Σ B)
//! ```
//!
//! | Factor      | Default Weight | Description |
//! |-------------|----------------|-------------|
//! | Distance    | 0.20           | Proximity of the connection point to the site |
//! | Capacity    | 0.25           | Available capacity vs. the site requirement |
//! | Timeline    | 0.15           | Estimated delivery timeline |
//! | Cost        | 0.15           | Estimated connection capex |
//! | Reliability | 0.10           | Outage history, redundancy, response times |
//! | TSO quality | 0.05           | Operating TSO delivery reputation |
//! | Risk        | 0.10           | Permitting/technical/environmental/commercial risk |
//!
//! `R` is a jurisdiction-keyed regional adjustment (signed) and `B` the sum of
//! expansion, renewable-integration, and strategic-location bonuses. Candidates
//! below the qualifying capacity, beyond the qualifying distance, or past the
//! qualifying timeline are dropped before scoring.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod bonus;
pub mod engine;
pub mod loader;
pub mod regional;
pub mod scorer;
pub mod tiers;
pub mod tso;

pub use engine::{
    ConfigUpdate, EligibilityThresholds, RecommendationConfig, RecommendationEngine, WeightPreset,
};
pub use regional::{RegionFamily, RegionalAdjustmentTable};
pub use tiers::{Tier, TierBreakpoints};
pub use tso::TsoQualityMatrix;

/// Minimum available capacity (MW) a candidate must offer to qualify
pub const MIN_QUALIFYING_CAPACITY_MW: f64 = 10.0;

/// Maximum distance (km) from the site for a candidate to qualify
pub const MAX_QUALIFYING_DISTANCE_KM: f64 = 50.0;

/// Maximum estimated delivery timeline (months) for a candidate to qualify
pub const MAX_QUALIFYING_TIMELINE_MONTHS: u32 = 36;

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No candidates found")]
    NoCandidates,
}

pub type Result<T> = std::result::Result<T, RecommenderError>;

/// Weighted scoring factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Distance,
    Capacity,
    Timeline,
    Cost,
    Reliability,
    TsoQuality,
    Risk,
}

impl Factor {
    pub const ALL: [Factor; 7] = [
        Factor::Distance,
        Factor::Capacity,
        Factor::Timeline,
        Factor::Cost,
        Factor::Reliability,
        Factor::TsoQuality,
        Factor::Risk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Factor::Distance => "distance",
            Factor::Capacity => "capacity",
            Factor::Timeline => "timeline",
            Factor::Cost => "cost",
            Factor::Reliability => "reliability",
            Factor::TsoQuality => "TSO quality",
            Factor::Risk => "risk",
        }
    }
}

/// Qualitative risk rating for a single assessment axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskRating {
    Low,
    Medium,
    High,
}

/// Qualitative strategic value of a connection location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategicValue {
    High,
    Medium,
    Low,
}

/// Technical requirements attached to a connection offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalRequirements {
    pub min_capacity_mw: f64,
    pub preferred_voltage_kv: f64,
    pub redundancy_required: bool,
}

/// Historical reliability record for a connection point
///
/// Individual fields may be absent when the operator publishes partial data;
/// scoring renormalizes over the fields that are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReliabilityRecord {
    /// Historical outage hours per year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outage_hours_per_year: Option<f64>,
    /// Number of redundant supply paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redundant_paths: Option<u32>,
    /// Emergency response time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_min: Option<f64>,
}

/// Qualitative risk assessment across four axes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub permitting: RiskRating,
    pub technical: RiskRating,
    pub environmental: RiskRating,
    pub commercial: RiskRating,
}

/// A candidate grid tie-in point
///
/// Constructed by the upstream data-collection layer once per analysis run;
/// read-only within the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionOpportunity {
    pub id: String,
    pub name: String,
    /// Operating TSO name (e.g. "Fingrid", "Statnett")
    pub operator: String,
    /// Jurisdiction country (name or ISO 3166-1 alpha-2 code)
    pub country: String,
    pub distance_km: f64,
    pub available_capacity_mw: f64,
    pub voltage_kv: f64,
    pub timeline_months: u32,
    pub estimated_cost_eur: f64,
    pub requirements: TechnicalRequirements,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reliability: Option<ReliabilityRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskAssessment>,
    /// Capacity headroom (MW) available for future expansion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion_headroom_mw: Option<f64>,
    /// Renewable-integration affinity score (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewable_affinity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategic_value: Option<StrategicValue>,
}

impl ConnectionOpportunity {
    /// Create an opportunity with the required attributes; optional records
    /// start empty and are filled by the data-collection layer when available.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        operator: impl Into<String>,
        country: impl Into<String>,
        distance_km: f64,
        available_capacity_mw: f64,
        voltage_kv: f64,
        timeline_months: u32,
        estimated_cost_eur: f64,
        requirements: TechnicalRequirements,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            operator: operator.into(),
            country: country.into(),
            distance_km,
            available_capacity_mw,
            voltage_kv,
            timeline_months,
            estimated_cost_eur,
            requirements,
            reliability: None,
            risk: None,
            expansion_headroom_mw: None,
            renewable_affinity: None,
            strategic_value: None,
        }
    }
}

/// Capacity and interface requirements of the site under analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteRequirements {
    pub required_capacity_mw: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_voltage_kv: Option<f64>,
    pub redundancy_required: bool,
}

/// The enclosing site analysis
///
/// Location is carried as data for consumers; the engine performs no geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisContext {
    pub site_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub requirements: SiteRequirements,
}

/// Per-factor scores, each normalized to 0-100
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FactorScores {
    pub distance: f64,
    pub capacity: f64,
    pub timeline: f64,
    pub cost: f64,
    pub reliability: f64,
    pub tso_quality: f64,
    pub risk: f64,
}

impl FactorScores {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Distance => self.distance,
            Factor::Capacity => self.capacity,
            Factor::Timeline => self.timeline,
            Factor::Cost => self.cost,
            Factor::Reliability => self.reliability,
            Factor::TsoQuality => self.tso_quality,
            Factor::Risk => self.risk,
        }
    }
}

/// Regional adjustment applied to a candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalAdjustment {
    pub region: RegionFamily,
    /// Signed point adjustment added to the weighted aggregate
    pub points: f64,
    /// Human-readable rationale, rendered as "{region}: {rationale}"
    pub description: String,
}

/// Additive bonus contributions, reported individually even when zero
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BonusBreakdown {
    pub expansion: f64,
    pub renewable: f64,
    pub strategic: f64,
}

impl BonusBreakdown {
    /// Bonuses are summed, not averaged, before joining the aggregate
    pub fn total(&self) -> f64 {
        self.expansion + self.renewable + self.strategic
    }
}

/// A fully scored and classified connection opportunity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRecommendation {
    pub opportunity: ConnectionOpportunity,
    pub factor_scores: FactorScores,
    pub regional: RegionalAdjustment,
    pub bonuses: BonusBreakdown,
    /// Final score, clamped to [0, 100]
    pub final_score: f64,
    pub tier: Tier,
    /// Templated recommendation narrative for the assigned tier
    pub recommendation: String,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Full ranked output for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub recommendations: Vec<ScoredRecommendation>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub site_name: String,
    pub total_candidates: usize,
    pub eligible_candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    pub generated_at: String,
}
