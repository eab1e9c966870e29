//! Bonus calculator
//!
//! Independent additive bonuses for secondary positive attributes. Each bonus
//! is bounded on its own; only the final aggregate clamp enforces the overall
//! score ceiling.

use crate::{BonusBreakdown, ConnectionOpportunity, StrategicValue};

/// Headroom (MW) below which no expansion bonus applies
pub const EXPANSION_FLOOR_MW: f64 = 20.0;

/// Headroom (MW) at which the expansion bonus saturates
pub const EXPANSION_FULL_MW: f64 = 120.0;

/// Maximum expansion bonus points
pub const EXPANSION_MAX_BONUS: f64 = 5.0;

/// Renewable-integration affinity below which no bonus applies
pub const RENEWABLE_FLOOR: f64 = 70.0;

/// Maximum renewable-integration bonus points
pub const RENEWABLE_MAX_BONUS: f64 = 3.0;

/// Fixed bonus for a High strategic-value flag
pub const STRATEGIC_LOCATION_BONUS: f64 = 4.0;

/// Expansion bonus: positive once headroom exceeds the floor, scaling
/// linearly up to the saturation point
pub fn expansion_bonus(headroom_mw: Option<f64>) -> f64 {
    match headroom_mw {
        Some(headroom) if headroom > EXPANSION_FLOOR_MW => {
            let fraction =
                (headroom - EXPANSION_FLOOR_MW) / (EXPANSION_FULL_MW - EXPANSION_FLOOR_MW);
            fraction.min(1.0) * EXPANSION_MAX_BONUS
        }
        _ => 0.0,
    }
}

/// Renewable-integration bonus: positive once affinity exceeds the floor
pub fn renewable_bonus(affinity: Option<f64>) -> f64 {
    match affinity {
        Some(score) if score > RENEWABLE_FLOOR => {
            let fraction = (score - RENEWABLE_FLOOR) / (100.0 - RENEWABLE_FLOOR);
            fraction.min(1.0) * RENEWABLE_MAX_BONUS
        }
        _ => 0.0,
    }
}

/// Strategic-location bonus: fixed points for a High flag, zero otherwise
pub fn strategic_bonus(strategic_value: Option<StrategicValue>) -> f64 {
    match strategic_value {
        Some(StrategicValue::High) => STRATEGIC_LOCATION_BONUS,
        _ => 0.0,
    }
}

/// Compute the full bonus breakdown for one candidate
pub fn compute(opportunity: &ConnectionOpportunity) -> BonusBreakdown {
    BonusBreakdown {
        expansion: expansion_bonus(opportunity.expansion_headroom_mw),
        renewable: renewable_bonus(opportunity.renewable_affinity),
        strategic: strategic_bonus(opportunity.strategic_value),
    }
}
