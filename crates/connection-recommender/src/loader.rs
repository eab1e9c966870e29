//! Data loading from JSON files
//!
//! Candidate records arrive from the upstream collection pipeline as JSON,
//! either a bare array or an object with an `opportunities` field. Records
//! missing required numeric attributes are skipped and counted; optional
//! records pass through untouched for the scorers to default.

use crate::{
    AnalysisContext, ConnectionOpportunity, RecommenderError, ReliabilityRecord, Result,
    RiskAssessment, StrategicValue, TechnicalRequirements,
};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Sanitize an ID (alphanumeric, dash, underscore only)
fn sanitize_id(id: String) -> String {
    id.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(128)
        .collect()
}

/// Sanitize a display name (wider charset, still bounded)
fn sanitize_name(name: String) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || " -_.,()&'/".contains(*c))
        .take(256)
        .collect()
}

fn is_valid_quantity(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Raw opportunity record as collected upstream
#[derive(Debug, Deserialize)]
struct RawOpportunity {
    id: Option<String>,
    name: Option<String>,
    operator: Option<String>,
    country: Option<String>,
    distance_km: Option<f64>,
    available_capacity_mw: Option<f64>,
    voltage_kv: Option<f64>,
    timeline_months: Option<u32>,
    estimated_cost_eur: Option<f64>,
    requirements: Option<TechnicalRequirements>,
    reliability: Option<ReliabilityRecord>,
    risk: Option<RiskAssessment>,
    expansion_headroom_mw: Option<f64>,
    renewable_affinity: Option<f64>,
    strategic_value: Option<StrategicValue>,
}

/// Load connection opportunities from a JSON file.
///
/// Accepts a bare array or an object with an `opportunities` field. Records
/// without usable distance, capacity, timeline, or cost are skipped.
pub fn load_opportunities(path: impl AsRef<Path>) -> Result<Vec<ConnectionOpportunity>> {
    let path = path.as_ref();
    info!("Loading connection opportunities from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: serde_json::Value = serde_json::from_reader(reader)?;

    let records: Vec<RawOpportunity> = if let Some(list) = raw.get("opportunities") {
        serde_json::from_value(list.clone())?
    } else if raw.is_array() {
        serde_json::from_value(raw)?
    } else {
        return Err(RecommenderError::NoCandidates);
    };

    let mut opportunities = Vec::new();
    let mut skipped = 0;

    for (i, record) in records.into_iter().enumerate() {
        let distance_km = match record.distance_km {
            Some(d) if is_valid_quantity(d) => d,
            _ => {
                skipped += 1;
                continue;
            }
        };
        let available_capacity_mw = match record.available_capacity_mw {
            Some(c) if is_valid_quantity(c) => c,
            _ => {
                skipped += 1;
                continue;
            }
        };
        let estimated_cost_eur = match record.estimated_cost_eur {
            Some(c) if is_valid_quantity(c) => c,
            _ => {
                skipped += 1;
                continue;
            }
        };
        let timeline_months = match record.timeline_months {
            Some(t) => t,
            None => {
                skipped += 1;
                continue;
            }
        };

        let voltage_kv = record.voltage_kv.unwrap_or(110.0);
        let id = sanitize_id(record.id.unwrap_or_else(|| format!("opp-{}", i)));
        let name = sanitize_name(record.name.unwrap_or_else(|| "Unknown".to_string()));
        let operator = sanitize_name(record.operator.unwrap_or_else(|| "Unknown".to_string()));
        let country = sanitize_name(record.country.unwrap_or_else(|| "Unknown".to_string()));
        let requirements = record.requirements.unwrap_or(TechnicalRequirements {
            min_capacity_mw: 0.0,
            preferred_voltage_kv: voltage_kv,
            redundancy_required: false,
        });

        let mut opportunity = ConnectionOpportunity::new(
            id,
            name,
            operator,
            country,
            distance_km,
            available_capacity_mw,
            voltage_kv,
            timeline_months,
            estimated_cost_eur,
            requirements,
        );
        opportunity.reliability = record.reliability;
        opportunity.risk = record.risk;
        opportunity.expansion_headroom_mw = record.expansion_headroom_mw;
        opportunity.renewable_affinity = record.renewable_affinity;
        opportunity.strategic_value = record.strategic_value;

        opportunities.push(opportunity);
    }

    info!(
        "Loaded {} opportunities ({} skipped for missing attributes)",
        opportunities.len(),
        skipped
    );

    Ok(opportunities)
}

/// Load the site analysis context from a JSON file
pub fn load_context(path: impl AsRef<Path>) -> Result<AnalysisContext> {
    let path = path.as_ref();
    info!("Loading analysis context from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let context: AnalysisContext = serde_json::from_reader(reader)?;

    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_opportunities_array() {
        let json = r#"[
            {"id": "opp-1", "name": "Kajaani 110kV", "operator": "Fingrid", "country": "Finland",
             "distance_km": 3.2, "available_capacity_mw": 150.0, "voltage_kv": 110.0,
             "timeline_months": 14, "estimated_cost_eur": 2500000.0},
            {"id": "opp-2", "name": "No Numbers"}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let opportunities = load_opportunities(file.path()).unwrap();
        assert_eq!(opportunities.len(), 1);
        assert_eq!(opportunities[0].id, "opp-1");
        assert_eq!(opportunities[0].operator, "Fingrid");
        assert!(opportunities[0].reliability.is_none());
    }

    #[test]
    fn test_load_opportunities_wrapped_object() {
        let json = r#"{
            "opportunities": [
                {"id": "opp-1", "name": "Oulu 220kV", "operator": "Fingrid", "country": "FI",
                 "distance_km": 8.0, "available_capacity_mw": 90.0,
                 "timeline_months": 20, "estimated_cost_eur": 4200000.0,
                 "renewable_affinity": 88.0}
            ]
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let opportunities = load_opportunities(file.path()).unwrap();
        assert_eq!(opportunities.len(), 1);
        assert_eq!(opportunities[0].renewable_affinity, Some(88.0));
        // Default voltage applied when absent
        assert_eq!(opportunities[0].voltage_kv, 110.0);
    }

    #[test]
    fn test_load_opportunities_rejects_non_list() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"unexpected": true}"#).unwrap();

        assert!(matches!(
            load_opportunities(file.path()),
            Err(RecommenderError::NoCandidates)
        ));
    }

    #[test]
    fn test_load_opportunities_skips_negative_distance() {
        let json = r#"[
            {"id": "bad", "distance_km": -3.0, "available_capacity_mw": 100.0,
             "timeline_months": 12, "estimated_cost_eur": 1000000.0}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let opportunities = load_opportunities(file.path()).unwrap();
        assert!(opportunities.is_empty());
    }

    #[test]
    fn test_load_context() {
        let json = r#"{
            "site_name": "Kajaani DC Campus",
            "latitude": 64.227,
            "longitude": 27.728,
            "country": "Finland",
            "requirements": {
                "required_capacity_mw": 80.0,
                "preferred_voltage_kv": 110.0,
                "redundancy_required": true
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let context = load_context(file.path()).unwrap();
        assert_eq!(context.site_name, "Kajaani DC Campus");
        assert_eq!(context.requirements.required_capacity_mw, 80.0);
    }
}
