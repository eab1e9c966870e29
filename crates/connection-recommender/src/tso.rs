//! TSO quality matrix
//!
//! Static quality scores for European transmission system operators, keyed by
//! operator name. Scores reflect connection-delivery reputation: published
//! grid development plans, queue transparency, and historical delivery of
//! connection agreements. Unknown operators receive a neutral default rather
//! than an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Score assigned to operators absent from the matrix
pub const DEFAULT_TSO_SCORE: f64 = 70.0;

/// Operator-name-keyed quality matrix (0-100, higher = stronger delivery)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TsoQualityMatrix {
    /// Quality scores keyed by lowercase operator name
    pub operators: HashMap<String, f64>,
    /// Fallback score for unknown operators
    pub default_score: f64,
}

impl Default for TsoQualityMatrix {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TsoQualityMatrix {
    pub fn new() -> Self {
        Self {
            operators: HashMap::new(),
            default_score: DEFAULT_TSO_SCORE,
        }
    }

    /// Matrix pre-loaded with the European TSOs the analysis pipeline tracks
    pub fn with_defaults() -> Self {
        let mut matrix = Self::new();

        // Nordic
        matrix.add("Fingrid", 95.0);
        matrix.add("Statnett", 92.0);
        matrix.add("Svenska kraftnät", 90.0);
        matrix.add("Energinet", 93.0);
        matrix.add("Landsnet", 84.0);

        // Baltic
        matrix.add("Elering", 82.0);
        matrix.add("Litgrid", 78.0);
        matrix.add("AST", 76.0);

        // Western Europe
        matrix.add("TenneT", 88.0);
        matrix.add("RTE", 87.0);
        matrix.add("Elia", 88.0);
        matrix.add("Creos", 80.0);

        // Central Europe
        matrix.add("50Hertz", 85.0);
        matrix.add("Amprion", 84.0);
        matrix.add("TransnetBW", 83.0);
        matrix.add("Swissgrid", 90.0);
        matrix.add("APG", 85.0);
        matrix.add("ČEPS", 80.0);
        matrix.add("PSE", 72.0);
        matrix.add("SEPS", 74.0);
        matrix.add("MAVIR", 75.0);

        // British Isles
        matrix.add("National Grid ESO", 86.0);
        matrix.add("EirGrid", 80.0);

        // Southern Europe
        matrix.add("Terna", 82.0);
        matrix.add("Red Eléctrica", 81.0);
        matrix.add("REN", 79.0);
        matrix.add("IPTO", 73.0);

        matrix
    }

    fn add(&mut self, name: &str, score: f64) {
        self.operators.insert(name.to_lowercase(), score);
    }

    /// Quality score for an operator; case-insensitive, defaults when unknown
    pub fn quality_score(&self, operator: &str) -> f64 {
        self.operators
            .get(&operator.trim().to_lowercase())
            .copied()
            .unwrap_or(self.default_score)
    }
}
