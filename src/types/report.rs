use crate::types::scoring::{DimensionScores, Score, ScoreRecord, Weights};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ScorecardReport {
    pub generated_at: String,
    pub duration_months: u32,
    pub weights: Weights,
    pub suppliers: Vec<SupplierScorecard>,
    /// Rolling average prices after every observation in the batch was folded in.
    pub rolling_prices: BTreeMap<String, BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplierScorecard {
    pub supplier: String,
    pub months: Vec<ScoreRecord>,
    pub averages: DimensionScores,
    pub final_score: Score,
}

impl ScorecardReport {
    /// Supplier with the highest final score; ties keep entry order.
    pub fn leader(&self) -> Option<&SupplierScorecard> {
        self.suppliers.iter().fold(None, |best, card| match best {
            Some(current) if current.final_score >= card.final_score => Some(current),
            _ => Some(card),
        })
    }
}
