use crate::error::{Result, ScorecardError};
use serde::Serialize;

pub type Score = f64;

pub const MAX_SCORE: Score = 10.0;

/// Rounds to `places` decimals, the way every calculator reports its result.
/// Exact halves go to the even neighbour, so `0.125` becomes `0.12`.
pub fn round_to(value: Score, places: u32) -> Score {
    let factor = 10_f64.powi(places as i32);
    (value * factor).round_ties_even() / factor
}

/// Rounds to two decimals and clamps into `[0, 10]`.
pub fn bounded(value: Score) -> Score {
    round_to(value, 2).clamp(0.0, MAX_SCORE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    OnTime,
    Capacity,
    Handling,
    Defects,
    Response,
    Reliability,
    InFull,
    Pricing,
    IssueResolution,
}

impl Dimension {
    pub const ALL: [Dimension; 9] = [
        Dimension::OnTime,
        Dimension::Capacity,
        Dimension::Handling,
        Dimension::Defects,
        Dimension::Response,
        Dimension::Reliability,
        Dimension::InFull,
        Dimension::Pricing,
        Dimension::IssueResolution,
    ];

    /// Key used in config tables and machine-readable output.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::OnTime => "on_time",
            Dimension::Capacity => "capacity",
            Dimension::Handling => "handling",
            Dimension::Defects => "defects",
            Dimension::Response => "response",
            Dimension::Reliability => "reliability",
            Dimension::InFull => "in_full",
            Dimension::Pricing => "pricing",
            Dimension::IssueResolution => "issue_resolution",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::OnTime => "On-time",
            Dimension::Capacity => "Capacity",
            Dimension::Handling => "Quality - Handling (Transportation)",
            Dimension::Defects => "Quality - Supplier Defects",
            Dimension::Response => "Response",
            Dimension::Reliability => "Reliability",
            Dimension::InFull => "In-Full",
            Dimension::Pricing => "Pricing",
            Dimension::IssueResolution => "Issue Resolution",
        }
    }

    pub fn from_key(key: &str) -> Option<Dimension> {
        Dimension::ALL.into_iter().find(|dimension| dimension.key() == key)
    }
}

/// The nine scored dimensions for one month or one supplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DimensionScores {
    pub on_time: Score,
    pub capacity: Score,
    pub handling: Score,
    pub defects: Score,
    pub response: Score,
    pub reliability: Score,
    pub in_full: Score,
    pub pricing: Score,
    pub issue_resolution: Score,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> Score {
        match dimension {
            Dimension::OnTime => self.on_time,
            Dimension::Capacity => self.capacity,
            Dimension::Handling => self.handling,
            Dimension::Defects => self.defects,
            Dimension::Response => self.response,
            Dimension::Reliability => self.reliability,
            Dimension::InFull => self.in_full,
            Dimension::Pricing => self.pricing,
            Dimension::IssueResolution => self.issue_resolution,
        }
    }

    fn slot(&mut self, dimension: Dimension) -> &mut Score {
        match dimension {
            Dimension::OnTime => &mut self.on_time,
            Dimension::Capacity => &mut self.capacity,
            Dimension::Handling => &mut self.handling,
            Dimension::Defects => &mut self.defects,
            Dimension::Response => &mut self.response,
            Dimension::Reliability => &mut self.reliability,
            Dimension::InFull => &mut self.in_full,
            Dimension::Pricing => &mut self.pricing,
            Dimension::IssueResolution => &mut self.issue_resolution,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: Score) {
        *self.slot(dimension) = value;
    }

    pub fn map(&self, f: impl Fn(Score) -> Score) -> Self {
        let mut out = Self::default();
        for dimension in Dimension::ALL {
            out.set(dimension, f(self.get(dimension)));
        }
        out
    }

    /// Unweighted arithmetic mean per dimension; all zeros for an empty set.
    pub fn mean<'a>(rows: impl IntoIterator<Item = &'a DimensionScores>) -> Self {
        let mut sum = Self::default();
        let mut count = 0_usize;
        for row in rows {
            for dimension in Dimension::ALL {
                *sum.slot(dimension) += row.get(dimension);
            }
            count += 1;
        }
        if count == 0 {
            return sum;
        }
        sum.map(|total| total / count as Score)
    }

    /// Weight-normalised combination: `Σ score·weight / Σ weight`.
    pub fn weighted(&self, weights: &Weights) -> Result<Score> {
        let total_weight = weights.total();
        if !total_weight.is_finite() || total_weight <= 0.0 {
            return Err(ScorecardError::InvalidInput(format!(
                "total weight must be positive (found {total_weight})"
            )));
        }
        let weighted_sum: Score = Dimension::ALL
            .iter()
            .map(|dimension| self.get(*dimension) * weights.get(*dimension))
            .sum();
        Ok(weighted_sum / total_weight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights(DimensionScores);

impl Weights {
    pub fn new(values: DimensionScores) -> Self {
        Self(values)
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0.get(dimension)
    }

    pub fn set(&mut self, dimension: Dimension, value: f64) {
        self.0.set(dimension, value);
    }

    pub fn total(&self) -> f64 {
        Dimension::ALL.iter().map(|dimension| self.get(*dimension)).sum()
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(DimensionScores {
            on_time: 0.2,
            capacity: 0.2,
            handling: 0.1,
            defects: 0.1,
            response: 0.1,
            reliability: 0.1,
            in_full: 0.1,
            pricing: 0.1,
            issue_resolution: 0.1,
        })
    }
}

/// Averaged dimensions for one supplier and month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub month: u32,
    #[serde(flatten)]
    pub scores: DimensionScores,
}
