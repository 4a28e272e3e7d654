use crate::error::ScorecardError;
use crate::types::scoring::{Dimension, Weights};
use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_PRICE_WINDOW: u32 = 6;
pub const DEFAULT_PRECISION: u32 = 2;
const MAX_PRECISION: u32 = 6;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScorecardConfig {
    pub weights: Option<HashMap<String, f64>>,
    pub pricing: Option<PricingConfig>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    pub window: Option<u32>,
    pub unseeded: Option<UnseededPrice>,
}

/// What the rolling average starts from when a supplier/item pair has no seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnseededPrice {
    /// Fold the first observation into an average of zero.
    #[default]
    Zero,
    /// The first observation becomes the average.
    FirstObservation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub precision: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingSettings {
    pub window: u32,
    pub unseeded: UnseededPrice,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            window: DEFAULT_PRICE_WINDOW,
            unseeded: UnseededPrice::default(),
        }
    }
}

impl ScorecardConfig {
    /// Default weights overlaid with configured keys, then with `overrides`.
    pub fn weights(&self, overrides: Option<&HashMap<String, f64>>) -> Weights {
        let mut weights = Weights::default();
        for table in [self.weights.as_ref(), overrides].into_iter().flatten() {
            for (key, value) in table {
                if let Some(dimension) = Dimension::from_key(key) {
                    weights.set(dimension, *value);
                }
            }
        }
        weights
    }

    pub fn pricing(&self) -> PricingSettings {
        let defaults = PricingSettings::default();
        match &self.pricing {
            Some(pricing) => PricingSettings {
                window: pricing.window.unwrap_or(defaults.window),
                unseeded: pricing.unseeded.unwrap_or(defaults.unseeded),
            },
            None => defaults,
        }
    }

    pub fn precision(&self) -> u32 {
        self.report
            .as_ref()
            .and_then(|report| report.precision)
            .unwrap_or(DEFAULT_PRECISION)
    }

    pub fn validate(&self) -> Result<(), ScorecardError> {
        if let Some(weights) = &self.weights {
            validate_weight_table("weights", weights)?;
        }

        let total = self.weights(None).total();
        if total <= 0.0 {
            return Err(ScorecardError::ConfigParse(
                "weights must contain at least one positive value".to_string(),
            ));
        }

        if let Some(window) = self.pricing.as_ref().and_then(|pricing| pricing.window) {
            if window == 0 {
                return Err(ScorecardError::ConfigParse(
                    "pricing.window must be greater than 0".to_string(),
                ));
            }
        }

        if let Some(precision) = self.report.as_ref().and_then(|report| report.precision) {
            if precision > MAX_PRECISION {
                return Err(ScorecardError::ConfigParse(format!(
                    "report.precision must be between 0 and {MAX_PRECISION}"
                )));
            }
        }

        Ok(())
    }
}

/// Checks key names and ranges of a `[weights]` table.
pub fn validate_weight_table(
    section: &str,
    weights: &HashMap<String, f64>,
) -> Result<(), ScorecardError> {
    let mut unknown = weights
        .keys()
        .filter(|key| Dimension::from_key(key).is_none())
        .cloned()
        .collect::<Vec<_>>();
    if !unknown.is_empty() {
        unknown.sort();
        return Err(ScorecardError::ConfigParse(format!(
            "{section} contains unknown key(s): {}",
            unknown.join(", ")
        )));
    }

    if let Some((key, value)) = weights
        .iter()
        .find(|(_, value)| !value.is_finite() || !(0.0..=1.0).contains(*value))
    {
        return Err(ScorecardError::ConfigParse(format!(
            "{section}.{key} must be between 0.0 and 1.0 (found {value})"
        )));
    }

    Ok(())
}
