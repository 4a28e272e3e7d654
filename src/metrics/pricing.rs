use super::ratio_score;
use crate::error::{Result, ScorecardError};
use crate::reference::ReferenceData;
use crate::types::scoring::Score;

/// Rewards a current price at or below the rolling average.
///
/// Both prices are expressed relative to the item's standard price before
/// comparing, so the score is `10 · (avg/standard) / (price/standard)`. An item
/// with no standard price scores 0.
pub fn pricing_score(
    reference: &ReferenceData,
    item: &str,
    supplier_price: f64,
    rolling_average: f64,
) -> Result<Score> {
    let Some(standard) = reference.standard_price(item) else {
        tracing::debug!(item, "no standard price, scoring 0");
        return Ok(0.0);
    };
    if supplier_price <= 0.0 {
        return Err(ScorecardError::InvalidInput(format!(
            "price charged for {item} must be greater than zero"
        )));
    }
    let average_ratio = rolling_average / standard;
    let price_ratio = supplier_price / standard;
    ratio_score(average_ratio, price_ratio, "price ratio")
}
