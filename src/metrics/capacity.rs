use super::ratio_score;
use crate::error::Result;
use crate::reference::ReferenceData;
use crate::types::scoring::Score;

/// Committed capacity against the requirement; missing capacity data scores 0.
pub fn capacity_score(
    reference: &ReferenceData,
    supplier: &str,
    month: u32,
    item: &str,
    required_quantity: u32,
) -> Result<Score> {
    match reference.capacity(supplier, month, item) {
        Some(capacity) => ratio_score(capacity, f64::from(required_quantity), "required quantity"),
        None => {
            tracing::debug!(supplier, month, item, "no capacity data, scoring 0");
            Ok(0.0)
        }
    }
}
