use crate::error::{Result, ScorecardError};
use crate::types::batch::Delivery;
use crate::types::scoring::{bounded, Score, MAX_SCORE};

/// Mean of `10 − 10·damaged/delivered` over the deliveries of one item.
pub fn handling_score(deliveries: &[Delivery]) -> Result<Score> {
    loss_score(deliveries, |delivery| delivery.quantity_damaged)
}

/// Mean of `10 − 10·defective/delivered` over the deliveries of one item.
pub fn defects_score(deliveries: &[Delivery]) -> Result<Score> {
    loss_score(deliveries, |delivery| delivery.quantity_defective)
}

fn loss_score(deliveries: &[Delivery], lost: impl Fn(&Delivery) -> u32) -> Result<Score> {
    if deliveries.is_empty() {
        return Err(ScorecardError::InvalidInput(
            "at least one delivery is required".to_string(),
        ));
    }

    let mut total = 0.0;
    for delivery in deliveries {
        if delivery.quantity_delivered == 0 {
            return Err(ScorecardError::InvalidInput(format!(
                "delivery on {} has zero delivered quantity",
                delivery.date
            )));
        }
        let ratio = f64::from(lost(delivery)) / f64::from(delivery.quantity_delivered);
        total += MAX_SCORE - MAX_SCORE * ratio;
    }
    Ok(bounded(total / deliveries.len() as f64))
}
