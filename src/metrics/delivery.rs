use super::ratio_score;
use crate::error::Result;
use crate::types::batch::Delivery;
use crate::types::scoring::Score;
use chrono::NaiveDate;

/// Share of the requirement delivered on or before `expected`.
pub fn on_time_score(
    required_quantity: u32,
    deliveries: &[Delivery],
    expected: NaiveDate,
) -> Result<Score> {
    let on_time: u64 = deliveries
        .iter()
        .filter(|delivery| delivery.date <= expected)
        .map(|delivery| u64::from(delivery.quantity_delivered))
        .sum();
    ratio_score(on_time as f64, f64::from(required_quantity), "required quantity")
}

/// Share of the requirement delivered at any date; over-delivery caps at 10.
pub fn in_full_score(required_quantity: u32, deliveries: &[Delivery]) -> Result<Score> {
    let delivered: u64 = deliveries
        .iter()
        .map(|delivery| u64::from(delivery.quantity_delivered))
        .sum();
    ratio_score(delivered as f64, f64::from(required_quantity), "required quantity")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScorecardError;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, day).expect("valid date")
    }

    fn delivery(day: u32, quantity: u32) -> Delivery {
        Delivery {
            date: date(day),
            quantity_delivered: quantity,
            quantity_accepted: quantity,
            quantity_damaged: 0,
            quantity_defective: 0,
        }
    }

    #[test]
    fn on_time_counts_deliveries_up_to_and_including_expected_date() {
        let deliveries = [delivery(10, 40), delivery(15, 30), delivery(20, 30)];
        assert_eq!(on_time_score(100, &deliveries, date(15)).expect("valid"), 7.0);
    }

    #[test]
    fn on_time_is_monotonic_in_on_time_quantity() {
        let mut previous = 0.0;
        for quantity in [0, 10, 33, 50, 99, 100, 140] {
            let score = on_time_score(100, &[delivery(1, quantity)], date(15)).expect("valid");
            assert!(score >= previous);
            assert!((0.0..=10.0).contains(&score));
            previous = score;
        }
    }

    #[test]
    fn on_time_half_hundredth_rounds_to_even() {
        assert_eq!(on_time_score(80, &[delivery(1, 1)], date(15)).expect("valid"), 0.12);
        assert_eq!(on_time_score(80, &[delivery(1, 3)], date(15)).expect("valid"), 0.38);
    }

    #[test]
    fn on_time_rejects_zero_requirement() {
        let result = on_time_score(0, &[delivery(1, 10)], date(15));
        assert!(matches!(result, Err(ScorecardError::InvalidInput(_))));
    }

    #[test]
    fn in_full_ignores_dates() {
        let deliveries = [delivery(10, 40), delivery(28, 60)];
        assert_eq!(in_full_score(100, &deliveries).expect("valid"), 10.0);
    }

    #[test]
    fn in_full_caps_over_delivery() {
        assert_eq!(in_full_score(100, &[delivery(1, 150)]).expect("valid"), 10.0);
    }

    #[test]
    fn in_full_rounds_partial_delivery() {
        assert_eq!(in_full_score(300, &[delivery(1, 100)]).expect("valid"), 3.33);
    }
}
