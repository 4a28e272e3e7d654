use crate::error::{Result, ScorecardError};
use crate::metrics::{capacity, delivery, pricing, quality, resolution};
use crate::reference::{ReferenceData, RollingPriceTable};
use crate::types::batch::{ItemRequirement, MonthlySupplierRecord, ScoringBatch};
use crate::types::config::ScorecardConfig;
use crate::types::report::{ScorecardReport, SupplierScorecard};
use crate::types::scoring::{
    round_to, DimensionScores, Score, ScoreRecord, Weights, MAX_SCORE,
};
use chrono::Utc;

/// Scores of one item in one monthly order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemScores {
    pub on_time: Score,
    pub capacity: Score,
    pub handling: Score,
    pub defects: Score,
    pub in_full: Score,
    pub pricing: Score,
}

/// Reference tables, rolling price state and weights for one scoring run.
#[derive(Debug, Clone)]
pub struct ScoringSession {
    reference: ReferenceData,
    prices: RollingPriceTable,
    weights: Weights,
    precision: u32,
}

impl ScoringSession {
    pub fn new(
        reference: ReferenceData,
        prices: RollingPriceTable,
        weights: Weights,
        precision: u32,
    ) -> Self {
        Self {
            reference,
            prices,
            weights,
            precision,
        }
    }

    pub fn from_batch(batch: &ScoringBatch, config: &ScorecardConfig) -> Self {
        let pricing = config.pricing();
        Self::new(
            ReferenceData::from_batch(batch),
            RollingPriceTable::new(batch.rolling_prices.clone(), pricing.window, pricing.unseeded),
            config.weights(batch.weights.as_ref()),
            config.precision(),
        )
    }

    /// Scores every supplier, walking months first so rolling prices advance in entry order.
    pub fn score_batch(&mut self, batch: &ScoringBatch) -> Result<ScorecardReport> {
        let mut monthly: Vec<Vec<DimensionScores>> = vec![Vec::new(); batch.suppliers.len()];

        for month in 1..=batch.duration_months {
            for (index, supplier) in batch.suppliers.iter().enumerate() {
                let record = batch.record(supplier, month).ok_or_else(|| {
                    ScorecardError::InvalidInput(format!(
                        "no record for {supplier} in month {month}"
                    ))
                })?;
                let scores = self.score_month(record)?;
                tracing::debug!(supplier = %supplier, month, ?scores, "month scored");
                if let Some(rows) = monthly.get_mut(index) {
                    rows.push(scores);
                }
            }
        }

        let mut suppliers = Vec::with_capacity(batch.suppliers.len());
        for (supplier, rows) in batch.suppliers.iter().zip(monthly) {
            let averages = DimensionScores::mean(&rows);
            let final_score = averages.weighted(&self.weights)?;
            tracing::info!(supplier = %supplier, final_score, "supplier scored");

            let precision = self.precision;
            suppliers.push(SupplierScorecard {
                supplier: supplier.clone(),
                months: rows
                    .iter()
                    .zip(1..)
                    .map(|(scores, month)| ScoreRecord {
                        month,
                        scores: scores.map(|value| round_to(value, precision)),
                    })
                    .collect(),
                averages: averages.map(|value| round_to(value, precision)),
                final_score: round_to(final_score, precision),
            });
        }

        Ok(ScorecardReport {
            generated_at: Utc::now().to_rfc3339(),
            duration_months: batch.duration_months,
            weights: self.weights,
            suppliers,
            rolling_prices: self.prices.snapshot(),
        })
    }

    /// Averages item scores across one order and passes the per-record scores through.
    pub fn score_month(&mut self, record: &MonthlySupplierRecord) -> Result<DimensionScores> {
        let mut items = Vec::with_capacity(record.items.len());
        for item in &record.items {
            items.push(self.score_item(&record.supplier, record.month, item)?);
        }

        Ok(DimensionScores {
            on_time: mean(items.iter().map(|item| item.on_time)),
            capacity: mean(items.iter().map(|item| item.capacity)),
            handling: mean(items.iter().map(|item| item.handling)),
            defects: mean(items.iter().map(|item| item.defects)),
            response: record.response_score.min(MAX_SCORE),
            reliability: record.reliability_score.min(MAX_SCORE),
            in_full: mean(items.iter().map(|item| item.in_full)),
            pricing: mean(items.iter().map(|item| item.pricing)),
            issue_resolution: resolution::issue_resolution_score(
                record.capa_issues_total,
                record.capa_issues_closed,
            )?,
        })
    }

    /// Folds the item's price into the rolling average, then scores the item.
    pub fn score_item(
        &mut self,
        supplier: &str,
        month: u32,
        item: &ItemRequirement,
    ) -> Result<ItemScores> {
        let average = self.prices.observe(supplier, &item.name, item.unit_price);
        let rejected: u32 = item
            .deliveries
            .iter()
            .map(|delivery| delivery.quantity_rejected())
            .sum();
        tracing::debug!(supplier, month, item = %item.name, rejected, "scoring item");
        Ok(ItemScores {
            on_time: delivery::on_time_score(
                item.required_quantity,
                &item.deliveries,
                item.expected_delivery_date,
            )?,
            capacity: capacity::capacity_score(
                &self.reference,
                supplier,
                month,
                &item.name,
                item.required_quantity,
            )?,
            handling: quality::handling_score(&item.deliveries)?,
            defects: quality::defects_score(&item.deliveries)?,
            in_full: delivery::in_full_score(item.required_quantity, &item.deliveries)?,
            pricing: pricing::pricing_score(&self.reference, &item.name, item.unit_price, average)?,
        })
    }
}

fn mean(values: impl ExactSizeIterator<Item = Score>) -> Score {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.sum::<Score>() / count as Score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::UnseededPrice;
    use crate::types::scoring::Dimension;
    use crate::validation;

    const TOM_ONE_MONTH: &str = r#"
duration_months = 1
suppliers = ["Tom"]

[standard_prices]
Oil = 90.0

[[capacity]]
supplier = "Tom"
month = 1
items = { Oil = 97 }

[rolling_prices.Tom]
Oil = 99.83

[[records]]
supplier = "Tom"
month = 1
order_date = "2025-02-01"
response_score = 5.0
reliability_score = 5.0
capa_issues_total = 5
capa_issues_closed = 3

[[records.items]]
name = "Oil"
required_quantity = 100
expected_delivery_date = "2025-02-15"
unit_price = 99.83

[[records.items.deliveries]]
date = "2025-02-01"
quantity_delivered = 100
quantity_accepted = 100
"#;

    fn card<'a>(report: &'a ScorecardReport, supplier: &str) -> &'a SupplierScorecard {
        report
            .suppliers
            .iter()
            .find(|card| card.supplier == supplier)
            .expect("supplier should be scored")
    }

    fn score(content: &str, config: &ScorecardConfig) -> ScorecardReport {
        let batch = ScoringBatch::parse(content).expect("batch should parse");
        ScoringSession::from_batch(&batch, config)
            .score_batch(&batch)
            .expect("batch should score")
    }

    #[test]
    fn single_supplier_single_item_scenario() {
        let report = score(TOM_ONE_MONTH, &ScorecardConfig::default());
        let tom = card(&report, "Tom");

        assert_eq!(tom.months.len(), 1);
        let month = &tom.months[0];
        assert_eq!(month.month, 1);
        assert_eq!(month.scores.on_time, 10.0);
        assert_eq!(month.scores.in_full, 10.0);
        assert_eq!(month.scores.handling, 10.0);
        assert_eq!(month.scores.defects, 10.0);
        assert_eq!(month.scores.capacity, 9.7);
        assert_eq!(month.scores.pricing, 10.0);
        assert_eq!(month.scores.issue_resolution, 6.0);
        assert_eq!(tom.averages, month.scores);
    }

    #[test]
    fn final_score_is_weight_normalised() {
        let report = score(TOM_ONE_MONTH, &ScorecardConfig::default());
        let tom = card(&report, "Tom");
        // (0.2*10 + 0.2*9.7 + 0.1*(10+10+5+5+10+10+6)) / 1.1
        assert_eq!(tom.final_score, 8.67);
        assert!((0.0..=10.0).contains(&tom.final_score));
    }

    #[test]
    fn response_above_ten_is_clamped() {
        let content = TOM_ONE_MONTH.replace("response_score = 5.0", "response_score = 14.0");
        let report = score(&content, &ScorecardConfig::default());
        let tom = card(&report, "Tom");
        assert_eq!(tom.months[0].scores.response, 10.0);
    }

    #[test]
    fn rolling_price_carries_across_months() {
        let content = r#"
duration_months = 2
suppliers = ["Tom"]

[standard_prices]
Oil = 90.0

[rolling_prices.Tom]
Oil = 100.0

[[records]]
supplier = "Tom"
month = 1
order_date = "2025-02-01"
response_score = 5.0
reliability_score = 5.0

[[records.items]]
name = "Oil"
required_quantity = 10
expected_delivery_date = "2025-02-15"
unit_price = 70.0

[[records.items.deliveries]]
date = "2025-02-01"
quantity_delivered = 10
quantity_accepted = 10

[[records]]
supplier = "Tom"
month = 2
order_date = "2025-03-01"
response_score = 5.0
reliability_score = 5.0

[[records.items]]
name = "Oil"
required_quantity = 10
expected_delivery_date = "2025-03-15"
unit_price = 114.0

[[records.items.deliveries]]
date = "2025-03-01"
quantity_delivered = 10
quantity_accepted = 10
"#;
        let batch = ScoringBatch::parse(content).expect("batch should parse");
        let mut session = ScoringSession::from_batch(&batch, &ScorecardConfig::default());
        let report = session.score_batch(&batch).expect("batch should score");

        // month 1: avg 100 -> 95, price 70 is below it; month 2: 95 -> 98.17
        assert_eq!(round_to(report.rolling_prices["Tom"]["Oil"], 2), 98.17);
        let tom = card(&report, "Tom");
        assert_eq!(tom.months[0].scores.pricing, 10.0);
        assert_eq!(tom.months[1].scores.pricing, 8.61);
        assert_eq!(tom.months[1].month, 2);
        // no capacity table at all
        assert_eq!(tom.averages.capacity, 0.0);
    }

    #[test]
    fn zero_policy_starts_unseeded_average_from_zero() {
        let batch = ScoringBatch::parse(TOM_ONE_MONTH).expect("batch should parse");
        let mut session = ScoringSession::new(
            ReferenceData::from_batch(&batch),
            RollingPriceTable::new(Default::default(), 6, UnseededPrice::Zero),
            Weights::default(),
            2,
        );
        let report = session.score_batch(&batch).expect("batch should score");
        let tom = card(&report, "Tom");
        // avg = 99.83 / 6
        assert_eq!(tom.months[0].scores.pricing, 1.67);
    }

    #[test]
    fn unseeded_pair_scores_against_zero_start_by_default() {
        let content = TOM_ONE_MONTH.replace("[rolling_prices.Tom]\nOil = 99.83\n", "");
        let report = score(&content, &ScorecardConfig::default());
        let tom = card(&report, "Tom");
        assert_eq!(tom.months[0].scores.pricing, 1.67);
        assert_eq!(round_to(report.rolling_prices["Tom"]["Oil"], 2), 16.64);
    }

    #[test]
    fn first_observation_policy_is_opt_in() {
        let content = TOM_ONE_MONTH.replace("[rolling_prices.Tom]\nOil = 99.83\n", "");
        let config: ScorecardConfig =
            toml::from_str("[pricing]\nunseeded = \"first-observation\"\n")
                .expect("config should parse");
        let report = score(&content, &config);
        assert_eq!(card(&report, "Tom").months[0].scores.pricing, 10.0);
    }

    #[test]
    fn every_score_stays_within_bounds() {
        let template = ScoringBatch::parse(TOM_ONE_MONTH).expect("batch should parse");
        let config = ScorecardConfig::default();
        let late = chrono::NaiveDate::from_ymd_opt(2025, 3, 30).expect("valid date");

        for delivered in [1_u32, 50, 100, 250] {
            for fully_damaged in [false, true] {
                for unit_price in [0.5, 99.83, 5000.0] {
                    for response in [0.0, 5.0, 14.0] {
                        for (total, closed) in [(0, 0), (5, 3), (2, 2)] {
                            let mut batch = template.clone();
                            let record = &mut batch.records[0];
                            record.response_score = response;
                            record.reliability_score = response;
                            record.capa_issues_total = total;
                            record.capa_issues_closed = closed;

                            let item = &mut record.items[0];
                            item.unit_price = unit_price;
                            let delivery = &mut item.deliveries[0];
                            delivery.quantity_delivered = delivered;
                            if fully_damaged {
                                delivery.date = late;
                                delivery.quantity_accepted = 0;
                                delivery.quantity_damaged = delivered;
                                delivery.quantity_defective = delivered;
                            } else {
                                delivery.quantity_accepted = delivered;
                            }
                            assert!(validation::validate(&batch, &config).is_ok());

                            let report = ScoringSession::from_batch(&batch, &config)
                                .score_batch(&batch)
                                .expect("batch should score");
                            let tom = card(&report, "Tom");
                            let rows = tom.months.iter().map(|row| &row.scores);
                            for scores in rows.chain(std::iter::once(&tom.averages)) {
                                for dimension in Dimension::ALL {
                                    let value = scores.get(dimension);
                                    assert!(
                                        (0.0..=MAX_SCORE).contains(&value),
                                        "{} = {value} for delivered {delivered}, price {unit_price}",
                                        dimension.key()
                                    );
                                }
                            }
                            assert!((0.0..=MAX_SCORE).contains(&tom.final_score));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn month_averages_items() {
        let batch = ScoringBatch::parse(TOM_ONE_MONTH).expect("batch should parse");
        let mut record = batch.records[0].clone();
        let mut second = record.items[0].clone();
        second.name = "Chemicals".to_string();
        second.deliveries[0].quantity_delivered = 50;
        second.deliveries[0].quantity_accepted = 50;
        record.items.push(second);

        let mut session = ScoringSession::from_batch(&batch, &ScorecardConfig::default());
        let scores = session.score_month(&record).expect("month should score");
        assert_eq!(scores.on_time, 7.5);
        assert_eq!(scores.in_full, 7.5);
        // Chemicals has neither capacity nor a standard price
        assert_eq!(scores.capacity, 4.85);
        assert_eq!(scores.pricing, 5.0);
    }

    #[test]
    fn month_without_items_scores_zero_item_dimensions() {
        let batch = ScoringBatch::parse(TOM_ONE_MONTH).expect("batch should parse");
        let mut record = batch.records[0].clone();
        record.items.clear();

        let mut session = ScoringSession::from_batch(&batch, &ScorecardConfig::default());
        let scores = session.score_month(&record).expect("month should score");
        assert_eq!(scores.on_time, 0.0);
        assert_eq!(scores.pricing, 0.0);
        assert_eq!(scores.response, 5.0);
    }

    #[test]
    fn missing_record_aborts_the_batch() {
        let mut batch = ScoringBatch::parse(TOM_ONE_MONTH).expect("batch should parse");
        batch.suppliers.push("Harry".to_string());
        let mut session = ScoringSession::from_batch(&batch, &ScorecardConfig::default());
        assert!(matches!(
            session.score_batch(&batch),
            Err(ScorecardError::InvalidInput(message)) if message.contains("Harry")
        ));
    }

    #[test]
    fn precision_controls_report_rounding() {
        let config: ScorecardConfig =
            toml::from_str("[report]\nprecision = 0\n").expect("config should parse");
        let report = score(TOM_ONE_MONTH, &config);
        let tom = card(&report, "Tom");
        assert_eq!(tom.averages.capacity, 10.0);
        assert_eq!(tom.final_score, 9.0);
    }
}
