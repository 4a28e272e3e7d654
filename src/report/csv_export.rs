use crate::error::Result;
use crate::types::report::ScorecardReport;
use crate::types::scoring::{DimensionScores, Score};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Row<'a> {
    supplier: &'a str,
    month: String,
    on_time: Score,
    capacity: Score,
    handling: Score,
    defects: Score,
    response: Score,
    reliability: Score,
    in_full: Score,
    pricing: Score,
    issue_resolution: Score,
    final_score: Option<Score>,
}

impl<'a> Row<'a> {
    fn new(supplier: &'a str, month: String, scores: &DimensionScores) -> Self {
        Self {
            supplier,
            month,
            on_time: scores.on_time,
            capacity: scores.capacity,
            handling: scores.handling,
            defects: scores.defects,
            response: scores.response,
            reliability: scores.reliability,
            in_full: scores.in_full,
            pricing: scores.pricing,
            issue_resolution: scores.issue_resolution,
            final_score: None,
        }
    }
}

/// One row per supplier and month, then an `average` row carrying the final score.
pub fn to_csv(report: &ScorecardReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    for card in &report.suppliers {
        for record in &card.months {
            wtr.serialize(Row::new(
                &card.supplier,
                record.month.to_string(),
                &record.scores,
            ))?;
        }
        let mut average = Row::new(&card.supplier, "average".to_string(), &card.averages);
        average.final_score = Some(card.final_score);
        wtr.serialize(average)?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
