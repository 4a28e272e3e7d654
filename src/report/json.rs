use crate::types::report::ScorecardReport;

pub fn to_json(report: &ScorecardReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn json_report_contains_final_scores_and_flattened_months() {
        let rendered = to_json(&fixtures::report()).expect("json should serialize");
        assert!(rendered.contains("\"final_score\": 8.5"));
        assert!(rendered.contains("\"supplier\": \"Harry\""));

        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(value["suppliers"][0]["months"][1]["month"], 2);
        assert_eq!(value["suppliers"][0]["months"][1]["on_time"], 9.0);
        assert_eq!(value["weights"]["capacity"], 0.2);
    }
}
