use crate::types::report::ScorecardReport;
use crate::types::scoring::Dimension;

pub fn to_markdown(report: &ScorecardReport, precision: usize) -> String {
    let mut output = String::new();
    output.push_str("# Supplier Performance Scorecard\n\n");
    output.push_str(&format!(
        "Reporting window: {} month(s), {} supplier(s)\n\n",
        report.duration_months,
        report.suppliers.len()
    ));

    output.push_str("## Weights\n\n");
    for dimension in Dimension::ALL {
        output.push_str(&format!(
            "- {}: {:.2}\n",
            dimension.label(),
            report.weights.get(dimension)
        ));
    }
    output.push('\n');

    for card in &report.suppliers {
        output.push_str(&format!("## Supplier: {}\n\n", card.supplier));

        output.push_str("| Month |");
        for dimension in Dimension::ALL {
            output.push_str(&format!(" {} |", dimension.label()));
        }
        output.push_str("\n|---|");
        for _ in Dimension::ALL {
            output.push_str("---|");
        }
        output.push('\n');
        for record in &card.months {
            output.push_str(&format!("| {} |", record.month));
            for dimension in Dimension::ALL {
                output.push_str(&format!(
                    " {:.precision$} |",
                    record.scores.get(dimension)
                ));
            }
            output.push('\n');
        }
        output.push('\n');

        for dimension in Dimension::ALL {
            output.push_str(&format!(
                "- Average {} Score: {:.precision$}\n",
                dimension.label(),
                card.averages.get(dimension)
            ));
        }
        output.push_str(&format!(
            "- **Final Weighted Average Score: {:.precision$}**\n\n",
            card.final_score
        ));
    }

    if !report.rolling_prices.is_empty() {
        output.push_str("## Rolling Average Prices\n\n");
        for (supplier, items) in &report.rolling_prices {
            for (item, price) in items {
                output.push_str(&format!("- {supplier} / {item}: {price:.2}\n"));
            }
        }
        output.push('\n');
    }

    if let Some(leader) = report.leader() {
        output.push_str(&format!(
            "Top supplier: {} ({:.precision$})\n",
            leader.supplier, leader.final_score
        ));
    }

    output
}
