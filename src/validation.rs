use crate::error::{ScorecardError, Violation};
use crate::types::batch::{Delivery, ItemRequirement, MonthlySupplierRecord, ScoringBatch};
use crate::types::config::{validate_weight_table, ScorecardConfig};
use std::collections::HashSet;

/// Checks a batch before any score is computed and reports every violation found.
pub fn validate(batch: &ScoringBatch, config: &ScorecardConfig) -> Result<(), ScorecardError> {
    let violations = collect_violations(batch, config);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ScorecardError::Validation(violations))
    }
}

/// `config` supplies the weights that batch `[weights]` are overlaid on.
pub fn collect_violations(batch: &ScoringBatch, config: &ScorecardConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    if batch.duration_months == 0 {
        violations.push(Violation::new("duration_months", "must be at least 1"));
    }

    if batch.suppliers.is_empty() {
        violations.push(Violation::new("suppliers", "at least one supplier is required"));
    }
    let mut seen_suppliers = HashSet::new();
    for supplier in &batch.suppliers {
        if supplier.trim().is_empty() {
            violations.push(Violation::new("suppliers", "supplier names must be non-empty"));
        } else if !seen_suppliers.insert(supplier.as_str()) {
            violations.push(Violation::new(
                "suppliers",
                format!("duplicate supplier: {supplier}"),
            ));
        }
    }

    if let Some(weights) = &batch.weights {
        if let Err(err) = validate_weight_table("weights", weights) {
            violations.push(Violation::new("weights", err.to_string()));
        }
    }
    let total_weight = config.weights(batch.weights.as_ref()).total();
    if !total_weight.is_finite() || total_weight <= 0.0 {
        violations.push(Violation::new(
            "weights",
            format!("total weight must be positive (found {total_weight})"),
        ));
    }

    check_reference_tables(batch, &mut violations);

    let mut seen_records = HashSet::new();
    for record in &batch.records {
        let location = format!("{}/month {}", record.supplier, record.month);
        if !seen_suppliers.contains(record.supplier.as_str()) {
            violations.push(Violation::new(&location, "supplier is not in the supplier list"));
        }
        if record.month == 0 || record.month > batch.duration_months {
            violations.push(Violation::new(
                &location,
                format!("month must be within 1..={}", batch.duration_months),
            ));
        }
        if !seen_records.insert((record.supplier.as_str(), record.month)) {
            violations.push(Violation::new(&location, "duplicate record"));
        }
        check_record(record, &location, &mut violations);
    }

    for month in 1..=batch.duration_months {
        for supplier in &batch.suppliers {
            if !seen_records.contains(&(supplier.as_str(), month)) {
                violations.push(Violation::new(
                    format!("{supplier}/month {month}"),
                    "record is missing",
                ));
            }
        }
    }

    violations
}

fn check_reference_tables(batch: &ScoringBatch, violations: &mut Vec<Violation>) {
    let mut sorted = batch.standard_prices.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    for (item, price) in sorted {
        if !price.is_finite() || *price < 0.0 {
            violations.push(Violation::new(
                format!("standard_prices/{item}"),
                "must be a non-negative number",
            ));
        }
    }

    for entry in &batch.capacity {
        for (item, quantity) in &entry.items {
            if !quantity.is_finite() || *quantity < 0.0 {
                violations.push(Violation::new(
                    format!("capacity/{}/month {}/{item}", entry.supplier, entry.month),
                    "must be a non-negative number",
                ));
            }
        }
    }

    for (supplier, items) in &batch.rolling_prices {
        for (item, price) in items {
            if !price.is_finite() || *price < 0.0 {
                violations.push(Violation::new(
                    format!("rolling_prices/{supplier}/{item}"),
                    "must be a non-negative number",
                ));
            }
        }
    }
}

fn check_record(record: &MonthlySupplierRecord, location: &str, violations: &mut Vec<Violation>) {
    for (name, value) in [
        ("response_score", record.response_score),
        ("reliability_score", record.reliability_score),
    ] {
        if !value.is_finite() || value < 0.0 {
            violations.push(Violation::new(
                location,
                format!("{name} must be a non-negative number"),
            ));
        }
    }

    if record.capa_issues_closed > record.capa_issues_total {
        violations.push(Violation::new(
            location,
            format!(
                "capa_issues_closed ({}) exceeds capa_issues_total ({})",
                record.capa_issues_closed, record.capa_issues_total
            ),
        ));
    }

    if record.items.is_empty() {
        violations.push(Violation::new(location, "at least one item is required"));
    }
    for (index, item) in record.items.iter().enumerate() {
        let item_location = if item.name.trim().is_empty() {
            format!("{location}/item {}", index + 1)
        } else {
            format!("{location}/{}", item.name)
        };
        check_item(item, &item_location, violations);
    }
}

fn check_item(item: &ItemRequirement, location: &str, violations: &mut Vec<Violation>) {
    if item.name.trim().is_empty() {
        violations.push(Violation::new(location, "item name must be non-empty"));
    }
    if item.required_quantity == 0 {
        violations.push(Violation::new(
            location,
            "required_quantity must be greater than zero",
        ));
    }
    if !item.unit_price.is_finite() || item.unit_price <= 0.0 {
        violations.push(Violation::new(location, "unit_price must be greater than zero"));
    }
    if item.deliveries.is_empty() {
        violations.push(Violation::new(location, "at least one delivery is required"));
    }
    for (index, delivery) in item.deliveries.iter().enumerate() {
        check_delivery(
            delivery,
            &format!("{location}/delivery {}", index + 1),
            violations,
        );
    }
}

fn check_delivery(delivery: &Delivery, location: &str, violations: &mut Vec<Violation>) {
    if delivery.quantity_delivered == 0 {
        violations.push(Violation::new(
            location,
            "quantity_delivered must be greater than zero",
        ));
    }
    for (name, value) in [
        ("quantity_accepted", delivery.quantity_accepted),
        ("quantity_damaged", delivery.quantity_damaged),
        ("quantity_defective", delivery.quantity_defective),
    ] {
        if value > delivery.quantity_delivered {
            violations.push(Violation::new(
                location,
                format!(
                    "{name} ({value}) exceeds quantity_delivered ({})",
                    delivery.quantity_delivered
                ),
            ));
        }
    }
}
