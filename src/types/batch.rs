use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything the data-entry side hands over for one scoring run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringBatch {
    pub duration_months: u32,
    pub suppliers: Vec<String>,
    #[serde(default)]
    pub weights: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub standard_prices: HashMap<String, f64>,
    #[serde(default)]
    pub capacity: Vec<CapacityEntry>,
    #[serde(default)]
    pub rolling_prices: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    pub records: Vec<MonthlySupplierRecord>,
}

/// Committed capacity of one supplier for one month, per item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CapacityEntry {
    pub supplier: String,
    pub month: u32,
    #[serde(default)]
    pub items: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonthlySupplierRecord {
    pub supplier: String,
    pub month: u32,
    pub order_date: NaiveDate,
    #[serde(default)]
    pub items: Vec<ItemRequirement>,
    pub response_score: f64,
    pub reliability_score: f64,
    #[serde(default)]
    pub capa_issues_total: u32,
    #[serde(default)]
    pub capa_issues_closed: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemRequirement {
    pub name: String,
    pub required_quantity: u32,
    pub expected_delivery_date: NaiveDate,
    pub unit_price: f64,
    #[serde(default)]
    pub deliveries: Vec<Delivery>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Delivery {
    pub date: NaiveDate,
    pub quantity_delivered: u32,
    pub quantity_accepted: u32,
    #[serde(default)]
    pub quantity_damaged: u32,
    #[serde(default)]
    pub quantity_defective: u32,
}

impl Delivery {
    pub fn quantity_rejected(&self) -> u32 {
        self.quantity_delivered.saturating_sub(self.quantity_accepted)
    }
}

impl ScoringBatch {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn record(&self, supplier: &str, month: u32) -> Option<&MonthlySupplierRecord> {
        self.records
            .iter()
            .find(|record| record.supplier == supplier && record.month == month)
    }
}
