use crate::types::batch::ScoringBatch;
use crate::types::config::UnseededPrice;
use std::collections::{BTreeMap, HashMap};

/// Static lookup tables. A stored zero means "no data" and reads back as `None`.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    standard_prices: HashMap<String, f64>,
    capacity: HashMap<(String, u32), HashMap<String, f64>>,
}

impl ReferenceData {
    pub fn from_batch(batch: &ScoringBatch) -> Self {
        let mut reference = Self::default();
        for (item, price) in &batch.standard_prices {
            reference.set_standard_price(item, *price);
        }
        for entry in &batch.capacity {
            for (item, quantity) in &entry.items {
                reference.set_capacity(&entry.supplier, entry.month, item, *quantity);
            }
        }
        reference
    }

    pub fn set_standard_price(&mut self, item: &str, price: f64) {
        self.standard_prices.insert(item.to_string(), price);
    }

    pub fn set_capacity(&mut self, supplier: &str, month: u32, item: &str, quantity: f64) {
        self.capacity
            .entry((supplier.to_string(), month))
            .or_default()
            .insert(item.to_string(), quantity);
    }

    pub fn standard_price(&self, item: &str) -> Option<f64> {
        self.standard_prices.get(item).copied().filter(|price| *price > 0.0)
    }

    pub fn capacity(&self, supplier: &str, month: u32, item: &str) -> Option<f64> {
        self.capacity
            .get(&(supplier.to_string(), month))
            .and_then(|items| items.get(item))
            .copied()
            .filter(|quantity| *quantity > 0.0)
    }
}

/// Smoothed price per supplier/item, advanced one observation at a time.
#[derive(Debug, Clone)]
pub struct RollingPriceTable {
    averages: HashMap<String, HashMap<String, f64>>,
    window: u32,
    unseeded: UnseededPrice,
}

impl RollingPriceTable {
    pub fn new(
        seed: HashMap<String, HashMap<String, f64>>,
        window: u32,
        unseeded: UnseededPrice,
    ) -> Self {
        Self {
            averages: seed,
            window,
            unseeded,
        }
    }

    pub fn average(&self, supplier: &str, item: &str) -> Option<f64> {
        self.averages
            .get(supplier)
            .and_then(|items| items.get(item))
            .copied()
            .filter(|price| *price > 0.0)
    }

    /// Current averages, sorted by supplier then item.
    pub fn snapshot(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        self.averages
            .iter()
            .map(|(supplier, items)| {
                let items = items
                    .iter()
                    .map(|(item, price)| (item.clone(), *price))
                    .collect();
                (supplier.clone(), items)
            })
            .collect()
    }

    /// Folds `price` into the supplier/item average and returns the new value.
    pub fn observe(&mut self, supplier: &str, item: &str, price: f64) -> f64 {
        let current = match (self.average(supplier, item), self.unseeded) {
            (Some(current), _) => current,
            (None, UnseededPrice::FirstObservation) => price,
            (None, UnseededPrice::Zero) => 0.0,
        };
        let updated = update_average(current, price, self.window);
        tracing::debug!(supplier, item, current, price, updated, "rolling price updated");
        self.averages
            .entry(supplier.to_string())
            .or_default()
            .insert(item.to_string(), updated);
        updated
    }
}

/// `(current·(window−1) + new) / window`; each call weights the new price by `1/window`.
pub fn update_average(current: f64, new_price: f64, window: u32) -> f64 {
    let window = f64::from(window.max(1));
    (current * (window - 1.0) + new_price) / window
}
