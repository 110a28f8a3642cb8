//! Fleet loading quality metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Profit | Sum of effective profit over loaded packages |
//! | Delivered Penalty | Sum of lateness penalties over loaded packages |
//! | Leftover Penalty | Sum of lateness penalties over leftovers |
//! | Net Profit | Total profit (penalties already included) |
//! | Used Trucks | Trucks carrying at least one package |
//! | Avg Utilization | Mean loaded weight / capacity over all trucks |

use serde::{Deserialize, Serialize};

use crate::models::{Package, Truck};

/// Fleet performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    /// Sum of effective profit over all trucks.
    pub total_profit: f64,
    /// Sum of plain profit over all trucks.
    pub gross_profit: f64,
    /// Lateness penalty of delivered packages (`<= 0`).
    pub delivered_penalty: f64,
    /// Lateness penalty of leftover packages (`<= 0`).
    pub leftover_penalty: f64,
    /// Packages loaded on some truck.
    pub delivered_packages: usize,
    /// Packages left in storage.
    pub leftover_packages: usize,
    /// Trucks carrying at least one package.
    pub used_trucks: usize,
    /// Summed loaded weight.
    pub total_weight: f64,
    /// Average utilization over all trucks (0.0..=1.0).
    pub avg_utilization: f64,
}

impl FleetSummary {
    /// Computes metrics from loaded trucks and the packages left behind.
    pub fn calculate(trucks: &[Truck], leftovers: &[Package]) -> Self {
        let total_profit = trucks.iter().map(Truck::total_profit).sum();
        let gross_profit = trucks.iter().map(Truck::total_plain_profit).sum();
        let delivered_penalty = trucks.iter().map(Truck::total_penalty).sum();
        let leftover_penalty = leftovers.iter().map(Package::calculate_penalty).sum();
        let delivered_packages = trucks.iter().map(Truck::package_count).sum();
        let used_trucks = trucks.iter().filter(|t| !t.is_empty()).count();
        let total_weight = trucks.iter().map(Truck::total_weight).sum();

        let avg_utilization = if trucks.is_empty() {
            0.0
        } else {
            trucks.iter().map(Truck::utilization).sum::<f64>() / trucks.len() as f64
        };

        Self {
            total_profit,
            gross_profit,
            delivered_penalty,
            leftover_penalty,
            delivered_packages,
            leftover_packages: leftovers.len(),
            used_trucks,
            total_weight,
            avg_utilization,
        }
    }

    /// Whether every package was delivered.
    pub fn is_complete(&self) -> bool {
        self.leftover_packages == 0
    }
}
