//! First-fit greedy fleet loader.
//!
//! # Algorithm
//!
//! 1. Sort packages by profit density, then deadline slack (descending).
//! 2. Offer each package to the open trucks in opening order; the first
//!    truck with room takes it.
//! 3. If none has room and the fleet is not exhausted, open a new truck
//!    and load the package there.
//! 4. Otherwise the package stays in storage.
//!
//! # Complexity
//! O(n * t) where n=packages, t=fleet size.
//!
//! Fast baseline to compare GA results against; not optimal.

use super::FleetSummary;
use crate::models::{loading_order, Package, Truck};

/// Result of a greedy loading pass.
#[derive(Debug, Clone)]
pub struct GreedyPlan {
    /// Opened trucks, in opening order.
    pub trucks: Vec<Truck>,
    /// Packages no truck could take, in loading order.
    pub leftovers: Vec<Package>,
}

impl GreedyPlan {
    /// KPIs of this plan.
    pub fn summary(&self) -> FleetSummary {
        FleetSummary::calculate(&self.trucks, &self.leftovers)
    }
}

/// First-fit greedy loader.
///
/// # Example
///
/// ```
/// use u_fleet::planner::GreedyPlanner;
/// use u_fleet::models::Package;
///
/// let packages = vec![
///     Package::new(1, 300.0, 10.0, 2),
///     Package::new(2, 500.0, 8.0, -1),
///     Package::new(3, 400.0, 6.0, -3),
/// ];
/// let plan = GreedyPlanner::new(1, 800.0).plan(&packages);
/// assert_eq!(plan.trucks.len(), 1);
/// assert_eq!(plan.leftovers.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyPlanner {
    fleet_size: usize,
    capacity: f64,
}

impl GreedyPlanner {
    /// Creates a planner for `fleet_size` trucks of the given capacity.
    pub fn new(fleet_size: usize, capacity: f64) -> Self {
        Self {
            fleet_size,
            capacity,
        }
    }

    /// Loads packages first-fit, opening trucks on demand.
    pub fn plan(&self, packages: &[Package]) -> GreedyPlan {
        let mut order: Vec<&Package> = packages.iter().collect();
        order.sort_by(|a, b| loading_order(a, b));

        let mut trucks: Vec<Truck> = Vec::new();
        let mut leftovers = Vec::new();

        for package in order {
            if let Some(truck) = trucks.iter_mut().find(|t| t.fits(package.weight)) {
                truck.add_package(package.clone());
                continue;
            }

            if trucks.len() < self.fleet_size {
                let mut truck = Truck::numbered(trucks.len(), self.capacity);
                if truck.add_package(package.clone()) {
                    trucks.push(truck);
                    continue;
                }
            }

            leftovers.push(package.clone());
        }

        tracing::debug!(
            opened_trucks = trucks.len(),
            leftovers = leftovers.len(),
            "Greedy loading finished"
        );

        GreedyPlan { trucks, leftovers }
    }
}
