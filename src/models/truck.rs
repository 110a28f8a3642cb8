//! Truck model.
//!
//! A truck is a capacity-bounded container of packages. The capacity check
//! in [`Truck::add_package`] is the only way packages get in.

use serde::{Deserialize, Serialize};

use super::Package;

/// Relative slack on the capacity ceiling.
///
/// Summing the same weights in a different order can land a few ulps above
/// an exactly-full capacity.
const LOAD_TOLERANCE: f64 = 1e-9;

/// Whether `weight` can be added to a current `load` under `capacity`.
///
/// Every capacity decision (truck loading and GA operators alike) goes
/// through this check, so a slot accepted in one summation order is also
/// accepted in any other.
pub fn fits_capacity(load: f64, weight: f64, capacity: f64) -> bool {
    load + weight <= capacity * (1.0 + LOAD_TOLERANCE)
}

/// A delivery truck with a weight ceiling.
///
/// # Invariant
/// The summed weight of `packages` never exceeds `capacity` (up to
/// [`fits_capacity`]'s rounding slack).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    id: String,
    capacity: f64,
    packages: Vec<Package>,
}

impl Truck {
    /// Creates an empty truck.
    pub fn new(id: impl Into<String>, capacity: f64) -> Self {
        Self {
            id: id.into(),
            capacity,
            packages: Vec::new(),
        }
    }

    /// Creates the `index`-th truck of a fleet (`Truck_1`, `Truck_2`, ...).
    pub fn numbered(index: usize, capacity: f64) -> Self {
        Self::new(format!("Truck_{}", index + 1), capacity)
    }

    /// Truck ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Maximum load weight.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Loaded packages in loading order.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Whether a package of the given weight still fits.
    pub fn fits(&self, weight: f64) -> bool {
        fits_capacity(self.total_weight(), weight, self.capacity)
    }

    /// Whether the loaded weight is within capacity.
    pub fn is_within_capacity(&self) -> bool {
        fits_capacity(self.total_weight(), 0.0, self.capacity)
    }

    /// Loads the package if it fits.
    ///
    /// Returns `false` and leaves the truck untouched when it does not.
    pub fn add_package(&mut self, package: Package) -> bool {
        if self.fits(package.weight) {
            self.packages.push(package);
            true
        } else {
            false
        }
    }

    /// Summed weight of loaded packages.
    pub fn total_weight(&self) -> f64 {
        self.packages.iter().map(|p| p.weight).sum()
    }

    /// Summed effective profit (profit minus lateness penalty).
    pub fn total_profit(&self) -> f64 {
        self.packages.iter().map(Package::effective_profit).sum()
    }

    /// Summed plain profit, ignoring lateness.
    pub fn total_plain_profit(&self) -> f64 {
        self.packages.iter().map(|p| p.profit).sum()
    }

    /// Summed lateness penalty of loaded packages (`<= 0`).
    pub fn total_penalty(&self) -> f64 {
        self.packages.iter().map(Package::calculate_penalty).sum()
    }

    /// Remaining capacity.
    pub fn free_capacity(&self) -> f64 {
        self.capacity - self.total_weight()
    }

    /// Fraction of capacity in use (0.0..=1.0).
    pub fn utilization(&self) -> f64 {
        if self.capacity <= 0.0 {
            0.0
        } else {
            self.total_weight() / self.capacity
        }
    }

    /// Whether nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Number of loaded packages.
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }
}
