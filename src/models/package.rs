//! Package model.
//!
//! A package is a deliverable item waiting in the warehouse. It carries a
//! weight (consumes truck capacity), a profit (earned on delivery) and a
//! deadline slack in days. Overdue packages incur a quadratic penalty.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A package to be loaded onto a truck.
///
/// Packages are immutable once created; the optimizer only ever reads them.
/// Identity (for set membership) is the `id`.
///
/// # Deadline
/// `deadline >= 0` means on time with that many days of slack;
/// `deadline < 0` means overdue by `-deadline` days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Unique package identifier.
    pub id: u64,
    /// Weight (must be > 0).
    pub weight: f64,
    /// Profit earned when delivered.
    pub profit: f64,
    /// Days of slack before the deadline (negative = overdue).
    pub deadline: i64,
}

impl Package {
    /// Creates a new package.
    pub fn new(id: u64, weight: f64, profit: f64, deadline: i64) -> Self {
        Self {
            id,
            weight,
            profit,
            deadline,
        }
    }

    /// Lateness penalty: `-(deadline²)` when overdue, `0` otherwise.
    ///
    /// Always `<= 0`.
    pub fn calculate_penalty(&self) -> f64 {
        if self.deadline < 0 {
            let days = self.deadline as f64;
            -(days * days)
        } else {
            0.0
        }
    }

    /// Profit after the lateness penalty.
    pub fn effective_profit(&self) -> f64 {
        self.profit + self.calculate_penalty()
    }

    /// Profit per unit of weight.
    pub fn profit_density(&self) -> f64 {
        self.profit / self.weight
    }

    /// Whether the package is past its deadline.
    pub fn is_overdue(&self) -> bool {
        self.deadline < 0
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Package {}

impl std::hash::Hash for Package {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Orders packages for loading: highest profit density first, then the
/// largest deadline slack first.
pub fn loading_order(a: &Package, b: &Package) -> Ordering {
    b.profit_density()
        .total_cmp(&a.profit_density())
        .then_with(|| b.deadline.cmp(&a.deadline))
}
