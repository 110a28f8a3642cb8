//! Fleet loading domain models.
//!
//! # Domain Mappings
//!
//! | u-fleet | Knapsack | Warehouse |
//! |---------|----------|-----------|
//! | Package | Item | Parcel on the shelf |
//! | Truck | Knapsack | Delivery vehicle |
//! | Leftover | Unpacked item | Stays in storage |

mod package;
mod truck;

pub use package::{loading_order, Package};
pub use truck::{fits_capacity, Truck};
