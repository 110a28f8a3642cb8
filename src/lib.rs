//! Fleet loading optimization for the U-Engine ecosystem.
//!
//! Loads weighted, profit-bearing, deadline-sensitive packages onto a fleet
//! of identical capacity-limited trucks using a genetic algorithm.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Package`, `Truck`
//! - **`ga`**: Genetic optimizer: `Optimizer`, `OptimizerConfig`, `FleetProblem`
//! - **`planner`**: Greedy first-fit baseline and `FleetSummary` KPIs
//! - **`generator`**: Synthetic warehouse stock
//! - **`validation`**: Input integrity checks (duplicate IDs, weights)
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use u_fleet::ga::{Optimizer, OptimizerConfig};
//! use u_fleet::generator::generate_packages;
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let packages = generate_packages(100, &mut SmallRng::seed_from_u64(7));
//! let config = OptimizerConfig::default()
//!     .with_capacity(60.0)
//!     .with_population_size(20)
//!     .with_generations(10)
//!     .with_seed(7);
//!
//! let mut optimizer = Optimizer::new(packages, config).unwrap();
//! optimizer.optimize();
//! let summary = optimizer.summary();
//! assert_eq!(summary.delivered_packages + summary.leftover_packages, 100);
//! ```
//!
//! # References
//!
//! - Martello & Toth (1990), "Knapsack Problems: Algorithms and Computer Implementations"
//! - Holland (1975), "Adaptation in Natural and Artificial Systems"

pub mod error;
pub mod ga;
pub mod generator;
pub mod models;
pub mod planner;
pub mod validation;

pub use error::{ConfigError, Error, ProgressError};
