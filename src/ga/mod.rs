//! GA-based fleet loading optimization.
//!
//! Evolves a population of truck loadings through tournament selection,
//! capacity-aware crossover and move/shuffle mutation, raising the mutation
//! rate while the best fitness stalls.
//!
//! # Encoding
//!
//! An [`Assignment`] holds one slot per truck. Each slot lists indices into
//! the problem's package table, which is sorted by profit density and never
//! mutated. Packages no slot references are leftovers.
//!
//! # Submodules
//!
//! - [`operators`]: Tournament selection and breeding with elitism
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Martello & Toth (1990), "Knapsack Problems: Algorithms and Computer Implementations"

mod chromosome;
mod config;
pub mod operators;
mod optimizer;
mod problem;
mod progress;

pub use chromosome::{capacity_crossover, move_mutation, Assignment};
pub use config::OptimizerConfig;
pub use optimizer::{Optimizer, RunReport};
pub use problem::FleetProblem;
pub use progress::{GenerationRecord, ProgressCallback};
