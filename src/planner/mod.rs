//! Greedy baseline loader and fleet KPIs.
//!
//! # Algorithm
//!
//! `GreedyPlanner` loads packages first-fit in profit-density order,
//! opening trucks on demand up to the fleet size. Not optimal, but a fast
//! reference point for GA results.
//!
//! # KPI
//!
//! `FleetSummary` computes profit, penalty, leftover and utilization
//! figures for any set of loaded trucks.

mod greedy;
mod summary;

pub use greedy::{GreedyPlan, GreedyPlanner};
pub use summary::FleetSummary;
