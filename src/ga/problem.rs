//! Fleet loading GA problem definition.
//!
//! Owns the package table every [`Assignment`] indexes into, scores
//! candidates and turns the winner into concrete trucks.

use std::collections::HashSet;

use rand::Rng;

use super::chromosome::{capacity_crossover, move_mutation, Assignment};
use crate::models::{loading_order, Package, Truck};

/// Weight of the diversity term in the fitness score.
const DIVERSITY_WEIGHT: f64 = 0.1;

/// GA problem definition for fleet loading.
///
/// # Example
/// ```
/// use u_fleet::ga::FleetProblem;
/// use u_fleet::models::Package;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let packages = vec![Package::new(1, 300.0, 10.0, 2), Package::new(2, 500.0, 8.0, -1)];
/// let problem = FleetProblem::new(packages, 1, 800.0);
/// let mut rng = SmallRng::seed_from_u64(42);
/// let individual = problem.create_individual(&mut rng);
/// assert!(problem.evaluate(&individual).is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct FleetProblem {
    /// Packages, sorted by [`loading_order`]. Never mutated.
    packages: Vec<Package>,
    /// Number of trucks.
    fleet_size: usize,
    /// Weight ceiling per truck.
    capacity: f64,
}

impl FleetProblem {
    /// Creates a problem; packages are sorted by profit density, then slack.
    pub fn new(mut packages: Vec<Package>, fleet_size: usize, capacity: f64) -> Self {
        packages.sort_by(loading_order);
        Self {
            packages,
            fleet_size,
            capacity,
        }
    }

    /// The sorted package table.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn fleet_size(&self) -> usize {
        self.fleet_size
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Creates a random capacity-respecting individual.
    pub fn create_individual<R: Rng>(&self, rng: &mut R) -> Assignment {
        Assignment::random(&self.packages, self.fleet_size, self.capacity, rng)
    }

    /// Creates the first generation.
    pub fn initialize<R: Rng>(&self, population_size: usize, rng: &mut R) -> Vec<Assignment> {
        (0..population_size)
            .map(|_| self.create_individual(rng))
            .collect()
    }

    /// Scores an individual. Higher is better.
    ///
    /// `score = delivered_profit - leftover_penalty + 0.1 * diversity`
    ///
    /// - `delivered_profit` sums plain profit over all assigned entries.
    /// - `leftover_penalty` sums [`Package::calculate_penalty`] over packages
    ///   no slot contains. The terms are `<= 0`, so subtracting them *raises*
    ///   the score for every overdue package left behind.
    /// - `diversity` is `unique / assigned` (1.0 without duplicates, 0.0 when
    ///   nothing is assigned).
    pub fn evaluate(&self, individual: &Assignment) -> f64 {
        let delivered = individual.delivered();
        let total_profit: f64 = delivered.iter().map(|&idx| self.packages[idx].profit).sum();

        let unique: HashSet<usize> = delivered.iter().copied().collect();
        let total_penalty: f64 = self
            .packages
            .iter()
            .enumerate()
            .filter(|(idx, _)| !unique.contains(idx))
            .map(|(_, p)| p.calculate_penalty())
            .sum();

        let diversity = if delivered.is_empty() {
            0.0
        } else {
            unique.len() as f64 / delivered.len() as f64
        };

        total_profit - total_penalty + DIVERSITY_WEIGHT * diversity
    }

    /// Scores a whole population, in order.
    pub fn evaluate_all(&self, population: &[Assignment]) -> Vec<f64> {
        population.iter().map(|ind| self.evaluate(ind)).collect()
    }

    /// Capacity-aware crossover producing two children.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &Assignment,
        parent2: &Assignment,
        rng: &mut R,
    ) -> (Assignment, Assignment) {
        capacity_crossover(parent1, parent2, &self.packages, self.capacity, rng)
    }

    /// Mutates in place with the given rate.
    pub fn mutate<R: Rng>(&self, individual: &mut Assignment, rate: f64, rng: &mut R) {
        move_mutation(individual, &self.packages, self.capacity, rate, rng);
    }

    /// Materializes an individual into fresh trucks `Truck_1..Truck_n`.
    ///
    /// Each slot's packages are loaded in order through
    /// [`Truck::add_package`], so capacity holds even for a malformed slot.
    pub fn apply(&self, solution: &Assignment) -> Vec<Truck> {
        let mut trucks: Vec<Truck> = (0..self.fleet_size)
            .map(|i| Truck::numbered(i, self.capacity))
            .collect();

        for (truck, slot) in trucks.iter_mut().zip(solution.resolve(&self.packages)) {
            for package in slot {
                truck.add_package(package.clone());
            }
        }

        trucks
    }

    /// Packages not loaded on any of the given trucks, in table order.
    pub fn leftovers(&self, trucks: &[Truck]) -> Vec<Package> {
        let loaded: HashSet<u64> = trucks
            .iter()
            .flat_map(|t| t.packages().iter().map(|p| p.id))
            .collect();
        self.packages
            .iter()
            .filter(|p| !loaded.contains(&p.id))
            .cloned()
            .collect()
    }
}
