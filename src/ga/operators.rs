//! Selection and breeding for the fleet loading GA.
//!
//! # Usage
//!
//! ```
//! use u_fleet::ga::operators::GeneticOperators;
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.tournament_size, 5);
//! ```

use rand::seq::index;
use rand::Rng;

use super::chromosome::Assignment;
use super::problem::FleetProblem;

/// Parents carried unchanged into the next generation.
pub const ELITE_COUNT: usize = 2;

/// Tournament selection plus generational breeding.
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    /// Individuals competing per tournament. Larger = stronger pressure.
    pub tournament_size: usize,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self { tournament_size: 5 }
    }
}

impl GeneticOperators {
    pub fn new(tournament_size: usize) -> Self {
        Self { tournament_size }
    }

    /// Picks `population.len() / 2` parents by tournament.
    ///
    /// Each tournament draws `tournament_size` distinct individuals; the
    /// fittest wins (first drawn on ties). Tournaments are independent, so an
    /// individual can win several times.
    ///
    /// `fitness[i]` must be the score of `population[i]`.
    ///
    /// # Panics
    /// If `tournament_size` exceeds the population size.
    pub fn select<R: Rng>(
        &self,
        population: &[Assignment],
        fitness: &[f64],
        rng: &mut R,
    ) -> Vec<Assignment> {
        (0..population.len() / 2)
            .map(|_| {
                let contenders = index::sample(rng, population.len(), self.tournament_size);
                let mut winner = contenders.index(0);
                for idx in contenders.iter().skip(1) {
                    if fitness[idx] > fitness[winner] {
                        winner = idx;
                    }
                }
                population[winner].clone()
            })
            .collect()
    }

    /// Builds the next generation from selected parents.
    ///
    /// The first [`ELITE_COUNT`] parents are copied as-is. These are
    /// tournament winners, not necessarily the two fittest individuals.
    /// The rest is filled with mutated crossover children of random distinct
    /// parent pairs, then truncated to `population_size`.
    ///
    /// # Panics
    /// If fewer than two parents are given.
    pub fn breed<R: Rng>(
        &self,
        parents: &[Assignment],
        problem: &FleetProblem,
        population_size: usize,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Vec<Assignment> {
        let mut next: Vec<Assignment> = parents.iter().take(ELITE_COUNT).cloned().collect();

        while next.len() < population_size {
            let pair = index::sample(rng, parents.len(), 2);
            let (mut child1, mut child2) =
                problem.crossover(&parents[pair.index(0)], &parents[pair.index(1)], rng);
            problem.mutate(&mut child1, mutation_rate, rng);
            problem.mutate(&mut child2, mutation_rate, rng);
            next.push(child1);
            next.push(child2);
        }

        next.truncate(population_size);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Package;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn sample_problem() -> FleetProblem {
        let packages = (0..25)
            .map(|i| {
                let weight = 10.0 + (i % 5) as f64 * 20.0;
                Package::new(i, weight, (i % 10 + 1) as f64, (i % 16) as i64 - 5)
            })
            .collect();
        FleetProblem::new(packages, 3, 150.0)
    }

    #[test]
    fn test_default_operators() {
        assert_eq!(GeneticOperators::default().tournament_size, 5);
    }

    #[test]
    fn test_select_count() {
        let problem = sample_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let population = problem.initialize(11, &mut rng);
        let fitness = problem.evaluate_all(&population);

        let parents = GeneticOperators::default().select(&population, &fitness, &mut rng);
        assert_eq!(parents.len(), 5);
    }

    #[test]
    fn test_select_full_tournament_picks_best() {
        let problem = sample_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let population = problem.initialize(6, &mut rng);
        let fitness = problem.evaluate_all(&population);
        let best = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Tournament over the whole population always finds the best.
        let ops = GeneticOperators::new(6);
        for parent in ops.select(&population, &fitness, &mut rng) {
            assert_eq!(problem.evaluate(&parent), best);
        }
    }

    #[test]
    fn test_select_winners_beat_average() {
        let problem = sample_problem();
        let mut rng = SmallRng::seed_from_u64(9);
        let population = problem.initialize(40, &mut rng);
        let fitness = problem.evaluate_all(&population);
        let mean = fitness.iter().sum::<f64>() / fitness.len() as f64;

        let parents = GeneticOperators::default().select(&population, &fitness, &mut rng);
        let parent_mean =
            parents.iter().map(|p| problem.evaluate(p)).sum::<f64>() / parents.len() as f64;
        assert!(parent_mean >= mean);
    }

    #[test]
    fn test_breed_size_and_elites() {
        let problem = sample_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        let population = problem.initialize(10, &mut rng);
        let fitness = problem.evaluate_all(&population);
        let ops = GeneticOperators::default();
        let parents = ops.select(&population, &fitness, &mut rng);

        let next = ops.breed(&parents, &problem, 9, 0.05, &mut rng);
        assert_eq!(next.len(), 9);
        assert_eq!(next[0], parents[0]);
        assert_eq!(next[1], parents[1]);
        for individual in &next {
            assert!(individual.is_within_capacity(problem.packages(), 150.0));
            assert!(!individual.has_duplicates());
        }
    }
}
