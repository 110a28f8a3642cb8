//! Generation controller.
//!
//! Runs select → breed → mutate → evaluate cycles over a fixed number of
//! generations, adapts the mutation rate when the best fitness stalls and
//! materializes the final winner into trucks.
//!
//! # Stagnation
//!
//! When the best fitness equals the previous generation's best exactly, a
//! stagnation counter grows. Reaching `patience` adds `mutation_increase`
//! to the mutation rate and resets the counter. Any change of the best
//! fitness resets both counter and rate.
//!
//! The early-stop check runs after that update, so with `patience >= 1` it
//! never fires and every run lasts all `generations`. With `patience == 0`
//! it fires after the first generation.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

use super::chromosome::Assignment;
use super::config::OptimizerConfig;
use super::operators::GeneticOperators;
use super::problem::FleetProblem;
use super::progress::{best_and_mean, GenerationRecord, ProgressCallback};
use crate::error::{Error, ProgressError};
use crate::models::{Package, Truck};
use crate::planner::FleetSummary;
use crate::validation::validate_packages;

/// Outcome of one optimization run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Identifier used in the run's log records.
    pub run_id: u32,
    /// One record per generation plus the closing record.
    pub history: Vec<GenerationRecord>,
    /// The applied best individual, indexing [`Optimizer::packages`].
    pub best: Assignment,
    /// Fitness of `best`.
    pub best_fitness: f64,
}

/// Genetic fleet loading optimizer.
///
/// Owns the package table, a dedicated random generator and, after
/// [`optimize`](Self::optimize), the loaded trucks and the fitness history.
///
/// # Example
///
/// ```
/// use u_fleet::ga::{Optimizer, OptimizerConfig};
/// use u_fleet::models::Package;
///
/// let packages = vec![
///     Package::new(1, 300.0, 10.0, 2),
///     Package::new(2, 500.0, 8.0, -1),
///     Package::new(3, 400.0, 6.0, -3),
/// ];
/// let config = OptimizerConfig::default()
///     .with_fleet_size(1)
///     .with_generations(20)
///     .with_seed(42);
///
/// let mut optimizer = Optimizer::new(packages, config).unwrap();
/// let report = optimizer.optimize();
/// assert_eq!(report.history.len(), 21);
/// assert!(optimizer.trucks()[0].total_weight() <= 800.0);
/// ```
pub struct Optimizer {
    problem: FleetProblem,
    config: OptimizerConfig,
    operators: GeneticOperators,
    rng: StdRng,
    mutation_rate: f64,
    stagnation_counter: usize,
    last_best_fitness: Option<f64>,
    trucks: Vec<Truck>,
    history: Vec<GenerationRecord>,
    progress: Option<ProgressCallback>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Optimizer {
    /// Validates configuration and packages and prepares a run.
    ///
    /// # Errors
    /// - [`Error::Config`] for an invalid configuration
    /// - [`Error::EmptyPackages`] when `packages` is empty
    /// - [`Error::InvalidPackages`] for duplicate IDs or bad weights
    pub fn new(packages: Vec<Package>, config: OptimizerConfig) -> Result<Self, Error> {
        config.validate()?;
        validate_packages(&packages)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            problem: FleetProblem::new(packages, config.fleet_size, config.capacity),
            operators: GeneticOperators::new(config.tournament_size),
            mutation_rate: config.initial_mutation_rate,
            config,
            rng,
            stagnation_counter: 0,
            last_best_fitness: None,
            trucks: Vec::new(),
            history: Vec::new(),
            progress: None,
            cancel: None,
        })
    }

    /// Sets a callback invoked after every generation.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&GenerationRecord) -> Result<(), ProgressError> + Send + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Sets a flag that ends the run before the next generation once raised.
    ///
    /// A cancelled run still applies the best individual found so far and
    /// appends the closing record.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Runs the genetic algorithm and loads the trucks with the winner.
    ///
    /// Blocks until all generations are done (or the cancel flag is raised).
    #[instrument(level = "info", skip_all, fields(run_id = tracing::field::Empty))]
    pub fn optimize(&mut self) -> RunReport {
        let run_id = match self.config.run_id {
            Some(id) => id,
            None => self.rng.random_range(1..=9999),
        };
        tracing::Span::current().record("run_id", run_id);

        let config = self.config.clone();
        tracing::info!(
            packages = self.problem.packages().len(),
            fleet_size = config.fleet_size,
            capacity = config.capacity,
            population_size = config.population_size,
            generations = config.generations,
            "Start of run"
        );

        self.mutation_rate = config.initial_mutation_rate;
        self.stagnation_counter = 0;
        self.last_best_fitness = None;
        self.history.clear();

        let mut population = self.problem.initialize(config.population_size, &mut self.rng);
        let mut last_stats: Option<(f64, f64)> = None;

        for generation in 0..config.generations {
            if self.is_cancelled() {
                tracing::info!(generation, "Run cancelled");
                break;
            }

            let fitness = self.problem.evaluate_all(&population);
            let parents = self.operators.select(&population, &fitness, &mut self.rng);
            let bred_with = self.mutation_rate;
            population = self.operators.breed(
                &parents,
                &self.problem,
                config.population_size,
                bred_with,
                &mut self.rng,
            );

            let fitness = self.problem.evaluate_all(&population);
            let (best, mean) = best_and_mean(&fitness);
            last_stats = Some((best, mean));

            tracing::debug!(
                generation,
                best_fitness = best,
                mean_fitness = mean,
                mutation_rate = bred_with,
                "Generation evaluated"
            );
            let record = GenerationRecord::generation(generation, best, mean, bred_with);
            self.history.push(record.clone());
            self.report(&record);

            if self.update_stagnation(generation, best) {
                tracing::info!(generation, "Stopping early due to stagnation");
                break;
            }
        }

        let fitness = self.problem.evaluate_all(&population);
        let (best, mean) = last_stats.unwrap_or_else(|| best_and_mean(&fitness));
        self.history
            .push(GenerationRecord::closing(best, mean, self.mutation_rate));

        let best_idx = argmax(&fitness);
        let best_solution = population.swap_remove(best_idx);
        self.trucks = self.problem.apply(&best_solution);

        tracing::info!(
            best_fitness = fitness[best_idx],
            delivered = best_solution.delivered_count(),
            leftovers = self.problem.packages().len() - best_solution.delivered_count(),
            "End of run"
        );

        RunReport {
            run_id,
            history: self.history.clone(),
            best: best_solution,
            best_fitness: fitness[best_idx],
        }
    }

    /// Updates counter and mutation rate from a generation's best fitness.
    ///
    /// Returns whether the run stops early.
    fn update_stagnation(&mut self, generation: usize, best: f64) -> bool {
        if self.last_best_fitness == Some(best) {
            self.stagnation_counter += 1;
            if self.stagnation_counter >= self.config.patience {
                self.mutation_rate += self.config.mutation_increase;
                self.stagnation_counter = 0;
                tracing::info!(
                    generation,
                    mutation_rate = self.mutation_rate,
                    "Best fitness stagnant, boosting mutation rate"
                );
            }
        } else {
            self.stagnation_counter = 0;
            self.mutation_rate = self.config.initial_mutation_rate;
        }

        self.last_best_fitness = Some(best);
        self.stagnation_counter >= self.config.patience
    }

    /// Hands a record to the progress callback, containing any failure.
    fn report(&mut self, record: &GenerationRecord) {
        let Some(callback) = self.progress.as_mut() else {
            return;
        };
        match panic::catch_unwind(AssertUnwindSafe(|| callback(record))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(
                    generation = ?record.generation,
                    error = %err,
                    "Progress callback failed"
                );
            }
            Err(_) => {
                tracing::warn!(generation = ?record.generation, "Progress callback panicked");
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// The package table, sorted by profit density then slack.
    pub fn packages(&self) -> &[Package] {
        self.problem.packages()
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// The problem definition (fitness, operators, applier).
    pub fn problem(&self) -> &FleetProblem {
        &self.problem
    }

    /// Trucks loaded by the last run (empty before any run).
    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    /// Packages on none of the trucks of the last run.
    pub fn leftover_packages(&self) -> Vec<Package> {
        self.problem.leftovers(&self.trucks)
    }

    /// Fitness history of the last run.
    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    /// Current mutation rate (after the last run's adaptations).
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Current stagnation counter.
    pub fn stagnation_counter(&self) -> usize {
        self.stagnation_counter
    }

    /// KPIs of the trucks loaded by the last run.
    pub fn summary(&self) -> FleetSummary {
        FleetSummary::calculate(&self.trucks, &self.leftover_packages())
    }
}

/// Index of the first maximum.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = idx;
        }
    }
    best
}
