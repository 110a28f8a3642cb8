//! Optimizer configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the fleet loading GA.
///
/// # Examples
///
/// ```
/// use u_fleet::ga::OptimizerConfig;
///
/// let config = OptimizerConfig::default()
///     .with_fleet_size(3)
///     .with_capacity(500.0)
///     .with_population_size(20)
///     .with_generations(100)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Number of trucks available.
    pub fleet_size: usize,

    /// Weight ceiling of each truck.
    pub capacity: f64,

    /// Individuals per generation.
    pub population_size: usize,

    /// Number of generations to run.
    pub generations: usize,

    /// Mutation probability at the start of the run and after any change
    /// of the best fitness.
    pub initial_mutation_rate: f64,

    /// Consecutive generations with unchanged best fitness before the
    /// mutation rate is boosted.
    pub patience: usize,

    /// Amount added to the mutation rate on each boost. Not capped.
    pub mutation_increase: f64,

    /// Individuals competing in one selection tournament.
    pub tournament_size: usize,

    /// Random seed for reproducibility (`None` = OS entropy).
    pub seed: Option<u64>,

    /// Identifier attached to log records (`None` = drawn at random).
    pub run_id: Option<u32>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            fleet_size: 10,
            capacity: 800.0,
            population_size: 10,
            generations: 50,
            initial_mutation_rate: 0.05,
            patience: 5,
            mutation_increase: 0.05,
            tournament_size: 5,
            seed: None,
            run_id: None,
        }
    }
}

impl OptimizerConfig {
    pub fn with_fleet_size(mut self, n: usize) -> Self {
        self.fleet_size = n;
        self
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_initial_mutation_rate(mut self, rate: f64) -> Self {
        self.initial_mutation_rate = rate;
        self
    }

    pub fn with_patience(mut self, n: usize) -> Self {
        self.patience = n;
        self
    }

    pub fn with_mutation_increase(mut self, increase: f64) -> Self {
        self.mutation_increase = increase;
        self
    }

    pub fn with_tournament_size(mut self, n: usize) -> Self {
        self.tournament_size = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_run_id(mut self, run_id: u32) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Validates the configuration.
    ///
    /// `patience == 0` and `generations == 0` are accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fleet_size == 0 {
            return Err(ConfigError::ZeroFleetSize);
        }
        if !self.capacity.is_finite() || self.capacity <= 0.0 {
            return Err(ConfigError::InvalidCapacity(self.capacity));
        }
        // Selection keeps half the population and breeding draws two
        // distinct parents from it.
        if self.population_size < 4 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(ConfigError::InvalidTournamentSize {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.initial_mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.initial_mutation_rate));
        }
        if !self.mutation_increase.is_finite() || self.mutation_increase < 0.0 {
            return Err(ConfigError::InvalidMutationIncrease(self.mutation_increase));
        }
        Ok(())
    }
}
