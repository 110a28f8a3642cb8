//! Crate error types.

use crate::validation::ValidationError;

/// Errors that stop an optimization run before the first generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Package list is empty")]
    EmptyPackages,
    #[error("Invalid packages: {}", join_messages(.0))]
    InvalidPackages(Vec<ValidationError>),
}

/// Configuration rule violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("fleet_size must be at least 1")]
    ZeroFleetSize,
    #[error("capacity must be a positive finite number, got {0}")]
    InvalidCapacity(f64),
    #[error("population_size must be at least 4, got {0}")]
    PopulationTooSmall(usize),
    #[error("tournament_size must be in 1..={population_size}, got {tournament_size}")]
    InvalidTournamentSize {
        tournament_size: usize,
        population_size: usize,
    },
    #[error("initial_mutation_rate must be within [0, 1], got {0}")]
    InvalidMutationRate(f64),
    #[error("mutation_increase must be a non-negative finite number, got {0}")]
    InvalidMutationIncrease(f64),
}

/// Failure reported by a progress callback.
///
/// Callback failures are logged and otherwise ignored by the optimizer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Progress callback failed: {0}")]
pub struct ProgressError(pub String);

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        use crate::validation::ValidationErrorKind;

        if errors.iter().any(|e| e.kind == ValidationErrorKind::Empty) {
            Error::EmptyPackages
        } else {
            Error::InvalidPackages(errors)
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
