//! Per-generation fitness statistics.

use serde::{Deserialize, Serialize};

use crate::error::ProgressError;

/// Fitness statistics for one generation.
///
/// The last record of a run is the closing record: `generation` is `None`
/// and the values repeat those of the final generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation index, `None` for the closing record.
    pub generation: Option<usize>,
    /// Highest fitness in the population.
    pub best_fitness: f64,
    /// Mean fitness of the population.
    pub mean_fitness: f64,
    /// Mutation rate used to breed this generation.
    pub mutation_rate: f64,
}

impl GenerationRecord {
    pub fn generation(
        generation: usize,
        best_fitness: f64,
        mean_fitness: f64,
        mutation_rate: f64,
    ) -> Self {
        Self {
            generation: Some(generation),
            best_fitness,
            mean_fitness,
            mutation_rate,
        }
    }

    pub fn closing(best_fitness: f64, mean_fitness: f64, mutation_rate: f64) -> Self {
        Self {
            generation: None,
            best_fitness,
            mean_fitness,
            mutation_rate,
        }
    }

    /// Whether this is the closing record of a run.
    pub fn is_closing(&self) -> bool {
        self.generation.is_none()
    }
}

/// Callback invoked once per generation with its record.
///
/// Runs synchronously inside the generation loop. Errors and panics are
/// logged and ignored.
pub type ProgressCallback = Box<dyn FnMut(&GenerationRecord) -> Result<(), ProgressError> + Send>;

/// Best and mean of a population's fitness values (`NaN` when empty).
pub(crate) fn best_and_mean(fitness: &[f64]) -> (f64, f64) {
    if fitness.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let best = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = fitness.iter().sum::<f64>() / fitness.len() as f64;
    (best, mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_and_mean() {
        let (best, mean) = best_and_mean(&[1.0, 4.0, 2.5, 0.5]);
        assert_eq!(best, 4.0);
        assert!((mean - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_closing_record() {
        let r = GenerationRecord::closing(3.0, 2.0, 0.05);
        assert!(r.is_closing());
        assert!(!GenerationRecord::generation(0, 3.0, 2.0, 0.05).is_closing());
    }

    #[test]
    fn test_record_json() {
        let r = GenerationRecord::generation(4, 12.5, 10.25, 0.1);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["generation"], 4);
        assert_eq!(json["best_fitness"], 12.5);

        let closing = serde_json::to_value(GenerationRecord::closing(1.0, 1.0, 0.05)).unwrap();
        assert!(closing["generation"].is_null());
    }
}
