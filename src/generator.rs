//! Synthetic warehouse stock for benchmarks and tests.

use std::collections::HashSet;

use rand::Rng;

use crate::models::Package;

/// Value ranges for generated packages.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Inclusive ID range; must hold at least `count` values.
    pub id_range: (u64, u64),
    /// Weight range `[min, max]`, rounded to two decimals.
    pub weight_range: (f64, f64),
    /// Inclusive integer profit range.
    pub profit_range: (u32, u32),
    /// Inclusive deadline range in days.
    pub deadline_range: (i64, i64),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            id_range: (1_000_000, 9_999_999),
            weight_range: (0.1, 20.0),
            profit_range: (1, 10),
            deadline_range: (-5, 10),
        }
    }
}

/// Generates `count` packages with the default warehouse distribution.
///
/// IDs are unique within the returned set.
pub fn generate_packages<R: Rng>(count: usize, rng: &mut R) -> Vec<Package> {
    generate_packages_with(count, &GeneratorConfig::default(), rng)
}

/// Generates `count` packages from the given ranges.
///
/// # Panics
/// If the ID range holds fewer than `count` values.
pub fn generate_packages_with<R: Rng>(
    count: usize,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Vec<Package> {
    let (id_lo, id_hi) = config.id_range;
    assert!(
        id_hi.saturating_sub(id_lo).saturating_add(1) >= count as u64,
        "id range too small for {count} packages"
    );

    let mut ids = HashSet::with_capacity(count);
    let mut packages = Vec::with_capacity(count);

    while packages.len() < count {
        let id = rng.random_range(id_lo..=id_hi);
        if !ids.insert(id) {
            continue;
        }
        let raw_weight = rng.random_range(config.weight_range.0..=config.weight_range.1);
        let weight = ((raw_weight * 100.0).round() / 100.0).max(0.01);
        let profit = rng.random_range(config.profit_range.0..=config.profit_range.1) as f64;
        let deadline = rng.random_range(config.deadline_range.0..=config.deadline_range.1);
        packages.push(Package::new(id, weight, profit, deadline));
    }

    packages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_packages;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_default_ranges() {
        let mut rng = SmallRng::seed_from_u64(42);
        let packages = generate_packages(500, &mut rng);

        assert_eq!(packages.len(), 500);
        for p in &packages {
            assert!((1_000_000..=9_999_999).contains(&p.id));
            assert!(p.weight >= 0.1 && p.weight <= 20.0);
            assert!(p.profit >= 1.0 && p.profit <= 10.0);
            assert!((-5..=10).contains(&p.deadline));
        }
        assert!(validate_packages(&packages).is_ok());
    }

    #[test]
    fn test_unique_ids_in_tight_range() {
        let config = GeneratorConfig {
            id_range: (1, 20),
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(42);
        let packages = generate_packages_with(20, &config, &mut rng);
        let ids: HashSet<u64> = packages.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = generate_packages(50, &mut SmallRng::seed_from_u64(1));
        let b = generate_packages(50, &mut SmallRng::seed_from_u64(1));
        let ids_a: Vec<u64> = a.iter().map(|p| p.id).collect();
        let ids_b: Vec<u64> = b.iter().map(|p| p.id).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    #[should_panic(expected = "id range too small")]
    fn test_id_range_too_small() {
        let config = GeneratorConfig {
            id_range: (1, 5),
            ..Default::default()
        };
        generate_packages_with(6, &config, &mut SmallRng::seed_from_u64(0));
    }
}
