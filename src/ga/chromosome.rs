//! Slot-list chromosome for fleet loading.
//!
//! # Encoding
//!
//! One slot per truck. Each slot is an ordered list of indices into the
//! problem's package table. A package appears in at most one slot; packages
//! absent from every slot are that candidate's leftovers.
//!
//! Indices instead of package references keep duplicate checks cheap and
//! independent of object identity.

use std::collections::HashSet;

use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::models::{fits_capacity, Package};

/// A full proposed assignment of packages to every truck of the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Package indices per truck slot.
    pub slots: Vec<Vec<usize>>,
}

impl Assignment {
    /// Creates an assignment with `fleet_size` empty slots.
    pub fn empty(fleet_size: usize) -> Self {
        Self {
            slots: vec![Vec::new(); fleet_size],
        }
    }

    /// Builds a random capacity-respecting assignment.
    ///
    /// Slots are filled in order. For each slot, packages are drawn uniformly
    /// from those still unplaced; a drawn package is loaded if it fits and
    /// skipped for this slot otherwise, until every remaining package has been
    /// tried. Placed packages leave the pool for good, so no package is
    /// assigned twice.
    pub fn random<R: Rng>(
        packages: &[Package],
        fleet_size: usize,
        capacity: f64,
        rng: &mut R,
    ) -> Self {
        let mut pool: Vec<usize> = (0..packages.len()).collect();
        pool.shuffle(rng);

        let mut slots = Vec::with_capacity(fleet_size);
        for _ in 0..fleet_size {
            let mut slot = Vec::new();
            let mut weight = 0.0;
            let mut placed = vec![false; packages.len()];
            let mut candidates = pool.clone();

            while !candidates.is_empty() {
                let pick = rng.random_range(0..candidates.len());
                let idx = candidates.swap_remove(pick);
                let package_weight = packages[idx].weight;
                if fits_capacity(weight, package_weight, capacity) {
                    slot.push(idx);
                    weight += package_weight;
                    placed[idx] = true;
                }
            }

            pool.retain(|&idx| !placed[idx]);
            slots.push(slot);
        }

        Self { slots }
    }

    /// Number of truck slots.
    pub fn fleet_size(&self) -> usize {
        self.slots.len()
    }

    /// All assigned package indices, slot by slot.
    pub fn delivered(&self) -> Vec<usize> {
        self.slots.iter().flatten().copied().collect()
    }

    /// Number of assigned entries (duplicates counted).
    pub fn delivered_count(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    /// Indices of packages in `0..package_count` not assigned to any slot.
    pub fn leftovers(&self, package_count: usize) -> Vec<usize> {
        let delivered: HashSet<usize> = self.slots.iter().flatten().copied().collect();
        (0..package_count)
            .filter(|idx| !delivered.contains(idx))
            .collect()
    }

    /// Whether some package index is assigned more than once.
    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::new();
        self.slots.iter().flatten().any(|&idx| !seen.insert(idx))
    }

    /// Summed weight of one slot.
    pub fn slot_weight(&self, slot: usize, packages: &[Package]) -> f64 {
        self.slots[slot].iter().map(|&idx| packages[idx].weight).sum()
    }

    /// Whether every slot stays within `capacity`.
    pub fn is_within_capacity(&self, packages: &[Package], capacity: f64) -> bool {
        (0..self.slots.len())
            .all(|slot| fits_capacity(self.slot_weight(slot, packages), 0.0, capacity))
    }

    /// Resolves indices to packages.
    pub fn resolve<'a>(&self, packages: &'a [Package]) -> Vec<Vec<&'a Package>> {
        self.slots
            .iter()
            .map(|slot| slot.iter().map(|&idx| &packages[idx]).collect())
            .collect()
    }
}

// ======================== Crossover ========================

/// Capacity-aware slot crossover.
///
/// For each slot index, the packages of both parents' slots are pooled and
/// shuffled. Each package goes to child 1's slot if it fits, else to child 2's
/// slot if it fits, else it is dropped from both children. A package already
/// placed in either child (in any slot) is skipped, so the two children never
/// share a package and never repeat one.
pub fn capacity_crossover<R: Rng>(
    p1: &Assignment,
    p2: &Assignment,
    packages: &[Package],
    capacity: f64,
    rng: &mut R,
) -> (Assignment, Assignment) {
    let mut used1: HashSet<usize> = HashSet::new();
    let mut used2: HashSet<usize> = HashSet::new();
    let mut child1 = Vec::with_capacity(p1.slots.len());
    let mut child2 = Vec::with_capacity(p2.slots.len());

    for (slot1, slot2) in p1.slots.iter().zip(&p2.slots) {
        let mut combined: Vec<usize> = slot1.iter().chain(slot2).copied().collect();
        combined.shuffle(rng);

        let (mut truck1, mut truck2) = (Vec::new(), Vec::new());
        let (mut weight1, mut weight2) = (0.0, 0.0);

        for idx in combined {
            if used1.contains(&idx) || used2.contains(&idx) {
                continue;
            }
            let weight = packages[idx].weight;
            if fits_capacity(weight1, weight, capacity) {
                truck1.push(idx);
                weight1 += weight;
                used1.insert(idx);
            } else if fits_capacity(weight2, weight, capacity) {
                truck2.push(idx);
                weight2 += weight;
                used2.insert(idx);
            }
        }

        child1.push(truck1);
        child2.push(truck2);
    }

    (Assignment { slots: child1 }, Assignment { slots: child2 })
}

// ======================== Mutation ========================

/// Move mutation plus per-slot reordering.
///
/// With probability `rate`, one random package moves from a random non-empty
/// slot to another non-empty slot if it fits there; otherwise it goes back to
/// the end of its own slot. Needs at least two slots.
///
/// Then each slot is shuffled with probability `rate`. Reordering never
/// changes weights or fitness.
///
/// `rate` may exceed 1.0 after adaptive boosts; it then always fires.
pub fn move_mutation<R: Rng>(
    assignment: &mut Assignment,
    packages: &[Package],
    capacity: f64,
    rate: f64,
    rng: &mut R,
) {
    if rng.random::<f64>() < rate && assignment.slots.len() >= 2 {
        let picked = index::sample(rng, assignment.slots.len(), 2);
        let (from, to) = (picked.index(0), picked.index(1));

        if !assignment.slots[from].is_empty() && !assignment.slots[to].is_empty() {
            let pos = rng.random_range(0..assignment.slots[from].len());
            let idx = assignment.slots[from].remove(pos);
            let load = assignment.slot_weight(to, packages);
            if fits_capacity(load, packages[idx].weight, capacity) {
                assignment.slots[to].push(idx);
            } else {
                assignment.slots[from].push(idx);
            }
        }
    }

    for slot in &mut assignment.slots {
        if rng.random::<f64>() < rate {
            slot.shuffle(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn sample_packages() -> Vec<Package> {
        (0..30)
            .map(|i| {
                let weight = 10.0 + (i % 7) as f64 * 15.0;
                Package::new(i, weight, (i % 10 + 1) as f64, (i % 16) as i64 - 5)
            })
            .collect()
    }

    #[test]
    fn test_random_assignment() {
        let packages = sample_packages();
        let mut rng = SmallRng::seed_from_u64(42);
        let a = Assignment::random(&packages, 3, 200.0, &mut rng);

        assert_eq!(a.fleet_size(), 3);
        assert!(!a.has_duplicates());
        assert!(a.is_within_capacity(&packages, 200.0));
        assert_eq!(a.delivered_count() + a.leftovers(packages.len()).len(), packages.len());
    }

    #[test]
    fn test_random_assignment_keeps_drawing_after_misfit() {
        // Heavy package first in weight order; the light ones must still be
        // tried after the heavy one is rejected.
        let packages = vec![
            Package::new(1, 90.0, 1.0, 0),
            Package::new(2, 20.0, 1.0, 0),
            Package::new(3, 20.0, 1.0, 0),
        ];
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let a = Assignment::random(&packages, 1, 100.0, &mut rng);
            // Either {90} or {20, 20}; in both cases the slot is maximal.
            let weight = a.slot_weight(0, &packages);
            assert!(weight == 90.0 || weight == 40.0, "weight {weight}");
            if weight == 90.0 {
                assert_eq!(a.slots[0].len(), 1);
            }
        }
    }

    #[test]
    fn test_random_assignment_oversized_package_left_over() {
        let packages = vec![
            Package::new(1, 500.0, 9.0, 0),
            Package::new(2, 5.0, 1.0, 0),
        ];
        let mut rng = SmallRng::seed_from_u64(42);
        let a = Assignment::random(&packages, 2, 100.0, &mut rng);
        assert_eq!(a.leftovers(packages.len()), vec![0]);
    }

    #[test]
    fn test_crossover_no_shared_packages() {
        let packages = sample_packages();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..50 {
            let p1 = Assignment::random(&packages, 4, 150.0, &mut rng);
            let p2 = Assignment::random(&packages, 4, 150.0, &mut rng);
            let (c1, c2) = capacity_crossover(&p1, &p2, &packages, 150.0, &mut rng);

            assert_eq!(c1.fleet_size(), 4);
            assert_eq!(c2.fleet_size(), 4);
            assert!(c1.is_within_capacity(&packages, 150.0));
            assert!(c2.is_within_capacity(&packages, 150.0));

            let mut combined = c1.delivered();
            combined.extend(c2.delivered());
            let unique: HashSet<usize> = combined.iter().copied().collect();
            assert_eq!(unique.len(), combined.len());
        }
    }

    #[test]
    fn test_crossover_only_uses_parent_packages() {
        let packages = sample_packages();
        let mut rng = SmallRng::seed_from_u64(7);
        let p1 = Assignment::random(&packages, 2, 100.0, &mut rng);
        let p2 = Assignment::random(&packages, 2, 100.0, &mut rng);
        let (c1, c2) = capacity_crossover(&p1, &p2, &packages, 100.0, &mut rng);

        let parents: HashSet<usize> = p1.delivered().into_iter().chain(p2.delivered()).collect();
        assert!(c1.delivered().iter().chain(&c2.delivered()).all(|idx| parents.contains(idx)));
    }

    #[test]
    fn test_crossover_drops_package_fitting_neither_child() {
        let packages = vec![
            Package::new(1, 6.0, 1.0, 0),
            Package::new(2, 6.0, 1.0, 0),
            Package::new(3, 6.0, 1.0, 0),
        ];
        let p1 = Assignment {
            slots: vec![vec![0]],
        };
        let p2 = Assignment {
            slots: vec![vec![1, 2]],
        };

        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let (c1, c2) = capacity_crossover(&p1, &p2, &packages, 10.0, &mut rng);

            // First pooled package fills child 1, second child 2, third is dropped.
            assert_eq!(c1.slots[0].len(), 1);
            assert_eq!(c2.slots[0].len(), 1);
            let kept: HashSet<usize> = c1.delivered().into_iter().chain(c2.delivered()).collect();
            assert_eq!(kept.len(), 2);
            let dropped: Vec<usize> = (0..3).filter(|idx| !kept.contains(idx)).collect();
            assert_eq!(dropped.len(), 1);
        }
    }

    #[test]
    fn test_exactly_full_slot_within_capacity() {
        let packages = vec![
            Package::new(1, 0.1, 1.0, 0),
            Package::new(2, 0.2, 1.0, 0),
            Package::new(3, 0.3, 1.0, 0),
        ];
        // 0.1 + 0.2 + 0.3 sums to 0.6000000000000001.
        let a = Assignment {
            slots: vec![vec![0, 1, 2]],
        };
        assert!(a.is_within_capacity(&packages, 0.6));
    }

    #[test]
    fn test_resolve() {
        let packages = sample_packages();
        let a = Assignment {
            slots: vec![vec![4, 2], vec![]],
        };
        let resolved = a.resolve(&packages);
        let ids: Vec<Vec<u64>> = resolved
            .iter()
            .map(|slot| slot.iter().map(|p| p.id).collect())
            .collect();
        assert_eq!(ids, vec![vec![4, 2], vec![]]);
    }

    #[test]
    fn test_move_mutation_respects_capacity() {
        let packages = sample_packages();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut a = Assignment::random(&packages, 3, 150.0, &mut rng);
        let before = {
            let mut d = a.delivered();
            d.sort_unstable();
            d
        };

        for _ in 0..200 {
            move_mutation(&mut a, &packages, 150.0, 1.0, &mut rng);
            assert!(a.is_within_capacity(&packages, 150.0));
        }

        let mut after = a.delivered();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_move_mutation_zero_rate_is_noop() {
        let packages = sample_packages();
        let mut rng = SmallRng::seed_from_u64(42);
        let original = Assignment::random(&packages, 3, 150.0, &mut rng);
        let mut a = original.clone();
        move_mutation(&mut a, &packages, 150.0, 0.0, &mut rng);
        assert_eq!(a, original);
    }

    #[test]
    fn test_move_mutation_single_slot() {
        let packages = sample_packages();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut a = Assignment::random(&packages, 1, 150.0, &mut rng);
        let count = a.delivered_count();
        move_mutation(&mut a, &packages, 150.0, 2.5, &mut rng);
        assert_eq!(a.delivered_count(), count);
    }

    #[test]
    fn test_move_mutation_moves_when_fits() {
        let packages = vec![Package::new(1, 10.0, 1.0, 0), Package::new(2, 10.0, 1.0, 0)];
        let mut rng = SmallRng::seed_from_u64(3);
        let mut a = Assignment {
            slots: vec![vec![0], vec![1]],
        };
        move_mutation(&mut a, &packages, 100.0, 1.0, &mut rng);
        // One slot gave its only package to the other.
        let sizes: Vec<usize> = a.slots.iter().map(Vec::len).collect();
        assert!(sizes == vec![0, 2] || sizes == vec![2, 0]);
    }

    #[test]
    fn test_move_mutation_puts_back_when_full() {
        let packages = vec![Package::new(1, 60.0, 1.0, 0), Package::new(2, 60.0, 1.0, 0)];
        let mut rng = SmallRng::seed_from_u64(3);
        let mut a = Assignment {
            slots: vec![vec![0], vec![1]],
        };
        move_mutation(&mut a, &packages, 100.0, 1.0, &mut rng);
        assert_eq!(a.slots, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_has_duplicates() {
        let a = Assignment {
            slots: vec![vec![0, 1], vec![1]],
        };
        assert!(a.has_duplicates());
        assert!(!Assignment::empty(3).has_duplicates());
    }
}
