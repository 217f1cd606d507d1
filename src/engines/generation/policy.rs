//! Strategy interfaces the evolution engine is composed from.
//!
//! The engine never knows what a chromosome means. Scoring, mutation and
//! recombination are injected as policy objects, so a domain plugs in by
//! implementing these traits instead of specialising the engine.

use crate::config::evolution::CrossoverMethod;
use crate::engines::generation::genome::{Bounds, Chromosome};
use crate::engines::generation::operators::{random_gene, single_point_crossover, uniform_crossover};
use rand::Rng;

/// Scores one chromosome. Higher is better.
///
/// Implementations must be pure: the engine may evaluate a population in
/// parallel and relies on repeated calls returning the same value.
pub trait FitnessFunction: Sync {
    fn evaluate(&self, chromosome: &[f64]) -> f64;
}

impl<F> FitnessFunction for F
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    fn evaluate(&self, chromosome: &[f64]) -> f64 {
        self(chromosome)
    }
}

/// Produces a perturbed copy of a chromosome. The input is never modified.
pub trait MutationPolicy {
    fn mutate<R: Rng + ?Sized>(&self, chromosome: &[f64], rng: &mut R) -> Chromosome;
}

/// Recombines two parents into exactly two children. Parents are never modified.
pub trait CrossoverPolicy {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &[f64],
        parent2: &[f64],
        rng: &mut R,
    ) -> (Chromosome, Chromosome);
}

/// The engine's own crossover, used when no domain-specific operator applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericCrossover {
    pub method: CrossoverMethod,
}

impl GenericCrossover {
    pub fn new(method: CrossoverMethod) -> Self {
        Self { method }
    }
}

impl CrossoverPolicy for GenericCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &[f64],
        parent2: &[f64],
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        match self.method {
            CrossoverMethod::Uniform => uniform_crossover(parent1, parent2, rng),
            // The engine has no notion of musical boundaries
            CrossoverMethod::SinglePoint | CrossoverMethod::Musical => {
                single_point_crossover(parent1, parent2, rng)
            }
        }
    }
}

/// The engine's default mutation: redraw genes uniformly inside their bounds
#[derive(Debug, Clone)]
pub struct BoundedMutation {
    pub rate: f64,
    pub bounds: Bounds,
}

impl BoundedMutation {
    pub fn new(rate: f64, bounds: Bounds) -> Self {
        Self { rate, bounds }
    }
}

impl MutationPolicy for BoundedMutation {
    fn mutate<R: Rng + ?Sized>(&self, chromosome: &[f64], rng: &mut R) -> Chromosome {
        let mut mutated = chromosome.to_vec();
        for (gene, bounds) in mutated.iter_mut().zip(&self.bounds) {
            if rng.gen::<f64>() < self.rate {
                *gene = random_gene(*bounds, rng);
            }
        }
        mutated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_closure_is_fitness_function() {
        let sum = |c: &[f64]| c.iter().sum::<f64>();
        assert_eq!(sum.evaluate(&[1.0, 2.0, 3.0]), 6.0);
    }

    #[test]
    fn test_bounded_mutation_rate_zero_is_identity() {
        let mut rng = StdRng::seed_from_u64(11);
        let policy = BoundedMutation::new(0.0, vec![(0.0, 1.0); 4]);
        let input = vec![5.0, 6.0, 7.0, 8.0];
        assert_eq!(policy.mutate(&input, &mut rng), input);
    }

    #[test]
    fn test_bounded_mutation_rate_one_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let policy = BoundedMutation::new(1.0, vec![(0.0, 1.0); 4]);
        let out = policy.mutate(&[5.0, 6.0, 7.0, 8.0], &mut rng);
        assert!(out.iter().all(|g| (0.0..=1.0).contains(g)));
    }

    #[test]
    fn test_uniform_crossover_conserves_genes() {
        let mut rng = StdRng::seed_from_u64(5);
        let policy = GenericCrossover::new(CrossoverMethod::Uniform);
        let p1 = vec![1.0, 2.0, 3.0, 4.0];
        let p2 = vec![5.0, 6.0, 7.0, 8.0];
        let (c1, c2) = policy.crossover(&p1, &p2, &mut rng);
        for i in 0..4 {
            let mut pair = [c1[i], c2[i]];
            pair.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(pair, [p1[i], p2[i]]);
        }
    }
}
