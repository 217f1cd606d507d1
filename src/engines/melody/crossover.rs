use crate::config::evolution::CrossoverMethod;
use crate::engines::generation::genome::Chromosome;
use crate::engines::generation::operators::swap_tails;
use crate::engines::generation::policy::{CrossoverPolicy, GenericCrossover};
use crate::engines::melody::domain::MusicDomain;
use rand::seq::SliceRandom;
use rand::Rng;

/// Crossover that cuts only between motifs.
///
/// With `CrossoverMethod::Musical` the cut point is drawn from the domain's
/// phrase-aligned points and the tails are swapped. Any other method is
/// handed unchanged to `fallback`, normally the engine's `GenericCrossover`.
#[derive(Debug, Clone)]
pub struct MusicalCrossover<F = GenericCrossover> {
    method: CrossoverMethod,
    points: Vec<usize>,
    fallback: F,
}

impl MusicalCrossover<GenericCrossover> {
    pub fn new(method: CrossoverMethod, domain: &MusicDomain) -> Self {
        Self::with_fallback(method, domain, GenericCrossover::new(method))
    }
}

impl<F: CrossoverPolicy> MusicalCrossover<F> {
    pub fn with_fallback(method: CrossoverMethod, domain: &MusicDomain, fallback: F) -> Self {
        Self {
            method,
            points: domain.crossover_points(),
            fallback,
        }
    }

    pub fn points(&self) -> &[usize] {
        &self.points
    }
}

impl<F: CrossoverPolicy> CrossoverPolicy for MusicalCrossover<F> {
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &[f64],
        parent2: &[f64],
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        if self.method != CrossoverMethod::Musical {
            return self.fallback.crossover(parent1, parent2, rng);
        }

        match self.points.choose(rng) {
            Some(&point) => swap_tails(parent1, parent2, point),
            // Phrase too short to hold two motifs
            None => (parent1.to_vec(), parent2.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_children_are_tail_swaps_at_allowed_points() {
        let domain = MusicDomain::default();
        let crossover = MusicalCrossover::new(CrossoverMethod::Musical, &domain);
        let p1: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let p2: Vec<f64> = (100..116).map(|i| i as f64).collect();
        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(crossover.points(), &[4, 8, 12]);

        for _ in 0..100 {
            let (c1, c2) = crossover.crossover(&p1, &p2, &mut rng);
            let point = c1.iter().position(|g| *g >= 100.0).unwrap();
            assert!(crossover.points().contains(&point));
            assert_eq!(c1, [&p1[..point], &p2[point..]].concat());
            assert_eq!(c2, [&p2[..point], &p1[point..]].concat());
        }
    }

    #[test]
    fn test_no_points_copies_parents() {
        let domain = MusicDomain::new(vec![60.0], vec![1.0], 1);
        let crossover = MusicalCrossover::new(CrossoverMethod::Musical, &domain);
        let mut rng = StdRng::seed_from_u64(8);
        let (c1, c2) = crossover.crossover(&[60.0, 1.0], &[62.0, 0.5], &mut rng);
        assert_eq!(c1, vec![60.0, 1.0]);
        assert_eq!(c2, vec![62.0, 0.5]);
    }
}
